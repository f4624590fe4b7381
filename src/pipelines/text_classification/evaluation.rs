use std::sync::Arc;

use burn::{
    data::{
        dataloader::{DataLoader, DataLoaderBuilder},
        dataset::Dataset,
    },
    tensor::backend::Backend,
    train::ValidStep,
};

use crate::models::pooled_embedding::Model;

use super::{batcher::Train, loss::count_correct, Batcher, Item, Output};

/// Logits above this value are predicted as the positive class
pub const LOGIT_THRESHOLD: f32 = 0.0;

/// Probabilities above this value are predicted as the positive class
pub const PROBABILITY_THRESHOLD: f32 = 0.5;

/// Loss and accuracy over a whole partition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    /// Mean binary cross-entropy per sample
    pub loss: f64,

    /// Fraction of correctly classified samples
    pub accuracy: f64,
}

/// Running per-sample means of loss and accuracy over a sequence of batches
#[derive(Clone, Debug, Default)]
pub struct Accumulator {
    loss_sum: f64,
    correct: usize,
    count: usize,
}

impl Accumulator {
    /// Add one batch, weighting its mean loss by the batch size
    pub fn update<B: Backend>(&mut self, output: Output<B>, threshold: f32) {
        let batch_size = output.batch_size();
        let (loss, scores, targets) = output.into_values();

        self.loss_sum += loss * batch_size as f64;
        self.correct += count_correct(&scores, &targets, threshold);
        self.count += batch_size;
    }

    /// The number of samples seen so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Finish with the means over every sample seen
    pub fn finish(&self) -> Evaluation {
        if self.count == 0 {
            return Evaluation {
                loss: f64::NAN,
                accuracy: 0.0,
            };
        }

        Evaluation {
            loss: self.loss_sum / self.count as f64,
            accuracy: self.correct as f64 / self.count as f64,
        }
    }
}

/// Compute loss and logit-thresholded accuracy over vectorized batches
pub fn evaluate<B: Backend>(
    model: &Model<B>,
    dataloader: Arc<dyn DataLoader<Train<B>>>,
) -> Evaluation {
    let mut accumulator = Accumulator::default();

    for batch in dataloader.iter() {
        let output = ValidStep::step(model, batch);

        accumulator.update(output, LOGIT_THRESHOLD);
    }

    accumulator.finish()
}

/// Vectorize and batch a raw dataset, then evaluate it
pub fn evaluate_dataset<B, I, D>(
    model: &Model<B>,
    batcher: Batcher<B>,
    dataset: D,
    batch_size: usize,
) -> anyhow::Result<Evaluation>
where
    B: Backend,
    I: Item + 'static,
    D: Dataset<I> + 'static,
{
    batcher.check(&dataset)?;

    let workers = std::thread::available_parallelism()?;

    let dataloader: Arc<dyn DataLoader<Train<B>>> = DataLoaderBuilder::new(batcher)
        .batch_size(batch_size)
        .num_workers(workers.into())
        .build(dataset);

    Ok(evaluate(model, dataloader))
}
