use std::sync::Arc;

use burn::{
    data::{
        dataloader::{DataLoader, DataLoaderBuilder},
        dataset::Dataset,
    },
    module::AutodiffModule,
    optim::{AdamConfig, Optimizer},
    tensor::backend::AutodiffBackend,
    train::{TrainOutput, TrainStep},
    LearningRate,
};
use log::info;

use crate::{
    models::pooled_embedding::{self, Model},
    pipelines::TEXT_CLASSIFICATION,
};

use super::{
    batcher::Train,
    evaluation::{evaluate, Accumulator, LOGIT_THRESHOLD},
    history::{EpochMetrics, History},
    Batcher, Item, TextVectorizer,
};

/// Define configuration struct for the experiment
#[derive(burn::config::Config)]
pub struct Config {
    /// Batch size
    #[config(default = 32)]
    pub batch_size: usize,

    /// Number of epochs
    #[config(default = 25)]
    pub num_epochs: usize,

    /// Seed for the train/validation split, shuffling, and weight initialization
    #[config(default = 42)]
    pub seed: u64,

    /// Fraction of the training directory held out for validation
    #[config(default = 0.2)]
    pub validation_split: f64,

    /// Maximum vocabulary size, including the pad and OOV entries
    #[config(default = 10000)]
    pub max_tokens: usize,

    /// Length of every vectorized sequence
    #[config(default = 250)]
    pub sequence_length: usize,

    /// Size of each token embedding
    #[config(default = 16)]
    pub embedding_dim: usize,

    /// Dropout rate
    #[config(default = 0.2)]
    pub dropout: f64,

    /// Adam learning rate
    #[config(default = 1e-3)]
    pub learning_rate: LearningRate,

    /// Adam epsilon
    #[config(default = 1e-7)]
    pub adam_epsilon: f32,

    /// The location of the top-level data directory
    #[config(default = "\"data\".to_string()")]
    pub data_dir: String,

    /// Model name, used for the artifact directory
    #[config(default = "\"pooled-embedding\".to_string()")]
    pub model_name: String,
}

impl Config {
    /// The directory that receives the saved config and the plots
    pub fn artifact_dir(&self) -> String {
        format!("{}/{}/{}", self.data_dir, TEXT_CLASSIFICATION, self.model_name)
    }

    /// The configuration for the model this experiment trains
    pub fn model_config(&self) -> pooled_embedding::Config {
        // One extra embedding row beyond the vocabulary cap
        pooled_embedding::Config::new(self.max_tokens + 1)
            .with_embedding_dim(self.embedding_dim)
            .with_dropout(self.dropout)
    }

    /// A vectorizer with this experiment's vocabulary cap and sequence length
    pub fn vectorizer(&self) -> TextVectorizer {
        TextVectorizer::new(self.max_tokens, self.sequence_length)
    }
}

/// A trained model along with its per-epoch metrics
pub struct Trained<B: AutodiffBackend> {
    /// The model with its final weights
    pub model: Model<B>,

    /// Training and validation metrics for every epoch
    pub history: History,
}

/// Define train function
pub fn train<B, I, D>(
    device: B::Device,               // Device on which to perform computation (e.g., CPU or CUDA device)
    dataset_train: D,                // Training dataset
    dataset_valid: D,                // Validation dataset
    class_names: &[String],          // Class names, indexed by label id
    vectorizer: Arc<TextVectorizer>, // Vectorizer adapted to the training text
    config: &Config,                 // Experiment configuration
) -> anyhow::Result<Trained<B>>
where
    B: AutodiffBackend,
    I: Item + 'static,
    D: Dataset<I> + 'static,
{
    if class_names.len() != 2 {
        bail!(
            "Binary classification needs exactly 2 classes, found {}: {:?}",
            class_names.len(),
            class_names
        );
    }

    if config.batch_size == 0 {
        bail!("The batch size must be at least 1");
    }

    if dataset_train.is_empty() {
        bail!("The training dataset is empty");
    }

    B::seed(config.seed);

    let mut model: Model<B> = config.model_config().init(&device);

    // Initialize batchers for training and validation data
    let batcher_train = Batcher::<B>::new(vectorizer.clone(), class_names, device.clone());
    let batcher_valid = Batcher::<B::InnerBackend>::new(vectorizer, class_names, device.clone());

    batcher_train.check(&dataset_train)?;
    batcher_train.check(&dataset_valid)?;

    let workers = std::thread::available_parallelism()?;

    // Initialize data loaders for training and validation data
    let dataloader_train: Arc<dyn DataLoader<Train<B>>> =
        DataLoaderBuilder::new(batcher_train)
            .batch_size(config.batch_size)
            .shuffle(config.seed)
            .num_workers(workers.into())
            .build(dataset_train);

    let dataloader_valid: Arc<dyn DataLoader<Train<B::InnerBackend>>> =
        DataLoaderBuilder::new(batcher_valid)
            .batch_size(config.batch_size)
            .num_workers(workers.into())
            .build(dataset_valid);

    // Initialize optimizer
    let mut optimizer = AdamConfig::new().with_epsilon(config.adam_epsilon).init();

    let mut history = History::default();

    for epoch in 1..=config.num_epochs {
        let mut accumulator = Accumulator::default();

        for batch in dataloader_train.iter() {
            let TrainOutput { grads, item } = TrainStep::step(&model, batch);

            accumulator.update(item, LOGIT_THRESHOLD);

            model = optimizer.step(config.learning_rate, model, grads);
        }

        // Dropout is disabled on the inner backend
        let valid = evaluate(&model.valid(), dataloader_valid.clone());
        let metrics = EpochMetrics::new(epoch, accumulator.finish(), valid);

        info!(
            "Epoch {}/{} - loss: {:.4} - binary_accuracy: {:.4} - val_loss: {:.4} - val_binary_accuracy: {:.4}",
            epoch,
            config.num_epochs,
            metrics.loss,
            metrics.accuracy,
            metrics.val_loss,
            metrics.val_accuracy
        );

        history.push(metrics);
    }

    Ok(Trained { model, history })
}
