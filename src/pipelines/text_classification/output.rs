use burn::tensor::{backend::Backend, Tensor};
use derive_new::new;

use crate::utils::tensors;

/// Binary classification output for a single batch
#[derive(new)]
pub struct Output<B: Backend> {
    /// The mean loss over the batch.
    pub loss: Tensor<B, 1>,

    /// One score per sample, either a logit or a probability.
    pub output: Tensor<B, 1>,

    /// The 0/1 targets.
    pub targets: Tensor<B, 1>,
}

impl<B: Backend> Output<B> {
    /// The number of samples in the batch
    pub fn batch_size(&self) -> usize {
        let [batch_size] = self.output.dims();

        batch_size
    }

    /// Pull the loss, scores and targets back from the device
    pub fn into_values(self) -> (f64, Vec<f32>, Vec<f32>) {
        let loss = tensors::to_vec(self.loss).first().copied().unwrap_or(f32::NAN);

        (
            loss as f64,
            tensors::to_vec(self.output),
            tensors::to_vec(self.targets),
        )
    }
}
