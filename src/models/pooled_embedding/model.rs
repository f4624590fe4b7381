use burn::{
    module::Module,
    nn::{Dropout, Embedding, Linear},
    tensor::{activation::sigmoid, backend::Backend, Tensor},
};

use crate::pipelines::text_classification::{
    batcher::{Infer, Train},
    loss::binary_cross_entropy_with_logits,
    Output,
};

/// Token embeddings averaged over the sequence, followed by a single logit
#[derive(Module, Debug)]
pub struct Model<B: Backend> {
    /// Embedding table, one row per vocabulary id
    pub embedding: Embedding<B>,

    /// Dropout over the embedded sequence
    pub embedding_dropout: Dropout,

    /// Dropout over the pooled embedding
    pub pooled_dropout: Dropout,

    /// Linear layer producing the logit
    pub output: Linear<B>,
}

/// Define model behavior
impl<B: Backend> Model<B> {
    /// Compute one logit per sample: [batch_size]
    pub fn logits(&self, input: Infer<B>) -> Tensor<B, 1> {
        let [batch_size, _sequence_length] = input.tokens.dims();

        // [batch_size, sequence_length, embedding_dim]
        let embedded = self.embedding.forward(input.tokens);
        let embedded = self.embedding_dropout.forward(embedded);

        // [batch_size, 1, embedding_dim]
        let pooled = embedded.mean_dim(1);
        let pooled = self.pooled_dropout.forward(pooled);

        self.output.forward(pooled).reshape([batch_size])
    }

    /// Defines forward pass for training
    pub fn forward(&self, item: Train<B>) -> Output<B> {
        let logits = self.logits(item.input);
        let targets = item.targets.to_device(&logits.device());

        let loss = binary_cross_entropy_with_logits(logits.clone(), targets.clone());

        Output::new(loss, logits, targets)
    }

    /// Defines forward pass for inference, returning probabilities
    pub fn infer(&self, input: Infer<B>) -> Tensor<B, 1> {
        sigmoid(self.logits(input))
    }
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;

    use super::*;
    use crate::{models::pooled_embedding::Config, utils::tensors};

    type TestBackend = NdArray;

    #[test]
    fn produces_one_probability_per_sample() {
        let device = Default::default();
        let model = Config::new(20).init::<TestBackend>(&device);

        let tokens = tensors::pad_to::<TestBackend>(0, vec![vec![2, 3, 4], vec![5]], 6, &device);
        let probabilities = tensors::to_vec(model.infer(Infer::new(tokens)));

        assert_eq!(probabilities.len(), 2);
        assert!(probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
    }
}
