//! Configuration for the pooled embedding classifier

use burn::{
    nn::{DropoutConfig, EmbeddingConfig, Initializer, LinearConfig},
    tensor::backend::Backend,
};

use super::Model;

/// The Model Configuration
#[derive(burn::config::Config)]
pub struct Config {
    /// Number of rows in the embedding table (the vocabulary cap plus one)
    pub vocab_size: usize,

    /// Size of each token embedding
    #[config(default = 16)]
    pub embedding_dim: usize,

    /// Dropout rate applied before and after pooling
    #[config(default = 0.2)]
    pub dropout: f64,
}

impl Config {
    /// Initializes a model with random weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> Model<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim)
            .with_initializer(Initializer::Uniform {
                min: -0.05,
                max: 0.05,
            })
            .init(device);

        let output = LinearConfig::new(self.embedding_dim, 1)
            .with_initializer(Initializer::XavierUniform { gain: 1.0 })
            .init(device);

        Model {
            embedding,
            embedding_dropout: DropoutConfig::new(self.dropout).init(),
            pooled_dropout: DropoutConfig::new(self.dropout).init(),
            output,
        }
    }
}
