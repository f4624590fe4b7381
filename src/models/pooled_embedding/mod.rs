/// Model Configuration
pub mod config;

/// Embedding, pooling and output layers
pub mod model;

/// Training and validation steps
pub mod train;

pub use config::Config;
pub use model::Model;
