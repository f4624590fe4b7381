/// Text standardization applied before tokenizing
pub mod standardize;

/// Vocabulary and fixed-length vectorization
pub mod vectorizer;

/// Batcher
pub mod batcher;

/// Text Classification Items
pub mod item;

/// Binary cross-entropy losses
pub mod loss;

/// Batch outputs
pub mod output;

/// Partition evaluation
pub mod evaluation;

/// Per-epoch training metrics
pub mod history;

/// Training
pub mod training;

/// Raw-text inference wrapper
pub mod inference;

pub use batcher::Batcher;
pub use evaluation::{evaluate, Evaluation};
pub use history::{EpochMetrics, History};
pub use inference::ExportModel;
pub use item::Item;
pub use output::Output;
pub use standardize::standardize;
pub use training::{train, Config, Trained};
pub use vectorizer::TextVectorizer;
