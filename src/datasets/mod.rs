use std::{fmt::Display, path::Path};

use async_trait::async_trait;
use derive_new::new;

/// Labeled text directories
pub mod directory;

/// The IMDB movie review dataset
pub mod imdb;

/// A partition of a labeled corpus
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Split {
    /// The training subset of the train directory
    Train,

    /// The held-out validation subset of the train directory
    Validation,

    /// The whole test directory
    Test,
}

impl Split {
    /// The directory the split is read from
    pub fn directory(&self) -> &'static str {
        match self {
            Split::Train | Split::Validation => "train",
            Split::Test => "test",
        }
    }
}

impl Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Split::Train => "training",
            Split::Validation => "validation",
            Split::Test => "test",
        };

        write!(f, "{}", name)
    }
}

/// How a labeled directory is divided into training and validation subsets
#[derive(Debug, Clone, Copy, PartialEq, new)]
pub struct SplitOptions {
    /// Seed for the shuffle that precedes the split
    pub seed: u64,

    /// Fraction of the directory held out for validation
    pub validation_split: f64,
}

/// A dataset which can be loaded
#[async_trait]
pub trait LoadableDataset<I>: burn::data::dataset::Dataset<I> {
    /// Load one split of the dataset stored under the given root
    async fn load(root: &Path, split: Split, options: SplitOptions) -> Result<Self, DatasetError>
    where
        Self: std::marker::Sized;
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The expected directory does not exist
    #[error("dataset directory not found: {0}")]
    MissingDirectory(String),

    /// The directory has no class subdirectories
    #[error("no class directories found in {0}")]
    NoClasses(String),

    /// The validation fraction is outside (0, 1)
    #[error("validation split must be between 0 and 1, got {0}")]
    InvalidValidationSplit(f64),

    /// An item's class label is not one of the known classes
    #[error("unknown class label {label:?}, expected one of {classes:?}")]
    UnknownLabel {
        /// The label that was found
        label: String,

        /// The known class names
        classes: Vec<String>,
    },

    /// A file or directory could not be read
    #[error("unable to read {path}: {source}")]
    Read {
        /// The path that failed
        path: String,

        /// The underlying error
        source: std::io::Error,
    },
}
