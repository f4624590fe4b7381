use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use async_trait::async_trait;
use burn::data::dataset::{self, InMemDataset};
use derive_new::new;
use log::{info, warn};

use crate::{
    pipelines::text_classification,
    utils::{download, files},
};

use super::{directory, DatasetError, LoadableDataset, Split, SplitOptions};

/// The name of the IMDB dataset
pub static DATASET: &str = "imdb";

/// The directory the archive extracts to
pub static DATASET_DIR: &str = "aclImdb";

/// Where the archive is downloaded from
pub static URL: &str = "https://ai.stanford.edu/~amaas/data/sentiment/aclImdb_v1.tar.gz";

/// The local file name of the downloaded archive
pub static ARCHIVE: &str = "aclImdb_v1.tar.gz";

/// Unlabeled reviews, which are not used for supervised training
pub static UNSUPERVISED_DIR: &str = "unsup";

/// Define a struct for IMDB review items
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct Item {
    /// The review text
    pub input: String,

    /// The sentiment class name of the review
    pub label: String,
}

impl text_classification::Item for Item {
    fn input(&self) -> &str {
        &self.input
    }

    fn class_label(&self) -> &str {
        &self.label
    }
}

/// Struct for the IMDB dataset
#[derive(Clone)]
pub struct Dataset {
    /// Underlying In-Memory dataset, shared between clones
    dataset: Arc<InMemDataset<Item>>,

    /// Class names, sorted; a class's label id is its position here
    class_names: Vec<String>,
}

/// Implement the Dataset trait for the IMDB dataset
impl dataset::Dataset<Item> for Dataset {
    /// Returns a specific item from the dataset
    fn get(&self, index: usize) -> Option<Item> {
        self.dataset.get(index)
    }

    /// Returns the length of the dataset
    fn len(&self) -> usize {
        self.dataset.len()
    }
}

#[async_trait]
impl LoadableDataset<Item> for Dataset {
    /// Load one split from `<root>/train` or `<root>/test`
    async fn load(root: &Path, split: Split, options: SplitOptions) -> Result<Self, DatasetError> {
        let index = directory::index(&root.join(split.directory())).await?;
        let samples = directory::select(index.samples, split, options)?;

        let mut items = Vec::with_capacity(samples.len());

        for sample in samples {
            let input = files::read_file(&sample.path)
                .await
                .map_err(|source| DatasetError::Read {
                    path: sample.path.display().to_string(),
                    source,
                })?;

            items.push(Item::new(input, index.class_names[sample.label].clone()));
        }

        info!("Loaded {} {} reviews", items.len(), split);

        Ok(Self::from_items(items, index.class_names))
    }
}

// Implement methods for constructing the IMDB dataset
impl Dataset {
    /// Constructs the dataset from items already in memory
    pub fn from_items(items: Vec<Item>, class_names: Vec<String>) -> Self {
        Self {
            dataset: Arc::new(InMemDataset::new(items)),
            class_names,
        }
    }

    /// Class names, indexed by label id
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    /// The review texts, in dataset order
    pub fn texts(&self) -> impl Iterator<Item = String> + '_ {
        dataset::Dataset::iter(self).map(|item| item.input)
    }
}

/// Make sure the extracted corpus exists under `data_dir`, downloading it if needed.
///
/// Returns the corpus root. The unlabeled reviews are removed either way.
pub async fn acquire(data_dir: &Path) -> anyhow::Result<PathBuf> {
    let dataset_dir = data_dir.join(DATASET_DIR);

    if files::is_dir(&dataset_dir).await {
        info!("Dataset already present! Using {}", dataset_dir.display());
    } else {
        warn!("IMDB dataset not found, downloading from {}...", URL);

        tokio::fs::create_dir_all(data_dir)
            .await
            .with_context(|| format!("Unable to create {}", data_dir.display()))?;

        let archive = data_dir.join(ARCHIVE);

        let bytes = download::download_file(URL, &archive)
            .await
            .with_context(|| format!("Unable to download {}", URL))?;

        info!("Downloaded {} bytes, extracting {}...", bytes, archive.display());

        download::extract_tar_gz(&archive, data_dir)
            .await
            .with_context(|| format!("Unable to extract {}", archive.display()))?;
    }

    remove_unsupervised(&dataset_dir).await?;

    Ok(dataset_dir)
}

/// Delete `train/unsup` if it exists, returning whether anything was removed
pub async fn remove_unsupervised(dataset_dir: &Path) -> anyhow::Result<bool> {
    let unsup = dataset_dir
        .join(Split::Train.directory())
        .join(UNSUPERVISED_DIR);

    if !files::is_dir(&unsup).await {
        return Ok(false);
    }

    warn!("Deleting unsup class reviews...");

    tokio::fs::remove_dir_all(&unsup)
        .await
        .with_context(|| format!("Unable to delete {}", unsup.display()))?;

    info!("Done!");

    Ok(true)
}
