use std::{collections::BTreeMap, fmt::Debug, sync::Arc};

use burn::{
    data::{dataloader, dataset::Dataset},
    tensor::{backend::Backend, Int, Tensor},
};
use derive_new::new;
use log::warn;

use crate::{
    datasets::DatasetError,
    utils::{classes, tensors},
};

use super::{
    vectorizer::{TextVectorizer, PAD_ID},
    Item,
};

/// An inference batch for text classification
#[derive(Debug, Clone, new)]
pub struct Infer<B: Backend> {
    /// Vectorized text as 2D tensor: [batch_size, sequence_length]
    pub tokens: Tensor<B, 2, Int>,
}

/// A training batch for text classification
#[derive(Clone, Debug, new)]
pub struct Train<B: Backend> {
    /// Model input
    pub input: Infer<B>,

    /// Binary targets for the batch, 0.0 or 1.0
    pub targets: Tensor<B, 1>,
}

/// Struct for batching text classification items
#[derive(Clone)]
pub struct Batcher<B: Backend> {
    /// The adapted vectorizer shared with the inference wrapper
    pub vectorizer: Arc<TextVectorizer>,

    /// A mapping from class name labels to class ids
    pub label2id: BTreeMap<String, usize>,

    /// Device on which to perform computation (e.g., CPU or CUDA device)
    pub device: B::Device,
}

impl<B: Backend> Batcher<B> {
    /// Creates a new batcher
    pub fn new(vectorizer: Arc<TextVectorizer>, class_names: &[String], device: B::Device) -> Self {
        Self {
            vectorizer,
            label2id: classes::label2id(class_names),
            device,
        }
    }

    /// Make sure every item in the dataset has one of the batcher's class labels
    pub fn check<I: Item, D: Dataset<I>>(&self, dataset: &D) -> Result<(), DatasetError> {
        match dataset
            .iter()
            .find(|item| !self.label2id.contains_key(item.class_label()))
        {
            Some(item) => Err(DatasetError::UnknownLabel {
                label: item.class_label().to_string(),
                classes: self.label2id.keys().cloned().collect(),
            }),
            None => Ok(()),
        }
    }
}

/// Implement Batcher trait for Batcher struct for inference
impl<B: Backend> dataloader::batcher::Batcher<String, Infer<B>> for Batcher<B> {
    /// Vectorizes a list of raw texts into an inference batch
    fn batch(&self, items: Vec<String>) -> Infer<B> {
        let token_ids_list = items
            .iter()
            .map(|input| self.vectorizer.vectorize(input))
            .collect();

        Infer {
            tokens: tensors::pad_to(
                PAD_ID,
                token_ids_list,
                self.vectorizer.sequence_length(),
                &self.device,
            ),
        }
    }
}

/// Implement Batcher trait for Batcher struct for training
impl<B: Backend, I: Item> dataloader::batcher::Batcher<I, Train<B>> for Batcher<B> {
    /// Collects a vector of text classification items into a training batch
    fn batch(&self, items: Vec<I>) -> Train<B> {
        // Items outside the class list cannot be given a target
        let (items, unknown): (Vec<I>, Vec<I>) = items
            .into_iter()
            .partition(|item| self.label2id.contains_key(item.class_label()));

        if !unknown.is_empty() {
            warn!(
                "Skipping {} items with unknown class labels, e.g. {:?}",
                unknown.len(),
                unknown[0].class_label()
            );
        }

        let inputs: Vec<String> = items.iter().map(|item| item.input().to_string()).collect();
        let input =
            <Self as dataloader::batcher::Batcher<String, Infer<B>>>::batch(self, inputs);

        let targets = items
            .iter()
            .filter_map(|item| self.label2id.get(item.class_label()))
            .map(|class_id| *class_id as f32)
            .collect();

        Train {
            input,
            targets: tensors::floats(targets, &self.device),
        }
    }
}
