use std::sync::Arc;

use burn::{
    data::{dataloader::batcher::Batcher as BatcherTrait, dataset::Dataset},
    tensor::{backend::Backend, Tensor},
};

use crate::{datasets::DatasetError, models::pooled_embedding::Model, utils::tensors};

use super::{
    batcher::{Infer, Train},
    evaluation::{Accumulator, Evaluation, PROBABILITY_THRESHOLD},
    loss::binary_cross_entropy,
    Batcher, Item, Output, TextVectorizer,
};

/// A trained model chained after the vectorizer and followed by a sigmoid, so that it takes
/// raw strings and returns probabilities of the positive class
pub struct ExportModel<B: Backend> {
    batcher: Batcher<B>,
    model: Model<B>,
}

impl<B: Backend> ExportModel<B> {
    /// Wrap a trained model with the vectorizer it was trained with
    pub fn new(
        vectorizer: Arc<TextVectorizer>,
        class_names: &[String],
        model: Model<B>,
        device: B::Device,
    ) -> Self {
        Self {
            batcher: Batcher::new(vectorizer, class_names, device),
            model,
        }
    }

    /// Probabilities for a batch of raw texts: [batch_size]
    pub fn forward(&self, texts: Vec<String>) -> Tensor<B, 1> {
        let input = BatcherTrait::<String, Infer<B>>::batch(&self.batcher, texts);

        self.model.infer(input)
    }

    /// Probabilities for each raw text, without thresholding
    pub fn predict<S: AsRef<str>>(&self, texts: &[S]) -> Vec<f32> {
        if texts.is_empty() {
            return Vec::new();
        }

        let texts = texts.iter().map(|text| text.as_ref().to_string()).collect();

        tensors::to_vec(self.forward(texts))
    }

    /// Compute probability-based loss and accuracy over raw, unvectorized items
    pub fn evaluate<I, D>(
        &self,
        dataset: &D,
        batch_size: usize,
    ) -> Result<Evaluation, DatasetError>
    where
        I: Item,
        D: Dataset<I>,
    {
        self.batcher.check(dataset)?;

        let mut accumulator = Accumulator::default();
        let mut items = Vec::with_capacity(batch_size);

        for item in dataset.iter() {
            items.push(item);

            if items.len() == batch_size.max(1) {
                accumulator.update(self.step(std::mem::take(&mut items)), PROBABILITY_THRESHOLD);
            }
        }

        if !items.is_empty() {
            accumulator.update(self.step(items), PROBABILITY_THRESHOLD);
        }

        Ok(accumulator.finish())
    }

    fn step<I: Item>(&self, items: Vec<I>) -> Output<B> {
        let batch = BatcherTrait::<I, Train<B>>::batch(&self.batcher, items);

        let probabilities = self.model.infer(batch.input);
        let loss = binary_cross_entropy(probabilities.clone(), batch.targets.clone());

        Output::new(loss, probabilities, batch.targets)
    }
}

#[cfg(test)]
mod tests {
    use burn::backend::NdArray;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{datasets::imdb, models::pooled_embedding::Config};

    type TestBackend = NdArray;

    fn export() -> ExportModel<TestBackend> {
        let device = Default::default();

        let mut vectorizer = TextVectorizer::new(100, 8);
        vectorizer.adapt(["a great movie", "a bad movie"]);

        let classes = vec!["neg".to_string(), "pos".to_string()];
        let model = Config::new(101).init::<TestBackend>(&device);

        ExportModel::new(Arc::new(vectorizer), &classes, model, device)
    }

    fn dataset(items: &[(&str, &str)]) -> imdb::Dataset {
        let items = items
            .iter()
            .map(|(input, label)| imdb::Item::new(input.to_string(), label.to_string()))
            .collect();

        imdb::Dataset::from_items(items, vec!["neg".to_string(), "pos".to_string()])
    }

    #[test]
    fn evaluates_known_labels() -> anyhow::Result<()> {
        let dataset = dataset(&[("A great movie", "pos"), ("A bad movie", "neg"), ("Meh", "neg")]);

        let evaluation = export().evaluate(&dataset, 2)?;

        assert!(evaluation.loss.is_finite());
        assert!((0.0..=1.0).contains(&evaluation.accuracy));

        Ok(())
    }

    #[test]
    fn refuses_unknown_labels() {
        let dataset = dataset(&[("A great movie", "pos"), ("Meh", "neutral")]);

        let result = export().evaluate(&dataset, 32);

        assert!(matches!(
            result,
            Err(DatasetError::UnknownLabel { ref label, .. }) if label == "neutral"
        ));
    }

    #[test]
    fn predicts_probabilities() {
        let predictions = export().predict(&["A great movie", "unseen words"]);

        assert_eq!(predictions.len(), 2);
        assert!(predictions.iter().all(|p| (0.0..=1.0).contains(p)));
        assert_eq!(export().predict::<&str>(&[]), Vec::<f32>::new());
    }
}
