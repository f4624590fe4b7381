use super::evaluation::Evaluation;

/// Metrics recorded at the end of one epoch
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpochMetrics {
    /// The 1-based epoch number
    pub epoch: usize,

    /// Mean training loss over the epoch
    pub loss: f64,

    /// Training accuracy over the epoch
    pub accuracy: f64,

    /// Validation loss after the epoch
    pub val_loss: f64,

    /// Validation accuracy after the epoch
    pub val_accuracy: f64,
}

impl EpochMetrics {
    /// Combine the training and validation results for an epoch
    pub fn new(epoch: usize, train: Evaluation, valid: Evaluation) -> Self {
        Self {
            epoch,
            loss: train.loss,
            accuracy: train.accuracy,
            val_loss: valid.loss,
            val_accuracy: valid.accuracy,
        }
    }
}

/// Append-only record of per-epoch training metrics
#[derive(Clone, Debug, Default)]
pub struct History {
    epochs: Vec<EpochMetrics>,
}

impl History {
    /// Record the metrics for the next epoch
    pub fn push(&mut self, metrics: EpochMetrics) {
        self.epochs.push(metrics);
    }

    /// All recorded epochs, in order
    pub fn epochs(&self) -> &[EpochMetrics] {
        &self.epochs
    }

    /// The most recent epoch
    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }

    /// The number of recorded epochs
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    /// Whether no epoch has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    /// Training loss per epoch
    pub fn loss(&self) -> Vec<f64> {
        self.series(|m| m.loss)
    }

    /// Training accuracy per epoch
    pub fn accuracy(&self) -> Vec<f64> {
        self.series(|m| m.accuracy)
    }

    /// Validation loss per epoch
    pub fn val_loss(&self) -> Vec<f64> {
        self.series(|m| m.val_loss)
    }

    /// Validation accuracy per epoch
    pub fn val_accuracy(&self) -> Vec<f64> {
        self.series(|m| m.val_accuracy)
    }

    fn series(&self, value: impl Fn(&EpochMetrics) -> f64) -> Vec<f64> {
        self.epochs.iter().map(value).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn evaluation(loss: f64, accuracy: f64) -> Evaluation {
        Evaluation { loss, accuracy }
    }

    #[test]
    fn collects_series_in_epoch_order() {
        let mut history = History::default();

        history.push(EpochMetrics::new(1, evaluation(0.69, 0.5), evaluation(0.68, 0.6)));
        history.push(EpochMetrics::new(2, evaluation(0.5, 0.8), evaluation(0.55, 0.75)));

        assert_eq!(history.len(), 2);
        assert_eq!(history.loss(), vec![0.69, 0.5]);
        assert_eq!(history.accuracy(), vec![0.5, 0.8]);
        assert_eq!(history.val_loss(), vec![0.68, 0.55]);
        assert_eq!(history.val_accuracy(), vec![0.6, 0.75]);
        assert_eq!(history.last().map(|m| m.epoch), Some(2));
    }
}
