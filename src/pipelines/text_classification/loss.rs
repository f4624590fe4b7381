use burn::tensor::{backend::Backend, Tensor};

/// Probabilities are clamped to `[EPSILON, 1 - EPSILON]` before taking logarithms
pub const EPSILON: f32 = 1e-7;

/// Mean binary cross-entropy between raw logits and 0/1 targets.
///
/// Uses `max(x, 0) - x * y + ln(1 + exp(-|x|))`, which never exponentiates a positive value.
pub fn binary_cross_entropy_with_logits<B: Backend>(
    logits: Tensor<B, 1>,
    targets: Tensor<B, 1>,
) -> Tensor<B, 1> {
    let positive_part = logits.clone().clamp_min(0.0);
    let log_term = logits.clone().abs().neg().exp().add_scalar(1.0).log();

    (positive_part - logits * targets + log_term).mean()
}

/// Mean binary cross-entropy between probabilities and 0/1 targets
pub fn binary_cross_entropy<B: Backend>(
    probabilities: Tensor<B, 1>,
    targets: Tensor<B, 1>,
) -> Tensor<B, 1> {
    let probabilities = probabilities.clamp(EPSILON, 1.0 - EPSILON);

    let positive = targets.clone() * probabilities.clone().log();
    let negative = targets.neg().add_scalar(1.0) * probabilities.neg().add_scalar(1.0).log();

    (positive + negative).neg().mean()
}

/// Count the predictions on the same side of `threshold` as their 0/1 targets
pub fn count_correct(scores: &[f32], targets: &[f32], threshold: f32) -> usize {
    scores
        .iter()
        .zip(targets)
        .filter(|(score, target)| (**score > threshold) == (**target > 0.5))
        .count()
}

#[cfg(test)]
mod tests {
    use burn::{backend::NdArray, tensor::activation::sigmoid};

    use super::*;
    use crate::utils::tensors::{floats, to_vec};

    type TestBackend = NdArray;

    fn scalar(tensor: Tensor<TestBackend, 1>) -> f32 {
        to_vec(tensor)[0]
    }

    #[test]
    fn logit_loss_at_zero_is_ln_2() {
        let device = Default::default();

        let loss = binary_cross_entropy_with_logits(
            floats::<TestBackend>(vec![0.0, 0.0], &device),
            floats(vec![0.0, 1.0], &device),
        );

        assert!((scalar(loss) - std::f32::consts::LN_2).abs() < 1e-6);
    }

    #[test]
    fn logit_loss_is_stable_for_large_logits() {
        let device = Default::default();

        let loss = scalar(binary_cross_entropy_with_logits(
            floats::<TestBackend>(vec![100.0, -100.0], &device),
            floats(vec![0.0, 1.0], &device),
        ));

        assert!(loss.is_finite());
        assert!((loss - 100.0).abs() < 1e-3);
    }

    #[test]
    fn probability_loss_matches_logit_loss() {
        let device = Default::default();
        let logits = vec![-3.0, -0.5, 0.0, 0.25, 2.0, 4.0];
        let targets = vec![0.0, 1.0, 1.0, 0.0, 1.0, 0.0];

        let from_logits = scalar(binary_cross_entropy_with_logits(
            floats::<TestBackend>(logits.clone(), &device),
            floats(targets.clone(), &device),
        ));
        let from_probabilities = scalar(binary_cross_entropy(
            sigmoid(floats::<TestBackend>(logits, &device)),
            floats(targets, &device),
        ));

        assert!((from_logits - from_probabilities).abs() < 1e-5);
    }

    #[test]
    fn probability_loss_is_clamped() {
        let device = Default::default();

        let loss = scalar(binary_cross_entropy(
            floats::<TestBackend>(vec![0.0], &device),
            floats(vec![1.0], &device),
        ));

        assert!((loss - -(EPSILON.ln())).abs() < 1e-3);
    }

    #[test]
    fn counts_correct_predictions_by_threshold() {
        let scores = [-1.0, 0.0, 0.3, 2.0];
        let targets = [0.0, 1.0, 1.0, 0.0];

        assert_eq!(count_correct(&scores, &targets, 0.0), 2);
        assert_eq!(count_correct(&scores, &targets, 0.5), 1);
    }
}
