//! Evaluation metrics for classification.

use ndarray::ArrayView1;

/// Fraction of predictions equal to the true label.
///
/// Returns `NaN` for empty input.
///
/// # Panics
/// Panics if the two arrays differ in length.
pub fn accuracy(predicted: ArrayView1<usize>, truth: ArrayView1<usize>) -> f64 {
    assert_eq!(
        predicted.len(),
        truth.len(),
        "predicted and true labels must have the same length"
    );
    if truth.is_empty() {
        return f64::NAN;
    }
    let correct = predicted
        .iter()
        .zip(truth.iter())
        .filter(|(p, t)| p == t)
        .count();
    correct as f64 / truth.len() as f64
}

/// Weighted fraction of correct predictions.
///
/// Returns `NaN` when the total weight is zero.
pub fn weighted_accuracy(
    predicted: ArrayView1<usize>,
    truth: ArrayView1<usize>,
    weights: ArrayView1<f64>,
) -> f64 {
    assert_eq!(predicted.len(), truth.len());
    assert_eq!(weights.len(), truth.len());
    let mut correct = 0.0;
    let mut total = 0.0;
    for ((p, t), &w) in predicted.iter().zip(truth.iter()).zip(weights.iter()) {
        total += w;
        if p == t {
            correct += w;
        }
    }
    if total > 0.0 {
        correct / total
    } else {
        f64::NAN
    }
}
