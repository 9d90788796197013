/// Scalar scores derived from TP/FP/FN counts
///
/// Only single-point scores are provided; there is no confidence sweep.

/// Calculate precision from confusion counts
///
/// Precision = TP / (TP + FP)
///
/// # Examples
///
/// ```
/// # use det_review::metrics::counts::calculate_precision;
/// let precision = calculate_precision(80, 20);
/// assert_eq!(precision, 0.8);
/// ```
#[must_use]
pub fn calculate_precision(tp: usize, fp: usize) -> f64 {
    let denominator = tp + fp;
    if denominator == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let precision = (tp as f64) / (denominator as f64);

    debug_assert!(
        (0.0..=1.0).contains(&precision),
        "Precision must be between 0 and 1, got {precision}"
    );

    precision
}

/// Calculate recall from confusion counts
///
/// Recall = TP / (TP + FN)
///
/// # Examples
///
/// ```
/// # use det_review::metrics::counts::calculate_recall;
/// let recall = calculate_recall(3, 1);
/// assert_eq!(recall, 0.75);
/// ```
#[must_use]
pub fn calculate_recall(tp: usize, fn_: usize) -> f64 {
    let denominator = tp + fn_;
    if denominator == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let recall = (tp as f64) / (denominator as f64);

    debug_assert!(
        (0.0..=1.0).contains(&recall),
        "Recall must be between 0 and 1, got {recall}"
    );

    recall
}

/// Harmonic mean of precision and recall; 0.0 when both are 0.
#[must_use]
pub fn calculate_f1(precision: f64, recall: f64) -> f64 {
    let denominator = precision + recall;
    if denominator == 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / denominator
}
