//! Core data types for detection review.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in image pixel space.
///
/// Coordinates follow the inclusive-pixel convention used by Pascal VOC:
/// - left: first column covered by the box
/// - top: first row covered by the box
/// - width: number of columns covered
/// - height: number of rows covered
///
/// so `right = left + width - 1` and `bottom = top + height - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a box from inclusive corner coordinates (VOC `xmin..=xmax`, `ymin..=ymax`).
    ///
    /// A box whose max is below its min comes out with non-positive extent,
    /// which `is_valid` rejects.
    ///
    /// ```
    /// use det_review::types::BoundingBox;
    ///
    /// let bbox = BoundingBox::from_corners(10.0, 20.0, 19.0, 29.0);
    /// assert_eq!(bbox.width, 10.0);
    /// assert_eq!(bbox.right(), 19.0);
    /// ```
    pub fn from_corners(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::new(xmin, ymin, xmax - xmin + 1.0, ymax - ymin + 1.0)
    }

    /// Get the area of the bounding box.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Get the last covered column (left + width - 1).
    pub fn right(&self) -> f64 {
        self.left + self.width - 1.0
    }

    /// Get the last covered row (top + height - 1).
    pub fn bottom(&self) -> f64 {
        self.top + self.height - 1.0
    }

    /// Check if the bounding box is valid (finite, positive dimensions).
    pub fn is_valid(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// One labelled object parsed from an annotation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub class_name: String,
    pub bbox: BoundingBox,
}

impl DetectedObject {
    pub fn new(class_name: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            class_name: class_name.into(),
            bbox,
        }
    }
}

/// Classification outcome for a single object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    TruePositive,
    FalsePositive,
    FalseNegative,
}

impl MatchKind {
    /// Short tag used in overlay labels.
    pub fn tag(self) -> &'static str {
        match self {
            MatchKind::TruePositive => "TP",
            MatchKind::FalsePositive => "FP",
            MatchKind::FalseNegative => "FN",
        }
    }
}

/// A ground-truth object paired with the detection that claimed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruePositive {
    pub ground_truth: DetectedObject,
    pub detection: DetectedObject,
    pub iou: f64,
}

/// TP/FN/FP partition for one image.
///
/// True positives and false negatives follow ground-truth input order,
/// false positives follow detection input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub true_positives: Vec<TruePositive>,
    pub false_negatives: Vec<DetectedObject>,
    pub false_positives: Vec<DetectedObject>,
}

impl EvaluationResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts plus the derived precision, recall and F1 score.
    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary::from_counts(
            self.true_positives.len(),
            self.false_positives.len(),
            self.false_negatives.len(),
        )
    }
}

/// Scalar summary of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl EvaluationSummary {
    pub fn from_counts(tp: usize, fp: usize, fn_: usize) -> Self {
        use crate::metrics::counts::{calculate_f1, calculate_precision, calculate_recall};

        let precision = calculate_precision(tp, fp);
        let recall = calculate_recall(tp, fn_);
        Self {
            true_positives: tp,
            false_positives: fp,
            false_negatives: fn_,
            precision,
            recall,
            f1: calculate_f1(precision, recall),
        }
    }
}
