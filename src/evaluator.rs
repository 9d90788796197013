//! Per-image TP/FP/FN classification and overlay building.

use crate::config::EvaluatorConfig;
use crate::matching::match_objects;
use crate::types::{BoundingBox, DetectedObject, EvaluationResult, MatchKind, TruePositive};
use log::debug;
use serde::{Deserialize, Serialize};

/// Default minimum IoU for a true positive.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// Classify ground truth and detections of one image into TP, FN and FP.
///
/// Matching is greedy and ground-truth driven (see [`match_objects`]).
/// Objects whose box is invalid are dropped from every output list.
/// This never fails: empty input simply yields empty groups.
///
/// # Arguments
///
/// * `ground_truth` - Ground-truth objects for the image
/// * `detections` - Detected objects for the same image
/// * `iou_threshold` - Minimum IoU to accept a match (usually 0.5)
///
/// # Example
///
/// ```
/// use det_review::evaluator::evaluate;
/// use det_review::types::{BoundingBox, DetectedObject};
///
/// let gt = vec![DetectedObject::new("car", BoundingBox::new(0.0, 0.0, 10.0, 10.0))];
/// let det = vec![DetectedObject::new("car", BoundingBox::new(0.0, 0.0, 10.0, 10.0))];
///
/// let result = evaluate(&gt, &det, 0.5);
/// assert_eq!(result.true_positives.len(), 1);
/// assert!(result.false_negatives.is_empty());
/// assert!(result.false_positives.is_empty());
/// ```
pub fn evaluate(
    ground_truth: &[DetectedObject],
    detections: &[DetectedObject],
    iou_threshold: f64,
) -> EvaluationResult {
    let outcome = match_objects(ground_truth, detections, iou_threshold);
    let mut result = EvaluationResult::new();

    for gt_match in &outcome.ground_truth {
        let gt = ground_truth[gt_match.ground_truth_index].clone();
        match gt_match.detection_index {
            Some(det_idx) => result.true_positives.push(TruePositive {
                ground_truth: gt,
                detection: detections[det_idx].clone(),
                iou: gt_match.iou,
            }),
            None => result.false_negatives.push(gt),
        }
    }

    result.false_positives = outcome
        .unmatched_detections
        .iter()
        .map(|&idx| detections[idx].clone())
        .collect();

    debug!(
        "evaluated {} ground truth / {} detections at IoU {}: {} TP, {} FN, {} FP",
        ground_truth.len(),
        detections.len(),
        iou_threshold,
        result.true_positives.len(),
        result.false_negatives.len(),
        result.false_positives.len()
    );

    result
}

/// Same as [`evaluate`], taking the threshold from a config.
pub fn evaluate_with_config(
    ground_truth: &[DetectedObject],
    detections: &[DetectedObject],
    config: &EvaluatorConfig,
) -> EvaluationResult {
    evaluate(ground_truth, detections, config.iou_threshold)
}

/// RGBA overlay color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

pub const TP_COLOR: Rgba = Rgba(0, 255, 0, 150);
pub const FP_COLOR: Rgba = Rgba(0, 0, 255, 150);
pub const FN_COLOR: Rgba = Rgba(255, 0, 0, 150);

impl MatchKind {
    pub fn color(self) -> Rgba {
        match self {
            MatchKind::TruePositive => TP_COLOR,
            MatchKind::FalsePositive => FP_COLOR,
            MatchKind::FalseNegative => FN_COLOR,
        }
    }
}

/// One labelled rectangle to draw over an image, in image coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayItem {
    pub rect: BoundingBox,
    pub kind: MatchKind,
    pub color: Rgba,
    pub label: String,
}

impl OverlayItem {
    fn new(kind: MatchKind, object: &DetectedObject, label: String) -> Self {
        Self {
            rect: object.bbox,
            kind,
            color: kind.color(),
            label,
        }
    }
}

/// Overlays for the two side-by-side viewers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlays {
    /// Drawn over the ground-truth image: TP (optional) then FN.
    pub ground_truth: Vec<OverlayItem>,
    /// Drawn over the detection image: TP (optional) then FP.
    pub detections: Vec<OverlayItem>,
}

/// Label for a true-positive pair, e.g. `"TP: car (IoU: 0.73)"`.
pub fn true_positive_label(class_name: &str, iou: f64) -> String {
    format!("TP: {class_name} (IoU: {iou:.2})")
}

/// Label for an unmatched object, e.g. `"FN: car"`.
pub fn unmatched_label(kind: MatchKind, class_name: &str) -> String {
    format!("{}: {class_name}", kind.tag())
}

/// Turn an evaluation result into colored, labelled rectangles.
///
/// True positives appear on both sides only when `show_true_positives` is set.
pub fn build_overlays(result: &EvaluationResult, show_true_positives: bool) -> Overlays {
    let mut overlays = Overlays::default();

    if show_true_positives {
        for tp in &result.true_positives {
            overlays.ground_truth.push(OverlayItem::new(
                MatchKind::TruePositive,
                &tp.ground_truth,
                true_positive_label(&tp.ground_truth.class_name, tp.iou),
            ));
            overlays.detections.push(OverlayItem::new(
                MatchKind::TruePositive,
                &tp.detection,
                true_positive_label(&tp.detection.class_name, tp.iou),
            ));
        }
    }

    for gt in &result.false_negatives {
        overlays.ground_truth.push(OverlayItem::new(
            MatchKind::FalseNegative,
            gt,
            unmatched_label(MatchKind::FalseNegative, &gt.class_name),
        ));
    }

    for det in &result.false_positives {
        overlays.detections.push(OverlayItem::new(
            MatchKind::FalsePositive,
            det,
            unmatched_label(MatchKind::FalsePositive, &det.class_name),
        ));
    }

    overlays
}

/// Rendering collaborator that receives the classified groups.
pub trait OverlaySink {
    fn apply_overlays(
        &mut self,
        true_positives: &[TruePositive],
        false_negatives: &[DetectedObject],
        false_positives: &[DetectedObject],
    );
}

impl EvaluationResult {
    /// Hand the three groups to a rendering collaborator.
    pub fn dispatch<S: OverlaySink + ?Sized>(&self, sink: &mut S) {
        sink.apply_overlays(
            &self.true_positives,
            &self.false_negatives,
            &self.false_positives,
        );
    }
}

/// Sink that simply collects overlays, honoring the TP toggle.
#[derive(Debug, Clone, Default)]
pub struct OverlayCollector {
    pub show_true_positives: bool,
    pub overlays: Overlays,
}

impl OverlayCollector {
    pub fn new(show_true_positives: bool) -> Self {
        Self {
            show_true_positives,
            overlays: Overlays::default(),
        }
    }
}

impl OverlaySink for OverlayCollector {
    fn apply_overlays(
        &mut self,
        true_positives: &[TruePositive],
        false_negatives: &[DetectedObject],
        false_positives: &[DetectedObject],
    ) {
        let result = EvaluationResult {
            true_positives: true_positives.to_vec(),
            false_negatives: false_negatives.to_vec(),
            false_positives: false_positives.to_vec(),
        };
        self.overlays = build_overlays(&result, self.show_true_positives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(name: &str, left: f64, top: f64, width: f64, height: f64) -> DetectedObject {
        DetectedObject::new(name, BoundingBox::new(left, top, width, height))
    }

    #[test]
    fn test_single_true_positive() {
        let gt = vec![obj("car", 0.0, 0.0, 10.0, 10.0)];
        let det = vec![obj("car", 0.0, 0.0, 10.0, 10.0)];

        let result = evaluate(&gt, &det, DEFAULT_IOU_THRESHOLD);
        assert_eq!(result.true_positives.len(), 1);
        assert!((result.true_positives[0].iou - 1.0).abs() < 1e-10);
        assert!(result.false_negatives.is_empty());
        assert!(result.false_positives.is_empty());
    }

    #[test]
    fn test_disjoint_boxes() {
        let gt = vec![obj("car", 0.0, 0.0, 10.0, 10.0)];
        let det = vec![obj("car", 100.0, 100.0, 10.0, 10.0)];

        let result = evaluate(&gt, &det, DEFAULT_IOU_THRESHOLD);
        assert!(result.true_positives.is_empty());
        assert_eq!(result.false_negatives, gt);
        assert_eq!(result.false_positives, det);
    }

    #[test]
    fn test_below_threshold_is_false_negative() {
        let gt = vec![obj("car", 0.0, 0.0, 10.0, 10.0)];
        let det = vec![obj("car", 5.0, 5.0, 10.0, 10.0)];

        let result = evaluate(&gt, &det, 0.5);
        assert_eq!(result.false_negatives.len(), 1);
        assert_eq!(result.false_positives.len(), 1);

        // Same pair passes with a permissive threshold
        let result = evaluate(&gt, &det, 0.1);
        assert_eq!(result.true_positives.len(), 1);
    }

    #[test]
    fn test_with_config() {
        let gt = vec![obj("car", 0.0, 0.0, 10.0, 10.0)];
        let det = vec![obj("car", 0.0, 0.0, 10.0, 10.0)];
        let config = EvaluatorConfig::default();

        let result = evaluate_with_config(&gt, &det, &config);
        assert_eq!(result.summary().true_positives, 1);
    }

    #[test]
    fn test_labels() {
        assert_eq!(true_positive_label("person", 0.7349), "TP: person (IoU: 0.73)");
        assert_eq!(unmatched_label(MatchKind::FalseNegative, "car"), "FN: car");
        assert_eq!(unmatched_label(MatchKind::FalsePositive, "car"), "FP: car");
    }

    #[test]
    fn test_build_overlays_toggle() {
        let gt = vec![obj("car", 0.0, 0.0, 10.0, 10.0), obj("dog", 50.0, 50.0, 10.0, 10.0)];
        let det = vec![obj("car", 0.0, 0.0, 10.0, 10.0), obj("cat", 80.0, 80.0, 5.0, 5.0)];
        let result = evaluate(&gt, &det, 0.5);

        let shown = build_overlays(&result, true);
        assert_eq!(shown.ground_truth.len(), 2);
        assert_eq!(shown.detections.len(), 2);
        assert_eq!(shown.ground_truth[0].label, "TP: car (IoU: 1.00)");
        assert_eq!(shown.ground_truth[0].color, TP_COLOR);
        assert_eq!(shown.ground_truth[1].label, "FN: dog");
        assert_eq!(shown.ground_truth[1].color, FN_COLOR);
        assert_eq!(shown.detections[1].label, "FP: cat");
        assert_eq!(shown.detections[1].color, FP_COLOR);

        let hidden = build_overlays(&result, false);
        assert_eq!(hidden.ground_truth.len(), 1);
        assert_eq!(hidden.detections.len(), 1);
        assert_eq!(hidden.ground_truth[0].kind, MatchKind::FalseNegative);
        assert_eq!(hidden.detections[0].kind, MatchKind::FalsePositive);
    }

    #[test]
    fn test_dispatch_to_sink() {
        let gt = vec![obj("car", 0.0, 0.0, 10.0, 10.0)];
        let det = vec![obj("car", 100.0, 100.0, 10.0, 10.0)];
        let result = evaluate(&gt, &det, 0.5);

        let mut collector = OverlayCollector::new(true);
        result.dispatch(&mut collector);
        assert_eq!(collector.overlays, build_overlays(&result, true));
    }
}
