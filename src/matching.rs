//! Greedy one-to-one matching of detections against ground truth.

use crate::metrics::iou::calculate_iou;
use crate::types::DetectedObject;

/// Outcome for one ground-truth object.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruthMatch {
    /// Index into the ground-truth slice.
    pub ground_truth_index: usize,
    /// Index of the claimed detection, `None` for a false negative.
    pub detection_index: Option<usize>,
    /// Best IoU seen among same-class candidates (0.0 when there were none).
    pub iou: f64,
}

impl GroundTruthMatch {
    pub fn is_true_positive(&self) -> bool {
        self.detection_index.is_some()
    }
}

/// Full matching outcome over one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    /// One entry per ground-truth object, in input order.
    pub ground_truth: Vec<GroundTruthMatch>,
    /// Detections never claimed, in input order.
    pub unmatched_detections: Vec<usize>,
}

/// Match detections to ground-truth objects for a single image.
///
/// Ground truth drives the matching: each ground-truth object, in input
/// order, takes the unclaimed same-class detection with the highest IoU
/// (first one wins on ties). The pair is kept when that IoU reaches
/// `iou_threshold`; a claimed detection is never offered again. Class names
/// compare case-sensitively.
///
/// Objects with an invalid box are skipped on both sides and appear in
/// neither `ground_truth` nor `unmatched_detections`.
///
/// # Arguments
///
/// * `ground_truths` - Ground-truth objects for this image
/// * `detections` - Detected objects for this image
/// * `iou_threshold` - Minimum IoU to consider a match
pub fn match_objects(
    ground_truths: &[DetectedObject],
    detections: &[DetectedObject],
    iou_threshold: f64,
) -> MatchOutcome {
    let mut claimed = vec![false; detections.len()];
    for (idx, det) in detections.iter().enumerate() {
        // Invalid detections are treated as absent, never as free candidates
        if !det.bbox.is_valid() {
            claimed[idx] = true;
        }
    }

    let mut outcome = MatchOutcome::default();

    for (gt_idx, gt) in ground_truths.iter().enumerate() {
        if !gt.bbox.is_valid() {
            continue;
        }

        let mut best_iou = 0.0;
        let mut best_det_idx: Option<usize> = None;

        for (det_idx, det) in detections.iter().enumerate() {
            if claimed[det_idx] || det.class_name != gt.class_name {
                continue;
            }

            let iou = calculate_iou(&gt.bbox, &det.bbox);
            if iou > best_iou {
                best_iou = iou;
                best_det_idx = Some(det_idx);
            }
        }

        let detection_index = match best_det_idx {
            Some(det_idx) if best_iou >= iou_threshold && !claimed[det_idx] => {
                claimed[det_idx] = true;
                Some(det_idx)
            }
            _ => None,
        };

        outcome.ground_truth.push(GroundTruthMatch {
            ground_truth_index: gt_idx,
            detection_index,
            iou: best_iou,
        });
    }

    outcome.unmatched_detections = detections
        .iter()
        .enumerate()
        .filter(|(idx, det)| det.bbox.is_valid() && !claimed[*idx])
        .map(|(idx, _)| idx)
        .collect();

    outcome
}
