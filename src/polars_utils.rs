/// Polars DataFrame views of evaluation results and label statistics
///
/// Enabled with the `polars` feature. One row per classified object, which
/// makes it easy to aggregate many images with ordinary DataFrame tooling.

use crate::error::Result;
use crate::stats::LabelStatistics;
use crate::types::{DetectedObject, EvaluationResult, MatchKind};
use polars::prelude::*;

#[derive(Default)]
struct Rows {
    kind: Vec<String>,
    class_name: Vec<String>,
    iou: Vec<Option<f64>>,
    left: Vec<f64>,
    top: Vec<f64>,
    width: Vec<f64>,
    height: Vec<f64>,
}

impl Rows {
    fn push(&mut self, kind: MatchKind, object: &DetectedObject, iou: Option<f64>) {
        self.kind.push(kind.tag().to_string());
        self.class_name.push(object.class_name.clone());
        self.iou.push(iou);
        self.left.push(object.bbox.left);
        self.top.push(object.bbox.top);
        self.width.push(object.bbox.width);
        self.height.push(object.bbox.height);
    }
}

/// Flatten an evaluation result into a DataFrame
///
/// Columns: kind (TP/FN/FP), class_name, iou (null for FN and FP), left, top,
/// width, height. True positives are reported with their ground-truth box.
pub fn evaluation_to_dataframe(result: &EvaluationResult) -> Result<DataFrame> {
    let mut rows = Rows::default();

    for tp in &result.true_positives {
        rows.push(MatchKind::TruePositive, &tp.ground_truth, Some(tp.iou));
    }
    for gt in &result.false_negatives {
        rows.push(MatchKind::FalseNegative, gt, None);
    }
    for det in &result.false_positives {
        rows.push(MatchKind::FalsePositive, det, None);
    }

    let df = df! {
        "kind" => rows.kind,
        "class_name" => rows.class_name,
        "iou" => rows.iou,
        "left" => rows.left,
        "top" => rows.top,
        "width" => rows.width,
        "height" => rows.height,
    }?;
    Ok(df)
}

/// Per-label box counts as a two-column DataFrame (label, boxes)
pub fn label_counts_to_dataframe(stats: &LabelStatistics) -> Result<DataFrame> {
    let labels: Vec<String> = stats.box_counts.keys().cloned().collect();
    let counts: Vec<i64> = stats.box_counts.values().map(|&c| c as i64).collect();

    let df = df! {
        "label" => labels,
        "boxes" => counts,
    }?;
    Ok(df)
}

/// Objects-per-file distribution as a two-column DataFrame (bucket, files)
pub fn distribution_to_dataframe(stats: &LabelStatistics) -> Result<DataFrame> {
    let rows = stats.distribution_rows();
    let buckets: Vec<String> = rows.iter().map(|(b, _)| b.to_string()).collect();
    let files: Vec<i64> = rows.iter().map(|&(_, n)| n as i64).collect();

    let df = df! {
        "bucket" => buckets,
        "files" => files,
    }?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate;
    use crate::types::BoundingBox;

    #[test]
    fn test_evaluation_to_dataframe() {
        let gt = vec![
            DetectedObject::new("car", BoundingBox::new(0.0, 0.0, 10.0, 10.0)),
            DetectedObject::new("dog", BoundingBox::new(50.0, 50.0, 10.0, 10.0)),
        ];
        let det = vec![DetectedObject::new("car", BoundingBox::new(0.0, 0.0, 10.0, 10.0))];
        let result = evaluate(&gt, &det, 0.5);

        let df = evaluation_to_dataframe(&result).unwrap();
        assert_eq!(df.height(), 2);
        let kinds = df.column("kind").unwrap().str().unwrap();
        assert_eq!(kinds.get(0), Some("TP"));
        assert_eq!(kinds.get(1), Some("FN"));
        let ious = df.column("iou").unwrap().f64().unwrap();
        assert_eq!(ious.get(1), None);
    }

    #[test]
    fn test_label_counts_to_dataframe() {
        let mut stats = LabelStatistics::new();
        stats.add_file(&[
            DetectedObject::new("car", BoundingBox::new(0.0, 0.0, 1.0, 1.0)),
            DetectedObject::new("bus", BoundingBox::new(0.0, 0.0, 1.0, 1.0)),
        ]);

        let df = label_counts_to_dataframe(&stats).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("label").unwrap().str().unwrap().get(0), Some("bus"));

        let dist = distribution_to_dataframe(&stats).unwrap();
        assert_eq!(dist.height(), 6);
    }
}
