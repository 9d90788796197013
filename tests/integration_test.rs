//! Integration tests for the complete review pipeline: VOC files in,
//! classified overlays out.

use det_review::config::load_config_from_str;
use det_review::evaluator::{build_overlays, evaluate, evaluate_with_config, FN_COLOR, FP_COLOR, TP_COLOR};
use det_review::loader::{load_from_file, parse_objects};
use det_review::stats::LabelStatistics;
use det_review::types::{BoundingBox, DetectedObject, MatchKind};
use std::path::PathBuf;

fn create_object(name: &str, left: f64, top: f64, width: f64, height: f64) -> DetectedObject {
    DetectedObject::new(name, BoundingBox::new(left, top, width, height))
}

fn voc_xml(objects: &[(&str, i32, i32, i32, i32)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<annotation>\n");
    xml.push_str("  <filename>img.jpg</filename>\n");
    xml.push_str("  <size><width>640</width><height>480</height><depth>3</depth></size>\n");
    for (name, xmin, ymin, xmax, ymax) in objects {
        xml.push_str(&format!(
            "  <object>\n    <name>{name}</name>\n    <bndbox><xmin>{xmin}</xmin><ymin>{ymin}</ymin><xmax>{xmax}</xmax><ymax>{ymax}</ymax></bndbox>\n  </object>\n"
        ));
    }
    xml.push_str("</annotation>\n");
    xml
}

fn write_voc(dir: &tempfile::TempDir, file: &str, objects: &[(&str, i32, i32, i32, i32)]) -> PathBuf {
    let path = dir.path().join(file);
    std::fs::write(&path, voc_xml(objects)).unwrap();
    path
}

#[test]
fn test_identical_boxes_single_true_positive() {
    let ground_truth = vec![create_object("car", 0.0, 0.0, 10.0, 10.0)];
    let detections = vec![create_object("car", 0.0, 0.0, 10.0, 10.0)];

    let result = evaluate(&ground_truth, &detections, 0.5);

    assert_eq!(result.true_positives.len(), 1);
    assert!((result.true_positives[0].iou - 1.0).abs() < 1e-10);
    assert!(result.false_negatives.is_empty());
    assert!(result.false_positives.is_empty());
}

#[test]
fn test_distant_boxes_give_false_negative_and_false_positive() {
    let ground_truth = vec![create_object("car", 0.0, 0.0, 10.0, 10.0)];
    let detections = vec![create_object("car", 100.0, 100.0, 10.0, 10.0)];

    let result = evaluate(&ground_truth, &detections, 0.5);

    assert!(result.true_positives.is_empty());
    assert_eq!(result.false_negatives.len(), 1);
    assert_eq!(result.false_positives.len(), 1);
}

#[test]
fn test_voc_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let gt_path = write_voc(
        &dir,
        "gt.xml",
        &[
            ("person", 10, 10, 59, 109),
            ("car", 200, 200, 299, 249),
            ("dog", 400, 300, 449, 349),
        ],
    );
    let det_path = write_voc(
        &dir,
        "det.xml",
        &[
            ("car", 205, 200, 299, 249),
            ("person", 12, 10, 59, 109),
            ("cat", 400, 300, 449, 349),
        ],
    );

    let gt = load_from_file(&gt_path).unwrap();
    assert_eq!(gt.filename.as_deref(), Some("img.jpg"));
    let det = parse_objects(&det_path);

    let result = evaluate(&gt.objects, &det, 0.5);

    // person and car are matched, in ground-truth order
    assert_eq!(result.true_positives.len(), 2);
    assert_eq!(result.true_positives[0].ground_truth.class_name, "person");
    assert_eq!(result.true_positives[1].ground_truth.class_name, "car");
    assert_eq!(result.true_positives[0].detection, det[1]);

    // dog and cat overlap perfectly but the classes differ
    assert_eq!(result.false_negatives.len(), 1);
    assert_eq!(result.false_negatives[0].class_name, "dog");
    assert_eq!(result.false_positives.len(), 1);
    assert_eq!(result.false_positives[0].class_name, "cat");

    let summary = result.summary();
    assert_eq!(summary.true_positives, 2);
    assert!((summary.precision - 2.0 / 3.0).abs() < 1e-10);
    assert!((summary.recall - 2.0 / 3.0).abs() < 1e-10);
}

#[test]
fn test_overlays_from_files() {
    let ground_truth = vec![
        create_object("person", 0.0, 0.0, 100.0, 100.0),
        create_object("car", 300.0, 300.0, 50.0, 50.0),
    ];
    let detections = vec![
        create_object("person", 10.0, 0.0, 100.0, 100.0),
        create_object("car", 0.0, 300.0, 50.0, 50.0),
    ];

    let result = evaluate(&ground_truth, &detections, 0.5);
    let overlays = build_overlays(&result, true);

    // IoU = 90*100 / (2*10000 - 9000)
    assert_eq!(overlays.ground_truth[0].label, "TP: person (IoU: 0.82)");
    assert_eq!(overlays.ground_truth[0].color, TP_COLOR);
    assert_eq!(overlays.detections[0].label, "TP: person (IoU: 0.82)");
    assert_eq!(overlays.ground_truth[1].label, "FN: car");
    assert_eq!(overlays.ground_truth[1].color, FN_COLOR);
    assert_eq!(overlays.detections[1].label, "FP: car");
    assert_eq!(overlays.detections[1].color, FP_COLOR);
    assert_eq!(overlays.detections[1].rect, detections[1].bbox);

    let hidden = build_overlays(&result, false);
    assert!(hidden
        .ground_truth
        .iter()
        .chain(hidden.detections.iter())
        .all(|item| item.kind != MatchKind::TruePositive));
}

#[test]
fn test_configured_threshold() {
    let config = load_config_from_str(r#"{ "evaluator": { "iou_threshold": 0.9 } }"#).unwrap();

    let ground_truth = vec![create_object("person", 0.0, 0.0, 100.0, 100.0)];
    let detections = vec![create_object("person", 10.0, 0.0, 100.0, 100.0)];

    let strict = evaluate_with_config(&ground_truth, &detections, &config.evaluator);
    assert!(strict.true_positives.is_empty());

    let default = evaluate(&ground_truth, &detections, 0.5);
    assert_eq!(default.true_positives.len(), 1);
}

#[test]
fn test_label_statistics_over_files() {
    let dir = tempfile::tempdir().unwrap();
    let many: Vec<(&str, i32, i32, i32, i32)> = (0..12).map(|i| ("car", i, i, i + 5, i + 5)).collect();
    let paths = vec![
        write_voc(&dir, "a.xml", &[("car", 0, 0, 9, 9), ("person", 5, 5, 20, 20)]),
        write_voc(&dir, "b.xml", &many),
        write_voc(&dir, "c.xml", &[]),
        dir.path().join("missing.xml"),
    ];

    let stats = LabelStatistics::from_files(&paths);
    assert_eq!(stats.total_files, 4);
    assert_eq!(stats.valid_files, 2);
    assert_eq!(stats.box_counts["car"], 13);
    assert_eq!(stats.box_counts["person"], 1);
    assert_eq!(stats.distribution, [1, 0, 1, 0, 0, 0]);
}
