//! Compare a detection file against a ground-truth file and print the
//! classified overlays.
//!
//! Usage: `cargo run --example compare_annotations [GT.xml DET.xml [CONFIG.json]]`
//!
//! Without arguments a built-in pair of annotations is used.

use det_review::config::{load_config_from_file, ReviewConfig};
use det_review::evaluator::{build_overlays, evaluate_with_config};
use det_review::loader::{load_from_string, parse_objects};
use det_review::stats::LabelStatistics;
use det_review::types::DetectedObject;

const GROUND_TRUTH_XML: &str = r#"<annotation>
  <filename>street.jpg</filename>
  <size><width>640</width><height>480</height><depth>3</depth></size>
  <object><name>person</name><bndbox><xmin>100</xmin><ymin>120</ymin><xmax>159</xmax><ymax>299</ymax></bndbox></object>
  <object><name>car</name><bndbox><xmin>300</xmin><ymin>200</ymin><xmax>499</xmax><ymax>319</ymax></bndbox></object>
  <object><name>bicycle</name><bndbox><xmin>520</xmin><ymin>250</ymin><xmax>609</xmax><ymax>329</ymax></bndbox></object>
</annotation>"#;

const DETECTION_XML: &str = r#"<annotation>
  <filename>street.jpg</filename>
  <object><name>person</name><bndbox><xmin>104</xmin><ymin>118</ymin><xmax>162</xmax><ymax>296</ymax></bndbox></object>
  <object><name>car</name><bndbox><xmin>330</xmin><ymin>210</ymin><xmax>520</xmax><ymax>330</ymax></bndbox></object>
  <object><name>dog</name><bndbox><xmin>20</xmin><ymin>400</ymin><xmax>79</xmax><ymax>459</ymax></bndbox></object>
</annotation>"#;

fn builtin(xml: &str) -> Result<Vec<DetectedObject>, Box<dyn std::error::Error>> {
    Ok(load_from_string(xml)?.objects)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (ground_truth, detections) = match args.as_slice() {
        [gt, det, ..] => (parse_objects(gt), parse_objects(det)),
        _ => (builtin(GROUND_TRUTH_XML)?, builtin(DETECTION_XML)?),
    };
    let config = match args.get(2) {
        Some(path) => load_config_from_file(path)?,
        None => ReviewConfig::default(),
    };

    println!("=== Detection Review ===\n");
    println!(
        "Ground truth: {} objects, detections: {} objects, IoU threshold: {}",
        ground_truth.len(),
        detections.len(),
        config.evaluator.iou_threshold
    );
    println!();

    let result = evaluate_with_config(&ground_truth, &detections, &config.evaluator);
    let overlays = build_overlays(&result, config.evaluator.show_true_positives);

    println!("Ground-truth view:");
    for item in &overlays.ground_truth {
        let r = item.rect;
        println!("   [{:>4} {:>4} {:>4}x{:<4}] {}", r.left, r.top, r.width, r.height, item.label);
    }
    println!();
    println!("Detection view:");
    for item in &overlays.detections {
        let r = item.rect;
        println!("   [{:>4} {:>4} {:>4}x{:<4}] {}", r.left, r.top, r.width, r.height, item.label);
    }
    println!();

    let summary = result.summary();
    println!("Summary");
    println!("   TP: {}  FN: {}  FP: {}", summary.true_positives, summary.false_negatives, summary.false_positives);
    println!("   Precision: {:.4}", summary.precision);
    println!("   Recall:    {:.4}", summary.recall);
    println!("   F1:        {:.4}", summary.f1);
    println!();

    let mut stats = LabelStatistics::new();
    stats.add_file(&ground_truth);
    stats.add_file(&detections);
    stats.print_summary();

    Ok(())
}
