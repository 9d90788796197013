//! # det-review
//!
//! A Rust library for reviewing object-detection output against ground truth
//! and for editing annotation shapes on a zoomable image.
//!
//! It provides two independent engines:
//! - **Detection evaluation**: inclusive-pixel IoU, greedy per-class
//!   one-to-one matching, and a TP / FN / FP partition per image with
//!   labelled overlay rectangles
//! - **Annotation geometry**: view/image coordinate mapping with anchored
//!   zoom and clamped pan, polygon and rectangle editing with hit testing and
//!   dragging, and a pointer-event state machine driving both
//!
//! ## Features
//!
//! - Load Pascal VOC XML annotations
//! - Classify detections as true positives, false negatives and false positives
//! - Count labels and objects-per-file over many annotation files
//! - Round-trip point lists through a `[(x, y), ...]` text form
//! - Optional Polars DataFrame export (`polars` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use det_review::evaluator::{build_overlays, evaluate};
//! use det_review::types::{BoundingBox, DetectedObject};
//!
//! let ground_truth = vec![DetectedObject::new("car", BoundingBox::new(0.0, 0.0, 10.0, 10.0))];
//! let detections = vec![DetectedObject::new("car", BoundingBox::new(100.0, 100.0, 10.0, 10.0))];
//!
//! let result = evaluate(&ground_truth, &detections, 0.5);
//! assert_eq!(result.false_negatives.len(), 1);
//! assert_eq!(result.false_positives.len(), 1);
//!
//! let overlays = build_overlays(&result, true);
//! assert_eq!(overlays.ground_truth[0].label, "FN: car");
//! ```
//!
//! ## Editing a shape
//!
//! ```rust
//! use det_review::config::ViewerConfig;
//! use det_review::geometry::{AnnotationViewer, PointerButton, PointerEvent, ShapeMode};
//! use glam::DVec2;
//!
//! let mut viewer = AnnotationViewer::new(DVec2::new(200.0, 200.0), ViewerConfig::default());
//! viewer.load_image(DVec2::new(200.0, 200.0));
//! viewer.set_mode(ShapeMode::Rectangle);
//!
//! for corner in [DVec2::new(20.0, 20.0), DVec2::new(80.0, 60.0)] {
//!     viewer.handle_event(PointerEvent::Press {
//!         position: corner,
//!         button: PointerButton::Primary,
//!         modifier: true,
//!     });
//! }
//! assert_eq!(viewer.points().len(), 4);
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod geometry;
pub mod loader;
pub mod matching;
pub mod metrics;
#[cfg(feature = "polars")]
pub mod polars_utils;
pub mod stats;
pub mod types;

// Re-export commonly used types and functions
pub use config::{EvaluatorConfig, ReviewConfig, ViewerConfig};
pub use error::{Result, ReviewError};
pub use evaluator::{build_overlays, evaluate, OverlayItem, OverlaySink, Overlays};
pub use geometry::{AnnotationViewer, ShapeEditor, ShapeMode, ViewTransform};
pub use loader::{load_from_file, load_from_string, parse_objects, VocAnnotation};
pub use stats::LabelStatistics;
pub use types::{
    BoundingBox, DetectedObject, EvaluationResult, EvaluationSummary, MatchKind, TruePositive,
};
