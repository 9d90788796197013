//! Metrics calculation modules for detection review.

pub mod counts;
pub mod iou;

pub use counts::{calculate_f1, calculate_precision, calculate_recall};
pub use iou::{calculate_iou, calculate_iou_matrix};
