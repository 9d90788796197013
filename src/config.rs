//! Tunable settings for the evaluator and the annotation viewer.

use crate::error::{ReviewError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Minimum IoU for a same-class pair to count as a true positive.
    #[serde(default = "default_iou_threshold")]
    pub iou_threshold: f64,
    /// Whether true-positive overlays are produced.
    #[serde(default = "default_true")]
    pub show_true_positives: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// View-space radius within which a press grabs a point.
    #[serde(default = "default_hit_radius")]
    pub hit_radius_pixels: f64,
    #[serde(default = "default_zoom_in_factor")]
    pub zoom_in_factor: f64,
    #[serde(default = "default_zoom_out_factor")]
    pub zoom_out_factor: f64,
    /// Lower bound for the view scale.
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,
}

fn default_iou_threshold() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

fn default_hit_radius() -> f64 {
    8.0
}

fn default_zoom_in_factor() -> f64 {
    1.1
}

fn default_zoom_out_factor() -> f64 {
    0.9
}

fn default_min_scale() -> f64 {
    0.01
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            iou_threshold: default_iou_threshold(),
            show_true_positives: default_true(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            hit_radius_pixels: default_hit_radius(),
            zoom_in_factor: default_zoom_in_factor(),
            zoom_out_factor: default_zoom_out_factor(),
            min_scale: default_min_scale(),
        }
    }
}

impl EvaluatorConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(ReviewError::InvalidThreshold(format!(
                "IoU threshold must be between 0.0 and 1.0, got {}",
                self.iou_threshold
            )));
        }
        Ok(())
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("hit_radius_pixels", self.hit_radius_pixels),
            ("zoom_in_factor", self.zoom_in_factor),
            ("zoom_out_factor", self.zoom_out_factor),
            ("min_scale", self.min_scale),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ReviewError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl ReviewConfig {
    pub fn validate(&self) -> Result<()> {
        self.evaluator.validate()?;
        self.viewer.validate()
    }
}

/// Load and validate a configuration from a JSON file.
///
/// Missing sections and fields fall back to their defaults.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<ReviewConfig> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config: ReviewConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a configuration from a JSON string.
///
/// ```
/// use det_review::config::load_config_from_str;
///
/// let config = load_config_from_str(r#"{ "evaluator": { "iou_threshold": 0.7 } }"#).unwrap();
/// assert_eq!(config.evaluator.iou_threshold, 0.7);
/// assert_eq!(config.viewer.hit_radius_pixels, 8.0);
/// ```
pub fn load_config_from_str(json_str: &str) -> Result<ReviewConfig> {
    let config: ReviewConfig = serde_json::from_str(json_str)?;
    config.validate()?;
    Ok(config)
}
