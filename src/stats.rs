/// Label statistics over a collection of VOC annotation files
///
/// Counts boxes per label and how many objects each file carries, bucketed
/// in steps of five.

use crate::loader::parse_objects;
use crate::types::DetectedObject;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Number of objects-per-file buckets.
pub const DISTRIBUTION_BUCKETS: usize = 6;

/// Display labels for the objects-per-file buckets.
pub const BUCKET_LABELS: [&str; DISTRIBUTION_BUCKETS] =
    ["1-5", "6-10", "11-15", "16-20", "21-25", "25+"];

/// Statistics collected while scanning annotation files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelStatistics {
    /// Number of boxes per label, ordered by label
    pub box_counts: BTreeMap<String, usize>,

    /// Files per objects-per-file bucket
    pub distribution: [usize; DISTRIBUTION_BUCKETS],

    /// Files that contained at least one object
    pub valid_files: usize,

    /// Files scanned, including empty or unreadable ones
    pub total_files: usize,
}

/// Bucket index for a file holding `object_count` objects (must be >= 1).
pub fn bucket_index(object_count: usize) -> usize {
    ((object_count.saturating_sub(1)) / 5).min(DISTRIBUTION_BUCKETS - 1)
}

impl LabelStatistics {
    /// Create a new `LabelStatistics` with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the objects of one file
    pub fn add_file(&mut self, objects: &[DetectedObject]) {
        self.total_files += 1;
        if objects.is_empty() {
            return;
        }

        self.valid_files += 1;
        self.distribution[bucket_index(objects.len())] += 1;
        for object in objects {
            *self.box_counts.entry(object.class_name.clone()).or_insert(0) += 1;
        }
    }

    /// Scan VOC files; unreadable files count as empty
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Self {
        let mut stats = Self::new();
        for path in paths {
            stats.add_file(&parse_objects(path));
        }
        stats
    }

    /// Total boxes across all labels
    pub fn total_boxes(&self) -> usize {
        self.box_counts.values().sum()
    }

    /// Bucket labels paired with their file counts
    pub fn distribution_rows(&self) -> Vec<(&'static str, usize)> {
        BUCKET_LABELS
            .iter()
            .copied()
            .zip(self.distribution.iter().copied())
            .collect()
    }

    /// Print a summary of the statistics to stdout
    pub fn print_summary(&self) {
        println!("\n=== Label Statistics ===");
        println!("Files scanned: {}", self.total_files);
        println!("Files with objects: {}", self.valid_files);
        println!("Total boxes: {}", self.total_boxes());
        for (label, count) in &self.box_counts {
            println!("  - {label}: {count}");
        }
        println!("Objects per file:");
        for (bucket, count) in self.distribution_rows() {
            println!("  - {bucket}: {count}");
        }
        println!("========================\n");
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "LabelStatistics {{ files: {}, valid: {}, labels: {}, boxes: {} }}",
            self.total_files,
            self.valid_files,
            self.box_counts.len(),
            self.total_boxes()
        )
    }
}
