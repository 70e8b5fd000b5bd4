use serde::{Deserialize, Serialize};

/// Aggregated fixation, the output unit of the extractor.
///
/// Coordinates are the truncated mean over every sample absorbed into the
/// fixation. `timestamp_ms` is absolute within the trial block, with tracker
/// clock resets folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixationRecord {
    pub mean_x: i32,
    pub mean_y: i32,
    pub duration_ms: i32,
    pub timestamp_ms: i32,
}
