//! Run statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one harvest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestStats {
    /// Run start time
    pub start_time: DateTime<Utc>,

    /// Run end time
    pub end_time: DateTime<Utc>,

    /// Categories attempted
    pub category_count: usize,

    /// Validated, deduplicated records emitted
    pub record_count: usize,

    /// Tables handed to the sink
    pub tables_written: usize,
}

impl HarvestStats {
    /// Wall-clock duration of the run in seconds.
    pub fn duration_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}
