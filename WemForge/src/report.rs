//! Run statistics

use serde::Serialize;

/// Counters for one pipeline run.
///
/// Advisory only: stages report through these but never branch on them.
/// Threaded mutably through the stages instead of living in process-wide
/// globals so tests can assert on exact accounting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Sources decoded successfully, including retry-pass successes.
    pub converted: usize,
    /// Sources skipped: already staged, already at a final destination, or
    /// pre-existing `.wav` inputs copied without a decode.
    pub skipped: usize,
    /// Sources still failing after the retry pass.
    pub failed: usize,
}
