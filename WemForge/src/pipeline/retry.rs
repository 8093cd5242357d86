//! Retry stage: failure replay
//!
//! Replays the failure ledger exactly once per run. The ledger is read
//! and truncated as one unit, so a crash mid-pass loses the entries not
//! yet retried rather than retrying them forever. Sources that fail a
//! second time go back into the ledger for manual follow-up.

use std::path::Path;

use tracing::{error, info};

use crate::decoder::Decoder;
use crate::error::Result;
use crate::ledger::FailureLedger;
use crate::report::RunStats;

/// Re-attempt every source recorded in the ledger, updating `stats` so
/// that `failed` reflects only the sources still failing after this pass.
pub fn retry_failures<D: Decoder>(
    staging_root: &Path,
    decoder: &D,
    ledger: &FailureLedger,
    stats: &mut RunStats,
) -> Result<()> {
    if !ledger.exists() {
        info!("no failed conversions to retry");
        return Ok(());
    }

    let failed = ledger.take()?;
    if failed.is_empty() {
        info!("no failed conversions to retry");
        return Ok(());
    }

    info!("retrying {} failed conversions", failed.len());
    let mut new_failures = 0;

    for source in failed {
        let Some(stem) = source.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let staged_path = staging_root.join(format!("{stem}.wav"));

        if staged_path.exists() {
            info!("skipping existing wav: {}", staged_path.display());
            continue;
        }

        info!("retrying conversion: {} -> {}", source.display(), staged_path.display());
        match super::decode_verified(decoder, &source, &staged_path) {
            Ok(()) => {
                stats.converted += 1;
                info!("successfully converted on retry: {}", source.display());
            }
            Err(e) => {
                new_failures += 1;
                error!(
                    "conversion failed a second time: {} ({e}); the source may be \
                     corrupt or have no matching reference, manual follow-up needed",
                    source.display()
                );
                ledger.append(&source)?;
            }
        }
    }

    // Only sources still failing after the retry pass count as failed.
    stats.failed = new_failures;

    Ok(())
}
