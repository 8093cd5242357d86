//! The three-stage conversion pipeline
//!
//! Stages run strictly in sequence and compose through the filesystem:
//! extract decodes sources into a flat staging area and builds the
//! category map, rename relocates staged files according to `.txtp`
//! references, and retry replays the failure ledger once. The staging
//! tree is deleted when the run completes.

pub mod extract;
pub mod rename;
pub mod retry;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use crate::decoder::Decoder;
use crate::error::{Error, Result};
use crate::ledger::FailureLedger;
use crate::report::RunStats;

/// Reference file extension recognized by the rename stage.
pub const REF_EXTENSION: &str = "txtp";

/// Filesystem layout for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root of the raw source tree (`.wem`/`.wav` files, organized in at
    /// most one level of named subfolders).
    pub input_root: PathBuf,
    /// Temporary root. Staging lives at `<temp_root>/wem`; the whole tree
    /// is removed when the run completes.
    pub temp_root: PathBuf,
    /// Root of the final categorized output tree.
    pub output_root: PathBuf,
    /// Directory holding `.txtp` reference files.
    pub refs_dir: PathBuf,
    /// Location of the failure ledger file.
    pub ledger_path: PathBuf,
}

impl PipelineConfig {
    /// Flat staging directory for freshly decoded `.wav` files.
    #[must_use]
    pub fn staging_root(&self) -> PathBuf {
        self.temp_root.join("wem")
    }
}

/// Run the full pipeline: extract, rename, retry, cleanup, summary.
///
/// Per-source failures are logged and recorded in the ledger without
/// aborting the run; only environmental errors (unreadable input tree,
/// uncreatable directories) propagate.
pub fn run<D: Decoder>(config: &PipelineConfig, decoder: &D) -> Result<RunStats> {
    let mut stats = RunStats::default();
    let ledger = FailureLedger::new(&config.ledger_path);
    ledger.clear()?;

    let staging_root = config.staging_root();

    info!("starting .wem -> .wav extraction");
    let map = extract::stage_assets(
        &config.input_root,
        &staging_root,
        &config.output_root,
        decoder,
        &ledger,
        &mut stats,
    )?;

    info!("starting .wav renaming based on .txtp files");
    for ref_path in find_reference_files(&config.refs_dir)? {
        rename::relocate_references(&ref_path, &staging_root, &config.output_root, &map)?;
    }

    retry::retry_failures(&staging_root, decoder, &ledger, &mut stats)?;

    if config.temp_root.exists() {
        fs::remove_dir_all(&config.temp_root)?;
        info!("temporary folder {} deleted", config.temp_root.display());
    }

    info!(
        converted = stats.converted,
        skipped = stats.skipped,
        failed = stats.failed,
        "conversion and renaming complete"
    );

    Ok(stats)
}

/// Find all reference files directly in `dir`, sorted for deterministic
/// processing order.
fn find_reference_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut refs: Vec<_> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| {
            e.path().is_file()
                && e.path()
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(REF_EXTENSION))
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    refs.sort();
    Ok(refs)
}

/// Decode and verify the output actually appeared; some decoder builds
/// exit zero without writing a file.
pub(crate) fn decode_verified<D: Decoder>(decoder: &D, input: &Path, output: &Path) -> Result<()> {
    decoder.decode(input, output)?;
    if output.exists() {
        Ok(())
    } else {
        Err(Error::DecodeFailed {
            input: input.to_path_buf(),
            stderr: "decoder exited successfully but produced no output file".to_string(),
        })
    }
}
