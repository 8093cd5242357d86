//! Extract stage: wem to wav staging
//!
//! Walks the input tree, decodes every `.wem` into a flat staging area,
//! and records which source subfolder each staged file came from. The
//! category label is the immediate parent directory's name; exactly one
//! level of meaningful nesting is the organizing convention, deeper paths
//! still take the immediate parent's name.

use std::fs;
use std::path::Path;

use tracing::{error, info};
use walkdir::WalkDir;

use crate::decoder::Decoder;
use crate::error::Result;
use crate::ledger::FailureLedger;
use crate::mapping::{CategoryMap, ROOT_CATEGORY};
use crate::report::RunStats;

enum SourceFormat {
    Wem,
    Wav,
}

/// Stage every eligible source under `input_root` into `staging_root` and
/// return the category map for the rename stage.
///
/// The staging area is wiped at the start of every run; final outputs and
/// the ledger are the only state that carries across runs. A source is
/// skipped when a same-named `.wav` already exists in staging or at the
/// stem-based destination guess `<output_root>/<category>/<stem>.wav`.
pub fn stage_assets<D: Decoder>(
    input_root: &Path,
    staging_root: &Path,
    output_root: &Path,
    decoder: &D,
    ledger: &FailureLedger,
    stats: &mut RunStats,
) -> Result<CategoryMap> {
    // No carry-over of stale partial state across runs.
    if staging_root.exists() {
        fs::remove_dir_all(staging_root)?;
    }
    fs::create_dir_all(staging_root)?;

    let mut map = CategoryMap::new();

    for entry in WalkDir::new(input_root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();

        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let format = if ext.eq_ignore_ascii_case("wem") {
            SourceFormat::Wem
        } else if ext.eq_ignore_ascii_case("wav") {
            SourceFormat::Wav
        } else {
            // Any other extension is not an audio source.
            continue;
        };

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let staged_name = format!("{stem}.wav");
        let category = category_label(path, input_root);

        // Recorded even for skipped sources so references to previously
        // processed assets still resolve to the right category.
        map.insert(staged_name.clone(), category.clone());

        let staged_path = staging_root.join(&staged_name);
        let final_guess = output_root.join(&category).join(&staged_name);
        if staged_path.exists() || final_guess.exists() {
            stats.skipped += 1;
            info!(
                "skipping existing wav: {} or {}",
                staged_path.display(),
                final_guess.display()
            );
            continue;
        }

        match format {
            SourceFormat::Wem => {
                info!("converting {} -> {}", path.display(), staged_path.display());
                match super::decode_verified(decoder, path, &staged_path) {
                    Ok(()) => {
                        stats.converted += 1;
                        info!("converted {} successfully", path.display());
                    }
                    Err(e) => {
                        stats.failed += 1;
                        error!("conversion failed for {}: {e}", path.display());
                        ledger.append(path)?;
                    }
                }
            }
            SourceFormat::Wav => {
                // Pre-converted input: copy into staging for the rename
                // stage. No decode happened, so it counts as skipped.
                match fs::copy(path, &staged_path) {
                    Ok(_) => {
                        stats.skipped += 1;
                        info!(
                            "using existing wav instead of converting: {} -> {}",
                            path.display(),
                            staged_path.display()
                        );
                    }
                    Err(e) => {
                        stats.failed += 1;
                        error!("failed to copy existing wav {}: {e}", path.display());
                        ledger.append(path)?;
                    }
                }
            }
        }
    }

    Ok(map)
}

/// Category for a source file: its parent directory's name, or
/// [`ROOT_CATEGORY`] when it sits directly in the input root.
fn category_label(path: &Path, input_root: &Path) -> String {
    match path.parent() {
        Some(parent) if parent != input_root => parent
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| ROOT_CATEGORY.to_string()),
        _ => ROOT_CATEGORY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn file_in_input_root_is_labeled_root() {
        let label = category_label(Path::new("in/123.wem"), Path::new("in"));
        assert_eq!(label, "root");
    }

    #[test]
    fn file_in_subfolder_takes_parent_name() {
        let label = category_label(Path::new("in/777/123.wem"), Path::new("in"));
        assert_eq!(label, "777");
    }

    #[test]
    fn deeper_nesting_still_takes_immediate_parent() {
        let label = category_label(Path::new("in/777/extra/123.wem"), Path::new("in"));
        assert_eq!(label, "extra");
    }
}
