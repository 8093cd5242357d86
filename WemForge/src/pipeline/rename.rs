//! Rename stage: token-driven relocation
//!
//! A `.txtp` reference file lists the audio a higher-level game asset
//! uses. Tokens prefixed `wem` name staged files; a token's position in
//! the full token stream disambiguates repeated references to the same
//! asset within one file.

use std::fs;
use std::path::Path;

use tracing::{error, info, warn};

use crate::error::Result;
use crate::mapping::CategoryMap;

/// Token prefix marking an audio reference.
const REF_TOKEN_PREFIX: &str = "wem";

/// Relocate every staged file referenced by `ref_path` to its final
/// destination `<output_root>/<category>/<ref_stem>_<index>.wav`.
///
/// A read failure on the reference file is logged and skipped; other
/// reference files still get processed. Existing destinations are never
/// overwritten, and a missing staged file is benign (the reference may
/// point at an asset that was intentionally never extracted).
pub fn relocate_references(
    ref_path: &Path,
    staging_root: &Path,
    output_root: &Path,
    map: &CategoryMap,
) -> Result<()> {
    let content = match fs::read_to_string(ref_path) {
        Ok(content) => content,
        Err(e) => {
            error!("failed to read {}: {e}", ref_path.display());
            return Ok(());
        }
    };

    let ref_stem = reference_stem(ref_path);

    for (index, token) in audio_tokens(&content) {
        let Some(stem) = Path::new(&token).file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let staged_name = format!("{stem}.wav");
        let staged_path = staging_root.join(&staged_name);

        let category = map.category_for(&staged_name);
        let dest_dir = output_root.join(category);
        fs::create_dir_all(&dest_dir)?;
        let dest = dest_dir.join(format!("{ref_stem}_{index}.wav"));

        if dest.exists() {
            info!("skipping already renamed wav: {}", dest.display());
            continue;
        }

        if staged_path.exists() {
            match fs::rename(&staged_path, &dest) {
                Ok(()) => info!("renamed {} -> {}", staged_path.display(), dest.display()),
                Err(e) => error!("failed to rename {}: {e}", staged_path.display()),
            }
        } else {
            warn!("{} not found", staged_path.display());
        }
    }

    Ok(())
}

/// Audio reference tokens with their positions in the full token stream.
///
/// Newlines collapse to spaces and the stream splits on single spaces, so
/// empty tokens keep their positions and indices stay stable against the
/// reference file's original layout.
fn audio_tokens(content: &str) -> Vec<(usize, String)> {
    content
        .replace('\n', " ")
        .split(' ')
        .enumerate()
        .filter(|(_, token)| token.starts_with(REF_TOKEN_PREFIX))
        .map(|(index, token)| (index, token.to_string()))
        .collect()
}

/// Reference filename truncated at its first `.` character.
fn reference_stem(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}
