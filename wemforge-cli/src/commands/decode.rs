//! CLI interface for one-off decodes
use std::path::Path;

use wemforge::decoder::{Decoder, VgmstreamDecoder};

pub fn execute(source: &Path, destination: &Path, decoder: Option<&Path>) -> anyhow::Result<()> {
    let decoder = match decoder {
        Some(path) => VgmstreamDecoder::new(path)?,
        None => VgmstreamDecoder::locate()?,
    };

    println!("Decoding {} -> {}", source.display(), destination.display());
    decoder.decode(source, destination)?;

    if !destination.exists() {
        anyhow::bail!("decoder exited successfully but produced no output file");
    }

    println!("✓ Decode complete");
    Ok(())
}
