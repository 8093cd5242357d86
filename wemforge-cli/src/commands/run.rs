//! CLI interface for the full pipeline run
use std::path::Path;

use wemforge::decoder::VgmstreamDecoder;
use wemforge::pipeline::{self, PipelineConfig};

pub fn execute(
    input: &Path,
    refs: &Path,
    output: &Path,
    temp: &Path,
    ledger: &Path,
    decoder: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    // The decoder binary is a startup precondition; nothing runs without it.
    let decoder = match decoder {
        Some(path) => VgmstreamDecoder::new(path)?,
        None => VgmstreamDecoder::locate()?,
    };

    let config = PipelineConfig {
        input_root: input.to_path_buf(),
        temp_root: temp.to_path_buf(),
        output_root: output.to_path_buf(),
        refs_dir: refs.to_path_buf(),
        ledger_path: ledger.to_path_buf(),
    };

    let stats = pipeline::run(&config, &decoder)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("===================================");
        println!("Successfully converted:   {}", stats.converted);
        println!("Skipped (already exists): {}", stats.skipped);
        println!("Failed conversions:       {}", stats.failed);
        println!("===================================");
    }

    Ok(())
}
