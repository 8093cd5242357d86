//! External decoder capability
//!
//! Wwise Vorbis has too many format variations to decode in-process;
//! vgmstream is the mature tool that handles them all. We shell out to
//! `vgmstream-cli` to convert one `.wem` into one `.wav`.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Converts one compressed audio file into one `.wav` file.
///
/// Success means `Ok(())` was returned AND the output file exists
/// afterwards. Callers must verify the latter: some decoder builds exit
/// zero without writing anything.
pub trait Decoder {
    /// Decode `input` into a `.wav` at `output`.
    fn decode(&self, input: &Path, output: &Path) -> Result<()>;
}

/// [`Decoder`] backed by an external `vgmstream-cli` binary.
#[derive(Debug, Clone)]
pub struct VgmstreamDecoder {
    exe: PathBuf,
}

impl VgmstreamDecoder {
    /// Create a decoder using the binary at `exe`.
    ///
    /// # Errors
    /// Returns [`Error::DecoderNotFound`] if the binary does not exist;
    /// nothing can run without it, so callers should abort before starting
    /// any pipeline stage.
    pub fn new(exe: impl Into<PathBuf>) -> Result<Self> {
        let exe = exe.into();
        if !exe.exists() {
            return Err(Error::DecoderNotFound { path: exe });
        }
        tracing::info!("using vgmstream-cli at {}", exe.display());
        Ok(Self { exe })
    }

    /// Find vgmstream-cli, checking common Homebrew locations, then PATH.
    ///
    /// # Errors
    /// Returns [`Error::DecoderUnavailable`] when no binary is found.
    pub fn locate() -> Result<Self> {
        let homebrew_paths = [
            "/opt/homebrew/bin/vgmstream-cli", // Apple Silicon
            "/usr/local/bin/vgmstream-cli",    // Intel Mac
        ];

        for path in homebrew_paths {
            let p = PathBuf::from(path);
            if p.exists() {
                return Self::new(p);
            }
        }

        // Fall back to PATH
        if let Ok(output) = Command::new("which").arg("vgmstream-cli").output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    return Self::new(PathBuf::from(path));
                }
            }
        }

        Err(Error::DecoderUnavailable)
    }

    /// Path of the underlying binary.
    #[must_use]
    pub fn exe(&self) -> &Path {
        &self.exe
    }
}

impl Decoder for VgmstreamDecoder {
    fn decode(&self, input: &Path, output: &Path) -> Result<()> {
        let out = Command::new(&self.exe)
            .arg("-o")
            .arg(output)
            .arg(input)
            .output()
            .map_err(|e| Error::DecodeFailed {
                input: input.to_path_buf(),
                stderr: format!("failed to run vgmstream-cli: {e}"),
            })?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
            return Err(Error::DecodeFailed {
                input: input.to_path_buf(),
                stderr,
            });
        }

        Ok(())
    }
}
