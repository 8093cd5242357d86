//! # WemForge
//!
//! A one-shot pipeline for batch-converting Wwise `.wem` game audio into
//! `.wav` files and renaming the results according to `.txtp` reference
//! files, organized into category subfolders.
//!
//! Decoding is delegated to `vgmstream-cli`; everything else is filesystem
//! plumbing: a flat staging area, a filename-to-category map built during
//! extraction, and a failure ledger that gets replayed once per run.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wemforge::decoder::VgmstreamDecoder;
//! use wemforge::pipeline::{self, PipelineConfig};
//!
//! let decoder = VgmstreamDecoder::locate()?;
//!
//! let config = PipelineConfig {
//!     input_root: "txtp/wem".into(),
//!     temp_root: "out_temp".into(),
//!     output_root: "out".into(),
//!     refs_dir: "txtp".into(),
//!     ledger_path: "conversion_errors.log".into(),
//! };
//!
//! let stats = pipeline::run(&config, &decoder)?;
//! println!("converted {} files", stats.converted);
//! # Ok::<(), wemforge::Error>(())
//! ```

pub mod decoder;
pub mod error;
pub mod ledger;
pub mod mapping;
pub mod pipeline;
pub mod report;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::decoder::{Decoder, VgmstreamDecoder};
    pub use crate::error::{Error, Result};
    pub use crate::ledger::FailureLedger;
    pub use crate::mapping::{CategoryMap, ROOT_CATEGORY, UNKNOWN_CATEGORY};
    pub use crate::pipeline::{self, PipelineConfig};
    pub use crate::report::RunStats;
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
