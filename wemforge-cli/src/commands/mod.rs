use clap::Subcommand;
use std::path::PathBuf;

pub mod decode;
pub mod run;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full convert/rename/retry pipeline
    Run {
        /// Root directory of raw .wem/.wav sources
        #[arg(short, long, default_value = "txtp/wem")]
        input: PathBuf,

        /// Directory of .txtp reference files
        #[arg(short, long, default_value = "txtp")]
        refs: PathBuf,

        /// Final output root
        #[arg(short, long, default_value = "out")]
        output: PathBuf,

        /// Temporary staging root (deleted on completion)
        #[arg(short, long, default_value = "out_temp")]
        temp: PathBuf,

        /// Failure ledger file
        #[arg(short, long, default_value = "conversion_errors.log")]
        ledger: PathBuf,

        /// Path to vgmstream-cli (searched automatically when omitted)
        #[arg(short, long)]
        decoder: Option<PathBuf>,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a single file through vgmstream-cli
    Decode {
        /// Source .wem file
        #[arg(short, long)]
        source: PathBuf,

        /// Destination .wav file
        #[arg(short = 'o', long)]
        destination: PathBuf,

        /// Path to vgmstream-cli (searched automatically when omitted)
        #[arg(long)]
        decoder: Option<PathBuf>,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Run {
                input,
                refs,
                output,
                temp,
                ledger,
                decoder,
                json,
            } => run::execute(input, refs, output, temp, ledger, decoder.as_deref(), *json),
            Commands::Decode {
                source,
                destination,
                decoder,
            } => decode::execute(source, destination, decoder.as_deref()),
        }
    }
}
