use crate::config::toml_config::FileConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "parcel-enrich")]
#[command(about = "Append county assessor attributes to a CSV of parcel records")]
pub struct CliArgs {
    /// Path to the input CSV file
    #[arg(short = 'i', long = "input-csv", visible_alias = "input_csv")]
    pub input_csv: PathBuf,

    /// Path to the output CSV file (overwritten)
    #[arg(short = 'o', long = "output-csv", visible_alias = "output_csv")]
    pub output_csv: PathBuf,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// ArcGIS layer query endpoint
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Upper bound of the random pause between requests, in seconds
    #[arg(long)]
    pub max_delay_secs: Option<f64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log progress every N rows (0 disables)
    #[arg(long)]
    pub progress_every: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Resolves defaults, then the settings file, then flags given here.
    pub fn into_settings(self) -> Result<Settings> {
        let mut settings = Settings::new(self.input_csv, self.output_csv);

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading settings from: {}", path.display());
            settings = settings.with_file(&FileConfig::from_file(path)?);
        }

        if let Some(endpoint) = self.endpoint {
            settings.endpoint = endpoint;
        }
        if let Some(delay) = self.max_delay_secs {
            settings.max_delay_seconds = delay;
        }
        if let Some(timeout) = self.timeout_secs {
            settings.timeout_seconds = timeout;
        }
        if let Some(every) = self.progress_every {
            settings.progress_every = every;
        }

        Ok(settings)
    }
}
