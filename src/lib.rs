pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;
pub use config::Settings;

pub use adapters::arcgis::ArcGisClient;
pub use adapters::csv_io::{InputReader, OutputWriter};
pub use core::enricher::{RecordEnricher, RunSummary, SkipReason, SkippedRow};
pub use domain::model::OutputSchema;
pub use utils::error::{EnrichError, Result};

use utils::validation::Validate;

/// Runs a whole batch from resolved settings: opens both files, enriches
/// every row against the configured service and returns the summary.
pub async fn run(settings: &Settings) -> Result<RunSummary> {
    settings.validate()?;

    let mut reader = InputReader::open(&settings.input_csv)?;
    let client = ArcGisClient::from_config(settings)?;
    let mut writer = OutputWriter::create(&settings.output_csv, OutputSchema::standard())?;

    tracing::info!(
        "Enriching {} -> {} using {}",
        settings.input_csv.display(),
        settings.output_csv.display(),
        client.endpoint()
    );

    let enricher = RecordEnricher::from_config(client, settings);
    enricher.run(reader.records(), &mut writer).await
}
