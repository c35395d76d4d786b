use crate::adapters::csv_io::OutputWriter;
use crate::core::extract::extract_parcel_id;
use crate::core::merge::merge_row;
use crate::core::pacing::Pacer;
use crate::domain::model::InputRecord;
use crate::domain::ports::{AttributeSource, ConfigProvider};
use crate::utils::error::{EnrichError, Result};
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    InvalidInput,
    NoData,
    Transport,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidInput => "invalid input",
            Self::NoData => "no data",
            Self::Transport => "transport error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based data row number (the header is not counted).
    pub row: usize,
    pub reason: SkipReason,
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total_rows: usize,
    pub written: usize,
    pub skipped: Vec<SkippedRow>,
}

impl RunSummary {
    pub fn skipped_total(&self) -> usize {
        self.skipped.len()
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }

    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Drives a batch: every input row is resolved (extract, fetch, merge, write)
/// before the next one starts, so output order follows input order and at
/// most one request is in flight.
pub struct RecordEnricher<S: AttributeSource> {
    source: S,
    pacer: Pacer,
    progress_every: usize,
}

impl<S: AttributeSource> RecordEnricher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pacer: Pacer::default(),
            progress_every: 10,
        }
    }

    pub fn from_config<C: ConfigProvider>(source: S, config: &C) -> Self {
        Self::new(source)
            .with_pacer(Pacer::new(config.max_delay()))
            .with_progress_every(config.progress_every())
    }

    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    /// Log progress every `n` rows; `0` turns progress lines off.
    pub fn with_progress_every(mut self, n: usize) -> Self {
        self.progress_every = n;
        self
    }

    /// Enriches `rows` into `sink`. Per-row failures are logged and recorded
    /// in the summary; only input I/O and output write failures end the run.
    pub async fn run<I, W>(&self, rows: I, sink: &mut OutputWriter<W>) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Result<InputRecord>>,
        W: Write,
    {
        let schema = *sink.schema();
        let mut summary = RunSummary::default();
        let mut requests_sent = 0usize;

        tracing::info!("Starting enrichment run");

        for (index, row) in rows.into_iter().enumerate() {
            let row_number = index + 1;
            summary.total_rows += 1;

            if progress_due(index, self.progress_every) {
                tracing::info!(
                    "Processed {} rows ({} written, {} skipped)",
                    index,
                    summary.written,
                    summary.skipped_total()
                );
            }

            let record = match row {
                Ok(record) => record,
                Err(EnrichError::CsvError(e)) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(EnrichError::CsvError(e));
                }
                Err(e) => {
                    skip(&mut summary, row_number, SkipReason::InvalidInput, e.to_string());
                    continue;
                }
            };

            let parcel = match extract_parcel_id(&record.gis_map_hyperlink) {
                Ok(parcel) => parcel,
                Err(e) => {
                    skip(&mut summary, row_number, SkipReason::InvalidInput, e.to_string());
                    continue;
                }
            };

            if requests_sent > 0 {
                self.pacer.pause().await;
            }
            requests_sent += 1;

            match self.source.fetch(&parcel).await {
                Ok(Some(attributes)) => {
                    tracing::debug!(
                        "Row {}: parcel {} matched with {} populated fields",
                        row_number,
                        parcel,
                        attributes.populated()
                    );
                    let output = merge_row(&schema, &record, &attributes);
                    sink.write_row(&output)?;
                    summary.written += 1;
                }
                Ok(None) => {
                    let detail = format!("no assessor data for parcel {}", parcel);
                    skip(&mut summary, row_number, SkipReason::NoData, detail);
                }
                Err(e) => {
                    let detail = format!("parcel {}: {}", parcel, e);
                    skip(&mut summary, row_number, SkipReason::Transport, detail);
                }
            }
        }

        tracing::info!(
            "Finished: {} rows read, {} written, {} skipped (invalid input: {}, no data: {}, transport: {})",
            summary.total_rows,
            summary.written,
            summary.skipped_total(),
            summary.skipped_for(SkipReason::InvalidInput),
            summary.skipped_for(SkipReason::NoData),
            summary.skipped_for(SkipReason::Transport),
        );

        Ok(summary)
    }
}

/// True when `index` rows have been handled and a progress line is due.
fn progress_due(index: usize, every: usize) -> bool {
    every > 0 && index > 0 && index % every == 0
}

fn skip(summary: &mut RunSummary, row: usize, reason: SkipReason, detail: String) {
    tracing::warn!("Skipping row {} ({}): {}", row, reason, detail);
    summary.skipped.push(SkippedRow { row, reason, detail });
}
