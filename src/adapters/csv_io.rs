use crate::domain::model::{InputRecord, OutputRecord, OutputSchema, INPUT_FIELDS};
use crate::utils::error::{EnrichError, Result};
use csv::{QuoteStyle, ReaderBuilder, Trim, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Source table reader. The header is checked for the required columns on
/// construction; rows are decoded lazily.
pub struct InputReader<R: Read> {
    reader: csv::Reader<R>,
}

impl InputReader<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read> InputReader<R> {
    pub fn from_reader(inner: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(inner);

        let headers = reader.headers()?;
        let missing: Vec<String> = INPUT_FIELDS
            .iter()
            .filter(|name| !headers.iter().any(|h| h == **name))
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(EnrichError::MissingColumnError { columns: missing });
        }

        Ok(Self { reader })
    }

    /// Rows in file order. A row that cannot be decoded yields an error for
    /// that row only; reading continues with the next one.
    pub fn records(&mut self) -> impl Iterator<Item = Result<InputRecord>> + '_ {
        self.reader
            .deserialize::<InputRecord>()
            .map(|row| row.map_err(EnrichError::from))
    }
}

/// Flat output sink: header first, then one line per enriched row. Values
/// are written unquoted, so callers pass rows built by the merger.
pub struct OutputWriter<W: Write> {
    writer: csv::Writer<W>,
    schema: OutputSchema,
}

impl OutputWriter<File> {
    pub fn create<P: AsRef<Path>>(path: P, schema: OutputSchema) -> Result<Self> {
        let file = File::create(path)?;
        Self::new(file, schema)
    }
}

impl<W: Write> OutputWriter<W> {
    pub fn new(inner: W, schema: OutputSchema) -> Result<Self> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .from_writer(inner);

        writer.write_record(schema.header())?;
        writer.flush()?;

        Ok(Self { writer, schema })
    }

    pub fn schema(&self) -> &OutputSchema {
        &self.schema
    }

    pub fn write_row(&mut self, row: &OutputRecord) -> Result<()> {
        if row.len() != self.schema.width() {
            return Err(EnrichError::invalid_input(format!(
                "Output row has {} values, expected {}",
                row.len(),
                self.schema.width()
            )));
        }

        self.writer.write_record(&row.values)?;
        // Keep what has been enriched so far on disk if the run is interrupted.
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| EnrichError::IoError(e.into_error()))
    }
}
