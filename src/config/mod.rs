#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::arcgis::DEFAULT_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct_paths, validate_path, validate_positive_number, validate_range, validate_url,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use toml_config::FileConfig;

pub const DEFAULT_USER_AGENT: &str = concat!("parcel-enrich/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_DELAY_SECONDS: f64 = 3.0;
pub const DEFAULT_PROGRESS_EVERY: usize = 10;

const MAX_DELAY_CEILING_SECONDS: f64 = 600.0;

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub input_csv: PathBuf,
    pub output_csv: PathBuf,
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub max_delay_seconds: f64,
    pub progress_every: usize,
}

impl Settings {
    pub fn new(input_csv: impl Into<PathBuf>, output_csv: impl Into<PathBuf>) -> Self {
        Self {
            input_csv: input_csv.into(),
            output_csv: output_csv.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_delay_seconds: DEFAULT_MAX_DELAY_SECONDS,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }

    /// Layers values from a settings file over the current ones.
    pub fn with_file(mut self, file: &FileConfig) -> Self {
        if let Some(endpoint) = file.endpoint() {
            self.endpoint = endpoint.to_string();
        }
        if let Some(timeout) = file.timeout_seconds() {
            self.timeout_seconds = timeout;
        }
        if let Some(user_agent) = file.user_agent() {
            self.user_agent = user_agent.to_string();
        }
        if let Some(delay) = file.max_delay_seconds() {
            self.max_delay_seconds = delay;
        }
        if let Some(every) = file.progress_every() {
            self.progress_every = every;
        }
        self
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("input_csv", &self.input_csv)?;
        validate_path("output_csv", &self.output_csv)?;
        validate_distinct_paths("output_csv", &self.input_csv, &self.output_csv)?;
        validate_url("service.endpoint", &self.endpoint)?;
        validate_positive_number("service.timeout_seconds", self.timeout_seconds, 1)?;
        validate_range(
            "pacing.max_delay_seconds",
            self.max_delay_seconds,
            0.0,
            MAX_DELAY_CEILING_SECONDS,
        )?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn max_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_delay_seconds).unwrap_or(Duration::ZERO)
    }

    fn progress_every(&self) -> usize {
        self.progress_every
    }
}
