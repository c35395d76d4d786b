use crate::utils::error::{EnrichError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern compiles"));

/// Optional settings file. Every key may be omitted; command line flags win
/// over anything set here.
///
/// ```toml
/// [service]
/// endpoint = "https://mcgis.mohave.gov/ArcGIS/rest/services/PARCELS/MapServer/14/query"
/// timeout_seconds = 30
/// user_agent = "parcel-enrich (${CONTACT_EMAIL})"
///
/// [pacing]
/// max_delay_seconds = 3.0
///
/// [progress]
/// every = 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub service: Option<ServiceConfig>,
    pub pacing: Option<PacingConfig>,
    pub progress: Option<ProgressConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacingConfig {
    pub max_delay_seconds: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressConfig {
    pub every: Option<usize>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EnrichError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EnrichError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.service.as_ref()?.endpoint.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.service.as_ref()?.timeout_seconds
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.service.as_ref()?.user_agent.as_deref()
    }

    pub fn max_delay_seconds(&self) -> Option<f64> {
        self.pacing.as_ref()?.max_delay_seconds
    }

    pub fn progress_every(&self) -> Option<usize> {
        self.progress.as_ref()?.every
    }
}
