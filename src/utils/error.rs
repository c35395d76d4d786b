use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Service error {code}: {message}")]
    ServiceError { code: i64, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Input file is missing required column(s): {}", columns.join(", "))]
    MissingColumnError { columns: Vec<String> },
}

impl EnrichError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::CsvError(e) => format!("The CSV file could not be processed: {}", e),
            Self::MissingColumnError { columns } => {
                format!("Input CSV lacks column(s): {}", columns.join(", "))
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the input path exists and the output directory is writable",
            Self::CsvError(_) => "Make sure the input is a comma-separated file with a header row",
            Self::MissingColumnError { .. } => {
                "The header must contain: Parcel Number, Account Number, Owner, Amount, GIS Map Hyperlink"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the flag or config file value and run again"
            }
            Self::ApiError(_) | Self::HttpStatus { .. } | Self::ServiceError { .. } => {
                "The parcel service may be down or throttling; try again later with a larger --max-delay-secs"
            }
            Self::SerializationError(_) => {
                "The parcel service answered with something other than query JSON; check --endpoint"
            }
            Self::InvalidInput { .. } => "Check the GIS Map Hyperlink column for a ParcelId parameter",
        }
    }
}

pub type Result<T> = std::result::Result<T, EnrichError>;
