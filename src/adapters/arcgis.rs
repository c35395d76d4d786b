use crate::domain::model::{AssessorAttributes, ParcelId};
use crate::domain::ports::{AttributeSource, ConfigProvider};
use crate::utils::error::{EnrichError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str =
    "https://mcgis.mohave.gov/ArcGIS/rest/services/PARCELS/MapServer/14/query";

/// Body of a MapServer layer `query` call made with `f=json`.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    features: Vec<Feature>,
    error: Option<ServiceFault>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    attributes: Map<String, Value>,
}

// ArcGIS reports bad queries with HTTP 200 and this envelope.
#[derive(Debug, Deserialize)]
struct ServiceFault {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Looks parcels up by `TAXPIN` on an ArcGIS REST layer.
pub struct ArcGisClient {
    client: Client,
    endpoint: String,
}

impl ArcGisClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.endpoint(),
            config.request_timeout(),
            config.user_agent(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `TAXPIN = '<id>'`, with embedded quotes doubled.
    pub fn where_clause(parcel: &ParcelId) -> String {
        format!("TAXPIN = '{}'", parcel.as_str().replace('\'', "''"))
    }
}

#[async_trait]
impl AttributeSource for ArcGisClient {
    async fn fetch(&self, parcel: &ParcelId) -> Result<Option<AssessorAttributes>> {
        let where_clause = Self::where_clause(parcel);
        tracing::debug!("Querying {} where {}", self.endpoint, where_clause);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("f", "json"),
                ("where", where_clause.as_str()),
                ("outFields", "*"),
                ("returnGeometry", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(EnrichError::HttpStatus {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let bytes = response.bytes().await?;
        let body: QueryResponse = serde_json::from_slice(&bytes)?;

        if let Some(fault) = body.error {
            return Err(EnrichError::ServiceError {
                code: fault.code,
                message: fault.message,
            });
        }

        if body.features.len() > 1 {
            tracing::debug!(
                "{} features matched parcel {}, using the first",
                body.features.len(),
                parcel
            );
        }

        Ok(body
            .features
            .first()
            .and_then(|feature| AssessorAttributes::project(&feature.attributes)))
    }
}
