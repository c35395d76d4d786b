use crate::domain::model::ParcelId;
use crate::utils::error::{EnrichError, Result};
use regex::Regex;
use std::sync::LazyLock;

static PARCEL_ID_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ParcelId=([^&]+)").expect("static pattern compiles"));

/// Pulls the `ParcelId` query value out of a map viewer link.
///
/// The value runs up to the next `&` or the end of the string and is returned
/// as written, without percent-decoding. A missing key or an empty value is an
/// [`EnrichError::InvalidInput`].
pub fn extract_parcel_id(url: &str) -> Result<ParcelId> {
    PARCEL_ID_PARAM
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| ParcelId::new_unchecked(m.as_str().to_string()))
        .ok_or_else(|| {
            EnrichError::invalid_input(format!("Couldn't extract ParcelId from URL: {}", url))
        })
}
