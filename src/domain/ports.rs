use crate::domain::model::{AssessorAttributes, ParcelId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Remote lookup of assessor attributes for a parcel.
///
/// `Ok(None)` means the service answered but had nothing usable for the
/// parcel. Errors are reserved for transport and service failures.
#[async_trait]
pub trait AttributeSource: Send + Sync {
    async fn fetch(&self, parcel: &ParcelId) -> Result<Option<AssessorAttributes>>;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
    fn max_delay(&self) -> Duration;
    fn progress_every(&self) -> usize;
}
