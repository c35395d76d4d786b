pub mod enricher;
pub mod extract;
pub mod merge;
pub mod pacing;

pub use crate::domain::model::{AssessorAttributes, InputRecord, OutputRecord, OutputSchema, ParcelId};
pub use crate::domain::ports::{AttributeSource, ConfigProvider};
pub use crate::utils::error::Result;
