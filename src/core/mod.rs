pub mod engine;
pub mod parser;
pub mod pipeline;
pub mod report;

pub use crate::domain::listing::ListingStore;
pub use crate::domain::model::{Ingestion, PricedListing, Report, RunSummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
