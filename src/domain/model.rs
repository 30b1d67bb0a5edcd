use crate::domain::genre::Genre;
use crate::domain::listing::ListingStore;
use crate::domain::property::{Property, Valuation};
use crate::utils::error::{FormatError, RealtyError};
use serde::Serialize;

/// Outcome of reading one batch of records.
#[derive(Debug, Default)]
pub struct Ingestion {
    pub listings: ListingStore,
    pub errors: Vec<FormatError>,
    pub duplicates: usize,
    /// Set when the source itself could not be read; `listings` is then empty.
    pub source_error: Option<RealtyError>,
}

impl Ingestion {
    pub fn unavailable(error: RealtyError) -> Self {
        Self {
            source_error: Some(error),
            ..Self::default()
        }
    }
}

/// A listing together with the total price it had when the report was built.
#[derive(Debug, Clone, Serialize)]
pub struct PricedListing {
    #[serde(flatten)]
    pub property: Property,
    pub total_price: i64,
    pub average_sqm_per_room: f64,
}

impl From<&Property> for PricedListing {
    fn from(property: &Property) -> Self {
        Self {
            total_price: property.total_price(),
            average_sqm_per_room: property.average_sqm_per_room(),
            property: property.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub city: String,
    pub genre: Genre,
    pub listing_count: usize,
    pub average_price_per_sqm: f64,
    pub cheapest: PricedListing,
    pub most_expensive_in_city: Option<PricedListing>,
    pub total_value: f64,
    pub average_total_price: f64,
    pub below_average: Vec<PricedListing>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// `None` when no report was written (empty store).
    pub output_path: Option<String>,
    pub listings: usize,
    pub rejected_lines: usize,
    pub duplicates: usize,
    pub source_unavailable: bool,
}
