use crate::domain::genre::Genre;
use crate::domain::listing::ListingStore;
use crate::domain::model::{PricedListing, Report};
use crate::domain::property::{Property, Valuation};
use crate::utils::error::{RealtyError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;

pub const DEFAULT_REPORT_CITY: &str = "Budapest";
pub const DEFAULT_REPORT_GENRE: Genre = Genre::Condominium;

/// Which city and genre the report focuses on.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub city: String,
    pub genre: Genre,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            city: DEFAULT_REPORT_CITY.to_string(),
            genre: DEFAULT_REPORT_GENRE,
        }
    }
}

/// First listing (in store order) whose total price beats every earlier one.
fn first_extreme<'a, I, F>(listings: I, beats: F) -> Option<&'a Property>
where
    I: Iterator<Item = &'a Property>,
    F: Fn(i64, i64) -> bool,
{
    listings.fold(None, |best, candidate| match best {
        Some(current) if !beats(candidate.total_price(), current.total_price()) => Some(current),
        _ => Some(candidate),
    })
}

/// Reduces the store into summary statistics.
///
/// Returns [`RealtyError::EmptyStore`] when there is nothing to report on.
pub fn build_report(store: &ListingStore, options: &ReportOptions) -> Result<Report> {
    if store.is_empty() {
        return Err(RealtyError::EmptyStore);
    }

    let count = store.len() as f64;

    let average_price_per_sqm = store.iter().map(|p| p.price_per_sqm()).sum::<f64>() / count;

    let cheapest =
        first_extreme(store.iter(), |candidate, best| candidate < best).ok_or(RealtyError::EmptyStore)?;

    let city = options.city.to_lowercase();
    let most_expensive_in_city = first_extreme(
        store.iter().filter(|p| p.city().to_lowercase() == city),
        |candidate, best| candidate > best,
    );

    let total_value: f64 = store.iter().map(|p| p.total_price() as f64).sum();
    let average_total_price = total_value / count;

    let below_average: Vec<PricedListing> = store
        .iter()
        .filter(|p| p.genre() == options.genre)
        .filter(|p| p.total_price() as f64 <= average_total_price)
        .map(PricedListing::from)
        .collect();

    tracing::debug!(
        "Report built over {} listings, {} {} below average",
        store.len(),
        below_average.len(),
        options.genre
    );

    Ok(Report {
        city: options.city.clone(),
        genre: options.genre,
        listing_count: store.len(),
        average_price_per_sqm,
        cheapest: PricedListing::from(cheapest),
        most_expensive_in_city: most_expensive_in_city.map(PricedListing::from),
        total_value,
        average_total_price,
        below_average,
    })
}

fn plural_label(genre: Genre) -> &'static str {
    match genre {
        Genre::Flat => "Flats",
        Genre::FamilyHouse => "Family houses",
        Genre::Farm => "Farms",
        Genre::Condominium => "Condominiums",
    }
}

impl Report {
    /// Plain-text report in its fixed section order.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let most_expensive = match &self.most_expensive_in_city {
            Some(listing) => format!("{:.2}", listing.average_sqm_per_room),
            None => "N/A".to_string(),
        };

        // 寫入 String 不會失敗
        let _ = writeln!(out, "Average square meter price: {:.2}", self.average_price_per_sqm);
        let _ = writeln!(out, "Cheapest property price: {}", self.cheapest.total_price);
        let _ = writeln!(
            out,
            "Average sqm per room of most expensive in {}: {}",
            self.city, most_expensive
        );
        let _ = writeln!(out, "Total price of all properties: {:.2}", self.total_value);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "--- {} below average total price ---",
            plural_label(self.genre)
        );
        for listing in &self.below_average {
            let _ = writeln!(out, "{}", listing.property.summary());
        }

        out
    }

    pub fn render_json(&self, generated_at: DateTime<Utc>) -> Result<String> {
        #[derive(Serialize)]
        struct Document<'a> {
            generated_at: String,
            #[serde(flatten)]
            report: &'a Report,
        }

        let document = Document {
            generated_at: generated_at.to_rfc3339(),
            report: self,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    kind: &'static str,
    city: &'a str,
    genre: Genre,
    price_per_sqm: f64,
    sqm: u32,
    number_of_rooms: f64,
    floor: Option<i32>,
    insulated: Option<bool>,
    total_price: i64,
    average_sqm_per_room: f64,
}

/// Every listing as CSV, in store order.
pub fn listings_csv(store: &ListingStore) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for property in store.iter() {
        writer.serialize(CsvRow {
            kind: property.tag(),
            city: property.city(),
            genre: property.genre(),
            price_per_sqm: property.price_per_sqm(),
            sqm: property.sqm(),
            number_of_rooms: property.number_of_rooms(),
            floor: property.floor(),
            insulated: property.is_insulated(),
            total_price: property.total_price(),
            average_sqm_per_room: property.average_sqm_per_room(),
        })?;
    }

    writer
        .into_inner()
        .map_err(|e| RealtyError::IoError(e.into_error()))
}
