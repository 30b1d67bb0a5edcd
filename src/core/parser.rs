use crate::domain::genre::{Genre, UnknownGenre};
use crate::domain::model::Ingestion;
use crate::domain::ports::Storage;
use crate::domain::property::{PanelProperty, Property, StandardProperty};
use crate::utils::error::{FormatError, FormatErrorKind, RealtyError};
use std::str::FromStr;

pub const FIELD_DELIMITER: char = '#';

const STANDARD_TAG: &str = "REALESTATE";
const PANEL_TAG: &str = "PANEL";
const STANDARD_FIELDS: usize = 6;
const PANEL_FIELDS: usize = 8;

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, FormatError> {
    raw.parse::<T>().map_err(|_| {
        FormatError::new(FormatErrorKind::InvalidNumber {
            field,
            value: raw.to_string(),
        })
    })
}

// NaN / inf 雖可解析，但不是合法的價格或房間數
fn parse_finite(field: &'static str, raw: &str) -> Result<f64, FormatError> {
    let value: f64 = parse_number(field, raw)?;
    if !value.is_finite() {
        return Err(FormatError::new(FormatErrorKind::InvalidNumber {
            field,
            value: raw.to_string(),
        }));
    }
    Ok(value)
}

/// Parses one `#`-delimited record into a property.
///
/// ```text
/// REALESTATE#<city>#<pricePerSqm>#<sqm>#<rooms>#<GENRE>
/// PANEL#<city>#<pricePerSqm>#<sqm>#<rooms>#<GENRE>#<floor>#<yes|no>
/// ```
///
/// Fields are trimmed; the tag and genre are case-insensitive and extra
/// trailing fields are ignored. The returned error has no line number.
pub fn parse_line(line: &str) -> Result<Property, FormatError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).map(str::trim).collect();

    let tag = fields[0].to_uppercase();
    let required = match tag.as_str() {
        STANDARD_TAG => STANDARD_FIELDS,
        PANEL_TAG => PANEL_FIELDS,
        _ => {
            return Err(FormatError::new(FormatErrorKind::UnknownTag(
                fields[0].to_string(),
            )))
        }
    };

    if fields.len() < required {
        return Err(FormatError::new(FormatErrorKind::MissingField {
            expected: required,
            found: fields.len(),
        }));
    }

    let city = fields[1];
    let price_per_sqm = parse_finite("price_per_sqm", fields[2])?;
    let sqm: u32 = parse_number("sqm", fields[3])?;
    let number_of_rooms = parse_finite("number_of_rooms", fields[4])?;
    let genre = Genre::from_str(fields[5])
        .map_err(|UnknownGenre(token)| FormatError::new(FormatErrorKind::UnknownGenre(token)))?;

    if required == STANDARD_FIELDS {
        return Ok(StandardProperty::new(city, price_per_sqm, sqm, number_of_rooms, genre).into());
    }

    let floor: i32 = parse_number("floor", fields[6])?;
    let is_insulated = fields[7].eq_ignore_ascii_case("yes");

    Ok(PanelProperty::new(
        city,
        price_per_sqm,
        sqm,
        number_of_rooms,
        genre,
        floor,
        is_insulated,
    )
    .into())
}

/// Parses every line, skipping (and recording) the ones that fail.
/// Blank lines are ignored without an error.
pub fn parse_all<I>(lines: I) -> Ingestion
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut ingestion = Ingestion::default();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let line_number = index + 1;

        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(property) => {
                if !ingestion.listings.insert(property) {
                    ingestion.duplicates += 1;
                }
            }
            Err(e) => {
                let e = e.at_line(line_number);
                tracing::warn!("⚠️ Skipping malformed record: {}", e);
                ingestion.errors.push(e);
            }
        }
    }

    tracing::debug!(
        "Parsed {} listings ({} rejected, {} duplicates)",
        ingestion.listings.len(),
        ingestion.errors.len(),
        ingestion.duplicates
    );

    ingestion
}

/// Reads `path` through `storage` and parses it.
///
/// An unreadable source is logged once and yields an empty ingestion with
/// `source_error` set.
pub async fn ingest_source<S: Storage>(storage: &S, path: &str) -> Ingestion {
    let bytes = match storage.read_file(path).await {
        Ok(bytes) => bytes,
        Err(e) => return source_unavailable(path, e),
    };

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            let io = std::io::Error::new(std::io::ErrorKind::InvalidData, e);
            return source_unavailable(path, RealtyError::IoError(io));
        }
    };

    parse_all(content.lines())
}

fn source_unavailable(path: &str, error: RealtyError) -> Ingestion {
    let error = match error {
        RealtyError::IoError(source) => RealtyError::SourceUnavailable {
            path: path.to_string(),
            source,
        },
        other => other,
    };
    tracing::error!("❌ {}", error);
    Ingestion::unavailable(error)
}
