//! Renders the epoch timestamps of a forecast document as `YYYY-MM-DD HH:MM` strings.
//!
//! `currently.time` must be present. Every other block is optional: when a block
//! is missing or malformed its conversion stops at the first fault, the fault is
//! logged, and the rest of the document is still normalized. Records converted
//! before the fault keep their converted timestamps.

use crate::types::block::Block;
use crate::types::response::{NormalizedResponse, RawResponse};
use crate::types::timestamp_zone::TimestampZone;
use crate::DarkSkyError;
use log::{debug, warn};
use serde_json::Value;
use std::fmt;

const CURRENT_TIME_FIELD: &str = "currently.time";
const RECORD_FIELDS: &[&str] = &["time"];
const ALERT_FIELDS: &[&str] = &["time", "expires"];

/// Why conversion of an optional block stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SectionFault {
    Absent,
    NotAList,
    NotAnObject { index: usize },
    MissingField { index: usize, field: &'static str },
    BadTimestamp { index: usize, field: &'static str },
}

impl fmt::Display for SectionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionFault::Absent => write!(f, "block is absent"),
            SectionFault::NotAList => write!(f, "records are not a list"),
            SectionFault::NotAnObject { index } => write!(f, "record {index} is not an object"),
            SectionFault::MissingField { index, field } => {
                write!(f, "record {index} has no '{field}'")
            }
            SectionFault::BadTimestamp { index, field } => {
                write!(f, "record {index} has a non-numeric '{field}'")
            }
        }
    }
}

/// Normalizes a raw forecast document.
///
/// # Errors
///
/// Returns [`DarkSkyError::MissingKey`] when `currently.time` is absent and
/// [`DarkSkyError::InvalidTimestamp`] when it is not an epoch number (for example
/// because the document was already normalized). Problems in optional blocks are
/// never returned.
///
/// # Examples
///
/// ```
/// use darksky::{normalize, RawResponse, TimestampZone};
/// use serde_json::json;
///
/// let raw = RawResponse::new(json!({
///     "currently": { "time": 1577836800, "temperature": 3.5 },
///     "hourly": { "data": [{ "time": 1577840400 }] }
/// }));
/// let normalized = normalize(raw, TimestampZone::Utc).unwrap();
///
/// assert_eq!(normalized.as_value()["currently"]["time"], "2020-01-01 00:00");
/// assert_eq!(normalized.as_value()["hourly"]["data"][0]["time"], "2020-01-01 01:00");
/// ```
pub fn normalize(
    raw: RawResponse,
    zone: TimestampZone,
) -> Result<NormalizedResponse, DarkSkyError> {
    let mut document = raw.into_value();

    normalize_current_time(&mut document, zone)?;

    for block in Block::DATA_BLOCKS {
        let records = document
            .get_mut(block.key())
            .and_then(|section| section.get_mut("data"));
        report(block, convert_records(records, RECORD_FIELDS, zone));
    }

    let alerts = document.get_mut(Block::Alerts.key());
    report(Block::Alerts, convert_records(alerts, ALERT_FIELDS, zone));

    Ok(NormalizedResponse::from_normalized(document))
}

fn normalize_current_time(document: &mut Value, zone: TimestampZone) -> Result<(), DarkSkyError> {
    let slot = document
        .get_mut(Block::Currently.key())
        .and_then(|current| current.get_mut("time"))
        .ok_or_else(|| DarkSkyError::MissingKey(CURRENT_TIME_FIELD.to_string()))?;

    let formatted =
        format_timestamp(slot, zone).ok_or_else(|| DarkSkyError::InvalidTimestamp {
            field: CURRENT_TIME_FIELD.to_string(),
            value: slot.to_string(),
        })?;
    *slot = Value::String(formatted);
    Ok(())
}

/// Converts `fields` of every record in `list`, stopping at the first fault.
fn convert_records(
    list: Option<&mut Value>,
    fields: &[&'static str],
    zone: TimestampZone,
) -> Result<usize, SectionFault> {
    let records = list
        .ok_or(SectionFault::Absent)?
        .as_array_mut()
        .ok_or(SectionFault::NotAList)?;

    for (index, record) in records.iter_mut().enumerate() {
        let record = record
            .as_object_mut()
            .ok_or(SectionFault::NotAnObject { index })?;
        for &field in fields {
            let slot = record
                .get_mut(field)
                .ok_or(SectionFault::MissingField { index, field })?;
            let formatted = format_timestamp(slot, zone)
                .ok_or(SectionFault::BadTimestamp { index, field })?;
            *slot = Value::String(formatted);
        }
    }
    Ok(records.len())
}

fn report(block: Block, outcome: Result<usize, SectionFault>) {
    match outcome {
        Ok(count) => debug!("Normalized {} {} records", count, block),
        Err(SectionFault::Absent) => debug!("No {} block in response, skipping", block),
        Err(fault) => warn!("Stopped normalizing {} block: {}", block, fault),
    }
}

/// Epoch seconds, integer or fractional, rendered on `zone`'s clock.
fn format_timestamp(value: &Value, zone: TimestampZone) -> Option<String> {
    let seconds = match value.as_i64() {
        Some(seconds) => seconds,
        None => {
            let seconds = value.as_f64().filter(|s| s.is_finite())?;
            seconds.floor() as i64
        }
    };
    zone.format_epoch(seconds)
}
