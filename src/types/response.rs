//! Response documents returned by the forecast endpoint, before and after
//! timestamp normalization, and the shaped form handed to analysis code.

use crate::types::block::Block;
use crate::weather_data::frames::records_to_frame;
use crate::DarkSkyError;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A forecast document exactly as the API returned it.
///
/// Timestamps are epoch seconds. Only the `currently` block is guaranteed; the
/// other blocks depend on the location, the requested time and the `exclude` option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResponse(Value);

impl RawResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A forecast document whose timestamps have been rendered as `YYYY-MM-DD HH:MM`.
///
/// Only [`crate::normalize`] produces this type, so a normalized document cannot be
/// normalized a second time through the typed API. Unwrapping it with
/// [`NormalizedResponse::into_value`] and re-wrapping it as a [`RawResponse`] makes
/// normalization fail with [`crate::DarkSkyError::InvalidTimestamp`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedResponse(Value);

impl NormalizedResponse {
    pub(crate) fn from_normalized(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The `currently` record.
    pub fn currently(&self) -> Option<&Value> {
        self.block(Block::Currently)
    }

    /// Any top-level block, if the API returned it.
    pub fn block(&self, block: Block) -> Option<&Value> {
        self.0.get(block.key())
    }

    /// The `data` list of a data block (`minutely`, `hourly` or `daily`).
    pub fn records(&self, block: Block) -> Option<&[Value]> {
        self.block(block)?
            .get("data")?
            .as_array()
            .map(Vec::as_slice)
    }

    /// The `alerts` list, if present.
    pub fn alerts(&self) -> Option<&[Value]> {
        self.block(Block::Alerts)?.as_array().map(Vec::as_slice)
    }
}

/// A normalized forecast split into JSON parts and tables.
///
/// `current` and `alerts` keep their JSON form. The minutely, hourly and daily
/// records become one [`DataFrame`] each, with one row per record and one column per
/// field name seen in the block.
#[derive(Debug, Clone)]
pub struct Forecast {
    /// Active alerts; empty when the response carried none.
    pub alerts: Vec<Value>,
    /// Conditions at the time of the request.
    pub current: Value,
    /// Minute-by-minute precipitation for the next hour.
    pub minutely: DataFrame,
    /// Hour-by-hour conditions; for a time machine request, the requested day.
    pub hourly: DataFrame,
    /// Day-by-day conditions for the coming week.
    pub daily: DataFrame,
}

impl Forecast {
    /// Shapes a normalized document. Missing alerts become an empty list, missing
    /// data blocks become empty frames.
    ///
    /// # Errors
    ///
    /// Returns [`DarkSkyError::MalformedRecord`] when a data block holds a record that
    /// is not a JSON object.
    pub fn from_response(response: &NormalizedResponse) -> Result<Self, DarkSkyError> {
        let frame = |block: Block| {
            records_to_frame(response.records(block).unwrap_or_default(), block.key())
        };

        Ok(Self {
            alerts: response.alerts().map(<[Value]>::to_vec).unwrap_or_default(),
            current: response.currently().cloned().unwrap_or(Value::Null),
            minutely: frame(Block::Minutely)?,
            hourly: frame(Block::Hourly)?,
            daily: frame(Block::Daily)?,
        })
    }
}
