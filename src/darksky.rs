//! This module provides the main entry point for the forecast API client.
//! A [`DarkSky`] client builds request URLs, fetches forecast documents through a
//! [`Transport`], normalizes their timestamps and shapes them into tables.

use crate::error::DarkSkyError;
use crate::types::block::{Block, Units};
use crate::types::response::{Forecast, NormalizedResponse, RawResponse};
use crate::types::timestamp_zone::TimestampZone;
use crate::types::traits::request_time::REQUEST_TIME_FORMAT;
use crate::utils::{api_key_from_var, redact_key};
use crate::weather_data::frames::records_to_frame;
use crate::weather_data::normalizer::normalize;
use crate::weather_data::transport::{HttpTransport, Transport};
use bon::bon;
use chrono::{NaiveDateTime, NaiveTime};
use log::info;
use polars::prelude::DataFrame;
use std::fmt;

/// Scheme and host used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.darksky.net";

/// Environment variable read by [`DarkSky::from_env`].
pub const API_KEY_ENV: &str = "DARKSKY_API_KEY";

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Coordinates are sent to the API as given; they are not validated.
///
/// # Examples
///
/// ```
/// use darksky::LatLon;
///
/// let golden_gate = LatLon(37.8, -122.4);
/// assert_eq!(golden_gate.0, 37.8); // Latitude
/// assert_eq!(golden_gate.1, -122.4); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The forecast API client.
///
/// Holds the API key and request options for its whole lifetime. Every method
/// blocks until its request (or, for [`DarkSky::hourly_range`], all of its requests)
/// completes.
///
/// # Examples
///
/// ```no_run
/// use darksky::{DarkSky, DarkSkyError, LatLon};
///
/// # fn main() -> Result<(), DarkSkyError> {
/// let client = DarkSky::new("your-api-key");
/// let forecast = client.current_data(LatLon(37.8, -122.4))?;
/// println!("{}", forecast.hourly.head(Some(5)));
/// # Ok(())
/// # }
/// ```
pub struct DarkSky {
    api_key: String,
    base_url: String,
    query: String,
    timestamps: TimestampZone,
    transport: Box<dyn Transport>,
}

#[bon]
impl DarkSky {
    /// Creates a client for `api_key` with default settings: the public endpoint,
    /// timestamps rendered in local time, no extra query parameters and an
    /// [`HttpTransport`].
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::configure(api_key).build()
    }

    /// Creates a client with the API key taken from the `DARKSKY_API_KEY`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`DarkSkyError::MissingApiKey`] when the variable is unset or blank.
    pub fn from_env() -> Result<Self, DarkSkyError> {
        Ok(Self::new(Self::api_key_from_env()?))
    }

    /// Reads the API key from the `DARKSKY_API_KEY` environment variable, for use
    /// with [`DarkSky::configure`]. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`DarkSkyError::MissingApiKey`] when the variable is unset or blank.
    pub fn api_key_from_env() -> Result<String, DarkSkyError> {
        api_key_from_var(API_KEY_ENV)
    }

    /// Starts a builder for a client with custom settings.
    ///
    /// Call `DarkSky::configure(api_key)`, then any of the optional setters, then
    /// `.build()`.
    ///
    /// # Optional Builder Methods
    ///
    /// * `.base_url(impl Into<String>)`: scheme and host of the API, defaults to
    ///   [`DEFAULT_BASE_URL`]. Useful for compatible mirrors.
    /// * `.timestamps(TimestampZone)`: clock used to render epoch timestamps, and to
    ///   pick "today" in [`DarkSky::hourly_weather`]. Defaults to local time.
    /// * `.units(Units)`: adds `units=<value>` to every request.
    /// * `.language(impl Into<String>)`: adds `lang=<value>` to every request.
    /// * `.exclude(Vec<Block>)`: adds `exclude=<blocks>`. Excluding
    ///   [`Block::Currently`] makes every request fail with
    ///   [`DarkSkyError::MissingKey`].
    /// * `.extend_hourly(bool)`: adds `extend=hourly`.
    /// * `.transport(Box<dyn Transport>)`: replaces the HTTP transport.
    ///
    /// # Example
    ///
    /// ```
    /// use darksky::{Block, DarkSky, TimestampZone, Units};
    ///
    /// let client = DarkSky::configure("your-api-key")
    ///     .timestamps(TimestampZone::Utc)
    ///     .units(Units::Si)
    ///     .exclude(vec![Block::Minutely, Block::Flags])
    ///     .build();
    /// # drop(client);
    /// ```
    #[builder(start_fn = configure, finish_fn = build)]
    #[doc(hidden)]
    pub fn build_configured(
        #[builder(start_fn, into)] api_key: String,
        #[builder(into)] base_url: Option<String>,
        timestamps: Option<TimestampZone>,
        units: Option<Units>,
        #[builder(into)] language: Option<String>,
        #[builder(default)] exclude: Vec<Block>,
        #[builder(default)] extend_hourly: bool,
        transport: Option<Box<dyn Transport>>,
    ) -> Self {
        let base_url = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(units) = units {
            params.push(("units", units.query_value().to_string()));
        }
        if let Some(language) = language {
            params.push(("lang", urlencoding::encode(&language).into_owned()));
        }
        if !exclude.is_empty() {
            let blocks: Vec<&str> = exclude.iter().map(Block::key).collect();
            params.push(("exclude", blocks.join(",")));
        }
        if extend_hourly {
            params.push(("extend", "hourly".to_string()));
        }
        let query = params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        Self {
            api_key,
            base_url,
            query,
            timestamps: timestamps.unwrap_or_default(),
            transport: transport.unwrap_or_else(|| Box::new(HttpTransport::new())),
        }
    }

    /// Fetches the forecast document for `location`, optionally at a past or future
    /// `time` (a time machine request), and normalizes its timestamps.
    ///
    /// # Errors
    ///
    /// * [`DarkSkyError::Transport`] if the request fails or the body is not JSON.
    /// * [`DarkSkyError::MissingKey`] / [`DarkSkyError::InvalidTimestamp`] if the
    ///   document has no usable `currently.time`.
    pub fn make_request(
        &self,
        location: LatLon,
        time: Option<NaiveDateTime>,
    ) -> Result<NormalizedResponse, DarkSkyError> {
        let url = self.request_url(location, time);
        let redacted = redact_key(&url, &self.api_key);
        info!("Requesting forecast from {}", redacted);

        let document = self
            .transport
            .get_json(&url)
            .map_err(|source| DarkSkyError::Transport {
                url: redacted,
                source,
            })?;
        normalize(RawResponse::new(document), self.timestamps)
    }

    /// Fetches the current forecast for `location` and shapes it into a [`Forecast`]:
    /// current conditions and alerts as JSON, minutely, hourly and daily data as
    /// tables. Blocks missing from the response become an empty list or table.
    pub fn current_data(&self, location: LatLon) -> Result<Forecast, DarkSkyError> {
        let response = self.make_request(location, None)?;
        Forecast::from_response(&response)
    }

    /// Fetches the current forecast for `location` without shaping it.
    pub fn current_data_raw(&self, location: LatLon) -> Result<NormalizedResponse, DarkSkyError> {
        self.make_request(location, None)
    }

    /// Fetches the hourly data for the day starting at `time`, as a table with one
    /// row per hour the API reported.
    ///
    /// Without `time`, today at `00:00:00` is used, "today" being read from the
    /// configured [`TimestampZone`] clock.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`DarkSky::make_request`], returns
    /// [`DarkSkyError::MissingKey`] when the response has no `hourly.data`.
    pub fn hourly_weather(
        &self,
        location: LatLon,
        time: Option<NaiveDateTime>,
    ) -> Result<DataFrame, DarkSkyError> {
        let time = time.unwrap_or_else(|| self.start_of_today());
        self.hourly_at(location, time)
    }

    pub(crate) fn hourly_at(
        &self,
        location: LatLon,
        time: NaiveDateTime,
    ) -> Result<DataFrame, DarkSkyError> {
        let response = self.make_request(location, Some(time))?;
        let records = response
            .records(Block::Hourly)
            .ok_or_else(|| DarkSkyError::MissingKey("hourly.data".to_string()))?;
        records_to_frame(records, Block::Hourly.key())
    }

    fn start_of_today(&self) -> NaiveDateTime {
        self.timestamps.today().and_time(NaiveTime::MIN)
    }

    fn request_url(&self, location: LatLon, time: Option<NaiveDateTime>) -> String {
        let mut url = format!(
            "{}/forecast/{}/{},{}",
            self.base_url, self.api_key, location.0, location.1
        );
        if let Some(time) = time {
            url.push(',');
            url.push_str(&time.format(REQUEST_TIME_FORMAT).to_string());
        }
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query);
        }
        url
    }
}

impl fmt::Debug for DarkSky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DarkSky")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("query", &self.query)
            .field("timestamps", &self.timestamps)
            .finish_non_exhaustive()
    }
}
