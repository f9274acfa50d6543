//! Defines the top-level groupings ("blocks") of a forecast response and the
//! unit systems the forecast endpoint can report in.

use std::fmt;

/// A top-level grouping of a forecast response.
///
/// `Minutely`, `Hourly` and `Daily` are data blocks: objects holding a `data` list of
/// records. `Alerts` is a plain list of records. `Currently` is the single record
/// that every response carries, and `Flags` holds response metadata.
///
/// Blocks double as values for the `exclude` request option, see
/// [`crate::DarkSky::configure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    /// Conditions at the requested point in time.
    Currently,
    /// Minute-by-minute data for the next hour.
    Minutely,
    /// Hour-by-hour data, 48 hours for forecasts or the requested day for time machine requests.
    Hourly,
    /// Day-by-day data for the next week.
    Daily,
    /// Severe weather alerts issued for the location.
    Alerts,
    /// Response metadata (sources, units).
    Flags,
}

impl Block {
    /// Blocks shaped as `{ "data": [...] }`, in the order the normalizer visits them.
    pub(crate) const DATA_BLOCKS: [Block; 3] = [Block::Minutely, Block::Hourly, Block::Daily];

    pub(crate) fn key(&self) -> &'static str {
        match self {
            Block::Currently => "currently",
            Block::Minutely => "minutely",
            Block::Hourly => "hourly",
            Block::Daily => "daily",
            Block::Alerts => "alerts",
            Block::Flags => "flags",
        }
    }
}

/// Allows formatting a `Block` variant using its response key.
///
/// # Examples
///
/// ```
/// use darksky::Block;
///
/// assert_eq!(format!("{}", Block::Hourly), "hourly");
/// assert_eq!(Block::Alerts.to_string(), "alerts");
/// ```
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Unit system requested through the `units` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    /// Chosen by the API based on the location.
    #[default]
    Auto,
    /// SI, except wind speed in km/h.
    Ca,
    /// SI, except distances in miles and wind speed in mph.
    Uk2,
    /// Imperial units.
    Us,
    /// SI units.
    Si,
}

impl Units {
    pub(crate) fn query_value(&self) -> &'static str {
        match self {
            Units::Auto => "auto",
            Units::Ca => "ca",
            Units::Uk2 => "uk2",
            Units::Us => "us",
            Units::Si => "si",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.query_value())
    }
}
