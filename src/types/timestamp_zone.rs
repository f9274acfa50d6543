use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

pub(crate) const NORMALIZED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The clock used to render epoch timestamps as `YYYY-MM-DD HH:MM` strings.
///
/// The formatted strings carry no offset, so callers must know which clock
/// produced them. `Local` uses the time zone of the machine running the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimestampZone {
    #[default]
    Local,
    Utc,
}

impl TimestampZone {
    /// Formats whole epoch seconds, or `None` when the value is outside chrono's range.
    pub fn format_epoch(self, seconds: i64) -> Option<String> {
        match self {
            TimestampZone::Local => Local
                .timestamp_opt(seconds, 0)
                .earliest()
                .map(|dt| dt.format(NORMALIZED_FORMAT).to_string()),
            TimestampZone::Utc => DateTime::<Utc>::from_timestamp(seconds, 0)
                .map(|dt| dt.format(NORMALIZED_FORMAT).to_string()),
        }
    }

    /// Today's date on this clock.
    pub fn today(self) -> NaiveDate {
        match self {
            TimestampZone::Local => Local::now().date_naive(),
            TimestampZone::Utc => Utc::now().date_naive(),
        }
    }
}
