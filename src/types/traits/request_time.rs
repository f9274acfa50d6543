use crate::DarkSkyError;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};

/// Format of the time segment in a request URL, and of times accepted as strings.
pub const REQUEST_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Anything that resolves to the wall-clock time sent in a time machine request.
///
/// Zone-aware values contribute their wall-clock reading; the API interprets a
/// time without offset in the local time of the requested location.
pub trait RequestTime {
    fn request_time(self) -> Result<NaiveDateTime, DarkSkyError>;
}

/// Parses a `YYYY-MM-DDTHH:MM:SS` string.
///
/// # Examples
///
/// ```
/// use darksky::parse_request_time;
///
/// let time = parse_request_time("2020-06-01T00:00:00").unwrap();
/// assert_eq!(time.to_string(), "2020-06-01 00:00:00");
/// assert!(parse_request_time("2020-06-01").is_err());
/// ```
pub fn parse_request_time(input: &str) -> Result<NaiveDateTime, DarkSkyError> {
    NaiveDateTime::parse_from_str(input, REQUEST_TIME_FORMAT).map_err(|source| {
        DarkSkyError::TimeParse {
            input: input.to_string(),
            source,
        }
    })
}

impl RequestTime for NaiveDateTime {
    fn request_time(self) -> Result<NaiveDateTime, DarkSkyError> {
        Ok(self)
    }
}

impl RequestTime for NaiveDate {
    fn request_time(self) -> Result<NaiveDateTime, DarkSkyError> {
        Ok(self.and_time(chrono::NaiveTime::MIN))
    }
}

impl RequestTime for DateTime<Utc> {
    fn request_time(self) -> Result<NaiveDateTime, DarkSkyError> {
        Ok(self.naive_utc())
    }
}

impl RequestTime for DateTime<Local> {
    fn request_time(self) -> Result<NaiveDateTime, DarkSkyError> {
        Ok(self.naive_local())
    }
}

impl RequestTime for DateTime<FixedOffset> {
    fn request_time(self) -> Result<NaiveDateTime, DarkSkyError> {
        Ok(self.naive_local())
    }
}

impl RequestTime for &str {
    fn request_time(self) -> Result<NaiveDateTime, DarkSkyError> {
        parse_request_time(self)
    }
}

impl RequestTime for String {
    fn request_time(self) -> Result<NaiveDateTime, DarkSkyError> {
        parse_request_time(&self)
    }
}

impl RequestTime for &String {
    fn request_time(self) -> Result<NaiveDateTime, DarkSkyError> {
        parse_request_time(self)
    }
}
