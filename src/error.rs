use crate::weather_data::error::TransportError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DarkSkyError {
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to parse '{input}', expected format YYYY-MM-DDTHH:MM:SS")]
    TimeParse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Time {0} cannot be advanced by another day")]
    TimeOverflow(chrono::NaiveDateTime),

    #[error("Required key '{0}' missing from response")]
    MissingKey(String),

    #[error("Field '{field}' holds {value}, which is not a valid epoch timestamp")]
    InvalidTimestamp { field: String, value: String },

    #[error("Record {index} of '{section}' is not a JSON object")]
    MalformedRecord { section: String, index: usize },

    #[error("Failed processing DataFrame: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("No API key found in environment variable {0}")]
    MissingApiKey(&'static str),
}
