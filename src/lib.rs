mod clients;
mod darksky;
mod error;
mod types;
mod utils;
mod weather_data;

#[cfg(test)]
mod test_utils;

pub use darksky::*;
pub use error::DarkSkyError;

pub use types::block::{Block, Units};
pub use types::response::{Forecast, NormalizedResponse, RawResponse};
pub use types::timestamp_zone::TimestampZone;
pub use types::traits::request_time::{parse_request_time, RequestTime, REQUEST_TIME_FORMAT};

pub use weather_data::error::TransportError;
pub use weather_data::frames::{concat_frames, records_to_frame};
pub use weather_data::normalizer::normalize;
pub use weather_data::transport::{HttpTransport, Transport};
