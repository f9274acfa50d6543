//! Fakes shared by the unit tests.

use crate::weather_data::error::TransportError;
use crate::weather_data::transport::Transport;
use crate::{DarkSky, TimestampZone};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&str) -> Result<Value, TransportError> + Send + Sync>;

/// URLs requested through a [`FakeTransport`], shared with the test after the
/// transport has moved into a client.
#[derive(Clone, Default)]
pub(crate) struct RequestLog(Arc<Mutex<Vec<String>>>);

impl RequestLog {
    pub(crate) fn urls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub(crate) struct FakeTransport {
    respond: Responder,
    log: RequestLog,
}

impl FakeTransport {
    pub(crate) fn new(
        respond: impl Fn(&str) -> Result<Value, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            log: RequestLog::default(),
        }
    }

    /// A transport answering every request with `document`.
    pub(crate) fn replying(document: Value) -> (Self, RequestLog) {
        let transport = Self::new(move |_| Ok(document.clone()));
        let log = transport.log();
        (transport, log)
    }

    pub(crate) fn log(&self) -> RequestLog {
        self.log.clone()
    }
}

impl Transport for FakeTransport {
    fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        self.log.0.lock().unwrap().push(url.to_string());
        (self.respond)(url)
    }
}

/// A client with key `test-key` rendering timestamps in UTC.
pub(crate) fn client_with(transport: FakeTransport) -> DarkSky {
    DarkSky::configure("test-key")
        .timestamps(TimestampZone::Utc)
        .transport(Box::new(transport))
        .build()
}

/// A time machine response with `hours` hourly records starting at `start` epoch seconds.
pub(crate) fn hourly_day(start: i64, hours: i64) -> Value {
    let data: Vec<Value> = (0..hours)
        .map(|hour| {
            json!({
                "time": start + hour * 3600,
                "temperature": (10.0 + hour as f64 / 2.0),
                "precipIntensity": 0
            })
        })
        .collect();
    json!({
        "latitude": 37.8,
        "longitude": -122.4,
        "currently": { "time": start },
        "hourly": { "data": data }
    })
}

/// A transport error, as produced when the body is not JSON.
pub(crate) fn broken_body() -> TransportError {
    let error = serde_json::from_str::<Value>("<html>").unwrap_err();
    TransportError::JsonParse(error)
}
