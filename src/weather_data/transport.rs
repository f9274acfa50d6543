use crate::weather_data::error::TransportError;
use log::warn;
use reqwest::blocking::Client;
use serde_json::Value;

/// Fetches a JSON document for a fully formed request URL.
///
/// [`HttpTransport`] is the production implementation. Anything else that can
/// answer a GET with JSON (a recorded fixture, a proxy) can stand in for it through
/// [`crate::DarkSky::configure`].
pub trait Transport: Send + Sync {
    fn get_json(&self, url: &str) -> Result<Value, TransportError>;
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client, e.g. one with a proxy or a custom timeout.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| TransportError::NetworkRequest(e.without_url()))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                // The URL embeds the API key.
                let e = e.without_url();
                warn!("Forecast request failed: {}", e);
                return Err(match e.status() {
                    Some(status) => TransportError::HttpStatus { status, source: e },
                    None => TransportError::NetworkRequest(e),
                });
            }
        };

        let body = response
            .text()
            .map_err(|e| TransportError::BodyRead(e.without_url()))?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::net::TcpListener;
    use tokio::runtime::{Builder, Runtime};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FORECAST_PATH: &str = "/forecast/test-key/37.8,-122.4";

    /// Starts a mock API answering one GET on [`FORECAST_PATH`] with `response`.
    ///
    /// The runtime must outlive the server; the blocking transport is called from the
    /// test thread, outside the runtime.
    fn mock_api(response: ResponseTemplate) -> (Runtime, MockServer) {
        let runtime = Builder::new_multi_thread().enable_all().build().unwrap();
        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path(FORECAST_PATH))
                .respond_with(response)
                .expect(1)
                .mount(&server)
                .await;
            server
        });
        (runtime, server)
    }

    fn forecast_url(server: &MockServer) -> String {
        format!("{}{}", server.uri(), FORECAST_PATH)
    }

    #[test]
    fn parses_json_body() {
        let (_runtime, server) = mock_api(
            ResponseTemplate::new(200).set_body_json(json!({ "currently": { "time": 1577836800 } })),
        );

        let value = HttpTransport::new().get_json(&forecast_url(&server)).unwrap();

        assert_eq!(value["currently"]["time"], 1_577_836_800);
    }

    #[test]
    fn non_success_status_is_reported() {
        let (_runtime, server) = mock_api(
            ResponseTemplate::new(403).set_body_json(json!({ "error": "permission denied" })),
        );

        match HttpTransport::new().get_json(&forecast_url(&server)) {
            Err(TransportError::HttpStatus { status, source }) => {
                assert_eq!(status.as_u16(), 403);
                assert!(source.url().is_none());
            }
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        let (_runtime, server) =
            mock_api(ResponseTemplate::new(200).set_body_raw("<html>busy</html>", "text/html"));

        assert!(matches!(
            HttpTransport::new().get_json(&forecast_url(&server)),
            Err(TransportError::JsonParse(_))
        ));
    }

    #[test]
    fn unreachable_host_is_a_network_error() {
        // Bind then drop to get a port nothing listens on.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        match HttpTransport::new().get_json(&format!("http://127.0.0.1:{port}{FORECAST_PATH}")) {
            Err(TransportError::NetworkRequest(source)) => assert!(source.url().is_none()),
            other => panic!("expected NetworkRequest, got {other:?}"),
        }
    }
}
