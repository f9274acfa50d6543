use crate::DarkSkyError;
use std::env;

const REDACTED: &str = "<api-key>";

/// Replaces the API key in a request URL so the URL can be logged or shown in errors.
pub(crate) fn redact_key(url: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        return url.to_string();
    }
    url.replace(api_key, REDACTED)
}

/// Reads a non-empty API key from the environment variable `name`.
pub(crate) fn api_key_from_var(name: &'static str) -> Result<String, DarkSkyError> {
    env::var(name)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(DarkSkyError::MissingApiKey(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_removed_from_url() {
        assert_eq!(
            redact_key("https://api.darksky.net/forecast/s3cr3t/37.8,-122.4", "s3cr3t"),
            "https://api.darksky.net/forecast/<api-key>/37.8,-122.4"
        );
        assert_eq!(redact_key("https://host/forecast//1,2", ""), "https://host/forecast//1,2");
    }

    #[test]
    fn api_key_comes_from_environment() {
        env::set_var("DARKSKY_TEST_KEY_PRESENT", " abc123 ");
        assert_eq!(api_key_from_var("DARKSKY_TEST_KEY_PRESENT").unwrap(), "abc123");

        env::set_var("DARKSKY_TEST_KEY_BLANK", "  ");
        assert!(matches!(
            api_key_from_var("DARKSKY_TEST_KEY_BLANK"),
            Err(DarkSkyError::MissingApiKey("DARKSKY_TEST_KEY_BLANK"))
        ));
        assert!(matches!(
            api_key_from_var("DARKSKY_TEST_KEY_UNSET"),
            Err(DarkSkyError::MissingApiKey(_))
        ));
    }
}
