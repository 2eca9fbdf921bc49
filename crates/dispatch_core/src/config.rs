use serde::{Deserialize, Serialize};

/// Default assumed shuttle arrival window for an empty queue: 10 minutes.
const DEFAULT_ARRIVAL_OFFSET_SECS: i64 = 600;

/// Default distance-matrix endpoint.
const DEFAULT_MATRIX_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Default HTTP timeout for matrix requests.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Chain-scheduling behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds the shuttle is assumed to need to reach any pickup when the
    /// queue is empty. A service-level assumption, not a derived value.
    pub arrival_offset_secs: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            arrival_offset_secs: DEFAULT_ARRIVAL_OFFSET_SECS,
        }
    }
}

/// Connection settings for the travel-time matrix service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixApiConfig {
    /// Base URL of the distance-matrix endpoint.
    pub endpoint: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Request timeout in seconds. The service may hang; every query
    /// resolves within this bound.
    pub timeout_secs: u64,
}

impl MatrixApiConfig {
    /// Settings for the public endpoint with the given API key.
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_MATRIX_ENDPOINT.to_string(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheduler_default_offset_is_ten_minutes() {
        assert_eq!(SchedulerConfig::default().arrival_offset_secs, 600);
    }

    #[test]
    fn with_key_uses_public_endpoint() {
        let config = MatrixApiConfig::with_key("secret");
        assert_eq!(config.api_key, "secret");
        assert!(config.endpoint.starts_with("https://"));
        assert_eq!(config.timeout_secs, 5);
    }
}
