use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;

use crate::config::MatrixApiConfig;
use crate::geo::Coordinate;

use super::error::OracleError;
use super::parser::parse_matrix_response;
use super::response::MatrixResponse;
use super::{DurationMatrix, TravelTimeOracle};

/// Blocking HTTP client for the distance-matrix service.
///
/// Stateless: one GET per query, no retries, no caching. Transient
/// failures surface as [`OracleError::Unavailable`] and the caller
/// decides whether to retry the whole scheduling attempt.
#[derive(Debug, Clone)]
pub struct MatrixApiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl MatrixApiClient {
    /// Build a client from connection settings.
    ///
    /// # Panics
    ///
    /// Panics if the configured endpoint is not a valid URL or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &MatrixApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build matrix HTTP client");
        let endpoint =
            Url::parse(&config.endpoint).expect("matrix endpoint must be a valid URL");
        Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        }
    }

    /// `|`-joined `lat,lng` pairs, the service's list encoding.
    pub(super) fn query_value(coords: &[Coordinate]) -> String {
        coords
            .iter()
            .map(Coordinate::to_string)
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl TravelTimeOracle for MatrixApiClient {
    fn travel_times(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DurationMatrix, OracleError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("origins", &Self::query_value(origins))
            .append_pair("destinations", &Self::query_value(destinations))
            .append_pair("key", &self.api_key);

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(OracleError::Unavailable)?;

        let decoded: MatrixResponse = response
            .json()
            .map_err(|err| OracleError::Malformed(format!("undecodable body: {err}")))?;

        parse_matrix_response(decoded, origins.len(), destinations.len())
    }
}
