pub mod error;
pub mod types;

pub use error::{KakaoError, Result};
pub use types::{AddressDocument, CoordToAddressResponse, NamedAddress};

use std::time::Duration;

const BASE_URL: &str = "https://dapi.kakao.com/v2/local/geo";

/// Budget for a single geocoding round-trip. A timed-out call surfaces
/// immediately; the caller retries by clicking the map again.
pub const GEOCODE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct KakaoClient {
    client: reqwest::Client,
    api_key: String,
}

impl KakaoClient {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(GEOCODE_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, api_key }
    }

    /// Resolve a coordinate to a human-readable address.
    ///
    /// Returns `Ok(None)` when the service has no address for the spot
    /// (empty `documents`). The first document wins; the road-form name is
    /// preferred over the parcel form. No retries.
    pub async fn coord_to_address(&self, lat: f64, lng: f64) -> Result<Option<String>> {
        let url = format!("{BASE_URL}/coord2address.json");
        let resp = self
            .client
            .get(&url)
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .query(&[("x", lng), ("y", lat)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(KakaoError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let parsed: CoordToAddressResponse = serde_json::from_str(&body)?;

        let name = parsed
            .documents
            .first()
            .and_then(|doc| doc.best_name())
            .map(String::from);
        tracing::debug!(lat, lng, found = name.is_some(), "Coordinate resolved");
        Ok(name)
    }
}
