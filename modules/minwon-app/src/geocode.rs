use async_trait::async_trait;
use kakao_client::KakaoClient;
use minwon_common::MinwonError;

/// Placeholder shown when the geocoding call itself failed.
pub const ADDRESS_CONVERSION_FAILED: &str = "Address conversion failed";

/// Placeholder shown when the service has no address for the spot.
pub const NO_ADDRESS_INFO: &str = "No address information";

/// Outcome of a coordinate lookup. `address` is always non-empty; a
/// failed or empty lookup yields a placeholder plus a user-facing warning.
#[derive(Debug, Clone)]
pub struct ResolvedAddress {
    pub address: String,
    pub warning: Option<String>,
}

impl ResolvedAddress {
    fn found(address: String) -> Self {
        Self { address, warning: None }
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Total function: never fails, always returns a displayable string.
    async fn resolve_address(&self, lat: f64, lng: f64) -> ResolvedAddress;
}

pub struct KakaoGeocoder {
    client: KakaoClient,
}

impl KakaoGeocoder {
    pub fn new(api_key: String) -> Self {
        Self { client: KakaoClient::new(api_key) }
    }

    async fn lookup(&self, lat: f64, lng: f64) -> Result<Option<String>, MinwonError> {
        self.client
            .coord_to_address(lat, lng)
            .await
            .map_err(|e| MinwonError::Geocoding(e.to_string()))
    }
}

#[async_trait]
impl Geocoder for KakaoGeocoder {
    async fn resolve_address(&self, lat: f64, lng: f64) -> ResolvedAddress {
        let result = self.lookup(lat, lng).await;
        if let Err(e) = &result {
            tracing::warn!(lat, lng, error = %e, "Address lookup failed");
        }
        classify(result)
    }
}

/// Normalize a lookup outcome into a displayable address. Total: every
/// branch produces a non-empty string.
fn classify(result: Result<Option<String>, MinwonError>) -> ResolvedAddress {
    match result {
        Ok(Some(name)) => ResolvedAddress::found(name),
        Ok(None) => ResolvedAddress {
            address: NO_ADDRESS_INFO.to_string(),
            warning: Some(
                "This spot has no address information. Please select another location."
                    .to_string(),
            ),
        },
        Err(e) => ResolvedAddress {
            address: ADDRESS_CONVERSION_FAILED.to_string(),
            warning: Some(format!("Address lookup failed: {e}")),
        },
    }
}
