use serde::Deserialize;

/// Response body of the coord2address endpoint. Only the fields this
/// client reads are modeled; everything else in the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct CoordToAddressResponse {
    #[serde(default)]
    pub documents: Vec<AddressDocument>,
}

#[derive(Debug, Deserialize)]
pub struct AddressDocument {
    /// Road-form address. Nullable in the wire format.
    #[serde(default)]
    pub road_address: Option<NamedAddress>,
    /// Parcel-form address.
    #[serde(default)]
    pub address: Option<NamedAddress>,
}

#[derive(Debug, Deserialize)]
pub struct NamedAddress {
    #[serde(default)]
    pub address_name: Option<String>,
}

impl AddressDocument {
    /// Road-form name when present and non-empty, otherwise the parcel form.
    pub fn best_name(&self) -> Option<&str> {
        let road = self
            .road_address
            .as_ref()
            .and_then(|a| a.address_name.as_deref())
            .filter(|name| !name.is_empty());
        road.or_else(|| {
            self.address
                .as_ref()
                .and_then(|a| a.address_name.as_deref())
                .filter(|name| !name.is_empty())
        })
    }
}
