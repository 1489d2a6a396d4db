use minwon_common::{Complaint, GeoPoint};

use crate::geocode::{Geocoder, ResolvedAddress};

/// Seoul City Hall — where the map opens before any click.
pub const DEFAULT_CENTER: GeoPoint = GeoPoint { lat: 37.5665, lng: 126.9780 };
pub const DEFAULT_ZOOM: u8 = 12;

const POPUP_PREVIEW_CHARS: usize = 30;

/// Interactive-map state: the held center and the single most recent
/// click with its resolved address. No click history.
#[derive(Debug, Clone)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub selected: Option<GeoPoint>,
    pub address: String,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            selected: None,
            address: String::new(),
        }
    }
}

impl MapView {
    /// Handle a map click. Clicking the already-selected coordinate is a
    /// no-op that does not re-invoke the geocoder; otherwise the selection
    /// and center move to the click and the address is re-resolved.
    pub async fn handle_click(
        &mut self,
        lat: f64,
        lng: f64,
        geocoder: &dyn Geocoder,
    ) -> Option<ResolvedAddress> {
        let clicked = GeoPoint { lat, lng };
        if self.selected == Some(clicked) {
            return None;
        }
        self.selected = Some(clicked);
        self.center = clicked;
        let resolved = geocoder.resolve_address(lat, lng).await;
        self.address = resolved.address.clone();
        Some(resolved)
    }
}

/// One clustered marker on the overview map.
#[derive(Debug, Clone)]
pub struct Marker {
    pub position: GeoPoint,
    pub title: String,
    pub popup: String,
    pub color: &'static str,
}

/// Pure rendering input for the overview map: one marker per complaint
/// that has coordinates, colored by category. Records without coordinates
/// are skipped; an empty result means the caller shows a no-data notice.
pub fn overview_markers(complaints: &[Complaint]) -> Vec<Marker> {
    complaints
        .iter()
        .filter_map(|c| {
            let position = c.coordinates?;
            Some(Marker {
                position,
                title: c.title.clone(),
                popup: format!(
                    "{} [{}] {}",
                    c.title,
                    c.category,
                    content_preview(&c.content)
                ),
                color: c.category.marker_color(),
            })
        })
        .collect()
}

fn content_preview(content: &str) -> String {
    let preview: String = content.chars().take(POPUP_PREVIEW_CHARS).collect();
    if preview.len() < content.len() {
        format!("{preview}...")
    } else {
        preview
    }
}
