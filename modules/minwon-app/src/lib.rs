pub mod form;
pub mod geocode;
pub mod listing;
pub mod map;
pub mod session;
pub mod stats;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use form::{ComplaintDraft, ValidationError};
pub use geocode::{Geocoder, KakaoGeocoder, ResolvedAddress};
pub use listing::{select, SortKey, StatusFilter};
pub use map::{overview_markers, MapView, Marker};
pub use session::{Action, Mode, Notice, Outcome, Session, Severity};
pub use store::ComplaintStore;
