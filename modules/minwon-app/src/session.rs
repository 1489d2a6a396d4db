// Explicit session context + action dispatch.
//
// One `Session` replaces the implicit per-session state of a reactive UI:
// the cached complaint list, the map selection, and the durability
// capability all live here, and every user interaction arrives as one
// `Action` through `dispatch`. The cache is rebuilt wholesale from the
// store after every accepted mutation, never patched in place.

use std::sync::Arc;

use uuid::Uuid;

use minwon_common::{Complaint, GeoPoint};

use crate::form::{validate, ComplaintDraft, ValidationError};
use crate::geocode::Geocoder;
use crate::map::MapView;
use crate::store::ComplaintStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SubmitNew,
    ViewAll,
    ViewRanking,
    Refresh,
}

#[derive(Debug, Clone)]
pub enum Action {
    SelectMode(Mode),
    MapClicked { lat: f64, lng: f64 },
    Submit(ComplaintDraft),
    Like(Uuid),
    Resolve(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// User-facing message queued during dispatch and drained by the renderer.
#[derive(Debug, Clone)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// What a dispatched action did to the session.
#[derive(Debug, Clone)]
pub enum Outcome {
    ModeChanged(Mode),
    Selected { point: GeoPoint, address: String },
    SelectionUnchanged,
    Submitted { id: Uuid, durable: bool },
    Rejected(Vec<ValidationError>),
    Liked(Uuid),
    Resolved(Uuid),
    Refreshed { count: usize },
    NotFound(Uuid),
    StoreUnavailable,
    StoreFailed,
}

pub struct Session {
    mode: Mode,
    complaints: Vec<Complaint>,
    durable: bool,
    map: MapView,
    notices: Vec<Notice>,
    store: Option<Arc<dyn ComplaintStore>>,
    geocoder: Arc<dyn Geocoder>,
}

impl Session {
    /// Create the session context and populate the cache once. A store
    /// that is configured but unreachable leaves an empty, non-durable
    /// session with a warning; the list itself is never an error.
    pub async fn start(store: Option<Arc<dyn ComplaintStore>>, geocoder: Arc<dyn Geocoder>) -> Self {
        let mut session = Self {
            mode: Mode::ViewAll,
            complaints: Vec::new(),
            durable: false,
            map: MapView::default(),
            notices: Vec::new(),
            store,
            geocoder,
        };

        match session.store.clone() {
            Some(store) => match store.load_all().await {
                Ok(rows) => {
                    tracing::info!(count = rows.len(), "Session started with durable store");
                    session.complaints = rows;
                    session.durable = true;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Store unreachable at session start");
                    session.warn(
                        "Could not reach the complaint spreadsheet. \
                         New complaints will only last for this session.",
                    );
                }
            },
            None => {
                session.warn(
                    "No spreadsheet bridge configured. \
                     New complaints will only last for this session.",
                );
            }
        }
        session
    }

    pub async fn dispatch(&mut self, action: Action) -> Outcome {
        match action {
            Action::SelectMode(mode) => self.select_mode(mode).await,
            Action::MapClicked { lat, lng } => self.map_clicked(lat, lng).await,
            Action::Submit(draft) => self.submit(draft).await,
            Action::Like(id) => self.like(id).await,
            Action::Resolve(id) => self.resolve(id).await,
        }
    }

    // --- Accessors ---

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn complaints(&self) -> &[Complaint] {
        &self.complaints
    }

    pub fn complaint(&self, id: Uuid) -> Option<&Complaint> {
        self.complaints.iter().find(|c| c.id == id)
    }

    pub fn durable(&self) -> bool {
        self.durable
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // --- Mode transitions ---

    /// Only entering Refresh has a side effect: it reloads the cache.
    async fn select_mode(&mut self, mode: Mode) -> Outcome {
        self.mode = mode;
        if mode == Mode::Refresh {
            return self.reload().await;
        }
        Outcome::ModeChanged(mode)
    }

    async fn reload(&mut self) -> Outcome {
        let Some(store) = self.store.clone() else {
            self.error("No spreadsheet bridge configured; nothing to refresh.");
            return Outcome::StoreUnavailable;
        };
        match store.load_all().await {
            Ok(rows) => {
                let count = rows.len();
                self.complaints = rows;
                self.durable = true;
                self.info(format!("Reloaded {count} complaints."));
                Outcome::Refreshed { count }
            }
            Err(e) => {
                // Keep the existing cache untouched.
                tracing::warn!(error = %e, "Refresh failed");
                self.error(format!("Could not reload complaints: {e}"));
                Outcome::StoreFailed
            }
        }
    }

    // --- Map ---

    async fn map_clicked(&mut self, lat: f64, lng: f64) -> Outcome {
        let geocoder = self.geocoder.clone();
        match self.map.handle_click(lat, lng, geocoder.as_ref()).await {
            Some(resolved) => {
                if let Some(warning) = &resolved.warning {
                    self.warn(warning.clone());
                }
                Outcome::Selected {
                    point: GeoPoint { lat, lng },
                    address: resolved.address,
                }
            }
            None => Outcome::SelectionUnchanged,
        }
    }

    // --- Submission ---

    async fn submit(&mut self, draft: ComplaintDraft) -> Outcome {
        let errors = validate(&draft, self.map.selected);
        if !errors.is_empty() {
            for error in &errors {
                self.error(error.to_string());
            }
            return Outcome::Rejected(errors);
        }

        let point = match self.map.selected {
            Some(point) => point,
            None => return Outcome::Rejected(vec![ValidationError::NoCoordinate]),
        };
        let complaint = Complaint::new(
            draft.title,
            draft.content,
            draft.category,
            draft.date,
            point,
            draft.author,
        );
        let id = complaint.id;

        let Some(store) = self.durable_store() else {
            self.complaints.push(complaint);
            self.warn("Saved for this session only; the spreadsheet is not connected.");
            return Outcome::Submitted { id, durable: false };
        };
        if let Err(e) = store.append(&complaint).await {
            tracing::warn!(error = %e, "Append failed; keeping complaint session-only");
            self.complaints.push(complaint);
            self.warn(format!(
                "Could not write to the spreadsheet ({e}); the complaint is kept for this session only."
            ));
            return Outcome::Submitted { id, durable: false };
        }

        match store.load_all().await {
            Ok(rows) => self.complaints = rows,
            Err(e) => {
                // The append succeeded; fall back to the local copy until
                // the next successful reload.
                tracing::warn!(error = %e, "Reload after append failed");
                self.complaints.push(complaint);
                self.warn(format!("Complaint saved, but the list could not be reloaded: {e}"));
            }
        }
        self.info("Complaint submitted.");
        Outcome::Submitted { id, durable: true }
    }

    // --- Like / resolve ---

    async fn like(&mut self, id: Uuid) -> Outcome {
        if self.complaint(id).is_none() {
            self.error(format!("Unknown complaint: {id}"));
            return Outcome::NotFound(id);
        }
        let Some(store) = self.durable_store() else {
            self.warn("The spreadsheet is not connected, so likes cannot be recorded.");
            return Outcome::StoreUnavailable;
        };
        match store.increment_like(id).await {
            Ok(()) => {
                self.reload_after_mutation("like").await;
                Outcome::Liked(id)
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "Like increment failed");
                self.error(format!("Could not record the like: {e}"));
                Outcome::StoreFailed
            }
        }
    }

    async fn resolve(&mut self, id: Uuid) -> Outcome {
        let Some(complaint) = self.complaint(id) else {
            self.error(format!("Unknown complaint: {id}"));
            return Outcome::NotFound(id);
        };
        if complaint.is_resolved() {
            self.info("This complaint is already resolved.");
            return Outcome::Resolved(id);
        }
        let Some(store) = self.durable_store() else {
            self.warn("The spreadsheet is not connected, so the status cannot be changed.");
            return Outcome::StoreUnavailable;
        };
        match store.mark_resolved(id).await {
            Ok(()) => {
                self.reload_after_mutation("resolve").await;
                self.info("Complaint marked as resolved.");
                Outcome::Resolved(id)
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "Resolve failed");
                self.error(format!("Could not change the status: {e}"));
                Outcome::StoreFailed
            }
        }
    }

    fn durable_store(&self) -> Option<Arc<dyn ComplaintStore>> {
        if self.durable { self.store.clone() } else { None }
    }

    /// Reload-after-write. A failed reload leaves the stale cache in
    /// place with a warning; the mutation itself already happened.
    async fn reload_after_mutation(&mut self, action: &str) {
        let Some(store) = self.store.clone() else { return };
        match store.load_all().await {
            Ok(rows) => self.complaints = rows,
            Err(e) => {
                tracing::warn!(action, error = %e, "Reload after mutation failed");
                self.warn(format!("The change was saved but the list could not be reloaded: {e}"));
            }
        }
    }

    // --- Notices ---

    fn info(&mut self, message: impl Into<String>) {
        self.notices.push(Notice { severity: Severity::Info, message: message.into() });
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.notices.push(Notice { severity: Severity::Warning, message: message.into() });
    }

    fn error(&mut self, message: impl Into<String>) {
        self.notices.push(Notice { severity: Severity::Error, message: message.into() });
    }
}
