// Trait abstraction over the spreadsheet bridge.
//
// All durable writes flow through these four whole-operation calls; the
// session never patches its cache, it reloads. Mock impls in `testing`
// keep the session tests off the network.

use async_trait::async_trait;
use minwon_common::{Complaint, MinwonError};
use uuid::Uuid;

#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Read every durable complaint row.
    async fn load_all(&self) -> Result<Vec<Complaint>, MinwonError>;

    /// Append one new complaint row.
    async fn append(&self, complaint: &Complaint) -> Result<(), MinwonError>;

    /// Atomic like increment, performed by the bridge.
    async fn increment_like(&self, id: Uuid) -> Result<(), MinwonError>;

    /// One-way unresolved → resolved flip, idempotent bridge-side.
    async fn mark_resolved(&self, id: Uuid) -> Result<(), MinwonError>;
}

#[async_trait]
impl ComplaintStore for sheets_client::SheetsClient {
    async fn load_all(&self) -> Result<Vec<Complaint>, MinwonError> {
        self.load_all()
            .await
            .map_err(|e| MinwonError::Persistence(e.to_string()))
    }

    async fn append(&self, complaint: &Complaint) -> Result<(), MinwonError> {
        self.append(complaint)
            .await
            .map_err(|e| MinwonError::Persistence(e.to_string()))
    }

    async fn increment_like(&self, id: Uuid) -> Result<(), MinwonError> {
        self.increment_like(id)
            .await
            .map_err(|e| MinwonError::Persistence(e.to_string()))
    }

    async fn mark_resolved(&self, id: Uuid) -> Result<(), MinwonError> {
        self.mark_resolved(id)
            .await
            .map_err(|e| MinwonError::Persistence(e.to_string()))
    }
}
