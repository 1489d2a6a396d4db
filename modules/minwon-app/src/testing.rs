// Deterministic test doubles: no network, no spreadsheet, no Kakao.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use minwon_common::{Complaint, MinwonError};
use uuid::Uuid;

use crate::geocode::{Geocoder, ResolvedAddress};
use crate::store::ComplaintStore;

/// In-memory stand-in for the spreadsheet bridge.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Complaint>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Complaint>) -> Self {
        Self { rows: Mutex::new(rows) }
    }
}

#[async_trait]
impl ComplaintStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<Complaint>, MinwonError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn append(&self, complaint: &Complaint) -> Result<(), MinwonError> {
        self.rows.lock().unwrap().push(complaint.clone());
        Ok(())
    }

    async fn increment_like(&self, id: Uuid) -> Result<(), MinwonError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|c| c.id == id) {
            Some(row) => {
                row.like_count += 1;
                Ok(())
            }
            None => Err(MinwonError::Persistence(format!("unknown record id {id}"))),
        }
    }

    async fn mark_resolved(&self, id: Uuid) -> Result<(), MinwonError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|c| c.id == id) {
            Some(row) => {
                row.resolve();
                Ok(())
            }
            None => Err(MinwonError::Persistence(format!("unknown record id {id}"))),
        }
    }
}

/// A store whose every call fails, for unreachable-bridge paths.
pub struct FailingStore;

#[async_trait]
impl ComplaintStore for FailingStore {
    async fn load_all(&self) -> Result<Vec<Complaint>, MinwonError> {
        Err(MinwonError::Persistence("bridge unreachable".to_string()))
    }

    async fn append(&self, _complaint: &Complaint) -> Result<(), MinwonError> {
        Err(MinwonError::Persistence("bridge unreachable".to_string()))
    }

    async fn increment_like(&self, _id: Uuid) -> Result<(), MinwonError> {
        Err(MinwonError::Persistence("bridge unreachable".to_string()))
    }

    async fn mark_resolved(&self, _id: Uuid) -> Result<(), MinwonError> {
        Err(MinwonError::Persistence("bridge unreachable".to_string()))
    }
}

/// A working store with a switch that makes every later call fail, for
/// bridge-went-down-mid-session paths.
pub struct FlakyStore {
    inner: MemoryStore,
    failing: std::sync::atomic::AtomicBool,
}

impl FlakyStore {
    pub fn with_rows(rows: Vec<Complaint>) -> Self {
        Self {
            inner: MemoryStore::with_rows(rows),
            failing: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), MinwonError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(MinwonError::Persistence("bridge unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ComplaintStore for FlakyStore {
    async fn load_all(&self) -> Result<Vec<Complaint>, MinwonError> {
        self.check()?;
        self.inner.load_all().await
    }

    async fn append(&self, complaint: &Complaint) -> Result<(), MinwonError> {
        self.check()?;
        self.inner.append(complaint).await
    }

    async fn increment_like(&self, id: Uuid) -> Result<(), MinwonError> {
        self.check()?;
        self.inner.increment_like(id).await
    }

    async fn mark_resolved(&self, id: Uuid) -> Result<(), MinwonError> {
        self.check()?;
        self.inner.mark_resolved(id).await
    }
}

/// Geocoder returning a fixed address and counting invocations.
pub struct MockGeocoder {
    pub address: String,
    calls: AtomicUsize,
}

impl MockGeocoder {
    pub fn new(address: &str) -> Self {
        Self { address: address.to_string(), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn resolve_address(&self, _lat: f64, _lng: f64) -> ResolvedAddress {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ResolvedAddress { address: self.address.clone(), warning: None }
    }
}
