pub mod error;
pub mod types;

pub use error::{Result, SheetsError};
pub use types::{Ack, ListResponse};

use std::time::Duration;

use minwon_common::Complaint;
use uuid::Uuid;

/// REST client for the spreadsheet bridge web app.
///
/// The bridge is the single writer of durable truth: it appends rows,
/// performs the atomic like increment, and flips the resolved flag. Every
/// operation here is whole-operation; there are no partial batches.
pub struct SheetsClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl SheetsClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        url::Url::parse(base_url)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let req = self.client.get(url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        let req = self.client.post(url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Fetch every complaint row the spreadsheet holds.
    pub async fn load_all(&self) -> Result<Vec<Complaint>> {
        let url = format!("{}/records", self.base_url);
        let resp = self.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let parsed: ListResponse = serde_json::from_str(&body)?;
        tracing::debug!(count = parsed.records.len(), "Loaded complaint rows");
        Ok(parsed.records)
    }

    /// Append one complaint as a new row.
    pub async fn append(&self, complaint: &Complaint) -> Result<()> {
        let url = format!("{}/records", self.base_url);
        let resp = self.post(&url).json(complaint).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let ack: Ack = serde_json::from_str(&resp.text().await?)?;
        if !ack.is_ok() {
            return Err(SheetsError::Bridge(ack.status));
        }
        tracing::info!(id = %complaint.id, "Appended complaint row");
        Ok(())
    }

    /// Atomically increment the like counter of one row. The increment
    /// happens bridge-side; callers re-read rather than patch locally.
    pub async fn increment_like(&self, id: Uuid) -> Result<()> {
        self.mutate(id, "like").await
    }

    /// Flip one row to resolved. Idempotent bridge-side.
    pub async fn mark_resolved(&self, id: Uuid) -> Result<()> {
        self.mutate(id, "resolve").await
    }

    async fn mutate(&self, id: Uuid, action: &str) -> Result<()> {
        let url = format!("{}/records/{}/{}", self.base_url, id, action);
        let resp = self.post(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let ack: Ack = serde_json::from_str(&resp.text().await?)?;
        if !ack.is_ok() {
            return Err(SheetsError::Bridge(ack.status));
        }
        tracing::info!(%id, action, "Row mutation acknowledged");
        Ok(())
    }
}
