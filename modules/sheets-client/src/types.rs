use minwon_common::Complaint;
use serde::Deserialize;

/// Envelope returned by `GET {base}/records`.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub records: Vec<Complaint>,
}

/// Acknowledgement returned by every mutating bridge call.
#[derive(Debug, Deserialize)]
pub struct Ack {
    pub status: String,
}

impl Ack {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minwon_common::{Category, Status};

    #[test]
    fn parses_a_bridge_row() {
        let body = r#"{
            "records": [{
                "id": "3f8b9a50-4c1e-4bb9-93a6-02f1d1a6e9ab",
                "title": "Illegal dumping by the river",
                "content": "Construction waste piled on the embankment path.",
                "date": "2024-02-14",
                "coordinates": {"lat": 37.5283, "lng": 126.9294},
                "author": "Lee",
                "category": "environment",
                "like_count": 3,
                "status": "unresolved",
                "submitted_at": "2024-02-14T09:30:00Z"
            }]
        }"#;
        let parsed: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.records.len(), 1);
        let row = &parsed.records[0];
        assert_eq!(row.category, Category::Environment);
        assert_eq!(row.status, Status::Unresolved);
        assert_eq!(row.like_count, 3);
        assert_eq!(row.coordinates.unwrap().lat, 37.5283);
    }

    #[test]
    fn row_without_author_is_anonymous() {
        let body = r#"{
            "records": [{
                "id": "3f8b9a50-4c1e-4bb9-93a6-02f1d1a6e9ab",
                "title": "Pothole",
                "content": "Deep pothole on the bus lane.",
                "date": "2024-02-14",
                "coordinates": {"lat": 37.5, "lng": 127.0},
                "category": "traffic",
                "like_count": 0,
                "status": "unresolved",
                "submitted_at": "2024-02-14T09:30:00Z"
            }]
        }"#;
        let parsed: ListResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.records[0].author.is_none());
    }

    #[test]
    fn empty_record_list_parses() {
        let parsed: ListResponse = serde_json::from_str(r#"{"records": []}"#).unwrap();
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn ack_status_check() {
        let ok: Ack = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(ok.is_ok());
        let err: Ack = serde_json::from_str(r#"{"status": "unknown_id"}"#).unwrap();
        assert!(!err.is_ok());
    }
}
