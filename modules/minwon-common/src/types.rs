use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Geo Types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

// --- Enums ---

/// Closed set of complaint categories shown in the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Traffic,
    Environment,
    Facilities,
    Safety,
    Other,
}

impl Category {
    /// Every category, in form-picker order.
    pub const ALL: [Category; 5] = [
        Category::Traffic,
        Category::Environment,
        Category::Facilities,
        Category::Safety,
        Category::Other,
    ];

    /// Marker color for the overview map. Total over the closed set, so
    /// there is no unmapped-category fallback left to reach.
    pub fn marker_color(&self) -> &'static str {
        match self {
            Category::Traffic => "red",
            Category::Environment => "green",
            Category::Facilities => "blue",
            Category::Safety => "orange",
            Category::Other => "gray",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Traffic => write!(f, "traffic"),
            Category::Environment => write!(f, "environment"),
            Category::Facilities => write!(f, "facilities"),
            Category::Safety => write!(f, "safety"),
            Category::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Unresolved,
    Resolved,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Unresolved => write!(f, "unresolved"),
            Status::Resolved => write!(f, "resolved"),
        }
    }
}

// --- Complaint record ---

/// Display label used when a submitter leaves the author field blank.
pub const ANONYMOUS_AUTHOR: &str = "anonymous";

/// A single civic complaint. The spreadsheet bridge owns the durable copy;
/// in-memory lists are a disposable cache rebuilt by full reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// User-picked calendar date, distinct from the submission instant.
    pub date: NaiveDate,
    pub coordinates: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub category: Category,
    pub like_count: u32,
    pub status: Status,
    pub submitted_at: DateTime<Utc>,
}

impl Complaint {
    pub fn new(
        title: String,
        content: String,
        category: Category,
        date: NaiveDate,
        coordinates: GeoPoint,
        author: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            date,
            coordinates: Some(coordinates),
            author: author.filter(|a| !a.trim().is_empty()),
            category,
            like_count: 0,
            status: Status::Unresolved,
            submitted_at: Utc::now(),
        }
    }

    /// One-way transition. Resolving an already-resolved complaint is a no-op.
    pub fn resolve(&mut self) {
        self.status = Status::Resolved;
    }

    pub fn is_resolved(&self) -> bool {
        self.status == Status::Resolved
    }

    pub fn author_display(&self) -> &str {
        self.author.as_deref().unwrap_or(ANONYMOUS_AUTHOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(author: Option<&str>) -> Complaint {
        Complaint::new(
            "Broken streetlight".to_string(),
            "The light at the corner has been out for a week.".to_string(),
            Category::Facilities,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            GeoPoint { lat: 37.5665, lng: 126.9780 },
            author.map(String::from),
        )
    }

    #[test]
    fn new_complaint_starts_unresolved_with_zero_likes() {
        let c = sample(None);
        assert_eq!(c.like_count, 0);
        assert_eq!(c.status, Status::Unresolved);
        assert!(c.coordinates.is_some());
    }

    #[test]
    fn blank_author_becomes_anonymous() {
        assert_eq!(sample(None).author_display(), ANONYMOUS_AUTHOR);
        assert_eq!(sample(Some("   ")).author_display(), ANONYMOUS_AUTHOR);
        assert_eq!(sample(Some("Kim Soo")).author_display(), "Kim Soo");
    }

    #[test]
    fn resolve_is_one_way_and_idempotent() {
        let mut c = sample(None);
        c.resolve();
        assert!(c.is_resolved());
        c.resolve();
        assert!(c.is_resolved());
    }

    #[test]
    fn category_serde_tags_are_snake_case() {
        let json = serde_json::to_string(&Category::Traffic).unwrap();
        assert_eq!(json, "\"traffic\"");
        let back: Category = serde_json::from_str("\"safety\"").unwrap();
        assert_eq!(back, Category::Safety);
    }

    #[test]
    fn marker_color_is_total_over_the_closed_set() {
        for category in Category::ALL {
            assert!(!category.marker_color().is_empty());
        }
    }
}
