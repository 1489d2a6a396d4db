use chrono::NaiveDate;
use minwon_common::{Category, GeoPoint};
use serde::Serialize;

/// Field values of the submission form. The caller keeps the draft when
/// validation rejects it, so entered values survive a failed attempt.
#[derive(Debug, Clone)]
pub struct ComplaintDraft {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub date: NaiveDate,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    EmptyTitle,
    EmptyContent,
    NoCoordinate,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyTitle => "empty_title",
            ValidationError::EmptyContent => "empty_content",
            ValidationError::NoCoordinate => "no_coordinate",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "Please enter a complaint title."),
            ValidationError::EmptyContent => write!(f, "Please enter the complaint details."),
            ValidationError::NoCoordinate => {
                write!(f, "Please select the complaint location on the map.")
            }
        }
    }
}

/// Run the three submission checks independently so one attempt can
/// report every violation at once. Whitespace-only text counts as empty.
pub fn validate(draft: &ComplaintDraft, selected: Option<GeoPoint>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if draft.title.trim().is_empty() {
        errors.push(ValidationError::EmptyTitle);
    }
    if draft.content.trim().is_empty() {
        errors.push(ValidationError::EmptyContent);
    }
    if selected.is_none() {
        errors.push(ValidationError::NoCoordinate);
    }
    errors
}
