use minwon_common::{Complaint, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Unresolved,
    Resolved,
}

impl StatusFilter {
    pub fn matches(&self, complaint: &Complaint) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Unresolved => complaint.status == Status::Unresolved,
            StatusFilter::Resolved => complaint.status == Status::Resolved,
        }
    }
}

/// Closed set of sort strategies. Both sort descending; `sort_by` is
/// stable, so insertion order breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Likes,
}

fn author_matches(complaint: &Complaint, query: &str) -> bool {
    match &complaint.author {
        Some(author) => author.to_lowercase().contains(&query.to_lowercase()),
        // Anonymous records never match a non-empty query.
        None => false,
    }
}

/// Filter by status and author substring, then sort. An empty or
/// whitespace-only author query matches everything.
pub fn select(
    complaints: &[Complaint],
    status: StatusFilter,
    author_query: Option<&str>,
    sort: SortKey,
) -> Vec<Complaint> {
    let query = author_query.map(str::trim).filter(|q| !q.is_empty());
    let mut out: Vec<Complaint> = complaints
        .iter()
        .filter(|c| status.matches(c))
        .filter(|c| query.is_none_or(|q| author_matches(c, q)))
        .cloned()
        .collect();

    match sort {
        SortKey::Date => out.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::Likes => out.sort_by(|a, b| b.like_count.cmp(&a.like_count)),
    }
    out
}
