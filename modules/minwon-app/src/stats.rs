use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use minwon_common::{Category, Complaint};

/// Count complaints per category, largest bucket first. An empty input
/// yields an empty histogram — the caller renders a no-data notice.
pub fn category_histogram(complaints: &[Complaint]) -> Vec<(Category, usize)> {
    let mut counts: HashMap<Category, usize> = HashMap::new();
    for complaint in complaints {
        *counts.entry(complaint.category).or_default() += 1;
    }
    let mut out: Vec<(Category, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.to_string().cmp(&b.0.to_string())));
    out
}

/// Count complaints per calendar day, chronologically ascending.
pub fn date_histogram(complaints: &[Complaint]) -> Vec<(NaiveDate, usize)> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for complaint in complaints {
        *counts.entry(complaint.date).or_default() += 1;
    }
    counts.into_iter().collect()
}
