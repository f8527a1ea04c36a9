//! Idle-mode local filtering and sorting over the working dataset.

use chrono::{DateTime, NaiveDate};

use crate::models::{DashboardStats, FilterSpec, SearchResult, SortKey};

/// Apply the full filter spec, then sort per `filter.sort_by`.
///
/// Sorting is skipped entirely when any record carries a similarity score:
/// that ordering came from the orchestrator's merge and must not be
/// destroyed by a name/year/category re-sort.
pub fn apply_filters(records: &[SearchResult], filter: &FilterSpec) -> Vec<SearchResult> {
    let needle = filter.search.trim().to_lowercase();

    let mut out: Vec<SearchResult> = records
        .iter()
        .filter(|r| {
            let rec = &r.record;
            if !needle.is_empty()
                && !rec.company_name.to_lowercase().contains(&needle)
                && !rec.description.to_lowercase().contains(&needle)
                && !rec.ceo.to_lowercase().contains(&needle)
            {
                return false;
            }
            if !filter.categories.is_empty()
                && !filter
                    .categories
                    .iter()
                    .any(|c| rec.category.eq_ignore_ascii_case(c))
            {
                return false;
            }
            if !filter.locations.is_empty() && !location_matches(&rec.location, &filter.locations) {
                return false;
            }
            in_year_range(rec.year_founded, filter.year_from, filter.year_to)
        })
        .cloned()
        .collect();

    if !out.iter().any(|r| r.vector_similarity.is_some()) {
        sort_records(&mut out, filter.sort_by);
    }
    out
}

/// Apply only the inclusive year-range portion of the filter. Used on search
/// responses, whose category/location filters were already pushed into the
/// orchestrator call.
pub fn apply_year_range(
    records: Vec<SearchResult>,
    year_from: Option<i32>,
    year_to: Option<i32>,
) -> Vec<SearchResult> {
    records
        .into_iter()
        .filter(|r| in_year_range(r.record.year_founded, year_from, year_to))
        .collect()
}

fn in_year_range(year: i32, from: Option<i32>, to: Option<i32>) -> bool {
    from.is_none_or(|y| year >= y) && to.is_none_or(|y| year <= y)
}

/// A selected location matches when it appears as a substring of the
/// record location's leading city token (the text before the first comma).
fn location_matches(location: &str, selected: &[String]) -> bool {
    let city = location
        .split(',')
        .next()
        .unwrap_or(location)
        .trim()
        .to_lowercase();
    selected.iter().any(|s| city.contains(&s.trim().to_lowercase()))
}

fn sort_records(records: &mut [SearchResult], key: SortKey) {
    match key {
        SortKey::Name => {
            records.sort_by(|a, b| {
                a.record
                    .company_name
                    .to_lowercase()
                    .cmp(&b.record.company_name.to_lowercase())
            });
        }
        SortKey::Founded => {
            records.sort_by(|a, b| b.record.year_founded.cmp(&a.record.year_founded));
        }
        SortKey::Category => {
            records.sort_by(|a, b| {
                a.record
                    .category
                    .to_lowercase()
                    .cmp(&b.record.category.to_lowercase())
            });
        }
        SortKey::Recent => {
            // Descending update timestamp. Unparseable/missing timestamps
            // sort last; ties (including both-invalid) keep input order,
            // which sort_by guarantees because it is stable.
            records.sort_by(|a, b| {
                let ta = parse_timestamp(&a.record.last_updated);
                let tb = parse_timestamp(&b.record.last_updated);
                match (ta, tb) {
                    (Some(ta), Some(tb)) => tb.cmp(&ta),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            });
        }
    }
}

/// Parse a `last_updated` value as RFC 3339 or a bare `YYYY-MM-DD`.
fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
    }
    None
}

/// Aggregate stats over a displayed result set.
pub fn compute_stats(records: &[SearchResult]) -> DashboardStats {
    let mut categories: Vec<&str> = records
        .iter()
        .map(|r| r.record.category.as_str())
        .filter(|c| !c.is_empty())
        .collect();
    categories.sort_unstable();
    categories.dedup();

    let mut locations: Vec<&str> = records
        .iter()
        .map(|r| r.record.location.as_str())
        .filter(|l| !l.is_empty())
        .collect();
    locations.sort_unstable();
    locations.dedup();

    DashboardStats {
        total: records.len(),
        category_count: categories.len(),
        location_count: locations.len(),
    }
}
