use serde::{Deserialize, Serialize};

/// A single startup company record.
///
/// Field values are taken verbatim from the source dataset; anything the
/// source omits is defaulted at conversion time (empty string, current year).
/// Records are never mutated in place — filtering and sorting always derive
/// new vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupRecord {
    pub id: String,
    pub company_name: String,
    pub ceo: String,
    pub category: String,
    pub location: String,
    pub year_founded: i32,
    pub description: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub employee_count: String,
    #[serde(default)]
    pub funding_stage: String,
    #[serde(default)]
    pub total_funding: String,
    #[serde(default)]
    pub latest_round: String,
    #[serde(default)]
    pub latest_round_amount: String,
    #[serde(default)]
    pub valuation: String,
    #[serde(default)]
    pub investors: String,
    #[serde(default)]
    pub lead_investor: String,
    #[serde(default)]
    pub revenue: String,
    #[serde(default)]
    pub customers: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub linkedin_url: String,
    #[serde(default)]
    pub source: String,
    /// Timestamp of the last dataset refresh for this row (RFC 3339 or
    /// `YYYY-MM-DD`; may be empty or garbage — the `recent` sort tolerates
    /// both).
    #[serde(default)]
    pub last_updated: String,
}

/// Which search branch produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Text,
    Vector,
}

/// A record as returned by the search orchestrator, or wrapped by the
/// dashboard for plain dataset loads.
///
/// Invariant: `vector_similarity` is `Some` only when
/// `match_type == Some(MatchType::Vector)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(flatten)]
    pub record: StartupRecord,
    /// Cosine similarity in [0, 1]; present only on vector matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_similarity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_type: Option<MatchType>,
}

impl SearchResult {
    /// Wrap a plain record with no search branch attached, as the dashboard
    /// does when loading the full dataset.
    pub fn plain(record: StartupRecord) -> Self {
        Self {
            record,
            vector_similarity: None,
            match_type: None,
        }
    }

    pub fn text(record: StartupRecord) -> Self {
        Self {
            record,
            vector_similarity: None,
            match_type: Some(MatchType::Text),
        }
    }

    pub fn vector(record: StartupRecord, similarity: f32) -> Self {
        Self {
            record,
            vector_similarity: Some(similarity),
            match_type: Some(MatchType::Vector),
        }
    }
}

/// Overall strategy a search response was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchType {
    TextOnly,
    Combined,
    VectorOnly,
}

/// Search response body; field names match the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub data: Vec<SearchResult>,
    /// Length of `data` after merge/dedup/truncation.
    pub count: usize,
    /// Text-branch size before merge truncation.
    pub text_match_count: usize,
    /// Vector-branch size before merge truncation, excluding ids already
    /// present in the text branch.
    pub vector_match_count: usize,
    pub search_type: SearchType,
    pub query: String,
}

/// Query parameters for `GET /search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    /// Comma-separated category names.
    pub categories: Option<String>,
    /// Comma-separated location names.
    pub locations: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default, rename = "forceVector")]
    pub force_vector: bool,
}

fn default_limit() -> usize {
    50
}

/// Sort order for idle-mode dashboard browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Descending `last_updated`; unparseable timestamps sort last, stably.
    #[default]
    Recent,
    /// Lexicographic company name.
    Name,
    /// Descending founding year.
    Founded,
    /// Lexicographic category.
    Category,
}

/// Client-side filter state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    #[serde(default)]
    pub sort_by: SortKey,
}

/// Aggregate numbers shown above the dashboard grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub category_count: usize,
    pub location_count: usize,
}

/// Split a comma-separated query parameter into trimmed, non-empty values.
pub fn split_csv(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn test_search_type_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(SearchType::TextOnly).unwrap(),
            "text-only"
        );
        assert_eq!(
            serde_json::to_value(SearchType::VectorOnly).unwrap(),
            "vector-only"
        );
        assert_eq!(
            serde_json::to_value(SearchType::Combined).unwrap(),
            "combined"
        );
    }

    #[test]
    fn test_split_csv_trims_and_drops_empties() {
        assert_eq!(
            split_csv(Some("Computer Vision, Robotics,,  ")),
            vec!["Computer Vision".to_string(), "Robotics".to_string()]
        );
        assert!(split_csv(None).is_empty());
        assert!(split_csv(Some("")).is_empty());
    }

    #[test]
    fn test_plain_result_omits_similarity_fields() {
        let json = serde_json::to_value(SearchResult::plain(record("s1", "Acme AI"))).unwrap();
        assert!(json.get("vectorSimilarity").is_none());
        assert!(json.get("matchType").is_none());
        assert_eq!(json["companyName"], "Acme AI");
    }

    #[test]
    fn test_vector_result_carries_similarity() {
        let json = serde_json::to_value(SearchResult::vector(record("s1", "Acme AI"), 0.87)).unwrap();
        assert_eq!(json["matchType"], "vector");
        assert!((json["vectorSimilarity"].as_f64().unwrap() - 0.87).abs() < 1e-6);
    }
}
