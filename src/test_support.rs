//! Shared helpers for unit tests.

use crate::models::StartupRecord;

/// A record with the given identity and everything else defaulted.
pub fn record(id: &str, name: &str) -> StartupRecord {
    StartupRecord {
        id: id.to_string(),
        company_name: name.to_string(),
        ceo: String::new(),
        category: "AI".to_string(),
        location: "San Francisco, CA".to_string(),
        year_founded: 2021,
        description: String::new(),
        product: String::new(),
        website: String::new(),
        employee_count: String::new(),
        funding_stage: String::new(),
        total_funding: String::new(),
        latest_round: String::new(),
        latest_round_amount: String::new(),
        valuation: String::new(),
        investors: String::new(),
        lead_investor: String::new(),
        revenue: String::new(),
        customers: String::new(),
        tags: String::new(),
        logo_url: String::new(),
        linkedin_url: String::new(),
        source: String::new(),
        last_updated: String::new(),
    }
}

/// A record with the fields the dashboard filters on.
pub fn record_full(
    id: &str,
    name: &str,
    category: &str,
    location: &str,
    year_founded: i32,
    last_updated: &str,
) -> StartupRecord {
    StartupRecord {
        category: category.to_string(),
        location: location.to_string(),
        year_founded,
        last_updated: last_updated.to_string(),
        ..record(id, name)
    }
}
