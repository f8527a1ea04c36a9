//! Raw row → `StartupRecord` conversion.
//!
//! Source rows arrive as loosely-shaped JSON objects whose key names drifted
//! across dataset revisions ("Company Name" vs "name", "Total Funding" vs
//! "Amount Raised", ...). Each logical field is resolved from an ordered list
//! of source keys, first match wins:
//!
//! | field          | precedence                                             |
//! |----------------|--------------------------------------------------------|
//! | id             | `id`                                                   |
//! | company_name   | `Company Name`, `company_name`, `name`                 |
//! | ceo            | `CEO`, `ceo`, `Founder`                                |
//! | category       | `Category`, `Industry`, `Sector`                       |
//! | location       | `Location`, `HQ Location`, `Headquarters`              |
//! | year_founded   | `Year Founded`, `Founded`, `year_founded`              |
//! | description    | `Description`, `About`, `Summary`                      |
//! | total_funding  | `Total Funding`, `Funding Amount`, `Amount Raised`     |
//!
//! Conversion fails closed: a row without a usable `id` and company name is
//! rejected (`ConversionError`), never turned into an empty-field record.
//! All other fields substitute defaults (empty string / current year).

use chrono::{Datelike, Utc};
use serde_json::Value;

use crate::error::ConversionError;
use crate::models::StartupRecord;

/// First non-empty string among `keys`, trimmed.
fn str_field(row: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<String> {
    for key in keys {
        match row.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// First parseable year among `keys`; accepts numbers and numeric strings.
fn year_field(row: &serde_json::Map<String, Value>, keys: &[&str]) -> Option<i32> {
    for key in keys {
        match row.get(*key) {
            Some(Value::Number(n)) => {
                if let Some(y) = n.as_i64() {
                    return Some(y as i32);
                }
            }
            Some(Value::String(s)) => {
                if let Ok(y) = s.trim().parse::<i32>() {
                    return Some(y);
                }
            }
            _ => {}
        }
    }
    None
}

fn default_str(row: &serde_json::Map<String, Value>, keys: &[&str]) -> String {
    str_field(row, keys).unwrap_or_default()
}

/// Convert one raw store row into a `StartupRecord`.
pub fn record_from_row(raw: &Value) -> Result<StartupRecord, ConversionError> {
    let row = raw.as_object().ok_or(ConversionError::NotAnObject)?;

    let id = str_field(row, &["id"]).ok_or(ConversionError::MissingField("id"))?;
    let company_name = str_field(row, &["Company Name", "company_name", "name"])
        .ok_or(ConversionError::MissingField("company name"))?;

    Ok(StartupRecord {
        id,
        company_name,
        ceo: default_str(row, &["CEO", "ceo", "Founder"]),
        category: default_str(row, &["Category", "Industry", "Sector"]),
        location: default_str(row, &["Location", "HQ Location", "Headquarters"]),
        year_founded: year_field(row, &["Year Founded", "Founded", "year_founded"])
            .unwrap_or_else(|| Utc::now().year()),
        description: default_str(row, &["Description", "About", "Summary"]),
        product: default_str(row, &["Product", "product"]),
        website: default_str(row, &["Website", "website", "URL"]),
        employee_count: default_str(row, &["Employees", "Employee Count", "employee_count"]),
        funding_stage: default_str(row, &["Funding Stage", "Stage"]),
        total_funding: default_str(row, &["Total Funding", "Funding Amount", "Amount Raised"]),
        latest_round: default_str(row, &["Latest Round", "Last Round"]),
        latest_round_amount: default_str(row, &["Latest Round Amount", "Last Round Amount"]),
        valuation: default_str(row, &["Valuation", "valuation"]),
        investors: default_str(row, &["Investors", "investors"]),
        lead_investor: default_str(row, &["Lead Investor", "Lead Investors"]),
        revenue: default_str(row, &["Revenue", "ARR"]),
        customers: default_str(row, &["Customers", "Notable Customers"]),
        tags: default_str(row, &["Tags", "Keywords"]),
        logo_url: default_str(row, &["Logo", "logo_url"]),
        linkedin_url: default_str(row, &["LinkedIn", "linkedin_url"]),
        source: default_str(row, &["Source", "source"]),
        last_updated: default_str(row, &["Last Updated", "last_updated", "updated_at"]),
    })
}

/// Convert a batch of rows, dropping the ones that fail conversion.
/// Drops are logged, never fatal to the request.
pub fn records_from_rows(rows: &[Value]) -> Vec<StartupRecord> {
    rows.iter()
        .filter_map(|raw| match record_from_row(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Dropping unconvertible row: {e}");
                None
            }
        })
        .collect()
}
