//! JSON and CSV export of parsed company records

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::domain::company::NOT_AVAILABLE;
use crate::domain::{ChargeRecord, CompanyDetail, CompanyProfile, CompanySummary, DirectorRecord, PortfolioSummary};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Nothing to export")]
    NothingToExport,

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Files written by one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub json: PathBuf,
    pub csv: PathBuf,
}

/// One flattened CSV row, column name to value
pub type CsvRow = IndexMap<String, String>;

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`.
pub fn safe_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y%m%d_%H%M%S").to_string()
}

fn director_fields(director: &DirectorRecord) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("din", director.din.clone()),
        ("name", director.name.clone()),
        ("designation", director.designation.clone()),
        ("appointment_date", director.appointment_date.clone()),
    ];
    if let Some(url) = &director.detail_url {
        fields.push(("detail_url", url.clone()));
    }
    fields
}

fn charge_fields(charge: &ChargeRecord) -> Vec<(&'static str, String)> {
    vec![
        ("charge_id", charge.charge_id.clone()),
        ("creation_date", charge.creation_date.clone()),
        ("modification_date", charge.modification_date.clone()),
        ("closure_date", charge.closure_date.clone()),
        ("assets_under_charge", charge.assets_under_charge.clone()),
        ("amount", charge.amount.clone()),
        ("charge_holder", charge.charge_holder.clone()),
    ]
}

fn tagged_row(kind: &str, company_name: &str) -> CsvRow {
    let mut row = CsvRow::new();
    row.insert("type".to_string(), kind.to_string());
    row.insert("company_name".to_string(), company_name.to_string());
    row
}

/// Flatten a detail into CSV rows: one `basic_info` row, then one row per
/// director and per charge.
pub fn detail_rows(detail: &CompanyDetail) -> Vec<CsvRow> {
    let company_name = detail.company_name.as_deref().unwrap_or(NOT_AVAILABLE);
    let mut rows = Vec::with_capacity(1 + detail.directors.len() + detail.charges.len());

    let mut basic = tagged_row("basic_info", company_name);
    basic.extend(detail.basic_info.iter().map(|(k, v)| (k.clone(), v.clone())));
    rows.push(basic);

    for director in &detail.directors {
        let mut row = tagged_row("director", company_name);
        row.extend(director_fields(director).into_iter().map(|(k, v)| (k.to_string(), v)));
        rows.push(row);
    }

    for charge in &detail.charges {
        let mut row = tagged_row("charge", company_name);
        row.extend(charge_fields(charge).into_iter().map(|(k, v)| (k.to_string(), v)));
        rows.push(row);
    }

    rows
}

/// Union of the row keys in first-seen order
pub fn csv_header(rows: &[CsvRow]) -> Vec<String> {
    let mut header: IndexMap<&str, ()> = IndexMap::new();
    for key in rows.iter().flat_map(|row| row.keys()) {
        header.entry(key.as_str()).or_insert(());
    }
    header.into_keys().map(str::to_string).collect()
}

/// Column name for a scraped label: lower case, spaces as underscores
fn column_name(prefix: &str, label: &str) -> String {
    format!("{prefix}_{}", label.replace(' ', "_").to_lowercase())
}

/// One flattened row per company of a batch
pub fn profile_row(profile: &CompanyProfile) -> CsvRow {
    let CompanyProfile {
        search_term,
        summary,
        detail,
    } = profile;
    let mut row = CsvRow::new();
    row.insert(
        "company_name".to_string(),
        detail.display_name().unwrap_or(NOT_AVAILABLE).to_string(),
    );
    row.insert("last_updated".to_string(), detail.last_updated.clone().unwrap_or_default());
    row.insert("cin".to_string(), summary.cin.clone());
    row.insert("search_term".to_string(), search_term.clone());
    row.insert("city".to_string(), summary.city.clone());
    row.insert("state".to_string(), summary.state.clone());
    row.insert("company_type".to_string(), summary.company_type.to_string());

    for (key, value) in &detail.basic_info {
        row.insert(column_name("basic", key), value.clone());
    }
    row.insert("director_count".to_string(), detail.directors.len().to_string());
    row.insert("charges_count".to_string(), detail.charges.len().to_string());
    row.insert(
        "similar_companies_count".to_string(),
        detail.similar_companies.len().to_string(),
    );
    for (key, value) in &detail.contact_info {
        row.insert(format!("contact_{key}"), value.clone());
    }
    for (key, value) in &detail.financial_info {
        row.insert(column_name("financial", key), value.clone());
    }
    row
}

fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Rows aligned to the union header; missing cells are empty
fn aligned_values(rows: &[CsvRow]) -> (Vec<String>, Vec<Vec<String>>) {
    let header = csv_header(rows);
    let values = rows
        .iter()
        .map(|row| {
            header
                .iter()
                .map(|key| row.get(key).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    (header, values)
}

fn write_rows(path: &Path, header: &[String], rows: &[Vec<String>]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `company_details_{name}_{timestamp}.json` and the matching `.csv`.
pub fn export_detail<Tz: TimeZone>(
    detail: &CompanyDetail,
    company_name: &str,
    out_dir: &Path,
    now: &DateTime<Tz>,
) -> Result<ExportedFiles, ExportError>
where
    Tz::Offset: std::fmt::Display,
{
    if detail.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    ensure_dir(out_dir)?;
    let stem = format!("company_details_{}_{}", safe_file_stem(company_name), timestamp(now));

    let json_path = out_dir.join(format!("{stem}.json"));
    write_json(&json_path, detail)?;
    info!("💾 Detailed information exported to: {:?}", json_path);

    let (header, values) = aligned_values(&detail_rows(detail));
    let csv_path = out_dir.join(format!("{stem}.csv"));
    write_rows(&csv_path, &header, &values)?;
    info!("💾 Data also exported to CSV: {:?}", csv_path);

    Ok(ExportedFiles {
        json: json_path,
        csv: csv_path,
    })
}

const SUMMARY_HEADER: [&str; 10] = [
    "row_number",
    "name",
    "cin",
    "company_type",
    "address",
    "city",
    "state",
    "state_code",
    "pin_code",
    "detail_url",
];

fn summary_values(summary: &CompanySummary) -> Vec<String> {
    vec![
        summary.row_number.to_string(),
        summary.name.clone(),
        summary.cin.clone(),
        summary.company_type.to_string(),
        summary.address.clone(),
        summary.city.clone(),
        summary.state.clone(),
        summary.state_code.clone(),
        summary.pin_code.clone(),
        summary.detail_url.clone().unwrap_or_default(),
    ]
}

/// Write search results to `company_search_{term}_{timestamp}.csv`.
pub fn export_summaries<Tz: TimeZone>(
    summaries: &[CompanySummary],
    search_term: &str,
    out_dir: &Path,
    now: &DateTime<Tz>,
) -> Result<PathBuf, ExportError>
where
    Tz::Offset: std::fmt::Display,
{
    if summaries.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    ensure_dir(out_dir)?;
    let path = out_dir.join(format!(
        "company_search_{}_{}.csv",
        safe_file_stem(search_term),
        timestamp(now)
    ));

    let header: Vec<String> = SUMMARY_HEADER.iter().map(ToString::to_string).collect();
    let values: Vec<Vec<String>> = summaries.iter().map(summary_values).collect();
    write_rows(&path, &header, &values)?;
    info!("💾 {} search results exported to: {:?}", summaries.len(), path);

    Ok(path)
}

#[derive(Serialize)]
struct PortfolioMetadata<'a> {
    extraction_date: String,
    total_companies: usize,
    portfolio_summary: &'a PortfolioSummary,
}

#[derive(Serialize)]
struct PortfolioDocument<'a> {
    metadata: PortfolioMetadata<'a>,
    companies: &'a [CompanyProfile],
}

/// Write a batch to `company_portfolio_{timestamp}.json` (metadata, summary
/// and every profile) and a flattened `.csv` with one row per company.
pub fn export_portfolio<Tz: TimeZone>(
    profiles: &[CompanyProfile],
    summary: &PortfolioSummary,
    out_dir: &Path,
    now: &DateTime<Tz>,
) -> Result<ExportedFiles, ExportError>
where
    Tz::Offset: std::fmt::Display,
{
    if profiles.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    ensure_dir(out_dir)?;
    let stem = format!("company_portfolio_{}", timestamp(now));

    let json_path = out_dir.join(format!("{stem}.json"));
    let document = PortfolioDocument {
        metadata: PortfolioMetadata {
            extraction_date: now.to_rfc3339(),
            total_companies: profiles.len(),
            portfolio_summary: summary,
        },
        companies: profiles,
    };
    write_json(&json_path, &document)?;
    info!("💾 Portfolio data saved to: {:?}", json_path);

    let rows: Vec<CsvRow> = profiles.iter().map(profile_row).collect();
    let (header, values) = aligned_values(&rows);
    let csv_path = out_dir.join(format!("{stem}.csv"));
    write_rows(&csv_path, &header, &values)?;
    info!("💾 Flattened data exported to: {:?}", csv_path);

    Ok(ExportedFiles {
        json: json_path,
        csv: csv_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_file_stem_replaces_unsafe_characters() {
        assert_eq!(safe_file_stem("Acme Pvt. Ltd/India"), "Acme_Pvt._Ltd_India");
        assert_eq!(safe_file_stem("a-b_c.d"), "a-b_c.d");
        assert_eq!(safe_file_stem("ÄBC"), "_BC");
    }

    #[test]
    fn header_is_union_in_first_seen_order() {
        let mut detail = CompanyDetail {
            company_name: Some("ACME".to_string()),
            ..CompanyDetail::default()
        };
        detail.basic_info.insert("CIN".to_string(), "U1".to_string());
        detail.directors.push(DirectorRecord {
            din: "001".to_string(),
            name: "A".to_string(),
            designation: "Director".to_string(),
            appointment_date: "2020".to_string(),
            detail_url: None,
        });

        let rows = detail_rows(&detail);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["type"], "director");
        assert_eq!(
            csv_header(&rows),
            vec!["type", "company_name", "CIN", "din", "name", "designation", "appointment_date"]
        );
    }

    #[test]
    fn scraped_labels_become_prefixed_columns() {
        assert_eq!(column_name("basic", "Date of Incorporation"), "basic_date_of_incorporation");
        assert_eq!(column_name("financial", "Paid up capital"), "financial_paid_up_capital");
    }

    #[test]
    fn detail_rows_default_company_name() {
        let rows = detail_rows(&CompanyDetail::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["company_name"], "N/A");
    }
}
