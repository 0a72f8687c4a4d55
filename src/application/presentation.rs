//! Console rendering of search results and company details

use std::fmt::Write;

use crate::domain::text::{non_placeholder, safe_truncate_str, truncate_chars};
use crate::domain::{CompanyDetail, CompanySummary, PortfolioSummary, Stats};

const RULE_WIDTH: usize = 120;
const DESCRIPTION_LIMIT: usize = 200;
const SIMILAR_COMPANIES_SHOWN: usize = 5;
const STATES_SHOWN: usize = 10;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Fixed-width summary table of search results
pub fn render_summary_table(companies: &[CompanySummary]) -> String {
    if companies.is_empty() {
        return "No companies found\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "COMPANY SEARCH RESULTS ({} companies)", companies.len());
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(
        out,
        "{:<4} {:<45} {:<25} {:<16} {:<15} {:<12}",
        "No.", "Company Name", "CIN", "Type", "City", "State"
    );
    let _ = writeln!(
        out,
        "{} {} {} {} {} {}",
        "-".repeat(4),
        "-".repeat(45),
        "-".repeat(25),
        "-".repeat(16),
        "-".repeat(15),
        "-".repeat(12)
    );

    for company in companies {
        let _ = writeln!(
            out,
            "{:<4} {:<45} {:<25} {:<16} {:<15} {:<12}",
            company.row_number,
            safe_truncate_str(Some(&company.name), 44, "N/A"),
            safe_truncate_str(Some(&company.cin), 24, "N/A"),
            company.company_type.label(),
            safe_truncate_str(Some(&company.city), 14, "N/A"),
            safe_truncate_str(Some(&company.state_code), 11, "N/A"),
        );
    }

    out
}

/// Multi-section report of a company detail page
pub fn render_detail_report(detail: &CompanyDetail) -> String {
    if detail.is_empty() {
        return "No detailed information available\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "DETAILED COMPANY INFORMATION");
    let _ = writeln!(out, "{}", rule());

    if let Some(name) = detail.display_name() {
        let _ = writeln!(out, "\nCOMPANY: {name}");
    }
    if let Some(updated) = &detail.last_updated {
        let _ = writeln!(out, "Last Updated: {updated}");
    }

    if !detail.basic_info.is_empty() {
        let _ = writeln!(out, "\nBASIC INFORMATION:");
        for (key, value) in detail.basic_info.iter().filter(|(_, v)| filled(v)) {
            let _ = writeln!(out, "   • {key}: {value}");
        }
    }

    if !detail.directors.is_empty() {
        let _ = writeln!(out, "\nDIRECTORS ({} total):", detail.directors.len());
        for (i, director) in detail.directors.iter().enumerate() {
            let _ = writeln!(out, "   {}. {} (DIN: {})", i + 1, director.name, director.din);
            let _ = writeln!(out, "      Designation: {}", director.designation);
            let _ = writeln!(out, "      Appointed: {}", director.appointment_date);
        }
    }

    if !detail.contact_info.is_empty() {
        let _ = writeln!(out, "\nCONTACT INFORMATION:");
        for (key, value) in detail.contact_info.iter().filter(|(_, v)| filled(v)) {
            let _ = writeln!(out, "   • {}: {}", title_case(key), value);
        }
    }

    if !detail.financial_info.is_empty() {
        let _ = writeln!(out, "\nFINANCIAL INFORMATION:");
        for (key, value) in detail.financial_info.iter().filter(|(_, v)| filled(v)) {
            let _ = writeln!(out, "   • {key}: {value}");
        }
    }

    if !detail.charges.is_empty() {
        let open = detail.open_charges().count();
        let _ = writeln!(out, "\nCHARGES/LOANS ({} total, {} open):", detail.charges.len(), open);
        for (i, charge) in detail.charges.iter().enumerate() {
            let status = non_placeholder(&charge.closure_date).unwrap_or("Ongoing");
            let _ = writeln!(out, "   {}. Charge ID: {}", i + 1, charge.charge_id);
            let _ = writeln!(out, "      Amount: {}", charge.amount);
            let _ = writeln!(out, "      Holder: {}", charge.charge_holder);
            let _ = writeln!(out, "      Status: {status}");
        }
        if let Some(total) = detail.total_charge_amount() {
            let _ = writeln!(out, "   Total charged amount: ₹{total:.0}");
        }
    }

    if !detail.similar_companies.is_empty() {
        let _ = writeln!(
            out,
            "\nCOMPANIES AT SIMILAR ADDRESS ({} shown):",
            detail.similar_companies.len()
        );
        for (i, similar) in detail.similar_companies.iter().take(SIMILAR_COMPANIES_SHOWN).enumerate() {
            let _ = writeln!(out, "   {}. {} (CIN: {})", i + 1, similar.name, similar.cin);
        }
    }

    if let Some(description) = detail.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "\nCOMPANY DESCRIPTION:");
        if description.chars().count() > DESCRIPTION_LIMIT {
            let _ = writeln!(out, "   {}...", truncate_chars(description, DESCRIPTION_LIMIT));
        } else {
            let _ = writeln!(out, "   {description}");
        }
    }

    out
}

fn stats_line(out: &mut String, label: &str, stats: &Stats) {
    if stats.count == 0 {
        let _ = writeln!(out, "   • {label}: no data");
    } else {
        let _ = writeln!(
            out,
            "   • {label}: {} values, mean ₹{:.0}, median ₹{:.0}, range ₹{:.0} - ₹{:.0}",
            stats.count, stats.mean, stats.median, stats.min, stats.max
        );
    }
}

/// Aggregate statistics of a batch of companies
pub fn render_portfolio_report(summary: &PortfolioSummary) -> String {
    if summary.companies == 0 {
        return "No detailed data available for analysis\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "FINANCIAL ANALYSIS SUMMARY ({} companies)", summary.companies);
    let _ = writeln!(out, "{}", rule());

    let _ = writeln!(out, "\nCAPITAL:");
    let _ = writeln!(
        out,
        "   • Companies with capital data: {}",
        summary.capital.companies_with_capital_data
    );
    stats_line(&mut out, "Authorised capital", &summary.capital.authorised_capital);
    stats_line(&mut out, "Paid up capital", &summary.capital.paid_up_capital);

    let _ = writeln!(out, "\nDIRECTORS:");
    let _ = writeln!(
        out,
        "   • Average directors per company: {:.1}",
        summary.directors.director_count.mean
    );

    let _ = writeln!(out, "\nCHARGES:");
    let _ = writeln!(out, "   • Companies with charges: {}", summary.charges.companies_with_charges);
    let _ = writeln!(out, "   • Total charges: {}", summary.charges.total_charges);
    stats_line(&mut out, "Charge amounts", &summary.charges.charge_amount);

    let _ = writeln!(out, "\nGEOGRAPHY:");
    let _ = writeln!(out, "   • Geographic diversity: {} states", summary.geography.distinct_states);
    let mut states: Vec<(&String, &usize)> = summary.geography.state_distribution.iter().collect();
    states.sort_by(|a, b| b.1.cmp(a.1));
    for (state, count) in states.into_iter().take(STATES_SHOWN) {
        let _ = writeln!(out, "      {state}: {count}");
    }

    let range = summary
        .incorporation
        .year_range
        .map_or_else(|| "N/A".to_string(), |(first, last)| format!("{first} - {last}"));
    let _ = writeln!(out, "\nINCORPORATION:");
    let _ = writeln!(out, "   • Incorporation year range: {range}");

    out
}
