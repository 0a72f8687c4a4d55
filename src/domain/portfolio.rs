//! Statistics over a set of looked-up companies: capital, charges, board
//! size, location and age.

use std::sync::LazyLock;

use chrono::{Datelike, Local};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::amount::parse_amount_in_rupees;
use super::company::{CompanyDetail, CompanySummary, FieldMap, UNKNOWN};

/// Registry data starts here; earlier four-digit runs are not years.
pub const EARLIEST_INCORPORATION_YEAR: i32 = 1950;

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4})\b").unwrap());

const AUTHORISED_CAPITAL_KEYS: [&str; 2] = ["authorised capital", "authorized capital"];
const PAID_UP_CAPITAL_KEYS: [&str; 2] = ["paid up capital", "paid-up capital"];
const INCORPORATION_KEYS: [&str; 1] = ["date of incorporation"];

/// A search result together with its parsed detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub search_term: String,
    pub summary: CompanySummary,
    pub detail: CompanyDetail,
}

/// Descriptive statistics; all zero for an empty sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl Stats {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };
        let variance = sorted.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / count as f64;

        Self {
            count,
            mean,
            median,
            min: sorted[0],
            max: sorted[count - 1],
            std_dev: variance.sqrt(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalAnalysis {
    pub authorised_capital: Stats,
    pub paid_up_capital: Stats,
    pub companies_with_capital_data: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectorAnalysis {
    pub director_count: Stats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargeAnalysis {
    pub charge_amount: Stats,
    pub companies_with_charges: usize,
    pub total_charges: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeographicAnalysis {
    pub state_distribution: IndexMap<String, usize>,
    pub city_distribution: IndexMap<String, usize>,
    pub distinct_states: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncorporationAnalysis {
    /// Companies per incorporation year, oldest first
    pub years: IndexMap<i32, usize>,
    pub year_range: Option<(i32, i32)>,
}

/// Aggregate view of a batch of companies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub companies: usize,
    pub capital: CapitalAnalysis,
    pub directors: DirectorAnalysis,
    pub charges: ChargeAnalysis,
    pub geography: GeographicAnalysis,
    pub incorporation: IncorporationAnalysis,
}

impl PortfolioSummary {
    pub fn analyze(profiles: &[CompanyProfile]) -> Self {
        let mut authorised = Vec::new();
        let mut paid_up = Vec::new();
        let mut director_counts = Vec::with_capacity(profiles.len());
        let mut charge_amounts = Vec::new();
        let mut geography = GeographicAnalysis::default();
        let mut years: IndexMap<i32, usize> = IndexMap::new();

        for CompanyProfile { summary, detail, .. } in profiles {
            if let Some(amount) = capital_field(detail, &AUTHORISED_CAPITAL_KEYS) {
                authorised.push(amount);
            }
            if let Some(amount) = capital_field(detail, &PAID_UP_CAPITAL_KEYS) {
                paid_up.push(amount);
            }
            if let Some(year) = labelled(&detail.basic_info, &INCORPORATION_KEYS).find_map(incorporation_year) {
                *years.entry(year).or_default() += 1;
            }

            director_counts.push(detail.directors.len() as f64);
            charge_amounts.extend(detail.charges.iter().filter_map(|charge| charge.amount_in_rupees()));

            if let Some(state) = known(&summary.state) {
                *geography.state_distribution.entry(state.to_string()).or_default() += 1;
            }
            if let Some(city) = known(&summary.city) {
                *geography.city_distribution.entry(city.to_string()).or_default() += 1;
            }
        }

        geography.distinct_states = geography.state_distribution.len();
        years.sort_keys();
        let year_range = years.first().zip(years.last()).map(|((first, _), (last, _))| (*first, *last));

        Self {
            companies: profiles.len(),
            capital: CapitalAnalysis {
                companies_with_capital_data: authorised.len(),
                authorised_capital: Stats::from_values(&authorised),
                paid_up_capital: Stats::from_values(&paid_up),
            },
            directors: DirectorAnalysis {
                director_count: Stats::from_values(&director_counts),
            },
            charges: ChargeAnalysis {
                charge_amount: Stats::from_values(&charge_amounts),
                companies_with_charges: profiles.iter().filter(|p| !p.detail.charges.is_empty()).count(),
                total_charges: profiles.iter().map(|p| p.detail.charges.len()).sum(),
            },
            geography,
            incorporation: IncorporationAnalysis { years, year_range },
        }
    }
}

/// Four-digit year in the text, if it is a plausible incorporation year.
pub fn incorporation_year(text: &str) -> Option<i32> {
    let year: i32 = YEAR.captures(text)?[1].parse().ok()?;
    (EARLIEST_INCORPORATION_YEAR..=Local::now().year())
        .contains(&year)
        .then_some(year)
}

/// Values whose label contains one of `keys`, compared case-insensitively
fn labelled<'a>(fields: &'a FieldMap, keys: &'a [&str]) -> impl Iterator<Item = &'a str> {
    fields
        .iter()
        .filter(move |(label, _)| {
            let label = label.to_lowercase();
            keys.iter().any(|key| label.contains(key))
        })
        .map(|(_, value)| value.as_str())
}

/// Capital is listed in the company table on some pages and among the key
/// numbers on others.
fn capital_field(detail: &CompanyDetail, keys: &[&str]) -> Option<f64> {
    labelled(&detail.basic_info, keys)
        .chain(labelled(&detail.financial_info, keys))
        .find_map(parse_amount_in_rupees)
}

fn known(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty() && value != UNKNOWN).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::company::NOT_AVAILABLE;
    use crate::domain::{ChargeRecord, CompanyType, DirectorRecord};

    fn profile(state: &str, city: &str, fields: &[(&str, &str)], directors: usize, charges: &[&str]) -> CompanyProfile {
        let summary = CompanySummary {
            row_number: 1,
            name: "ACME PRIVATE LIMITED".to_string(),
            cin: "U12345MH2000PTC000001".to_string(),
            detail_url: None,
            address: NOT_AVAILABLE.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            state_code: NOT_AVAILABLE.to_string(),
            pin_code: NOT_AVAILABLE.to_string(),
            company_type: CompanyType::PrivateLimited,
        };
        let mut detail = CompanyDetail::default();
        for (key, value) in fields {
            detail.basic_info.insert(key.to_string(), value.to_string());
        }
        detail.directors = (0..directors)
            .map(|i| DirectorRecord {
                din: format!("{i:08}"),
                name: format!("Director {i}"),
                designation: "Director".to_string(),
                appointment_date: "01/01/2020".to_string(),
                detail_url: None,
            })
            .collect();
        detail.charges = charges
            .iter()
            .map(|amount| ChargeRecord {
                charge_id: "1".to_string(),
                creation_date: "-".to_string(),
                modification_date: "-".to_string(),
                closure_date: "-".to_string(),
                assets_under_charge: "-".to_string(),
                amount: amount.to_string(),
                charge_holder: "Bank".to_string(),
            })
            .collect();

        CompanyProfile {
            search_term: "acme".to_string(),
            summary,
            detail,
        }
    }

    #[test]
    fn stats_of_small_samples() {
        assert_eq!(Stats::from_values(&[]), Stats::default());

        let stats = Stats::from_values(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert_eq!((stats.min, stats.max), (1.0, 4.0));
        assert!((stats.std_dev - 1.25_f64.sqrt()).abs() < 1e-12);

        assert_eq!(Stats::from_values(&[7.0, 1.0, 5.0]).median, 5.0);
    }

    #[test]
    fn incorporation_year_bounds() {
        assert_eq!(incorporation_year("12 March 2003"), Some(2003));
        assert_eq!(incorporation_year("01/04/1987"), Some(1987));
        assert_eq!(incorporation_year("1947"), None);
        assert_eq!(incorporation_year("9999"), None);
        assert_eq!(incorporation_year("U12345MH2000PTC000001"), None);
        assert_eq!(incorporation_year(""), None);
    }

    #[test]
    fn empty_portfolio_is_all_zero() {
        let summary = PortfolioSummary::analyze(&[]);
        assert_eq!(summary, PortfolioSummary::default());
        assert_eq!(summary.incorporation.year_range, None);
    }

    #[test]
    fn aggregates_capital_charges_and_locations() {
        let profiles = vec![
            profile(
                "Maharashtra",
                "Mumbai",
                &[("Authorised Capital", "₹ 10 Lakh"), ("Date of Incorporation", "01 January 2000")],
                2,
                &["2 Crore", "Not disclosed"],
            ),
            profile(
                "Maharashtra",
                "Pune",
                &[("Authorized Capital", "Rs. 1 Crore"), ("Paid up capital", "5,00,000")],
                4,
                &[],
            ),
            profile(UNKNOWN, UNKNOWN, &[("Date of Incorporation", "15-Aug-2012")], 0, &["50 Lakh"]),
        ];

        let summary = PortfolioSummary::analyze(&profiles);
        assert_eq!(summary.companies, 3);

        assert_eq!(summary.capital.companies_with_capital_data, 2);
        assert_eq!(summary.capital.authorised_capital.min, 1_000_000.0);
        assert_eq!(summary.capital.authorised_capital.max, 10_000_000.0);
        assert_eq!(summary.capital.paid_up_capital.count, 1);

        assert_eq!(summary.directors.director_count.mean, 2.0);
        assert_eq!(summary.directors.director_count.count, 3);

        assert_eq!(summary.charges.total_charges, 3);
        assert_eq!(summary.charges.companies_with_charges, 2);
        assert_eq!(summary.charges.charge_amount.count, 2);
        assert_eq!(summary.charges.charge_amount.max, 20_000_000.0);

        assert_eq!(summary.geography.state_distribution["Maharashtra"], 2);
        assert_eq!(summary.geography.distinct_states, 1);
        assert_eq!(summary.geography.city_distribution.len(), 2);

        assert_eq!(summary.incorporation.years.keys().copied().collect::<Vec<_>>(), vec![2000, 2012]);
        assert_eq!(summary.incorporation.year_range, Some((2000, 2012)));
    }

    #[test]
    fn capital_falls_back_to_key_numbers() {
        let mut only_financial = profile("Delhi", "New Delhi", &[], 1, &[]);
        only_financial
            .detail
            .financial_info
            .insert("Authorised Capital".to_string(), "₹ 1,00,000".to_string());

        let summary = PortfolioSummary::analyze(&[only_financial]);
        assert_eq!(summary.capital.authorised_capital.mean, 100_000.0);
    }
}
