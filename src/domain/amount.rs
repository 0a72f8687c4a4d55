//! Rupee amounts as the registry prints them ("Rs. 5.5 Crore", "₹1,00,000").

use std::sync::LazyLock;

use regex::Regex;

/// A grouped number and an optional Indian unit word after it
static AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(crores?|cr|lakhs?|lacs?|thousands?|k)?\b").unwrap()
});

/// Parse a printed amount into rupees. Currency markers and digit grouping are
/// ignored; an optional crore / lakh / thousand unit scales the number.
pub fn parse_amount_in_rupees(text: &str) -> Option<f64> {
    let captures = AMOUNT.captures(text)?;
    let value: f64 = captures[1].replace(',', "").parse().ok()?;
    let multiplier = captures
        .get(2)
        .map_or(1.0, |unit| unit_multiplier(&unit.as_str().to_ascii_lowercase()));

    Some(value * multiplier)
}

fn unit_multiplier(unit: &str) -> f64 {
    if unit.starts_with("cr") {
        10_000_000.0
    } else if unit.starts_with("la") {
        100_000.0
    } else if unit.starts_with("th") || unit == "k" {
        1_000.0
    } else {
        1.0
    }
}
