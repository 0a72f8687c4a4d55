//! Address heuristics: PIN code, state and city from a free-text registered address.
//!
//! The city rule is best-effort. It takes the capitalized word run right before the
//! state name (or the state code), which misfires on addresses that put the city
//! elsewhere or spell it in lower case.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::text::collapse_whitespace;

/// Partial address breakdown; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_code: Option<String>,
}

impl AddressDetails {
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.state.is_none() && self.state_code.is_none() && self.pin_code.is_none()
    }
}

/// Two-letter state code and the full state name it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCode {
    pub code: String,
    pub name: String,
}

impl StateCode {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// Ordered list of known state codes. Earlier entries win when an address
/// mentions more than one code.
pub fn default_state_codes() -> Vec<StateCode> {
    [
        ("MH", "Maharashtra"),
        ("DL", "Delhi"),
        ("KA", "Karnataka"),
        ("TN", "Tamil Nadu"),
        ("GJ", "Gujarat"),
        ("WB", "West Bengal"),
        ("UP", "Uttar Pradesh"),
        ("HR", "Haryana"),
        ("PB", "Punjab"),
        ("RJ", "Rajasthan"),
        ("MP", "Madhya Pradesh"),
        ("AP", "Andhra Pradesh"),
        ("TG", "Telangana"),
        ("KL", "Kerala"),
        ("OR", "Odisha"),
        ("BR", "Bihar"),
        ("AS", "Assam"),
        ("HP", "Himachal Pradesh"),
        ("UR", "Uttarakhand"),
        ("CH", "Chandigarh"),
        ("GA", "Goa"),
        ("JH", "Jharkhand"),
        ("CT", "Chhattisgarh"),
    ]
    .into_iter()
    .map(|(code, name)| StateCode::new(code, name))
    .collect()
}

const CITY_WORDS: &str = r"([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\s+";

/// A state entry with its code and city patterns compiled up front.
///
/// The code and the city-before-code pattern share one right boundary, so a
/// code that selects the state is also the one the city is read against.
#[derive(Debug, Clone)]
struct StateMatcher {
    state: StateCode,
    code: Regex,
    city_before_name: Regex,
    city_before_code: Regex,
}

impl StateMatcher {
    fn new(state: StateCode) -> Result<Self, regex::Error> {
        let code = format!(r"{}(?:[\s,.\-]|$)", regex::escape(&state.code));
        Ok(Self {
            code: Regex::new(&format!(r"(?:^|[\s,]){code}"))?,
            city_before_name: Regex::new(&format!(r"{CITY_WORDS}{}\b", regex::escape(&state.name)))?,
            city_before_code: Regex::new(&format!(r"{CITY_WORDS}{code}"))?,
            state,
        })
    }

    fn matches(&self, address: &str) -> bool {
        self.code.is_match(address)
    }

    fn city(&self, address: &str) -> Option<String> {
        [&self.city_before_name, &self.city_before_code]
            .into_iter()
            .find_map(|pattern| pattern.captures(address))
            .and_then(|captures| captures.get(1))
            .map(|city| city.as_str().trim().to_string())
            .filter(|city| !city.is_empty())
    }
}

/// Extracts PIN code, state and city from registered addresses.
#[derive(Debug, Clone)]
pub struct AddressClassifier {
    pin_pattern: Regex,
    states: Vec<StateMatcher>,
}

impl AddressClassifier {
    /// Classifier over the built-in state table.
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_states(default_state_codes())
    }

    pub fn with_states(states: impl IntoIterator<Item = StateCode>) -> Result<Self, regex::Error> {
        Ok(Self {
            pin_pattern: Regex::new(r"\b(\d{6})\b")?,
            states: states
                .into_iter()
                .map(StateMatcher::new)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    pub fn classify(&self, raw: &str) -> AddressDetails {
        let address = collapse_whitespace(raw);
        let mut details = AddressDetails::default();

        if address.is_empty() || address == "N/A" {
            return details;
        }

        details.pin_code = self
            .pin_pattern
            .captures(&address)
            .and_then(|captures| captures.get(1))
            .map(|pin| pin.as_str().to_string());

        if let Some(matcher) = self.states.iter().find(|matcher| matcher.matches(&address)) {
            details.state_code = Some(matcher.state.code.clone());
            details.state = Some(matcher.state.name.clone());
            details.city = matcher.city(&address);
        }

        details
    }
}
