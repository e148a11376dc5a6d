//! Display names for carriers and quarters.
//!
//! The model only knows raw carrier codes and quarter numbers; these tables
//! translate them for people and back again before a query reaches the core.

use anyhow::{bail, Result};

const CARRIER_NAMES: &[(&str, &str)] = &[
    ("9N", "Tropic Air"),
    ("A7", "Unknown"),
    ("AA", "American Airlines"),
    ("AS", "Alaska Airlines"),
    ("B6", "JetBlue Airways"),
    ("CO", "Continental Airlines"),
    ("DH", "Independence Air"),
    ("DL", "Delta Air Lines"),
    ("F9", "Frontier Airlines"),
    ("FL", "AirTran Airways"),
    ("G4", "Allegiant Air"),
    ("HP", "America West Airlines"),
    ("J7", "ValuJet Airlines"),
    ("JI", "Midway Airlines"),
    ("KP", "Kiwi International Air Lines"),
    ("KW", "Carnival Air Lines"),
    ("MX", "Mexicana"),
    ("N7", "National Airlines"),
    ("NJ", "VivaAerobus"),
    ("NK", "Spirit Airlines"),
    ("NW", "Northwest Airlines"),
    ("PN", "Pan Am"),
    ("QQ", "Reno Air"),
    ("QX", "Horizon Air"),
    ("RP", "Chautauqua Airlines"),
    ("RU", "Unknown"),
    ("SX", "Skybus Airlines"),
    ("SY", "Sun Country Airlines"),
    ("T3", "Eastern Air Lines"),
    ("TW", "TWA"),
    ("TZ", "ATA Airlines"),
    ("U5", "USA3000 Airlines"),
    ("UA", "United Airlines"),
    ("US", "US Airways"),
    ("VX", "Virgin America"),
    ("W7", "Western Pacific Airlines"),
    ("W9", "Wizz Air"),
    ("WN", "Southwest Airlines"),
    ("WV", "Air Wisconsin"),
    ("XJ", "Mesaba Airlines"),
    ("XP", "Casino Express"),
    ("YV", "Mesa Airlines"),
    ("YX", "Republic Airlines"),
    ("ZA", "AccessAir"),
    ("ZW", "Air Wisconsin"),
];

const QUARTER_LABELS: [&str; 4] = [
    "January - March",
    "April - June",
    "July - September",
    "October - December",
];

pub fn carrier_name(code: &str) -> Option<&'static str> {
    CARRIER_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Name if known, otherwise the code itself
pub fn carrier_display(code: &str) -> String {
    carrier_name(code).unwrap_or(code).to_string()
}

/// Map user input to a carrier code from `known`.
///
/// Accepts a code (any case) or a display name. Names shared by several
/// codes resolve to the first known code. Unmatched input is returned as
/// typed so the model can report it as an unknown category.
pub fn resolve_carrier(input: &str, known: &[String]) -> String {
    let input = input.trim();
    if let Some(code) = known.iter().find(|c| c.eq_ignore_ascii_case(input)) {
        return code.clone();
    }
    known
        .iter()
        .find(|code| carrier_name(code).is_some_and(|name| name.eq_ignore_ascii_case(input)))
        .cloned()
        .unwrap_or_else(|| input.to_string())
}

pub fn quarter_label(quarter: u8) -> Option<&'static str> {
    QUARTER_LABELS.get(usize::from(quarter).checked_sub(1)?).copied()
}

/// Parse `3`, `Q3` or `July - September` into a quarter number
pub fn resolve_quarter(input: &str) -> Result<u8> {
    let input = input.trim();
    let digits = input
        .strip_prefix('Q')
        .or_else(|| input.strip_prefix('q'))
        .unwrap_or(input);
    if let Ok(quarter) = digits.parse::<u8>() {
        return Ok(quarter);
    }
    if let Some(idx) = QUARTER_LABELS
        .iter()
        .position(|label| label.eq_ignore_ascii_case(input))
    {
        return Ok(idx as u8 + 1);
    }
    bail!("'{}' is not a quarter (use 1-4 or a range such as \"April - June\")", input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        ["AA", "DL", "WV", "ZW", "XX"].map(String::from).to_vec()
    }

    #[test]
    fn test_carrier_names() {
        assert_eq!(carrier_name("WN"), Some("Southwest Airlines"));
        assert_eq!(carrier_name("XX"), None);
        assert_eq!(carrier_display("XX"), "XX");
    }

    #[test]
    fn test_resolve_carrier() {
        assert_eq!(resolve_carrier("dl", &known()), "DL");
        assert_eq!(resolve_carrier("American Airlines", &known()), "AA");
        assert_eq!(resolve_carrier("air wisconsin", &known()), "WV");
        assert_eq!(resolve_carrier("Southwest Airlines", &known()), "Southwest Airlines");
    }

    #[test]
    fn test_quarters() {
        assert_eq!(quarter_label(1), Some("January - March"));
        assert_eq!(quarter_label(0), None);
        assert_eq!(quarter_label(5), None);

        assert_eq!(resolve_quarter("3").unwrap(), 3);
        assert_eq!(resolve_quarter("Q4").unwrap(), 4);
        assert_eq!(resolve_quarter("april - june").unwrap(), 2);
        assert!(resolve_quarter("spring").is_err());
    }
}
