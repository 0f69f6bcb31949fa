//! SIC (Standard Industrial Classification) entry parsing.
//!
//! Search requests carry SIC filters as display labels such as
//! `"62020 - Computer consultancy activities"`. Only the leading code is
//! matchable; entries without one carry no signal and are dropped.

use std::sync::OnceLock;

fn leading_code_re() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"^\s*(\d+)").expect("invalid built-in SIC regex"))
}

/// The run of digits at the start of `entry`, ignoring leading whitespace.
pub fn leading_sic_code(entry: &str) -> Option<&str> {
    leading_code_re()
        .captures(entry)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Leading codes of every entry that has one, in input order.
pub fn extract_sic_codes<S: AsRef<str>>(entries: &[S]) -> Vec<&str> {
    entries
        .iter()
        .filter_map(|e| leading_sic_code(e.as_ref()))
        .collect()
}

/// Industry description of a `"<code> - <description>"` label.
pub fn industry_from_label(label: &str) -> Option<&str> {
    let (_, description) = label.split_once(" - ")?;
    let description = description.trim();
    (!description.is_empty()).then_some(description)
}
