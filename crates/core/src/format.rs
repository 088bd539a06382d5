//! Display formatting and input sanitization helpers.
//!
//! Shared by the validation engine (numeric coercion, date parsing) and by
//! any front-end that renders employee records.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Date formats accepted for hire dates, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Coerce a loosely-typed form value into a number.
///
/// - Numbers are taken as-is.
/// - Strings are trimmed; whitespace-only coerces to `0`, otherwise the text
///   must be a plain decimal (`"75000"`, `"-500"`, `"1e3"`).
/// - Booleans coerce to `0` / `1`; null to `0`.
/// - Arrays and objects are not numeric.
///
/// Returns `None` when the value is not numeric.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Some(0.0);
            }
            // Rust accepts "inf"/"nan" spellings; form input does not.
            if !s
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
            {
                return None;
            }
            s.parse::<f64>().ok().filter(|n| !n.is_nan())
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse a calendar date from `YYYY-MM-DD`, an RFC 3339 timestamp, or
/// `MM/DD/YYYY`. Returns `None` for anything that is not a real date.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format an amount as whole US dollars: `$75,000`.
///
/// Missing, empty, or non-numeric input renders as `$0`. Fractions are
/// rounded half away from zero.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use staffbook_core::format::format_currency;
///
/// assert_eq!(format_currency(Some(&json!(50000))), "$50,000");
/// assert_eq!(format_currency(Some(&json!(1234.56))), "$1,235");
/// assert_eq!(format_currency(Some(&json!("75000"))), "$75,000");
/// assert_eq!(format_currency(None), "$0");
/// ```
pub fn format_currency(amount: Option<&Value>) -> String {
    let amount = match amount {
        None | Some(Value::Null) => return "$0".to_string(),
        Some(Value::String(s)) if s.is_empty() => return "$0".to_string(),
        Some(v) => v,
    };
    match coerce_number(amount) {
        Some(n) if n.is_finite() => format_dollars(n),
        _ => "$0".to_string(),
    }
}

/// Format a stored salary as whole US dollars.
pub fn format_salary(salary: Option<f64>) -> String {
    match salary {
        Some(n) if n.is_finite() => format_dollars(n),
        _ => "$0".to_string(),
    }
}

fn format_dollars(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Format a date string as `January 15, 2023`; empty for invalid input.
pub fn format_date(value: Option<&str>) -> String {
    value
        .and_then(parse_calendar_date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Join trimmed first and last names with a single space.
pub fn format_name(first: Option<&str>, last: Option<&str>) -> String {
    let first = first.map(str::trim).unwrap_or("");
    let last = last.map(str::trim).unwrap_or("");
    format!("{first} {last}").trim().to_string()
}

/// Upper-case the first letter of every space-separated word and lower-case
/// the rest.
pub fn capitalize_words(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Upper-cased first letters of the trimmed first and last names.
pub fn initials(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .into_iter()
        .filter_map(|name| name.and_then(|n| n.trim().chars().next()))
        .flat_map(char::to_uppercase)
        .collect()
}

// ---------------------------------------------------------------------------
// Sanitization
// ---------------------------------------------------------------------------

/// Trim surrounding whitespace and strip angle brackets.
pub fn sanitize_input(value: &str) -> String {
    value.trim().replace(['<', '>'], "")
}

/// Sanitize every submitted form field into a JSON object suitable for
/// [`crate::validation::validate_employee`].
pub fn sanitize_form<I, K, V>(fields: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    fields
        .into_iter()
        .map(|(key, value)| (key.into(), Value::String(sanitize_input(value.as_ref()))))
        .collect()
}
