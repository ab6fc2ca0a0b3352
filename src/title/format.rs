//! `%`-marker substitution for title templates.
//!
//! Supported markers: `%s` (string), `%d`/`%i` (integer), `%f` (float),
//! `%j` (JSON) and `%%` (a literal percent sign). Markers consume tuple values
//! left to right. Values left over are ignored; markers left over stay in the
//! output verbatim.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([%sdifj])").expect("marker pattern is valid"));

const NAN: &str = "NaN";

/// Substitution result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formatted {
    /// The rendered title.
    pub text: String,
    /// Markers that had no value to consume.
    pub unfilled: usize,
}

/// Whether `template` contains at least one value-consuming marker.
#[must_use]
pub fn has_markers(template: &str) -> bool {
    MARKER.captures_iter(template).any(|caps| &caps[1] != "%")
}

/// Substitute `values` into `template`.
///
/// ```
/// use each_case::title::format::format;
/// use serde_json::json;
///
/// let out = format("adds %d and %d then returns %d", &[json!(1), json!(1), json!(2)]);
/// assert_eq!(out.text, "adds 1 and 1 then returns 2");
/// ```
#[must_use]
pub fn format(template: &str, values: &[Value]) -> Formatted {
    let mut remaining = values.iter();
    let mut unfilled = 0;
    let text = MARKER
        .replace_all(template, |caps: &Captures<'_>| {
            let marker = &caps[1];
            if marker == "%" {
                return "%".to_owned();
            }
            if let Some(value) = remaining.next() {
                render(marker, value)
            } else {
                unfilled += 1;
                caps[0].to_owned()
            }
        })
        .into_owned();
    Formatted { text, unfilled }
}

fn render(marker: &str, value: &Value) -> String {
    match marker {
        "d" | "i" => integer(value),
        "f" => float(value),
        "j" => value.to_string(),
        _ => string(value),
    }
}

fn string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn integer(value: &Value) -> String {
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                int.to_string()
            } else if let Some(uint) = number.as_u64() {
                uint.to_string()
            } else {
                number.as_f64().map_or_else(|| NAN.to_owned(), truncated)
            }
        }
        Value::Bool(flag) => u8::from(*flag).to_string(),
        Value::String(text) => leading_integer(text).unwrap_or_else(|| NAN.to_owned()),
        Value::Null | Value::Array(_) | Value::Object(_) => NAN.to_owned(),
    }
}

fn float(value: &Value) -> String {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::Bool(flag) => Some(f64::from(u8::from(*flag))),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    parsed.map_or_else(|| NAN.to_owned(), decimal)
}

fn truncated(float: f64) -> String {
    // Adding zero folds `-0` into `0`.
    decimal(float.trunc() + 0.0)
}

/// Plain notation below `1e21`, the JSON exponent form from there on.
fn decimal(float: f64) -> String {
    if float.is_nan() {
        NAN.to_owned()
    } else if float.is_infinite() {
        if float > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else if float.abs() >= 1e21 {
        Value::from(float).to_string()
    } else {
        float.to_string()
    }
}

/// Parse an optional sign followed by decimal digits, ignoring any tail.
fn leading_integer(text: &str) -> Option<String> {
    let text = text.trim_start();
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return Some("0".to_owned());
    }
    Some(format!("{sign}{trimmed}"))
}
