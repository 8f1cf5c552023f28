//! Conversions from raw filter text to typed parameter values.

use chrono::{NaiveDate, NaiveDateTime};
use model::core::{column_type::ColumnType, value::Value};

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Integer if it parses as one, otherwise a float.
pub fn numeric(raw: &str, ty: ColumnType) -> Option<Value> {
    let raw = raw.trim();
    match ty {
        ColumnType::Int => raw
            .parse::<i64>()
            .map(Value::Int)
            .ok()
            .or_else(|| float(raw)),
        _ => float(raw),
    }
}

fn float(raw: &str) -> Option<Value> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Value::Float)
}

pub fn boolean(raw: &str) -> Option<Value> {
    Value::String(raw.trim().to_string())
        .as_bool()
        .map(Value::Boolean)
}

pub fn temporal(raw: &str) -> Option<Value> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(Value::Timestamp)
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .or_else(|| compact_date(raw))
                .map(Value::Date)
        })
}

/// Converts `raw` into a value of the column's type. `None` for the type
/// means an undeclared cast, which keeps the text as-is.
pub fn scalar(raw: &str, ty: Option<ColumnType>) -> Option<Value> {
    match ty {
        Some(numeric_ty @ (ColumnType::Int | ColumnType::Float)) => numeric(raw, numeric_ty),
        Some(ColumnType::Bool) => boolean(raw),
        Some(ColumnType::Temporal) => temporal(raw),
        Some(ColumnType::String) | None => Some(Value::String(raw.trim().to_string())),
    }
}

/// True when `raw` is made of ASCII digits only and its length is one of
/// `lengths`.
pub fn is_digits(raw: &str, lengths: &[usize]) -> bool {
    lengths.contains(&raw.len()) && raw.bytes().all(|b| b.is_ascii_digit())
}

/// Expands a two-digit year to `20YY`; four-digit years pass through.
pub fn full_year(digits: &str) -> Option<i32> {
    match digits.len() {
        2 => format!("20{digits}").parse().ok(),
        4 => digits.parse().ok(),
        _ => None,
    }
}

/// Parses `YYMMDD` or `YYYYMMDD` into a calendar date.
pub fn compact_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if !is_digits(raw, &[6, 8]) {
        return None;
    }
    let (year, rest) = raw.split_at(raw.len() - 4);
    let year = full_year(year)?;
    let month = rest[..2].parse().ok()?;
    let day = rest[2..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses `YYMM` or `YYYYMM` into a (year, month) pair.
pub fn compact_month(raw: &str) -> Option<(i32, u32)> {
    let raw = raw.trim();
    if !is_digits(raw, &[4, 6]) {
        return None;
    }
    let (year, month) = raw.split_at(raw.len() - 2);
    let month = month.parse::<u32>().ok().filter(|m| (1..=12).contains(m))?;
    Some((full_year(year)?, month))
}

/// Parses `YY` or `YYYY`.
pub fn compact_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if !is_digits(raw, &[2, 4]) {
        return None;
    }
    full_year(raw)
}
