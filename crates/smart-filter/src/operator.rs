//! Prefix operators recognized at the start of a filter value.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    NotEq,
    Not,
    Eq,
    GtEq,
    LtEq,
    Gt,
    Lt,
    StartsWith,
    Contains,
    EndsWith,
    In,
    NotIn,
    Between,
    NotBetween,
    Date,
    Year,
    Month,
}

/// Operators in the order they are tried. A symbol that is a prefix of
/// another (`>` of `>=`, `!` of `!=`) must come after it.
pub const OPERATORS: [Operator; 17] = [
    Operator::NotEq,
    Operator::Not,
    Operator::Eq,
    Operator::GtEq,
    Operator::LtEq,
    Operator::Gt,
    Operator::Lt,
    Operator::StartsWith,
    Operator::Contains,
    Operator::EndsWith,
    Operator::In,
    Operator::NotIn,
    Operator::Between,
    Operator::NotBetween,
    Operator::Date,
    Operator::Year,
    Operator::Month,
];

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::NotEq => "!=",
            Operator::Not => "!",
            Operator::Eq => "=",
            Operator::GtEq => ">=",
            Operator::LtEq => "<=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::StartsWith => "^",
            Operator::Contains => "~",
            Operator::EndsWith => "$",
            Operator::In => "in:",
            Operator::NotIn => "notin:",
            Operator::Between => "between:",
            Operator::NotBetween => "notbetween:",
            Operator::Date => "date:",
            Operator::Year => "year:",
            Operator::Month => "month:",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A leaf value split into its operator (if any) and operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOperator {
    pub operator: Option<Operator>,
    pub value: String,
}

/// Splits a recognized operator prefix off `raw`.
///
/// The first operator in [`OPERATORS`] that prefixes the trimmed value wins.
/// When nothing follows it, the value is returned whole with no operator.
pub fn extract_operator(raw: &str) -> ParsedOperator {
    let trimmed = raw.trim();

    let matched = OPERATORS
        .iter()
        .find_map(|op| trimmed.strip_prefix(op.symbol()).map(|rest| (*op, rest.trim())));

    match matched {
        Some((op, rest)) if !rest.is_empty() => ParsedOperator {
            operator: Some(op),
            value: rest.to_string(),
        },
        _ => ParsedOperator {
            operator: None,
            value: trimmed.to_string(),
        },
    }
}

/// `IS NULL` / `IS NOT NULL` requested through a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullCheck {
    IsNull,
    IsNotNull,
}

/// Recognizes `null`, `=null`, `!null` and `!=null` (case-insensitive).
pub fn null_sentinel(raw: &str) -> Option<NullCheck> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "null" | "=null" => Some(NullCheck::IsNull),
        "!null" | "!=null" => Some(NullCheck::IsNotNull),
        _ => None,
    }
}
