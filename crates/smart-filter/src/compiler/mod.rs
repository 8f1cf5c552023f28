//! Compiles one `(column, operator, value, type)` tuple into a WHERE
//! predicate.
//!
//! Input that cannot be turned into a safe predicate (non-numeric text on a
//! numeric column, a malformed date code, an empty list) yields `None` and
//! a debug event; it never fails the query.

use crate::operator::{Operator, extract_operator};
use model::core::{column_type::ColumnType, identifiers::QualifiedColumn};
use planner::query::{ast::expr::Expr, ident_q};
use tracing::debug;

pub mod coerce;
pub mod comparison;
pub mod fallback;
pub mod list;
pub mod pattern;
pub mod range;
pub mod temporal;

/// The column a predicate is built against.
#[derive(Debug, Clone)]
pub struct Target {
    pub column: Expr,
    pub label: String,
    /// `None` when the field declares no cast at all.
    pub ty: Option<ColumnType>,
}

impl Target {
    pub fn new(column: &QualifiedColumn, ty: Option<ColumnType>) -> Self {
        let label = match &column.table {
            Some(table) => format!("{table}.{}", column.column),
            None => column.column.clone(),
        };
        Target {
            column: ident_q(column),
            label,
            ty,
        }
    }
}

/// How a value without an operator prefix is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultMatch {
    /// Pick the idiom from the column type (contains for strings, equality
    /// for numbers and so on).
    ByType,
    /// Plain equality regardless of type.
    Equality,
}

type Handler = fn(Operator, &Target, &str) -> Option<Expr>;

fn handler(op: Operator) -> Handler {
    match op {
        Operator::NotEq
        | Operator::Not
        | Operator::Eq
        | Operator::GtEq
        | Operator::LtEq
        | Operator::Gt
        | Operator::Lt => comparison::compile,
        Operator::StartsWith | Operator::Contains | Operator::EndsWith => pattern::compile,
        Operator::In | Operator::NotIn => list::compile,
        Operator::Between | Operator::NotBetween => range::compile,
        Operator::Date | Operator::Year | Operator::Month => temporal::compile,
    }
}

/// Resolves a declared cast. An empty cast is untyped (`Ok(None)`); a cast
/// that names an unknown type is an error since no predicate is safe for it.
fn resolve_type(cast: &str) -> Result<Option<ColumnType>, ()> {
    if cast.trim().is_empty() {
        return Ok(None);
    }
    ColumnType::from_cast(cast).map(Some).ok_or(())
}

pub fn compile(
    column: &QualifiedColumn,
    cast: &str,
    raw: &str,
    default: DefaultMatch,
) -> Option<Expr> {
    let Ok(ty) = resolve_type(cast) else {
        debug!(column = %column.column, cast, "Skipping filter on unknown cast");
        return None;
    };
    let target = Target::new(column, ty);
    let parsed = extract_operator(raw);

    if parsed.value.is_empty() {
        debug!(column = %target.label, "Skipping empty filter value");
        return None;
    }

    let expr = match (parsed.operator, default) {
        (Some(op), _) => handler(op)(op, &target, &parsed.value),
        (None, DefaultMatch::ByType) => fallback::compile(&target, &parsed.value),
        (None, DefaultMatch::Equality) => comparison::compile(Operator::Eq, &target, &parsed.value),
    };

    if expr.is_none() {
        debug!(
            column = %target.label,
            operator = parsed.operator.map(|op| op.symbol()).unwrap_or("none"),
            value = %parsed.value,
            ty = ?target.ty,
            "Skipping filter predicate the value does not fit"
        );
    }
    expr
}
