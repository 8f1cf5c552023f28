use crate::{compiler::Target, operator::Operator};
use model::core::{column_type::ColumnType, value::Value};
use planner::query::ast::expr::{BinaryOperator, Expr};

/// `LIKE` matching for `^`, `~` and `$`. String columns compare
/// case-insensitively; anything else is matched on its text form.
pub fn compile(op: Operator, target: &Target, value: &str) -> Option<Expr> {
    let pattern = match op {
        Operator::StartsWith => format!("{value}%"),
        Operator::Contains => format!("%{value}%"),
        Operator::EndsWith => format!("%{value}"),
        _ => return None,
    };

    let (column, pattern) = match target.ty {
        Some(ColumnType::String) => (
            Expr::function("LOWER", vec![target.column.clone()]),
            pattern.to_lowercase(),
        ),
        _ => (target.column.clone().cast_text(), pattern),
    };

    Some(Expr::binary(
        column,
        BinaryOperator::Like,
        Expr::Value(Value::String(pattern)),
    ))
}
