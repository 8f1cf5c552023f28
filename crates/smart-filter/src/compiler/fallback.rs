use crate::{
    compiler::{Target, comparison, pattern},
    operator::Operator,
};
use model::core::column_type::ColumnType;
use planner::query::ast::expr::Expr;

/// A value with no operator prefix, matched by column type.
pub fn compile(target: &Target, value: &str) -> Option<Expr> {
    match target.ty {
        Some(ColumnType::String) => pattern::compile(Operator::Contains, target, value),
        Some(ColumnType::Temporal) => pattern::compile(Operator::StartsWith, target, value),
        Some(ColumnType::Int | ColumnType::Float | ColumnType::Bool) | None => {
            comparison::compile(Operator::Eq, target, value)
        }
    }
}
