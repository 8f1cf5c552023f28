use crate::{
    compiler::{Target, coerce},
    operator::Operator,
};
use model::core::{column_type::ColumnType, value::Value};
use planner::query::ast::expr::Expr;

/// `between:low,high` and `notbetween:low,high`.
///
/// Temporal bounds are compact date codes (`YYMMDD` or `YYYYMMDD`); the
/// upper bound is pushed to the end of its day so whole days are included.
pub fn compile(op: Operator, target: &Target, value: &str) -> Option<Expr> {
    let negated = match op {
        Operator::Between => false,
        Operator::NotBetween => true,
        _ => return None,
    };

    let bounds = value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect::<Vec<_>>();
    let [low, high, ..] = bounds.as_slice() else {
        return None;
    };

    let (low, high) = match target.ty {
        Some(ColumnType::Temporal) => {
            let low = coerce::compact_date(low)?;
            let high = coerce::compact_date(high)?.and_hms_opt(23, 59, 59)?;
            (Value::Date(low), Value::Timestamp(high))
        }
        ty => (coerce::scalar(low, ty)?, coerce::scalar(high, ty)?),
    };

    Some(Expr::Between {
        expr: Box::new(target.column.clone()),
        low: Box::new(Expr::Value(low)),
        high: Box::new(Expr::Value(high)),
        negated,
    })
}
