use crate::{
    compiler::{Target, coerce},
    operator::Operator,
};
use chrono::Datelike;
use model::core::{column_type::ColumnType, value::Value};
use planner::query::ast::expr::{BinaryOperator, DatePart, Expr};

/// `date:`, `year:` and `month:` on temporal columns.
pub fn compile(op: Operator, target: &Target, value: &str) -> Option<Expr> {
    if target.ty != Some(ColumnType::Temporal) {
        return None;
    }

    let parts = match op {
        Operator::Date => {
            let date = coerce::compact_date(value)?;
            vec![
                (DatePart::Year, date.year()),
                (DatePart::Month, date.month() as i32),
                (DatePart::Day, date.day() as i32),
            ]
        }
        Operator::Year => vec![(DatePart::Year, coerce::compact_year(value)?)],
        Operator::Month => {
            let (year, month) = coerce::compact_month(value)?;
            vec![(DatePart::Year, year), (DatePart::Month, month as i32)]
        }
        _ => return None,
    };

    Expr::conjunction(parts.into_iter().map(|(part, n)| {
        Expr::binary(
            target.column.clone().date_part(part),
            BinaryOperator::Eq,
            Expr::Value(Value::Int(n as i64)),
        )
    }))
}
