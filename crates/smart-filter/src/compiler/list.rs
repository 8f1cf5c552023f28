use crate::{
    compiler::{Target, coerce},
    operator::Operator,
};
use planner::query::ast::expr::Expr;

/// `in:a,b,c` and `notin:a,b,c`. Blank and uncoercible entries are dropped.
pub fn compile(op: Operator, target: &Target, value: &str) -> Option<Expr> {
    let negated = match op {
        Operator::In => false,
        Operator::NotIn => true,
        _ => return None,
    };

    let list = value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| coerce::scalar(entry, target.ty))
        .map(Expr::Value)
        .collect::<Vec<_>>();

    if list.is_empty() {
        return None;
    }

    Some(Expr::InList {
        expr: Box::new(target.column.clone()),
        list,
        negated,
    })
}
