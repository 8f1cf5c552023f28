use crate::{
    compiler::{Target, coerce},
    operator::Operator,
};
use planner::query::ast::expr::{BinaryOperator, Expr};

pub fn compile(op: Operator, target: &Target, value: &str) -> Option<Expr> {
    let op = match op {
        Operator::Eq => BinaryOperator::Eq,
        Operator::NotEq | Operator::Not => BinaryOperator::NotEq,
        Operator::Gt => BinaryOperator::Gt,
        Operator::GtEq => BinaryOperator::GtEq,
        Operator::Lt => BinaryOperator::Lt,
        Operator::LtEq => BinaryOperator::LtEq,
        _ => return None,
    };
    let value = coerce::scalar(value, target.ty)?;
    Some(Expr::binary(target.column.clone(), op, Expr::Value(value)))
}
