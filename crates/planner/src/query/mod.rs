use crate::query::ast::expr::{Expr, Ident};
use model::core::identifiers::QualifiedColumn;

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod macros;
pub mod renderer;

/// Column reference for an already sanitized, possibly qualified column.
pub fn ident_q(col: &QualifiedColumn) -> Expr {
    Expr::Identifier(Ident {
        qualifier: col.table.clone(),
        name: col.column.clone(),
    })
}
