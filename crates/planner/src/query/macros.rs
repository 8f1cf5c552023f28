#[macro_export]
macro_rules! value {
    ($val:expr) => {
        $crate::query::ast::expr::Expr::Value($val)
    };
}

#[macro_export]
macro_rules! table_ref {
    ($name:expr) => {
        $crate::query::ast::common::TableRef {
            schema: None,
            name: $name.to_string(),
        }
    };
}

/// `ident!("col")` or `ident!("table", "col")`.
#[macro_export]
macro_rules! ident {
    ($name:expr) => {
        $crate::query::ast::expr::Expr::Identifier($crate::query::ast::expr::Ident {
            qualifier: None,
            name: $name.to_string(),
        })
    };
    ($qualifier:expr, $name:expr) => {
        $crate::query::ast::expr::Expr::Identifier($crate::query::ast::expr::Ident {
            qualifier: Some($qualifier.to_string()),
            name: $name.to_string(),
        })
    };
}
