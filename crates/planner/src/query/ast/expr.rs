//! Defines the AST for SQL expressions.

use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column or table identifier, e.g., `users` or `users.id`.
    Identifier(Ident),

    /// `*`, or `table.*` when qualified.
    Wildcard(Option<String>),

    /// A literal value, such as a string, number, boolean, or NULL.
    /// Always rendered as a bound parameter.
    Value(Value),

    /// A binary operation, e.g., `column = 'value'` or `a AND b`.
    BinaryOp(Box<BinaryOp>),

    /// A function call, e.g., `COUNT(*)` or `LOWER(name)`.
    FunctionCall(FunctionCall),

    /// An aliased expression, e.g. `COUNT(*) AS total_count`
    Alias { expr: Box<Expr>, alias: String },

    /// `CAST(expr AS <target>)`; the dialect picks the concrete type name.
    Cast { expr: Box<Expr>, target: CastTarget },

    /// `expr [NOT] IN (a, b, ...)`
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },

    /// `expr [NOT] BETWEEN low AND high`
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },

    /// `expr IS [NOT] NULL`
    IsNull { expr: Box<Expr>, negated: bool },

    /// Integer year, month or day of a temporal expression.
    DatePart { part: DatePart, expr: Box<Expr> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub qualifier: Option<String>, // e.g., the 'users' in 'users.id'
    pub name: String,              // e.g., the 'id' in 'users.id'
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub wildcard: bool, // represents the '*' in 'COUNT(*)'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Comparison
    Eq,    // =
    NotEq, // <>
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=
    Like,

    // Logical
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastTarget {
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

impl DatePart {
    pub fn keyword(&self) -> &'static str {
        match self {
            DatePart::Year => "YEAR",
            DatePart::Month => "MONTH",
            DatePart::Day => "DAY",
        }
    }
}

impl Expr {
    pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
        Expr::BinaryOp(Box::new(BinaryOp { left, op, right }))
    }

    pub fn and(self, other: Expr) -> Expr {
        Expr::binary(self, BinaryOperator::And, other)
    }

    pub fn or(self, other: Expr) -> Expr {
        Expr::binary(self, BinaryOperator::Or, other)
    }

    /// Folds the expressions into a left-deep `AND` chain.
    /// Returns `None` for an empty input.
    pub fn conjunction(exprs: impl IntoIterator<Item = Expr>) -> Option<Expr> {
        exprs.into_iter().reduce(Expr::and)
    }

    pub fn function(name: &str, args: Vec<Expr>) -> Expr {
        Expr::FunctionCall(FunctionCall {
            name: name.to_string(),
            args,
            wildcard: false,
        })
    }

    pub fn count_all() -> Expr {
        Expr::FunctionCall(FunctionCall {
            name: "COUNT".to_string(),
            args: vec![],
            wildcard: true,
        })
    }

    pub fn cast_text(self) -> Expr {
        Expr::Cast {
            expr: Box::new(self),
            target: CastTarget::Text,
        }
    }

    pub fn date_part(self, part: DatePart) -> Expr {
        Expr::DatePart {
            part,
            expr: Box::new(self),
        }
    }

    pub fn is_null(self, negated: bool) -> Expr {
        Expr::IsNull {
            expr: Box::new(self),
            negated,
        }
    }
}
