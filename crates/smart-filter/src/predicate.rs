//! Immutable compiled filters.
//!
//! A [`Predicate`] carries an optional WHERE condition together with the
//! joins that condition needs. Predicates are combined with [`Predicate::and`]
//! and [`Predicate::or`] and only touch the statement builder once, in the
//! assembler.

use model::core::identifiers::QualifiedColumn;
use planner::query::{
    ast::{
        common::{JoinKind, TableRef},
        expr::Expr,
    },
    builder::select::{FromState, SelectBuilder},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub alias: String,
    pub on: Expr,
}

impl Join {
    /// Qualifies a related column with the join alias. A prefix naming the
    /// joined table is rewritten to the alias as well.
    pub fn column(&self, raw: &str) -> Option<QualifiedColumn> {
        let mut column = QualifiedColumn::resolve(raw, &self.alias)?;
        if column.table.as_deref() == Some(self.table.as_str()) {
            column.table = Some(self.alias.clone());
        }
        Some(column)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicate {
    pub condition: Option<Expr>,
    pub joins: Vec<Join>,
}

impl Predicate {
    pub fn none() -> Self {
        Predicate::default()
    }

    pub fn condition(expr: Expr) -> Self {
        Predicate {
            condition: Some(expr),
            joins: Vec::new(),
        }
    }

    pub fn from_option(expr: Option<Expr>) -> Self {
        Predicate {
            condition: expr,
            joins: Vec::new(),
        }
    }

    /// True when the predicate neither filters nor joins.
    pub fn is_empty(&self) -> bool {
        self.condition.is_none() && self.joins.is_empty()
    }

    /// Adds a join unless one under the same alias is already present.
    /// A LEFT join wins over an INNER one for the same alias.
    pub fn with_join(mut self, join: Join) -> Self {
        match self.joins.iter_mut().find(|j| j.alias == join.alias) {
            Some(existing) if join.kind == JoinKind::Left => existing.kind = JoinKind::Left,
            Some(_) => {}
            None => self.joins.push(join),
        }
        self
    }

    /// Turns every join into a LEFT join so rows without a related row
    /// survive.
    pub fn outer_joins(mut self) -> Self {
        for join in &mut self.joins {
            join.kind = JoinKind::Left;
        }
        self
    }

    pub fn and(self, other: Predicate) -> Predicate {
        self.combine(other, Expr::and)
    }

    pub fn or(self, other: Predicate) -> Predicate {
        self.combine(other, Expr::or)
    }

    /// AND of every predicate; empty conditions are skipped.
    pub fn all(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
        predicates
            .into_iter()
            .fold(Predicate::none(), Predicate::and)
    }

    /// OR of every predicate; empty conditions are skipped.
    pub fn any(predicates: impl IntoIterator<Item = Predicate>) -> Predicate {
        predicates
            .into_iter()
            .fold(Predicate::none(), Predicate::or)
    }

    /// Writes the joins and the condition into the statement builder.
    pub fn apply(self, mut builder: SelectBuilder<FromState>) -> SelectBuilder<FromState> {
        for join in self.joins {
            builder = builder.join(
                join.kind,
                TableRef {
                    schema: None,
                    name: join.table,
                },
                Some(&join.alias),
                join.on,
            );
        }
        if let Some(condition) = self.condition {
            builder = builder.where_clause(condition);
        }
        builder
    }

    fn combine(mut self, other: Predicate, op: fn(Expr, Expr) -> Expr) -> Predicate {
        for join in other.joins {
            self = self.with_join(join);
        }
        self.condition = match (self.condition, other.condition) {
            (Some(left), Some(right)) => Some(op(left, right)),
            (left, right) => left.or(right),
        };
        self
    }
}
