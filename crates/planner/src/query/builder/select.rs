//! Provides a type-safe, fluent builder for constructing `Select` ASTs.

// --- Typestate Marker Structs ---
// These zero-sized structs represent the state of the builder.
// They ensure that methods are called in the correct SQL order at compile time.

use crate::query::ast::{
    common::{JoinKind, OrderDir, TableRef},
    expr::Expr,
    select::{FromClause, JoinClause, OrderByExpr, Select},
};

/// The initial state of the builder before any clauses have been added.
#[derive(Debug, Default, Clone)]
pub struct InitialState;

/// The state after the `SELECT` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct SelectState;

/// The state after the `FROM` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct FromState;

// --- The Main Builder ---

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    ast: Select,
    #[allow(dead_code)]
    state: State,
}

impl Default for SelectBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implementation for the initial state of the builder.
impl SelectBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: Select::default(),
            state: InitialState,
        }
    }

    /// Adds a `SELECT` clause with a list of columns.
    /// This is the entry point for building a select query.
    pub fn select(mut self, columns: Vec<Expr>) -> SelectBuilder<SelectState> {
        self.ast.columns = columns;
        SelectBuilder {
            ast: self.ast,
            state: SelectState,
        }
    }
}

/// Implementation for the state after `SELECT` has been called.
/// The only valid next step is to specify a `FROM` table.
impl SelectBuilder<SelectState> {
    /// Adds a `FROM` clause specifying the primary table.
    pub fn from(mut self, table: TableRef, alias: Option<&str>) -> SelectBuilder<FromState> {
        self.ast.from = Some(FromClause {
            table,
            alias: alias.map(String::from),
        });
        SelectBuilder {
            ast: self.ast,
            state: FromState,
        }
    }
}

/// Implementation for the state after `FROM` has been called.
/// From here, we can add optional clauses like `JOIN`, `WHERE`, etc.
impl SelectBuilder<FromState> {
    /// Adds a `JOIN` clause to the query.
    pub fn join(mut self, kind: JoinKind, table: TableRef, alias: Option<&str>, on: Expr) -> Self {
        self.ast.joins.push(JoinClause {
            kind,
            table,
            alias: alias.map(String::from),
            on,
        });
        self
    }

    /// Adds a `WHERE` condition. A second call ANDs onto the existing one.
    pub fn where_clause(mut self, condition: Expr) -> Self {
        self.ast.where_clause = Some(match self.ast.where_clause.take() {
            Some(existing) => existing.and(condition),
            None => condition,
        });
        self
    }

    /// Adds an `ORDER BY` clause to the query.
    pub fn order_by(mut self, expr: Expr, direction: Option<OrderDir>) -> Self {
        self.ast.order_by.push(OrderByExpr { expr, direction });
        self
    }

    /// Adds a `LIMIT` clause to the query.
    pub fn limit(mut self, limit: Expr) -> Self {
        self.ast.limit = Some(limit);
        self
    }

    /// Adds an `OFFSET` clause to the query.
    pub fn offset(mut self, offset: Expr) -> Self {
        self.ast.offset = Some(offset);
        self
    }

    /// Finalizes and returns the constructed `Select` AST.
    pub fn build(self) -> Select {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::{
        ident,
        query::{
            ast::{
                common::{JoinKind, OrderDir},
                expr::{BinaryOperator, Expr},
            },
            builder::select::SelectBuilder,
        },
        table_ref, value,
    };

    #[test]
    fn test_build_simple_select() {
        let ast = SelectBuilder::new()
            .select(vec![ident!("id"), ident!("name")])
            .from(table_ref!("users"), None)
            .build();

        assert_eq!(ast.columns, vec![ident!("id"), ident!("name")]);
        assert_eq!(ast.from.unwrap().table.name, "users");
        assert!(ast.where_clause.is_none());
    }

    #[test]
    fn test_repeated_where_is_anded() {
        let first = Expr::binary(ident!("u", "age"), BinaryOperator::Gt, value!(Value::Int(18)));
        let second = ident!("u", "active").is_null(true);

        let ast = SelectBuilder::new()
            .select(vec![ident!("email")])
            .from(table_ref!("users"), Some("u"))
            .where_clause(first.clone())
            .where_clause(second.clone())
            .build();

        assert_eq!(ast.from.unwrap().alias, Some("u".to_string()));
        assert_eq!(ast.where_clause, Some(first.and(second)));
    }

    #[test]
    fn test_build_with_join_and_ordering() {
        let ast = SelectBuilder::new()
            .select(vec![ident!("u", "name"), ident!("p", "title")])
            .from(table_ref!("users"), Some("u"))
            .join(
                JoinKind::Left,
                table_ref!("posts"),
                Some("p"),
                Expr::binary(ident!("u", "id"), BinaryOperator::Eq, ident!("p", "user_id")),
            )
            .order_by(ident!("p", "created_at"), Some(OrderDir::Desc))
            .limit(value!(Value::Int(10)))
            .offset(value!(Value::Int(20)))
            .build();

        assert_eq!(ast.joins.len(), 1);
        assert_eq!(ast.joins[0].kind, JoinKind::Left);
        assert_eq!(ast.joins[0].alias.as_deref(), Some("p"));
        assert_eq!(ast.order_by[0].direction, Some(OrderDir::Desc));
        assert_eq!(ast.limit, Some(value!(Value::Int(10))));
    }

    #[test]
    fn test_count_drops_order_and_paging() {
        let ast = SelectBuilder::new()
            .select(vec![ident!("id")])
            .from(table_ref!("users"), None)
            .order_by(ident!("id"), None)
            .limit(value!(Value::Int(5)))
            .build();

        let count = ast.to_count("aggregate");
        assert_eq!(count.columns.len(), 1);
        assert!(count.order_by.is_empty());
        assert!(count.limit.is_none());
        assert_eq!(count.from, ast.from);
    }
}
