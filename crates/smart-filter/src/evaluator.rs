//! Applies one filter value to one field, walking composite `&&`/`||`
//! expressions down to their leaves.

use crate::{
    compiler::{self, DefaultMatch},
    config::SmartFilterConfig,
    error::ParseError,
    lexer::is_composite,
    operator::{NullCheck, null_sentinel},
    parser::{self, Node},
    predicate::Predicate,
    relation,
};
use model::{core::identifiers::QualifiedColumn, schema::FieldConfig};
use planner::query::ident_q;
use tracing::debug;

pub struct TreeEvaluator<'a> {
    table: String,
    config: &'a SmartFilterConfig,
}

impl<'a> TreeEvaluator<'a> {
    pub fn new(table: &str, config: &'a SmartFilterConfig) -> Self {
        TreeEvaluator {
            table: table.to_string(),
            config,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn config(&self) -> &SmartFilterConfig {
        self.config
    }

    /// Compiles a raw filter value, parsing it first if it is composite.
    pub fn compile_filter(
        &self,
        name: &str,
        field: &FieldConfig,
        raw: &str,
    ) -> Result<Predicate, ParseError> {
        if null_sentinel(raw).is_some() || !is_composite(raw) {
            return Ok(self.compile_value(name, field, raw));
        }
        let tree = parser::parse(raw)?;
        debug!(field = name, %tree, "Parsed composite filter");
        let predicate = self.apply_tree(name, field, &tree);

        // An IS NULL leaf on the foreign key can only match under an outer join.
        if field.is_relation() && tree.any_leaf(&|leaf| null_sentinel(leaf).is_some()) {
            return Ok(predicate.outer_joins());
        }
        Ok(predicate)
    }

    pub fn apply_tree(&self, name: &str, field: &FieldConfig, node: &Node) -> Predicate {
        match node {
            Node::Leaf(raw) => self.compile_value(name, field, raw),
            Node::And(left, right) => self
                .apply_tree(name, field, left)
                .and(self.apply_tree(name, field, right)),
            Node::Or(left, right) => self
                .apply_tree(name, field, left)
                .or(self.apply_tree(name, field, right)),
        }
    }

    /// Compiles a single, non-composite value for one field.
    pub fn compile_value(&self, name: &str, field: &FieldConfig, raw: &str) -> Predicate {
        let Some(local) = field
            .db_column
            .as_deref()
            .and_then(|column| QualifiedColumn::resolve(column, &self.table))
        else {
            debug!(field = name, "Skipping field without a usable column");
            return Predicate::none();
        };

        if let Some(check) = null_sentinel(raw) {
            return Predicate::condition(ident_q(&local).is_null(check == NullCheck::IsNotNull));
        }

        match &field.relation {
            Some(rel) => relation::compile(&local, field, rel, raw, self.config.relation_join),
            None => Predicate::from_option(compiler::compile(
                &local,
                &field.cast,
                raw,
                DefaultMatch::ByType,
            )),
        }
    }
}
