//! Global search: one free-text term ORed across every searchable field.

use crate::{evaluator::TreeEvaluator, predicate::Predicate, relation};
use model::{core::identifiers::QualifiedColumn, schema::FieldConfig};
use tracing::debug;

/// Builds one OR group matching `term` against `fields`. Joins for related
/// searchable fields are added before any predicate, and at most once each.
pub fn compile(evaluator: &TreeEvaluator, fields: &[(&str, &FieldConfig)], term: &str) -> Predicate {
    let term = term.trim();
    if term.is_empty() {
        return Predicate::none();
    }

    let mut joins = Predicate::none();
    for (_, field) in fields {
        let (Some(rel), Some(_)) = (&field.relation, field.related_columns()) else {
            continue;
        };
        let local = field
            .db_column
            .as_deref()
            .and_then(|column| QualifiedColumn::resolve(column, evaluator.table()));
        if let Some(join) = local.and_then(|local| {
            relation::join(&local, rel, evaluator.config().relation_join)
        }) {
            joins = joins.with_join(join);
        }
    }

    let matches = Predicate::any(
        fields
            .iter()
            .map(|(name, field)| evaluator.compile_value(name, field, term)),
    );
    debug!(term, fields = fields.len(), joins = joins.joins.len(), "Compiled global search");

    joins.and(matches)
}
