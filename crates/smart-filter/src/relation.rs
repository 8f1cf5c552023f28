//! Foreign-key fields: joins the related table and matches the filter value
//! against its searchable columns.

use crate::{
    compiler::{self, DefaultMatch},
    predicate::{Join, Predicate},
};
use model::{
    core::identifiers::{QualifiedColumn, sanitize_identifier},
    schema::{FieldConfig, Relation},
};
use planner::query::{
    ast::{
        common::JoinKind,
        expr::{BinaryOperator, Expr},
    },
    ident_q,
};
use tracing::debug;

/// Compiles `raw` for a relation field whose local column is `local`.
///
/// Without related columns to search, the value is matched against the
/// foreign key itself and no join is made.
pub fn compile(
    local: &QualifiedColumn,
    field: &FieldConfig,
    relation: &Relation,
    raw: &str,
    kind: JoinKind,
) -> Predicate {
    let Some(columns) = field.related_columns() else {
        return Predicate::from_option(compiler::compile(
            local,
            &field.cast,
            raw,
            DefaultMatch::Equality,
        ));
    };

    let Some(join) = join(local, relation, kind) else {
        debug!(belongs_to = %relation.belongs_to, "Skipping relation with unusable target");
        return Predicate::none();
    };

    let matches = Predicate::any(columns.iter().filter_map(|related| {
        let column = join.column(&related.column)?;
        compiler::compile(&column, &related.cast, raw, DefaultMatch::ByType).map(Predicate::condition)
    }));

    if matches.condition.is_none() {
        debug!(alias = %join.alias, raw, "No related column accepted the value, not joining");
        return Predicate::none();
    }
    matches.with_join(join)
}

/// `JOIN related AS related_fk ON related_fk.related_field = base.local_column`.
///
/// The alias is named after the related table and the local foreign key, so
/// two relations into one table (or a table into itself) each get their own
/// join.
pub fn join(local: &QualifiedColumn, relation: &Relation, kind: JoinKind) -> Option<Join> {
    let table = sanitize_identifier(&relation.belongs_to)
        .trim_matches('.')
        .to_string();
    if table.is_empty() {
        return None;
    }
    let alias = format!("{}_{}", table.replace('.', "_"), local.column);
    let related_key = QualifiedColumn::resolve(&relation.related_field, &alias)?;
    debug!(%table, %alias, related_field = %related_key.column, "Joining related table");

    Some(Join {
        kind,
        on: Expr::binary(ident_q(&related_key), BinaryOperator::Eq, ident_q(local)),
        table,
        alias,
    })
}
