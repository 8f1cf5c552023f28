//! Entry point: turns a [`QueryRequest`] into an executable [`SmartQuery`].

use crate::{
    config::SmartFilterConfig,
    error::SmartQueryError,
    evaluator::TreeEvaluator,
    predicate::Predicate,
    query::SmartQuery,
    request::{FilterValue, QueryRequest, SortOrder, SortSpec},
    search,
};
use model::{
    core::{
        identifiers::{QualifiedColumn, sanitize_identifier},
        value::Value,
    },
    schema::{FieldConfig, ModelSchema},
};
use planner::query::{
    ast::{
        common::{OrderDir, TableRef},
        expr::Expr,
    },
    builder::select::SelectBuilder,
    dialect::DialectKind,
    ident_q,
};
use tracing::{debug, warn};

/// Builds the query for `request` against `schema`.
///
/// Filters that do not fit their column are dropped. The only error is a
/// composite filter that does not parse.
pub fn smart_query(
    schema: &ModelSchema,
    request: &QueryRequest,
    config: &SmartFilterConfig,
    dialect: DialectKind,
) -> Result<SmartQuery, SmartQueryError> {
    let table = sanitize_identifier(&schema.table)
        .trim_matches('.')
        .to_string();
    let evaluator = TreeEvaluator::new(&table, config);
    let filterable = filterable_fields(schema, request.filterable.as_deref());

    let mut predicate = Predicate::none();
    for (key, value) in &request.filters {
        let compiled = if *key == config.search_key {
            let searchable = filterable
                .iter()
                .filter(|(_, field)| field.is_searchable())
                .copied()
                .collect::<Vec<_>>();
            Predicate::any(
                usable_values(key, value, config)
                    .into_iter()
                    .map(|term| search::compile(&evaluator, &searchable, term)),
            )
        } else if let Some((name, field)) = filterable.iter().find(|(name, _)| *name == key.as_str()) {
            usable_values(key, value, config)
                .into_iter()
                .map(|raw| evaluator.compile_filter(name, field, raw))
                .collect::<Result<Vec<_>, _>>()
                .map(Predicate::any)
                .map_err(|source| SmartQueryError::MalformedFilter {
                    field: key.clone(),
                    source,
                })?
        } else {
            debug!(field = %key, "Ignoring filter on a field that is not filterable");
            continue;
        };
        predicate = predicate.and(compiled);
    }

    let mut builder = SelectBuilder::new()
        .select(projection(schema, &table, request.fields.as_deref()))
        .from(
            TableRef {
                schema: None,
                name: table.clone(),
            },
            None,
        );
    builder = predicate.apply(builder);

    for sort in &request.sort {
        builder = match sort_column(schema, &table, sort) {
            Some(column) => builder.order_by(ident_q(&column), Some(order_dir(sort.order))),
            None => {
                warn!(column = %sort.column, "Ignoring sort on an unknown column");
                builder
            }
        };
    }

    if let Some(pagination) = &request.pagination {
        let (limit, offset) = pagination.resolve(config);
        builder = builder
            .limit(Expr::Value(Value::Int(to_i64(limit))))
            .offset(Expr::Value(Value::Int(to_i64(offset))));
    }

    let query = SmartQuery::new(builder.build(), dialect);
    tracing::trace!(sql = %query.to_debug_sql(), "Assembled smart query");
    Ok(query)
}

/// Fields a filter may target: backed by a column, and either searchable or
/// a relation. Narrowed further by the caller's allow-list when given.
fn filterable_fields<'s>(
    schema: &'s ModelSchema,
    allow: Option<&[String]>,
) -> Vec<(&'s str, &'s FieldConfig)> {
    schema
        .fields
        .iter()
        .filter(|(_, field)| {
            field.db_column.is_some() && (field.is_searchable() || field.is_relation())
        })
        .filter(|(name, _)| allow.is_none_or(|allow| allow.iter().any(|a| a == *name)))
        .map(|(name, field)| (name.as_str(), field))
        .collect()
}

fn usable_values<'v>(key: &str, value: &'v FilterValue, config: &SmartFilterConfig) -> Vec<&'v str> {
    value
        .values()
        .into_iter()
        .filter(|raw| {
            if raw.len() > config.max_filter_length {
                warn!(
                    field = key,
                    len = raw.len(),
                    max = config.max_filter_length,
                    "Ignoring over-long filter value"
                );
                return false;
            }
            !raw.trim().is_empty()
        })
        .collect()
}

/// Resolves a logical field name (or an explicit `table.column`) to a
/// qualified column.
fn resolve_column(schema: &ModelSchema, table: &str, name: &str) -> Option<QualifiedColumn> {
    if QualifiedColumn::has_table(name) {
        return QualifiedColumn::parse(name);
    }
    let db_column = schema.field(name)?.db_column.as_deref()?;
    QualifiedColumn::resolve(db_column, table)
}

fn projection(schema: &ModelSchema, table: &str, fields: Option<&[String]>) -> Vec<Expr> {
    let columns = fields
        .unwrap_or_default()
        .iter()
        .filter_map(|name| {
            if let Some(prefix) = name.strip_suffix(".*") {
                let prefix = sanitize_identifier(prefix);
                return (!prefix.is_empty()).then(|| Expr::Wildcard(Some(prefix)));
            }
            let column = resolve_column(schema, table, name).map(|c| ident_q(&c));
            if column.is_none() {
                warn!(field = %name, "Dropping unknown field from projection");
            }
            column
        })
        .collect::<Vec<_>>();

    if columns.is_empty() {
        vec![Expr::Wildcard(Some(table.to_string()))]
    } else {
        columns
    }
}

fn sort_column(schema: &ModelSchema, table: &str, sort: &SortSpec) -> Option<QualifiedColumn> {
    resolve_column(schema, table, sort.column.trim())
}

fn order_dir(order: SortOrder) -> OrderDir {
    match order {
        SortOrder::Asc => OrderDir::Asc,
        SortOrder::Desc => OrderDir::Desc,
    }
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
