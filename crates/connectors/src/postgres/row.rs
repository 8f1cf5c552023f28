use model::{
    core::value::{FieldValue, Value},
    records::row::RowData,
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::fmt;
use tokio_postgres::{Row as PgRow, types::Json as PgJson};
use tracing::warn;

/// Borrowed result row, decoded column by column on demand.
pub struct DbRow<'a>(pub &'a PgRow);

impl DbRow<'_> {
    pub fn to_row_data(&self, entity: &str) -> RowData {
        let field_values = self
            .0
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, column)| FieldValue {
                name: column.name().to_string(),
                value: self.get_value(idx, column.type_().name()),
            })
            .collect();

        RowData::new(entity, field_values)
    }

    /// Decodes column `idx` by its Postgres type name. SQL `NULL` and
    /// unsupported types both come back as `None`.
    pub fn get_value(&self, idx: usize, type_name: &str) -> Option<Value> {
        let row = self.0;
        match type_name {
            "int2" => row.try_get::<_, Option<i16>>(idx).ok()?.map(|v| Value::Int(v.into())),
            "int4" => row.try_get::<_, Option<i32>>(idx).ok()?.map(|v| Value::Int(v.into())),
            "int8" => row.try_get::<_, Option<i64>>(idx).ok()?.map(Value::Int),
            "float4" => row.try_get::<_, Option<f32>>(idx).ok()?.map(|v| Value::Float(v.into())),
            "float8" => row.try_get::<_, Option<f64>>(idx).ok()?.map(Value::Float),
            "numeric" => row
                .try_get::<_, Option<Decimal>>(idx)
                .ok()?
                .and_then(|v| v.to_f64())
                .map(Value::Float),
            "bool" => row.try_get::<_, Option<bool>>(idx).ok()?.map(Value::Boolean),
            "text" | "varchar" | "bpchar" | "name" | "citext" => row
                .try_get::<_, Option<String>>(idx)
                .ok()?
                .map(Value::String),
            "json" | "jsonb" => row
                .try_get::<_, Option<PgJson<serde_json::Value>>>(idx)
                .ok()?
                .map(|json| Value::Json(json.0)),
            "date" => row
                .try_get::<_, Option<chrono::NaiveDate>>(idx)
                .ok()?
                .map(Value::Date),
            "timestamp" => row
                .try_get::<_, Option<chrono::NaiveDateTime>>(idx)
                .ok()?
                .map(Value::Timestamp),
            "timestamptz" => row
                .try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx)
                .ok()?
                .map(|v| Value::Timestamp(v.naive_utc())),
            other => {
                warn!(column = idx, type_name = other, "Unsupported column type, returning null");
                None
            }
        }
    }
}

impl fmt::Debug for DbRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
