use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod error;
pub mod field;

pub use error::SchemaError;
pub use field::{FieldConfig, Relation, RelatedColumn, Searchable};

/// Filterable field metadata for one base table.
///
/// Fields are kept in a `BTreeMap` so every walk over them (global search in
/// particular) happens in the same order for the same schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    pub table: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldConfig>,
}

impl ModelSchema {
    pub fn new(table: &str) -> Self {
        ModelSchema {
            table: table.to_string(),
            fields: BTreeMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let schema: ModelSchema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn with_field(mut self, name: &str, field: FieldConfig) -> Self {
        self.fields.insert(name.to_string(), field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.get(name)
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.table.trim().is_empty() {
            return Err(SchemaError::EmptyTable);
        }
        Ok(())
    }
}
