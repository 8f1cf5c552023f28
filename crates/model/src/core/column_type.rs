use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a filterable column, derived from its declared cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    String,
    Int,
    Float,
    Bool,
    Temporal,
}

impl ColumnType {
    /// Maps a cast such as `"int"`, `"date"` or `"string:128"` to a column type.
    ///
    /// Only the part before the first `:` is significant. Unknown casts yield
    /// `None`; no predicate can be built safely for them.
    pub fn from_cast(cast: &str) -> Option<Self> {
        let base = cast.split(':').next().unwrap_or_default();
        match base.trim().to_ascii_lowercase().as_str() {
            "string" => Some(ColumnType::String),
            "int" | "integer" => Some(ColumnType::Int),
            "float" | "real" | "double" | "decimal" => Some(ColumnType::Float),
            "bool" | "boolean" => Some(ColumnType::Bool),
            "date" | "datetime" => Some(ColumnType::Temporal),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::String => write!(f, "string"),
            ColumnType::Int => write!(f, "int"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Bool => write!(f, "bool"),
            ColumnType::Temporal => write!(f, "temporal"),
        }
    }
}
