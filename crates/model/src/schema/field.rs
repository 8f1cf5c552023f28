use crate::schema::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-field filter configuration supplied by the model metadata layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFieldConfig", into = "RawFieldConfig")]
pub struct FieldConfig {
    /// Physical column; `None` when the field is not backed by a column.
    pub db_column: Option<String>,
    /// Declared cast, e.g. `int`, `date` or `string:128`.
    pub cast: String,
    pub searchable: Searchable,
    pub relation: Option<Relation>,
}

/// Whether a field takes part in filtering and global search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Searchable {
    Flag(bool),
    /// Columns of the related table to match against, parsed from
    /// `"column:cast|column:cast"`.
    Related(Vec<RelatedColumn>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedColumn {
    pub column: String,
    pub cast: String,
}

/// Foreign-key target of a relation field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub belongs_to: String,
    pub related_field: String,
}

impl FieldConfig {
    pub fn column(db_column: &str, cast: &str) -> Self {
        FieldConfig {
            db_column: Some(db_column.to_string()),
            cast: cast.to_string(),
            searchable: Searchable::Flag(false),
            relation: None,
        }
    }

    pub fn foreign_key(db_column: &str, cast: &str, belongs_to: &str, related_field: &str) -> Self {
        FieldConfig {
            db_column: Some(db_column.to_string()),
            cast: cast.to_string(),
            searchable: Searchable::Flag(false),
            relation: Some(Relation {
                belongs_to: belongs_to.to_string(),
                related_field: related_field.to_string(),
            }),
        }
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = Searchable::Flag(true);
        self
    }

    pub fn search_related(mut self, raw: &str) -> Self {
        self.searchable = Searchable::parse_related(raw);
        self
    }

    pub fn is_relation(&self) -> bool {
        self.relation.is_some()
    }

    pub fn is_searchable(&self) -> bool {
        match &self.searchable {
            Searchable::Flag(flag) => *flag,
            Searchable::Related(columns) => !columns.is_empty(),
        }
    }

    /// Related-table columns, if this is a relation searched through a join.
    pub fn related_columns(&self) -> Option<&[RelatedColumn]> {
        match (&self.relation, &self.searchable) {
            (Some(_), Searchable::Related(columns)) if !columns.is_empty() => Some(columns),
            _ => None,
        }
    }
}

impl Searchable {
    /// Parses `"name:string|code:string"`. A pair without a cast is a string
    /// column; empty segments are skipped.
    pub fn parse_related(raw: &str) -> Self {
        let columns = raw
            .split('|')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (column, cast) = pair.split_once(':').unwrap_or((pair, "string"));
                let column = column.trim();
                if column.is_empty() {
                    return None;
                }
                Some(RelatedColumn {
                    column: column.to_string(),
                    cast: cast.trim().to_string(),
                })
            })
            .collect();
        Searchable::Related(columns)
    }
}

impl fmt::Display for Searchable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Searchable::Flag(flag) => write!(f, "{flag}"),
            Searchable::Related(columns) => {
                let pairs = columns
                    .iter()
                    .map(|c| format!("{}:{}", c.column, c.cast))
                    .collect::<Vec<_>>();
                write!(f, "{}", pairs.join("|"))
            }
        }
    }
}

/// Wire shape of a field: flat keys, `searchable` as bool or pipe string.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawFieldConfig {
    #[serde(default)]
    db_column: Option<String>,
    #[serde(default)]
    cast: String,
    #[serde(default)]
    searchable: RawSearchable,
    #[serde(default)]
    relation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    belongs_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    related_field: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawSearchable {
    Flag(bool),
    Columns(String),
}

impl Default for RawSearchable {
    fn default() -> Self {
        RawSearchable::Flag(false)
    }
}

impl TryFrom<RawFieldConfig> for FieldConfig {
    type Error = SchemaError;

    fn try_from(raw: RawFieldConfig) -> Result<Self, Self::Error> {
        let relation = if raw.relation {
            let belongs_to = raw.belongs_to.filter(|t| !t.trim().is_empty()).ok_or_else(|| {
                SchemaError::MissingRelationTarget(raw.db_column.clone().unwrap_or_default())
            })?;
            Some(Relation {
                belongs_to,
                related_field: raw.related_field.unwrap_or_else(|| "id".to_string()),
            })
        } else {
            None
        };

        let searchable = match raw.searchable {
            RawSearchable::Flag(flag) => Searchable::Flag(flag),
            RawSearchable::Columns(columns) => Searchable::parse_related(&columns),
        };

        Ok(FieldConfig {
            db_column: raw.db_column,
            cast: raw.cast,
            searchable,
            relation,
        })
    }
}

impl From<FieldConfig> for RawFieldConfig {
    fn from(field: FieldConfig) -> Self {
        let searchable = match &field.searchable {
            Searchable::Flag(flag) => RawSearchable::Flag(*flag),
            related => RawSearchable::Columns(related.to_string()),
        };
        let (belongs_to, related_field) = match field.relation {
            Some(rel) => (Some(rel.belongs_to), Some(rel.related_field)),
            None => (None, None),
        };

        RawFieldConfig {
            relation: belongs_to.is_some(),
            db_column: field.db_column,
            cast: field.cast,
            searchable,
            belongs_to,
            related_field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_related_columns() {
        let searchable = Searchable::parse_related("name:string|code:string:16||label");
        let Searchable::Related(columns) = searchable else {
            panic!("Expected related columns");
        };
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].column, "name");
        assert_eq!(columns[1].cast, "string:16");
        assert_eq!(columns[2].column, "label");
        assert_eq!(columns[2].cast, "string");
    }

    #[test]
    fn test_relation_with_flag_has_no_related_columns() {
        let field = FieldConfig::foreign_key("company_id", "int", "companies", "id");
        assert!(field.is_relation());
        assert!(field.related_columns().is_none());
    }

    #[test]
    fn test_related_field_defaults_to_id() {
        let json = r#"{"db_column": "owner_id", "cast": "int", "relation": true,
                       "belongs_to": "users", "searchable": "email:string"}"#;
        let field: FieldConfig = serde_json::from_str(json).unwrap();
        assert_eq!(field.relation.unwrap().related_field, "id");
    }

    #[test]
    fn test_serialize_keeps_wire_shape() {
        let field = FieldConfig::foreign_key("company_id", "int", "companies", "id")
            .search_related("name:string");
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["relation"], serde_json::json!(true));
        assert_eq!(json["searchable"], serde_json::json!("name:string"));

        let back: FieldConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }
}
