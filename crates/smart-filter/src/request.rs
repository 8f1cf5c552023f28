//! Request-side inputs: raw filters, sort, pagination and projection.

use crate::config::SmartFilterConfig;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, str::FromStr};

/// A raw filter parameter. Repeated query parameters arrive as `Many`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Single(String),
    Many(Vec<String>),
    Null,
}

impl FilterValue {
    /// Non-empty raw values, in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            FilterValue::Single(v) => vec![v.as_str()],
            FilterValue::Many(values) => values.iter().map(String::as_str).collect(),
            FilterValue::Null => Vec::new(),
        }
    }

    /// Adds another value for the same key, turning `Single` into `Many`.
    pub fn push(self, value: String) -> FilterValue {
        match self {
            FilterValue::Single(first) => FilterValue::Many(vec![first, value]),
            FilterValue::Many(mut values) => {
                values.push(value);
                FilterValue::Many(values)
            }
            FilterValue::Null => FilterValue::Single(value),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Single(value.to_string())
    }
}

pub type FilterMap = BTreeMap<String, FilterValue>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive; anything but `desc` sorts ascending.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(column: &str, order: SortOrder) -> Self {
        SortSpec {
            column: column.to_string(),
            order,
        }
    }
}

impl FromStr for SortSpec {
    type Err = String;

    /// Accepts `name`, `name:desc` and `-name`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (column, order) = match (s.strip_prefix('-'), s.split_once(':')) {
            (Some(column), _) => (column, SortOrder::Desc),
            (None, Some((column, order))) => (column, SortOrder::parse(order)),
            (None, None) => (s, SortOrder::Asc),
        };
        let column = column.trim();
        if column.is_empty() {
            return Err(format!("Invalid sort: '{s}'"));
        }
        Ok(SortSpec::new(column, order))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Pagination { page, limit }
    }

    /// Returns `(limit, offset)` after applying the configured defaults and
    /// the upper clamp.
    pub fn resolve(&self, config: &SmartFilterConfig) -> (u64, u64) {
        let page = self.page.max(1);
        let limit = match self.limit {
            0 => config.default_limit,
            limit => limit,
        }
        .clamp(1, config.max_limit.max(1));
        (limit, (page - 1).saturating_mul(limit))
    }
}

/// Everything a caller supplies for one list/search query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub filters: FilterMap,
    pub sort: Vec<SortSpec>,
    pub pagination: Option<Pagination>,
    /// Projection; `None` selects every column of the base table.
    pub fields: Option<Vec<String>>,
    /// Fields the caller allows filtering on; `None` allows every field the
    /// schema marks as filterable.
    pub filterable: Option<Vec<String>>,
}

impl QueryRequest {
    pub fn new() -> Self {
        QueryRequest::default()
    }

    pub fn filter(mut self, field: &str, value: &str) -> Self {
        let entry = match self.filters.remove(field) {
            Some(existing) => existing.push(value.to_string()),
            None => FilterValue::from(value),
        };
        self.filters.insert(field.to_string(), entry);
        self
    }

    pub fn sort(mut self, column: &str, order: SortOrder) -> Self {
        self.sort.push(SortSpec::new(column, order));
        self
    }

    pub fn paginate(mut self, page: u64, limit: u64) -> Self {
        self.pagination = Some(Pagination::new(page, limit));
        self
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn filterable(mut self, fields: &[&str]) -> Self {
        self.filterable = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_value_from_json() {
        let map: FilterMap =
            serde_json::from_str(r#"{"a": ">=1", "b": ["x", "y"], "c": null}"#).unwrap();
        assert_eq!(map["a"], FilterValue::Single(">=1".into()));
        assert_eq!(map["b"].values(), vec!["x", "y"]);
        assert_eq!(map["c"], FilterValue::Null);
        assert!(map["c"].values().is_empty());
    }

    #[test]
    fn test_repeated_filter_becomes_many() {
        let request = QueryRequest::new().filter("status", "open").filter("status", "draft");
        assert_eq!(
            request.filters["status"],
            FilterValue::Many(vec!["open".into(), "draft".into()])
        );
    }

    #[test]
    fn test_sort_spec_parse() {
        assert_eq!(
            "name:DESC".parse::<SortSpec>().unwrap(),
            SortSpec::new("name", SortOrder::Desc)
        );
        assert_eq!(
            "-created_at".parse::<SortSpec>().unwrap(),
            SortSpec::new("created_at", SortOrder::Desc)
        );
        assert_eq!(
            "name:sideways".parse::<SortSpec>().unwrap(),
            SortSpec::new("name", SortOrder::Asc)
        );
        assert!(":desc".parse::<SortSpec>().is_err());
    }

    #[test]
    fn test_pagination_resolve() {
        let config = SmartFilterConfig::default();
        assert_eq!(Pagination::new(1, 10).resolve(&config), (10, 0));
        assert_eq!(Pagination::new(3, 10).resolve(&config), (10, 20));
        assert_eq!(Pagination::new(0, 0).resolve(&config), (15, 0));
        assert_eq!(Pagination::new(2, 5000).resolve(&config), (1000, 1000));
    }
}
