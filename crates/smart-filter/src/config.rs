use planner::query::ast::common::JoinKind;
use serde::{Deserialize, Serialize};

/// Tunables for query assembly. Every key is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartFilterConfig {
    /// Reserved filter key that triggers global search.
    pub search_key: String,
    pub default_limit: u64,
    pub max_limit: u64,
    /// Raw filter values longer than this are ignored.
    pub max_filter_length: usize,
    /// Join used for relation fields.
    pub relation_join: JoinKind,
}

impl Default for SmartFilterConfig {
    fn default() -> Self {
        SmartFilterConfig {
            search_key: "search".to_string(),
            default_limit: 15,
            max_limit: 1000,
            max_filter_length: 2048,
            relation_join: JoinKind::Inner,
        }
    }
}

impl SmartFilterConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
