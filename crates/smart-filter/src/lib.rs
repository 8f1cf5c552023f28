//! SmartFilter: compiles string-encoded filter parameters into
//! parameterized SQL.
//!
//! ```text
//! filters ──► evaluator ──► lexer/parser ──► operator ──► compiler ──► predicate
//!                 │                                          ▲
//!                 └──────────► relation / search ────────────┘
//! ```
//!
//! [`smart_query`] is the entry point; the returned [`SmartQuery`] renders
//! to SQL or runs through any [`QueryExecutor`].

pub mod assembler;
pub mod compiler;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod predicate;
pub mod query;
pub mod relation;
pub mod request;
pub mod search;

pub use assembler::smart_query;
pub use config::SmartFilterConfig;
pub use error::{ParseError, SmartQueryError};
pub use executor::QueryExecutor;
pub use query::SmartQuery;
pub use request::{FilterMap, FilterValue, Pagination, QueryRequest, SortOrder, SortSpec};
