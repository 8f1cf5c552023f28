//! Defines the `Dialect` trait for database-specific SQL syntax.

use crate::query::ast::expr::{CastTarget, DatePart};
use std::str::FromStr;

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    fn get_placeholder(&self, index: usize) -> String;

    /// Returns the type name used in `CAST(expr AS <type>)`.
    fn cast_type(&self, target: CastTarget) -> &'static str;

    /// Returns the text written before and after the inner expression when
    /// extracting an integer date part.
    ///
    /// - PostgreSQL: `CAST(EXTRACT(YEAR FROM ` .. `) AS INTEGER)`
    /// - MySQL: `YEAR(` .. `)`
    fn date_part(&self, part: DatePart) -> (String, String);

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', "\"\""))
    }

    fn get_placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn cast_type(&self, target: CastTarget) -> &'static str {
        match target {
            CastTarget::Text => "TEXT",
        }
    }

    fn date_part(&self, part: DatePart) -> (String, String) {
        (
            format!("CAST(EXTRACT({} FROM ", part.keyword()),
            ") AS INTEGER)".to_string(),
        )
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#"`{}`"#, ident.replace('`', "``"))
    }

    fn get_placeholder(&self, _index: usize) -> String {
        // MySQL uses ?
        "?".into()
    }

    fn cast_type(&self, target: CastTarget) -> &'static str {
        match target {
            CastTarget::Text => "CHAR",
        }
    }

    fn date_part(&self, part: DatePart) -> (String, String) {
        (format!("{}(", part.keyword()), ")".to_string())
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}

/// Dialect selector for configuration and command-line input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialectKind {
    #[default]
    Postgres,
    MySql,
}

impl DialectKind {
    pub fn dialect(&self) -> &'static dyn Dialect {
        match self {
            DialectKind::Postgres => &Postgres,
            DialectKind::MySql => &MySql,
        }
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DialectKind::Postgres),
            "mysql" => Ok(DialectKind::MySql),
            other => Err(format!("Unsupported dialect: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_escapes() {
        assert_eq!(Postgres.quote_identifier(r#"a"b"#), r#""a""b""#);
        assert_eq!(MySql.quote_identifier("a`b"), "`a``b`");
    }

    #[test]
    fn test_dialect_kind_from_str() {
        assert_eq!("PostgreSQL".parse::<DialectKind>(), Ok(DialectKind::Postgres));
        assert_eq!("mysql".parse::<DialectKind>(), Ok(DialectKind::MySql));
        assert!("sqlite".parse::<DialectKind>().is_err());
    }
}
