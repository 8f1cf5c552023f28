/// Strips every character outside `[A-Za-z0-9_.]` from an identifier.
///
/// Field and column names reach the query builder from configuration and
/// from request parameters; neither is trusted.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
        .collect()
}

/// A possibly table-qualified column name, e.g. `users.email`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedColumn {
    pub table: Option<String>,
    pub column: String,
}

impl QualifiedColumn {
    /// Splits a sanitized `table.column` (or bare `column`) at the last dot.
    /// Returns `None` when nothing usable survives sanitizing.
    pub fn parse(raw: &str) -> Option<Self> {
        let clean = sanitize_identifier(raw);
        let clean = clean.trim_matches('.');
        if clean.is_empty() {
            return None;
        }

        match clean.rsplit_once('.') {
            Some((table, column)) if !table.is_empty() && !column.is_empty() => Some(Self {
                table: Some(table.to_string()),
                column: column.to_string(),
            }),
            _ => Some(Self {
                table: None,
                column: clean.to_string(),
            }),
        }
    }

    /// Qualifies a bare column with `default_table`; keeps an explicit prefix.
    pub fn resolve(raw: &str, default_table: &str) -> Option<Self> {
        Self::parse(raw).map(|mut col| {
            if col.table.is_none() {
                col.table = Some(sanitize_identifier(default_table));
            }
            col
        })
    }

    pub fn has_table(raw: &str) -> bool {
        raw.contains('.')
    }
}
