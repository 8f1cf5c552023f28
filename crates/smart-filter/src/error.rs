use thiserror::Error;

/// A composite filter expression that cannot be turned into a tree.
///
/// Positions are byte offsets into the raw filter value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },

    #[error("Operator '{operator}' at position {position} is missing an operand")]
    MissingOperand { operator: String, position: usize },

    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("Empty filter expression")]
    Empty,
}

#[derive(Debug, Error)]
pub enum SmartQueryError {
    /// The caller sent a composite filter that does not parse. Callers
    /// usually answer this with a 400.
    #[error("Malformed filter for field '{field}': {source}")]
    MalformedFilter {
        field: String,
        #[source]
        source: ParseError,
    },

    #[error("Query execution failed: {0}")]
    Execution(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SmartQueryError {
    pub fn execution<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SmartQueryError::Execution(Box::new(err))
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, SmartQueryError::MalformedFilter { .. })
    }
}
