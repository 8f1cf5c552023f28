use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: (usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    And,        // &&
    Or,         // ||
    LeftParen,  // (
    RightParen, // )

    /// Opaque filter value, e.g. `>=10` or `in:1,2`.
    Value(String),
}

impl TokenKind {
    /// Binding strength of a boolean operator; higher binds tighter.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            TokenKind::Or => Some(1),
            TokenKind::And => Some(2),
            _ => None,
        }
    }
}

impl Token {
    pub fn position(&self) -> usize {
        self.span.0
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::And => write!(f, "&&"),
            TokenKind::Or => write!(f, "||"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Value(v) => write!(f, "{v}"),
        }
    }
}
