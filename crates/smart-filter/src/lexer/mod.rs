//! Splits a composite filter string into `&&`, `||`, parentheses and
//! opaque value runs. Whitespace between tokens is dropped; there is no
//! escaping, so a value can never contain any of the four delimiters.

use crate::{
    error::ParseError,
    lexer::token::{Token, TokenKind},
};

pub mod token;

#[cfg(test)]
mod tests;

#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            tokens: Vec::new(),
        }
    }

    /// Consumes the lexer and hands back the token list.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let input = self.input;
        let bytes = input.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() {
            let rest = &input[pos..];
            match bytes[pos] {
                b if b.is_ascii_whitespace() => pos += 1,
                _ if rest.starts_with("||") => pos = self.add_token(TokenKind::Or, pos, 2),
                _ if rest.starts_with("&&") => pos = self.add_token(TokenKind::And, pos, 2),
                b'(' => pos = self.add_token(TokenKind::LeftParen, pos, 1),
                b')' => pos = self.add_token(TokenKind::RightParen, pos, 1),
                b @ (b'&' | b'|') => {
                    return Err(ParseError::UnexpectedToken {
                        token: (b as char).to_string(),
                        position: pos,
                    });
                }
                _ => {
                    let len = rest.bytes().take_while(|b| !is_delimiter(*b)).count();
                    let value = rest[..len].to_string();
                    pos = self.add_token(TokenKind::Value(value), pos, len);
                }
            }
        }

        tracing::trace!(input, tokens = self.tokens.len(), "Tokenized filter expression");
        Ok(self.tokens)
    }

    fn add_token(&mut self, kind: TokenKind, start: usize, len: usize) -> usize {
        let end = start + len;
        self.tokens.push(Token {
            kind,
            lexeme: self.input[start..end].to_string(),
            span: (start, end),
        });
        end
    }
}

fn is_delimiter(b: u8) -> bool {
    matches!(b, b'|' | b'&' | b'(' | b')') || b.is_ascii_whitespace()
}

/// True when the value uses any composite syntax and must be tokenized.
pub fn is_composite(value: &str) -> bool {
    value.contains("&&") || value.contains("||") || value.contains('(') || value.contains(')')
}
