//! Shunting-yard parser for composite filter values.
//!
//! `&&` binds tighter than `||` and parentheses override both. Malformed
//! input is rejected with a [`ParseError`] instead of being guessed at.

use crate::{
    error::ParseError,
    lexer::{
        Lexer,
        token::{Token, TokenKind},
    },
};

pub mod node;

pub use node::Node;

pub fn parse(input: &str) -> Result<Node, ParseError> {
    let tokens = Lexer::new(input).tokenize()?;
    Parser::default().parse(tokens)
}

#[derive(Debug, Default)]
pub struct Parser {
    output: Vec<Node>,
    operators: Vec<Token>,
}

impl Parser {
    pub fn parse(mut self, tokens: Vec<Token>) -> Result<Node, ParseError> {
        if tokens.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut expect_operand = true;
        for token in tokens {
            match &token.kind {
                TokenKind::Value(value) => {
                    if !expect_operand {
                        return Err(unexpected(&token));
                    }
                    self.output.push(Node::Leaf(value.clone()));
                    expect_operand = false;
                }
                TokenKind::LeftParen => {
                    if !expect_operand {
                        return Err(unexpected(&token));
                    }
                    self.operators.push(token);
                }
                TokenKind::RightParen => {
                    if expect_operand {
                        return Err(self.dangling(&token));
                    }
                    self.close_group(&token)?;
                }
                TokenKind::And | TokenKind::Or => {
                    if expect_operand {
                        return Err(missing_operand(&token));
                    }
                    let precedence = token.kind.precedence().unwrap_or_default();
                    while self
                        .operators
                        .last()
                        .and_then(|top| top.kind.precedence())
                        .is_some_and(|top| top >= precedence)
                    {
                        self.reduce_top()?;
                    }
                    self.operators.push(token);
                    expect_operand = true;
                }
            }
        }

        if expect_operand {
            return Err(match self.operators.last() {
                Some(top) if top.kind == TokenKind::LeftParen => {
                    ParseError::UnbalancedParenthesis {
                        position: top.position(),
                    }
                }
                Some(top) => missing_operand(top),
                None => ParseError::Empty,
            });
        }

        while let Some(top) = self.operators.last() {
            if top.kind == TokenKind::LeftParen {
                return Err(ParseError::UnbalancedParenthesis {
                    position: top.position(),
                });
            }
            self.reduce_top()?;
        }

        match (self.output.pop(), self.output.is_empty()) {
            (Some(root), true) => Ok(root),
            _ => Err(ParseError::Empty),
        }
    }

    fn close_group(&mut self, paren: &Token) -> Result<(), ParseError> {
        loop {
            match self.operators.last() {
                None => {
                    return Err(ParseError::UnbalancedParenthesis {
                        position: paren.position(),
                    });
                }
                Some(top) if top.kind == TokenKind::LeftParen => {
                    self.operators.pop();
                    return Ok(());
                }
                Some(_) => self.reduce_top()?,
            }
        }
    }

    /// `)` where an operand belongs: `()` is an unexpected token, `a&&)` a
    /// missing operand, and a leading `)` an unbalanced parenthesis.
    fn dangling(&self, paren: &Token) -> ParseError {
        match self.operators.last() {
            Some(top) if top.kind == TokenKind::LeftParen => unexpected(paren),
            Some(top) => missing_operand(top),
            None => ParseError::UnbalancedParenthesis {
                position: paren.position(),
            },
        }
    }

    fn reduce_top(&mut self) -> Result<(), ParseError> {
        let Some(op) = self.operators.pop() else {
            return Ok(());
        };
        let (Some(right), Some(left)) = (self.output.pop(), self.output.pop()) else {
            return Err(missing_operand(&op));
        };
        let node = match op.kind {
            TokenKind::And => Node::and(left, right),
            TokenKind::Or => Node::or(left, right),
            _ => return Err(unexpected(&op)),
        };
        self.output.push(node);
        Ok(())
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        token: token.lexeme.clone(),
        position: token.position(),
    }
}

fn missing_operand(token: &Token) -> ParseError {
    ParseError::MissingOperand {
        operator: token.lexeme.clone(),
        position: token.position(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_leaf() {
        assert_eq!(parse(">=10").unwrap(), Node::leaf(">=10"));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let flat = parse("a&&b||c").unwrap();
        let grouped = parse("(a&&b)||c").unwrap();
        assert_eq!(flat, grouped);
        assert_eq!(
            flat,
            Node::or(Node::and(Node::leaf("a"), Node::leaf("b")), Node::leaf("c"))
        );

        let right = parse("a||b&&c").unwrap();
        assert_eq!(
            right,
            Node::or(Node::leaf("a"), Node::and(Node::leaf("b"), Node::leaf("c")))
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let nested = parse("a&&(b||c)").unwrap();
        assert_ne!(nested, parse("(a&&b)||c").unwrap());
        assert_eq!(
            nested,
            Node::and(Node::leaf("a"), Node::or(Node::leaf("b"), Node::leaf("c")))
        );
    }

    #[test]
    fn test_same_operator_is_left_associative() {
        assert_eq!(
            parse("a||b||c").unwrap(),
            Node::or(Node::or(Node::leaf("a"), Node::leaf("b")), Node::leaf("c"))
        );
    }

    #[test]
    fn test_deep_nesting() {
        let node = parse("((a||b)&&(c||(d&&e)))").unwrap();
        assert!(node.any_leaf(&|v| v == "e"));
        assert!(!node.any_leaf(&|v| v == "f"));
        assert_eq!(node.to_string(), "((a || b) && (c || (d && e)))");
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(
            parse("(a||b").unwrap_err(),
            ParseError::UnbalancedParenthesis { position: 0 }
        );
        assert_eq!(
            parse("a||b)").unwrap_err(),
            ParseError::UnbalancedParenthesis { position: 4 }
        );
        assert_eq!(
            parse(")a").unwrap_err(),
            ParseError::UnbalancedParenthesis { position: 0 }
        );
        assert_eq!(
            parse("a&&(").unwrap_err(),
            ParseError::UnbalancedParenthesis { position: 3 }
        );
    }

    #[test]
    fn test_dangling_operators() {
        assert_eq!(
            parse("a&&").unwrap_err(),
            ParseError::MissingOperand {
                operator: "&&".into(),
                position: 1,
            }
        );
        assert_eq!(
            parse("||a").unwrap_err(),
            ParseError::MissingOperand {
                operator: "||".into(),
                position: 0,
            }
        );
        assert_eq!(
            parse("(a&&)").unwrap_err(),
            ParseError::MissingOperand {
                operator: "&&".into(),
                position: 2,
            }
        );
        assert!(matches!(
            parse("a&&||b").unwrap_err(),
            ParseError::MissingOperand { .. }
        ));
    }

    #[test]
    fn test_adjacent_operands() {
        assert_eq!(
            parse("a b").unwrap_err(),
            ParseError::UnexpectedToken {
                token: "b".into(),
                position: 2,
            }
        );
        assert!(matches!(
            parse("(a)(b)").unwrap_err(),
            ParseError::UnexpectedToken { .. }
        ));
        assert!(matches!(
            parse("()").unwrap_err(),
            ParseError::UnexpectedToken { .. }
        ));
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse("").unwrap_err(), ParseError::Empty);
        assert_eq!(parse("  ").unwrap_err(), ParseError::Empty);
    }
}
