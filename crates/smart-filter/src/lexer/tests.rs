use super::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn value(v: &str) -> TokenKind {
    TokenKind::Value(v.to_string())
}

#[test]
fn test_operators_and_parens() {
    assert_eq!(
        kinds("(a=1||a=2)&&b~foo"),
        vec![
            TokenKind::LeftParen,
            value("a=1"),
            TokenKind::Or,
            value("a=2"),
            TokenKind::RightParen,
            TokenKind::And,
            value("b~foo"),
        ]
    );
}

#[test]
fn test_whitespace_is_discarded() {
    assert_eq!(
        kinds("  >=10 &&\t<=20  "),
        vec![value(">=10"), TokenKind::And, value("<=20")]
    );
}

#[test]
fn test_whitespace_splits_values() {
    assert_eq!(kinds("~john doe"), vec![value("~john"), value("doe")]);
}

#[test]
fn test_operator_values_are_opaque() {
    assert_eq!(
        kinds("in:1,2,3||between:20230101,20230105"),
        vec![
            value("in:1,2,3"),
            TokenKind::Or,
            value("between:20230101,20230105"),
        ]
    );
}

#[test]
fn test_spans_are_byte_offsets() {
    let tokens = Lexer::new("é && b").tokenize().unwrap();
    assert_eq!(tokens[0].span, (0, 2));
    assert_eq!(tokens[1].span, (3, 5));
    assert_eq!(tokens[2].lexeme, "b");
    assert_eq!(tokens[2].position(), 6);
    assert_eq!(tokens.len(), 3);
}

#[test]
fn test_single_ampersand_is_rejected() {
    let err = Lexer::new("a & b").tokenize().unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedToken {
            token: "&".to_string(),
            position: 2,
        }
    );
}

#[test]
fn test_triple_pipe_is_rejected() {
    assert!(Lexer::new("a|||b").tokenize().is_err());
}

#[test]
fn test_empty_input() {
    assert!(kinds("   ").is_empty());
}

#[test]
fn test_is_composite() {
    assert!(is_composite(">=1&&<=5"));
    assert!(is_composite("(x)"));
    assert!(!is_composite("~foo bar"));
    assert!(!is_composite("a|b"));
}
