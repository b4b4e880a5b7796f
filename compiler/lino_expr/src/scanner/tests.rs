use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source)
        .expect("scan should succeed")
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn scans_arithmetic() {
    assert_eq!(
        kinds("x + 2.5 * (y - 1)"),
        vec![
            TokenKind::Ident("x".into()),
            TokenKind::Plus,
            TokenKind::Number(2.5),
            TokenKind::Star,
            TokenKind::LParen,
            TokenKind::Ident("y".into()),
            TokenKind::Minus,
            TokenKind::Number(1.0),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn scans_two_char_operators() {
    assert_eq!(
        kinds("a<=b >= c == d != e && f || !g"),
        vec![
            TokenKind::Ident("a".into()),
            TokenKind::LtEq,
            TokenKind::Ident("b".into()),
            TokenKind::GtEq,
            TokenKind::Ident("c".into()),
            TokenKind::EqEq,
            TokenKind::Ident("d".into()),
            TokenKind::NotEq,
            TokenKind::Ident("e".into()),
            TokenKind::AmpAmp,
            TokenKind::Ident("f".into()),
            TokenKind::PipePipe,
            TokenKind::Bang,
            TokenKind::Ident("g".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn scans_number_forms() {
    assert_eq!(
        kinds("12 .5 1e3 2.5E-1"),
        vec![
            TokenKind::Number(12.0),
            TokenKind::Number(0.5),
            TokenKind::Number(1000.0),
            TokenKind::Number(0.25),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn scans_strings_and_keywords() {
    assert_eq!(
        kinds("\"hello world\" 'x' true false"),
        vec![
            TokenKind::Str("hello world".into()),
            TokenKind::Str("x".into()),
            TokenKind::True,
            TokenKind::False,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unterminated_string() {
    assert_eq!(
        scan("1 + \"abc"),
        Err(ExprError::UnterminatedString { offset: 4 })
    );
}

#[test]
fn unexpected_character() {
    assert_eq!(
        scan("a $ b"),
        Err(ExprError::UnexpectedChar { ch: '$', offset: 2 })
    );
}

#[test]
fn lone_equals_is_rejected() {
    assert!(matches!(
        scan("a = b"),
        Err(ExprError::UnexpectedChar { ch: '=', .. })
    ));
}
