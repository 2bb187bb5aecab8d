use super::*;
use crate::location::SourceLocation;

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source).map(|t| t.kind).collect()
}

#[test]
fn test_basic1() {
    use TokenKind as T;
    let lexed = kinds("int x = 1; return x;");
    let expected = vec![
        T::Int,
        T::Identifier,
        T::Assign,
        T::Constant,
        T::Semicolon,
        T::Return,
        T::Identifier,
        T::Semicolon,
    ];
    assert_eq!(expected, lexed);
}

#[test]
fn test_keywords() {
    use TokenKind as T;
    let lexed = kinds("if else while for return break continue int bool true false struct iffy");
    let expected = vec![
        T::If,
        T::Else,
        T::While,
        T::For,
        T::Return,
        T::Break,
        T::Continue,
        T::Int,
        T::Bool,
        T::True,
        T::False,
        T::Struct,
        T::Identifier,
    ];
    assert_eq!(expected, lexed);
}

#[test]
fn test_mchar_operators() {
    use TokenKind as T;
    assert_eq!(kinds("<<"), vec![T::ShiftLeft]);
    assert_eq!(kinds("<="), vec![T::IsLessThanOrEqual]);
    assert_eq!(kinds("<x"), vec![T::IsLessThan, T::Identifier]);
    assert_eq!(kinds(">>="), vec![T::ShiftRight, T::Assign]);
    assert_eq!(kinds("a&&b&c"), vec![
        T::Identifier,
        T::LogicalAnd,
        T::Identifier,
        T::BitwiseAnd,
        T::Identifier
    ]);
    assert_eq!(kinds("|| | != ! == ="), vec![
        T::LogicalOr,
        T::BitwiseOr,
        T::IsNotEqual,
        T::LogicalNot,
        T::IsEqual,
        T::Assign
    ]);
}

#[test]
fn test_single_char_form_does_not_over_advance() {
    let mut lexer = Lexer::new("<1");
    let less = lexer.next_token();
    assert_eq!(less.kind, TokenKind::IsLessThan);
    assert_eq!(less.lexeme, "<");
    let one = lexer.next_token();
    assert_eq!(one.kind, TokenKind::Constant);
    assert_eq!(one.lexeme, "1");
}

#[test]
fn test_lexemes_borrow_source() {
    let source = String::from("count_2 = 4096;");
    let tokens: Vec<_> = Lexer::new(&source).collect();
    assert_eq!(tokens[0].lexeme, "count_2");
    assert_eq!(tokens[2].lexeme, "4096");
    assert_eq!(tokens[3].lexeme, ";");
}

#[test]
fn test_locations() {
    let tokens: Vec<_> = Lexer::new("int a;\n  a = 1;").collect();
    assert_eq!(tokens[0].location, SourceLocation::new(0, 0));
    assert_eq!(tokens[1].location, SourceLocation::new(0, 4));
    assert_eq!(tokens[3].location, SourceLocation::new(1, 2));
    assert_eq!(tokens[5].location, SourceLocation::new(1, 6));
}

#[test]
fn test_bad_atsign() {
    let mut lexer = Lexer::new("0@1");
    assert_eq!(lexer.next_token().kind, TokenKind::Constant);
    let bad = lexer.next_token();
    assert_eq!(bad.kind, TokenKind::Error);
    assert_eq!(bad.lexeme, "@");
    assert_eq!(lexer.next_token().kind, TokenKind::Constant);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_reports_errors() {
    let mut reporter = ErrorReporter::new();
    let tokens = tokenize("x = 1 $ 2;", &mut reporter);
    let lexed: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(lexed, vec![
        TokenKind::Identifier,
        TokenKind::Assign,
        TokenKind::Constant,
        TokenKind::Constant,
        TokenKind::Semicolon,
        TokenKind::Eof,
    ]);
    assert_eq!(reporter.len(), 1);
    let diagnostic = &reporter.diagnostics()[0];
    assert_eq!(diagnostic.message, "unexpected character: `$`");
    assert_eq!(diagnostic.location, SourceLocation::new(0, 6));
}

#[test]
fn test_empty_input() {
    let mut reporter = ErrorReporter::new();
    let tokens = tokenize("  \n\t", &mut reporter);
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is(TokenKind::Eof));
    assert!(!reporter.has_errors());
}

#[test]
fn test_identifier_after_digits() {
    use TokenKind as T;
    assert_eq!(kinds("12ab"), vec![T::Constant, T::Identifier]);
}
