use crate::Span;
use crate::ast::Ast;
use crate::lexer::{LexerError, Token, TokenKind};
use std::iter::Peekable;
use std::vec::IntoIter;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Parse Error [at {}..{}]: Unexpected token '{}', expected {expected}",
        .found.span.start, .found.span.end, .found.kind)]
    UnexpectedToken { found: Token, expected: String },
    #[error("Parse Error: Unexpected end of input during parsing. Expected {0}")]
    UnexpectedEof(String),
    #[error("Lexer Error during parse: {0}")]
    LexerError(#[from] LexerError),
}

// Result type alias for convenience
type ParseResult<T> = Result<T, ParseError>;

pub struct Parser {
    // We iterate over owned Tokens, consuming them.
    tokens: Peekable<IntoIter<Token>>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: tokens.into_iter().peekable(),
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        self.tokens.next()
    }

    fn peek_token(&mut self) -> Option<&Token> {
        self.tokens.peek()
    }

    /// Parses a single expression from the token stream.
    pub fn parse_expr(&mut self) -> ParseResult<Ast> {
        match self.next_token() {
            Some(Token {
                kind: TokenKind::Number(text),
                span,
            }) => Ok(Ast::new_number(text, span)),
            Some(Token {
                kind: TokenKind::Symbol(name),
                span,
            }) => Ok(Ast::new_symbol(name, span)),
            Some(Token {
                kind: TokenKind::LParen,
                span,
            }) => {
                let (children, span) = self.parse_list(span, &TokenKind::RParen)?;
                Ok(Ast::new_sexpr(children, span))
            }
            Some(Token {
                kind: TokenKind::LBrace,
                span,
            }) => {
                let (children, span) = self.parse_list(span, &TokenKind::RBrace)?;
                Ok(Ast::new_qexpr(children, span))
            }
            Some(found) => Err(ParseError::UnexpectedToken {
                found,
                expected: "an expression".to_string(),
            }),
            None => Err(ParseError::UnexpectedEof("an expression".to_string())),
        }
    }

    /// Parses the children of a bracketed list up to (and including) the
    /// matching closer. Returns the children and the merged span.
    fn parse_list(
        &mut self,
        open_span: Span,
        closer: &TokenKind,
    ) -> ParseResult<(Vec<Ast>, Span)> {
        let mut children = Vec::new();
        loop {
            match self.peek_token() {
                Some(token) if token.kind == *closer => {
                    let close_span = token.span;
                    self.next_token();
                    return Ok((children, open_span.merge(close_span)));
                }
                Some(_) => children.push(self.parse_expr()?),
                None => {
                    return Err(ParseError::UnexpectedEof(format!("'{}'", closer)));
                }
            }
        }
    }

    /// Parses the whole token stream: zero or more top-level expressions,
    /// collected under a root S-expression (the shape the evaluator's read
    /// step expects for one input line).
    pub fn parse(mut self) -> ParseResult<Ast> {
        let mut children = Vec::new();
        while self.peek_token().is_some() {
            children.push(self.parse_expr()?);
        }
        let span = children
            .iter()
            .map(|child| child.span)
            .reduce(Span::merge)
            .unwrap_or_default();
        Ok(Ast::new_sexpr(children, span))
    }
}

// Helper function to lex and parse a string directly (useful for tests and REPL)
pub fn parse_str(input: &str) -> ParseResult<Ast> {
    let tokens = crate::lexer::tokenize(input)?;
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstKind;
    use crate::lexer::LexerErrorKind;

    // Helper for asserting successful parsing; spans are compared too, so
    // expected nodes carry explicit offsets.
    fn assert_parse(input: &str, expected: Ast) {
        match parse_str(input) {
            Ok(result) => assert_eq!(result, expected, "Input: '{}'", input),
            Err(e) => panic!("Parsing failed for input '{}': {}", input, e),
        }
    }

    // Helper for asserting parse errors by variant
    fn assert_parse_error(input: &str, expected_error_variant: ParseError) {
        match parse_str(input) {
            Ok(result) => panic!(
                "Expected parsing to fail for input '{}', but got: {:?}",
                input, result
            ),
            Err(e) => {
                assert_eq!(
                    std::mem::discriminant(&e),
                    std::mem::discriminant(&expected_error_variant),
                    "Input: '{}', Expected error variant like {:?}, got: {:?}",
                    input,
                    expected_error_variant,
                    e
                );
            }
        }
    }

    // Asserts the round-trip through the AST's Display
    fn assert_parsed_string(input: &str, expected_output: &str) {
        let ast = match parse_str(input) {
            Ok(result) => result,
            Err(e) => panic!("Parsing failed for input '{}': {}", input, e),
        };
        assert_eq!(ast.to_string(), expected_output, "Input: '{}'", input);
    }

    fn number(text: &str, start: usize, end: usize) -> Ast {
        Ast::new_number(text, Span::new(start, end))
    }

    fn symbol(name: &str, start: usize, end: usize) -> Ast {
        Ast::new_symbol(name, Span::new(start, end))
    }

    fn root(children: Vec<Ast>, start: usize, end: usize) -> Ast {
        Ast::new_sexpr(children, Span::new(start, end))
    }

    #[test]
    fn test_parse_atoms() {
        assert_parse("123", root(vec![number("123", 0, 3)], 0, 3));
        assert_parse("-45", root(vec![number("-45", 0, 3)], 0, 3));
        assert_parse("head", root(vec![symbol("head", 0, 4)], 0, 4));
        assert_parse("+", root(vec![symbol("+", 0, 1)], 0, 1));
    }

    #[test]
    fn test_parse_empty_input() {
        assert_parse("", root(vec![], 0, 0));
        assert_parse("   ; just a comment", root(vec![], 0, 0));
    }

    #[test]
    fn test_parse_empty_lists() {
        assert_parse(
            "()",
            root(vec![Ast::new_sexpr(vec![], Span::new(0, 2))], 0, 2),
        );
        assert_parse(
            "{}",
            root(vec![Ast::new_qexpr(vec![], Span::new(0, 2))], 0, 2),
        );
    }

    #[test]
    fn test_parse_simple_sexpr() {
        assert_parse(
            "(+ 1 2)",
            root(
                vec![Ast::new_sexpr(
                    vec![symbol("+", 1, 2), number("1", 3, 4), number("2", 5, 6)],
                    Span::new(0, 7),
                )],
                0,
                7,
            ),
        );
    }

    #[test]
    fn test_parse_qexpr() {
        assert_parse(
            "{1 2 3}",
            root(
                vec![Ast::new_qexpr(
                    vec![
                        number("1", 1, 2),
                        number("2", 3, 4),
                        number("3", 5, 6),
                    ],
                    Span::new(0, 7),
                )],
                0,
                7,
            ),
        );
    }

    #[test]
    fn test_parse_nested() {
        assert_parsed_string("(+ 1 (* 2 3))", "((+ 1 (* 2 3)))");
        assert_parsed_string("{1 {2 3} (+ 4 5)}", "({1 {2 3} (+ 4 5)})");
        assert_parsed_string("eval {head {1 2 3}}", "(eval {head {1 2 3}})");
    }

    #[test]
    fn test_parse_bare_top_level_operator() {
        // The top level is itself an S-expression, so `+ 1 2` is a valid line
        assert_parsed_string("+ 1 2", "(+ 1 2)");
    }

    #[test]
    fn test_parse_multiple_top_level_expressions() {
        let ast = parse_str("(+ 1 2) {3 4}").expect("should parse");
        match &ast.kind {
            AstKind::Sexpr(children) => assert_eq!(children.len(), 2),
            other => panic!("Expected root sexpr, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_errors_unclosed_brackets() {
        assert_parse_error("(1 2", ParseError::UnexpectedEof("')'".to_string()));
        assert_parse_error("{1 2", ParseError::UnexpectedEof("'}'".to_string()));
        assert_parse_error("(", ParseError::UnexpectedEof("')'".to_string()));
    }

    #[test]
    fn test_parse_errors_unexpected_closer() {
        assert_parse_error(
            ")",
            ParseError::UnexpectedToken {
                found: Token {
                    kind: TokenKind::RParen,
                    span: Span::new(0, 1),
                },
                expected: "an expression".to_string(),
            },
        );
        assert_parse_error(
            "}",
            ParseError::UnexpectedToken {
                found: Token {
                    kind: TokenKind::RBrace,
                    span: Span::new(0, 1),
                },
                expected: "an expression".to_string(),
            },
        );
    }

    #[test]
    fn test_parse_mismatched_closer() {
        // `(1 2}` — the `}` is not the expected `)`, so it is parsed as the
        // start of the next child and rejected there.
        assert_parse_error(
            "(1 2}",
            ParseError::UnexpectedToken {
                found: Token {
                    kind: TokenKind::RBrace,
                    span: Span::new(4, 5),
                },
                expected: "an expression".to_string(),
            },
        );
        // Same shape with the closers swapped
        assert_parse_error(
            "{1 2)",
            ParseError::UnexpectedToken {
                found: Token {
                    kind: TokenKind::RParen,
                    span: Span::new(4, 5),
                },
                expected: "an expression".to_string(),
            },
        );
    }

    #[test]
    fn test_parse_lexer_error_propagation() {
        assert_parse_error(
            "(+ 1 #)",
            ParseError::LexerError(LexerError {
                kind: LexerErrorKind::InvalidToken,
                span: Span::new(5, 6),
            }),
        );
    }
}
