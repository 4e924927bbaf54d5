use crate::{LexerError, ParseError};
use ariadne::{Label, Report, ReportKind, Source};

impl LexerError {
    pub fn pretty_print(&self, input: &str) {
        Report::build(ReportKind::Error, ("REPL", self.span.to_range()))
            .with_message("Lexer Error")
            .with_label(
                Label::new(("REPL", self.span.to_range())).with_message(self.kind.to_string()),
            )
            .finish()
            .print(("REPL", Source::from(input)))
            .unwrap();
    }
}

impl ParseError {
    pub fn pretty_print(&self, input: &str) {
        let report = match self {
            ParseError::UnexpectedToken { found, expected } => {
                Report::build(ReportKind::Error, ("REPL", found.span.to_range()))
                    .with_message(format!("Unexpected token: {}", found.kind))
                    .with_label(
                        Label::new(("REPL", found.span.to_range()))
                            .with_message(format!("Expected {expected}")),
                    )
            }
            ParseError::UnexpectedEof(expected) => {
                let idx = input.len();
                Report::build(ReportKind::Error, ("REPL", idx..idx))
                    .with_message("Unexpected EOF")
                    .with_label(Label::new(("REPL", idx..idx)).with_message(expected))
            }
            ParseError::LexerError(lex_err) => {
                Report::build(ReportKind::Error, ("REPL", lex_err.span.to_range()))
                    .with_message("Lexer Error")
                    .with_label(
                        Label::new(("REPL", lex_err.span.to_range()))
                            .with_message(lex_err.kind.to_string()),
                    )
            }
        };
        report
            .finish()
            .print(("REPL", Source::from(input)))
            .unwrap();
    }
}
