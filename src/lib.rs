// Declare modules publicly so they are part of the library interface
pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod pretty_print;
pub mod source;
pub mod value;

pub use ast::{Ast, AstKind};
pub use evaluator::{BUILTIN_NAMES, eval, read, run};
pub use lexer::{LexerError, Token, TokenKind, tokenize};
pub use parser::{ParseError, Parser, parse_str};
pub use source::Span;
pub use value::Lval;
