use crate::source::Span;
use std::fmt;

/// A parsed syntax tree node. This is the boundary between the parser and
/// the evaluator: leaves keep their literal text, groupings keep an ordered
/// child list, and structural punctuation is never represented.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub kind: AstKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstKind {
    Number(String), // Raw literal text; integer parsing happens at read time
    Symbol(String),
    Sexpr(Vec<Ast>),
    Qexpr(Vec<Ast>),
}

impl Ast {
    pub fn new(kind: AstKind, span: Span) -> Self {
        Ast { kind, span }
    }

    pub fn new_number(text: impl Into<String>, span: Span) -> Self {
        Ast::new(AstKind::Number(text.into()), span)
    }

    pub fn new_symbol(name: impl Into<String>, span: Span) -> Self {
        Ast::new(AstKind::Symbol(name.into()), span)
    }

    pub fn new_sexpr(children: Vec<Ast>, span: Span) -> Self {
        Ast::new(AstKind::Sexpr(children), span)
    }

    pub fn new_qexpr(children: Vec<Ast>, span: Span) -> Self {
        Ast::new(AstKind::Qexpr(children), span)
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_children(f: &mut fmt::Formatter<'_>, children: &[Ast]) -> fmt::Result {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", child)?;
            }
            Ok(())
        }

        match &self.kind {
            AstKind::Number(text) => write!(f, "{}", text),
            AstKind::Symbol(name) => write!(f, "{}", name),
            AstKind::Sexpr(children) => {
                write!(f, "(")?;
                write_children(f, children)?;
                write!(f, ")")
            }
            AstKind::Qexpr(children) => {
                write!(f, "{{")?;
                write_children(f, children)?;
                write!(f, "}}")
            }
        }
    }
}
