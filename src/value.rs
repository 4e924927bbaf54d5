use std::fmt;

/// The runtime value. Both code and data are made of these: an S-expression
/// is a list awaiting reduction, a Q-expression is the same list kept inert.
///
/// Children are exclusively owned, so a value and its whole subtree drop
/// together when the owner goes out of scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Lval {
    Num(i64),
    Err(String),
    Sym(String),
    Sexpr(Vec<Lval>),
    Qexpr(Vec<Lval>),
}

impl Lval {
    pub fn num(x: i64) -> Lval {
        Lval::Num(x)
    }

    pub fn err(msg: impl Into<String>) -> Lval {
        Lval::Err(msg.into())
    }

    pub fn sym(name: impl Into<String>) -> Lval {
        Lval::Sym(name.into())
    }

    /// A new, empty S-expression.
    pub fn sexpr() -> Lval {
        Lval::Sexpr(Vec::new())
    }

    /// A new, empty Q-expression.
    pub fn qexpr() -> Lval {
        Lval::Qexpr(Vec::new())
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Lval::Err(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Lval::Num(_) => "number",
            Lval::Err(_) => "error",
            Lval::Sym(_) => "symbol",
            Lval::Sexpr(_) => "s-expression",
            Lval::Qexpr(_) => "q-expression",
        }
    }

    fn children_mut(&mut self) -> &mut Vec<Lval> {
        match self {
            Lval::Sexpr(children) | Lval::Qexpr(children) => children,
            other => panic!("list operation on non-list value: {}", other.type_name()),
        }
    }

    pub(crate) fn into_children(self) -> Vec<Lval> {
        match self {
            Lval::Sexpr(children) | Lval::Qexpr(children) => children,
            other => panic!("list operation on non-list value: {}", other.type_name()),
        }
    }

    /// Appends `child` at the end, transferring ownership into the list.
    /// Caller contract: `self` is a list kind.
    pub fn push(&mut self, child: Lval) {
        self.children_mut().push(child);
    }

    /// Removes and returns the child at `i`, shifting later children down.
    /// Caller contract: `self` is a list kind and `i` is in bounds.
    pub fn pop(&mut self, i: usize) -> Lval {
        self.children_mut().remove(i)
    }

    /// Extracts the child at `i` and drops the rest of the container.
    pub fn take(self, i: usize) -> Lval {
        let mut children = self.into_children();
        children.swap_remove(i)
    }

    /// Moves all of `other`'s children onto the end of `self`, in order.
    /// `other`'s container is consumed; its children are not copied.
    pub fn join(&mut self, other: Lval) {
        self.children_mut().append(&mut other.into_children());
    }

    /// Conversion constructor: the same children, rebuilt as a Q-expression.
    /// Replaces the in-place type-tag overwrite of a mutable-tag design.
    /// Caller contract: `self` is a list kind.
    pub fn into_qexpr(self) -> Lval {
        Lval::Qexpr(self.into_children())
    }

    /// Conversion constructor: the same children, rebuilt as an S-expression.
    /// Caller contract: `self` is a list kind.
    pub fn into_sexpr(self) -> Lval {
        Lval::Sexpr(self.into_children())
    }
}

impl fmt::Display for Lval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_children(f: &mut fmt::Formatter<'_>, children: &[Lval]) -> fmt::Result {
            // No trailing space before the closing bracket
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", child)?;
            }
            Ok(())
        }

        match self {
            Lval::Num(n) => write!(f, "{}", n),
            Lval::Err(msg) => write!(f, "Error: {}", msg),
            Lval::Sym(name) => write!(f, "{}", name),
            Lval::Sexpr(children) => {
                write!(f, "(")?;
                write_children(f, children)?;
                write!(f, ")")
            }
            Lval::Qexpr(children) => {
                write!(f, "{{")?;
                write_children(f, children)?;
                write!(f, "}}")
            }
        }
    }
}
