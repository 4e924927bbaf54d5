use crate::ast::{Ast, AstKind};
use crate::parser::{ParseError, parse_str};
use crate::value::Lval;

// --- AST-to-value conversion ---

/// Converts a parsed AST into a value tree. Number literals are parsed here
/// so that overflow or junk digits become an error *value* rather than a
/// parse failure.
pub fn read(ast: &Ast) -> Lval {
    match &ast.kind {
        AstKind::Number(text) => match text.parse::<i64>() {
            Ok(n) => Lval::num(n),
            Err(_) => Lval::err("Invalid number"),
        },
        AstKind::Symbol(name) => Lval::sym(name.clone()),
        AstKind::Sexpr(children) => read_children(Lval::sexpr(), children),
        AstKind::Qexpr(children) => read_children(Lval::qexpr(), children),
    }
}

fn read_children(mut list: Lval, children: &[Ast]) -> Lval {
    for child in children {
        list.push(read(child));
    }
    list
}

// --- Reduction ---

/// Recursively reduces a value. Only S-expressions are ever evaluated;
/// everything else, Q-expressions included, is returned unchanged.
pub fn eval(v: Lval) -> Lval {
    match v {
        Lval::Sexpr(children) => eval_sexpr(children),
        other => other,
    }
}

fn eval_sexpr(children: Vec<Lval>) -> Lval {
    // Reduce every child left to right; the first error becomes the result
    // of the whole expression and the remaining children are discarded.
    let mut reduced = Vec::with_capacity(children.len());
    for child in children {
        let value = eval(child);
        if value.is_err() {
            return value;
        }
        reduced.push(value);
    }

    match reduced.len() {
        // Empty expression evaluates to itself
        0 => Lval::Sexpr(reduced),
        // Single expression unwraps to its child
        1 => Lval::Sexpr(reduced).take(0),
        _ => {
            let mut args = Lval::Sexpr(reduced);
            match args.pop(0) {
                Lval::Sym(name) => builtin(&name, args),
                _ => Lval::err("S-expression does not start with a symbol."),
            }
        }
    }
}

// --- Builtin dispatch ---

/// A builtin receives its already-reduced arguments as an S-expression
/// container, in call order.
pub type Builtin = fn(Lval) -> Lval;

/// Builtin names, in dispatch-table order. Used by the REPL completer.
pub const BUILTIN_NAMES: &[&str] = &[
    "list", "head", "tail", "join", "eval", "+", "-", "*", "/",
];

// The closed dispatch table: one lookup per call, unknown names fall
// through to an error value in `builtin`.
fn lookup(name: &str) -> Option<Builtin> {
    Some(match name {
        "list" => builtin_list,
        "head" => builtin_head,
        "tail" => builtin_tail,
        "join" => builtin_join,
        "eval" => builtin_eval,
        "+" => builtin_add,
        "-" => builtin_sub,
        "*" => builtin_mul,
        "/" => builtin_div,
        _ => return None,
    })
}

pub fn builtin(name: &str, args: Lval) -> Lval {
    match lookup(name) {
        Some(handler) => handler(args),
        None => Lval::err("Unknown Function!"),
    }
}

// Unwraps the single argument of a unary builtin, or reports the arity
// violation. Dispatch always supplies at least one argument.
fn expect_single(args: Lval, name: &str) -> Result<Lval, Lval> {
    match args {
        Lval::Sexpr(children) if children.len() == 1 => Ok(Lval::Sexpr(children).take(0)),
        _ => Err(Lval::err(format!(
            "Function '{}' passed too many arguments!",
            name
        ))),
    }
}

fn builtin_list(args: Lval) -> Lval {
    // The argument container itself becomes the Q-expression; no copy
    args.into_qexpr()
}

fn builtin_head(args: Lval) -> Lval {
    let list = match expect_single(args, "head") {
        Ok(list) => list,
        Err(e) => return e,
    };
    match list {
        Lval::Qexpr(ref children) if children.is_empty() => {
            Lval::err("Function 'head' passed {}!")
        }
        Lval::Qexpr(_) => {
            let mut head = Lval::qexpr();
            head.push(list.take(0));
            head
        }
        _ => Lval::err("Function 'head' passed incorrect type!"),
    }
}

fn builtin_tail(args: Lval) -> Lval {
    let mut list = match expect_single(args, "tail") {
        Ok(list) => list,
        Err(e) => return e,
    };
    match list {
        Lval::Qexpr(ref children) if children.is_empty() => {
            Lval::err("Function 'tail' passed {}!")
        }
        Lval::Qexpr(_) => {
            list.pop(0);
            list
        }
        _ => Lval::err("Function 'tail' passed incorrect type!"),
    }
}

fn builtin_eval(args: Lval) -> Lval {
    let list = match expect_single(args, "eval") {
        Ok(list) => list,
        Err(e) => return e,
    };
    match list {
        Lval::Qexpr(_) => eval(list.into_sexpr()),
        _ => Lval::err("Function 'eval' passed incorrect type!"),
    }
}

fn builtin_join(args: Lval) -> Lval {
    let children = args.into_children();
    if !children.iter().all(|child| matches!(child, Lval::Qexpr(_))) {
        return Lval::err("Function 'join' passed incorrect type!");
    }
    let mut lists = children.into_iter();
    let mut joined = lists.next().unwrap_or_else(Lval::qexpr);
    for list in lists {
        joined.join(list);
    }
    joined
}

// --- Arithmetic ---

#[derive(Debug, Copy, Clone)]
enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

fn builtin_add(args: Lval) -> Lval {
    builtin_op(args, ArithOp::Add)
}

fn builtin_sub(args: Lval) -> Lval {
    builtin_op(args, ArithOp::Sub)
}

fn builtin_mul(args: Lval) -> Lval {
    builtin_op(args, ArithOp::Mul)
}

fn builtin_div(args: Lval) -> Lval {
    builtin_op(args, ArithOp::Div)
}

fn builtin_op(args: Lval, op: ArithOp) -> Lval {
    let mut operands = Vec::new();
    for child in args.into_children() {
        match child {
            Lval::Num(n) => operands.push(n),
            _ => return Lval::err("Cannot operate on non-number!"),
        }
    }

    // `-` with a single operand is unary negation
    let unary_minus = matches!(op, ArithOp::Sub) && operands.len() == 1;

    let mut operands = operands.into_iter();
    let Some(mut acc) = operands.next() else {
        return Lval::err("Cannot operate on non-number!");
    };
    if unary_minus {
        return Lval::num(acc.wrapping_neg());
    }

    for y in operands {
        acc = match op {
            ArithOp::Add => acc.wrapping_add(y),
            ArithOp::Sub => acc.wrapping_sub(y),
            ArithOp::Mul => acc.wrapping_mul(y),
            ArithOp::Div => {
                if y == 0 {
                    // Abort the fold; accumulator and remaining operands drop
                    return Lval::err("Division by zero");
                }
                acc.wrapping_div(y)
            }
        };
    }
    Lval::num(acc)
}

// --- One-call pipeline ---

/// Lexes, parses, reads and reduces one line of input. Lex and parse
/// failures come back as `Err`; evaluation failures are `Lval::Err` values
/// inside `Ok`.
pub fn run(input: &str) -> Result<Lval, ParseError> {
    let ast = parse_str(input)?;
    Ok(eval(read(&ast)))
}
