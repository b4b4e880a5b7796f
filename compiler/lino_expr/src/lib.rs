//! Lino Expr - the expression evaluator used by conditions, loops and
//! numeric assignments.
//!
//! The interpreter hands this crate a flat expression string plus a
//! callback that resolves variable names. Evaluation happens in two steps:
//! `parse` compiles the text into an `Expr` (a flat arena of nodes), and
//! `Expr::evaluate` walks it against the resolver. Compiled expressions are
//! reusable, so a loop header is parsed once and evaluated every iteration.
//!
//! # Grammar
//!
//! Lowest to highest precedence, all binary operators left-associative:
//!
//! ```text
//! or         := and ( "||" and )*
//! and        := equality ( "&&" equality )*
//! equality   := comparison ( ("==" | "!=") comparison )*
//! comparison := additive ( ("<" | "<=" | ">" | ">=") additive )*
//! additive   := multiplicative ( ("+" | "-") multiplicative )*
//! multiplicative := unary ( ("*" | "/" | "%") unary )*
//! unary      := ("-" | "!") unary | primary
//! primary    := number | string | "true" | "false" | ident | "(" or ")"
//! ```

mod error;
mod eval;
mod parser;
mod scanner;
mod stack;

pub use error::ExprError;
pub use eval::Outcome;
pub use parser::{BinaryOp, Expr, ExprId, ExprKind, UnaryOp};

use lino_ir::Value;

/// Compile expression text.
pub fn parse(source: &str) -> Result<Expr, ExprError> {
    parser::Parser::new(source)?.parse()
}

/// Compile and evaluate expression text in one go.
pub fn evaluate(
    source: &str,
    resolve: &dyn Fn(&str) -> Option<Value>,
) -> Result<Outcome, ExprError> {
    parse(source)?.evaluate(resolve)
}
