//! Evaluation of compiled expressions.
//!
//! Operators dispatch on the operand kinds directly; the kind set is fixed,
//! so a `match` over `(Outcome, Outcome)` pairs is all that is needed.

use std::cmp::Ordering;
use std::fmt;

use lino_ir::{format_number, Value};

use crate::parser::{BinaryOp, Expr, ExprId, ExprKind, UnaryOp};
use crate::stack::ensure_sufficient_stack;
use crate::ExprError;

/// Result of evaluating an expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl Outcome {
    pub fn type_name(&self) -> &'static str {
        match self {
            Outcome::Number(_) => "number",
            Outcome::Bool(_) => "bool",
            Outcome::Text(_) => "string",
        }
    }

    /// Truthiness for logical operators: booleans as-is, numbers when nonzero.
    fn truthy(&self, op: &'static str) -> Result<bool, ExprError> {
        match self {
            Outcome::Bool(b) => Ok(*b),
            Outcome::Number(n) => Ok(*n != 0.0),
            Outcome::Text(_) => Err(ExprError::InvalidOperand {
                op,
                operand: self.type_name(),
            }),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Number(n) => f.write_str(&format_number(*n)),
            Outcome::Bool(b) => write!(f, "{b}"),
            Outcome::Text(s) => f.write_str(s),
        }
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => Outcome::Number(n),
            Value::Text(s) => Outcome::Text(s),
        }
    }
}

impl Expr {
    /// Evaluate against a variable resolver.
    pub fn evaluate(&self, resolve: &dyn Fn(&str) -> Option<Value>) -> Result<Outcome, ExprError> {
        let result = eval_node(self, self.root(), resolve);
        tracing::trace!(expr = %self, ?result, "evaluated expression");
        result
    }
}

fn eval_node(
    expr: &Expr,
    id: ExprId,
    resolve: &dyn Fn(&str) -> Option<Value>,
) -> Result<Outcome, ExprError> {
    match expr.get(id) {
        ExprKind::Number(n) => Ok(Outcome::Number(*n)),
        ExprKind::Text(s) => Ok(Outcome::Text(s.clone())),
        ExprKind::Bool(b) => Ok(Outcome::Bool(*b)),
        ExprKind::Variable(name) => resolve(name.as_str())
            .map(Outcome::from)
            .ok_or_else(|| ExprError::UndefinedVariable { name: name.clone() }),
        ExprKind::Unary { op, operand } => {
            let value = ensure_sufficient_stack(|| eval_node(expr, *operand, resolve))?;
            eval_unary(*op, &value)
        }
        ExprKind::Binary { op, left, right } => {
            let left = ensure_sufficient_stack(|| eval_node(expr, *left, resolve))?;
            // Short-circuit before touching the right operand.
            match op {
                BinaryOp::And if !left.truthy("&&")? => return Ok(Outcome::Bool(false)),
                BinaryOp::Or if left.truthy("||")? => return Ok(Outcome::Bool(true)),
                _ => {}
            }
            let right = ensure_sufficient_stack(|| eval_node(expr, *right, resolve))?;
            eval_binary(*op, left, right)
        }
    }
}

fn eval_unary(op: UnaryOp, value: &Outcome) -> Result<Outcome, ExprError> {
    match (op, value) {
        (UnaryOp::Neg, Outcome::Number(n)) => Ok(Outcome::Number(-n)),
        (UnaryOp::Not, _) => Ok(Outcome::Bool(!value.truthy(op.as_symbol())?)),
        (UnaryOp::Neg, _) => Err(ExprError::InvalidOperand {
            op: op.as_symbol(),
            operand: value.type_name(),
        }),
    }
}

/// Evaluate a binary operator on two already-evaluated operands.
///
/// `&&` and `||` only reach here once the left side did not short-circuit.
pub(crate) fn eval_binary(op: BinaryOp, left: Outcome, right: Outcome) -> Result<Outcome, ExprError> {
    let mismatch = |left: &Outcome, right: &Outcome| ExprError::InvalidOperands {
        op: op.as_symbol(),
        left: left.type_name(),
        right: right.type_name(),
    };

    match op {
        BinaryOp::And | BinaryOp::Or => Ok(Outcome::Bool(right.truthy(op.as_symbol())?)),
        BinaryOp::Eq => Ok(Outcome::Bool(left == right)),
        BinaryOp::NotEq => Ok(Outcome::Bool(left != right)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = match (&left, &right) {
                (Outcome::Number(a), Outcome::Number(b)) => a.partial_cmp(b),
                (Outcome::Text(a), Outcome::Text(b)) => Some(a.cmp(b)),
                _ => return Err(mismatch(&left, &right)),
            };
            let holds = ordering.is_some_and(|ordering| match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::LtEq => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            });
            Ok(Outcome::Bool(holds))
        }
        BinaryOp::Add => match (&left, &right) {
            (Outcome::Number(a), Outcome::Number(b)) => Ok(Outcome::Number(a + b)),
            (Outcome::Text(_), _) | (_, Outcome::Text(_)) => {
                Ok(Outcome::Text(format!("{left}{right}")))
            }
            _ => Err(mismatch(&left, &right)),
        },
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            let (Outcome::Number(a), Outcome::Number(b)) = (&left, &right) else {
                return Err(mismatch(&left, &right));
            };
            let result = match op {
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
                _ => a % b,
            };
            Ok(Outcome::Number(result))
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
mod tests;
