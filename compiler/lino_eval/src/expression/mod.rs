//! Bridge between statement parameters and `lino_expr`.
//!
//! Loop and condition headers and numeric assignments carry a compiled
//! `Expression`. Compilation happens once at link time; evaluation resolves
//! identifiers through the scope tree each time the node runs.

use lino_expr::{Expr, Outcome};
use thiserror::Error;

use crate::parameter::Parameter;
use crate::scope::{ScopeId, ScopeTree};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("invalid expression `{text}`: {reason}")]
    ExpressionSyntax {
        text: String,
        reason: lino_expr::ExprError,
    },

    #[error("cannot evaluate `{text}`: {reason}")]
    Evaluation { text: String, reason: String },
}

/// A compiled expression together with its source text.
#[derive(Clone, Debug)]
pub struct Expression {
    text: String,
    compiled: Expr,
}

impl Expression {
    /// Join the raw text of `params` with single spaces and compile it.
    pub fn compile(params: &[Parameter]) -> Result<Self, ExpressionError> {
        let text = params
            .iter()
            .map(Parameter::raw)
            .collect::<Vec<_>>()
            .join(" ");
        if text.trim().is_empty() {
            return Err(ExpressionError::EmptyExpression);
        }

        let compiled = lino_expr::parse(&text).map_err(|reason| {
            ExpressionError::ExpressionSyntax {
                text: text.clone(),
                reason,
            }
        })?;
        Ok(Expression { text, compiled })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Evaluate against `scope`. Booleans become `1.0` / `0.0`.
    pub fn evaluate(&self, scopes: &ScopeTree, scope: ScopeId) -> Result<f64, ExpressionError> {
        let resolve = |name: &str| scopes.get(scope, name).cloned();
        let outcome = self
            .compiled
            .evaluate(&resolve)
            .map_err(|err| self.evaluation_error(err.to_string()))?;

        match outcome {
            Outcome::Number(n) => Ok(n),
            Outcome::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
            Outcome::Text(_) => Err(self.evaluation_error(format!(
                "expected a number, got {}",
                outcome.type_name()
            ))),
        }
    }

    fn evaluation_error(&self, reason: String) -> ExpressionError {
        ExpressionError::Evaluation {
            text: self.text.clone(),
            reason,
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
