//! Per-statement behavior.

use lino_ir::{format_number, Value, ValueKind};

use super::{ExecutionState, Flow};
use crate::errors::RuntimeErrorKind;
use crate::expression::Expression;
use crate::input::InputHandler;
use crate::node::{EndRole, FunctionParam, Node, NodeId, NodeKind};
use crate::output::OutputHandler;
use crate::parameter::Parameter;
use crate::scope::{ScopeId, ScopeTree};

pub(super) fn execute(
    nodes: &[Node],
    id: NodeId,
    scopes: &mut ScopeTree,
    state: &mut ExecutionState,
    input: &mut InputHandler,
) -> Result<Flow, RuntimeErrorKind> {
    let node = &nodes[id.index()];
    match &node.kind {
        NodeKind::NumberDecl | NodeKind::StringDecl => Ok(Flow::Next),
        NodeKind::Output => {
            output(node, scopes, &state.output)?;
            Ok(Flow::Next)
        }
        NodeKind::Input => {
            read_input(node, scopes, input, &state.output)?;
            Ok(Flow::Next)
        }
        NodeKind::Loop {
            past_end,
            condition,
        }
        | NodeKind::Condition {
            past_end,
            condition,
        } => {
            if condition.evaluate(scopes, node.scope)? == 0.0 {
                Ok(Flow::Jump(*past_end))
            } else {
                Ok(Flow::Next)
            }
        }
        NodeKind::BlockEnd { role } => match role {
            EndRole::Loop(header) => Ok(Flow::Jump(Some(*header))),
            EndRole::Function => {
                let site = state
                    .call_stack
                    .pop()
                    .ok_or(RuntimeErrorKind::CallStackUnderflow)?;
                Ok(Flow::Jump(nodes[site.index()].next))
            }
            EndRole::Condition => Ok(Flow::Next),
        },
        NodeKind::FunctionDecl { past_end, .. } => match state.pending.take() {
            None => Ok(Flow::Jump(*past_end)),
            Some(bindings) => {
                // an existing binding of the same name is overwritten
                for (name, value) in bindings {
                    scopes.set(node.scope, &name, value);
                }
                Ok(Flow::Next)
            }
        },
        NodeKind::Call { callee, arguments } => {
            let NodeKind::FunctionDecl {
                name: function,
                params,
                ..
            } = &nodes[callee.index()].kind
            else {
                return Err(RuntimeErrorKind::InternalNoOp);
            };
            let bindings = bind_arguments(function, params, arguments, scopes, node.scope)?;
            state.call_stack.push(id)?;
            state.pending = Some(bindings);
            Ok(Flow::Jump(Some(*callee)))
        }
        NodeKind::Assign { target, expression } => {
            let kind = scopes
                .get(node.scope, target)
                .map(Value::kind)
                .ok_or_else(|| undeclared(target))?;
            let value = match (kind, expression) {
                (ValueKind::Number, Some(expression)) => {
                    Value::Number(expression.evaluate(scopes, node.scope)?)
                }
                // the target was still a string when this line was linked
                (ValueKind::Number, None) => {
                    let expression = Expression::compile(node.params.get(1..).unwrap_or_default())?;
                    Value::Number(expression.evaluate(scopes, node.scope)?)
                }
                (ValueKind::Text, _) => Value::Text(
                    node.params
                        .iter()
                        .map(|p| p.display(scopes, node.scope))
                        .collect::<Vec<_>>()
                        .join(" "),
                ),
            };
            scopes.set_existing(node.scope, target, value);
            Ok(Flow::Next)
        }
    }
}

/// `out`: parameters separated by a space, except before variables.
fn output(node: &Node, scopes: &ScopeTree, sink: &OutputHandler) -> Result<(), RuntimeErrorKind> {
    let mut line = String::new();
    for (i, param) in node.params.iter().enumerate() {
        if i > 0 && !param.is_variable() {
            line.push(' ');
        }
        line.push_str(&param.display(scopes, node.scope));
    }
    sink.write_line(&line)?;
    sink.flush()?;
    Ok(())
}

/// `in name`: read one token into a declared variable.
///
/// Numeric targets re-prompt until the token parses.
fn read_input(
    node: &Node,
    scopes: &mut ScopeTree,
    input: &mut InputHandler,
    sink: &OutputHandler,
) -> Result<(), RuntimeErrorKind> {
    let [param] = node.params.as_slice() else {
        return Err(RuntimeErrorKind::InvalidInputSyntax {
            count: node.params.len(),
        });
    };
    let name = param.raw();
    let kind = scopes
        .get(node.scope, name)
        .map(Value::kind)
        .ok_or_else(|| undeclared(name))?;

    let value = loop {
        let token = input
            .read_token()?
            .ok_or_else(|| RuntimeErrorKind::InputClosed {
                name: name.to_string(),
            })?;
        match kind {
            ValueKind::Text => break Value::Text(token),
            ValueKind::Number => match token.parse::<f64>() {
                Ok(n) => break Value::Number(n),
                Err(err) => {
                    sink.write_line(&format!("Please retry: {err}"))?;
                    sink.flush()?;
                }
            },
        }
    };
    scopes.set_existing(node.scope, name, value);
    Ok(())
}

/// Evaluate call arguments in the caller's scope, coerced to the declared kinds.
fn bind_arguments(
    function: &str,
    params: &[FunctionParam],
    arguments: &[(String, Parameter)],
    scopes: &ScopeTree,
    scope: ScopeId,
) -> Result<Vec<(String, Value)>, RuntimeErrorKind> {
    params
        .iter()
        .zip(arguments)
        .map(|(param, (_, argument))| -> Result<(String, Value), RuntimeErrorKind> {
            let value = argument
                .value(scopes, scope)
                .ok_or_else(|| undeclared(argument.raw()))?;
            let value = coerce(value, param.kind).ok_or_else(|| RuntimeErrorKind::ArgumentType {
                function: function.to_string(),
                parameter: param.name.clone(),
                expected: param.kind,
            })?;
            Ok((param.name.clone(), value))
        })
        .collect()
}

fn coerce(value: Value, kind: ValueKind) -> Option<Value> {
    match (value, kind) {
        (value @ Value::Number(_), ValueKind::Number) | (value @ Value::Text(_), ValueKind::Text) => {
            Some(value)
        }
        (Value::Text(text), ValueKind::Number) => text.trim().parse().ok().map(Value::Number),
        (Value::Number(n), ValueKind::Text) => Some(Value::Text(format_number(n))),
    }
}

fn undeclared(name: &str) -> RuntimeErrorKind {
    RuntimeErrorKind::UndeclaredVariable {
        name: name.to_string(),
    }
}
