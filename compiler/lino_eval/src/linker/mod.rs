//! Statement linker: statement lines to a `NodeGraph`.
//!
//! Linking runs in two passes. The first pass walks the lines once,
//! creating one node per line, tracking the block scopes with a stack and
//! declaring variables and functions as it goes. Function parameters are
//! not declared: a call binds them in the function's declaring scope. The
//! second pass resolves every block header to the node past its matching
//! `end`, gives every `end` its role, and compiles expressions.
//!
//! Block matching is a balanced scan: forward from a header, backward from
//! an `end`, counting nested headers and ends.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use lino_ir::{StatementLine, Token, Value, ValueKind};

use crate::errors::{LinkError, LinkErrorKind, Trace};
use crate::expression::Expression;
use crate::node::{EndRole, FunctionParam, Node, NodeGraph, NodeId, NodeKind};
use crate::parameter::{classify, Parameter};
use crate::scope::{AlreadyDeclared, ScopeId, ScopeTree};

/// Link tokenized statement lines into an executable graph.
pub fn link(lines: &[StatementLine]) -> Result<NodeGraph, LinkError> {
    debug!(lines = lines.len(), "linking");
    let mut linker = Linker::new();
    for line in lines {
        linker.link_line(line)?;
    }
    let graph = linker.finish()?;
    debug!(
        nodes = graph.len(),
        scopes = graph.scopes().count(),
        "graph ready"
    );
    Ok(graph)
}

/// Node kind before block targets are resolved.
#[derive(Debug)]
enum DraftKind {
    NumberDecl,
    StringDecl,
    Output,
    Input,
    Loop,
    Condition,
    FunctionDecl {
        name: String,
        params: Vec<FunctionParam>,
        body_scope: ScopeId,
    },
    Call {
        callee: NodeId,
        arguments: Vec<(String, Parameter)>,
    },
    BlockEnd,
    Assign {
        numeric: bool,
    },
}

impl DraftKind {
    fn opens_block(&self) -> bool {
        matches!(
            self,
            DraftKind::Loop | DraftKind::Condition | DraftKind::FunctionDecl { .. }
        )
    }
}

#[derive(Debug)]
struct Draft {
    keyword: String,
    params: Vec<Parameter>,
    trace: Trace,
    scope: ScopeId,
    next: Option<NodeId>,
    previous: Option<NodeId>,
    kind: DraftKind,
}

struct Linker {
    scopes: ScopeTree,
    /// Open block scopes; the root is never popped.
    scope_stack: SmallVec<[ScopeId; 8]>,
    /// Parameters of each function, by body scope.
    function_params: FxHashMap<ScopeId, Vec<FunctionParam>>,
    drafts: Vec<Draft>,
}

impl Linker {
    fn new() -> Self {
        let scopes = ScopeTree::new();
        let mut scope_stack = SmallVec::new();
        scope_stack.push(scopes.root());
        Linker {
            scopes,
            scope_stack,
            function_params: FxHashMap::default(),
            drafts: Vec::new(),
        }
    }

    fn current_scope(&self) -> ScopeId {
        self.scope_stack.last().copied().unwrap_or(ScopeId::ROOT)
    }

    fn next_id(&self) -> NodeId {
        NodeId::new(self.drafts.len())
    }

    fn link_line(&mut self, line: &[Token]) -> Result<(), LinkError> {
        let Some((keyword, operands)) = line.split_first() else {
            return Ok(());
        };
        let trace = Trace::new(keyword.file.clone(), keyword.line, keyword.text.clone());
        let params = classify(operands);
        let scope = self.current_scope();

        let kind = self
            .instantiate(&keyword.text, &params, scope)
            .map_err(|kind| LinkError::new(trace.clone(), kind))?;

        let id = self.next_id();
        let previous = id.index().checked_sub(1).map(NodeId::new);
        if let Some(prev) = previous {
            self.drafts[prev.index()].next = Some(id);
        }
        self.drafts.push(Draft {
            keyword: keyword.text.clone(),
            params,
            trace,
            scope,
            next: None,
            previous,
            kind,
        });
        Ok(())
    }

    /// Build the draft for one statement and update the scope stack.
    fn instantiate(
        &mut self,
        keyword: &str,
        params: &[Parameter],
        scope: ScopeId,
    ) -> Result<DraftKind, LinkErrorKind> {
        match keyword {
            "end" => {
                if self.scope_stack.len() <= 1 {
                    return Err(LinkErrorKind::UnmatchedBlock {
                        keyword: keyword.to_string(),
                    });
                }
                self.scope_stack.pop();
                Ok(DraftKind::BlockEnd)
            }
            "while" | "if" => {
                let child = self.scopes.child(scope);
                self.scope_stack.push(child);
                Ok(if keyword == "while" {
                    DraftKind::Loop
                } else {
                    DraftKind::Condition
                })
            }
            "number" | "string" => {
                let name = declared_name(keyword, params)?;
                let kind = if keyword == "number" {
                    ValueKind::Number
                } else {
                    ValueKind::Text
                };
                self.scopes
                    .declare(scope, name, kind)
                    .map_err(duplicate)?;
                Ok(if kind == ValueKind::Number {
                    DraftKind::NumberDecl
                } else {
                    DraftKind::StringDecl
                })
            }
            "function" => self.function(params, scope),
            "call" => self.call(params, scope),
            "out" => Ok(DraftKind::Output),
            "in" => Ok(DraftKind::Input),
            _ => match self.target_kind(keyword) {
                Some(kind) => Ok(DraftKind::Assign {
                    numeric: kind == ValueKind::Number,
                }),
                None => Err(LinkErrorKind::UnknownStatement {
                    keyword: keyword.to_string(),
                }),
            },
        }
    }

    /// `function name [type param]...`
    fn function(&mut self, params: &[Parameter], scope: ScopeId) -> Result<DraftKind, LinkErrorKind> {
        let invalid = |reason: &str| LinkErrorKind::InvalidFunctionSyntax {
            reason: reason.to_string(),
        };

        let Some((Parameter::Variable(name), rest)) = params.split_first() else {
            return Err(invalid("expected a function name"));
        };
        if rest.len() % 2 != 0 {
            return Err(invalid("parameters must be `type name` pairs"));
        }

        let mut declared: Vec<FunctionParam> = Vec::with_capacity(rest.len() / 2);
        for pair in rest.chunks_exact(2) {
            let kind = ValueKind::from_keyword(pair[0].raw()).ok_or_else(|| {
                invalid(&format!(
                    "unknown parameter type `{}`, expected `number` or `string`",
                    pair[0].raw()
                ))
            })?;
            let Parameter::Variable(param_name) = &pair[1] else {
                return Err(invalid(&format!("`{}` is not a parameter name", pair[1].raw())));
            };
            if declared.iter().any(|p| &p.name == param_name) {
                return Err(invalid(&format!("parameter `{param_name}` is declared twice")));
            }
            declared.push(FunctionParam {
                name: param_name.clone(),
                kind,
            });
        }

        let header = self.next_id();
        self.scopes
            .declare_function(scope, name, header)
            .map_err(duplicate)?;

        let body_scope = self.scopes.child(scope);
        self.function_params.insert(body_scope, declared.clone());
        self.scope_stack.push(body_scope);

        Ok(DraftKind::FunctionDecl {
            name: name.clone(),
            params: declared,
            body_scope,
        })
    }

    /// Kind of the variable or parameter `name` nearest to the current
    /// line. The scope stack holds exactly the open scopes, innermost last.
    fn target_kind(&self, name: &str) -> Option<ValueKind> {
        self.scope_stack.iter().rev().find_map(|&scope| {
            self.scopes
                .scope(scope)
                .variable(name)
                .map(Value::kind)
                .or_else(|| {
                    self.function_params
                        .get(&scope)?
                        .iter()
                        .find(|param| param.name == name)
                        .map(|param| param.kind)
                })
        })
    }

    /// `call name [argument]...`
    fn call(&self, params: &[Parameter], scope: ScopeId) -> Result<DraftKind, LinkErrorKind> {
        let Some((callee_name, arguments)) = params.split_first() else {
            return Err(LinkErrorKind::InvalidFunctionSyntax {
                reason: "a call needs a function name".to_string(),
            });
        };
        let Some(callee) = self.scopes.lookup_function(scope, callee_name.raw()) else {
            return Err(LinkErrorKind::UnknownFunction {
                name: callee_name.raw().to_string(),
            });
        };
        let DraftKind::FunctionDecl { name, params: declared, .. } =
            &self.drafts[callee.index()].kind
        else {
            return Err(LinkErrorKind::UnknownFunction {
                name: callee_name.raw().to_string(),
            });
        };
        if declared.len() != arguments.len() {
            return Err(LinkErrorKind::ParameterCountMismatch {
                function: name.clone(),
                expected: declared.len(),
                got: arguments.len(),
            });
        }

        Ok(DraftKind::Call {
            callee,
            arguments: declared
                .iter()
                .map(|p| p.name.clone())
                .zip(arguments.iter().cloned())
                .collect(),
        })
    }

    /// Second pass: resolve block targets and compile expressions.
    fn finish(self) -> Result<NodeGraph, LinkError> {
        let mut kinds = Vec::with_capacity(self.drafts.len());
        for (index, draft) in self.drafts.iter().enumerate() {
            let kind = self
                .resolve(NodeId::new(index), draft)
                .map_err(|kind| LinkError::new(draft.trace.clone(), kind))?;
            kinds.push(kind);
        }

        let nodes = self
            .drafts
            .into_iter()
            .zip(kinds)
            .enumerate()
            .map(|(index, (draft, kind))| Node {
                id: NodeId::new(index),
                keyword: draft.keyword,
                params: draft.params,
                trace: draft.trace,
                scope: draft.scope,
                next: draft.next,
                previous: draft.previous,
                kind,
            })
            .collect();
        Ok(NodeGraph::new(nodes, self.scopes))
    }

    fn resolve(&self, id: NodeId, draft: &Draft) -> Result<NodeKind, LinkErrorKind> {
        Ok(match &draft.kind {
            DraftKind::NumberDecl => NodeKind::NumberDecl,
            DraftKind::StringDecl => NodeKind::StringDecl,
            DraftKind::Output => NodeKind::Output,
            DraftKind::Input => NodeKind::Input,
            DraftKind::Loop => NodeKind::Loop {
                past_end: self.past_end(id)?,
                condition: Expression::compile(&draft.params)?,
            },
            DraftKind::Condition => NodeKind::Condition {
                past_end: self.past_end(id)?,
                condition: Expression::compile(&draft.params)?,
            },
            DraftKind::FunctionDecl {
                name,
                params,
                body_scope,
            } => NodeKind::FunctionDecl {
                name: name.clone(),
                params: params.clone(),
                body_scope: *body_scope,
                past_end: self.past_end(id)?,
            },
            DraftKind::Call { callee, arguments } => NodeKind::Call {
                callee: *callee,
                arguments: arguments.clone(),
            },
            DraftKind::BlockEnd => NodeKind::BlockEnd {
                role: self.end_role(id)?,
            },
            DraftKind::Assign { numeric } => {
                let target = draft.keyword.clone();
                match draft.params.split_first() {
                    Some((Parameter::Operator(op), value)) if op == "=" && !value.is_empty() => {
                        NodeKind::Assign {
                            target,
                            expression: if *numeric {
                                Some(Expression::compile(value)?)
                            } else {
                                None
                            },
                        }
                    }
                    _ => return Err(LinkErrorKind::InvalidAssignSyntax),
                }
            }
        })
    }

    /// Node after the `end` matching the block opened at `header`.
    fn past_end(&self, header: NodeId) -> Result<Option<NodeId>, LinkErrorKind> {
        let end = self.matching_end(header)?;
        Ok(self.drafts[end.index()].next)
    }

    fn matching_end(&self, header: NodeId) -> Result<NodeId, LinkErrorKind> {
        let mut depth = 1usize;
        let mut cursor = self.drafts[header.index()].next;
        while let Some(id) = cursor {
            let draft = &self.drafts[id.index()];
            if matches!(draft.kind, DraftKind::BlockEnd) {
                depth -= 1;
                if depth == 0 {
                    return Ok(id);
                }
            } else if draft.kind.opens_block() {
                depth += 1;
            }
            cursor = draft.next;
        }
        Err(self.unmatched(header))
    }

    fn end_role(&self, end: NodeId) -> Result<EndRole, LinkErrorKind> {
        let mut depth = 1usize;
        let mut cursor = self.drafts[end.index()].previous;
        while let Some(id) = cursor {
            let draft = &self.drafts[id.index()];
            if matches!(draft.kind, DraftKind::BlockEnd) {
                depth += 1;
            } else if draft.kind.opens_block() {
                depth -= 1;
                if depth == 0 {
                    return Ok(match draft.kind {
                        DraftKind::Loop => EndRole::Loop(id),
                        DraftKind::FunctionDecl { .. } => EndRole::Function,
                        _ => EndRole::Condition,
                    });
                }
            }
            cursor = draft.previous;
        }
        Err(self.unmatched(end))
    }

    fn unmatched(&self, id: NodeId) -> LinkErrorKind {
        LinkErrorKind::UnmatchedBlock {
            keyword: self.drafts[id.index()].keyword.clone(),
        }
    }
}

fn declared_name<'p>(keyword: &str, params: &'p [Parameter]) -> Result<&'p str, LinkErrorKind> {
    match params {
        [Parameter::Variable(name)] => Ok(name),
        _ => Err(LinkErrorKind::InvalidDeclarationSyntax {
            keyword: keyword.to_string(),
        }),
    }
}

fn duplicate(err: AlreadyDeclared) -> LinkErrorKind {
    LinkErrorKind::DuplicateDeclaration { name: err.name }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
