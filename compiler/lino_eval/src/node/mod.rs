//! The executable statement graph.
//!
//! The linker turns each statement line into a `Node` stored in a flat
//! arena. `next` / `previous` follow source order; block headers and ends
//! additionally record their resolved jump targets in `NodeKind`.

use std::fmt;

use lino_ir::ValueKind;

use crate::errors::Trace;
use crate::expression::Expression;
use crate::parameter::Parameter;
use crate::scope::{ScopeId, ScopeTree};

/// Index into the node arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn new(index: usize) -> Self {
        NodeId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A declared function parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionParam {
    pub name: String,
    pub kind: ValueKind,
}

/// What block an `end` closes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndRole {
    /// Jumps back to the loop header.
    Loop(NodeId),
    /// Returns to the most recent call site.
    Function,
    Condition,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    NumberDecl,
    StringDecl,
    Output,
    Input,
    Loop {
        /// Node after the matching `end`; `None` when the block ends the program.
        past_end: Option<NodeId>,
        condition: Expression,
    },
    Condition {
        past_end: Option<NodeId>,
        condition: Expression,
    },
    FunctionDecl {
        name: String,
        params: Vec<FunctionParam>,
        body_scope: ScopeId,
        past_end: Option<NodeId>,
    },
    Call {
        callee: NodeId,
        /// Callee parameter name to caller-side operand, in declaration order.
        arguments: Vec<(String, Parameter)>,
    },
    BlockEnd {
        role: EndRole,
    },
    Assign {
        target: String,
        /// Present only for numeric targets.
        expression: Option<Expression>,
    },
}

impl NodeKind {
    /// Statement label used for timings and trace output.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::NumberDecl => "number",
            NodeKind::StringDecl => "string",
            NodeKind::Output => "out",
            NodeKind::Input => "in",
            NodeKind::Loop { .. } => "while",
            NodeKind::Condition { .. } => "if",
            NodeKind::FunctionDecl { .. } => "function",
            NodeKind::Call { .. } => "call",
            NodeKind::BlockEnd { .. } => "end",
            NodeKind::Assign { .. } => "assign",
        }
    }
}

/// One linked statement.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub keyword: String,
    pub params: Vec<Parameter>,
    pub trace: Trace,
    pub scope: ScopeId,
    pub next: Option<NodeId>,
    pub previous: Option<NodeId>,
    pub kind: NodeKind,
}

/// A linked program: the node arena plus the scope tree it refers to.
#[derive(Clone, Debug)]
pub struct NodeGraph {
    nodes: Vec<Node>,
    scopes: ScopeTree,
}

impl NodeGraph {
    pub(crate) fn new(nodes: Vec<Node>, scopes: ScopeTree) -> Self {
        NodeGraph { nodes, scopes }
    }

    /// First statement of the program.
    pub fn entry(&self) -> Option<NodeId> {
        self.nodes.first().map(|node| node.id)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut ScopeTree {
        &mut self.scopes
    }

    /// Borrow the nodes and the scopes separately, so a node can be read
    /// while the scope tree is updated.
    pub(crate) fn split_mut(&mut self) -> (&[Node], &mut ScopeTree) {
        (&self.nodes, &mut self.scopes)
    }
}
