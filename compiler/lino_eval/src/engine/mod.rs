//! The execution engine.
//!
//! The engine owns the linked graph and walks it one node per step.
//! `current` is the only program counter; each step yields a `Flow` that
//! either advances along `next` or jumps to a resolved target. Execution
//! halts when `current` becomes `None` or a step fails.

mod builder;
mod exec;
mod timings;

use std::time::Instant;

use tracing::{debug, trace};

use lino_ir::Value;

pub use builder::EngineBuilder;
pub use timings::{TimingSummary, Timings};

use crate::call_stack::CallStack;
use crate::errors::{RuntimeError, RuntimeErrorKind};
use crate::input::InputHandler;
use crate::node::{NodeGraph, NodeId};
use crate::output::{stdout_output, SharedOutput};
use crate::scope::ScopeTree;

/// Engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Maximum number of nested calls; `None` for unlimited.
    pub max_call_depth: Option<usize>,
    /// Record per-statement timings.
    pub timing: bool,
}

/// Where execution goes after a node ran.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Continue with the node's `next`.
    Next,
    /// Continue at the given node, or halt on `None`.
    Jump(Option<NodeId>),
}

/// Mutable interpreter state.
pub struct ExecutionState {
    pub current: Option<NodeId>,
    pub call_stack: CallStack,
    /// Argument bindings staged by a `call` for the callee's header.
    pub pending: Option<Vec<(String, Value)>>,
    pub output: SharedOutput,
}

pub struct Engine {
    graph: NodeGraph,
    state: ExecutionState,
    input: InputHandler,
    timings: Option<Timings>,
    steps: u64,
}

impl Engine {
    /// Engine writing to stdout and reading from stdin.
    pub fn new(graph: NodeGraph, options: EngineOptions) -> Self {
        Self::from_parts(graph, stdout_output(), InputHandler::stdin(), options)
    }

    pub fn builder(graph: NodeGraph) -> EngineBuilder {
        EngineBuilder::new(graph)
    }

    fn from_parts(
        graph: NodeGraph,
        output: SharedOutput,
        input: InputHandler,
        options: EngineOptions,
    ) -> Self {
        let current = graph.entry();
        Engine {
            graph,
            state: ExecutionState {
                current,
                call_stack: CallStack::new(options.max_call_depth),
                pending: None,
                output,
            },
            input,
            timings: options.timing.then(Timings::default),
            steps: 0,
        }
    }

    /// Run until the program halts or a statement fails.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        debug!(nodes = self.graph.len(), "execution started");
        while self.step()? {}
        debug!(steps = self.steps, "execution finished");
        Ok(())
    }

    /// Execute the current node. Returns whether there is more to run.
    pub fn step(&mut self) -> Result<bool, RuntimeError> {
        let Some(id) = self.state.current else {
            return Ok(false);
        };

        let (label, next) = {
            let node = self.graph.node(id);
            trace!(
                node = %id,
                kind = node.kind.label(),
                depth = self.state.call_stack.depth(),
                "{}",
                node.trace
            );
            (node.kind.label(), node.next)
        };

        let started = self.timings.is_some().then(Instant::now);
        let flow = match self.execute(id) {
            Ok(flow) => flow,
            Err(kind) => return Err(self.runtime_error(id, kind)),
        };
        if let (Some(timings), Some(started)) = (self.timings.as_mut(), started) {
            timings.record(label, started.elapsed());
        }

        self.state.current = match flow {
            Flow::Next => next,
            Flow::Jump(target) => target,
        };
        self.steps += 1;
        Ok(self.state.current.is_some())
    }

    fn execute(&mut self, id: NodeId) -> Result<Flow, RuntimeErrorKind> {
        let (nodes, scopes) = self.graph.split_mut();
        exec::execute(nodes, id, scopes, &mut self.state, &mut self.input)
    }

    fn runtime_error(&self, id: NodeId, kind: RuntimeErrorKind) -> RuntimeError {
        let backtrace = self
            .state
            .call_stack
            .frames()
            .map(|site| self.graph.node(site).trace.clone())
            .collect();
        let err = RuntimeError::new(self.graph.node(id).trace.clone(), kind).with_backtrace(backtrace);
        debug!(error = %err, "execution failed");
        err
    }

    pub fn current(&self) -> Option<NodeId> {
        self.state.current
    }

    /// Move the program counter, e.g. to re-run a node.
    pub fn set_current(&mut self, id: Option<NodeId>) {
        self.state.current = id;
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    pub fn scopes(&self) -> &ScopeTree {
        self.graph.scopes()
    }

    pub fn output(&self) -> &SharedOutput {
        &self.state.output
    }

    /// Number of steps executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn timings(&self) -> Option<&Timings> {
        self.timings.as_ref()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
