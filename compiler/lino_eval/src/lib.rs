//! Lino Eval - linker and execution engine for the Lino interpreter.
//!
//! A program goes through two stages here:
//! - `link` turns tokenized statement lines into a `NodeGraph`, resolving
//!   every block to its matching `end` and every name to its scope
//! - `Engine` walks the graph one node per step
//!
//! ```text
//! lines ─▶ link ─▶ NodeGraph ─▶ Engine::run ─▶ output
//! ```

mod call_stack;
mod engine;
mod errors;
mod expression;
mod input;
mod linker;
mod node;
mod output;
mod parameter;
mod scope;

pub use call_stack::CallStack;
pub use engine::{
    Engine, EngineBuilder, EngineOptions, ExecutionState, Flow, TimingSummary, Timings,
};
pub use errors::{LinkError, LinkErrorKind, RuntimeError, RuntimeErrorKind, Trace};
pub use expression::{Expression, ExpressionError};
pub use input::{InputHandler, ScriptedInput, StdinInput};
pub use linker::link;
pub use node::{EndRole, FunctionParam, Node, NodeGraph, NodeId, NodeKind};
pub use output::{
    buffer_output, silent_output, stdout_output, BufferOutput, OutputHandler, SharedOutput,
    StdoutOutput,
};
pub use parameter::{classify, is_number_literal, is_operator, Parameter, OPERATORS};
pub use scope::{AlreadyDeclared, Scope, ScopeId, ScopeTree};
