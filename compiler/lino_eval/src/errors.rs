//! Link-time and runtime errors.
//!
//! Both carry the `Trace` of the statement that failed. Link errors are
//! always fatal; no partially linked program runs. Runtime errors stop the
//! engine but leave its state in place for inspection.

use std::fmt;
use std::io;

use lino_ir::ValueKind;
use thiserror::Error;

use crate::expression::ExpressionError;

/// Where a statement came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Trace {
    pub file: String,
    pub line: u32,
    pub keyword: String,
}

impl Trace {
    pub fn new(file: impl Into<String>, line: u32, keyword: impl Into<String>) -> Self {
        Trace {
            file: file.into(),
            line,
            keyword: keyword.into(),
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File: {} / Line: {} / {}",
            self.file, self.line, self.keyword
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} ({trace})")]
pub struct LinkError {
    pub trace: Trace,
    pub kind: LinkErrorKind,
}

impl LinkError {
    pub fn new(trace: Trace, kind: LinkErrorKind) -> Self {
        LinkError { trace, kind }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LinkErrorKind {
    #[error("`{keyword}` needs exactly one variable name")]
    InvalidDeclarationSyntax { keyword: String },

    #[error("`{name}` is already declared in this scope")]
    DuplicateDeclaration { name: String },

    #[error("invalid function syntax: {reason}")]
    InvalidFunctionSyntax { reason: String },

    #[error("call to unknown function `{name}`")]
    UnknownFunction { name: String },

    #[error("`{function}` takes {expected} parameter(s), got {got}")]
    ParameterCountMismatch {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error(
        "unknown statement `{keyword}`, check the keyword and that the variable is declared in scope"
    )]
    UnknownStatement { keyword: String },

    #[error("`{keyword}` has no matching block")]
    UnmatchedBlock { keyword: String },

    #[error("assignment must look like `name = value`")]
    InvalidAssignSyntax,

    #[error(transparent)]
    Expression(#[from] ExpressionError),
}

#[derive(Debug, Error)]
#[error("{kind} ({trace})")]
pub struct RuntimeError {
    pub trace: Trace,
    pub kind: RuntimeErrorKind,
    /// Call sites active when the error happened, innermost first.
    pub backtrace: Vec<Trace>,
}

impl RuntimeError {
    pub fn new(trace: Trace, kind: RuntimeErrorKind) -> Self {
        RuntimeError {
            trace,
            kind,
            backtrace: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: Vec<Trace>) -> Self {
        self.backtrace = backtrace;
        self
    }
}

#[derive(Debug, Error)]
pub enum RuntimeErrorKind {
    #[error("undeclared variable `{name}`")]
    UndeclaredVariable { name: String },

    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error("statement has no runtime behavior")]
    InternalNoOp,

    #[error("`in` takes exactly one variable name, got {count} parameter(s)")]
    InvalidInputSyntax { count: usize },

    #[error("input closed while reading `{name}`")]
    InputClosed { name: String },

    #[error("`{function}` expects a {expected} for parameter `{parameter}`")]
    ArgumentType {
        function: String,
        parameter: String,
        expected: ValueKind,
    },

    #[error("function end reached with no active call")]
    CallStackUnderflow,

    #[error("maximum call depth exceeded (limit: {limit})")]
    RecursionLimit { limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
