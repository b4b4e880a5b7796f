//! `EngineBuilder` for configuring an `Engine`'s output, input and options.

use super::{Engine, EngineOptions};
use crate::input::InputHandler;
use crate::node::NodeGraph;
use crate::output::{stdout_output, SharedOutput};

/// Builder for `Engine`. Unset parts default to stdout, stdin and
/// `EngineOptions::default()`.
pub struct EngineBuilder {
    graph: NodeGraph,
    output: Option<SharedOutput>,
    input: Option<InputHandler>,
    options: EngineOptions,
}

impl EngineBuilder {
    pub(super) fn new(graph: NodeGraph) -> Self {
        EngineBuilder {
            graph,
            output: None,
            input: None,
            options: EngineOptions::default(),
        }
    }

    #[must_use]
    pub fn output(mut self, output: SharedOutput) -> Self {
        self.output = Some(output);
        self
    }

    #[must_use]
    pub fn input(mut self, input: InputHandler) -> Self {
        self.input = Some(input);
        self
    }

    #[must_use]
    pub fn options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Limit call nesting. Deeper calls fail with `RecursionLimit`.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.options.max_call_depth = Some(depth);
        self
    }

    /// Record per-statement timings.
    #[must_use]
    pub fn timing(mut self, enabled: bool) -> Self {
        self.options.timing = enabled;
        self
    }

    pub fn build(self) -> Engine {
        Engine::from_parts(
            self.graph,
            self.output.unwrap_or_else(stdout_output),
            self.input.unwrap_or_default(),
            self.options,
        )
    }
}
