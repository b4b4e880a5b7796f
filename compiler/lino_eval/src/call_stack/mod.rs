//! Runtime stack of in-flight calls.
//!
//! Each `call` statement pushes its own node; the `end` of the callee pops
//! it and resumes after the call site. The depth check lives in `push`.

use crate::errors::RuntimeErrorKind;
use crate::node::NodeId;

#[derive(Clone, Debug)]
pub struct CallStack {
    /// Call sites, innermost last.
    frames: Vec<NodeId>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// Create an empty stack. `None` means no depth limit.
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call site, checking the depth limit.
    ///
    /// The frame is not pushed on overflow.
    pub fn push(&mut self, call_site: NodeId) -> Result<(), RuntimeErrorKind> {
        if let Some(limit) = self.max_depth {
            if self.frames.len() >= limit {
                return Err(RuntimeErrorKind::RecursionLimit { limit });
            }
        }
        self.frames.push(call_site);
        Ok(())
    }

    /// Pop the most recent call site.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.frames.pop()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Call sites, most recent first.
    pub fn frames(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.frames.iter().rev().copied()
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests use expect to panic on unexpected state"
)]
