//! Stack growth for the recursive-descent parser and evaluator.
//!
//! Expressions like `((((((1))))))` recurse once per nesting level, so
//! every recursive entry point runs inside `ensure_sufficient_stack`.

#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 64 * 1024;

#[cfg(not(target_arch = "wasm32"))]
const GROW_BY: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than `RED_ZONE` bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

/// No stack switching on wasm.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
