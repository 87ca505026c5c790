//! Stack growth guard for deeply nested scripts.
//!
//! Expression parsing, statement execution and interpreted function calls all
//! recurse on the native stack. A page with a long `elseif` ladder or a
//! recursive user function can exhaust the default thread stack, so those
//! entry points run through [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`; on wasm32
//! the closure is called directly.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn execute(&mut self, stmt: &Stmt, ctx: ContextId) -> EvalResult<()> {
///     ensure_sufficient_stack(|| self.execute_inner(stmt, ctx))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// wasm32 manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
