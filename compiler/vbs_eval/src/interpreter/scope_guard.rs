//! RAII guard for interpreted call frames.
//!
//! [`CallFrame`] holds `&mut Interpreter` and derefs to it. Dropping the
//! guard releases the frame and decrements the call depth, on every exit
//! path including `?` returns.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::errors::stack_overflow;
use crate::{ContextId, EvalResult};

pub struct CallFrame<'guard> {
    interpreter: &'guard mut Interpreter,
    frame: ContextId,
}

impl CallFrame<'_> {
    /// The frame this guard owns.
    pub fn id(&self) -> ContextId {
        self.frame
    }
}

impl Drop for CallFrame<'_> {
    fn drop(&mut self) {
        self.interpreter.depth = self.interpreter.depth.saturating_sub(1);
        self.interpreter.env.release(self.frame);
    }
}

impl Deref for CallFrame<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for CallFrame<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Enter a new call frame parented at `parent`. Fails once the call
    /// depth limit is reached.
    pub fn enter_frame(&mut self, parent: ContextId) -> EvalResult<CallFrame<'_>> {
        if self.depth >= self.config.max_call_depth {
            return Err(stack_overflow(self.config.max_call_depth));
        }
        self.depth += 1;
        let frame = self.env.push(parent);
        Ok(CallFrame {
            interpreter: self,
            frame,
        })
    }
}
