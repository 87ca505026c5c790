//! Scope frames for the interpreter.
//!
//! Frames live in an arena and point at their parent by index. A frame is
//! created for the host seed, for the page itself and for every
//! interpreted call; control structures share the enclosing frame. Call
//! frames are released in LIFO order when the call returns. Functions are
//! only declared in frames that are never released, so no closure outlives
//! its frame.

use rustc_hash::FxHashMap;
use tracing::trace;
use vbs_ir::Name;

use crate::errors::{readonly_write, redeclaration};
use crate::{EvalResult, Slot, Value};

/// Index of a frame in the [`Environment`] arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContextId(u32);

impl ContextId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single frame of variable bindings.
#[derive(Debug, Default)]
struct Context {
    bindings: FxHashMap<Name, Slot>,
    parent: Option<ContextId>,
    /// `Option Explicit` is active: undeclared names are not created.
    explicit: bool,
    /// No declarations allowed (frozen host frame).
    readonly: bool,
    /// Set on call frames: the name of the function being run.
    function: Option<Name>,
}

/// Arena of scope frames.
#[derive(Debug, Default)]
pub struct Environment {
    contexts: Vec<Context>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Number of live frames.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Create a frame with no parent.
    pub fn push_root(&mut self) -> ContextId {
        self.alloc(Context::default())
    }

    /// Create a child frame. It starts with the parent's `explicit` flag.
    pub fn push(&mut self, parent: ContextId) -> ContextId {
        let explicit = self.context(parent).explicit;
        self.alloc(Context {
            parent: Some(parent),
            explicit,
            ..Context::default()
        })
    }

    fn alloc(&mut self, context: Context) -> ContextId {
        let id = ContextId(u32::try_from(self.contexts.len()).unwrap_or(u32::MAX));
        self.contexts.push(context);
        trace!(?id, "push frame");
        id
    }

    /// Drop `id` and every frame created after it.
    pub fn release(&mut self, id: ContextId) {
        let index = id.index();
        if index >= self.contexts.len() {
            return;
        }
        trace!(?id, "release frame");
        self.contexts.truncate(index);
    }

    #[inline]
    fn context(&self, id: ContextId) -> &Context {
        &self.contexts[id.index()]
    }

    #[inline]
    fn context_mut(&mut self, id: ContextId) -> &mut Context {
        &mut self.contexts[id.index()]
    }

    pub fn parent(&self, id: ContextId) -> Option<ContextId> {
        self.context(id).parent
    }

    /// Find `name` in `id` or its ancestors.
    pub fn lookup(&self, id: ContextId, name: &str) -> Option<Slot> {
        let mut current = Some(id);
        while let Some(id) = current {
            let context = self.context(id);
            if let Some(slot) = context.bindings.get(name) {
                return Some(slot.clone());
            }
            current = context.parent;
        }
        None
    }

    /// Like [`lookup`](Self::lookup), but a miss declares `Empty` in `id`
    /// when `local_allowed` holds and the frame is neither explicit nor
    /// read-only.
    pub fn resolve(&mut self, id: ContextId, name: &Name, local_allowed: bool) -> Option<Slot> {
        if let Some(slot) = self.lookup(id, name.as_str()) {
            return Some(slot);
        }
        let context = self.context_mut(id);
        if !local_allowed || context.explicit || context.readonly {
            return None;
        }
        trace!(%name, "implicit declaration");
        let slot = Slot::new(Value::Empty);
        context.bindings.insert(name.clone(), slot.clone());
        Some(slot)
    }

    /// Create or overwrite `name` in `id` only.
    pub fn declare(&mut self, id: ContextId, name: Name, value: Value) -> EvalResult<Slot> {
        self.declare_slot(id, name, Slot::new(value), false)
    }

    /// Declare `name` in `id`, failing if the frame already has it.
    pub fn declare_unique(&mut self, id: ContextId, name: Name, value: Value) -> EvalResult<Slot> {
        self.declare_slot(id, name, Slot::new(value), true)
    }

    /// Declare a read-only `name` in `id`, failing if the frame already
    /// has it.
    pub fn declare_readonly(
        &mut self,
        id: ContextId,
        name: Name,
        value: Value,
    ) -> EvalResult<Slot> {
        self.declare_slot(id, name, Slot::readonly(value), true)
    }

    fn declare_slot(
        &mut self,
        id: ContextId,
        name: Name,
        slot: Slot,
        unique: bool,
    ) -> EvalResult<Slot> {
        let context = self.context_mut(id);
        if context.readonly {
            return Err(readonly_write(name.as_str()));
        }
        if unique && context.bindings.contains_key(&name) {
            return Err(redeclaration(name.as_str()));
        }
        context.bindings.insert(name, slot.clone());
        Ok(slot)
    }

    /// Bind an existing slot (a byref argument) in `id`.
    pub fn bind(&mut self, id: ContextId, name: Name, slot: Slot) {
        self.context_mut(id).bindings.insert(name, slot);
    }

    pub fn is_explicit(&self, id: ContextId) -> bool {
        self.context(id).explicit
    }

    pub fn set_explicit(&mut self, id: ContextId, explicit: bool) {
        self.context_mut(id).explicit = explicit;
    }

    /// Forbid further declarations in `id`.
    pub fn freeze(&mut self, id: ContextId) {
        self.context_mut(id).readonly = true;
    }

    /// Mark `id` as the frame running function `name`.
    pub fn set_function(&mut self, id: ContextId, name: Name) {
        self.context_mut(id).function = Some(name);
    }

    pub fn function(&self, id: ContextId) -> Option<&Name> {
        self.context(id).function.as_ref()
    }
}
