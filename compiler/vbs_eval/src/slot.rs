//! Storage cells.
//!
//! Every variable, constant, object member and call result lives in a
//! [`Slot`]. Cloning a slot clones the handle, not the value, which is how
//! byref parameters alias the caller's variable.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::Value;

/// Error returned by [`Slot::set`] on a read-only cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadonlySlot;

struct SlotCell {
    value: RefCell<Value>,
    readonly: bool,
}

/// A shared, single-threaded value cell with a read-only flag fixed at
/// creation.
#[derive(Clone)]
pub struct Slot(Rc<SlotCell>);

impl Slot {
    #[inline]
    pub fn new(value: Value) -> Self {
        Slot(Rc::new(SlotCell {
            value: RefCell::new(value),
            readonly: false,
        }))
    }

    /// A cell that rejects every write (constants, host objects).
    #[inline]
    pub fn readonly(value: Value) -> Self {
        Slot(Rc::new(SlotCell {
            value: RefCell::new(value),
            readonly: true,
        }))
    }

    #[inline]
    pub fn is_readonly(&self) -> bool {
        self.0.readonly
    }

    /// Copy of the current value.
    #[inline]
    pub fn get(&self) -> Value {
        self.0.value.borrow().clone()
    }

    /// Inspect the value without copying it.
    #[inline]
    pub fn with<R>(&self, f: impl FnOnce(&Value) -> R) -> R {
        f(&self.0.value.borrow())
    }

    #[inline]
    pub fn set(&self, value: Value) -> Result<(), ReadonlySlot> {
        if self.0.readonly {
            return Err(ReadonlySlot);
        }
        *self.0.value.borrow_mut() = value;
        Ok(())
    }

    /// True if both handles refer to the same cell.
    #[inline]
    pub fn ptr_eq(&self, other: &Slot) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple(if self.0.readonly {
            "Slot::readonly"
        } else {
            "Slot"
        });
        match self.0.value.try_borrow() {
            Ok(value) => tuple.field(&*value),
            Err(_) => tuple.field(&"<borrowed>"),
        };
        tuple.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_alias_the_same_cell() {
        let slot = Slot::new(Value::Number(1.0));
        let alias = slot.clone();
        assert_eq!(alias.set(Value::Number(2.0)), Ok(()));
        assert_eq!(slot.get(), Value::Number(2.0));
        assert!(slot.ptr_eq(&alias));
        assert!(!slot.ptr_eq(&Slot::new(Value::Number(2.0))));
    }

    #[test]
    fn test_readonly_rejects_writes() {
        let slot = Slot::readonly(Value::string("x"));
        assert_eq!(slot.set(Value::Empty), Err(ReadonlySlot));
        assert_eq!(slot.get(), Value::string("x"));
    }
}
