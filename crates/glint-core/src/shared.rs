use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Single-threaded shared owner for a mutable value.
///
/// Stores `T` inside an `Rc<RefCell<...>>`, allowing cheap cloning of the
/// handle while the value itself stays on the one logical UI timeline.
pub struct Shared<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Run `f` with an immutable reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let borrow = self.inner.borrow();
        f(&*borrow)
    }

    /// Run `f` with a mutable reference to the stored value.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut borrow = self.inner.borrow_mut();
        f(&mut *borrow)
    }

    /// Replace the stored value entirely.
    pub fn replace(&self, new_value: T) {
        *self.inner.borrow_mut() = new_value;
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }
}

impl<T: Clone> Shared<T> {
    pub fn cloned(&self) -> T {
        self.inner.borrow().clone()
    }
}
