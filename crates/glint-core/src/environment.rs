use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::rc::Rc;

use crate::messages;

/// Type-erased view of an environment declaration, keyed by the value's
/// `TypeId`. The element tree stores publications under this trait so one
/// scope map can hold values of any type.
pub trait EnvProperty {
    fn key(&self) -> TypeId;
    /// The published value, if this declaration carries one.
    fn content(&self) -> Option<Rc<dyn Any>>;
    /// Fill an empty declaration from an ancestor's published value.
    fn fill(&self, value: Rc<dyn Any>);
}

/// A value published to descendants by an ancestor node.
///
/// A declaration created with `new` is a consumer: it starts empty and is
/// filled from the nearest ancestor publication during the build. One
/// created with `with_value` publishes to its subtree.
pub struct Environment<Value: 'static> {
    value: Rc<RefCell<Option<Rc<Value>>>>,
}

impl<Value: 'static> Clone for Environment<Value> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
        }
    }
}

impl<Value: 'static> Default for Environment<Value> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Value: 'static> Environment<Value> {
    pub fn new() -> Self {
        Self {
            value: Rc::new(RefCell::new(None)),
        }
    }

    pub fn with_value(value: Value) -> Self {
        Self {
            value: Rc::new(RefCell::new(Some(Rc::new(value)))),
        }
    }

    /// The resolved value. Reading an environment that no ancestor
    /// published is a programming error.
    pub fn get(&self) -> Rc<Value> {
        match &*self.value.borrow() {
            Some(value) => Rc::clone(value),
            None => panic!("{}", messages::ENVIRONMENT_MISSING),
        }
    }
}

impl<Value: 'static> EnvProperty for Environment<Value> {
    fn key(&self) -> TypeId {
        TypeId::of::<Value>()
    }

    fn content(&self) -> Option<Rc<dyn Any>> {
        self.value
            .borrow()
            .as_ref()
            .map(|value| Rc::clone(value) as Rc<dyn Any>)
    }

    fn fill(&self, value: Rc<dyn Any>) {
        match value.downcast::<Value>() {
            Ok(value) => *self.value.borrow_mut() = Some(value),
            Err(_) => panic!("{}", messages::ENVIRONMENT_TYPE_MISMATCH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publisher_exposes_content() {
        let env = Environment::with_value(42u32);
        assert_eq!(*env.get(), 42);
        assert!(env.content().is_some());
    }

    #[test]
    fn consumer_fills_from_publication() {
        let publisher = Environment::with_value(String::from("dark"));
        let consumer: Environment<String> = Environment::new();
        assert_eq!(consumer.key(), publisher.key());

        let content = publisher.content().unwrap();
        consumer.fill(content);
        assert_eq!(*consumer.get(), "dark");
    }

    #[test]
    #[should_panic(expected = "never published")]
    fn unfilled_consumer_panics_on_read() {
        let consumer: Environment<u32> = Environment::new();
        let _ = consumer.get();
    }
}
