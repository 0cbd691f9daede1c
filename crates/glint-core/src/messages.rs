//! Invariant violation messages shared across the runtime.
//!
//! These are programming errors in the description layer, not runtime
//! conditions: every one of them aborts the current operation.

pub const STATE_USED_BEFORE_BUILD: &str =
    "state cell accessed before its owning node was built";
pub const BINDING_USED_BEFORE_BUILD: &str =
    "binding accessed before its owning node was built";
pub const ENVIRONMENT_MISSING: &str =
    "environment value read for a type that was never published";
pub const ENVIRONMENT_TYPE_MISMATCH: &str =
    "environment value does not match the declared type";

pub const NODE_NOT_FOUND: &str = "no element exists for that node id";
pub const VIEW_BINDING_MISSING: &str =
    "invalidated node has no associated view description";
pub const SINGLE_CHILD_EXPECTED: &str =
    "modifier element must have exactly one structural child";
pub const STACK_WITHOUT_STORAGE: &str =
    "stack must hold its children through a single storage child";
pub const STACK_WITHOUT_CHILDREN: &str =
    "stack storage does not contain any children to lay out";
pub const CHILD_NOT_MEASURED: &str = "child cannot be measured";

pub const ROOT_MISSING: &str = "the root element must exist";
pub const ROOT_DISPLAY_MISSING: &str = "the root display handle does not exist";
