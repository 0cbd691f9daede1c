use std::rc::Rc;

use glint_testing::RecordingBackend;
use glint_ui::{
    Composite, DynProperty, ElementTree, EnvProperty, Environment, Size, State, View,
};

struct Counter {
    count: State<i32>,
}

impl Composite for Counter {
    fn body(&self) -> View {
        View::text(format!("count: {}", self.count.get()), 14.0)
    }

    fn properties(&self) -> Vec<Rc<dyn DynProperty>> {
        vec![Rc::new(self.count.clone())]
    }
}

/// Holds a cell its body never reads.
struct Idle {
    unused: State<i32>,
}

impl Composite for Idle {
    fn body(&self) -> View {
        View::text("idle", 14.0)
    }

    fn properties(&self) -> Vec<Rc<dyn DynProperty>> {
        vec![Rc::new(self.unused.clone())]
    }
}

fn counter_tree() -> (ElementTree, State<i32>) {
    let tree = ElementTree::new();
    tree.set_constraint(Size::new(100.0, 100.0));
    let count = State::new(0);
    tree.set_root(View::composite(Counter {
        count: count.clone(),
    }));
    (tree, count)
}

#[test]
fn write_to_a_read_cell_schedules_its_owner() {
    let (tree, count) = counter_tree();
    let root = tree.root_id().unwrap();

    count.set(1);
    assert_eq!(tree.pending_invalid(), vec![root]);
}

#[test]
fn write_to_an_unread_cell_schedules_nothing() {
    let tree = ElementTree::new();
    tree.set_constraint(Size::new(100.0, 100.0));
    let unused = State::new(0);
    tree.set_root(View::composite(Idle {
        unused: unused.clone(),
    }));

    unused.set(1);
    assert!(tree.pending_invalid().is_empty());
}

#[test]
fn repeated_writes_schedule_the_owner_once() {
    let (tree, count) = counter_tree();
    let root = tree.root_id().unwrap();

    count.set(1);
    count.set(2);
    count.set(3);
    assert_eq!(tree.pending_invalid(), vec![root]);
}

#[test]
fn tick_drains_the_invalid_set() {
    let (tree, count) = counter_tree();
    let mut backend = RecordingBackend::new();
    let host = backend.root();
    tree.layout_root();
    tree.render(&mut backend, host);

    count.set(1);
    assert!(!tree.pending_invalid().is_empty());

    tree.tick(&mut backend);
    assert!(tree.pending_invalid().is_empty());
}

/// Shows the counter only while `open` is true. Dropping the counter
/// leaves the test's outer cell handle pointing at a removed node.
struct Gate {
    open: State<bool>,
    count: State<i32>,
}

impl Composite for Gate {
    fn body(&self) -> View {
        if self.open.get() {
            View::composite(Counter {
                count: self.count.clone(),
            })
        } else {
            View::text("closed", 14.0)
        }
    }

    fn properties(&self) -> Vec<Rc<dyn DynProperty>> {
        vec![Rc::new(self.open.clone())]
    }
}

#[test]
fn write_to_a_cell_of_a_removed_node_is_dropped() {
    let tree = ElementTree::new();
    tree.set_constraint(Size::new(100.0, 100.0));
    let open = State::new(true);
    let count = State::new(0);
    tree.set_root(View::composite(Gate {
        open: open.clone(),
        count: count.clone(),
    }));
    tree.layout_root();
    let mut backend = RecordingBackend::new();
    let host = backend.root();
    tree.render(&mut backend, host);

    open.set(false);
    tree.tick(&mut backend);
    assert!(tree.pending_invalid().is_empty());

    // The counter node is gone; its cell still accepts the write but no
    // rebuild is scheduled.
    count.set(9);
    assert!(tree.pending_invalid().is_empty());
}

/// Reads `count` only while `show` is true, so a rebuild can shrink the
/// cell's read footprint.
struct Switchable {
    show: State<bool>,
    count: State<i32>,
}

impl Composite for Switchable {
    fn body(&self) -> View {
        if self.show.get() {
            View::text(format!("{}", self.count.get()), 14.0)
        } else {
            View::text("hidden", 14.0)
        }
    }

    fn properties(&self) -> Vec<Rc<dyn DynProperty>> {
        vec![Rc::new(self.show.clone()), Rc::new(self.count.clone())]
    }
}

#[test]
fn rebuild_that_stops_reading_a_cell_disarms_its_writes() {
    let tree = ElementTree::new();
    tree.set_constraint(Size::new(100.0, 100.0));
    let show = State::new(true);
    let count = State::new(0);
    tree.set_root(View::composite(Switchable {
        show: show.clone(),
        count: count.clone(),
    }));
    tree.layout_root();
    let mut backend = RecordingBackend::new();
    let host = backend.root();
    tree.render(&mut backend, host);

    show.set(false);
    tree.tick(&mut backend);
    assert!(tree.pending_invalid().is_empty());

    // A read outside any body must not re-arm the previous build's
    // write latch.
    let _ = count.get();
    count.set(7);
    assert!(tree.pending_invalid().is_empty());
}

#[derive(Clone)]
struct Theme {
    name: &'static str,
}

struct ThemedLabel {
    theme: Environment<Theme>,
}

impl Composite for ThemedLabel {
    fn body(&self) -> View {
        View::text(self.theme.get().name, 12.0)
    }

    fn environment(&self) -> Vec<Rc<dyn EnvProperty>> {
        vec![Rc::new(self.theme.clone())]
    }
}

struct ThemedRoot {
    theme: Environment<Theme>,
}

impl Composite for ThemedRoot {
    fn body(&self) -> View {
        View::composite(ThemedLabel {
            theme: Environment::new(),
        })
    }

    fn environment(&self) -> Vec<Rc<dyn EnvProperty>> {
        vec![Rc::new(self.theme.clone())]
    }
}

#[test]
fn descendant_reads_the_published_environment_value() {
    let tree = ElementTree::new();
    tree.set_constraint(Size::new(100.0, 100.0));
    tree.set_root(View::composite(ThemedRoot {
        theme: Environment::with_value(Theme { name: "dark" }),
    }));
    tree.layout_root();

    let mut backend = RecordingBackend::new();
    let host = backend.root();
    tree.render(&mut backend, host);
    assert_eq!(backend.created_texts(), vec!["dark".to_string()]);
}

#[test]
#[should_panic(expected = "never published")]
fn reading_an_unpublished_environment_panics() {
    let tree = ElementTree::new();
    tree.set_constraint(Size::new(100.0, 100.0));
    tree.set_root(View::composite(ThemedLabel {
        theme: Environment::new(),
    }));
}
