use std::rc::Rc;

use glint_testing::FixedTextMetrics;
use glint_ui::{
    Composite, EdgeInsets, ElementTree, Frame, NodeId, Point, Size, StackAlignment, View,
};

fn tree_with_constraint(width: f32, height: f32) -> ElementTree {
    let tree = ElementTree::new();
    tree.set_constraint(Size::new(width, height));
    tree
}

#[test]
fn image_keeps_declared_size_under_larger_constraint() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_root(View::image("photo", Size::new(40.0, 20.0)));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    assert_eq!(
        tree.frame_of(root).unwrap(),
        Frame::new(Point::ZERO, Size::new(40.0, 20.0))
    );
}

#[test]
fn vstack_places_children_top_to_bottom() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_root(View::vstack(vec![
        View::image("a", Size::new(10.0, 10.0)),
        View::image("b", Size::new(10.0, 20.0)),
        View::image("c", Size::new(10.0, 30.0)),
    ]));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    let storage = tree.children_of(root)[0];
    let children = tree.children_of(storage);

    let ys: Vec<f32> = children
        .iter()
        .map(|&child| tree.frame_of(child).unwrap().origin.y)
        .collect();
    assert_eq!(ys, vec![0.0, 10.0, 30.0]);
    assert_eq!(tree.frame_of(root).unwrap().size, Size::new(10.0, 60.0));
}

#[test]
fn hstack_spacer_takes_the_leftover_width() {
    let tree = tree_with_constraint(100.0, 50.0);
    tree.set_root(View::hstack(vec![
        View::image("left", Size::new(30.0, 10.0)),
        View::spacer(),
        View::image("right", Size::new(20.0, 10.0)),
    ]));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    let storage = tree.children_of(root)[0];
    let children = tree.children_of(storage);

    let spacer = tree.frame_of(children[1]).unwrap();
    assert_eq!(spacer.origin.x, 30.0);
    assert_eq!(spacer.size, Size::new(50.0, 0.0));

    assert_eq!(tree.frame_of(children[2]).unwrap().origin.x, 80.0);
    assert_eq!(tree.frame_of(root).unwrap().size, Size::new(100.0, 10.0));
}

#[test]
fn two_spacers_split_the_leftover_evenly() {
    let tree = tree_with_constraint(100.0, 50.0);
    tree.set_root(View::hstack(vec![
        View::spacer(),
        View::image("mid", Size::new(40.0, 10.0)),
        View::spacer(),
    ]));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    let storage = tree.children_of(root)[0];
    let children = tree.children_of(storage);

    assert_eq!(tree.frame_of(children[0]).unwrap().size.width, 30.0);
    assert_eq!(tree.frame_of(children[1]).unwrap().origin.x, 30.0);
    assert_eq!(tree.frame_of(children[2]).unwrap().size.width, 30.0);
}

#[test]
fn stack_spacing_separates_content_children() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_root(View::vstack_with(
        StackAlignment::Start,
        5.0,
        vec![
            View::image("a", Size::new(10.0, 10.0)),
            View::image("b", Size::new(10.0, 20.0)),
        ],
    ));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    let storage = tree.children_of(root)[0];
    let children = tree.children_of(storage);

    assert_eq!(tree.frame_of(children[1]).unwrap().origin.y, 15.0);
    assert_eq!(tree.frame_of(root).unwrap().size.height, 35.0);
}

#[test]
fn center_alignment_offsets_the_smaller_child() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_root(View::hstack_with(
        StackAlignment::Center,
        0.0,
        vec![
            View::image("small", Size::new(10.0, 10.0)),
            View::image("tall", Size::new(10.0, 30.0)),
        ],
    ));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    let storage = tree.children_of(root)[0];
    let children = tree.children_of(storage);

    assert_eq!(tree.frame_of(children[0]).unwrap().origin.y, 10.0);
    assert_eq!(tree.frame_of(children[1]).unwrap().origin.y, 0.0);
}

#[test]
fn margin_insets_the_child_and_grows_the_reported_size() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_root(
        View::image("framed", Size::new(40.0, 20.0)).margin(EdgeInsets::new(5.0, 7.0, 3.0, 2.0)),
    );
    tree.layout_root();

    let root = tree.root_id().unwrap();
    let child = tree.children_of(root)[0];

    assert_eq!(tree.frame_of(root).unwrap().size, Size::new(52.0, 25.0));
    assert_eq!(tree.frame_of(child).unwrap().origin, Point::new(5.0, 3.0));
}

#[test]
fn sized_frame_fixes_one_axis_and_adopts_the_other() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_root(View::image("pic", Size::new(40.0, 20.0)).sized(Some(60.0), None));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    let child = tree.children_of(root)[0];
    let frame = tree.frame_of(root).unwrap();

    assert_eq!(frame.size, Size::new(60.0, 20.0));
    // The child adopts the frame's own rectangle wholesale.
    assert_eq!(tree.frame_of(child).unwrap(), frame);
}

#[test]
fn fractional_frame_scales_against_the_constraint() {
    let tree = tree_with_constraint(200.0, 100.0);
    tree.set_root(View::image("pic", Size::new(40.0, 20.0)).fractional(50.0, 25.0));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    let child = tree.children_of(root)[0];
    let frame = tree.frame_of(root).unwrap();

    assert_eq!(frame.size, Size::new(100.0, 25.0));
    assert_eq!(tree.frame_of(child).unwrap(), frame);
}

#[test]
fn decoration_box_adopts_its_child_frame() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_root(View::image("pic", Size::new(40.0, 20.0)).decorated(Default::default()));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    let child = tree.children_of(root)[0];
    assert_eq!(tree.frame_of(root), tree.frame_of(child));
}

#[test]
fn short_text_takes_its_unbounded_width() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_text_metrics(Rc::new(FixedTextMetrics {
        char_width: 5.0,
        line_height: 10.0,
    }));
    tree.set_root(View::text("hello", 14.0));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    assert_eq!(tree.frame_of(root).unwrap().size, Size::new(25.0, 10.0));
}

#[test]
fn long_text_wraps_to_the_constraint_width() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_text_metrics(Rc::new(FixedTextMetrics {
        char_width: 5.0,
        line_height: 10.0,
    }));
    // 30 characters at 5.0 each: 150.0 unbounded, two lines at 100.0.
    tree.set_root(View::text("abcdefghijklmnopqrstuvwxyz0123", 14.0));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    assert_eq!(tree.frame_of(root).unwrap().size, Size::new(100.0, 20.0));
}

#[test]
fn geometry_reader_sizes_to_content_width_and_full_height() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_root(View::geometry_reader(|constraint| {
        View::image("half", Size::new(constraint.width / 2.0, 10.0))
    }));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    assert_eq!(tree.frame_of(root).unwrap().size, Size::new(50.0, 100.0));
    assert_eq!(tree.children_of(root).len(), 1);
}

#[test]
fn geometry_reader_replaces_its_content_on_relayout() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_root(View::geometry_reader(|constraint| {
        View::image("half", Size::new(constraint.width / 2.0, 10.0))
    }));
    tree.layout_root();
    let first = tree.children_of(tree.root_id().unwrap());

    tree.layout_root();
    let second = tree.children_of(tree.root_id().unwrap());

    assert_eq!(second.len(), 1);
    assert_ne!(first[0], second[0]);
}

#[test]
fn repeated_layout_is_idempotent() {
    let tree = tree_with_constraint(120.0, 200.0);
    tree.set_root(View::vstack(vec![
        View::image("a", Size::new(30.0, 10.0)).margin(EdgeInsets::uniform(4.0)),
        View::image("b", Size::new(20.0, 20.0)).sized(Some(50.0), None),
        View::spacer(),
        View::image("c", Size::new(10.0, 10.0)),
    ]));
    tree.layout_root();
    let mut first = tree.all_frames();

    tree.layout_root();
    let mut second = tree.all_frames();

    let key = |(node, _): &(NodeId, Frame)| (node.index(), node.generation());
    first.sort_by_key(key);
    second.sort_by_key(key);
    assert_eq!(first, second);
}

struct Badge;

impl Composite for Badge {
    fn body(&self) -> View {
        View::image("badge", Size::new(30.0, 5.0))
    }
}

#[test]
fn composite_keeps_its_stack_position_and_takes_the_body_size() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_root(View::vstack(vec![
        View::image("a", Size::new(10.0, 10.0)),
        View::composite(Badge),
    ]));
    tree.layout_root();

    let root = tree.root_id().unwrap();
    let storage = tree.children_of(root)[0];
    let composite = tree.children_of(storage)[1];
    let body = tree.children_of(composite)[0];

    assert_eq!(
        tree.frame_of(composite).unwrap(),
        Frame::new(Point::new(0.0, 10.0), Size::new(30.0, 5.0))
    );
    assert_eq!(tree.frame_of(body).unwrap().origin, Point::new(0.0, 10.0));
}

#[test]
fn dump_tree_lists_nodes_with_frames() {
    let tree = tree_with_constraint(100.0, 100.0);
    tree.set_root(View::vstack(vec![View::image("a", Size::new(10.0, 10.0))]));
    tree.layout_root();

    let dump = tree.dump_tree();
    assert!(dump.contains("VStack"));
    assert!(dump.contains("Image"));
    assert!(dump.contains("size (10, 10)"));
}
