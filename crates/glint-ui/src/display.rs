use std::fmt;
use std::rc::Rc;

use glint_ui_layout::Frame;

use crate::element::{Decoration, ElementKind, TapAction};
use crate::store::TreeInner;
use crate::view::{Composite, View};

use glint_core::NodeId;

/// Opaque handle to one backend-side display object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DisplayHandle(pub u64);

/// What a renderable element projects into the backend.
#[derive(Clone)]
pub enum DisplayKind {
    Container,
    Text { content: String, font_size: f32 },
    Image { source: String },
    DecorationBox { decoration: Decoration },
    TapCapture { action: TapAction },
    Navigation,
}

impl DisplayKind {
    pub fn name(&self) -> &'static str {
        match self {
            DisplayKind::Container => "Container",
            DisplayKind::Text { .. } => "Text",
            DisplayKind::Image { .. } => "Image",
            DisplayKind::DecorationBox { .. } => "DecorationBox",
            DisplayKind::TapCapture { .. } => "TapCapture",
            DisplayKind::Navigation => "Navigation",
        }
    }
}

impl fmt::Debug for DisplayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target surface the element graph is projected onto. Implementations
/// own the actual display objects; the runtime only speaks in handles.
pub trait DisplayBackend {
    fn create(&mut self, kind: DisplayKind) -> DisplayHandle;
    fn attach(&mut self, child: DisplayHandle, parent: DisplayHandle);
    fn detach(&mut self, handle: DisplayHandle);
    fn update_frame(&mut self, handle: DisplayHandle, frame: Frame);
}

fn display_kind_for(kind: &ElementKind) -> Option<DisplayKind> {
    match kind {
        ElementKind::Text { content, font_size } => Some(DisplayKind::Text {
            content: content.clone(),
            font_size: *font_size,
        }),
        ElementKind::Image { source, .. } => Some(DisplayKind::Image {
            source: source.clone(),
        }),
        ElementKind::DecorationBox { decoration } => Some(DisplayKind::DecorationBox {
            decoration: *decoration,
        }),
        ElementKind::TapCapture { action } => Some(DisplayKind::TapCapture {
            action: action.clone(),
        }),
        ElementKind::Navigation => Some(DisplayKind::Navigation),
        ElementKind::HStack { .. } | ElementKind::VStack { .. } => Some(DisplayKind::Container),
        _ => None,
    }
}

/// Project `node`'s subtree into the backend under `host`. Renderable
/// nodes get a display object and become the host for their descendants;
/// structural nodes pass the host through.
///
/// Composites reached by the walk are appended to `rendered` so the caller
/// can fire their render notifications after the tree borrow is released.
/// They may write state, which re-enters the tree.
pub(crate) fn build_display_tree(
    inner: &mut TreeInner,
    backend: &mut dyn DisplayBackend,
    node: NodeId,
    host: DisplayHandle,
    rendered: &mut Vec<Rc<dyn Composite>>,
) {
    let kind = match inner.kind_of(node) {
        Some(kind) => kind.clone(),
        None => return,
    };

    let child_host = match display_kind_for(&kind) {
        Some(display_kind) => {
            let handle = backend.create(display_kind);
            backend.attach(handle, host);
            if let Some(frame) = inner.frame_of(node) {
                backend.update_frame(handle, frame);
            }
            inner.set_display(node, handle);
            handle
        }
        None => host,
    };

    for child in inner.children_of(node) {
        build_display_tree(inner, backend, child, child_host, rendered);
    }

    if let Some(View::Composite(composite)) = inner.view_of(node) {
        rendered.push(composite);
    }
}
