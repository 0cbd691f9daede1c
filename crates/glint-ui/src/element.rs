use std::fmt;
use std::rc::Rc;

use glint_ui_layout::{Constraint, EdgeInsets, Size, StackAlignment};

use crate::view::View;

/// Visual styling carried by a decoration box.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Decoration {
    pub color: Option<u32>,
    pub corner_radius: f32,
    pub border_color: Option<u32>,
    pub border_width: f32,
}

impl Decoration {
    pub fn color(color: u32) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }
}

/// Deferred content of a geometry reader, resolved during layout once the
/// available space is known.
pub type GeometryContent = Rc<dyn Fn(Constraint) -> View>;

/// Callback invoked when a tap lands inside a tap capture element.
pub type TapAction = Rc<dyn Fn()>;

/// The retained payload of one element graph node.
///
/// This is a closed set: every construct the runtime understands appears
/// here as a variant, and the builder, layout pass, and display projection
/// all match on it exhaustively.
#[derive(Clone)]
pub enum ElementKind {
    Text { content: String, font_size: f32 },
    Image { source: String, size: Size },
    Spacer,
    DecorationBox { decoration: Decoration },
    Margin { insets: EdgeInsets },
    SizedFrame { width: Option<f32>, height: Option<f32> },
    FractionalFrame { width_percent: f32, height_percent: f32 },
    TapCapture { action: TapAction },
    GeometryReader { content: GeometryContent },
    Navigation,
    HStack { alignment: StackAlignment, spacing: f32 },
    VStack { alignment: StackAlignment, spacing: f32 },
    /// Structural holder for a stack's ordered children.
    Storage,
    /// A user-defined view whose body produced the single child subtree.
    Composite,
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Text { .. } => "Text",
            ElementKind::Image { .. } => "Image",
            ElementKind::Spacer => "Spacer",
            ElementKind::DecorationBox { .. } => "DecorationBox",
            ElementKind::Margin { .. } => "Margin",
            ElementKind::SizedFrame { .. } => "SizedFrame",
            ElementKind::FractionalFrame { .. } => "FractionalFrame",
            ElementKind::TapCapture { .. } => "TapCapture",
            ElementKind::GeometryReader { .. } => "GeometryReader",
            ElementKind::Navigation => "Navigation",
            ElementKind::HStack { .. } => "HStack",
            ElementKind::VStack { .. } => "VStack",
            ElementKind::Storage => "Storage",
            ElementKind::Composite => "Composite",
        }
    }

    /// Whether this node projects into the display backend.
    pub fn is_renderable(&self) -> bool {
        matches!(
            self,
            ElementKind::Text { .. }
                | ElementKind::Image { .. }
                | ElementKind::DecorationBox { .. }
                | ElementKind::TapCapture { .. }
                | ElementKind::Navigation
                | ElementKind::HStack { .. }
                | ElementKind::VStack { .. }
        )
    }

    /// Whether this node participates in the layout pass at all. Storage
    /// is structural only, and spacers are resolved by their owning stack.
    pub fn has_layout_rule(&self) -> bool {
        !matches!(self, ElementKind::Storage | ElementKind::Spacer)
    }

    /// Whether this node's size depends on its parent's constraint.
    /// A re-layout starting below a non-propagating node never needs to
    /// climb past it.
    pub fn propagates_layout_to_parent(&self) -> bool {
        !matches!(self, ElementKind::SizedFrame { .. })
    }

    /// Whether position shifts from an ancestor stop here instead of
    /// cascading into the subtree.
    pub fn stops_shift_propagation(&self) -> bool {
        matches!(self, ElementKind::GeometryReader { .. })
    }
}

impl fmt::Debug for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Text { content, font_size } => f
                .debug_struct("Text")
                .field("content", content)
                .field("font_size", font_size)
                .finish(),
            ElementKind::Image { source, size } => f
                .debug_struct("Image")
                .field("source", source)
                .field("size", size)
                .finish(),
            ElementKind::DecorationBox { decoration } => f
                .debug_struct("DecorationBox")
                .field("decoration", decoration)
                .finish(),
            ElementKind::Margin { insets } => {
                f.debug_struct("Margin").field("insets", insets).finish()
            }
            ElementKind::SizedFrame { width, height } => f
                .debug_struct("SizedFrame")
                .field("width", width)
                .field("height", height)
                .finish(),
            ElementKind::FractionalFrame {
                width_percent,
                height_percent,
            } => f
                .debug_struct("FractionalFrame")
                .field("width_percent", width_percent)
                .field("height_percent", height_percent)
                .finish(),
            ElementKind::HStack { alignment, spacing } => f
                .debug_struct("HStack")
                .field("alignment", alignment)
                .field("spacing", spacing)
                .finish(),
            ElementKind::VStack { alignment, spacing } => f
                .debug_struct("VStack")
                .field("alignment", alignment)
                .field("spacing", spacing)
                .finish(),
            other => f.write_str(other.name()),
        }
    }
}
