use std::fmt;
use std::rc::Rc;

use glint_core::{DynProperty, EnvProperty};
use glint_ui_layout::{Constraint, EdgeInsets, Size, StackAlignment};

use crate::element::{Decoration, GeometryContent, TapAction};

/// A user-defined view. Implementations describe a subtree through `body`
/// and declare the observable cells and environment values their body
/// touches.
pub trait Composite {
    fn body(&self) -> View;

    /// The state cells and bindings this view owns. Every cell the body
    /// reads must be listed here, or writes to it will never invalidate.
    fn properties(&self) -> Vec<Rc<dyn DynProperty>> {
        Vec::new()
    }

    /// Environment declarations: publications for the subtree plus empty
    /// consumers to fill from ancestors.
    fn environment(&self) -> Vec<Rc<dyn EnvProperty>> {
        Vec::new()
    }

    fn did_mount(&self) {}
    fn did_unmount(&self) {}
    fn did_render(&self) {}
}

/// Immutable description of a UI subtree, consumed by the builder to
/// produce element graph nodes. Views are cheap to clone; the tree retains
/// one per node so an invalidated subtree can be rebuilt from it.
#[derive(Clone)]
pub enum View {
    Text {
        content: String,
        font_size: f32,
    },
    Image {
        source: String,
        size: Size,
    },
    Spacer,
    DecorationBox {
        decoration: Decoration,
        child: Box<View>,
    },
    Margin {
        insets: EdgeInsets,
        child: Box<View>,
    },
    SizedFrame {
        width: Option<f32>,
        height: Option<f32>,
        child: Box<View>,
    },
    FractionalFrame {
        width_percent: f32,
        height_percent: f32,
        child: Box<View>,
    },
    TapCapture {
        action: TapAction,
        child: Box<View>,
    },
    GeometryReader {
        content: GeometryContent,
    },
    Navigation {
        child: Box<View>,
    },
    HStack {
        alignment: StackAlignment,
        spacing: f32,
        children: Vec<View>,
    },
    VStack {
        alignment: StackAlignment,
        spacing: f32,
        children: Vec<View>,
    },
    /// Several sibling descriptions flattened into the parent.
    Group {
        children: Vec<View>,
    },
    Composite(Rc<dyn Composite>),
}

impl View {
    pub fn text(content: impl Into<String>, font_size: f32) -> Self {
        View::Text {
            content: content.into(),
            font_size,
        }
    }

    pub fn image(source: impl Into<String>, size: Size) -> Self {
        View::Image {
            source: source.into(),
            size,
        }
    }

    pub fn spacer() -> Self {
        View::Spacer
    }

    pub fn decorated(self, decoration: Decoration) -> Self {
        View::DecorationBox {
            decoration,
            child: Box::new(self),
        }
    }

    pub fn margin(self, insets: EdgeInsets) -> Self {
        View::Margin {
            insets,
            child: Box::new(self),
        }
    }

    pub fn sized(self, width: Option<f32>, height: Option<f32>) -> Self {
        View::SizedFrame {
            width,
            height,
            child: Box::new(self),
        }
    }

    /// Frame sized as a percentage (0..=100) of the incoming constraint.
    pub fn fractional(self, width_percent: f32, height_percent: f32) -> Self {
        View::FractionalFrame {
            width_percent,
            height_percent,
            child: Box::new(self),
        }
    }

    pub fn on_tap(self, action: impl Fn() + 'static) -> Self {
        View::TapCapture {
            action: Rc::new(action),
            child: Box::new(self),
        }
    }

    pub fn geometry_reader(content: impl Fn(Constraint) -> View + 'static) -> Self {
        View::GeometryReader {
            content: Rc::new(content),
        }
    }

    pub fn navigation(self) -> Self {
        View::Navigation {
            child: Box::new(self),
        }
    }

    pub fn hstack(children: Vec<View>) -> Self {
        View::HStack {
            alignment: StackAlignment::default(),
            spacing: 0.0,
            children,
        }
    }

    pub fn hstack_with(alignment: StackAlignment, spacing: f32, children: Vec<View>) -> Self {
        View::HStack {
            alignment,
            spacing,
            children,
        }
    }

    pub fn vstack(children: Vec<View>) -> Self {
        View::VStack {
            alignment: StackAlignment::default(),
            spacing: 0.0,
            children,
        }
    }

    pub fn vstack_with(alignment: StackAlignment, spacing: f32, children: Vec<View>) -> Self {
        View::VStack {
            alignment,
            spacing,
            children,
        }
    }

    pub fn group(children: Vec<View>) -> Self {
        View::Group { children }
    }

    pub fn composite(composite: impl Composite + 'static) -> Self {
        View::Composite(Rc::new(composite))
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Text { .. } => "Text",
            View::Image { .. } => "Image",
            View::Spacer => "Spacer",
            View::DecorationBox { .. } => "DecorationBox",
            View::Margin { .. } => "Margin",
            View::SizedFrame { .. } => "SizedFrame",
            View::FractionalFrame { .. } => "FractionalFrame",
            View::TapCapture { .. } => "TapCapture",
            View::GeometryReader { .. } => "GeometryReader",
            View::Navigation { .. } => "Navigation",
            View::HStack { .. } => "HStack",
            View::VStack { .. } => "VStack",
            View::Group { .. } => "Group",
            View::Composite(_) => "Composite",
        };
        f.write_str(name)
    }
}
