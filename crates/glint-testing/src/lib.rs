//! Test doubles for driving the runtime without a real display stack.

use glint_ui::{DisplayBackend, DisplayHandle, DisplayKind, TextMetrics};
use glint_ui_layout::Frame;

/// One backend call, as observed by [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum BackendEvent {
    Created {
        handle: DisplayHandle,
        kind: &'static str,
        /// Text content or image source, when the display object has one.
        detail: Option<String>,
    },
    Attached {
        child: DisplayHandle,
        parent: DisplayHandle,
    },
    Detached {
        handle: DisplayHandle,
    },
    FrameUpdated {
        handle: DisplayHandle,
        frame: Frame,
    },
}

/// Display backend that records every call and hands out sequential
/// handles. Handle 0 is reserved as the host window.
#[derive(Default)]
pub struct RecordingBackend {
    next_handle: u64,
    events: Vec<BackendEvent>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            events: Vec::new(),
        }
    }

    /// The host the element tree renders under.
    pub fn root(&self) -> DisplayHandle {
        DisplayHandle(0)
    }

    pub fn events(&self) -> &[BackendEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Handles attached directly under `parent`, in attach order, with
    /// detached ones filtered out.
    pub fn attached_under(&self, parent: DisplayHandle) -> Vec<DisplayHandle> {
        let mut children = Vec::new();
        for event in &self.events {
            match event {
                BackendEvent::Attached {
                    child,
                    parent: seen,
                } if *seen == parent => children.push(*child),
                BackendEvent::Detached { handle } => children.retain(|child| child != handle),
                _ => {}
            }
        }
        children
    }

    /// The last frame pushed for `handle`, if any.
    pub fn latest_frame(&self, handle: DisplayHandle) -> Option<Frame> {
        self.events.iter().rev().find_map(|event| match event {
            BackendEvent::FrameUpdated {
                handle: seen,
                frame,
            } if *seen == handle => Some(*frame),
            _ => None,
        })
    }

    /// Kind names of every created display object, in creation order.
    pub fn created_kinds(&self) -> Vec<&'static str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BackendEvent::Created { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// Content of every created text display object, in creation order.
    pub fn created_texts(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| match event {
                BackendEvent::Created {
                    kind: "Text",
                    detail: Some(content),
                    ..
                } => Some(content.clone()),
                _ => None,
            })
            .collect()
    }
}

impl DisplayBackend for RecordingBackend {
    fn create(&mut self, kind: DisplayKind) -> DisplayHandle {
        self.next_handle += 1;
        let handle = DisplayHandle(self.next_handle);
        let detail = match &kind {
            DisplayKind::Text { content, .. } => Some(content.clone()),
            DisplayKind::Image { source } => Some(source.clone()),
            _ => None,
        };
        self.events.push(BackendEvent::Created {
            handle,
            kind: kind.name(),
            detail,
        });
        handle
    }

    fn attach(&mut self, child: DisplayHandle, parent: DisplayHandle) {
        self.events.push(BackendEvent::Attached { child, parent });
    }

    fn detach(&mut self, handle: DisplayHandle) {
        self.events.push(BackendEvent::Detached { handle });
    }

    fn update_frame(&mut self, handle: DisplayHandle, frame: Frame) {
        self.events.push(BackendEvent::FrameUpdated { handle, frame });
    }
}

/// Text metrics with fixed per-character width and line height, so tests
/// can assert exact text frames.
pub struct FixedTextMetrics {
    pub char_width: f32,
    pub line_height: f32,
}

impl TextMetrics for FixedTextMetrics {
    fn unbounded_width(&self, content: &str, _font_size: f32, _max_height: f32) -> f32 {
        content.chars().count() as f32 * self.char_width
    }

    fn height_for_width(&self, content: &str, _font_size: f32, width: f32) -> f32 {
        if self.char_width <= 0.0 || width <= 0.0 {
            return self.line_height;
        }
        let per_line = (width / self.char_width).floor().max(1.0);
        let lines = (content.chars().count() as f32 / per_line).ceil().max(1.0);
        lines * self.line_height
    }
}
