/// Cross-axis placement of a stack child within the stack's extent.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum StackAlignment {
    #[default]
    Start,
    Center,
    End,
}

impl StackAlignment {
    /// Offset of a child of size `child` inside `available` space. The
    /// result can be negative when the child overflows; callers keep it
    /// as-is so overflow stays centered or end-anchored.
    pub fn offset(self, available: f32, child: f32) -> f32 {
        match self {
            StackAlignment::Start => 0.0,
            StackAlignment::Center => (available - child) / 2.0,
            StackAlignment::End => available - child,
        }
    }
}
