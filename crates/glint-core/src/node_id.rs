use std::fmt;

/// Identifier of one node in the retained element graph.
///
/// A `NodeId` is an arena slot index paired with the generation the slot
/// had when the node was created. The generation is bumped every time a
/// slot is vacated, so an id held past its node's removal stops matching
/// and is treated as stale instead of resurrecting the slot's next tenant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}v{}", self.index, self.generation)
    }
}
