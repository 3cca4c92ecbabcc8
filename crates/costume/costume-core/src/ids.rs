//! Identifiers and simple allocators for costume entities.

use serde::{Deserialize, Serialize};

/// Index of a chore within its costume's chore table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ChoreId(pub u32);

/// Slot in a costume's flat component table. Slots exist for every track,
/// including tracks whose descriptor produced no component.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

/// Identity of a costume inside a [`CostumeStack`](crate::stack::CostumeStack).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CostumeId(pub u32);

/// Non-owning reference to a component owned by some costume.
///
/// The referenced costume must outlive whoever holds the handle; the stack
/// guarantees this by only ever popping its top entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ComponentHandle {
    pub costume: CostumeId,
    pub component: ComponentId,
}

impl ChoreId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ComponentId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Monotonic allocator for CostumeId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_costume: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_costume(&mut self) -> CostumeId {
        let id = CostumeId(self.next_costume);
        self.next_costume = self.next_costume.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
