//! Global tile ids. The top four bits of every cell carry flip flags, the
//! rest is the tile id (0 = empty cell).

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FlipFlags: u32 {
        const HORIZONTAL = 0x8000_0000;
        const VERTICAL = 0x4000_0000;
        const DIAGONAL = 0x2000_0000;
        const ROTATED_HEX = 0x1000_0000;
    }
}

/// Masks the flip flags off a raw cell value.
pub const GID_MASK: u32 = !FlipFlags::all().bits();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gid(u32);

impl Gid {
    pub const EMPTY: Gid = Gid(0);

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn id(self) -> u32 {
        self.0 & GID_MASK
    }

    pub const fn flags(self) -> FlipFlags {
        FlipFlags::from_bits_truncate(self.0)
    }

    /// A cell with no tile, whatever flags are set.
    pub const fn is_empty(self) -> bool {
        self.id() == 0
    }
}

impl From<u32> for Gid {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}
