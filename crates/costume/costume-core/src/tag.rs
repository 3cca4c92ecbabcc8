//! Four-character component type tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A big-endian four-character code, e.g. `mesh` or `skel`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Tag(pub u32);

impl Tag {
    pub const MESH: Tag = Tag::from_bytes(*b"mesh");
    pub const SKEL: Tag = Tag::from_bytes(*b"skel");
    pub const TEXI: Tag = Tag::from_bytes(*b"texi");
    pub const ANIM: Tag = Tag::from_bytes(*b"anim");
    pub const LUAC: Tag = Tag::from_bytes(*b"luac");
    pub const LUAV: Tag = Tag::from_bytes(*b"luav");
    pub const SPRT: Tag = Tag::from_bytes(*b"sprt");
    pub const SHAD: Tag = Tag::from_bytes(*b"shad");
    pub const AWGT: Tag = Tag::from_bytes(*b"awgt");
    pub const SND2: Tag = Tag::from_bytes(*b"snd2");

    #[inline]
    pub const fn from_bytes(b: [u8; 4]) -> Self {
        Tag(u32::from_be_bytes(b))
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.to_bytes() {
            if b.is_ascii_graphic() {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self})")
    }
}
