//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into `Vec`s via `id.0 as usize`, but callers should prefer
//! the `.index()` helpers for clarity.
//!
//! Numeric ids are internal.  The identifiers that leave the process (node and
//! link ids in the XML/CSV files) are derived from [`LatticeCoord`] instead, so
//! they stay stable no matter in which order a network was assembled.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Sequential agent identifier, assigned from 0 in creation order.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a road-network vertex.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed road-network edge.
    pub struct EdgeId(u32);
}

// ── LatticeCoord ──────────────────────────────────────────────────────────────

/// Integer `(street, avenue)` position of a grid vertex before jitter.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeCoord {
    pub street: u32,
    pub avenue: u32,
}

impl LatticeCoord {
    #[inline]
    pub fn new(street: u32, avenue: u32) -> Self {
        Self { street, avenue }
    }

    /// External node identifier, e.g. `"(3,7)"`.
    pub fn node_label(self) -> String {
        self.to_string()
    }

    /// External identifier of the directed link `self -> to`, e.g. `"(0,1)->(0,0)"`.
    pub fn link_label(self, to: LatticeCoord) -> String {
        format!("{self}->{to}")
    }
}

impl fmt::Display for LatticeCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.street, self.avenue)
    }
}
