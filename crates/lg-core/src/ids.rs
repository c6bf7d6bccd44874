//! Strongly typed identifier wrappers.
//!
//! Ids are `Copy + Ord + Hash` so they work as map keys and give the graph a
//! stable, ascending iteration order.  Node ids are derived from fine-grid
//! coordinates by the generator; agent ids come from a monotonic counter on
//! the network.

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

            /// Raw integer value.
            #[inline(always)]
            pub fn get(self) -> $inner {
                self.0
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

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Identity of a robot agent.  Never reused within one network.
    pub struct AgentId(u64);
}

typed_id! {
    /// Identity of a lane-graph node (one fine grid cell).
    pub struct NodeId(u32);
}

impl NodeId {
    /// Row-major id for fine-grid coordinates `(x, y)` in a grid `width` wide.
    ///
    /// Returns `None` for negative coordinates or ids that overflow `u32`.
    pub fn from_grid(x: i32, y: i32, width: u32) -> Option<NodeId> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= width {
            return None;
        }
        y.checked_mul(width)?.checked_add(x).map(NodeId)
    }
}
