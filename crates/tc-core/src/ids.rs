//! Strongly typed, zero-cost identifier wrappers.
//!
//! Stops and buses live in append-only arenas inside the catalogue; every
//! cross-reference (bus → stops, stop → buses, graph vertex → stop) is one of
//! these indices.  The inner integer is `pub` so hot loops can index a `Vec`
//! directly, but callers should prefer `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `$what` names the referenced entity in generated docs and `Display`.
macro_rules! typed_id {
    ($what:literal, $(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            #[doc = concat!("Refers to no ", $what, "; the all-ones bit pattern.")]
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Position in the owning arena or edge array.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// `false` only for [`Self::INVALID`].
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        impl Default for $name {
            #[doc = concat!("An unset ", $what, " id, i.e. `INVALID`.")]
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{} #{}", $what, self.0)
                } else {
                    write!(f, "{} <invalid>", $what)
                }
            }
        }

        /// Fails when the arena has outgrown the id's integer width.
        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    "stop",
    /// Index of a stop in the catalogue's stop arena.  Doubles as the routing
    /// graph's vertex id.
    pub struct StopId(u32);
}

typed_id! {
    "bus",
    /// Index of a bus in the catalogue's bus arena.
    pub struct BusId(u32);
}

typed_id! {
    "edge",
    /// Index of a directed edge in the routing graph.
    pub struct EdgeId(u32);
}
