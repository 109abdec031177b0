//! Strongly typed, zero-cost identifier wrappers.
//!
//! Ids are handed out in increasing order by their owner (the scheduler for
//! tasks, a trace for activities), so comparing two ids compares creation
//! order.  All ids are `Copy + Ord + Hash`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The id that follows `self` in allocation order.
            #[inline(always)]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for $inner {
            #[inline(always)]
            fn from(id: $name) -> $inner {
                id.0
            }
        }
    };
}

typed_id! {
    /// A task registered with a scheduler.  Assigned from 0 in registration
    /// order.
    pub struct TaskId(u64);
}

typed_id! {
    /// An activity recorded by a trace.  Assigned from 1 in creation order.
    pub struct ActivityId(u64);
}
