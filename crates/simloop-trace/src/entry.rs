//! Finished activity records.

use simloop_core::{ActivityId, SimDuration, SimTime};

/// One finished activity.  Immutable once appended to a trace.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    pub id:          ActivityId,
    pub start:       SimTime,
    /// Never earlier than `start`.
    pub end:         SimTime,
    pub description: String,
}

impl Entry {
    /// Simulated time the activity spanned.
    pub fn duration(&self) -> SimDuration {
        self.end - self.start
    }
}
