//! Nested begin/end view of a trace.
//!
//! Every entry contributes a begin event at its start and an end event at
//! its end.  Events at one instant are ordered so the lines nest:
//!
//! ```text
//! ends of activities opened earlier    descending id (innermost first)
//! begins                               ascending id (outermost first)
//! ends of zero-length activities       right after their own begin
//! ```
//!
//! Ids grow in creation order, so an enclosing activity always carries a
//! smaller id than the activities it contains.  Rendering indents each line
//! by the number of activities open at that point.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;
use std::io::Write;

use simloop_core::{ActivityId, SimTime};
use simloop_trace::Entry;

use crate::OutputResult;

/// Which edge of an activity an event marks.  Begins sort before ends.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Phase {
    Begin,
    End,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Begin => "begin",
            Phase::End => "end",
        })
    }
}

/// One edge of an activity.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TimelineEvent {
    pub at:          SimTime,
    pub id:          ActivityId,
    pub phase:       Phase,
    pub description: String,
}

/// Flatten `entries` into sorted begin/end events.
pub fn timeline(entries: &[Entry]) -> Vec<TimelineEvent> {
    let zero_length: HashSet<ActivityId> = entries
        .iter()
        .filter(|entry| entry.start == entry.end)
        .map(|entry| entry.id)
        .collect();
    let mut events: Vec<TimelineEvent> = entries
        .iter()
        .flat_map(|entry| {
            [
                TimelineEvent {
                    at:          entry.start,
                    id:          entry.id,
                    phase:       Phase::Begin,
                    description: entry.description.clone(),
                },
                TimelineEvent {
                    at:          entry.end,
                    id:          entry.id,
                    phase:       Phase::End,
                    description: entry.description.clone(),
                },
            ]
        })
        .collect();
    events.sort_by_cached_key(|event| {
        let closes_span = event.phase == Phase::End && !zero_length.contains(&event.id);
        let rank = if closes_span {
            (0u8, Reverse(event.id), ActivityId(0))
        } else {
            (1u8, Reverse(ActivityId(0)), event.id)
        };
        (event.at, rank, event.phase, event.description.clone())
    });
    events
}

/// Write one line per timeline event to `out`.
///
/// A begin line is indented one level deeper than the lines before it; the
/// matching end line shares its depth.
pub fn render_timeline<W: Write>(entries: &[Entry], out: &mut W) -> OutputResult<()> {
    let mut level = 0usize;
    for event in timeline(entries) {
        if event.phase == Phase::Begin {
            level += 1;
        }
        writeln!(
            out,
            "{} {} {} {}",
            " ".repeat(level),
            event.at,
            event.phase,
            event.description
        )?;
        if event.phase == Phase::End {
            level = level.saturating_sub(1);
        }
    }
    Ok(())
}
