//! `simloop-core` — foundational types for the `simloop` discrete-event
//! engine.
//!
//! This crate is a dependency of every other `simloop-*` crate.  It has no
//! `simloop-*` dependencies and minimal external ones (`chrono` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`ids`]   | `TaskId`, `ActivityId`                                |
//! | [`time`]  | `SimTime`, `SimDuration`, `IntoDeadline`              |
//! | [`error`] | `SimError`, `SimResult`, `TaskError`                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `SimTime` and the ids.   |

pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SimError, SimResult, TaskError};
pub use ids::{ActivityId, TaskId};
pub use time::{IntoDeadline, SimDuration, SimTime};

// Calendar types callers need to build deadlines.
pub use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
