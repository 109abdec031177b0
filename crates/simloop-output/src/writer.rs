//! The `OutputWriter` trait implemented by file backends.

use simloop_trace::Entry;

use crate::OutputResult;

/// A sink for finished trace entries.
pub trait OutputWriter {
    /// Append a batch of entries in the order given.
    fn write_entries(&mut self, entries: &[Entry]) -> OutputResult<()>;

    /// Flush and close the underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
