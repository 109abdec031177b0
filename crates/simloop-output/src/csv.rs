//! CSV output backend.
//!
//! Creates `activities.csv` in the configured output directory, one row per
//! entry: `id,start,end,description`.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use simloop_trace::Entry;

use crate::OutputResult;
use crate::writer::OutputWriter;

pub const ACTIVITIES_FILE: &str = "activities.csv";

/// Writes trace entries to a CSV file.
pub struct CsvWriter {
    activities: Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create `activities.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut activities = Writer::from_path(dir.join(ACTIVITIES_FILE))?;
        activities.write_record(["id", "start", "end", "description"])?;

        Ok(Self {
            activities,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_entries(&mut self, entries: &[Entry]) -> OutputResult<()> {
        for entry in entries {
            self.activities.write_record(&[
                entry.id.0.to_string(),
                entry.start.to_string(),
                entry.end.to_string(),
                entry.description.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.activities.flush()?;
        Ok(())
    }
}
