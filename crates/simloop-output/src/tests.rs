//! Unit tests for simloop-output.

use simloop_core::{ActivityId, NaiveDate, SimTime};
use simloop_trace::Entry;

fn t(h: u32, m: u32) -> SimTime {
    SimTime(
        NaiveDate::from_ymd_opt(2022, 7, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap(),
    )
}

fn entry(id: u64, start: SimTime, end: SimTime, description: &str) -> Entry {
    Entry {
        id:          ActivityId(id),
        start,
        end,
        description: description.to_owned(),
    }
}

/// A trip enclosing a drive and an unload, in completion order.
fn nested() -> Vec<Entry> {
    vec![
        entry(2, t(9, 0), t(9, 30), "Drive"),
        entry(3, t(9, 30), t(9, 45), "Unload"),
        entry(1, t(9, 0), t(9, 45), "Trip"),
    ]
}

// ── Timeline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod timeline_tests {
    use super::*;
    use crate::timeline::{Phase, render_timeline, timeline};

    #[test]
    fn two_events_per_entry_sorted() {
        let events = timeline(&nested());
        let view: Vec<_> = events
            .iter()
            .map(|e| (e.at, e.phase, e.description.as_str()))
            .collect();
        assert_eq!(
            view,
            [
                (t(9, 0), Phase::Begin, "Trip"),
                (t(9, 0), Phase::Begin, "Drive"),
                (t(9, 30), Phase::End, "Drive"),
                (t(9, 30), Phase::Begin, "Unload"),
                (t(9, 45), Phase::End, "Unload"),
                (t(9, 45), Phase::End, "Trip"),
            ]
        );
    }

    #[test]
    fn shared_end_instant_closes_innermost_first() {
        let entries = vec![
            entry(3, t(9, 30), t(10, 0), "Inner"),
            entry(2, t(9, 15), t(10, 0), "Middle"),
            entry(1, t(9, 0), t(10, 0), "Outer"),
        ];
        let ends: Vec<_> = timeline(&entries)
            .into_iter()
            .filter(|e| e.phase == Phase::End)
            .map(|e| e.description)
            .collect();
        assert_eq!(ends, ["Inner", "Middle", "Outer"]);
    }

    #[test]
    fn ends_before_begins_at_a_handover_instant() {
        let entries = vec![
            entry(1, t(9, 0), t(9, 30), "Drive"),
            entry(2, t(9, 30), t(9, 45), "Unload"),
        ];
        let mut out = Vec::new();
        render_timeline(&entries, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            [
                "  2022-07-14 09:00:00 begin Drive",
                "  2022-07-14 09:30:00 end Drive",
                "  2022-07-14 09:30:00 begin Unload",
                "  2022-07-14 09:45:00 end Unload",
            ]
        );
    }

    #[test]
    fn zero_length_child_nests_under_parent_begin() {
        let entries = vec![
            entry(2, t(9, 0), t(9, 0), "Blink"),
            entry(1, t(9, 0), t(9, 10), "Watch"),
        ];
        let view: Vec<_> = timeline(&entries)
            .into_iter()
            .map(|e| (e.phase, e.description))
            .collect();
        assert_eq!(
            view,
            [
                (Phase::Begin, "Watch".to_owned()),
                (Phase::Begin, "Blink".to_owned()),
                (Phase::End, "Blink".to_owned()),
                (Phase::End, "Watch".to_owned()),
            ]
        );
    }

    #[test]
    fn begin_sorts_before_end_for_zero_length() {
        let events = timeline(&[entry(1, t(9, 0), t(9, 0), "Blink")]);
        assert_eq!(events[0].phase, Phase::Begin);
        assert_eq!(events[1].phase, Phase::End);
    }

    #[test]
    fn render_indents_by_depth() {
        let entries = vec![
            entry(1, t(9, 0), t(10, 0), "Outer"),
            entry(2, t(9, 15), t(9, 45), "Inner"),
        ];
        let mut out = Vec::new();
        render_timeline(&entries, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            [
                "  2022-07-14 09:00:00 begin Outer",
                "   2022-07-14 09:15:00 begin Inner",
                "   2022-07-14 09:45:00 end Inner",
                "  2022-07-14 10:00:00 end Outer",
            ]
        );
    }

    #[test]
    fn render_empty_trace_writes_nothing() {
        let mut out = Vec::new();
        render_timeline(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::{ACTIVITIES_FILE, CsvWriter};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_file_created_with_header() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join(ACTIVITIES_FILE).exists());

        let mut rdr = csv::Reader::from_path(dir.path().join(ACTIVITIES_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["id", "start", "end", "description"]);
    }

    #[test]
    fn csv_rows_in_given_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_entries(&nested()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(ACTIVITIES_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "2");
        assert_eq!(&rows[0][1], "2022-07-14 09:00:00");
        assert_eq!(&rows[0][2], "2022-07-14 09:30:00");
        assert_eq!(&rows[0][3], "Drive");
        assert_eq!(&rows[2][3], "Trip");
    }

    #[test]
    fn csv_quotes_descriptions_with_commas() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_entries(&[entry(1, t(9, 0), t(9, 5), "Load, then strap down")])
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(ACTIVITIES_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(&rows[0][3], "Load, then strap down");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_entries(&[]).unwrap();
    }

    #[test]
    fn missing_dir_fails() {
        let dir = tmp();
        let missing = dir.path().join("nope");
        assert!(CsvWriter::new(&missing).is_err());
    }
}

// ── End to end ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod integration {
    use simloop_core::TimeDelta;
    use simloop_sched::Scheduler;
    use simloop_trace::Trace;

    use crate::render_timeline;

    #[test]
    fn traced_run_renders_nested() {
        let sched = Scheduler::new();
        let trace = Trace::new(&sched);
        sched.new_task({
            let (sched, trace) = (sched.clone(), trace.clone());
            async move {
                trace
                    .scope("Camp", async {
                        trace.scope("Hike", sched.sleep(TimeDelta::hours(8))).await;
                    })
                    .await;
            }
        });
        sched.run().unwrap();

        let mut out = Vec::new();
        render_timeline(&trace.entries(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            [
                "  2000-01-01 00:00:00 begin Camp",
                "   2000-01-01 00:00:00 begin Hike",
                "   2000-01-01 08:00:00 end Hike",
                "  2000-01-01 08:00:00 end Camp",
            ]
        );
    }
}
