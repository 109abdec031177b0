//! Unit and scenario tests for simloop-trace.

use simloop_core::{NaiveDate, SimTime, TimeDelta};
use simloop_sched::Scheduler;

use crate::Trace;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn t(h: u32, m: u32) -> SimTime {
    SimTime(
        NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap(),
    )
}

fn hours(n: i64) -> TimeDelta {
    TimeDelta::hours(n)
}

fn descriptions(trace: &Trace) -> Vec<String> {
    trace.entries().into_iter().map(|e| e.description).collect()
}

// ── Activity ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod activity {
    use simloop_core::ActivityId;

    use super::*;

    #[test]
    fn ids_count_up_from_one() {
        let sched = Scheduler::new();
        let trace = Trace::new(&sched);
        let a = trace.activity("a");
        let b = trace.activity("b");
        assert_eq!(a.id(), ActivityId(1));
        assert_eq!(b.id(), ActivityId(2));
        assert_eq!(a.description(), "a");
    }

    #[test]
    fn nothing_logged_until_finish() {
        let sched = Scheduler::new();
        let trace = Trace::new(&sched);
        let mut a = trace.activity("Idle");
        a.start();
        assert!(trace.is_empty());

        let entry = a.finish();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.entries()[0], entry);
        assert_eq!(entry.start, entry.end);
    }

    #[test]
    fn unstarted_activity_keeps_creation_instant() {
        let sched = Scheduler::new();
        let trace = Trace::new(&sched);
        sched.new_task({
            let (sched, trace) = (sched.clone(), trace.clone());
            async move {
                let a = trace.activity("Wait");
                assert_eq!(a.start_time(), t(0, 0));
                sched.sleep(hours(2)).await;
                a.finish();
            }
        });
        sched.run().unwrap();

        let entry = &trace.entries()[0];
        assert_eq!((entry.start, entry.end), (t(0, 0), t(2, 0)));
        assert_eq!(entry.duration(), hours(2));
    }

    #[test]
    fn dropped_activity_leaves_no_entry() {
        let sched = Scheduler::new();
        let trace = Trace::new(&sched);
        let mut a = trace.activity("Abandoned");
        a.start();
        drop(a);
        assert!(trace.is_empty());
        assert_eq!(trace.activity("next").id().0, 2);
    }
}

// ── Trace scenarios ───────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use std::io;

    use super::*;

    #[test]
    fn nested_scopes_finish_inner_first() {
        let sched = Scheduler::new();
        let trace = Trace::new(&sched);
        sched.new_task({
            let (sched, trace) = (sched.clone(), trace.clone());
            async move {
                trace
                    .scope("Trip", async {
                        trace.scope("Drive", sched.sleep(hours(1))).await;
                        trace.scope("Unload", sched.sleep(hours(2))).await;
                    })
                    .await;
            }
        });
        sched.run().unwrap();

        assert_eq!(descriptions(&trace), ["Drive", "Unload", "Trip"]);
        let entries = trace.entries();
        assert_eq!((entries[0].start, entries[0].end), (t(0, 0), t(1, 0)));
        assert_eq!((entries[1].start, entries[1].end), (t(1, 0), t(3, 0)));
        assert_eq!((entries[2].start, entries[2].end), (t(0, 0), t(3, 0)));
        assert_eq!(entries[2].id.0, 1);
    }

    #[test]
    fn interleaved_tasks_log_in_completion_order() {
        let sched = Scheduler::new();
        let trace = Trace::new(&sched);
        for (name, h) in [("long", 5), ("short", 1), ("mid", 3)] {
            let (task_sched, trace) = (sched.clone(), trace.clone());
            sched.new_task(async move {
                trace.scope(name, task_sched.sleep(hours(h))).await;
            });
        }
        sched.run().unwrap();

        assert_eq!(descriptions(&trace), ["short", "mid", "long"]);
        for entry in trace.entries() {
            assert!(entry.start <= entry.end);
        }
    }

    #[test]
    fn scope_finishes_on_error_output() {
        let sched = Scheduler::new();
        let trace = Trace::new(&sched);
        sched.new_task({
            let (sched, trace) = (sched.clone(), trace.clone());
            async move {
                trace
                    .scope("Load", async {
                        sched.sleep(hours(1)).await;
                        Err::<(), _>(io::Error::other("truck is full"))
                    })
                    .await
            }
        });

        assert!(sched.run().is_err());
        let entries = trace.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].end, t(1, 0));
    }

    #[test]
    fn suspended_scope_is_not_recorded() {
        let sched = Scheduler::new();
        let trace = Trace::new(&sched);
        sched.new_task({
            let (sched, trace) = (sched.clone(), trace.clone());
            async move {
                trace.scope("Short", sched.sleep(hours(1))).await;
                trace.scope("Overnight", sched.sleep(hours(12))).await;
            }
        });
        sched.run_until(t(6, 0)).unwrap();

        assert_eq!(descriptions(&trace), ["Short"]);
        sched.run().unwrap();
        assert_eq!(descriptions(&trace), ["Short", "Overnight"]);
    }

    #[test]
    fn zero_length_activity() {
        let sched = Scheduler::new();
        let trace = Trace::new(&sched);
        sched.new_task({
            let trace = trace.clone();
            async move {
                trace.scope("Blink", async {}).await;
            }
        });
        sched.run().unwrap();

        let entry = &trace.entries()[0];
        assert_eq!(entry.start, entry.end);
        assert_eq!(entry.duration(), TimeDelta::zero());
    }
}
