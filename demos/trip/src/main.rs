//! trip — simulates a camping weekend and prints what everyone did.
//!
//! Two itineraries share one clock: JM takes the YW group out in Stephano
//! while Aaron hauls trailers around in Severus.  Every drive, load and
//! unload is traced; the finished trace is printed as an indented
//! begin/end timeline and optionally saved as `activities.csv`.

mod camp;
mod model;

use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use demo_cli::LogArgs;
use simloop_output::{CsvWriter, OutputWriter, render_timeline};
use simloop_sched::Scheduler;

use camp::{Cast, Trip, aaron_camp, jm_camp};

#[derive(Parser)]
#[command(name = "trip", about = "Simulates our trip")]
struct Cli {
    /// Also write `activities.csv` into this directory
    #[arg(long)]
    csv: Option<PathBuf>,

    #[command(flatten)]
    log: LogArgs,
}

fn simulate(cli: &Cli) -> Result<()> {
    let sched = Scheduler::new();
    let trip = Trip::new(&sched);
    let cast = Rc::new(Cast::assemble()?);

    sched.new_task(jm_camp(trip.clone(), Rc::clone(&cast)));
    sched.new_task(aaron_camp(trip.clone(), cast));
    sched.run()?;

    let entries = trip.trace.entries();
    let mut out = io::stdout().lock();
    render_timeline(&entries, &mut out)?;
    out.flush()?;

    if let Some(dir) = &cli.csv {
        let mut writer = CsvWriter::new(dir)
            .with_context(|| format!("opening activity CSV in {}", dir.display()))?;
        writer.write_entries(&entries)?;
        writer.finish()?;
        info!("Wrote {} activities to {}", entries.len(), dir.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.log.init();

    match simulate(&cli) {
        Ok(()) => {
            info!("Operation completed");
            Ok(())
        }
        Err(e) => {
            error!("Unexpected error encountered: {e:#}");
            Err(e)
        }
    }
}
