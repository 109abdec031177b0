//! event_demo — a guest hides until the recipient arrives.
//!
//! The guest waits on the arrival event twice.  The second wait happens after
//! the event is set, so it returns without suspending.

use anyhow::Result;
use clap::Parser;
use log::info;

use demo_cli::LogArgs;
use simloop_core::TimeDelta;
use simloop_sched::{Event, Scheduler};

#[derive(Parser)]
#[command(name = "event_demo", about = "Broadcast wake-up through an event")]
struct Cli {
    /// Hours the recipient takes to arrive
    #[arg(long, default_value_t = 4)]
    hours: i64,

    #[command(flatten)]
    log: LogArgs,
}

async fn guest(sched: Scheduler, arrival: Event) {
    println!("{} Ok, I'm hiding", sched.now());
    arrival.wait().await;
    println!("{} Boo! I'm here", sched.now());
    println!("{} Trying to hide again", sched.now());
    arrival.wait().await;
    println!("{} Done", sched.now());
}

async fn recipient(sched: Scheduler, arrival: Event, delay: TimeDelta) {
    println!("{} Waiting a long time", sched.now());
    sched.sleep(delay).await;
    println!("{} Ok I'm here", sched.now());
    arrival.set();
    println!("{} I'm done", sched.now());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.log.init();

    let sched = Scheduler::new();
    let arrival = Event::new(&sched);
    sched.new_task(guest(sched.clone(), arrival.clone()));
    sched.new_task(recipient(sched.clone(), arrival, TimeDelta::hours(cli.hours)));
    sched.run()?;

    info!("Finished at {}", sched.now());
    Ok(())
}
