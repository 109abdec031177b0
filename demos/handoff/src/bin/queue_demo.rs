//! queue_demo — one producer hands numbered items to one consumer.
//!
//! The producer pauses 1h02m between items and closes the stream with
//! `None`.  The consumer is registered second but blocks on the empty queue,
//! so every item is consumed at the instant it was produced.

use anyhow::Result;
use clap::Parser;
use log::info;

use demo_cli::LogArgs;
use simloop_core::TimeDelta;
use simloop_sched::{HandoffQueue, Scheduler};

#[derive(Parser)]
#[command(name = "queue_demo", about = "Producer/consumer over a handoff queue")]
struct Cli {
    /// Number of items to produce
    #[arg(long, default_value_t = 9)]
    count: u32,

    #[command(flatten)]
    log: LogArgs,
}

async fn producer(sched: Scheduler, queue: HandoffQueue<Option<u32>>, count: u32) {
    let pause = TimeDelta::hours(1) + TimeDelta::minutes(2);
    for i in 0..count {
        println!("Producing {i} {}", sched.now());
        queue.put(Some(i));
        sched.sleep(pause).await;
    }
    queue.put(None);
}

async fn consumer(sched: Scheduler, queue: HandoffQueue<Option<u32>>) {
    while let Some(item) = queue.get().await {
        println!("Consuming {item} {}", sched.now());
    }
    println!("Consumer done");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.log.init();

    let sched = Scheduler::new();
    let queue = HandoffQueue::new(&sched);
    sched.new_task(producer(sched.clone(), queue.clone(), cli.count));
    sched.new_task(consumer(sched.clone(), queue));
    sched.run()?;

    info!("Finished at {}", sched.now());
    Ok(())
}
