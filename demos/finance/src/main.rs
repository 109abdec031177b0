//! finance — daily bank bookkeeping over a few decades of simulated time.
//!
//! One task ticks every bank over at each midnight; another opens the
//! accounts on 2022-06-01.  The daily task never ends on its own, so the run
//! is bounded with `run_until`.

mod bank;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};

use demo_cli::LogArgs;
use simloop_sched::Scheduler;

use bank::{Bank, Cents};

type Banks = Rc<RefCell<Vec<Bank>>>;

#[derive(Parser)]
#[command(name = "finance", about = "Simulates finances")]
struct Cli {
    /// Stop the simulation at this date
    #[arg(long, default_value = "2050-01-01")]
    until: String,

    #[command(flatten)]
    log: LogArgs,
}

async fn handle_banks(sched: Scheduler, banks: Banks) -> Result<()> {
    loop {
        let tomorrow = sched
            .now()
            .date()
            .succ_opt()
            .context("calendar ran out of days")?;
        sched.sleep_until(tomorrow).await?;
        debug!("{tomorrow}");

        let now = sched.now();
        for bank in banks.borrow_mut().iter_mut() {
            bank.handle_new_day(now);
        }
    }
}

async fn work(sched: Scheduler, banks: Banks) -> Result<()> {
    sched.sleep_until("2022-06-01").await?;
    let now = sched.now();
    let mut banks = banks.borrow_mut();
    let atb = banks.first_mut().context("no bank to open accounts at")?;
    atb.open_account("checking", Cents::dollars(15_000), 0.0, now);
    atb.open_account("rrsp", Cents::dollars(30_000), 0.07, now);
    atb.open_account("savings", Cents::dollars(3_000), 0.01, now);
    Ok(())
}

fn print_statements(banks: &[Bank]) {
    for bank in banks {
        for account in &bank.accounts {
            println!("## Account {}", account.name);
            for t in account.transactions() {
                println!("{} {} {} {}", t.at, t.description, t.amount, t.balance);
            }
            println!();
            info!("{} {} closes at {}", bank.name, account.name, account.balance());
        }
    }
}

fn simulate(cli: &Cli) -> Result<()> {
    let sched = Scheduler::new();
    let banks: Banks = Rc::new(RefCell::new(vec![Bank::new("ATB")]));

    sched.new_task(handle_banks(sched.clone(), Rc::clone(&banks)));
    sched.new_task(work(sched.clone(), Rc::clone(&banks)));
    debug!("Running");
    sched.run_until(&cli.until)?;

    print_statements(&banks.borrow());

    // The daily task never finishes; release it and its handles.
    sched.shutdown()?;
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
