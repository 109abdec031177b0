//! Command-line plumbing shared by the demo binaries.

use clap::Args;
use env_logger::{Builder, Env};

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Show debug messages
    #[arg(short, long)]
    pub verbose: bool,
}

impl LogArgs {
    /// Install the global logger.  `RUST_LOG` still wins when set.
    pub fn init(&self) {
        let level = if self.verbose { "debug" } else { "info" };
        Builder::from_env(Env::default().default_filter_or(level)).init();
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::LogArgs;

    #[derive(Parser)]
    struct Demo {
        #[command(flatten)]
        log: LogArgs,
    }

    #[test]
    fn verbose_flag_short_and_long() {
        assert!(!Demo::parse_from(["demo"]).log.verbose);
        assert!(Demo::parse_from(["demo", "-v"]).log.verbose);
        assert!(Demo::parse_from(["demo", "--verbose"]).log.verbose);
    }
}
