//! Interactive weekly-review workflow for Taskwarrior.
//!
//! Runs the fixed step sequence against the local `task` database, prompting
//! the operator through each step and enforcing the one-`+next`-per-leaf
//! project invariant along the way.

use anyhow::Result;
use clap::Parser;

use weekly::io::prompt::LinePrompt;
use weekly::io::store::Taskwarrior;
use weekly::logging;
use weekly::step::{WEEKLY_STEPS, run_steps};

#[derive(Parser)]
#[command(
    name = "weekly",
    version,
    about = "Interactive GTD weekly review for Taskwarrior"
)]
struct Cli {}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let _cli = Cli::parse();
    logging::init();

    let store = Taskwarrior::new();
    let mut prompt = LinePrompt::new()?;
    run_steps(&store, &mut prompt, WEEKLY_STEPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_invocation() {
        Cli::parse_from(["weekly"]);
    }

    #[test]
    fn rejects_unknown_arguments() {
        assert!(Cli::try_parse_from(["weekly", "start"]).is_err());
    }
}
