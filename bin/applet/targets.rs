use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::{legal_targets, Setup, Square};
use lib::util::Build;
use tracing::{info, instrument};

/// Lists the squares a piece may move to.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Targets {
    /// The square the piece stands on, e.g. `e2`.
    whence: Square,
}

impl Targets {
    #[instrument(level = "trace", skip(self, setup), err)]
    pub fn execute(self, setup: Setup) -> Result<(), Anyhow> {
        let pos = setup.build().context("invalid setup")?;
        let targets = legal_targets(&pos, self.whence);
        info!(whence = %self.whence, count = targets.len());

        let line: Vec<_> = targets.iter().map(Square::to_string).collect();
        println!("{}", line.join(" "));

        Ok(())
    }
}
