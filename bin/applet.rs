use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;
use lib::chess::Setup;

mod play;
mod targets;

#[derive(From, Subcommand)]
pub enum Applet {
    Play(play::Play),
    Targets(targets::Targets),
}

impl Default for Applet {
    fn default() -> Self {
        play::Play::default().into()
    }
}

impl Applet {
    pub fn execute(self, setup: Setup) -> Result<(), Anyhow> {
        match self {
            Applet::Play(a) => a.execute(setup),
            Applet::Targets(a) => a.execute(setup),
        }
    }
}
