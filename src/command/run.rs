use anyhow::Result;

use crate::argsets::CommonArgs;
use crate::interfaces::TerminalSurface;
use crate::poller::Poller;

pub fn run(args: CommonArgs) -> Result<()> {
    let settings = super::load_settings(args)?;
    let mut poller = Poller::from_settings(&settings, TerminalSurface::stdout())?;

    if settings.history {
        poller.seed_history();
    }

    poller.start(settings.interval())?.wait()
}
