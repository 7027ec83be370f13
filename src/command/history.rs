use anyhow::{anyhow, Result};

use crate::argsets::CommonArgs;
use crate::interfaces::TerminalSurface;
use crate::poller::Poller;

/// Load the history endpoint into both charts and print them
pub fn history(args: CommonArgs) -> Result<()> {
    let settings = super::load_settings(args)?;
    let mut poller = Poller::from_settings(&settings, TerminalSurface::stdout())?;
    poller.seed_history();

    let status = poller.status();
    if !status.reachable {
        return Err(anyhow!("{}", status.message));
    }
    log::info!(
        "History holds {} temperature and {} soil points",
        poller.temperature_window().len(),
        poller.soil_window().len()
    );
    Ok(())
}
