use anyhow::{anyhow, Result};

use crate::argsets::CommonArgs;
use crate::interfaces::TerminalSurface;
use crate::poller::Poller;

/// Poll a single time and print the resulting frame
///
/// Exits with an error when the endpoint could not be read, so scripts can check it.
pub fn once(args: CommonArgs) -> Result<()> {
    let settings = super::load_settings(args)?;
    let mut poller = Poller::from_settings(&settings, TerminalSurface::stdout())?;
    poller.poll();

    let status = poller.status();
    if status.reachable {
        Ok(())
    } else {
        Err(anyhow!("{}", status.message))
    }
}
