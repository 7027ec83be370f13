use anyhow::{anyhow, Result};
use env_logger::Env;

use idash::argsets::CommonArgs;
use idash::command;
use idash::constants::{defaults, envvars};
use idash::helpers;

const CMD_RUN: &str = "run";
const CMD_ONCE: &str = "once";
const CMD_HISTORY: &str = "history";

fn main() -> Result<()> {
    let dotenv_files = helpers::load_dotenv();
    env_logger::Builder::from_env(
        Env::default().filter_or(envvars::LOGGING_LEVEL, defaults::LOG_LEVEL),
    )
    .init();
    for path in dotenv_files {
        log::info!("Loaded {}", path.display());
    }

    let mut args = pico_args::Arguments::from_env();
    let subcommand = args.subcommand()?;
    let common = CommonArgs::from_args(&mut args)?;

    let unused = args.finish();
    if !unused.is_empty() {
        return Err(anyhow!("Unrecognized arguments: {:?}", unused));
    }

    match subcommand.as_deref() {
        Some(CMD_RUN) => command::run(common),
        Some(CMD_ONCE) => command::once(common),
        Some(CMD_HISTORY) => command::history(common),
        _ => Err(anyhow!(
            "Subcommand must be one of 'run', 'once', 'history'"
        )),
    }
}
