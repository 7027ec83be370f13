mod history;
mod once;
mod run;

pub use history::history;
pub use once::once;
pub use run::run;

use anyhow::Result;

use crate::argsets::CommonArgs;
use crate::settings::Settings;

fn load_settings(args: CommonArgs) -> Result<Settings> {
    let settings = Settings::load(args.config.as_deref(), args.overrides)?;
    log::info!(
        "Endpoint: {} path '{}' (token: {}); interval {} ms; window {} points; on error: {:?}",
        settings.base_url,
        settings.path,
        if settings.token.is_some() { "set" } else { "none" },
        settings.interval_ms,
        settings.window_len,
        settings.on_error,
    );
    Ok(settings)
}
