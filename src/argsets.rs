use std::path::PathBuf;

use anyhow::Result;
use pico_args::Arguments;

use crate::settings::SettingsOverrides;

/// Flags shared by every subcommand
#[derive(Debug, Default)]
pub struct CommonArgs {
    pub config: Option<PathBuf>,
    pub overrides: SettingsOverrides,
}

impl CommonArgs {
    pub fn from_args(args: &mut Arguments) -> Result<Self> {
        Ok(Self {
            config: args.opt_value_from_str("--config")?,
            overrides: SettingsOverrides {
                base_url: args.opt_value_from_str("--base-url")?,
                path: args.opt_value_from_str("--path")?,
                interval_ms: args.opt_value_from_str("--interval")?,
                window_len: args.opt_value_from_str("--window")?,
                token: args.opt_value_from_str("--token")?,
                on_error: args.opt_value_from_str("--on-error")?,
                history: args.contains("--history").then_some(true),
            },
        })
    }
}
