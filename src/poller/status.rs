use std::fmt::Display;

use crate::constants::defaults;

/// Reachability of the remote endpoint as of the most recent fetch attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub reachable: bool,
    pub message: String,
}

impl ConnectionStatus {
    pub fn connecting() -> Self {
        Self {
            reachable: false,
            message: defaults::STATUS_CONNECTING.to_string(),
        }
    }

    pub fn reachable() -> Self {
        Self {
            reachable: true,
            message: defaults::STATUS_OK.to_string(),
        }
    }

    pub fn unreachable(reason: impl Display) -> Self {
        Self {
            reachable: false,
            message: format!("Database ERROR: {reason}"),
        }
    }
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::connecting()
    }
}
