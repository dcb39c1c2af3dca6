use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Unknown-poll tolerance constraints
pub const MIN_MAX_UNKNOWN_POLLS: u32 = 1;
pub const MAX_MAX_UNKNOWN_POLLS: u32 = 100;
pub const DEFAULT_MAX_UNKNOWN_POLLS: u32 = 5;

// Transition duration constraints (provisioning takes minutes, not hours)
pub const MIN_MAX_TRANSITION_SECS: u64 = 60;
pub const MAX_MAX_TRANSITION_SECS: u64 = 7200;
pub const DEFAULT_MAX_TRANSITION_SECS: u64 = 1800;

pub const DEFAULT_TICK_SECS: u64 = 0;

/// Thresholds for the lifecycle state machine and its reconciliation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Consecutive `unknown` engine answers tolerated before degrading the
    /// transitional phase to `error`.
    pub max_unknown_polls: u32,
    /// Maximum seconds a start/stop may stay unresolved before it is forced
    /// to `error` on the next poll.
    pub max_transition_secs: u64,
    /// Background reconciliation interval (0 = reconcile on read only).
    pub tick_secs: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            max_unknown_polls: DEFAULT_MAX_UNKNOWN_POLLS,
            max_transition_secs: DEFAULT_MAX_TRANSITION_SECS,
            tick_secs: DEFAULT_TICK_SECS,
        }
    }
}

impl LifecycleConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_unknown_polls < MIN_MAX_UNKNOWN_POLLS
            || self.max_unknown_polls > MAX_MAX_UNKNOWN_POLLS
        {
            return Err(ConfigError::config(format!(
                "lifecycle.max_unknown_polls must be {}-{}, got {}",
                MIN_MAX_UNKNOWN_POLLS, MAX_MAX_UNKNOWN_POLLS, self.max_unknown_polls
            )));
        }

        if self.max_transition_secs < MIN_MAX_TRANSITION_SECS
            || self.max_transition_secs > MAX_MAX_TRANSITION_SECS
        {
            return Err(ConfigError::config(format!(
                "lifecycle.max_transition_secs must be {}-{}, got {}",
                MIN_MAX_TRANSITION_SECS, MAX_MAX_TRANSITION_SECS, self.max_transition_secs
            )));
        }

        Ok(())
    }
}
