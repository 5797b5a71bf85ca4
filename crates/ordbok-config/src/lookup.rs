use serde::{Deserialize, Serialize};

fn default_quiet_period_ms() -> u64 {
    500
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LookupConfig {
    /// How long typed input must be stable before a search runs
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: default_quiet_period_ms(),
        }
    }
}
