use std::env;

use serde::{Deserialize, Serialize};

use self::lookup::LookupConfig;
use self::source::SourceConfig;

pub mod lookup;
pub mod source;

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub lookup: LookupConfig,
    pub source: SourceConfig,

    /// Direction loaded at startup, `"<src>-<trg>-<lr|rl>"`
    pub direction: String,
    /// Start in detailed mode (annotated segments) instead of plain glosses
    pub detailed: bool,
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();

        if let Some(quiet_ms) = env::var("ORDBOK_QUIET_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.lookup.quiet_period_ms = quiet_ms;
        }

        if let Ok(base) = env::var("ORDBOK_DICT_BASE") {
            config.source.base = base;
        }

        if let Ok(direction) = env::var("ORDBOK_DIRECTION") {
            config.direction = direction;
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lookup: LookupConfig::default(),
            source: SourceConfig::default(),
            direction: default_direction(),
            detailed: true,
        }
    }
}

fn default_direction() -> String {
    "me-sv-lr".to_string()
}
