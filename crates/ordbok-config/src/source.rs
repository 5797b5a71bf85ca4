use serde::{Deserialize, Serialize};

fn default_base() -> String {
    "dics".to_string()
}

/// Where dictionary files come from. An `http://` or `https://` base is
/// fetched over the network, anything else is treated as a local directory.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SourceConfig {
    #[serde(default = "default_base")]
    pub base: String,
}

impl SourceConfig {
    pub fn is_remote(&self) -> bool {
        self.base.starts_with("http://") || self.base.starts_with("https://")
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
        }
    }
}
