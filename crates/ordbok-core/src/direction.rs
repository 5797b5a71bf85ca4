use std::fmt;
use std::str::FromStr;

use crate::error::DictError;

/// A source/target language pairing plus the orientation the dictionary is
/// being queried under. Identifiers look like `"me-sv-lr"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Direction {
    pub source: String,
    pub target: String,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Lr,
    Rl,
}

impl Direction {
    /// Language the headword side is written in under this orientation.
    pub fn source_lang(&self) -> &str {
        match self.orientation {
            Orientation::Lr => &self.source,
            Orientation::Rl => &self.target,
        }
    }

    /// Language the translation side is written in under this orientation.
    pub fn target_lang(&self) -> &str {
        match self.orientation {
            Orientation::Lr => &self.target,
            Orientation::Rl => &self.source,
        }
    }
}

impl FromStr for Direction {
    type Err = DictError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = id.split('-').collect();
        let [source, target, orientation] = parts.as_slice() else {
            return Err(DictError::InvalidDirection(id.to_string()));
        };
        if source.is_empty() || target.is_empty() {
            return Err(DictError::InvalidDirection(id.to_string()));
        }
        // Anything but "lr" reads as reversed, matching observed behavior
        let orientation = if *orientation == "lr" {
            Orientation::Lr
        } else {
            Orientation::Rl
        };
        Ok(Direction {
            source: source.to_string(),
            target: target.to_string(),
            orientation,
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let orientation = match self.orientation {
            Orientation::Lr => "lr",
            Orientation::Rl => "rl",
        };
        write!(f, "{}-{}-{}", self.source, self.target, orientation)
    }
}
