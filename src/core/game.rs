//! Game identification.
//!
//! Every simulated game has a `GameId`. The id is the isolation unit: each
//! game gets its own `LocationRegistry`, looked up through the
//! `BoardDirectory` by this key. Evaluating a population of strategies runs
//! many games at once, so ids are usually derived from generation, match and
//! game numbers.
//!
//! ```
//! use monopoly_engine::core::GameId;
//!
//! let id = GameId::new("gen3-match12-game0");
//! assert_eq!(id.as_str(), "gen3-match12-game0");
//! assert_eq!(GameId::from("a"), GameId::new("a"));
//! ```

use serde::{Deserialize, Serialize};

/// Key that isolates one simulated game from all others.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(String);

impl GameId {
    /// Create a game ID from any string-like key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GameId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for GameId {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({})", self.0)
    }
}
