//! Registry of live boards, one per game.
//!
//! Evaluating a population of strategies plays many games at once. Each
//! game's board is created on first use under its `GameId` and released
//! explicitly when the game ends. The directory is sharded so that games
//! hashing to different shards never wait on each other, and a shard lock
//! is only held for the map operation itself, never while a game runs.
//!
//! Boards are handed out as `Arc<Mutex<LocationRegistry>>`. A game runs its
//! turns sequentially, so the mutex is uncontended in practice; it exists so
//! that handles can cross threads. Releasing a game removes the directory's
//! handle; holders of other handles keep a valid board until they drop them.

use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rustc_hash::{FxHashMap, FxHasher};
use tracing::{debug, instrument};

use super::registry::LocationRegistry;
use crate::core::config::{BoardConfig, LoadMode};
use crate::core::GameId;
use crate::error::{BoardError, ConfigError};

const SHARD_COUNT: usize = 16;

/// Shared handle to one game's board.
pub type BoardHandle = Arc<Mutex<LocationRegistry>>;

type Shard = RwLock<FxHashMap<GameId, BoardHandle>>;

/// Concurrent map from game identifier to board.
///
/// ## Example
///
/// ```
/// use monopoly_engine::board::BoardDirectory;
/// use monopoly_engine::core::{BoardConfig, GameId, LoadMode};
///
/// let directory = BoardDirectory::new();
/// let game = GameId::new("gen0-game0");
///
/// let board = directory
///     .get_or_create(&game, &BoardConfig::standard(), LoadMode::Strict)
///     .unwrap();
/// assert!(directory.contains(&game));
///
/// drop(board);
/// directory.release(&game).unwrap();
/// assert!(directory.release(&game).is_err());
/// ```
#[derive(Debug)]
pub struct BoardDirectory {
    shards: Vec<Shard>,
}

impl Default for BoardDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| RwLock::new(FxHashMap::default())).collect(),
        }
    }

    fn shard(&self, game_id: &GameId) -> &Shard {
        let mut hasher = FxHasher::default();
        game_id.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % SHARD_COUNT]
    }

    /// Get the board for a game, building it from configuration if absent.
    #[instrument(skip_all, fields(game = %game_id))]
    pub fn get_or_create(
        &self,
        game_id: &GameId,
        config: &BoardConfig,
        mode: LoadMode,
    ) -> Result<BoardHandle, ConfigError> {
        self.get_or_insert_with(game_id, || {
            LocationRegistry::from_config(config, mode).map(|(registry, _)| registry)
        })
    }

    /// Get the board for a game, building it with `init` if absent.
    ///
    /// `init` runs without any lock held. If another thread inserts the same
    /// game first, its board wins and the one built here is dropped, so
    /// every caller sees the same board.
    pub fn get_or_insert_with<E>(
        &self,
        game_id: &GameId,
        init: impl FnOnce() -> Result<LocationRegistry, E>,
    ) -> Result<BoardHandle, E> {
        if let Some(existing) = self.get(game_id) {
            return Ok(existing);
        }

        let registry = init()?;
        let mut shard = self
            .shard(game_id)
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let handle = shard
            .entry(game_id.clone())
            .or_insert_with(|| {
                debug!(game = %game_id, "board created");
                Arc::new(Mutex::new(registry))
            });
        Ok(Arc::clone(handle))
    }

    /// Get the board for a game, if it exists.
    #[must_use]
    pub fn get(&self, game_id: &GameId) -> Option<BoardHandle> {
        self.shard(game_id)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(game_id)
            .cloned()
    }

    /// Whether a board exists for the game.
    #[must_use]
    pub fn contains(&self, game_id: &GameId) -> bool {
        self.shard(game_id)
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(game_id)
    }

    /// Remove a game's board.
    ///
    /// Fails with `BoardError::UnknownGame` if the game has no board.
    #[instrument(skip_all, fields(game = %game_id))]
    pub fn release(&self, game_id: &GameId) -> Result<(), BoardError> {
        let removed = self
            .shard(game_id)
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(game_id);

        match removed {
            Some(_) => {
                debug!("board released");
                Ok(())
            }
            None => Err(BoardError::UnknownGame {
                game_id: game_id.clone(),
            }),
        }
    }

    /// Number of live boards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shards
            .iter()
            .map(|s| s.read().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    /// Whether no boards are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
