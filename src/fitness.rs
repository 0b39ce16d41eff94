//! Fitness evaluation for strategy populations.
//!
//! After each game an evaluator scores every player from the final board,
//! and a `FitnessLedger` adds that score to the player's running total.
//!
//! ## Example
//!
//! ```
//! use monopoly_engine::board::LocationRegistry;
//! use monopoly_engine::core::PlayerId;
//! use monopoly_engine::fitness::{FitnessLedger, NumProperties};
//! # use monopoly_engine::board::Location;
//! # use monopoly_engine::error::BoardError;
//! # use monopoly_engine::turn::{NextAction, Player};
//! # struct Idle(PlayerId);
//! # impl Player for Idle {
//! #     fn id(&self) -> PlayerId { self.0 }
//! #     fn cash(&self) -> i64 { 0 }
//! #     fn next_action(&self) -> NextAction { NextAction::Done }
//! #     fn set_next_action(&mut self, _: NextAction) {}
//! #     fn position(&self) -> usize { 0 }
//! #     fn set_position(&mut self, _: usize) {}
//! #     fn in_jail(&self) -> bool { false }
//! #     fn go_to_jail(&mut self) {}
//! #     fn leave_jail(&mut self) {}
//! #     fn jail_turns(&self) -> u8 { 0 }
//! #     fn set_jail_turns(&mut self, _: u8) {}
//! #     fn should_pay_bail(&self, _: &LocationRegistry) -> bool { false }
//! #     fn wants_to_buy(&self, _: &Location, _: &LocationRegistry) -> bool { false }
//! #     fn make_build_decision(&mut self, _: &mut LocationRegistry) -> Result<(), BoardError> { Ok(()) }
//! #     fn pay_off_mortgages(&mut self, _: &mut LocationRegistry) -> Result<(), BoardError> { Ok(()) }
//! # }
//!
//! let mut board = LocationRegistry::standard().unwrap();
//! board.set_owner(1, Some(PlayerId::new(0)));
//! board.set_owner(3, Some(PlayerId::new(0)));
//!
//! let players = [Idle(PlayerId::new(0)), Idle(PlayerId::new(1))];
//! let mut ledger = FitnessLedger::new(NumProperties, 2);
//! ledger.record_game(&players, &board);
//! ledger.record_game(&players, &board);
//!
//! assert_eq!(ledger.fitness(PlayerId::new(0)), Some(4));
//! assert_eq!(ledger.fitness(PlayerId::new(1)), Some(0));
//! ```

use tracing::{debug, warn};

use crate::board::LocationRegistry;
use crate::core::{PlayerId, PlayerMap};
use crate::turn::Player;

/// Scores one player at the end of one game.
pub trait FitnessEvaluator {
    /// Short identifier, used to label result directories and logs.
    fn name(&self) -> &'static str;

    /// Score for the game just finished.
    fn game_score(&self, player: &dyn Player, board: &LocationRegistry) -> i64;
}

/// Cash plus property and building value.
#[derive(Clone, Copy, Debug, Default)]
pub struct NetWorth;

impl FitnessEvaluator for NetWorth {
    fn name(&self) -> &'static str {
        "net_worth"
    }

    fn game_score(&self, player: &dyn Player, board: &LocationRegistry) -> i64 {
        player.total_worth(board)
    }
}

/// Number of locations owned.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumProperties;

impl FitnessEvaluator for NumProperties {
    fn name(&self) -> &'static str {
        "num_properties"
    }

    fn game_score(&self, player: &dyn Player, board: &LocationRegistry) -> i64 {
        player.num_properties(board) as i64
    }
}

/// Number of colour groups held outright.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumMonopolies;

impl FitnessEvaluator for NumMonopolies {
    fn name(&self) -> &'static str {
        "num_monopolies"
    }

    fn game_score(&self, player: &dyn Player, board: &LocationRegistry) -> i64 {
        player.num_monopolies(board) as i64
    }
}

/// Running fitness totals for a fixed set of players.
#[derive(Clone, Debug)]
pub struct FitnessLedger<E> {
    evaluator: E,
    totals: PlayerMap<i64>,
}

impl<E: FitnessEvaluator> FitnessLedger<E> {
    /// Create a ledger for `player_count` players, all starting at 0.
    ///
    /// # Panics
    ///
    /// Panics if `player_count` is 0.
    #[must_use]
    pub fn new(evaluator: E, player_count: usize) -> Self {
        Self {
            evaluator,
            totals: PlayerMap::with_value(player_count, 0),
        }
    }

    /// The evaluator in use.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Add one game's score for `player`. Players outside the ledger are
    /// ignored and return `None`.
    pub fn record(&mut self, player: &dyn Player, board: &LocationRegistry) -> Option<i64> {
        let score = self.evaluator.game_score(player, board);
        let total = self.totals.get_mut(player.id())?;
        *total += score;
        debug!(
            evaluator = self.evaluator.name(),
            player = %player.id(),
            score,
            total = *total,
            "fitness recorded"
        );
        Some(*total)
    }

    /// Score every player for the game just finished. Returns the ids of
    /// players the ledger has no slot for; their scores are dropped.
    pub fn record_game<P: Player>(
        &mut self,
        players: &[P],
        board: &LocationRegistry,
    ) -> Vec<PlayerId> {
        let mut skipped = Vec::new();
        for player in players {
            if self.record(player, board).is_none() {
                warn!(
                    evaluator = self.evaluator.name(),
                    player = %player.id(),
                    "player outside the fitness ledger, score dropped"
                );
                skipped.push(player.id());
            }
        }
        skipped
    }

    /// Accumulated fitness of `player`.
    #[must_use]
    pub fn fitness(&self, player: PlayerId) -> Option<i64> {
        self.totals.get(player).copied()
    }

    /// All totals, in player order.
    pub fn totals(&self) -> impl Iterator<Item = (PlayerId, i64)> + '_ {
        self.totals.iter().map(|(id, &total)| (id, total))
    }

    /// Zero every total, e.g. at the start of a generation.
    pub fn reset(&mut self) {
        for (_, total) in self.totals.iter_mut() {
            *total = 0;
        }
    }
}
