//! The player seen from the turn protocol.
//!
//! Turn states only need a small slice of a player: where they are, whether
//! they are in jail, what the orchestrator should ask next, and the
//! decisions a strategy makes. Everything else (how a strategy decides,
//! how cash moves between players) lives behind this trait.

use super::event::NextAction;
use crate::board::{Location, LocationRegistry};
use crate::core::PlayerId;
use crate::error::BoardError;

/// A participant driven through the turn protocol.
///
/// Implementors supply identity, position, jail flag and counter, the
/// queued action, and four decisions. Statistics derived from the board
/// are provided.
pub trait Player {
    /// The player's identifier.
    fn id(&self) -> PlayerId;

    /// Cash on hand.
    fn cash(&self) -> i64;

    /// The action the orchestrator should request next.
    fn next_action(&self) -> NextAction;

    /// Queue the next action.
    fn set_next_action(&mut self, action: NextAction);

    /// Board index the player occupies.
    fn position(&self) -> usize;

    /// Move the player to a board index.
    fn set_position(&mut self, index: usize);

    /// Whether the player is in jail.
    fn in_jail(&self) -> bool;

    /// Flag the player as jailed. Position is set by the caller.
    fn go_to_jail(&mut self);

    /// Clear the jail flag.
    fn leave_jail(&mut self);

    /// Consecutive failed doubles rolls while jailed.
    fn jail_turns(&self) -> u8;

    /// Record the failed doubles count. Reset to 0 on entering or leaving
    /// jail.
    fn set_jail_turns(&mut self, turns: u8);

    // === Decisions ===

    /// Whether to pay bail rather than wait out the turn.
    fn should_pay_bail(&self, board: &LocationRegistry) -> bool;

    /// Whether to buy an unowned location the player landed on.
    fn wants_to_buy(&self, location: &Location, board: &LocationRegistry) -> bool;

    /// Build houses and hotels. Every build goes through the registry's
    /// gated operations, so an illegal request surfaces as an error.
    fn make_build_decision(&mut self, board: &mut LocationRegistry) -> Result<(), BoardError>;

    /// Lift mortgages the player chooses to pay off.
    fn pay_off_mortgages(&mut self, board: &mut LocationRegistry) -> Result<(), BoardError>;

    // === Board-derived statistics ===

    /// Railroads owned.
    fn num_railroads(&self, board: &LocationRegistry) -> usize {
        board.count_railroads(self.id())
    }

    /// Utilities owned.
    fn num_utilities(&self, board: &LocationRegistry) -> usize {
        board.count_utilities(self.id())
    }

    /// Purchasable locations owned.
    fn num_properties(&self, board: &LocationRegistry) -> usize {
        board.count_properties(self.id())
    }

    /// Colour groups held outright.
    fn num_monopolies(&self, board: &LocationRegistry) -> usize {
        board.count_monopolies(self.id())
    }

    /// Cash plus the value of every owned location and building.
    fn total_worth(&self, board: &LocationRegistry) -> i64 {
        self.cash() + board.property_worth(self.id())
    }
}
