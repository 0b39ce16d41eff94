//! Per-player turn machine.

use super::event::TurnEvent;
use super::player::Player;
use super::state::{Effects, TurnState};
use crate::board::LocationRegistry;
use crate::core::PlayerId;
use crate::error::TurnError;

/// Holds one player's current turn state.
///
/// The state is replaced wholesale on every successful transition and left
/// as it was when a transition fails.
///
/// ## Example
///
/// ```
/// use monopoly_engine::turn::{TurnMachine, TurnState};
/// use monopoly_engine::core::PlayerId;
///
/// let machine = TurnMachine::new(PlayerId::new(2));
/// assert_eq!(machine.state(), TurnState::Inactive);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnMachine {
    player: PlayerId,
    state: TurnState,
}

impl TurnMachine {
    /// Create a machine for `player`, starting `Inactive`.
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            state: TurnState::Inactive,
        }
    }

    /// The owning player.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Feed an event to the current state, install the next state, and
    /// enter it.
    pub fn dispatch<P: Player + ?Sized>(
        &mut self,
        event: TurnEvent,
        player: &mut P,
        board: &mut LocationRegistry,
    ) -> Result<Effects, TurnError> {
        if player.id() != self.player {
            return Err(TurnError::WrongPlayer {
                expected: self.player,
                actual: player.id(),
            });
        }

        let transition = self.state.process_event(&event, player, board)?;
        self.state = transition.state;
        self.state.enter(self.player);
        Ok(transition.effects)
    }

    /// Force the machine back to `Inactive`, e.g. when a game is abandoned.
    pub fn reset(&mut self) {
        self.state = TurnState::Inactive;
    }
}
