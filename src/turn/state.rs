//! Turn states and their transitions.
//!
//! A turn walks a fixed path:
//!
//! ```text
//! Inactive ──PlayerActivated──▶ AwaitingRoll ──DiceRolled──▶ BuyDecision ─┐
//!    │                              ▲                 │                  │
//!    └──(in jail)──▶ InJail ──bail──┘                 ▼                  │
//!                       │                       BuildDecision ◀──────────┘
//!                    no bail                     ▲    │
//!                       ▼                        │    ▼
//!               AwaitingJailRoll ──DiceRolled────┘  PayoffMortgage
//!                                                     │
//!                                Inactive ◀── TradeDecision
//! ```
//!
//! A jailed player who does not pay bail rolls for doubles. Doubles free
//! them and they move by that roll, landing as from `AwaitingRoll`. The
//! third miss in a row forces bail and they move by the roll anyway.
//!
//! `process_event` is a pure function of the current state: it mutates the
//! player and board as the rules require and returns the next state plus any
//! effects for the orchestrator. The caller swaps the state in and then calls
//! `enter` on it.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::{debug, instrument};

use super::event::{DiceRoll, NextAction, TurnEffect, TurnEvent};
use super::player::Player;
use crate::board::{LocationKind, LocationRegistry, SpecialKind, BOARD_SIZE};
use crate::core::PlayerId;
use crate::error::TurnError;

/// Salary collected for passing or landing on Go.
pub const GO_SALARY: i64 = 200;

/// Bail paid to leave jail.
pub const BAIL: i64 = 50;

/// Board index of the jail cell.
pub const JAIL_INDEX: usize = 10;

/// Failed doubles rolls after which bail is forced.
pub const MAX_JAIL_TURNS: u8 = 3;

/// Effects produced by one transition. Most transitions produce at most two.
pub type Effects = SmallVec<[TurnEffect; 2]>;

/// Where a player is within their turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum TurnState {
    /// Not the player's turn.
    #[default]
    Inactive,
    /// Turn started while jailed; waiting for the bail decision.
    InJail,
    /// Jailed and declined bail; waiting for the dice.
    AwaitingJailRoll,
    /// Waiting for the dice.
    AwaitingRoll,
    /// Landed on an unowned location; waiting for the buy decision.
    #[display("BuyDecision({index})")]
    BuyDecision {
        /// Board index of the location on offer.
        index: usize,
    },
    /// Waiting for the build decision.
    BuildDecision,
    /// Waiting for the mortgage payoff decision.
    PayoffMortgage,
    /// Waiting for the trade decision.
    TradeDecision,
}

/// Result of a successful transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State to install.
    pub state: TurnState,
    /// Effects for the orchestrator, in order.
    pub effects: Effects,
}

impl Transition {
    fn to(state: TurnState) -> Self {
        Self {
            state,
            effects: SmallVec::new(),
        }
    }

    fn with_effects(state: TurnState, effects: Effects) -> Self {
        Self { state, effects }
    }
}

impl TurnState {
    /// Handle an event.
    ///
    /// Returns `TurnError::InvalidTransition` if this state does not accept
    /// the event, and `TurnError::Board` if a player decision broke a board
    /// rule. In both cases the caller keeps its current state.
    #[instrument(skip_all, fields(player = %player.id(), state = %self, event = %event))]
    pub fn process_event<P: Player + ?Sized>(
        &self,
        event: &TurnEvent,
        player: &mut P,
        board: &mut LocationRegistry,
    ) -> Result<Transition, TurnError> {
        let transition = match (*self, *event) {
            (TurnState::Inactive, TurnEvent::PlayerActivated) => {
                if player.in_jail() {
                    player.set_next_action(NextAction::PayBailDecision);
                    Transition::to(TurnState::InJail)
                } else {
                    player.set_next_action(NextAction::RollDice);
                    Transition::to(TurnState::AwaitingRoll)
                }
            }

            (TurnState::InJail, TurnEvent::BailDecision) => {
                player.set_next_action(NextAction::RollDice);
                if player.should_pay_bail(board) {
                    Self::release(player);
                    Transition::with_effects(
                        TurnState::AwaitingRoll,
                        smallvec![TurnEffect::PayBank { amount: BAIL }],
                    )
                } else {
                    Transition::to(TurnState::AwaitingJailRoll)
                }
            }

            (TurnState::AwaitingJailRoll, TurnEvent::DiceRolled(roll)) => {
                if roll.is_doubles() {
                    Self::release(player);
                    Self::advance(roll, player, board, Effects::new())
                } else {
                    let turns = player.jail_turns().saturating_add(1);
                    if turns >= MAX_JAIL_TURNS {
                        debug!(turns, "bail forced");
                        Self::release(player);
                        let bail = smallvec![TurnEffect::PayBank { amount: BAIL }];
                        Self::advance(roll, player, board, bail)
                    } else {
                        player.set_jail_turns(turns);
                        player.set_next_action(NextAction::MakeBuildDecision);
                        Transition::to(TurnState::BuildDecision)
                    }
                }
            }

            (TurnState::AwaitingRoll, TurnEvent::DiceRolled(roll)) => {
                Self::advance(roll, player, board, Effects::new())
            }

            (TurnState::BuyDecision { index }, TurnEvent::BuyDecision) => {
                let location = board.location_at(index);
                let cost = location.cost();
                let buys = location.owner().is_none()
                    && player.cash() >= cost
                    && player.wants_to_buy(location, board);

                let effect = if buys {
                    board.set_owner(index, Some(player.id()));
                    board.compute_monopolies();
                    debug!(index, cost, "location bought");
                    TurnEffect::PayBank { amount: cost }
                } else {
                    TurnEffect::StartAuction { index }
                };

                player.set_next_action(NextAction::MakeBuildDecision);
                Transition::with_effects(TurnState::BuildDecision, smallvec![effect])
            }

            (TurnState::BuildDecision, TurnEvent::BuildDecision) => {
                player.make_build_decision(board)?;
                player.set_next_action(NextAction::MakeMortgageDecision);
                Transition::to(TurnState::PayoffMortgage)
            }

            (TurnState::PayoffMortgage, TurnEvent::MortgageDecision) => {
                player.pay_off_mortgages(board)?;
                player.set_next_action(NextAction::MakeTradeDecision);
                Transition::to(TurnState::TradeDecision)
            }

            (TurnState::TradeDecision, TurnEvent::TradeDecision) => {
                player.set_next_action(NextAction::Done);
                Transition::to(TurnState::Inactive)
            }

            (state, event) => return Err(TurnError::InvalidTransition { state, event }),
        };

        Ok(transition)
    }

    fn release<P: Player + ?Sized>(player: &mut P) {
        player.leave_jail();
        player.set_jail_turns(0);
    }

    /// Move the player by the roll and resolve the landing, appending to
    /// `effects`.
    fn advance<P: Player + ?Sized>(
        roll: DiceRoll,
        player: &mut P,
        board: &LocationRegistry,
        mut effects: Effects,
    ) -> Transition {

        let travelled = player.position() + roll.total();
        if travelled >= BOARD_SIZE {
            effects.push(TurnEffect::CollectSalary { amount: GO_SALARY });
        }
        let index = travelled % BOARD_SIZE;
        player.set_position(index);

        let location = board.location_at(index);
        debug!(index, location = %location, "landed");

        match location.kind() {
            LocationKind::Special(SpecialKind::GoToJail) => {
                player.set_position(JAIL_INDEX);
                player.go_to_jail();
                player.set_jail_turns(0);
                player.set_next_action(NextAction::Done);
                effects.push(TurnEffect::SentToJail);
                return Transition::with_effects(TurnState::Inactive, effects);
            }
            LocationKind::Special(SpecialKind::Tax { amount }) => {
                effects.push(TurnEffect::PayBank { amount: *amount });
            }
            _ if location.is_purchasable() => match location.owner() {
                None => {
                    player.set_next_action(NextAction::MakeBuyDecision);
                    return Transition::with_effects(TurnState::BuyDecision { index }, effects);
                }
                Some(owner) if owner != player.id() => {
                    let rent = board.rent_at(index, roll.total() as i64);
                    if rent > 0 {
                        effects.push(TurnEffect::PayRent { to: owner, amount: rent });
                    }
                }
                Some(_) => {}
            },
            _ => {}
        }

        player.set_next_action(NextAction::MakeBuildDecision);
        Transition::with_effects(TurnState::BuildDecision, effects)
    }

    /// Run on entry to this state.
    pub fn enter(&self, player: PlayerId) {
        debug!(player = %player, state = %self, "entered state");
    }

    /// Whether the player's turn is over.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        matches!(self, TurnState::Inactive)
    }
}
