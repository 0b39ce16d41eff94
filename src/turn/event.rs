//! Turn events, queued player actions, and transition effects.
//!
//! The orchestrator reads a player's `NextAction` to learn which event to
//! send next, sends it, and applies the `TurnEffect`s the transition
//! returns. Effects that move money between players, or between a player
//! and the bank, are left to the orchestrator because it owns every player;
//! a transition only has the active one.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// A roll of two dice, supplied by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{first}+{second}")]
pub struct DiceRoll {
    /// First die (1–6).
    pub first: u8,
    /// Second die (1–6).
    pub second: u8,
}

impl DiceRoll {
    /// Create a roll.
    ///
    /// # Panics
    ///
    /// Panics if either die is outside `1..=6`.
    #[must_use]
    pub fn new(first: u8, second: u8) -> Self {
        assert!((1..=6).contains(&first), "Die value must be 1-6, got {first}");
        assert!((1..=6).contains(&second), "Die value must be 1-6, got {second}");
        Self { first, second }
    }

    /// Sum of both dice.
    #[must_use]
    pub fn total(self) -> usize {
        usize::from(self.first) + usize::from(self.second)
    }

    /// Whether both dice show the same value.
    #[must_use]
    pub fn is_doubles(self) -> bool {
        self.first == self.second
    }
}

/// Stimulus consumed by a turn state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum TurnEvent {
    /// The player's turn starts.
    PlayerActivated,
    /// The jailed player decides whether to pay bail.
    BailDecision,
    /// The dice were rolled.
    #[display("DiceRolled({_0})")]
    DiceRolled(DiceRoll),
    /// The player decides whether to buy the location they landed on.
    BuyDecision,
    /// The player decides whether to build.
    BuildDecision,
    /// The player decides whether to pay off mortgages.
    MortgageDecision,
    /// The player decides whether to trade.
    TradeDecision,
}

/// What the orchestrator should ask of the player next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum NextAction {
    /// Roll the dice, then send `DiceRolled`.
    RollDice,
    /// Send `BailDecision`.
    PayBailDecision,
    /// Send `BuyDecision`.
    MakeBuyDecision,
    /// Send `BuildDecision`.
    MakeBuildDecision,
    /// Send `MortgageDecision`.
    MakeMortgageDecision,
    /// Send `TradeDecision`.
    MakeTradeDecision,
    /// The turn is over.
    #[default]
    Done,
}

impl NextAction {
    /// The event that answers this action, if any.
    ///
    /// `RollDice` needs dice from the caller and `Done` needs nothing, so
    /// both return `None`.
    #[must_use]
    pub fn event(self) -> Option<TurnEvent> {
        match self {
            NextAction::PayBailDecision => Some(TurnEvent::BailDecision),
            NextAction::MakeBuyDecision => Some(TurnEvent::BuyDecision),
            NextAction::MakeBuildDecision => Some(TurnEvent::BuildDecision),
            NextAction::MakeMortgageDecision => Some(TurnEvent::MortgageDecision),
            NextAction::MakeTradeDecision => Some(TurnEvent::TradeDecision),
            NextAction::RollDice | NextAction::Done => None,
        }
    }
}

/// Consequence of a transition that the orchestrator must apply.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnEffect {
    /// The active player pays the bank (purchase, tax, bail).
    PayBank {
        /// Amount due.
        amount: i64,
    },
    /// The active player pays rent to an owner.
    PayRent {
        /// The owner receiving rent.
        to: PlayerId,
        /// Amount due.
        amount: i64,
    },
    /// The active player collects the Go salary.
    CollectSalary {
        /// Amount collected.
        amount: i64,
    },
    /// The location was declined and goes to auction.
    StartAuction {
        /// Board index of the location.
        index: usize,
    },
    /// The active player was sent to jail.
    SentToJail,
}
