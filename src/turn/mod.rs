//! The turn protocol.
//!
//! Each player owns a `TurnMachine`. The orchestrator activates a player,
//! then repeatedly reads the player's `NextAction`, sends the matching
//! `TurnEvent`, and applies the returned `TurnEffect`s until the action is
//! `Done`.

pub mod event;
pub mod machine;
pub mod player;
pub mod state;

pub use event::{DiceRoll, NextAction, TurnEffect, TurnEvent};
pub use machine::TurnMachine;
pub use player::Player;
pub use state::{Effects, Transition, TurnState, BAIL, GO_SALARY, JAIL_INDEX, MAX_JAIL_TURNS};
