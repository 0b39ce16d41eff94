//! # monopoly-engine
//!
//! Board rules and turn protocol for evolving Monopoly strategies.
//!
//! A genetic-algorithm driver plays many games in parallel, each on its own
//! board, and scores the players afterwards. This crate supplies the parts
//! that must be right for those scores to mean anything: the board and its
//! rent and building rules, and the per-player turn state machine.
//!
//! ## Design Principles
//!
//! 1. **One board per game**: `BoardDirectory` hands out an isolated
//!    `LocationRegistry` per `GameId`, safe to use from many threads.
//!
//! 2. **Rules return values**: Rent is a pure function of the location and
//!    a `RentContext`; illegal builds and unexpected events are typed errors.
//!
//! 3. **Effects, not side channels**: A turn transition returns the money
//!    movements it implies as `TurnEffect`s and leaves applying them to the
//!    caller, which owns every player.
//!
//! ## Modules
//!
//! - `core`: Player and game identifiers, board configuration
//! - `board`: Locations, groups, the per-game registry and the directory
//! - `turn`: Events, the `Player` trait, turn states and the turn machine
//! - `fitness`: Per-game scoring and running fitness totals
//! - `error`: Error types

pub mod core;
pub mod board;
pub mod turn;
pub mod fitness;
pub mod error;

// Re-export commonly used types
pub use crate::core::{BoardConfig, GameId, LoadMode, PlayerId, PlayerMap};

pub use crate::board::{
    BoardDirectory, BoardHandle, Edge, GroupOwners, Location, LocationKind, LocationRegistry,
    PropertyGroup, RentContext, SpecialKind,
};

pub use crate::turn::{DiceRoll, NextAction, Player, TurnEffect, TurnEvent, TurnMachine, TurnState};

pub use crate::fitness::{FitnessEvaluator, FitnessLedger, NetWorth, NumMonopolies, NumProperties};

pub use crate::error::{BoardError, ConfigError, TurnError};
