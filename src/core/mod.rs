//! Core types: players, game identifiers, board configuration.
//!
//! These are shared by the board and the turn protocol and carry no rules of
//! their own.

pub mod player;
pub mod game;
pub mod config;

pub use player::{PlayerId, PlayerMap};
pub use game::GameId;
pub use config::{BoardConfig, ConfigIssue, LoadMode, LoadedBoard};
