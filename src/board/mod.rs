//! Board rule engine.
//!
//! ## Key Types
//!
//! - `Location`: one of the 40 cells, with its kind, owner, mortgage and
//!   buildings
//! - `LocationKind`: street, railroad, utility or special cell, with prices
//! - `PropertyGroup`, `Edge`: the fixed layout of the board
//! - `LocationRegistry`: the board of one game and its group-level rules
//! - `BoardDirectory`: live boards of every running game, by [`GameId`]
//!
//! [`GameId`]: crate::core::GameId

pub mod directory;
pub mod group;
pub mod location;
pub mod registry;

pub use directory::{BoardDirectory, BoardHandle};
pub use group::{Edge, GroupOwners, PropertyGroup};
pub use location::{Location, LocationKind, RentContext, SpecialKind, MAX_HOUSES};
pub use registry::{LocationRegistry, BOARD_SIZE};
