//! Error types.
//!
//! Every rule the engine enforces has a typed failure. Building-count and
//! transition errors are programming errors in the caller (a strategy asked
//! for something illegal, or the orchestrator fed the wrong event), but they
//! are still returned as values so a batch run can abort one game and keep
//! going.

use derive_more::{Display, Error, From};

use crate::board::PropertyGroup;
use crate::core::{GameId, PlayerId};
use crate::turn::{TurnEvent, TurnState};

/// Violation of a board rule.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// A fifth house was requested.
    #[display("Location {index} already has 4 houses")]
    HouseLimit {
        /// Board index of the location.
        index: usize,
    },

    /// A house was sold from a location without houses.
    #[display("Location {index} has no houses to sell")]
    NoHouses {
        /// Board index of the location.
        index: usize,
    },

    /// A hotel was requested on a location without exactly 4 houses.
    #[display("Location {index} needs 4 houses for a hotel, has {houses}")]
    HotelRequiresFourHouses {
        /// Board index of the location.
        index: usize,
        /// Current house count.
        houses: u8,
    },

    /// A second hotel, or a house on top of a hotel, was requested.
    #[display("Location {index} already has a hotel")]
    HotelAlreadyBuilt {
        /// Board index of the location.
        index: usize,
    },

    /// A hotel was sold from a location without one.
    #[display("Location {index} has no hotel to sell")]
    NoHotel {
        /// Board index of the location.
        index: usize,
    },

    /// Buildings were requested on a railroad, utility or special cell.
    #[display("Location {index} does not accept buildings")]
    NotBuildable {
        /// Board index of the location.
        index: usize,
    },

    /// Buildings were requested while a member of the group is mortgaged.
    #[display("Group {group} has a mortgaged location")]
    GroupMortgaged {
        /// The blocked group.
        group: PropertyGroup,
    },

    /// A location was mortgaged twice.
    #[display("Location {index} is already mortgaged")]
    AlreadyMortgaged {
        /// Board index of the location.
        index: usize,
    },

    /// A mortgage was lifted from a location without one.
    #[display("Location {index} is not mortgaged")]
    NotMortgaged {
        /// Board index of the location.
        index: usize,
    },

    /// The game identifier has no registry.
    #[display("No board registered for {game_id}")]
    UnknownGame {
        /// The missing key.
        game_id: GameId,
    },
}

/// Failure while processing a turn event.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error, From)]
pub enum TurnError {
    /// The current state does not handle the event.
    #[display("Unexpected event {event} in state {state}")]
    InvalidTransition {
        /// State that received the event.
        state: TurnState,
        /// The unhandled event.
        event: TurnEvent,
    },

    /// The event was dispatched with a player the machine does not belong to.
    #[display("Turn machine of {expected} received {actual}")]
    WrongPlayer {
        /// Owner of the machine.
        expected: PlayerId,
        /// Player passed with the event.
        actual: PlayerId,
    },

    /// A board rule rejected a side effect of the transition.
    #[display("{_0}")]
    #[from]
    Board(#[error(source)] BoardError),
}

/// Failure while building a board from configuration.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    /// A required key is absent.
    #[display("Missing configuration key {key}")]
    MissingKey {
        /// The absent key.
        key: String,
    },

    /// A numeric field did not parse.
    #[display("Invalid number {value:?} for key {key}")]
    InvalidNumber {
        /// The offending key.
        key: String,
        /// The raw value.
        value: String,
    },

    /// A location declared an unknown type.
    #[display("Unknown location type {value:?} for {key}")]
    UnknownType {
        /// The location key.
        key: String,
        /// The raw type value.
        value: String,
    },

    /// A street declared an unknown group.
    #[display("Unknown property group {value:?} for {key}")]
    UnknownGroup {
        /// The location key.
        key: String,
        /// The raw group value.
        value: String,
    },

    /// A location sits at an index its group does not cover.
    #[display("{key} at index {index} is not a member of group {group}")]
    GroupMismatch {
        /// The location key.
        key: String,
        /// The configured index.
        index: usize,
        /// The group the location declared or implied.
        group: PropertyGroup,
    },

    /// A location index falls outside the board.
    #[display("Index {index} of {key} is outside the board")]
    IndexOutOfRange {
        /// The location key.
        key: String,
        /// The configured index.
        index: i64,
    },

    /// Two locations claim the same index.
    #[display("Index {index} is claimed by both {first} and {second}")]
    DuplicateIndex {
        /// The contested index.
        index: usize,
        /// Key of the first claimant.
        first: String,
        /// Key of the second claimant.
        second: String,
    },

    /// No location was configured for a board slot.
    #[display("No location configured for index {index}")]
    MissingLocation {
        /// The empty slot.
        index: usize,
    },
}
