//! Property groups, board edges and group ownership classes.
//!
//! Group membership and edge layout are fixed properties of the board, not
//! configuration: the configuration file only says which group a street
//! belongs to, and the loader checks that against these tables.

use serde::{Deserialize, Serialize};

/// Fixed partition of the 40 board indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyGroup {
    /// Mediterranean and Baltic.
    Brown,
    /// Oriental, Vermont, Connecticut.
    LightBlue,
    /// St. Charles, States, Virginia.
    Pink,
    /// St. James, Tennessee, New York.
    Orange,
    /// Kentucky, Indiana, Illinois.
    Red,
    /// Atlantic, Ventnor, Marvin Gardens.
    Yellow,
    /// Pacific, North Carolina, Pennsylvania.
    Green,
    /// Park Place and Boardwalk.
    DarkBlue,
    /// The four railroads.
    Railroads,
    /// Electric Company and Water Works.
    Utilities,
    /// Cells that cannot be owned (Go, Jail, Chance, taxes, ...).
    Special,
}

impl PropertyGroup {
    /// Groups whose members can form a monopoly.
    pub const MONOPOLY_GROUPS: [PropertyGroup; 8] = [
        PropertyGroup::Brown,
        PropertyGroup::LightBlue,
        PropertyGroup::Pink,
        PropertyGroup::Orange,
        PropertyGroup::Red,
        PropertyGroup::Yellow,
        PropertyGroup::Green,
        PropertyGroup::DarkBlue,
    ];

    /// Board indices belonging to this group, ascending.
    #[must_use]
    pub const fn members(self) -> &'static [usize] {
        match self {
            PropertyGroup::Brown => &[1, 3],
            PropertyGroup::LightBlue => &[6, 8, 9],
            PropertyGroup::Pink => &[11, 13, 14],
            PropertyGroup::Orange => &[16, 18, 19],
            PropertyGroup::Red => &[21, 23, 24],
            PropertyGroup::Yellow => &[26, 27, 29],
            PropertyGroup::Green => &[31, 32, 34],
            PropertyGroup::DarkBlue => &[37, 39],
            PropertyGroup::Railroads => &[5, 15, 25, 35],
            PropertyGroup::Utilities => &[12, 28],
            PropertyGroup::Special => &[0, 2, 4, 7, 10, 17, 20, 22, 30, 33, 36, 38],
        }
    }

    /// Whether this is one of the eight colour groups.
    #[must_use]
    pub fn is_street_group(self) -> bool {
        Self::MONOPOLY_GROUPS.contains(&self)
    }

    /// Parse the group name used in board configuration files.
    #[must_use]
    pub fn from_config_name(name: &str) -> Option<Self> {
        let group = match name.trim().to_ascii_lowercase().as_str() {
            "brown" | "purple" => PropertyGroup::Brown,
            "light_blue" | "lightblue" => PropertyGroup::LightBlue,
            "pink" | "magenta" => PropertyGroup::Pink,
            "orange" => PropertyGroup::Orange,
            "red" => PropertyGroup::Red,
            "yellow" => PropertyGroup::Yellow,
            "green" => PropertyGroup::Green,
            "dark_blue" | "darkblue" | "blue" => PropertyGroup::DarkBlue,
            "railroads" => PropertyGroup::Railroads,
            "utilities" => PropertyGroup::Utilities,
            "special" => PropertyGroup::Special,
            _ => return None,
        };
        Some(group)
    }
}

impl std::fmt::Display for PropertyGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PropertyGroup::Brown => "Brown",
            PropertyGroup::LightBlue => "Light Blue",
            PropertyGroup::Pink => "Pink",
            PropertyGroup::Orange => "Orange",
            PropertyGroup::Red => "Red",
            PropertyGroup::Yellow => "Yellow",
            PropertyGroup::Green => "Green",
            PropertyGroup::DarkBlue => "Dark Blue",
            PropertyGroup::Railroads => "Railroads",
            PropertyGroup::Utilities => "Utilities",
            PropertyGroup::Special => "Special",
        };
        f.write_str(name)
    }
}

/// One of the four sides of the board.
///
/// Edge views list only the streets on that side. Strategies use them to
/// look up rent-exposure tables keyed by which of those streets opponents
/// hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// From Go to the jail cell: indices 1–9.
    South,
    /// Jail to Free Parking: indices 11–19.
    West,
    /// Free Parking to Go to Jail: indices 21–29.
    North,
    /// From the Go To Jail corner back to Go: indices 31–39.
    East,
}

impl Edge {
    /// All four edges in board order.
    pub const ALL: [Edge; 4] = [Edge::South, Edge::West, Edge::North, Edge::East];

    /// Street indices on this edge, in board order.
    #[must_use]
    pub const fn indices(self) -> &'static [usize] {
        match self {
            Edge::South => &[1, 3, 6, 8, 9],
            Edge::West => &[11, 13, 14, 16, 18, 19],
            Edge::North => &[21, 23, 24, 26, 27, 29],
            Edge::East => &[31, 32, 34, 37, 39],
        }
    }

    /// The two anchor indices of the edge: the first street of each of its
    /// two colour groups.
    #[must_use]
    pub const fn anchors(self) -> [usize; 2] {
        match self {
            Edge::South => [1, 6],
            Edge::West => [11, 16],
            Edge::North => [21, 26],
            Edge::East => [31, 37],
        }
    }
}

/// Who holds the rest of a location's group, from one player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupOwners {
    /// No other member to consider.
    None,
    /// No opponent holds another member.
    SelfOwned,
    /// Exactly one other member is held by an opponent.
    OneOpponent,
    /// Two or more other members are held by opponents.
    TwoOpponents,
}
