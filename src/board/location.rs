//! Board locations.
//!
//! A `Location` is one of the 40 cells of the board. What it costs and what
//! it charges depends on its `LocationKind`; everything that changes during a
//! game (owner, mortgage, buildings, monopoly flag) lives on the location
//! itself.
//!
//! ## Rent
//!
//! Rent is a pure function of the location and a `RentContext` that carries
//! the facts the location cannot know on its own: how many railroads and
//! utilities its owner holds, the dice total that brought the visitor here,
//! and an extra multiplier (cards such as "pay the owner twice the rental").
//! The context is built per call, so nothing carries over between two rent
//! computations.
//!
//! ## Buildings
//!
//! Only streets take buildings. The counts obey:
//! - `houses` in `0..=4`
//! - `hotels` in `0..=1`
//! - a hotel replaces exactly four houses, and selling it gives them back
//!
//! Each building operation returns a `BoardError` instead of coercing the
//! counts when its precondition does not hold.

use serde::{Deserialize, Serialize};

use super::group::PropertyGroup;
use crate::core::PlayerId;
use crate::error::BoardError;

/// Maximum houses on one street.
pub const MAX_HOUSES: u8 = 4;

/// Rent tier indices into `LocationKind::Street::rents`.
const BASE_TIER: usize = 0;
const HOTEL_TIER: usize = 5;

/// Non-purchasable cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecialKind {
    /// Start cell; passing it pays the salary.
    Go,
    /// Jail, or just visiting.
    Jail,
    /// Free Parking.
    FreeParking,
    /// Sends the player to jail.
    GoToJail,
    /// Draw a Chance card.
    Chance,
    /// Draw a Community Chest card.
    CommunityChest,
    /// Pay a fixed amount to the bank.
    Tax {
        /// Amount due.
        amount: i64,
    },
}

/// What a location is, with its fixed price and rent parameters.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    /// A coloured street.
    Street {
        /// Colour group.
        group: PropertyGroup,
        /// Purchase price.
        cost: i64,
        /// Price of one house (a hotel costs the same).
        house_cost: i64,
        /// Rent tiers: unimproved, 1–4 houses, hotel.
        rents: [i64; 6],
    },
    /// A railroad.
    Railroad {
        /// Purchase price.
        cost: i64,
        /// Rent when the owner holds one railroad.
        rent: i64,
    },
    /// Electric Company or Water Works.
    Utility {
        /// Purchase price.
        cost: i64,
        /// Dice multiplier when the owner holds one utility.
        one_utility: i64,
        /// Dice multiplier when the owner holds both.
        two_utilities: i64,
    },
    /// A cell nobody can own.
    Special(SpecialKind),
}

/// Facts about the owner and the visit that rent depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentContext {
    /// Railroads held by the location's owner.
    pub owner_railroads: usize,
    /// Utilities held by the location's owner.
    pub owner_utilities: usize,
    /// Dice total of the roll that landed the visitor here.
    pub dice_roll: i64,
    /// Extra factor applied to the computed rent.
    pub multiplier: i64,
}

impl Default for RentContext {
    fn default() -> Self {
        Self {
            owner_railroads: 0,
            owner_utilities: 0,
            dice_roll: 0,
            multiplier: 1,
        }
    }
}

impl RentContext {
    /// Context for a visit with the given dice total.
    #[must_use]
    pub fn with_dice(dice_roll: i64) -> Self {
        Self {
            dice_roll,
            ..Self::default()
        }
    }

    /// Set the owner's holdings (builder pattern).
    #[must_use]
    pub fn with_holdings(mut self, railroads: usize, utilities: usize) -> Self {
        self.owner_railroads = railroads;
        self.owner_utilities = utilities;
        self
    }

    /// Set the extra rent multiplier (builder pattern).
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: i64) -> Self {
        self.multiplier = multiplier;
        self
    }
}

/// One cell of the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    key: String,
    index: usize,
    name: String,
    kind: LocationKind,
    owner: Option<PlayerId>,
    mortgaged: bool,
    houses: u8,
    hotels: u8,
    part_of_monopoly: bool,
}

impl Location {
    /// Create an unowned location.
    pub fn new(key: impl Into<String>, index: usize, name: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            key: key.into(),
            index,
            name: name.into(),
            kind,
            owner: None,
            mortgaged: false,
            houses: 0,
            hotels: 0,
            part_of_monopoly: false,
        }
    }

    // === Identity ===

    /// Stable configuration key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Board index (0–39).
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind and price parameters.
    #[must_use]
    pub fn kind(&self) -> &LocationKind {
        &self.kind
    }

    /// Property group.
    #[must_use]
    pub fn group(&self) -> PropertyGroup {
        match self.kind {
            LocationKind::Street { group, .. } => group,
            LocationKind::Railroad { .. } => PropertyGroup::Railroads,
            LocationKind::Utility { .. } => PropertyGroup::Utilities,
            LocationKind::Special(_) => PropertyGroup::Special,
        }
    }

    /// Whether players can buy this location.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        !matches!(self.kind, LocationKind::Special(_))
    }

    /// Whether this location takes houses and hotels.
    #[must_use]
    pub fn is_street(&self) -> bool {
        matches!(self.kind, LocationKind::Street { .. })
    }

    // === Prices ===

    /// Purchase price (0 for special cells).
    #[must_use]
    pub fn cost(&self) -> i64 {
        match self.kind {
            LocationKind::Street { cost, .. }
            | LocationKind::Railroad { cost, .. }
            | LocationKind::Utility { cost, .. } => cost,
            LocationKind::Special(_) => 0,
        }
    }

    /// Price of one house (0 unless a street).
    #[must_use]
    pub fn house_cost(&self) -> i64 {
        match self.kind {
            LocationKind::Street { house_cost, .. } => house_cost,
            _ => 0,
        }
    }

    /// Price of a hotel (0 unless a street).
    #[must_use]
    pub fn hotel_cost(&self) -> i64 {
        self.house_cost()
    }

    /// Cash the bank lends against this location.
    #[must_use]
    pub fn mortgage_value(&self) -> i64 {
        self.cost() / 2
    }

    // === Ownership ===

    /// Current owner, if any.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Whether `player` owns this location.
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Whether someone other than `player` owns this location.
    #[must_use]
    pub fn is_owned_by_opponent_of(&self, player: PlayerId) -> bool {
        matches!(self.owner, Some(owner) if owner != player)
    }

    /// Change the owner.
    ///
    /// Monopoly flags are not updated; call
    /// `LocationRegistry::compute_monopolies` afterwards.
    pub fn set_owner(&mut self, owner: Option<PlayerId>) {
        self.owner = owner;
    }

    /// Whether all of this location's group shares its owner, as of the last
    /// `LocationRegistry::compute_monopolies`.
    #[must_use]
    pub fn is_part_of_monopoly(&self) -> bool {
        self.part_of_monopoly
    }

    pub(crate) fn set_part_of_monopoly(&mut self, value: bool) {
        self.part_of_monopoly = value;
    }

    // === Mortgage ===

    /// Whether the location is mortgaged.
    #[must_use]
    pub fn is_mortgaged(&self) -> bool {
        self.mortgaged
    }

    /// Set or lift the mortgage. Independent of the building count.
    pub fn set_mortgaged(&mut self, mortgaged: bool) {
        self.mortgaged = mortgaged;
    }

    /// Shorthand for `set_mortgaged(true)`.
    pub fn mortgage(&mut self) {
        self.set_mortgaged(true);
    }

    // === Buildings ===

    /// Houses on the location.
    #[must_use]
    pub fn houses(&self) -> u8 {
        self.houses
    }

    /// Hotels on the location.
    #[must_use]
    pub fn hotels(&self) -> u8 {
        self.hotels
    }

    /// Whether the location carries any building.
    #[must_use]
    pub fn has_buildings(&self) -> bool {
        self.houses > 0 || self.hotels > 0
    }

    /// Value of the buildings at purchase price.
    #[must_use]
    pub fn building_value(&self) -> i64 {
        i64::from(self.houses) * self.house_cost() + i64::from(self.hotels) * self.hotel_cost()
    }

    fn require_street(&self) -> Result<(), BoardError> {
        if self.is_street() {
            Ok(())
        } else {
            Err(BoardError::NotBuildable { index: self.index })
        }
    }

    /// Add one house.
    ///
    /// Requires fewer than four houses and no hotel.
    pub fn add_house(&mut self) -> Result<(), BoardError> {
        self.require_street()?;
        if self.hotels > 0 {
            return Err(BoardError::HotelAlreadyBuilt { index: self.index });
        }
        if self.houses >= MAX_HOUSES {
            return Err(BoardError::HouseLimit { index: self.index });
        }
        self.houses += 1;
        Ok(())
    }

    /// Remove one house. Requires at least one house.
    pub fn sell_house(&mut self) -> Result<(), BoardError> {
        self.require_street()?;
        if self.houses == 0 {
            return Err(BoardError::NoHouses { index: self.index });
        }
        self.houses -= 1;
        Ok(())
    }

    /// Trade four houses for a hotel.
    ///
    /// Requires exactly four houses and no hotel.
    pub fn add_hotel(&mut self) -> Result<(), BoardError> {
        self.require_street()?;
        if self.hotels > 0 {
            return Err(BoardError::HotelAlreadyBuilt { index: self.index });
        }
        if self.houses != MAX_HOUSES {
            return Err(BoardError::HotelRequiresFourHouses {
                index: self.index,
                houses: self.houses,
            });
        }
        self.houses = 0;
        self.hotels = 1;
        Ok(())
    }

    /// Trade the hotel back for four houses. Requires a hotel.
    pub fn sell_hotel(&mut self) -> Result<(), BoardError> {
        self.require_street()?;
        if self.hotels != 1 {
            return Err(BoardError::NoHotel { index: self.index });
        }
        self.hotels = 0;
        self.houses = MAX_HOUSES;
        Ok(())
    }

    // === Rent ===

    /// Rent a visitor owes the owner.
    ///
    /// Zero when the location is unowned, mortgaged or special.
    ///
    /// ```
    /// use monopoly_engine::board::{Location, LocationKind, RentContext};
    /// use monopoly_engine::core::PlayerId;
    ///
    /// let mut reading = Location::new(
    ///     "reading", 5, "Reading Railroad",
    ///     LocationKind::Railroad { cost: 200, rent: 25 },
    /// );
    /// reading.set_owner(Some(PlayerId::new(0)));
    ///
    /// let context = RentContext::default().with_holdings(3, 0);
    /// assert_eq!(reading.rent(&context), 100);
    /// ```
    #[must_use]
    pub fn rent(&self, context: &RentContext) -> i64 {
        if self.owner.is_none() || self.mortgaged {
            return 0;
        }

        let base = match &self.kind {
            LocationKind::Street { rents, .. } => {
                if self.hotels > 0 {
                    rents[HOTEL_TIER]
                } else if self.houses > 0 {
                    rents[usize::from(self.houses)]
                } else if self.part_of_monopoly {
                    rents[BASE_TIER] * 2
                } else {
                    rents[BASE_TIER]
                }
            }
            LocationKind::Railroad { rent, .. } => {
                let held = context.owner_railroads.clamp(1, 4) as u32;
                rent * 2_i64.pow(held - 1)
            }
            LocationKind::Utility {
                one_utility,
                two_utilities,
                ..
            } => {
                let factor = if context.owner_utilities >= 2 {
                    *two_utilities
                } else {
                    *one_utility
                };
                factor * context.dice_roll
            }
            LocationKind::Special(_) => 0,
        };

        base * context.multiplier
    }

    // === Lifecycle ===

    /// Return to the start-of-game state: unowned, unmortgaged, no buildings.
    pub fn reset(&mut self) {
        self.owner = None;
        self.mortgaged = false;
        self.houses = 0;
        self.hotels = 0;
        self.part_of_monopoly = false;
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Board order. Locations sharing an index fall back to their remaining
/// fields so that ordering agrees with equality.
impl Ord for Location {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index
            .cmp(&other.index)
            .then_with(|| self.key.cmp(&other.key))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.owner.cmp(&other.owner))
            .then_with(|| self.mortgaged.cmp(&other.mortgaged))
            .then_with(|| self.houses.cmp(&other.houses))
            .then_with(|| self.hotels.cmp(&other.hotels))
            .then_with(|| self.part_of_monopoly.cmp(&other.part_of_monopoly))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.mortgaged {
            write!(f, "{} (mortgaged)", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}
