//! The board of one game.
//!
//! `LocationRegistry` owns the 40 locations of a single game instance and
//! answers every group-level question the rules and the strategies ask:
//! monopoly membership, who holds the rest of a group, building totals,
//! edge ownership patterns.
//!
//! ## Mutations
//!
//! Locations can be changed directly through `location_at_mut`, but the
//! registry-level mutators (`add_house`, `mortgage`, ...) are the ones that
//! enforce group rules, such as "no building while any member of the group
//! is mortgaged". Ownership changes do not refresh monopoly flags by
//! themselves; call `compute_monopolies` after a batch of transfers.

use smallvec::SmallVec;

use super::group::{Edge, GroupOwners, PropertyGroup};
use super::location::{Location, RentContext};
use crate::core::config::{BoardConfig, ConfigIssue, LoadMode};
use crate::core::PlayerId;
use crate::error::{BoardError, ConfigError};

/// Number of cells on the board.
pub const BOARD_SIZE: usize = 40;

/// All locations of one game, indexed by board position.
///
/// ## Example
///
/// ```
/// use monopoly_engine::board::LocationRegistry;
/// use monopoly_engine::core::PlayerId;
///
/// let mut board = LocationRegistry::standard().unwrap();
/// let player = PlayerId::new(0);
///
/// for index in [6, 8, 9] {
///     board.set_owner(index, Some(player));
/// }
/// board.compute_monopolies();
///
/// assert!(board.location_at(8).is_part_of_monopoly());
/// assert_eq!(board.count_monopolies(player), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationRegistry {
    locations: Vec<Location>,
}

impl LocationRegistry {
    /// Build a registry from configuration.
    ///
    /// Returns the numeric fields that defaulted to 0 in lenient mode.
    pub fn from_config(
        config: &BoardConfig,
        mode: LoadMode,
    ) -> Result<(Self, Vec<ConfigIssue>), ConfigError> {
        let loaded = config.load(mode)?;
        Ok((
            Self {
                locations: loaded.locations,
            },
            loaded.issues,
        ))
    }

    /// Build a registry for the bundled US board.
    pub fn standard() -> Result<Self, ConfigError> {
        let (registry, _) = Self::from_config(&BoardConfig::standard(), LoadMode::Strict)?;
        Ok(registry)
    }

    // === Lookup ===

    /// Location at a board index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..40`.
    #[must_use]
    pub fn location_at(&self, index: usize) -> &Location {
        &self.locations[index]
    }

    /// Mutable location at a board index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not in `0..40`.
    pub fn location_at_mut(&mut self, index: usize) -> &mut Location {
        &mut self.locations[index]
    }

    /// Location at a board index, or `None` off the board.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Location> {
        self.locations.get(index)
    }

    /// All locations in index order.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Streets on one edge of the board, in board order.
    #[must_use]
    pub fn locations_on_edge(&self, edge: Edge) -> SmallVec<[&Location; 6]> {
        edge.indices().iter().map(|&i| &self.locations[i]).collect()
    }

    /// Members of a group, in board order.
    pub fn group_members(&self, group: PropertyGroup) -> impl Iterator<Item = &Location> {
        group.members().iter().map(move |&i| &self.locations[i])
    }

    /// Locations owned by a player, in board order.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(move |l| l.is_owned_by(player))
    }

    // === Monopolies ===

    /// Recompute `part_of_monopoly` on every location.
    ///
    /// A colour group is a monopoly when all its members have the same
    /// owner. Mortgages do not break a monopoly.
    pub fn compute_monopolies(&mut self) {
        for location in &mut self.locations {
            location.set_part_of_monopoly(false);
        }

        for group in PropertyGroup::MONOPOLY_GROUPS {
            let members = group.members();
            let owner = self.locations[members[0]].owner();
            let monopoly = owner.is_some()
                && members.iter().all(|&i| self.locations[i].owner() == owner);

            if monopoly {
                for &i in members {
                    self.locations[i].set_part_of_monopoly(true);
                }
            }
        }
    }

    /// Number of distinct groups in which `player` holds a monopoly member.
    #[must_use]
    pub fn count_monopolies(&self, player: PlayerId) -> usize {
        PropertyGroup::MONOPOLY_GROUPS
            .iter()
            .filter(|&&group| {
                self.group_members(group)
                    .any(|l| l.is_part_of_monopoly() && l.is_owned_by(player))
            })
            .count()
    }

    /// How many of the edge's two anchors are opponent monopolies (0–2).
    #[must_use]
    pub fn count_opponent_monopolies_on_edge_anchors(&self, player: PlayerId, edge: Edge) -> usize {
        edge.anchors()
            .iter()
            .map(|&i| &self.locations[i])
            .filter(|l| l.is_owned_by_opponent_of(player) && l.is_part_of_monopoly())
            .count()
    }

    // === Group ownership ===

    /// Classify who holds the other members of a location's group.
    ///
    /// Opponent holdings take priority: two or more opponent-held members
    /// give `TwoOpponents`, one gives `OneOpponent`. Otherwise the result is
    /// `SelfOwned` if `player` holds another member, else `None`.
    #[must_use]
    pub fn classify_group_ownership(&self, index: usize, player: PlayerId) -> GroupOwners {
        let group = self.locations[index].group();

        let mut opponents = 0;
        let mut own = 0;
        for other in self.group_members(group).filter(|l| l.index() != index) {
            if other.is_owned_by_opponent_of(player) {
                opponents += 1;
            } else if other.is_owned_by(player) {
                own += 1;
            }
        }

        if opponents > 1 {
            GroupOwners::TwoOpponents
        } else if opponents == 1 {
            GroupOwners::OneOpponent
        } else if own > 0 {
            GroupOwners::SelfOwned
        } else {
            GroupOwners::None
        }
    }

    /// Bit `i` is set when the `i`-th street of the edge is held by an
    /// opponent of `player` and is not mortgaged.
    ///
    /// Strategies use the result as an index into rent-exposure tables.
    #[must_use]
    pub fn ownership_bitmask(&self, edge: Edge, player: PlayerId) -> u32 {
        self.locations_on_edge(edge)
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_owned_by_opponent_of(player) && !l.is_mortgaged())
            .fold(0, |mask, (bit, _)| mask | (1 << bit))
    }

    // === Buildings ===

    /// Total houses across the group of the location at `index`.
    #[must_use]
    pub fn count_houses_in_group(&self, index: usize) -> u32 {
        let group = self.locations[index].group();
        self.group_members(group).map(|l| u32::from(l.houses())).sum()
    }

    /// Total hotels across the group of the location at `index`.
    #[must_use]
    pub fn count_hotels_in_group(&self, index: usize) -> u32 {
        let group = self.locations[index].group();
        self.group_members(group).map(|l| u32::from(l.hotels())).sum()
    }

    /// Whether any member of the group is mortgaged.
    #[must_use]
    pub fn group_is_mortgaged(&self, group: PropertyGroup) -> bool {
        self.group_members(group).any(Location::is_mortgaged)
    }

    fn check_buildable(&self, index: usize) -> Result<(), BoardError> {
        let location = &self.locations[index];
        if !location.is_street() {
            return Err(BoardError::NotBuildable { index });
        }
        if self.group_is_mortgaged(location.group()) {
            return Err(BoardError::GroupMortgaged {
                group: location.group(),
            });
        }
        Ok(())
    }

    /// Add a house, refusing while any member of the group is mortgaged.
    pub fn add_house(&mut self, index: usize) -> Result<(), BoardError> {
        self.check_buildable(index)?;
        self.locations[index].add_house()
    }

    /// Add a hotel, refusing while any member of the group is mortgaged.
    pub fn add_hotel(&mut self, index: usize) -> Result<(), BoardError> {
        self.check_buildable(index)?;
        self.locations[index].add_hotel()
    }

    /// Sell a house.
    pub fn sell_house(&mut self, index: usize) -> Result<(), BoardError> {
        self.locations[index].sell_house()
    }

    /// Sell a hotel.
    pub fn sell_hotel(&mut self, index: usize) -> Result<(), BoardError> {
        self.locations[index].sell_hotel()
    }

    // === Ownership and mortgages ===

    /// Change the owner of a location.
    pub fn set_owner(&mut self, index: usize, owner: Option<PlayerId>) {
        self.locations[index].set_owner(owner);
    }

    /// Mortgage a location.
    pub fn mortgage(&mut self, index: usize) -> Result<(), BoardError> {
        let location = &mut self.locations[index];
        if location.is_mortgaged() {
            return Err(BoardError::AlreadyMortgaged { index });
        }
        location.mortgage();
        Ok(())
    }

    /// Lift the mortgage on a location.
    pub fn unmortgage(&mut self, index: usize) -> Result<(), BoardError> {
        let location = &mut self.locations[index];
        if !location.is_mortgaged() {
            return Err(BoardError::NotMortgaged { index });
        }
        location.set_mortgaged(false);
        Ok(())
    }

    // === Rent ===

    /// Rent context for a visit to `index` with the given dice total.
    #[must_use]
    pub fn rent_context(&self, index: usize, dice_roll: i64) -> RentContext {
        let context = RentContext::with_dice(dice_roll);
        match self.locations[index].owner() {
            Some(owner) => context.with_holdings(self.count_railroads(owner), self.count_utilities(owner)),
            None => context,
        }
    }

    /// Rent owed for landing on `index` with the given dice total.
    #[must_use]
    pub fn rent_at(&self, index: usize, dice_roll: i64) -> i64 {
        self.locations[index].rent(&self.rent_context(index, dice_roll))
    }

    // === Player statistics ===

    /// Railroads held by `player`.
    #[must_use]
    pub fn count_railroads(&self, player: PlayerId) -> usize {
        self.group_members(PropertyGroup::Railroads)
            .filter(|l| l.is_owned_by(player))
            .count()
    }

    /// Utilities held by `player`.
    #[must_use]
    pub fn count_utilities(&self, player: PlayerId) -> usize {
        self.group_members(PropertyGroup::Utilities)
            .filter(|l| l.is_owned_by(player))
            .count()
    }

    /// Locations held by `player`.
    #[must_use]
    pub fn count_properties(&self, player: PlayerId) -> usize {
        self.owned_by(player).count()
    }

    /// Value of `player`'s holdings: purchase price (mortgage value when
    /// mortgaged) plus buildings at cost.
    #[must_use]
    pub fn property_worth(&self, player: PlayerId) -> i64 {
        self.owned_by(player)
            .map(|l| {
                let land = if l.is_mortgaged() { l.mortgage_value() } else { l.cost() };
                land + l.building_value()
            })
            .sum()
    }

    // === Lifecycle ===

    /// Return every location to its start-of-game state.
    pub fn reset(&mut self) {
        for location in &mut self.locations {
            location.reset();
        }
    }
}
