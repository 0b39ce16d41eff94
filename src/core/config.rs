//! Board configuration.
//!
//! The board is described by a flat key/value resource in `.properties`
//! form. `names` lists the location keys; every key then carries its own
//! fields:
//!
//! ```text
//! names=go,mediterranean,...
//! mediterranean.index=1
//! mediterranean.name=Mediterranean Avenue
//! mediterranean.type=street
//! mediterranean.group=brown
//! mediterranean.cost=60
//! mediterranean.house_cost=50
//! mediterranean.rent=2
//! mediterranean.rent.one_house=10
//! ...
//! mediterranean.rent.hotel=250
//! ```
//!
//! Railroads read `cost` and `rent.one_railroad`, utilities read `cost`,
//! `rent.one_utility` and `rent.two_utilities`, taxes read `amount`.
//!
//! ## Numeric fields
//!
//! In `LoadMode::Lenient` (the default) a missing or malformed number is
//! logged, recorded as a `ConfigIssue`, and read as 0 so the board still
//! builds. `LoadMode::Strict` turns the first such field into an error.
//! Structural problems (unknown type or group, bad or duplicate index, an
//! empty board slot) fail in both modes.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::{Location, LocationKind, PropertyGroup, SpecialKind, BOARD_SIZE};
use crate::error::ConfigError;

const STANDARD_BOARD: &str = include_str!("../../resources/locations.properties");

const STREET_RENT_KEYS: [&str; 6] = [
    "rent",
    "rent.one_house",
    "rent.two_houses",
    "rent.three_houses",
    "rent.four_houses",
    "rent.hotel",
];

/// How numeric field failures are treated while loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadMode {
    /// Report the field and read it as 0.
    #[default]
    Lenient,
    /// Fail on the first bad field.
    Strict,
}

/// A numeric field that was read as 0 during a lenient load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigIssue {
    /// Full configuration key.
    pub key: String,
    /// Raw value, `None` if the key was absent.
    pub value: Option<String>,
}

/// Locations built from a configuration, plus any degraded fields.
#[derive(Clone, Debug)]
pub struct LoadedBoard {
    /// All 40 locations, ordered by index.
    pub locations: Vec<Location>,
    /// Numeric fields that defaulted to 0.
    pub issues: Vec<ConfigIssue>,
}

/// Key/value board description.
///
/// ## Example
///
/// ```
/// use monopoly_engine::core::{BoardConfig, LoadMode};
///
/// let config = BoardConfig::standard();
/// assert_eq!(config.get("boardwalk.cost"), Some("400"));
///
/// let board = config.load(LoadMode::Strict).unwrap();
/// assert_eq!(board.locations.len(), 40);
/// assert!(board.issues.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    entries: FxHashMap<String, String>,
}

impl BoardConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled US board.
    #[must_use]
    pub fn standard() -> Self {
        Self::parse(STANDARD_BOARD)
    }

    /// Parse `.properties` text.
    ///
    /// Follows the `java.util.Properties` line format:
    ///
    /// - Blank lines and lines whose first non-blank character is `#` or
    ///   `!` are skipped.
    /// - A line ending in an odd number of backslashes continues onto the
    ///   next line, whose leading whitespace is dropped.
    /// - The key ends at the first unescaped `=`, `:` or whitespace. One
    ///   `=` or `:` and the whitespace around it separate key from value.
    /// - `\t`, `\n`, `\r`, `\f` and `\uXXXX` are unescaped; any other
    ///   escaped character stands for itself.
    ///
    /// Unlike `Properties`, trailing whitespace on values is trimmed.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut config = Self::new();
        let mut lines = text.lines();
        while let Some(line) = lines.next() {
            let line = line.trim_start();
            if line.is_empty() || line.starts_with(['#', '!']) {
                continue;
            }

            let mut logical = line.to_string();
            while continues(&logical) {
                logical.pop();
                match lines.next() {
                    Some(next) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            config.set(unescape(key), unescape(value.trim_end()));
        }
        config
    }

    /// Set an entry (builder pattern).
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set an entry, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the configuration has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Location keys listed under `names`.
    pub fn location_keys(&self) -> Result<Vec<&str>, ConfigError> {
        let names = self.get("names").ok_or_else(|| ConfigError::MissingKey {
            key: "names".to_string(),
        })?;
        Ok(names
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .collect())
    }

    /// Build all 40 locations.
    pub fn load(&self, mode: LoadMode) -> Result<LoadedBoard, ConfigError> {
        let mut reader = FieldReader {
            config: self,
            mode,
            issues: Vec::new(),
        };

        let mut slots: Vec<Option<Location>> = vec![None; BOARD_SIZE];
        for key in self.location_keys()? {
            let location = reader.location(key)?;
            let index = location.index();

            if !location.group().members().contains(&index) {
                return Err(ConfigError::GroupMismatch {
                    key: key.to_string(),
                    index,
                    group: location.group(),
                });
            }
            if let Some(existing) = &slots[index] {
                return Err(ConfigError::DuplicateIndex {
                    index,
                    first: existing.key().to_string(),
                    second: key.to_string(),
                });
            }
            slots[index] = Some(location);
        }

        let locations = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or(ConfigError::MissingLocation { index }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LoadedBoard {
            locations,
            issues: reader.issues,
        })
    }
}

/// Whether a raw line ends in an unescaped backslash.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into raw key and raw value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut end = line.len();
    for (pos, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || c.is_whitespace() {
            end = pos;
            break;
        }
    }

    let rest = line[end..].trim_start();
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (&line[..end], rest.trim_start())
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.clone().take(4).collect();
                let decoded = (hex.len() == 4 && hex.chars().all(|h| h.is_ascii_hexdigit()))
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32);
                match decoded {
                    Some(decoded) => {
                        out.push(decoded);
                        chars.nth(3);
                    }
                    None => {
                        warn!(escape = %hex, "malformed unicode escape kept literally");
                        out.push_str("\\u");
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Reads typed fields for one load, applying the load mode.
struct FieldReader<'a> {
    config: &'a BoardConfig,
    mode: LoadMode,
    issues: Vec<ConfigIssue>,
}

impl<'a> FieldReader<'a> {
    fn integer(&mut self, key: &str) -> Result<i64, ConfigError> {
        let raw = self.config.get(key);
        if let Some(value) = raw.and_then(|v| v.parse::<i64>().ok()) {
            return Ok(value);
        }

        match (self.mode, raw) {
            (LoadMode::Strict, None) => Err(ConfigError::MissingKey { key: key.to_string() }),
            (LoadMode::Strict, Some(value)) => Err(ConfigError::InvalidNumber {
                key: key.to_string(),
                value: value.to_string(),
            }),
            (LoadMode::Lenient, _) => {
                warn!(key, value = ?raw, "numeric board field unreadable, using 0");
                self.issues.push(ConfigIssue {
                    key: key.to_string(),
                    value: raw.map(str::to_string),
                });
                Ok(0)
            }
        }
    }

    fn required(&self, key: &str) -> Result<&'a str, ConfigError> {
        self.config
            .get(key)
            .ok_or_else(|| ConfigError::MissingKey { key: key.to_string() })
    }

    fn location(&mut self, key: &str) -> Result<Location, ConfigError> {
        let raw_index = self.integer(&format!("{key}.index"))?;
        let index = usize::try_from(raw_index)
            .ok()
            .filter(|&i| i < BOARD_SIZE)
            .ok_or_else(|| ConfigError::IndexOutOfRange {
                key: key.to_string(),
                index: raw_index,
            })?;

        let name = self.config.get(&format!("{key}.name")).unwrap_or(key).to_string();
        let type_name = self.required(&format!("{key}.type"))?.to_ascii_lowercase();

        let kind = match type_name.as_str() {
            "street" => self.street(key)?,
            "railroad" => LocationKind::Railroad {
                cost: self.integer(&format!("{key}.cost"))?,
                rent: self.integer(&format!("{key}.rent.one_railroad"))?,
            },
            "utility" => LocationKind::Utility {
                cost: self.integer(&format!("{key}.cost"))?,
                one_utility: self.integer(&format!("{key}.rent.one_utility"))?,
                two_utilities: self.integer(&format!("{key}.rent.two_utilities"))?,
            },
            "tax" => LocationKind::Special(SpecialKind::Tax {
                amount: self.integer(&format!("{key}.amount"))?,
            }),
            "go" => LocationKind::Special(SpecialKind::Go),
            "jail" => LocationKind::Special(SpecialKind::Jail),
            "free_parking" => LocationKind::Special(SpecialKind::FreeParking),
            "go_to_jail" => LocationKind::Special(SpecialKind::GoToJail),
            "chance" => LocationKind::Special(SpecialKind::Chance),
            "community_chest" => LocationKind::Special(SpecialKind::CommunityChest),
            _ => {
                return Err(ConfigError::UnknownType {
                    key: key.to_string(),
                    value: type_name,
                })
            }
        };

        Ok(Location::new(key, index, name, kind))
    }

    fn street(&mut self, key: &str) -> Result<LocationKind, ConfigError> {
        let group_name = self.required(&format!("{key}.group"))?;
        let group = PropertyGroup::from_config_name(group_name)
            .filter(|g| g.is_street_group())
            .ok_or_else(|| ConfigError::UnknownGroup {
                key: key.to_string(),
                value: group_name.to_string(),
            })?;

        let cost = self.integer(&format!("{key}.cost"))?;
        let house_cost = self.integer(&format!("{key}.house_cost"))?;
        let mut rents = [0; 6];
        for (rent, suffix) in rents.iter_mut().zip(STREET_RENT_KEYS) {
            *rent = self.integer(&format!("{key}.{suffix}"))?;
        }

        Ok(LocationKind::Street {
            group,
            cost,
            house_cost,
            rents,
        })
    }
}
