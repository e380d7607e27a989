//! Grid and fleet configuration.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::common::ConfigError;
use crate::mask::GridMask;
use crate::packing;
use crate::ship::ShipId;

/// Side length of the standard square board.
pub const GRID_SIZE: usize = 8;

/// Largest fleet supported; keeps ship ids in a single decimal digit.
pub const MAX_SHIPS: usize = 9;

/// Standard fleet: `(name, length)`, in placement order.
pub const DEFAULT_SHIPS: [(&str, usize); 3] = [("B-Ship", 4), ("Cruiser", 3), ("D-stroy", 2)];

/// Name and length of one ship in the fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipSpec {
    name: String,
    length: usize,
}

impl ShipSpec {
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl fmt::Display for ShipSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.length)
    }
}

/// Parses `NAME:LENGTH`, e.g. `Cruiser:3`.
impl FromStr for ShipSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, len) = s
            .rsplit_once(':')
            .ok_or_else(|| "expected NAME:LENGTH".to_string())?;
        let name = name.trim();
        if name.is_empty() {
            return Err("ship name is empty".to_string());
        }
        let length = len
            .trim()
            .parse::<usize>()
            .map_err(|_| alloc::format!("invalid ship length '{}'", len.trim()))?;
        Ok(ShipSpec::new(name, length))
    }
}

/// Ordered fleet; ship `i` (zero-based) carries id `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetConfig {
    ships: Vec<ShipSpec>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_SHIPS
                .iter()
                .map(|&(name, length)| ShipSpec::new(name, length))
                .collect(),
        )
    }
}

impl FleetConfig {
    pub fn new(ships: Vec<ShipSpec>) -> Self {
        Self { ships }
    }

    pub fn ships(&self) -> &[ShipSpec] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn get(&self, id: ShipId) -> Option<&ShipSpec> {
        self.ships.get(id.index())
    }

    /// Ships paired with their ids, in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (ShipId, &ShipSpec)> {
        self.ships
            .iter()
            .enumerate()
            .map(|(i, spec)| (ShipId::from_index(i), spec))
    }

    /// Total cells covered by the fleet.
    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(ShipSpec::length).sum()
    }

    /// Check that this fleet can be played on an `N×N` grid.
    pub fn validate<const N: usize>(&self) -> Result<(), ConfigError> {
        GridMask::<N>::try_new().map_err(ConfigError::GridTooLarge)?;
        if self.ships.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        if self.ships.len() > MAX_SHIPS {
            return Err(ConfigError::TooManyShips {
                count: self.ships.len(),
                max: MAX_SHIPS,
            });
        }
        for (id, spec) in self.iter() {
            if spec.name.trim().is_empty() {
                return Err(ConfigError::MissingName { id });
            }
            if spec.length == 0 || spec.length > N {
                return Err(ConfigError::InvalidLength {
                    id,
                    length: spec.length,
                    grid: N,
                });
            }
        }
        let cells = self.total_cells();
        if cells > N * N {
            return Err(ConfigError::FleetTooLarge {
                cells,
                capacity: N * N,
            });
        }

        packing::check::<N>(self)
    }
}
