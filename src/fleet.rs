//! Per-ship health for our fleet and the inferred enemy fleet.

use alloc::vec::Vec;

use crate::common::FleetError;
use crate::config::FleetConfig;
use crate::ship::ShipId;

/// Remaining health of every ship in a fleet, indexed by [`ShipId`].
///
/// Our own fleet loses one point per hit. The enemy fleet is only ever
/// zeroed whole, on an explicit `Sunk` report, since we cannot see where
/// its ships are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    health: Vec<usize>,
}

impl Fleet {
    /// A fleet of `size` ships, all at zero health.
    pub fn new(size: usize) -> Self {
        Self {
            health: alloc::vec![0; size],
        }
    }

    /// Set every ship to its full configured length.
    pub fn arm(&mut self, config: &FleetConfig) {
        self.health.clear();
        self.health
            .extend(config.ships().iter().map(|spec| spec.length()));
    }

    /// Zero every ship.
    pub fn clear(&mut self) {
        self.health.iter_mut().for_each(|h| *h = 0);
    }

    pub fn len(&self) -> usize {
        self.health.len()
    }

    pub fn is_empty(&self) -> bool {
        self.health.is_empty()
    }

    pub fn health(&self, id: ShipId) -> Result<usize, FleetError> {
        self.health
            .get(id.index())
            .copied()
            .ok_or(FleetError::UnknownShip(id))
    }

    /// Health of every ship in fleet order.
    pub fn healths(&self) -> &[usize] {
        &self.health
    }

    /// Take one point of damage, returning the health left.
    pub fn damage(&mut self, id: ShipId) -> Result<usize, FleetError> {
        let h = self
            .health
            .get_mut(id.index())
            .ok_or(FleetError::UnknownShip(id))?;
        if *h == 0 {
            return Err(FleetError::AlreadyDestroyed(id));
        }
        *h -= 1;
        Ok(*h)
    }

    /// Zero ship `id`. Returns `true` only if it was still afloat.
    pub fn sink(&mut self, id: ShipId) -> Result<bool, FleetError> {
        let h = self
            .health
            .get_mut(id.index())
            .ok_or(FleetError::UnknownShip(id))?;
        let was_afloat = *h > 0;
        *h = 0;
        Ok(was_afloat)
    }

    /// True iff every ship is at zero health.
    pub fn is_destroyed(&self) -> bool {
        self.health.iter().all(|&h| h == 0)
    }

    /// Ships still afloat.
    pub fn afloat(&self) -> usize {
        self.health.iter().filter(|&&h| h > 0).count()
    }
}
