//! Ship identity and on-grid footprints.

use core::fmt;
use core::num::NonZeroU8;

use crate::common::BoardError;
use crate::mask::GridMask;

/// 1-based identifier of a ship within the configured fleet.
///
/// Ship `n` is the `n`-th entry of the fleet configuration; the value is what
/// travels on the wire inside a `Sunk` result. Zero is unrepresentable, so a
/// frame carrying it fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(NonZeroU8);

impl ShipId {
    /// Returns `None` for zero, which is never a ship.
    pub const fn new(id: u8) -> Option<Self> {
        match NonZeroU8::new(id) {
            Some(id) => Some(ShipId(id)),
            None => None,
        }
    }

    /// Identifier of the ship at zero-based fleet position `index`.
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < u8::MAX as usize);
        ShipId(NonZeroU8::MIN.saturating_add(index as u8))
    }

    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Zero-based position in the fleet.
    pub const fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A ship committed (or about to be committed) to an `N×N` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<const N: usize> {
    id: ShipId,
    x: usize,
    y: usize,
    orientation: Orientation,
    length: usize,
    footprint: GridMask<N>,
}

impl<const N: usize> Placement<N> {
    /// Anchor the ship at `(x, y)`, extending right or down.
    pub fn new(
        id: ShipId,
        length: usize,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Result<Self, BoardError> {
        let fits = match orientation {
            Orientation::Horizontal => x + length <= N && y < N,
            Orientation::Vertical => y + length <= N && x < N,
        };
        if length == 0 || !fits {
            return Err(BoardError::ShipOutOfBounds { id, x, y });
        }

        let mut footprint = GridMask::<N>::try_new()?;
        for i in 0..length {
            let (cx, cy) = match orientation {
                Orientation::Horizontal => (x + i, y),
                Orientation::Vertical => (x, y + i),
            };
            footprint.set(cx, cy)?;
        }
        Ok(Placement {
            id,
            x,
            y,
            orientation,
            length,
            footprint,
        })
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    /// Anchor cell `(x, y)`.
    pub fn origin(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Cells covered by the ship.
    pub fn footprint(&self) -> GridMask<N> {
        self.footprint
    }

    /// Covered cells as `(x, y)`, from the anchor outwards.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(move |i| match self.orientation {
            Orientation::Horizontal => (self.x + i, self.y),
            Orientation::Vertical => (self.x, self.y + i),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ship_id_is_one_based() {
        assert_eq!(ShipId::new(0), None);
        let id = ShipId::from_index(2);
        assert_eq!(id.get(), 3);
        assert_eq!(id.index(), 2);
        assert_eq!(ShipId::new(1).map(ShipId::index), Some(0));
    }

    #[test]
    fn placement_rejects_overhang() {
        let id = ShipId::from_index(0);
        assert!(Placement::<8>::new(id, 4, 4, 0, Orientation::Horizontal).is_ok());
        assert_eq!(
            Placement::<8>::new(id, 4, 5, 0, Orientation::Horizontal),
            Err(BoardError::ShipOutOfBounds { id, x: 5, y: 0 })
        );
        assert!(Placement::<8>::new(id, 4, 7, 5, Orientation::Vertical).is_err());
    }

    #[test]
    fn vertical_cells_walk_down() {
        let p = Placement::<8>::new(ShipId::from_index(1), 3, 2, 5, Orientation::Vertical).unwrap();
        let cells: Vec<_> = p.cells().collect();
        assert_eq!(cells, vec![(2, 5), (2, 6), (2, 7)]);
        assert_eq!(p.footprint().count(), 3);
        assert!(p.footprint().get(2, 6).unwrap());
    }
}
