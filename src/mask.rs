//! Fixed-size occupancy masks over an `N×N` grid.
//!
//! A mask packs one bit per cell into the unsigned integer `T`, row-major
//! (`y * N + x`). Ship footprints, the placed-fleet occupancy and the
//! fog-of-war hit/miss layers are all masks, which keeps overlap checks to a
//! single `&`.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign};
use core::mem;
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by mask operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskError {
    /// `N*N` cells do not fit in the backing integer.
    GridTooLarge { n: usize, capacity: usize },
    /// Coordinate lies outside `[0, N)` on either axis.
    OutOfBounds { x: usize, y: usize },
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::GridTooLarge { n, capacity } => write!(
                f,
                "grid of {}x{} needs {} cells but the mask holds {}",
                n,
                n,
                n * n,
                capacity
            ),
            MaskError::OutOfBounds { x, y } => write!(f, "coordinate ({}, {}) is off the grid", x, y),
        }
    }
}

/// One bit per cell of an `N×N` grid, stored in `T`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CellMask<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    /// Number of bits the backing integer can hold.
    pub const CAPACITY: usize = mem::size_of::<T>() * 8;

    /// Empty mask. Callers are expected to have checked [`Self::fits`].
    #[inline]
    pub fn new() -> Self {
        CellMask { bits: T::zero() }
    }

    /// Empty mask, or `GridTooLarge` if `N*N` exceeds the backing integer.
    pub fn try_new() -> Result<Self, MaskError> {
        if Self::fits() {
            Ok(Self::new())
        } else {
            Err(MaskError::GridTooLarge {
                n: N,
                capacity: Self::CAPACITY,
            })
        }
    }

    /// Whether an `N×N` grid fits in `T`.
    #[inline]
    pub const fn fits() -> bool {
        N > 0 && N * N <= Self::CAPACITY
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// True if any cell is set in both masks.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.bits & other.bits).is_zero()
    }

    pub fn get(&self, x: usize, y: usize) -> Result<bool, MaskError> {
        let idx = Self::index(x, y)?;
        Ok(((self.bits >> idx) & T::one()) != T::zero())
    }

    pub fn set(&mut self, x: usize, y: usize) -> Result<(), MaskError> {
        let idx = Self::index(x, y)?;
        self.bits = self.bits | (T::one() << idx);
        Ok(())
    }

    pub fn clear(&mut self, x: usize, y: usize) -> Result<(), MaskError> {
        let idx = Self::index(x, y)?;
        self.bits = self.bits & !(T::one() << idx);
        Ok(())
    }

    #[inline]
    pub fn clear_all(&mut self) {
        self.bits = T::zero();
    }

    /// Iterate occupied cells as `(x, y)` in row-major order.
    pub fn cells(&self) -> Cells<'_, T, N> {
        Cells { mask: self, idx: 0 }
    }

    #[inline]
    fn index(x: usize, y: usize) -> Result<usize, MaskError> {
        if x >= N || y >= N {
            Err(MaskError::OutOfBounds { x, y })
        } else {
            Ok(y * N + x)
        }
    }
}

impl<T, const N: usize> Default for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CellMask<{}x{}> [", N, N)?;
        for y in 0..N {
            write!(f, "  ")?;
            for x in 0..N {
                let bit = ((self.bits >> (y * N + x)) & T::one()) != T::zero();
                write!(f, "{}", if bit { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}

/// Iterator over the occupied cells of a mask.
#[derive(Clone, Copy)]
pub struct Cells<'a, T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    mask: &'a CellMask<T, N>,
    idx: usize,
}

impl<T, const N: usize> Iterator for Cells<'_, T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if ((self.mask.bits >> idx) & T::one()) != T::zero() {
                return Some((idx % N, idx / N));
            }
        }
        None
    }
}

impl<T, const N: usize> BitAnd for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        CellMask {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        CellMask {
            bits: self.bits | rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOrAssign for CellMask<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits = self.bits | rhs.bits;
    }
}

/// Mask type used by the game boards.
pub type GridMask<const N: usize> = CellMask<u128, N>;
