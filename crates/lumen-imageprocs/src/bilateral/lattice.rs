/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumen_core::log::debug;

use crate::bilateral::{BilateralErrors, Cell};

/// Number of cells a lattice of `size` holds
///
/// # Errors
/// - [`BilateralErrors::Size`] if an axis is zero long
/// - [`BilateralErrors::Overflow`] if the product does not fit a `usize`
/// - [`BilateralErrors::TooLarge`] if the product exceeds `max_cells`
pub fn cell_count(size: &[usize], max_cells: Option<usize>) -> Result<usize, BilateralErrors> {
    if let Some(&zero) = size.iter().find(|&&s| s == 0) {
        return Err(BilateralErrors::Size("lattice axis length", zero));
    }
    let limit = max_cells.unwrap_or(usize::MAX);

    let count = size
        .iter()
        .try_fold(1_usize, |acc, &s| acc.checked_mul(s))
        .ok_or_else(|| BilateralErrors::Overflow(size.to_vec()))?;

    if count > limit {
        return Err(BilateralErrors::TooLarge(count, limit));
    }
    Ok(count)
}

/// A dense multidimensional array of cells
///
/// Cells are stored by value in one flat buffer, the first axis
/// varies fastest, i.e. `offset = x + X * (y + Y * (z0 + ...))`.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice<const N: usize> {
    size:    Vec<usize>,
    strides: Vec<usize>,
    cells:   Vec<Cell<N>>
}

impl<const N: usize> Lattice<N> {
    /// Number of axes, two spatial ones plus one per channel
    pub const DIMENSIONS: usize = N + 2;

    /// Allocate a zeroed lattice
    ///
    /// # Errors
    /// - [`BilateralErrors::Size`] if `size` does not have [`Self::DIMENSIONS`]
    ///   entries or one of them is zero
    /// - [`BilateralErrors::Overflow`] if the cell count does not fit a `usize`
    /// - [`BilateralErrors::TooLarge`] if the cell count exceeds `max_cells`
    pub fn new(size: &[usize], max_cells: Option<usize>) -> Result<Lattice<N>, BilateralErrors> {
        if size.len() != Self::DIMENSIONS {
            return Err(BilateralErrors::Size("lattice rank", size.len()));
        }
        let count = cell_count(size, max_cells)?;

        debug!("Allocating bilateral lattice {:?} ({} cells)", size, count);

        let mut strides = Vec::with_capacity(size.len());
        let mut stride = 1;
        for s in size {
            strides.push(stride);
            stride *= s;
        }

        Ok(Lattice {
            size: size.to_vec(),
            strides,
            cells: vec![Cell::default(); count]
        })
    }

    /// A zeroed lattice with the same shape
    #[must_use]
    pub fn empty_like(&self) -> Lattice<N> {
        Lattice {
            size:    self.size.clone(),
            strides: self.strides.clone(),
            cells:   vec![Cell::default(); self.cells.len()]
        }
    }

    /// Length of every axis
    pub fn size(&self) -> &[usize] {
        &self.size
    }

    /// Distance between neighbours along every axis, in cells
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat offset of a multi-index
    #[inline]
    pub fn offset(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.size.len());
        debug_assert!(index.iter().zip(&self.size).all(|(i, s)| i < s));

        index.iter().zip(&self.strides).map(|(i, s)| i * s).sum()
    }

    #[inline]
    pub fn at(&self, index: &[usize]) -> &Cell<N> {
        &self.cells[self.offset(index)]
    }

    #[inline]
    pub fn at_mut(&mut self, index: &[usize]) -> &mut Cell<N> {
        let offset = self.offset(index);
        &mut self.cells[offset]
    }

    pub fn cells(&self) -> &[Cell<N>] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell<N>] {
        &mut self.cells
    }

    /// Add `other` into `self` cell by cell
    ///
    /// The merge is commutative and associative up to floating point
    /// rounding, partial lattices may be combined in any order.
    pub fn merge(&mut self, other: &Lattice<N>) {
        debug_assert_eq!(self.size, other.size);

        for (a, b) in self.cells.iter_mut().zip(other.cells.iter()) {
            a.accumulate(b);
        }
    }
}
