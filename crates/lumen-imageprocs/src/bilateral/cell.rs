/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// One entry of the bilateral grid
///
/// `acc` sums the channel values that landed in the cell and `mass`
/// counts them (fractionally once blurred). Cells form a vector space,
/// `add`, `scale` and `add_scaled` act on `acc` and `mass` alike.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cell<const N: usize> {
    pub acc:  [f64; N],
    pub mass: f64
}

impl<const N: usize> Default for Cell<N> {
    fn default() -> Self {
        Cell {
            acc:  [0.0; N],
            mass: 0.0
        }
    }
}

impl<const N: usize> Cell<N> {
    pub const fn new(acc: [f64; N], mass: f64) -> Cell<N> {
        Cell { acc, mass }
    }

    /// A single source sample, its values with a unit mass
    pub const fn sample(values: [f64; N]) -> Cell<N> {
        Cell::new(values, 1.0)
    }

    /// `self + other`
    #[inline]
    #[must_use]
    pub fn add(&self, other: &Cell<N>) -> Cell<N> {
        let mut acc = self.acc;
        for (a, b) in acc.iter_mut().zip(other.acc.iter()) {
            *a += b;
        }
        Cell::new(acc, self.mass + other.mass)
    }

    /// `k * self`
    #[inline]
    #[must_use]
    pub fn scale(&self, k: f64) -> Cell<N> {
        Cell::new(self.acc.map(|a| a * k), self.mass * k)
    }

    /// `self + k * other`
    #[inline]
    #[must_use]
    pub fn add_scaled(&self, k: f64, other: &Cell<N>) -> Cell<N> {
        let mut acc = self.acc;
        for (a, b) in acc.iter_mut().zip(other.acc.iter()) {
            *a += k * b;
        }
        Cell::new(acc, self.mass + k * other.mass)
    }

    /// In place `self += other`
    #[inline]
    pub fn accumulate(&mut self, other: &Cell<N>) {
        *self = self.add(other);
    }

    /// Accumulated values divided by mass
    ///
    /// Cells that received nothing have zero mass and yield zeros.
    #[inline]
    pub fn normalized(&self) -> [f64; N] {
        if self.mass == 0.0 {
            return [0.0; N];
        }
        self.acc.map(|a| a / self.mass)
    }
}

#[cfg(test)]
mod tests {
    use crate::bilateral::Cell;

    #[test]
    fn vector_operations() {
        let a = Cell::new([1.0, 2.0, 3.0], 1.0);
        let b = Cell::new([4.0, 5.0, 6.0], 2.0);

        assert_eq!(a.add(&b), Cell::new([5.0, 7.0, 9.0], 3.0));
        assert_eq!(a.scale(0.5), Cell::new([0.5, 1.0, 1.5], 0.5));
        assert_eq!(a.add_scaled(2.0, &b), Cell::new([9.0, 12.0, 15.0], 5.0));
    }

    #[test]
    fn box_tap_matches_expanded_form() {
        // (prev + 2 * curr + next) / 4, the blur kernel
        let prev = Cell::new([4.0], 1.0);
        let curr = Cell::new([8.0], 2.0);
        let next = Cell::new([0.0], 0.0);
        let out = prev.add(&next).add_scaled(2.0, &curr).scale(0.25);

        assert_eq!(out, Cell::new([5.0], 1.25));
    }

    #[test]
    fn empty_cells_normalize_to_zero() {
        assert_eq!(Cell::<3>::default().normalized(), [0.0; 3]);

        let mut cell = Cell::sample([3.0]);
        cell.accumulate(&Cell::sample([5.0]));
        assert_eq!(cell.normalized(), [4.0]);
    }
}
