/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bilateral::{Cell, Lattice, MAX_DIMENSIONS};

/// Multilinear interpolation of a lattice at a continuous position
///
/// `position` holds one coordinate per lattice axis. Coordinates
/// outside the lattice are clamped to its edge cells.
///
/// The `2^D` surrounding corners are visited by counting a bitmask,
/// bit `d` selecting the upper neighbour along axis `d`. Corners with
/// zero weight are skipped, so a position on a grid point returns
/// that cell unchanged.
pub fn interpolate<const N: usize>(lattice: &Lattice<N>, position: &[f64]) -> Cell<N> {
    let size = lattice.size();
    let strides = lattice.strides();
    let rank = size.len();

    debug_assert_eq!(position.len(), rank);

    let mut lower = [0_usize; MAX_DIMENSIONS];
    let mut upper = [0_usize; MAX_DIMENSIONS];
    let mut alpha = [0.0_f64; MAX_DIMENSIONS];

    for d in 0..rank {
        let last = size[d] - 1;
        // saturating cast, negative and NaN coordinates land on 0
        let floor = (position[d].floor() as usize).min(last);

        lower[d] = floor * strides[d];
        upper[d] = (floor + 1).min(last) * strides[d];
        alpha[d] = (position[d] - floor as f64).clamp(0.0, 1.0);
    }

    let cells = lattice.cells();
    let mut result = Cell::default();

    for mask in 0_usize..(1 << rank) {
        let mut weight = 1.0;
        let mut offset = 0;

        for d in 0..rank {
            if mask & (1 << d) != 0 {
                weight *= alpha[d];
                offset += upper[d];
            } else {
                weight *= 1.0 - alpha[d];
                offset += lower[d];
            }
        }
        if weight == 0.0 {
            continue;
        }
        result = result.add_scaled(weight, &cells[offset]);
    }
    result
}
