/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumen_core::log::trace;

use crate::bilateral::{Lattice, BLUR_ITERATIONS, MAX_DIMENSIONS};

/// One `[1 2 1] / 4` pass along the axis with the given stride
///
/// Only interior cells of `dst` are written.
fn blur_axis<const N: usize>(src: &Lattice<N>, dst: &mut Lattice<N>, stride: usize) {
    let size = src.size();
    let strides = src.strides();
    let rank = size.len();

    let input = src.cells();
    let output = dst.cells_mut();

    // odometer over the interior of axes 1.., axis 0 is the inner loop
    let mut index = [1_usize; MAX_DIMENSIONS];

    loop {
        let row: usize = (1..rank).map(|d| index[d] * strides[d]).sum();

        for c in (row + 1)..(row + size[0] - 1) {
            let prev = &input[c - stride];
            let curr = &input[c];
            let next = &input[c + stride];

            output[c] = prev.add(next).add_scaled(2.0, curr).scale(0.25);
        }

        let mut d = 1;
        loop {
            if d == rank {
                return;
            }
            index[d] += 1;
            if index[d] + 1 < size[d] {
                break;
            }
            index[d] = 1;
            d += 1;
        }
    }
}

/// Smooth a lattice with a separable approximation of a gaussian
///
/// Every axis, in storage order, gets [`BLUR_ITERATIONS`] passes of
/// `(prev + 2 * curr + next) / 4`. Two buffers are swapped between
/// passes. Both start as copies of the input, and since only interior
/// cells are written the padding cells keep their splatted values.
#[must_use]
pub fn blur<const N: usize>(lattice: Lattice<N>) -> Lattice<N> {
    if lattice.size().iter().any(|&s| s < 3) {
        // no interior
        return lattice;
    }
    trace!("Blurring lattice {:?}", lattice.size());

    let strides = lattice.strides().to_vec();

    let mut current = lattice;
    let mut scratch = current.clone();

    for stride in strides {
        for _ in 0..BLUR_ITERATIONS {
            blur_axis(&current, &mut scratch, stride);
            std::mem::swap(&mut current, &mut scratch);
        }
    }
    current
}

/// Divide every cell's accumulated values by its mass
///
/// Cells without mass are left untouched, the mass itself is kept
/// so later interpolation can still tell empty cells apart.
pub fn normalize<const N: usize>(lattice: &mut Lattice<N>) {
    for cell in lattice.cells_mut() {
        if cell.mass != 0.0 {
            let mass = cell.mass;
            cell.acc.iter_mut().for_each(|a| *a /= mass);
        }
    }
}
