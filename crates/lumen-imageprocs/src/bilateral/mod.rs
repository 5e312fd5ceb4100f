/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Approximate bilateral filtering on a bilateral grid
//!
//! A bilateral filter averages every pixel with its neighbours, weighting
//! each neighbour by how close it is both in space and in value. Doing that
//! exactly is expensive, so the filters here follow the bilateral grid
//! approach of Paris and Durand:
//!
//! 1. **Statistics**: one pass over the image finds the per channel value
//!    range and sizes a coarse lattice with two spatial axes and one range
//!    axis per filtered channel.
//! 2. **Splat**: every pixel adds its value and a unit mass to the lattice
//!    cell nearest to its `(x, y, value)` coordinate.
//! 3. **Blur**: two `[1 2 1] / 4` passes along every axis approximate a
//!    gaussian in the joint space-range domain.
//! 4. **Slice**: a pixel's filtered value is read back by multilinear
//!    interpolation of the `2^D` cells around its coordinate, divided by
//!    the interpolated mass.
//!
//! Every lattice axis carries [`PADDING_SPACE`] / [`PADDING_RANGE`] extra
//! cells on both sides so neither the blur nor the interpolation reads
//! outside the lattice. Those padding cells are never written by the blur.
//!
//! Axes are blurred in the order `x`, `y`, then each range axis, which
//! makes results bit reproducible for a fixed order.
//!
//! References:
//! - Sylvain Paris and Frédo Durand, *A Fast Approximation of the Bilateral
//!   Filter using a Signal Processing Approach*, ECCV 2006
//! - <http://people.csail.mit.edu/sparis/bf/>
mod cell;
mod convolve;
mod errors;
mod fast_bilateral;
mod grid;
mod interpolate;
mod lattice;
mod luma_bilateral;
mod splat;
mod statistics;

pub use cell::Cell;
pub use convolve::{blur, normalize};
pub use errors::BilateralErrors;
pub use fast_bilateral::FastBilateral;
pub use grid::{BilateralGrid, FilterState};
pub use interpolate::interpolate;
pub use lattice::Lattice;
pub use luma_bilateral::LumaBilateral;
pub use splat::downsample;
pub use statistics::{lattice_size, ChannelStatistics, GridLayout};

/// Padding cells added on each side of the spatial axes
pub const PADDING_SPACE: usize = 2;
/// Padding cells added on each side of the range axes
pub const PADDING_RANGE: usize = 2;
/// Number of `[1 2 1]` passes along each axis
pub const BLUR_ITERATIONS: usize = 2;
/// Largest lattice rank supported, two spatial axes plus three channels
pub const MAX_DIMENSIONS: usize = 5;
