/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumen_core::log::trace;

use crate::bilateral::{BilateralErrors, Cell, GridLayout, Lattice, MAX_DIMENSIONS};
use crate::tiles::{map_tiles, split_rows, Tile};

fn splat_tile<const N: usize, F>(
    layout: &GridLayout<N>, lattice: &mut Lattice<N>, tile: Tile, fetch: &F
) where
    F: Fn(usize, usize) -> [f64; N]
{
    let mut index = [0_usize; MAX_DIMENSIONS];
    let rank = N + 2;

    for y in tile.rows() {
        for x in tile.columns() {
            let values = fetch(x, y);
            layout.nearest(x, y, &values, &mut index);
            lattice
                .at_mut(&index[..rank])
                .accumulate(&Cell::sample(values));
        }
    }
}

/// Number of bands to splat in parallel
///
/// Every band fills a private copy of the lattice, so a band gets its own
/// copy only when it holds at least as many pixels as the lattice has
/// cells. With `max_cells` the merged lattice plus all private copies must
/// stay within the limit.
pub(crate) fn partitions(
    pixels: usize, cells: usize, threads: usize, max_cells: Option<usize>
) -> usize {
    let mut bands = threads.min(pixels / cells.max(1));

    if let Some(limit) = max_cells {
        bands = bands.min((limit / cells.max(1)).saturating_sub(1));
    }
    bands.max(1)
}

/// Splat every pixel of an image into a new lattice
///
/// Each pixel adds its values and a unit mass to the cell nearest its
/// `(x, y, values)` coordinate.
///
/// With one band pixels are visited in row major order. With more,
/// every worker fills a private lattice for a band of rows and the
/// partial lattices are added together in band order, so the result
/// only depends on the band count, see [`partitions`].
///
/// # Errors
/// Allocation errors from [`Lattice::new`]
pub fn downsample<const N: usize, F>(
    layout: &GridLayout<N>, width: usize, height: usize, threads: usize,
    max_cells: Option<usize>, fetch: &F
) -> Result<Lattice<N>, BilateralErrors>
where
    F: Fn(usize, usize) -> [f64; N] + Sync
{
    let mut lattice = Lattice::new(layout.size(), max_cells)?;
    let count = partitions(width * height, lattice.len(), threads, max_cells);
    let bands = split_rows(width, height, count);

    if bands.len() <= 1 {
        trace!("Splatting {}x{} pixels on one worker", width, height);

        for band in bands {
            splat_tile(layout, &mut lattice, band, fetch);
        }
        return Ok(lattice);
    }
    trace!("Splatting {}x{} pixels in {} bands", width, height, bands.len());

    let empty = lattice.empty_like();

    let partial = map_tiles(&bands, |band| {
        let mut part = empty.clone();
        splat_tile(layout, &mut part, band, fetch);
        part
    });

    for part in &partial {
        lattice.merge(part);
    }
    Ok(lattice)
}
