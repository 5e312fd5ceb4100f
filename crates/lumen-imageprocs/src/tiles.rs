/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Fork-join helpers over rectangular image tiles
//!
//! Work is split into disjoint tiles, every tile is handed to a scoped
//! worker and the caller blocks until all of them are done.
//! Results come back in tile order, so a reduction over them does not
//! depend on which worker finished first.
use std::ops::Range;

use lumen_core::log::trace;

/// A half open rectangle `[x0, x1) x [y0, y1)` of an image
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Tile {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize
}

impl Tile {
    pub const fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub const fn height(&self) -> usize {
        self.y1 - self.y0
    }

    pub const fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn rows(&self) -> Range<usize> {
        self.y0..self.y1
    }

    pub fn columns(&self) -> Range<usize> {
        self.x0..self.x1
    }
}

/// Split `0..length` into at most `parts` contiguous non empty ranges
fn split_range(length: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.clamp(1, length.max(1));

    (0..parts)
        .map(|i| (i * length / parts)..((i + 1) * length / parts))
        .filter(|r| !r.is_empty())
        .collect()
}

/// Split an image into at most `n` tiles laid out as a grid
///
/// The tiles cover every pixel exactly once and are ordered
/// row by row.
pub fn split_tiles(width: usize, height: usize, n: usize) -> Vec<Tile> {
    let n = n.max(1);
    // pick the most square factorization of n, more rows than columns
    let mut columns = 1;
    let mut c = 1;
    while c * c <= n {
        if n % c == 0 {
            columns = c;
        }
        c += 1;
    }
    let rows = n / columns;

    let mut tiles = Vec::with_capacity(n);

    for y in split_range(height, rows) {
        for x in split_range(width, columns) {
            tiles.push(Tile {
                x0: x.start,
                y0: y.start,
                x1: x.end,
                y1: y.end
            });
        }
    }
    tiles
}

/// Split an image into at most `n` horizontal bands spanning its full width
pub fn split_rows(width: usize, height: usize, n: usize) -> Vec<Tile> {
    if width == 0 {
        return Vec::new();
    }
    split_range(height, n)
        .into_iter()
        .map(|y| Tile {
            x0: 0,
            y0: y.start,
            x1: width,
            y1: y.end
        })
        .collect()
}

/// Run `func` on every tile and return the results in tile order
///
/// With the `threads` feature and more than one tile every tile gets
/// its own scoped thread, otherwise tiles run one after the other on
/// the calling thread.
pub fn map_tiles<T, F>(tiles: &[Tile], func: F) -> Vec<T>
where
    T: Send,
    F: Fn(Tile) -> T + Sync
{
    #[cfg(feature = "threads")]
    {
        if tiles.len() > 1 {
            trace!("Running {} tiles in multithreaded mode", tiles.len());

            let func = &func;

            return std::thread::scope(|s| {
                let handles: Vec<_> = tiles
                    .iter()
                    .map(|&tile| s.spawn(move || func(tile)))
                    .collect();

                handles
                    .into_iter()
                    .map(|x| x.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                    .collect()
            });
        }
    }
    trace!("Running {} tiles in single threaded mode", tiles.len());

    tiles.iter().map(|&tile| func(tile)).collect()
}
