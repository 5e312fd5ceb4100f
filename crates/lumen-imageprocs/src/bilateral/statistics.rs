/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The statistics pass
//!
//! Finds per channel extremes and turns them, together with the image
//! extent and the bandwidths, into the lattice geometry.
use lumen_core::log::{trace, warn};
use lumen_core::options::{BilateralOptions, AUTO_RANGE_FACTOR};

use crate::bilateral::lattice::cell_count;
use crate::bilateral::{BilateralErrors, MAX_DIMENSIONS, PADDING_RANGE, PADDING_SPACE};
use crate::tiles::{map_tiles, split_tiles, Tile};

/// Per channel minimum and maximum of an image
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChannelStatistics<const N: usize> {
    pub min: [f64; N],
    pub max: [f64; N]
}

impl<const N: usize> Default for ChannelStatistics<N> {
    fn default() -> Self {
        ChannelStatistics {
            min: [f64::INFINITY; N],
            max: [f64::NEG_INFINITY; N]
        }
    }
}

impl<const N: usize> ChannelStatistics<N> {
    /// Fold one sample into the extremes
    ///
    /// Only finite values count, NaN and infinite samples leave the
    /// extremes untouched and later land on an edge cell of the lattice.
    #[inline]
    pub fn update(&mut self, values: &[f64; N]) {
        for (c, &v) in values.iter().enumerate() {
            if v.is_finite() {
                self.min[c] = self.min[c].min(v);
                self.max[c] = self.max[c].max(v);
            }
        }
    }

    /// Combine the extremes of two disjoint parts of an image
    #[must_use]
    pub fn merge(&self, other: &ChannelStatistics<N>) -> ChannelStatistics<N> {
        let mut out = *self;
        for c in 0..N {
            out.min[c] = out.min[c].min(other.min[c]);
            out.max[c] = out.max[c].max(other.max[c]);
        }
        out
    }

    /// Smallest value over all channels
    pub fn min_all(&self) -> f64 {
        self.min.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest value over all channels
    pub fn max_all(&self) -> f64 {
        self.max.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Scan an image, calling `fetch` once per pixel
    ///
    /// The image is split into `threads` tiles whose partial
    /// statistics are merged once every tile is done.
    pub fn scan<F>(width: usize, height: usize, threads: usize, fetch: &F) -> ChannelStatistics<N>
    where
        F: Fn(usize, usize) -> [f64; N] + Sync
    {
        let tiles = split_tiles(width, height, threads);

        let partial = map_tiles(&tiles, |tile: Tile| {
            let mut stats = ChannelStatistics::<N>::default();
            for y in tile.rows() {
                for x in tile.columns() {
                    stats.update(&fetch(x, y));
                }
            }
            stats
        });

        partial
            .iter()
            .fold(ChannelStatistics::default(), |acc, s| acc.merge(s))
    }
}

fn spatial_size(extent: usize, sigma_space: f64) -> usize {
    ((extent.saturating_sub(1) as f64 / sigma_space) as usize)
        .saturating_add(1 + 2 * PADDING_SPACE)
}

fn range_size(min: f64, max: f64, sigma_range: f64) -> usize {
    // a channel without finite samples keeps min > max, `as` saturates it to zero cells
    (((max - min) / sigma_range) as usize).saturating_add(1 + 2 * PADDING_RANGE)
}

/// Lattice axis lengths for an image
///
/// ```text
/// size[spatial] = floor((extent - 1) / sigma_space) + 1 + 2 * PADDING_SPACE
/// size[range]   = floor((max - min) / sigma_range) + 1 + 2 * PADDING_RANGE
/// ```
///
/// `width` and `height` must be non zero.
pub fn lattice_size<const N: usize>(
    width: usize, height: usize, sigma_space: f64, sigma_range: f64,
    stats: &ChannelStatistics<N>
) -> Vec<usize> {
    let mut size = Vec::with_capacity(N + 2);

    size.push(spatial_size(width, sigma_space));
    size.push(spatial_size(height, sigma_space));

    for c in 0..N {
        size.push(range_size(stats.min[c], stats.max[c], sigma_range));
    }
    size
}

fn check_bandwidth(name: &'static str, value: f64) -> Result<f64, BilateralErrors> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(BilateralErrors::Configuration(name, value))
    }
}

/// Everything the statistics pass decides about the lattice
///
/// Created once per filter, it maps pixel coordinates and
/// channel values to lattice coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct GridLayout<const N: usize> {
    stats:       ChannelStatistics<N>,
    sigma_space: f64,
    sigma_range: f64,
    size:        Vec<usize>,
    cells:       usize
}

impl<const N: usize> GridLayout<N> {
    /// Check the options against the image extent before any pixel is read
    ///
    /// # Errors
    /// - [`BilateralErrors::Configuration`] for a non positive bandwidth
    ///   or a zero worker count
    /// - [`BilateralErrors::Size`] for a zero width or height
    pub fn validate(
        width: usize, height: usize, options: &BilateralOptions
    ) -> Result<(), BilateralErrors> {
        check_bandwidth("sigma_space", options.get_sigma_space())?;

        if !options.get_auto_range() {
            check_bandwidth("sigma_range", options.get_sigma_range())?;
        }
        if options.get_threads() == 0 {
            return Err(BilateralErrors::Configuration("threads", 0.0));
        }
        if width == 0 {
            return Err(BilateralErrors::Size("image width", width));
        }
        if height == 0 {
            return Err(BilateralErrors::Size("image height", height));
        }
        Ok(())
    }

    /// Derive the range bandwidth and lattice size
    ///
    /// # Errors
    /// Everything [`validate`](Self::validate) reports, plus
    /// [`BilateralErrors::TooLarge`] when the lattice would exceed
    /// the configured cell limit and [`BilateralErrors::Overflow`] when
    /// it cannot be addressed at all
    pub fn new(
        width: usize, height: usize, stats: ChannelStatistics<N>, options: &BilateralOptions
    ) -> Result<GridLayout<N>, BilateralErrors> {
        Self::validate(width, height, options)?;

        let sigma_space = options.get_sigma_space();
        let mut sigma_range = options.get_sigma_range();

        if options.get_auto_range() {
            let derived = (stats.max_all() - stats.min_all()) * AUTO_RANGE_FACTOR;

            if derived > 0.0 && derived.is_finite() {
                sigma_range = derived;
            } else {
                warn!(
                    "Image has no value range, keeping sigma_range={} instead of {}",
                    sigma_range, derived
                );
            }
            check_bandwidth("sigma_range", sigma_range)?;
        }

        let size = lattice_size(width, height, sigma_space, sigma_range, &stats);
        let cells = cell_count(&size, options.get_max_cells())?;

        trace!("sigma_space: {} - sigma_range: {}", sigma_space, sigma_range);
        trace!("min: {:?} - max: {:?}", stats.min, stats.max);
        trace!("size: {} {:?}", cells, size);

        Ok(GridLayout {
            stats,
            sigma_space,
            sigma_range,
            size,
            cells
        })
    }

    pub const fn statistics(&self) -> &ChannelStatistics<N> {
        &self.stats
    }

    pub const fn sigma_space(&self) -> f64 {
        self.sigma_space
    }

    pub const fn sigma_range(&self) -> f64 {
        self.sigma_range
    }

    pub fn size(&self) -> &[usize] {
        &self.size
    }

    /// Number of cells of the lattice this layout describes
    pub const fn cell_count(&self) -> usize {
        self.cells
    }

    /// Continuous lattice coordinate of a sample
    ///
    /// Writes `N + 2` coordinates into `out`
    #[inline]
    pub fn position(&self, x: f64, y: f64, values: &[f64; N], out: &mut [f64; MAX_DIMENSIONS]) {
        out[0] = x / self.sigma_space + PADDING_SPACE as f64;
        out[1] = y / self.sigma_space + PADDING_SPACE as f64;

        for c in 0..N {
            out[2 + c] = (values[c] - self.stats.min[c]) / self.sigma_range + PADDING_RANGE as f64;
        }
    }

    /// Index of the cell nearest to a pixel sample
    ///
    /// Rounds half away from zero, then clamps into the lattice.
    /// Writes `N + 2` indices into `out`
    #[inline]
    pub fn nearest(&self, x: usize, y: usize, values: &[f64; N], out: &mut [usize; MAX_DIMENSIONS]) {
        let round = |v: f64, padding: usize, axis: usize| -> usize {
            // `as` truncates towards zero and sends NaN to zero
            let index = ((v + 0.5) as i64).saturating_add(padding as i64);
            index.clamp(0, self.size[axis] as i64 - 1) as usize
        };

        out[0] = round(x as f64 / self.sigma_space, PADDING_SPACE, 0);
        out[1] = round(y as f64 / self.sigma_space, PADDING_SPACE, 1);

        for c in 0..N {
            let v = (values[c] - self.stats.min[c]) / self.sigma_range;
            out[2 + c] = round(v, PADDING_RANGE, 2 + c);
        }
    }
}
