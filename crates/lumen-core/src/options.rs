/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bilateral grid filter options
//!
//! The options decide how coarse the bilateral grid is along its
//! spatial and range axes and how much work the filter may spread
//! across threads.

/// Default spatial bandwidth used by automatic filters, in pixels
pub const DEFAULT_SIGMA_SPACE: f64 = 16.0;
/// Default range bandwidth, overwritten when automatic range is enabled
pub const DEFAULT_SIGMA_RANGE: f64 = 0.1;
/// Fraction of the value range used as the automatic range bandwidth
pub const AUTO_RANGE_FACTOR: f64 = 0.1;

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|x| x.get())
        .unwrap_or(1)
}

/// Options for the bilateral grid filters
///
/// The struct is cheap to copy and is meant to be configured
/// with the `set_*` builder methods
///
/// # Example
/// ```
/// use lumen_core::options::BilateralOptions;
///
/// let options = BilateralOptions::new(8.0, 0.25).set_threads(1);
/// assert_eq!(options.get_sigma_space(), 8.0);
/// assert!(!options.get_auto_range());
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BilateralOptions {
    sigma_space: f64,
    sigma_range: f64,
    auto_range:  bool,
    threads:     usize,
    max_cells:   Option<usize>
}

impl Default for BilateralOptions {
    fn default() -> Self {
        Self {
            sigma_space: DEFAULT_SIGMA_SPACE,
            sigma_range: DEFAULT_SIGMA_RANGE,
            auto_range:  false,
            threads:     default_threads(),
            max_cells:   None
        }
    }
}

impl BilateralOptions {
    /// Create options with explicit bandwidths
    #[must_use]
    pub fn new(sigma_space: f64, sigma_range: f64) -> BilateralOptions {
        BilateralOptions::default()
            .set_sigma_space(sigma_space)
            .set_sigma_range(sigma_range)
    }

    /// Create options whose range bandwidth is derived from
    /// the image statistics.
    ///
    /// The spatial bandwidth defaults to [`DEFAULT_SIGMA_SPACE`]
    #[must_use]
    pub fn new_auto() -> BilateralOptions {
        BilateralOptions::default().set_auto_range(true)
    }

    /// Get the spatial bandwidth, in pixels per grid cell
    pub const fn get_sigma_space(&self) -> f64 {
        self.sigma_space
    }

    /// Get the range bandwidth, in value units per grid cell
    ///
    /// When automatic range is enabled this is only the
    /// value used before statistics are known.
    pub const fn get_sigma_range(&self) -> f64 {
        self.sigma_range
    }

    /// Whether the range bandwidth is derived from image statistics
    pub const fn get_auto_range(&self) -> bool {
        self.auto_range
    }

    /// Number of workers used by tiled phases
    pub const fn get_threads(&self) -> usize {
        self.threads
    }

    /// Upper bound on the number of grid cells, if any
    pub const fn get_max_cells(&self) -> Option<usize> {
        self.max_cells
    }

    /// Set the spatial bandwidth
    ///
    /// Must be strictly positive, the filter rejects anything else
    /// when it runs.
    #[must_use]
    pub fn set_sigma_space(mut self, sigma_space: f64) -> Self {
        self.sigma_space = sigma_space;
        self
    }

    /// Set the range bandwidth
    #[must_use]
    pub fn set_sigma_range(mut self, sigma_range: f64) -> Self {
        self.sigma_range = sigma_range;
        self
    }

    /// Derive the range bandwidth as a tenth of the
    /// image's value range
    #[must_use]
    pub fn set_auto_range(mut self, yes: bool) -> Self {
        self.auto_range = yes;
        self
    }

    /// Set the number of workers
    ///
    /// A value of one runs every phase on the calling thread,
    /// which also makes the result bit-reproducible.
    #[must_use]
    pub fn set_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Refuse to allocate grids with more than `max_cells` cells
    ///
    /// By default there is no limit.
    #[must_use]
    pub fn set_max_cells(mut self, max_cells: Option<usize>) -> Self {
        self.max_cells = max_cells;
        self
    }
}
