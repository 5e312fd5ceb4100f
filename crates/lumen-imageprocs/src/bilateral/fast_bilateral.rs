/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumen_core::options::BilateralOptions;
use lumen_image::image::Image;
use lumen_image::traits::PixelSource;

use crate::bilateral::grid::render;
use crate::bilateral::{BilateralErrors, BilateralGrid, ChannelStatistics, FilterState, Lattice};

/// Bilateral filter over all three channels of an image
///
/// Uses a five dimensional lattice `(x, y, c0, c1, c2)`, so two pixels
/// only blend when all their channels are close. The lattice is not
/// normalized, each query divides the interpolated values by the
/// interpolated mass.
///
/// The source is borrowed for as long as the filter lives and is
/// never written to.
///
/// # Example
/// ```
/// use lumen_core::colorspace::ColorSpace;
/// use lumen_image::image::Image;
/// use lumen_imageprocs::bilateral::FastBilateral;
///
/// let image = Image::fill(0.5, ColorSpace::RGB, 32, 32);
/// let mut filter = FastBilateral::new(&image, 4.0, 0.1);
/// filter.perform().unwrap();
///
/// let value = filter.value_at(3, 7).unwrap();
/// assert!((value[0] - 0.5).abs() < 1e-6);
/// ```
pub struct FastBilateral<'src, S: PixelSource + Sync + ?Sized> {
    source: &'src S,
    grid:   BilateralGrid<3>
}

impl<'src, S: PixelSource + Sync + ?Sized> FastBilateral<'src, S> {
    /// Create a filter with explicit bandwidths
    pub fn new(source: &'src S, sigma_space: f64, sigma_range: f64) -> FastBilateral<'src, S> {
        Self::with_options(source, BilateralOptions::new(sigma_space, sigma_range))
    }

    /// Create a filter whose range bandwidth is a tenth of the
    /// image's value range, with the default spatial bandwidth
    pub fn new_auto(source: &'src S) -> FastBilateral<'src, S> {
        Self::with_options(source, BilateralOptions::new_auto())
    }

    pub fn with_options(source: &'src S, options: BilateralOptions) -> FastBilateral<'src, S> {
        let (width, height) = source.dimensions();

        FastBilateral {
            source,
            grid: BilateralGrid::new(width, height, options, false)
        }
    }

    /// Build the filtered lattice
    ///
    /// Calling this again after it succeeded does nothing.
    ///
    /// # Errors
    /// - [`BilateralErrors::UnsupportedColorspace`] for sources without three channels
    /// - [`BilateralErrors::Configuration`] for invalid options
    /// - [`BilateralErrors::Size`] for an empty source
    /// - [`BilateralErrors::TooLarge`] when the lattice exceeds the configured limit
    /// - [`BilateralErrors::Overflow`] when the lattice cannot be addressed
    pub fn perform(&mut self) -> Result<(), BilateralErrors> {
        let colorspace = self.source.colorspace();

        if colorspace.num_components() != 3 {
            return Err(BilateralErrors::UnsupportedColorspace(colorspace));
        }
        let source = self.source;
        let fetch = move |x: usize, y: usize| source.channels_at(x, y).map(f64::from);

        self.grid.perform(&fetch)
    }

    /// Filtered channels of the source pixel at `(x, y)`
    ///
    /// Pixels whose neighbourhood in the lattice is empty yield zeros.
    ///
    /// # Errors
    /// - [`BilateralErrors::OutOfBounds`] for a pixel outside the source
    /// - [`BilateralErrors::NotPerformed`] before [`perform`](Self::perform) succeeded
    pub fn value_at(&self, x: usize, y: usize) -> Result<[f64; 3], BilateralErrors> {
        self.grid.check_bounds(x, y)?;
        let values = self.source.channels_at(x, y).map(f64::from);

        self.grid.value(x as f64, y as f64, &values)
    }

    /// Filtered channels at an arbitrary position and channel values
    ///
    /// # Errors
    /// [`BilateralErrors::NotPerformed`] before [`perform`](Self::perform) succeeded
    pub fn value_at_coords(
        &self, x: f64, y: f64, values: &[f64; 3]
    ) -> Result<[f64; 3], BilateralErrors> {
        self.grid.value(x, y, values)
    }

    /// The filtered image, in the colorspace of the source
    ///
    /// # Errors
    /// [`BilateralErrors::NotPerformed`] before [`perform`](Self::perform) succeeded
    pub fn materialize(&self) -> Result<Image, BilateralErrors> {
        if self.grid.state() != FilterState::Queryable {
            return Err(BilateralErrors::NotPerformed);
        }
        let (width, height) = self.grid.dimensions();

        render(
            width,
            height,
            self.grid.options().get_threads(),
            self.source.colorspace(),
            |x, y| Ok(self.value_at(x, y)?.map(|v| v as f32))
        )
    }

    pub const fn state(&self) -> FilterState {
        self.grid.state()
    }

    pub fn sigma_space(&self) -> f64 {
        self.grid.sigma_space()
    }

    /// Range bandwidth, the derived one once an automatic filter performed
    pub fn sigma_range(&self) -> f64 {
        self.grid.sigma_range()
    }

    /// Lattice axis lengths, once statistics are known
    pub fn size(&self) -> Option<&[usize]> {
        self.grid.size()
    }

    pub fn statistics(&self) -> Option<&ChannelStatistics<3>> {
        self.grid.statistics()
    }

    pub fn lattice(&self) -> Option<&Lattice<3>> {
        self.grid.lattice()
    }
}
