/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The shared bilateral grid engine
//!
//! Both filter variants drive a [`BilateralGrid`] through the same
//! phases, they only differ in how many channels they feed it and
//! whether the blurred lattice is normalized before queries.
use lumen_core::colorspace::ColorSpace;
use lumen_core::log::{debug, trace};
use lumen_core::options::BilateralOptions;
use lumen_image::image::Image;

use crate::bilateral::{
    blur, downsample, interpolate, normalize, BilateralErrors, Cell, ChannelStatistics,
    GridLayout, Lattice, MAX_DIMENSIONS
};
use crate::tiles::{map_tiles, split_rows};

/// How far a filter has progressed
///
/// Phases only move forward, every state implies the previous ones completed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FilterState {
    /// Nothing has been read from the source
    Uninitialized,
    /// Value ranges and lattice size are known
    StatisticsReady,
    /// The lattice has been splatted and blurred
    LatticeReady,
    /// Point queries can be answered
    Queryable
}

/// A bilateral grid over `N` channels, `N + 2` lattice axes
///
/// The grid does not hold the source, every phase takes a `fetch`
/// closure returning the channel values of a pixel.
#[derive(Clone, Debug)]
pub struct BilateralGrid<const N: usize> {
    width:     usize,
    height:    usize,
    options:   BilateralOptions,
    normalize: bool,
    state:     FilterState,
    layout:    Option<GridLayout<N>>,
    lattice:   Option<Lattice<N>>
}

impl<const N: usize> BilateralGrid<N> {
    const RANK_CHECK: () = assert!(N > 0 && N + 2 <= MAX_DIMENSIONS);

    /// Create a grid for a `width` x `height` source
    ///
    /// If `normalize` is set the blurred lattice is divided by its mass
    /// once, and queries return values directly. Otherwise every query
    /// divides the interpolated values by the interpolated mass.
    ///
    /// Nothing is validated or allocated until [`perform`](Self::perform)
    pub fn new(
        width: usize, height: usize, options: BilateralOptions, normalize: bool
    ) -> BilateralGrid<N> {
        #[allow(clippy::let_unit_value)]
        let () = Self::RANK_CHECK;

        BilateralGrid {
            width,
            height,
            options,
            normalize,
            state: FilterState::Uninitialized,
            layout: None,
            lattice: None
        }
    }

    /// Scan the source and size the lattice
    ///
    /// Does nothing once statistics are known.
    ///
    /// # Errors
    /// Invalid options or image extent, see [`GridLayout::new`].
    /// These are reported before the source is read.
    pub fn compute_statistics<F>(&mut self, fetch: &F) -> Result<(), BilateralErrors>
    where
        F: Fn(usize, usize) -> [f64; N] + Sync
    {
        if self.state != FilterState::Uninitialized {
            return Ok(());
        }
        GridLayout::<N>::validate(self.width, self.height, &self.options)?;

        trace!("Scanning {}x{} image", self.width, self.height);

        let stats = ChannelStatistics::scan(self.width, self.height, self.options.get_threads(), fetch);
        let layout = GridLayout::new(self.width, self.height, stats, &self.options)?;

        self.layout = Some(layout);
        self.state = FilterState::StatisticsReady;
        Ok(())
    }

    /// Splat and blur the lattice
    ///
    /// Computes statistics first if needed, does nothing once the
    /// lattice exists.
    ///
    /// # Errors
    /// See [`compute_statistics`](Self::compute_statistics)
    pub fn build_lattice<F>(&mut self, fetch: &F) -> Result<(), BilateralErrors>
    where
        F: Fn(usize, usize) -> [f64; N] + Sync
    {
        self.compute_statistics(fetch)?;

        if self.state != FilterState::StatisticsReady {
            return Ok(());
        }
        let layout = self.layout.as_ref().ok_or(BilateralErrors::NotPerformed)?;

        let lattice = downsample(
            layout,
            self.width,
            self.height,
            self.options.get_threads(),
            self.options.get_max_cells(),
            fetch
        )?;

        self.lattice = Some(blur(lattice));
        self.state = FilterState::LatticeReady;
        Ok(())
    }

    /// Run every phase up to [`FilterState::Queryable`]
    ///
    /// Calling this again after it succeeded is a no-op.
    ///
    /// # Errors
    /// See [`compute_statistics`](Self::compute_statistics)
    pub fn perform<F>(&mut self, fetch: &F) -> Result<(), BilateralErrors>
    where
        F: Fn(usize, usize) -> [f64; N] + Sync
    {
        self.build_lattice(fetch)?;

        if self.state == FilterState::LatticeReady {
            if self.normalize {
                if let Some(lattice) = self.lattice.as_mut() {
                    normalize(lattice);
                }
            }
            self.state = FilterState::Queryable;

            debug!("Bilateral grid {:?} ready", self.size());
        }
        Ok(())
    }

    /// Interpolated cell at a continuous spatial position and channel values
    ///
    /// # Errors
    /// [`BilateralErrors::NotPerformed`] before [`perform`](Self::perform) succeeded
    pub fn query_position(&self, x: f64, y: f64, values: &[f64; N]) -> Result<Cell<N>, BilateralErrors> {
        let (Some(layout), Some(lattice)) = (&self.layout, &self.lattice) else {
            return Err(BilateralErrors::NotPerformed);
        };
        if self.state != FilterState::Queryable {
            return Err(BilateralErrors::NotPerformed);
        }
        let mut position = [0.0; MAX_DIMENSIONS];
        layout.position(x, y, values, &mut position);

        Ok(interpolate(lattice, &position[..N + 2]))
    }

    /// Filtered channel values of a sample
    ///
    /// Normalized grids return the interpolated values as is, the
    /// others divide them by the interpolated mass, zero mass giving zeros.
    ///
    /// # Errors
    /// [`BilateralErrors::NotPerformed`] before [`perform`](Self::perform) succeeded
    pub fn value(&self, x: f64, y: f64, values: &[f64; N]) -> Result<[f64; N], BilateralErrors> {
        let cell = self.query_position(x, y, values)?;

        if self.normalize {
            Ok(cell.acc)
        } else {
            Ok(cell.normalized())
        }
    }

    pub const fn state(&self) -> FilterState {
        self.state
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Reject pixel coordinates outside the source
    ///
    /// # Errors
    /// [`BilateralErrors::OutOfBounds`] when `x >= width` or `y >= height`
    pub fn check_bounds(&self, x: usize, y: usize) -> Result<(), BilateralErrors> {
        if x >= self.width || y >= self.height {
            return Err(BilateralErrors::OutOfBounds((x, y), (self.width, self.height)));
        }
        Ok(())
    }

    pub const fn options(&self) -> &BilateralOptions {
        &self.options
    }

    /// Spatial bandwidth
    pub fn sigma_space(&self) -> f64 {
        self.layout
            .as_ref()
            .map_or(self.options.get_sigma_space(), GridLayout::sigma_space)
    }

    /// Range bandwidth
    ///
    /// With automatic range this is the configured value until
    /// statistics are known, and the derived one afterwards.
    pub fn sigma_range(&self) -> f64 {
        self.layout
            .as_ref()
            .map_or(self.options.get_sigma_range(), GridLayout::sigma_range)
    }

    /// Lattice size, once statistics are known
    pub fn size(&self) -> Option<&[usize]> {
        self.layout.as_ref().map(GridLayout::size)
    }

    /// Channel extremes, once statistics are known
    pub fn statistics(&self) -> Option<&ChannelStatistics<N>> {
        self.layout.as_ref().map(GridLayout::statistics)
    }

    pub fn layout(&self) -> Option<&GridLayout<N>> {
        self.layout.as_ref()
    }

    /// The blurred lattice, once built
    pub fn lattice(&self) -> Option<&Lattice<N>> {
        self.lattice.as_ref()
    }
}

/// Build an image by evaluating `pixel` everywhere, one band of rows per worker
pub(crate) fn render<F>(
    width: usize, height: usize, threads: usize, colorspace: ColorSpace, pixel: F
) -> Result<Image, BilateralErrors>
where
    F: Fn(usize, usize) -> Result<[f32; 3], BilateralErrors> + Sync
{
    let components = colorspace.num_components();
    let bands = split_rows(width, height, threads);

    let rendered = map_tiles(&bands, |band| -> Result<Vec<f32>, BilateralErrors> {
        let mut out = Vec::with_capacity(band.area() * components);

        for y in band.rows() {
            for x in band.columns() {
                out.extend_from_slice(&pixel(x, y)?[..components]);
            }
        }
        Ok(out)
    });

    let mut data = Vec::with_capacity(width * height * components);
    for band in rendered {
        data.extend(band?);
    }
    Ok(Image::from_f32(&data, width, height, colorspace)?)
}
