/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumen_core::colorspace::ColorSpace;
use lumen_core::options::BilateralOptions;
use lumen_image::color::{rgb_to_xyz, xyz_to_rgb};
use lumen_image::image::Image;
use lumen_image::traits::PixelSource;

use crate::bilateral::grid::render;
use crate::bilateral::{BilateralErrors, BilateralGrid, ChannelStatistics, FilterState, Lattice};

/// Bilateral filter over the luminance of an image
///
/// Uses a three dimensional lattice `(x, y, Y)` where `Y` is the CIE
/// luminance of each pixel. The blurred lattice is normalized once,
/// so queries interpolate filtered luminance directly.
///
/// This is the base layer decomposition used by Durand style tone
/// mapping, [`materialize_luma`](Self::materialize_luma) gives that layer.
pub struct LumaBilateral<'src, S: PixelSource + Sync + ?Sized> {
    source: &'src S,
    grid:   BilateralGrid<1>
}

impl<'src, S: PixelSource + Sync + ?Sized> LumaBilateral<'src, S> {
    /// Create a filter with explicit bandwidths
    pub fn new(source: &'src S, sigma_space: f64, sigma_range: f64) -> LumaBilateral<'src, S> {
        Self::with_options(source, BilateralOptions::new(sigma_space, sigma_range))
    }

    /// Create a filter whose range bandwidth is a tenth of the
    /// luminance range, with the default spatial bandwidth
    pub fn new_auto(source: &'src S) -> LumaBilateral<'src, S> {
        Self::with_options(source, BilateralOptions::new_auto())
    }

    pub fn with_options(source: &'src S, options: BilateralOptions) -> LumaBilateral<'src, S> {
        let (width, height) = source.dimensions();

        LumaBilateral {
            source,
            grid: BilateralGrid::new(width, height, options, true)
        }
    }

    /// Build and normalize the filtered lattice
    ///
    /// Calling this again after it succeeded does nothing.
    ///
    /// # Errors
    /// - [`BilateralErrors::UnsupportedColorspace`] for sources of unknown colorspace
    /// - [`BilateralErrors::Configuration`] for invalid options
    /// - [`BilateralErrors::Size`] for an empty source
    /// - [`BilateralErrors::TooLarge`] when the lattice exceeds the configured limit
    /// - [`BilateralErrors::Overflow`] when the lattice cannot be addressed
    pub fn perform(&mut self) -> Result<(), BilateralErrors> {
        let colorspace = self.source.colorspace();

        if colorspace.num_components() == 0 {
            return Err(BilateralErrors::UnsupportedColorspace(colorspace));
        }
        let source = self.source;
        let fetch = move |x: usize, y: usize| [f64::from(source.luminance_at(x, y))];

        self.grid.perform(&fetch)
    }

    /// Filtered luminance of the source pixel at `(x, y)`
    ///
    /// # Errors
    /// - [`BilateralErrors::OutOfBounds`] for a pixel outside the source
    /// - [`BilateralErrors::NotPerformed`] before [`perform`](Self::perform) succeeded
    pub fn value_at(&self, x: usize, y: usize) -> Result<f64, BilateralErrors> {
        self.grid.check_bounds(x, y)?;
        let luminance = f64::from(self.source.luminance_at(x, y));

        self.value_at_coords(x as f64, y as f64, luminance)
    }

    /// Filtered luminance at an arbitrary position and luminance
    ///
    /// # Errors
    /// [`BilateralErrors::NotPerformed`] before [`perform`](Self::perform) succeeded
    pub fn value_at_coords(&self, x: f64, y: f64, luminance: f64) -> Result<f64, BilateralErrors> {
        Ok(self.grid.value(x, y, &[luminance])?[0])
    }

    /// The source pixel with its luminance replaced by the filtered one
    ///
    /// In XYZ the pixel becomes `(X - d, Y', Z - d)` with `d = Y - Y'`,
    /// and is converted back to the source colorspace.
    ///
    /// # Errors
    /// - [`BilateralErrors::OutOfBounds`] for a pixel outside the source
    /// - [`BilateralErrors::NotPerformed`] before [`perform`](Self::perform) succeeded
    pub fn color_at(&self, x: usize, y: usize) -> Result<[f64; 3], BilateralErrors> {
        let filtered = self.value_at(x, y)?;
        let pixel = self.source.channels_at(x, y).map(f64::from);

        let colorspace = self.source.colorspace();

        let xyz = match colorspace {
            ColorSpace::Luma => return Ok([filtered; 3]),
            ColorSpace::XYZ => pixel,
            _ => rgb_to_xyz(pixel)
        };
        let delta = xyz[1] - filtered;
        let out = [xyz[0] - delta, filtered, xyz[2] - delta];

        match colorspace {
            ColorSpace::XYZ => Ok(out),
            _ => Ok(xyz_to_rgb(out))
        }
    }

    /// The recoloured image, in the colorspace of the source
    ///
    /// # Errors
    /// [`BilateralErrors::NotPerformed`] before [`perform`](Self::perform) succeeded
    pub fn materialize(&self) -> Result<Image, BilateralErrors> {
        self.render(self.source.colorspace(), |x, y| {
            Ok(self.color_at(x, y)?.map(|v| v as f32))
        })
    }

    /// The filtered luminance as a single channel image
    ///
    /// # Errors
    /// [`BilateralErrors::NotPerformed`] before [`perform`](Self::perform) succeeded
    pub fn materialize_luma(&self) -> Result<Image, BilateralErrors> {
        self.render(ColorSpace::Luma, |x, y| Ok([self.value_at(x, y)? as f32; 3]))
    }

    fn render<F>(&self, colorspace: ColorSpace, pixel: F) -> Result<Image, BilateralErrors>
    where
        F: Fn(usize, usize) -> Result<[f32; 3], BilateralErrors> + Sync
    {
        if self.grid.state() != FilterState::Queryable {
            return Err(BilateralErrors::NotPerformed);
        }
        let (width, height) = self.grid.dimensions();

        render(width, height, self.grid.options().get_threads(), colorspace, pixel)
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

    pub fn statistics(&self) -> Option<&ChannelStatistics<1>> {
        self.grid.statistics()
    }

    /// The normalized lattice, once performed
    pub fn lattice(&self) -> Option<&Lattice<1>> {
        self.grid.lattice()
    }
}

#[cfg(test)]
mod tests {
    use lumen_core::colorspace::ColorSpace;
    use lumen_core::options::BilateralOptions;
    use lumen_image::image::Image;
    use lumen_image::traits::PixelSource;
    use nanorand::Rng;

    use crate::bilateral::{BilateralErrors, BilateralGrid, FilterState, LumaBilateral};

    fn block_image() -> Image {
        Image::from_fn(4, 4, ColorSpace::Luma, |x, y| {
            if x < 2 && y < 2 {
                [10.0; 3]
            } else {
                [1.0; 3]
            }
        })
    }

    #[test]
    fn constant_image_is_unchanged() {
        let image = Image::fill(0.5, ColorSpace::RGB, 21, 14);
        let mut filter = LumaBilateral::new(&image, 4.0, 0.05);
        filter.perform().unwrap();

        let expected = f64::from(image.luminance_at(0, 0));
        for (x, y) in [(0, 0), (20, 13), (7, 9)] {
            assert!((filter.value_at(x, y).unwrap() - expected).abs() < 1e-9);

            let color = filter.color_at(x, y).unwrap();
            color.iter().for_each(|c| assert!((c - 0.5).abs() < 1e-6, "{color:?}"));
        }
    }

    #[test]
    fn edges_do_not_bleed() {
        let image = block_image();
        let mut filter = LumaBilateral::new(&image, 1.0, 1.0);
        filter.perform().unwrap();

        assert_eq!(filter.size().unwrap(), &[8, 8, 14]);

        let output = filter.materialize_luma().unwrap();
        assert_eq!(output.colorspace(), ColorSpace::Luma);

        for y in 0..4 {
            for x in 0..4 {
                let v = output.pixel(x, y)[0];
                if x < 2 && y < 2 {
                    assert!(v > 5.5 && (v - 10.0).abs() < 1e-5, "({x},{y}) = {v}");
                } else {
                    assert!(v < 5.5 && (v - 1.0).abs() < 1e-5, "({x},{y}) = {v}");
                }
            }
        }
        let row: Vec<f32> = (0..4).map(|x| output.pixel(x, 0)[0]).collect();
        assert!(row.windows(2).all(|w| w[0] >= w[1]), "{row:?}");
    }

    #[test]
    fn lattice_is_normalized_once() {
        let mut rng = nanorand::WyRand::new_seed(9);
        let image = Image::from_fn(18, 11, ColorSpace::Luma, |_, _| [rng.generate::<f32>() * 4.0; 3]);
        let options = BilateralOptions::new(3.0, 0.5).set_threads(1);

        let mut filter = LumaBilateral::with_options(&image, options);
        filter.perform().unwrap();
        let normalized = filter.lattice().unwrap().clone();

        let mut raw = BilateralGrid::<1>::new(18, 11, options, false);
        raw.perform(&|x, y| [f64::from(image.luminance_at(x, y))]).unwrap();

        for (n, r) in normalized.cells().iter().zip(raw.lattice().unwrap().cells()) {
            assert_eq!(n.mass, r.mass);
            if r.mass == 0.0 {
                assert_eq!(n.acc, r.acc);
            } else {
                assert_eq!(n.acc[0], r.acc[0] / r.mass);
            }
        }

        // a second perform must not divide again
        filter.perform().unwrap();
        assert_eq!(filter.lattice().unwrap(), &normalized);
    }

    #[test]
    fn color_keeps_chromatic_offsets() {
        let image = Image::from_fn(12, 9, ColorSpace::XYZ, |x, y| {
            [0.2 + 0.05 * x as f32, 0.3 + 0.1 * y as f32, 0.4]
        });
        let mut filter = LumaBilateral::new(&image, 2.0, 0.2);
        filter.perform().unwrap();

        for (x, y) in [(0, 0), (6, 4), (11, 8)] {
            let pixel = image.pixel(x, y).map(f64::from);
            let filtered = filter.value_at(x, y).unwrap();
            let color = filter.color_at(x, y).unwrap();

            assert_eq!(color[1], filtered);
            let delta = pixel[1] - filtered;
            assert!((color[0] - (pixel[0] - delta)).abs() < 1e-12);
            assert!((color[2] - (pixel[2] - delta)).abs() < 1e-12);
        }
        let output = filter.materialize().unwrap();
        assert_eq!(output.colorspace(), ColorSpace::XYZ);
    }

    #[test]
    fn unknown_colorspace_is_rejected() {
        let image = Image::new(4, 4, ColorSpace::Unknown);
        let mut filter = LumaBilateral::new(&image, 1.0, 1.0);

        assert!(matches!(
            filter.perform(),
            Err(BilateralErrors::UnsupportedColorspace(ColorSpace::Unknown))
        ));
    }

    #[test]
    fn empty_image_is_a_size_error() {
        let image = Image::new(0, 5, ColorSpace::Luma);
        let mut filter = LumaBilateral::new(&image, 1.0, 1.0);

        assert!(matches!(filter.perform(), Err(BilateralErrors::Size(_, 0))));
        assert_eq!(filter.state(), FilterState::Uninitialized);
        assert!(matches!(filter.value_at_coords(0.0, 0.0, 1.0), Err(BilateralErrors::NotPerformed)));
    }

    #[test]
    fn infinite_pixel_stays_local() {
        let mut image = Image::fill(1.0, ColorSpace::Luma, 8, 8);
        image.set_pixel(3, 3, [f32::INFINITY; 3]);

        let mut filter = LumaBilateral::new(&image, 2.0, 0.5);
        filter.perform().unwrap();
        assert_eq!(filter.size().unwrap(), &[8, 8, 5]);

        assert!(!filter.value_at(3, 3).unwrap().is_finite());
        for (x, y) in [(0, 0), (7, 7), (7, 0)] {
            let value = filter.value_at(x, y).unwrap();
            assert!((value - 1.0).abs() < 1e-9, "({x},{y}) {value}");
        }

        let mut auto = LumaBilateral::new_auto(&image);
        auto.perform().unwrap();
        assert_eq!(auto.statistics().unwrap().max, [1.0]);
        assert!(!auto.value_at(3, 3).unwrap().is_finite());
    }

    #[test]
    fn nan_pixel_poisons_its_neighbourhood() {
        let mut image = Image::from_fn(16, 8, ColorSpace::Luma, |x, _| {
            if x < 8 {
                [1.0; 3]
            } else {
                [5.0; 3]
            }
        });
        image.set_pixel(1, 1, [f32::NAN; 3]);

        let mut filter = LumaBilateral::new(&image, 2.0, 0.5);
        filter.perform().unwrap();

        assert!(filter.value_at(1, 1).unwrap().is_nan());
        assert!(filter.color_at(1, 1).unwrap().iter().all(|c| c.is_nan()));

        // the other side of the edge lives in different range cells
        for y in 0..8 {
            for x in 8..16 {
                let value = filter.value_at(x, y).unwrap();
                assert!((value - 5.0).abs() < 1e-9, "({x},{y}) {value}");
            }
        }
    }

    #[test]
    fn pixels_outside_the_source_are_rejected() {
        let image = block_image();
        let mut filter = LumaBilateral::new(&image, 1.0, 1.0);
        filter.perform().unwrap();

        assert!(matches!(
            filter.value_at(4, 0),
            Err(BilateralErrors::OutOfBounds((4, 0), (4, 4)))
        ));
        assert!(matches!(
            filter.color_at(0, 9),
            Err(BilateralErrors::OutOfBounds((0, 9), (4, 4)))
        ));
        assert!(filter.value_at(3, 3).is_ok());
    }
}
