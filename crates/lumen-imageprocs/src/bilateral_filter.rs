/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bilateral filtering as an image operation
use lumen_core::colorspace::ColorSpace;
use lumen_core::options::BilateralOptions;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::bilateral::{FastBilateral, LumaBilateral};

/// Which lattice the filter runs on
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BilateralMode {
    /// Filter all three channels jointly on a five dimensional lattice
    Color,
    /// Filter luminance on a three dimensional lattice and recolour
    /// every pixel with the filtered luminance
    Luminance
}

/// Edge preserving smoothing of an image
///
/// Replaces the image with the output of a [`FastBilateral`] or
/// [`LumaBilateral`] filter, depending on the mode.
pub struct BilateralFilter {
    options: BilateralOptions,
    mode:    BilateralMode
}

impl BilateralFilter {
    /// Create a new bilateral filter
    ///
    /// # Arguments
    /// - sigma_space: Spatial bandwidth in pixels, must be positive
    /// - sigma_range: Range bandwidth in pixel value units, must be positive
    /// - mode: Whether to filter colour or luminance
    #[must_use]
    pub fn new(sigma_space: f64, sigma_range: f64, mode: BilateralMode) -> BilateralFilter {
        BilateralFilter::with_options(BilateralOptions::new(sigma_space, sigma_range), mode)
    }

    #[must_use]
    pub fn with_options(options: BilateralOptions, mode: BilateralMode) -> BilateralFilter {
        BilateralFilter { options, mode }
    }

    pub const fn mode(&self) -> BilateralMode {
        self.mode
    }

    pub const fn options(&self) -> &BilateralOptions {
        &self.options
    }
}

impl OperationsTrait for BilateralFilter {
    fn name(&self) -> &'static str {
        "Bilateral Filter"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let output = match self.mode {
            BilateralMode::Color => {
                let mut filter = FastBilateral::with_options(&*image, self.options);
                filter.perform()?;
                filter.materialize()?
            }
            BilateralMode::Luminance => {
                let mut filter = LumaBilateral::with_options(&*image, self.options);
                filter.perform()?;
                filter.materialize()?
            }
        };
        *image = output;

        Ok(())
    }

    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        match self.mode {
            BilateralMode::Color => &[ColorSpace::RGB, ColorSpace::XYZ],
            BilateralMode::Luminance => &[ColorSpace::RGB, ColorSpace::XYZ, ColorSpace::Luma]
        }
    }
}

#[cfg(test)]
mod tests {
    use lumen_core::colorspace::ColorSpace;
    use lumen_image::errors::ImageErrors;
    use lumen_image::image::Image;
    use lumen_image::traits::OperationsTrait;
    use nanorand::Rng;

    use crate::bilateral::{FastBilateral, LumaBilateral};
    use crate::bilateral_filter::{BilateralFilter, BilateralMode};

    fn random_image(colorspace: ColorSpace) -> Image {
        let mut rng = nanorand::WyRand::new_seed(0xdead);
        Image::from_fn(24, 16, colorspace, |_, _| {
            [rng.generate::<f32>(), rng.generate::<f32>(), rng.generate::<f32>()]
        })
    }

    #[test]
    fn color_mode_matches_fast_bilateral() {
        let image = random_image(ColorSpace::RGB);
        let op = BilateralFilter::new(4.0, 0.2, BilateralMode::Color);
        let output = op.clone_and_execute(&image).unwrap();

        let mut filter = FastBilateral::with_options(&image, *op.options());
        filter.perform().unwrap();

        assert_eq!(output, filter.materialize().unwrap());
    }

    #[test]
    fn luminance_mode_keeps_luma_images_luma() {
        let mut image = random_image(ColorSpace::Luma);
        let reference = image.clone();

        BilateralFilter::new(3.0, 0.1, BilateralMode::Luminance)
            .execute(&mut image)
            .unwrap();
        assert_eq!(image.colorspace(), ColorSpace::Luma);

        let mut filter = LumaBilateral::new(&reference, 3.0, 0.1);
        filter.perform().unwrap();
        assert_eq!(image, filter.materialize_luma().unwrap());
    }

    #[test]
    fn color_mode_rejects_luma() {
        let mut image = random_image(ColorSpace::Luma);
        let err = BilateralFilter::new(3.0, 0.1, BilateralMode::Color)
            .execute(&mut image)
            .unwrap_err();

        assert!(matches!(
            err,
            ImageErrors::UnsupportedColorspace(ColorSpace::Luma, "Bilateral Filter")
        ));
    }

    #[test]
    fn invalid_sigma_is_reported() {
        let mut image = random_image(ColorSpace::RGB);
        let before = image.clone();

        let result = BilateralFilter::new(0.0, 0.1, BilateralMode::Luminance).execute(&mut image);
        assert!(matches!(result, Err(ImageErrors::GenericString(_))));
        assert_eq!(image, before);
    }
}
