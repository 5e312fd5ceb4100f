/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single image
//!
//! An image is a `width * height` grid of pixels stored
//! interleaved in row major order, each pixel carrying
//! `colorspace.num_components()` floats.
//!
//! Pixels are always read and written as RGB-like triples,
//! single channel images broadcast their value on read and
//! keep only the first component on write.
use lumen_core::colorspace::ColorSpace;
use lumen_core::log::trace;

use crate::color::{luminance, rgb_to_xyz, xyz_to_rgb};
use crate::errors::ImageErrors;

/// Represents a single floating point image
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    data:       Vec<f32>
}

impl Image {
    /// Create a new image with every value set to zero
    #[must_use]
    pub fn new(width: usize, height: usize, colorspace: ColorSpace) -> Image {
        Image::fill(0.0, colorspace, width, height)
    }

    /// Create an image where every component of every pixel is `value`
    ///
    /// # Example
    /// ```
    /// use lumen_core::colorspace::ColorSpace;
    /// use lumen_image::image::Image;
    ///
    /// let image = Image::fill(2.0, ColorSpace::Luma, 10, 10);
    /// assert_eq!(image.pixel(9, 9), [2.0; 3]);
    /// ```
    #[must_use]
    pub fn fill(value: f32, colorspace: ColorSpace, width: usize, height: usize) -> Image {
        let length = width * height * colorspace.num_components();

        Image {
            width,
            height,
            colorspace,
            data: vec![value; length]
        }
    }

    /// Create an image by calling `func` for every `(x, y)` coordinate
    ///
    /// The function always returns a triple, for single channel
    /// colorspaces only the first value is kept.
    pub fn from_fn<F>(width: usize, height: usize, colorspace: ColorSpace, mut func: F) -> Image
    where
        F: FnMut(usize, usize) -> [f32; 3]
    {
        let mut image = Image::new(width, height, colorspace);

        for y in 0..height {
            for x in 0..width {
                image.set_pixel(x, y, func(x, y));
            }
        }
        image
    }

    /// Create an image from interleaved floats
    ///
    /// # Errors
    /// [`ImageErrors::DimensionsMismatch`] when `data` does not hold exactly
    /// `width * height * colorspace.num_components()` values
    pub fn from_f32(
        data: &[f32], width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        let expected = width * height * colorspace.num_components();

        if data.len() != expected {
            return Err(ImageErrors::DimensionsMismatch(expected, data.len()));
        }
        Ok(Image {
            width,
            height,
            colorspace,
            data: data.to_vec()
        })
    }

    /// Return the image width and height, in that order
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Return true if the image holds no pixel
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({x},{y}) out of bounds");
        (y * self.width + x) * self.colorspace.num_components()
    }

    /// Read the pixel at `(x, y)`
    ///
    /// # Panics
    /// If the coordinate is outside the image
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [f32; 3] {
        let i = self.offset(x, y);

        match self.colorspace.num_components() {
            3 => [self.data[i], self.data[i + 1], self.data[i + 2]],
            1 => [self.data[i]; 3],
            _ => [0.0; 3]
        }
    }

    /// Write the pixel at `(x, y)`
    ///
    /// # Panics
    /// If the coordinate is outside the image
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: [f32; 3]) {
        let i = self.offset(x, y);
        let components = self.colorspace.num_components();

        self.data[i..i + components].copy_from_slice(&pixel[..components]);
    }

    /// Return the interleaved pixel data
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Convert the image into another colorspace
    ///
    /// Supports every pair of `RGB`, `XYZ` and `Luma`,
    /// converting to `Luma` keeps only the luminance
    ///
    /// # Errors
    /// [`ImageErrors::ColorConversionNotSupported`] when either side is `Unknown`
    #[allow(clippy::cast_possible_truncation)]
    pub fn convert_color(&mut self, to: ColorSpace) -> Result<(), ImageErrors> {
        let from = self.colorspace;

        if from == to {
            trace!("Image already in {:?}, no conversion", to);
            return Ok(());
        }
        if from.num_components() == 0 || to.num_components() == 0 {
            return Err(ImageErrors::ColorConversionNotSupported(from, to));
        }
        trace!("Converting image from {:?} to {:?}", from, to);

        let convert = |pixel: [f32; 3]| -> [f32; 3] {
            let p = pixel.map(f64::from);

            let rgb = match from {
                ColorSpace::XYZ => xyz_to_rgb(p),
                _ => p
            };
            let out = match to {
                ColorSpace::XYZ => rgb_to_xyz(rgb),
                ColorSpace::Luma => [luminance(rgb); 3],
                _ => rgb
            };
            out.map(|x| x as f32)
        };

        let mut output = Image::new(self.width, self.height, to);

        for y in 0..self.height {
            for x in 0..self.width {
                output.set_pixel(x, y, convert(self.pixel(x, y)));
            }
        }
        *self = output;

        Ok(())
    }
}
