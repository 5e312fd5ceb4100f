/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits shared between the container and the filters
use lumen_core::colorspace::ColorSpace;
use lumen_core::log::trace;

use crate::color::luminance;
use crate::errors::ImageErrors;
use crate::image::Image;

/// Read only access to pixels
///
/// Filters borrow anything implementing this for as long as they live,
/// they never write back to it.
pub trait PixelSource {
    /// Width and height of the source, in that order
    fn dimensions(&self) -> (usize, usize);

    /// The colorspace the channel values are expressed in
    fn colorspace(&self) -> ColorSpace;

    /// Channel values at `(x, y)`
    ///
    /// Single channel sources repeat their value three times
    fn channels_at(&self, x: usize, y: usize) -> [f32; 3];

    /// Luminance (CIE Y) at `(x, y)`
    fn luminance_at(&self, x: usize, y: usize) -> f32 {
        let pixel = self.channels_at(x, y);

        match self.colorspace().luminance_position() {
            Some(position) => pixel[position],
            #[allow(clippy::cast_possible_truncation)]
            None => luminance(pixel.map(f64::from)) as f32
        }
    }
}

impl PixelSource for Image {
    fn dimensions(&self) -> (usize, usize) {
        Image::dimensions(self)
    }

    fn colorspace(&self) -> ColorSpace {
        Image::colorspace(self)
    }

    #[inline]
    fn channels_at(&self, x: usize, y: usize) -> [f32; 3] {
        self.pixel(x, y)
    }
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn dimensions(&self) -> (usize, usize) {
        (**self).dimensions()
    }

    fn colorspace(&self) -> ColorSpace {
        (**self).colorspace()
    }

    fn channels_at(&self, x: usize, y: usize) -> [f32; 3] {
        (**self).channels_at(x, y)
    }

    fn luminance_at(&self, x: usize, y: usize) -> f32 {
        (**self).luminance_at(x, y)
    }
}

/// This encapsulates an image operation.
///
/// All operations that can be stored in a workflow
/// need to encapsulate this trait.
pub trait OperationsTrait {
    /// Get the name of this operation
    fn name(&self) -> &'static str;

    /// Execute a simple operation on the image
    /// manipulating the image struct
    ///
    /// An object should implement this function, but
    /// a caller should call [`execute`](OperationsTrait::execute), which
    /// does some error checking before calling this method
    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors>;

    /// Return the colorspaces this operation accepts
    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &[ColorSpace::RGB, ColorSpace::XYZ, ColorSpace::Luma]
    }

    /// Execute the operation after checking that the image colorspace
    /// is supported
    fn execute(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let colorspace = image.colorspace();

        if !self.supported_colorspaces().contains(&colorspace) {
            return Err(ImageErrors::UnsupportedColorspace(colorspace, self.name()));
        }
        trace!("Running {}", self.name());

        self.execute_impl(image)
    }

    /// Run the operation on a copy of the image, leaving `image` untouched
    fn clone_and_execute(&self, image: &Image) -> Result<Image, ImageErrors> {
        let mut image = image.clone();
        self.execute(&mut image)?;
        Ok(image)
    }
}
