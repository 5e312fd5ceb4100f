/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use lumen_core::colorspace::ColorSpace;
use lumen_image::errors::ImageErrors;

/// Errors reported by the bilateral grid filters
///
/// All of them are raised before the lattice is allocated, except
/// [`NotPerformed`](BilateralErrors::NotPerformed) and
/// [`OutOfBounds`](BilateralErrors::OutOfBounds) which guard queries.
pub enum BilateralErrors {
    /// A bandwidth or worker count is not strictly positive
    ///
    /// Contains the parameter name and its value
    Configuration(&'static str, f64),
    /// The image or a lattice axis has zero extent
    ///
    /// Contains what was measured and its value
    Size(&'static str, usize),
    /// The lattice would hold more cells than allowed
    ///
    /// Contains requested cell count and the limit
    TooLarge(usize, usize),
    /// The lattice cell count does not fit in a `usize`
    ///
    /// Contains the lattice axis lengths
    Overflow(Vec<usize>),
    /// The filter cannot run on images of this colorspace
    UnsupportedColorspace(ColorSpace),
    /// A value was queried before `perform` completed
    NotPerformed,
    /// A pixel outside the source was queried
    ///
    /// Contains the queried coordinate and the source dimensions
    OutOfBounds((usize, usize), (usize, usize)),
    Image(ImageErrors)
}

impl Debug for BilateralErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(param, value) => {
                writeln!(f, "Invalid {param} of {value}, expected a positive finite value")
            }
            Self::Size(what, value) => {
                writeln!(f, "Invalid {what} of {value}, bilateral grid needs a non zero extent")
            }
            Self::TooLarge(requested, limit) => {
                writeln!(
                    f,
                    "Bilateral grid of {requested} cells exceeds the limit of {limit} cells"
                )
            }
            Self::Overflow(size) => {
                writeln!(f, "Bilateral grid of size {size:?} has more cells than can be addressed")
            }
            Self::UnsupportedColorspace(colorspace) => {
                writeln!(f, "Colorspace {colorspace:?} is not supported by this filter")
            }
            Self::NotPerformed => {
                writeln!(f, "Filter queried before perform() completed")
            }
            Self::OutOfBounds((x, y), (width, height)) => {
                writeln!(f, "Pixel ({x},{y}) is outside the {width}x{height} source")
            }
            Self::Image(err) => writeln!(f, "{err:?}")
        }
    }
}

impl Display for BilateralErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for BilateralErrors {}

impl From<ImageErrors> for BilateralErrors {
    fn from(value: ImageErrors) -> Self {
        Self::Image(value)
    }
}

impl From<BilateralErrors> for ImageErrors {
    fn from(value: BilateralErrors) -> Self {
        match value {
            BilateralErrors::Image(err) => err,
            err => ImageErrors::GenericString(err.to_string())
        }
    }
}
