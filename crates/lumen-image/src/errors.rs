/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image processing
use std::fmt::{Debug, Display, Formatter};

use lumen_core::colorspace::ColorSpace;

/// All possible image errors that can occur.
///
/// This is the grand-daddy error that operations report through
pub enum ImageErrors {
    /// The buffer length does not match `width * height * components`
    ///
    /// Contains expected length and found length
    DimensionsMismatch(usize, usize),
    /// An operation does not support a colorspace
    UnsupportedColorspace(ColorSpace, &'static str),
    /// The colorspace cannot be converted to the requested one
    ///
    /// Contains source and destination
    ColorConversionNotSupported(ColorSpace, ColorSpace),
    GenericString(String),
    GenericStr(&'static str)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionsMismatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected a buffer of length {expected} but found {found}"
                )
            }
            Self::UnsupportedColorspace(present, operation) => {
                writeln!(
                    f,
                    "Colorspace {present:?} is not supported by the operation {operation}"
                )
            }
            Self::ColorConversionNotSupported(from, to) => {
                writeln!(f, "Cannot convert from colorspace {from:?} to {to:?}")
            }
            Self::GenericString(err) => writeln!(f, "{err}"),
            Self::GenericStr(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl std::error::Error for ImageErrors {}

impl From<&'static str> for ImageErrors {
    fn from(value: &'static str) -> Self {
        Self::GenericStr(value)
    }
}

impl From<String> for ImageErrors {
    fn from(value: String) -> Self {
        Self::GenericString(value)
    }
}
