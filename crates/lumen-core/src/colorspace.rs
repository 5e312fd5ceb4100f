/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image Colorspace information and manipulation utilities.

/// All colorspaces an HDR image may be tagged with
///
/// Values are always linear floating point, there is no transfer
/// function attached to any of these.
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ColorSpace {
    /// Linear Red, Green, Blue with sRGB (Rec.709) primaries and a D65 white point
    RGB,
    /// CIE 1931 XYZ, D65 white point
    XYZ,
    /// Single channel luminance, i.e the Y of XYZ
    Luma,
    /// The colorspace is unknown
    Unknown
}

impl ColorSpace {
    /// Number of color channels present for a certain colorspace
    ///
    /// E.g. RGB returns 3 since it contains R,G and B colors to make up a pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::RGB | Self::XYZ => 3,
            Self::Luma => 1,
            Self::Unknown => 0
        }
    }

    pub const fn is_grayscale(&self) -> bool {
        matches!(self, Self::Luma)
    }

    /// Returns the index of the channel that carries luminance
    /// when the colorspace stores it directly.
    ///
    /// RGB returns `None` since luminance has to be computed from
    /// all three channels.
    pub const fn luminance_position(&self) -> Option<usize> {
        match self {
            Self::XYZ => Some(1),
            Self::Luma => Some(0),
            _ => None
        }
    }
}

/// Encapsulates all colorspaces supported by
/// the library
pub static ALL_COLORSPACES: [ColorSpace; 3] = [ColorSpace::RGB, ColorSpace::XYZ, ColorSpace::Luma];
