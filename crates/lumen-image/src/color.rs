/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Colorimetric conversions between linear RGB and CIE XYZ
//!
//! Both directions use the sRGB primaries with a D65 white point,
//! values are linear and unbounded so HDR data passes through untouched.

/// Linear sRGB to XYZ, row major
pub const RGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.412_390_799_265_959_5, 0.357_584_339_383_878, 0.180_480_788_401_834_3],
    [0.212_639_005_871_510_4, 0.715_168_678_767_756, 0.072_192_315_508_187_13],
    [0.019_330_818_715_591_85, 0.119_194_779_794_626, 0.950_532_152_249_660_6]
];

/// XYZ to linear sRGB, row major
pub const XYZ_TO_RGB: [[f64; 3]; 3] = [
    [3.240_969_941_904_521, -1.537_383_177_570_094, -0.498_610_760_293_003_3],
    [-0.969_243_636_280_879_8, 1.875_967_501_507_720_7, 0.041_555_057_407_175_61],
    [0.055_630_079_696_993_61, -0.203_976_958_888_976_57, 1.056_971_514_242_878_6]
];

#[inline]
fn mul(matrix: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (o, row) in out.iter_mut().zip(matrix.iter()) {
        *o = row[0] * v[0] + row[1] * v[1] + row[2] * v[2];
    }
    out
}

/// Convert linear RGB to XYZ
#[inline]
pub fn rgb_to_xyz(rgb: [f64; 3]) -> [f64; 3] {
    mul(&RGB_TO_XYZ, rgb)
}

/// Convert XYZ to linear RGB
#[inline]
pub fn xyz_to_rgb(xyz: [f64; 3]) -> [f64; 3] {
    mul(&XYZ_TO_RGB, xyz)
}

/// Relative luminance (CIE Y) of a linear RGB triple
#[inline]
pub fn luminance(rgb: [f64; 3]) -> f64 {
    let row = RGB_TO_XYZ[1];
    row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]
}

#[cfg(test)]
mod tests {
    use crate::color::{luminance, rgb_to_xyz, xyz_to_rgb};

    fn assert_close(a: [f64; 3], b: [f64; 3]) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() <= 1e-6 * y.abs().max(1.0), "{a:?} != {b:?}");
        }
    }

    #[test]
    fn white_has_unit_luminance() {
        assert!((luminance([1.0; 3]) - 1.0).abs() < 1e-9);
        // D65 white point
        assert_close(rgb_to_xyz([1.0; 3]), [0.950_456, 1.0, 1.089_058]);
    }

    #[test]
    fn conversion_is_invertible_for_hdr_values() {
        let rgb = [12.5, 0.003, 480.0];
        assert_close(xyz_to_rgb(rgb_to_xyz(rgb)), rgb);
    }

    #[test]
    fn luminance_matches_xyz_y() {
        let rgb = [0.2, 4.0, 0.7];
        assert!((rgb_to_xyz(rgb)[1] - luminance(rgb)).abs() < 1e-12);
    }
}
