/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! On a grey image the five dimensional filter sees three equal range
//! axes and should behave like the luminance filter.
use lumen_core::colorspace::ColorSpace;
use lumen_core::options::BilateralOptions;
use lumen_image::image::Image;
use lumen_imageprocs::bilateral::{FastBilateral, LumaBilateral};

use crate::grey_image;

/// Largest difference between the two filters, and the value range of the image
fn compare(image: &Image, sigma_space: f64, sigma_range: f64) -> (f64, f64) {
    let options = BilateralOptions::new(sigma_space, sigma_range).set_threads(1);

    let mut fast = FastBilateral::with_options(image, options);
    let mut luma = LumaBilateral::with_options(image, options);
    fast.perform().unwrap();
    luma.perform().unwrap();

    let stats = luma.statistics().unwrap();
    let range = stats.max[0] - stats.min[0];

    let (width, height) = image.dimensions();
    let mut max_diff = 0.0_f64;

    for y in 0..height {
        for x in 0..width {
            let a = fast.value_at(x, y).unwrap();
            let b = luma.value_at(x, y).unwrap();

            assert_eq!(a[0], a[1]);
            assert_eq!(a[1], a[2]);
            max_diff = max_diff.max((a[0] - b).abs());
        }
    }
    (max_diff, range)
}

#[test]
fn test_smooth_ramp_matches() {
    let image = grey_image(16, 12, ColorSpace::XYZ, |x, y| {
        1.0 + 0.1 * x as f32 + 0.05 * y as f32
    });
    let (diff, range) = compare(&image, 2.0, 0.25);

    assert!(diff < 0.05 * range, "difference {diff} over range {range}");
}

#[test]
fn test_step_edge_matches() {
    let image = grey_image(16, 12, ColorSpace::XYZ, |x, _| if x < 8 { 1.0 } else { 5.0 });
    let (diff, _) = compare(&image, 2.0, 0.25);

    assert!(diff < 1e-6, "difference {diff}");

    let mut luma = LumaBilateral::new(&image, 2.0, 0.25);
    luma.perform().unwrap();
    let output = luma.materialize_luma().unwrap();

    for y in 0..12 {
        for x in 0..16 {
            let expected = image.pixel(x, y)[1];
            assert!((output.pixel(x, y)[0] - expected).abs() < 1e-6);
        }
    }
}
