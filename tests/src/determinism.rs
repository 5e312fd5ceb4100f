/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumen_core::colorspace::ColorSpace;
use lumen_core::options::BilateralOptions;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;
use lumen_imageprocs::bilateral::{FastBilateral, LumaBilateral};
use lumen_imageprocs::bilateral_filter::{BilateralFilter, BilateralMode};

use crate::{hash, noise_image};

fn fast(image: &Image, options: BilateralOptions) -> Image {
    let mut filter = FastBilateral::with_options(image, options);
    filter.perform().unwrap();
    filter.materialize().unwrap()
}

fn luma(image: &Image, options: BilateralOptions) -> Image {
    let mut filter = LumaBilateral::with_options(image, options);
    filter.perform().unwrap();
    filter.materialize().unwrap()
}

#[test]
#[allow(clippy::uninlined_format_args)]
fn test_single_thread_runs_hash_equal() {
    let image = noise_image(97, 61, ColorSpace::RGB, 0x1234);
    let options = BilateralOptions::new(6.0, 0.5).set_threads(1);

    let runs: [(&str, fn(&Image, BilateralOptions) -> Image); 2] = [("fast", fast), ("luma", luma)];

    for (name, run) in runs {
        let first = hash(&run(&image, options));
        let second = hash(&run(&image, options));

        assert_eq!(first, second, "{} filter is not reproducible", name);
    }
}

#[test]
fn test_fixed_worker_count_is_reproducible() {
    let image = noise_image(80, 45, ColorSpace::XYZ, 77);
    let options = BilateralOptions::new(5.0, 0.3).set_threads(3);

    let expected = hash(&fast(&image, options));

    for _ in 0..4 {
        assert_eq!(hash(&fast(&image, options)), expected);
    }
}

#[test]
fn test_worker_counts_agree() {
    let image = noise_image(64, 48, ColorSpace::RGB, 5);
    let base = BilateralOptions::new(4.0, 0.4);

    let reference = luma(&image, base.set_threads(1));

    for threads in [2, 5, 16] {
        let other = luma(&image, base.set_threads(threads));

        for (a, b) in reference.as_slice().iter().zip(other.as_slice()) {
            let tolerance = 1e-4 * a.abs().max(1.0);
            assert!((a - b).abs() <= tolerance, "{threads} workers: {a} vs {b}");
        }
    }
}

#[test]
fn test_operation_does_not_touch_source() {
    let image = noise_image(33, 21, ColorSpace::RGB, 99);
    let before = hash(&image);

    let output = BilateralFilter::new(4.0, 1.0, BilateralMode::Color)
        .clone_and_execute(&image)
        .unwrap();

    assert_eq!(hash(&image), before);
    assert_ne!(hash(&output), before);
}
