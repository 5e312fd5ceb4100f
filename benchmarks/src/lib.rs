/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumen_core::colorspace::ColorSpace;
use lumen_image::image::Image;
use nanorand::Rng;

/// A reproducible HDR test image
///
/// Noise over two decades on top of a horizontal gradient, so the
/// filters see both edges and smooth areas.
pub fn bench_image(width: usize, height: usize, colorspace: ColorSpace) -> Image {
    let mut rng = nanorand::WyRand::new_seed(0x5eed);

    Image::from_fn(width, height, colorspace, |x, _| {
        let base = 1.0 + 10.0 * x as f32 / width as f32;
        [0; 3].map(|_| base * 10_f32.powf(rng.generate::<f32>() * 2.0 - 1.0))
    })
}
