/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use lumen_core::colorspace::ColorSpace;
use lumen_image::image::Image;
use nanorand::Rng;
use xxhash_rust::xxh3::xxh3_128;

mod determinism;
mod parity;

/// Hash the raw bytes of an image's pixels
pub fn hash(image: &Image) -> u128 {
    let bytes: Vec<u8> = image
        .as_slice()
        .iter()
        .flat_map(|x| x.to_le_bytes())
        .collect();

    xxh3_128(&bytes)
}

/// A reproducible noisy HDR image, values spread over four decades
pub fn noise_image(width: usize, height: usize, colorspace: ColorSpace, seed: u64) -> Image {
    let mut rng = nanorand::WyRand::new_seed(seed);

    Image::from_fn(width, height, colorspace, |_, _| {
        [0; 3].map(|_| 10_f32.powf(rng.generate::<f32>() * 4.0 - 2.0))
    })
}

/// Grey image whose three channels all follow `func`
pub fn grey_image<F>(width: usize, height: usize, colorspace: ColorSpace, func: F) -> Image
where
    F: Fn(usize, usize) -> f32
{
    Image::from_fn(width, height, colorspace, |x, y| [func(x, y); 3])
}
