/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A floating point image container for HDR processing
//!
//! Images are a rectangular grid of `f32` pixels tagged with a
//! [`ColorSpace`](lumen_core::colorspace::ColorSpace).
//!
//! Filters read pixels through the [`PixelSource`](traits::PixelSource)
//! trait and transform images through
//! [`OperationsTrait`](traits::OperationsTrait).
//!
//! # Example
//! ```
//! use lumen_core::colorspace::ColorSpace;
//! use lumen_image::image::Image;
//! use lumen_image::traits::PixelSource;
//!
//! let image = Image::fill(0.5, ColorSpace::RGB, 4, 3);
//! assert_eq!(image.dimensions(), (4, 3));
//! assert_eq!(image.channels_at(1, 1), [0.5; 3]);
//! ```
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss
)]

pub use lumen_core;

pub mod color;
pub mod errors;
pub mod image;
pub mod traits;
