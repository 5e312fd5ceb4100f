/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image processing routines for `lumen-image`
//!
//! The centre of this crate is an approximate bilateral filter built on a
//! bilateral grid, the edge preserving blur that Durand and iCAM06 style
//! tone mappers use to split an image into base and detail layers.
//!
//! Two variants share one engine
//! - [`FastBilateral`](bilateral::FastBilateral): filters all three channels
//!   on a five dimensional grid
//! - [`LumaBilateral`](bilateral::LumaBilateral): filters luminance only
//!   on a three dimensional grid
//!
//! Both can also be applied through the [`OperationsTrait`](lumen_image::traits::OperationsTrait)
//! implementation of [`BilateralFilter`](bilateral_filter::BilateralFilter).
//!
//! # Example
//! - Smooth the luminance of an image while keeping its edges
//! ```
//! use lumen_core::colorspace::ColorSpace;
//! use lumen_image::image::Image;
//! use lumen_image::traits::OperationsTrait;
//! use lumen_imageprocs::bilateral_filter::{BilateralFilter, BilateralMode};
//!
//! let mut image = Image::fill(0.5, ColorSpace::RGB, 64, 64);
//! let filter = BilateralFilter::new(8.0, 0.1, BilateralMode::Luminance);
//! // execute the filter
//! filter.execute(&mut image).unwrap();
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
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

pub mod bilateral;
pub mod bilateral_filter;
pub mod tiles;
