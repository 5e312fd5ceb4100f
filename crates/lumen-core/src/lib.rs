/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all lumen libraries
//!
//! This crate provides the small set of types that the container,
//! the filters and the tone mappers all need to agree on.
//!
//! It currently contains
//!
//! - Colorspace information shared by images
//! - Bilateral grid filter options
//! - Logging macros that forward to the `log` crate when enabled
//!
//! # Features
//!  - `log`: Forward the macros in [`log`](crate::log) to the `log` crate.
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
//!
#![macro_use]

pub mod colorspace;
pub mod log;
pub mod options;
pub mod serde;
