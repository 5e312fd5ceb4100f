/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde")]

use serde::ser::*;

use crate::colorspace::ColorSpace;
use crate::options::BilateralOptions;

impl Serialize for ColorSpace {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // colorspace serialization is simply it's debug value
        serializer.collect_str(&format_args!("{:?}", self))
    }
}

impl Serialize for BilateralOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("BilateralOptions", 5)?;
        state.serialize_field("sigma_space", &self.get_sigma_space())?;
        state.serialize_field("sigma_range", &self.get_sigma_range())?;
        state.serialize_field("auto_range", &self.get_auto_range())?;
        state.serialize_field("threads", &self.get_threads())?;
        state.serialize_field("max_cells", &self.get_max_cells())?;
        state.end()
    }
}
