// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::{Error, Result};

/// Which reconstruction kernel a [`super::get_filter`] call should
/// build. `Default` resolves to the Mitchell bicubic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    Default,
    Point,
    Bilinear,
    Box,
    Gaussian,
    Bicubic,
    Bspline,
    CatmullRom,
    Mitchell,
}

/// Options controlling how a `quad`-mesh filter instance is built.
/// `noedgeblend` and `lerp` are accepted for API compatibility with
/// the surrounding toolchain but are not read anywhere in this crate:
/// edge blending is always active (it is the separable driver's split
/// policy, not an opt-in), and `lerp` is reserved for future use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterOptions {
    pub filter: FilterKind,
    pub sharpness: f32,
    pub lerp: bool,
    pub noedgeblend: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            filter: FilterKind::Default,
            sharpness: 0.0,
            lerp: false,
            noedgeblend: false,
        }
    }
}

impl FilterOptions {
    pub fn new(filter: FilterKind, sharpness: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&sharpness) {
            return Err(Error::InvalidSharpness(sharpness));
        }
        Ok(Self {
            filter,
            sharpness,
            ..Self::default()
        })
    }
}
