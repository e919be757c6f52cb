// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::error::{Error, Result};

/// A log2-encoded resolution pair for one face's texel grid.
///
/// Stored as log2 sizes rather than raw dimensions so that adjacent
/// faces at different power-of-two resolutions (including subfaces,
/// which differ by exactly one log2 step) can be compared and resampled
/// cheaply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Res {
    pub ulog2: i8,
    pub vlog2: i8,
}

impl Res {
    pub const MAX_LOG2: i8 = 30;

    pub fn new(ulog2: i8, vlog2: i8) -> Result<Self> {
        if !(0..=Self::MAX_LOG2).contains(&ulog2) || !(0..=Self::MAX_LOG2).contains(&vlog2) {
            return Err(Error::InvalidRes { ulog2, vlog2 });
        }
        Ok(Self { ulog2, vlog2 })
    }

    /// Constructs a `Res` from already-validated log2 values, for call
    /// sites (kernel math) that derive them from arithmetic known to
    /// stay in range. Debug-asserts the invariant instead of returning
    /// a `Result`, since this is an internal computation rather than
    /// caller input.
    pub(crate) fn from_log2_unchecked(ulog2: i32, vlog2: i32) -> Self {
        debug_assert!((0..=Self::MAX_LOG2 as i32).contains(&ulog2));
        debug_assert!((0..=Self::MAX_LOG2 as i32).contains(&vlog2));
        Self {
            ulog2: ulog2 as i8,
            vlog2: vlog2 as i8,
        }
    }

    pub fn u(&self) -> i32 {
        1 << self.ulog2
    }

    pub fn v(&self) -> i32 {
        1 << self.vlog2
    }

    /// Total texel count; `i64` because `u() * v()` can exceed `i32`
    /// range at the maximum log2 of 30.
    pub fn size(&self) -> i64 {
        self.u() as i64 * self.v() as i64
    }
}

impl std::fmt::Display for Res {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({} x {})",
            self.ulog2,
            self.vlog2,
            self.u(),
            self.v()
        )
    }
}
