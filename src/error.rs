// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    #[error("invalid resolution log2 pair ({ulog2}, {vlog2}), each must be in [0, 30]")]
    InvalidRes { ulog2: i8, vlog2: i8 },
    #[error("invalid sharpness {0}, must be in [0.0, 1.0]")]
    InvalidSharpness(f32),
    #[error(
        "channel range out of bounds: first_chan {first_chan} n_chan {n_chan} num_channels {num_channels}"
    )]
    ChannelRangeOutOfBounds {
        first_chan: i32,
        n_chan: i32,
        num_channels: i32,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
