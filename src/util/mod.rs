// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

mod log2;
mod smoothstep;
pub(crate) mod tracing_wrappers;

pub use log2::ceil_log2_inv;
pub use smoothstep::{clamp, smoothstep};
