// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Shim so call sites can use `trace!`/`debug!`/`warn!` whether or not
//! the `tracing` feature is enabled, without scattering
//! `#[cfg(feature = "tracing")]` through the driver. Use
//! `#[cfg_attr(feature = "tracing", tracing::instrument)]` directly at
//! call sites instead of a wrapped `instrument`, since attribute
//! macros can't be shimmed behind a plain re-export.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
pub use noop::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop {
    macro_rules! noop_log {
        ($($arg:tt)*) => {};
    }
    pub use noop_log as debug;
    pub use noop_log as trace;
    pub use noop_log as warn;
}
