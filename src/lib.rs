// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Filter engine for per-face indexed surface textures.
//!
//! This crate evaluates filtered texture samples against a caller-supplied
//! [`texture_source::TextureSource`]: given a face id, a parametric
//! location `(u, v)` and filter half-widths `(uw, vw)`, [`filter::get_filter`]
//! builds a [`filter::AnyFilter`] that reconstructs a color by building a
//! kernel over one or more adjacent faces, splitting it across face
//! boundaries as needed, and accumulating texel contributions normalized
//! by the kernel weight sum.
//!
//! Out of scope, by design: container parsing, tile caching/eviction,
//! writing, and any on-disk or process-wide resource management. Those
//! are external collaborators that implement [`texture_source::TextureSource`].

#![deny(unsafe_code)]

pub mod error;
pub mod face;
pub mod filter;
pub mod kernel;
pub mod res;
pub mod texture_source;
mod util;

pub use error::{Error, Result};
pub use face::{Edge, FaceInfo, MeshType};
pub use filter::{get_filter, AnyFilter, FilterKind, FilterOptions};
pub use res::Res;
pub use texture_source::TextureSource;
