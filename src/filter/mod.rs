// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The public filter surface: [`FilterOptions`]/[`FilterKind`] select a
//! reconstruction kernel, [`get_filter`] builds a filter instance bound
//! to a [`crate::texture_source::TextureSource`], and [`AnyFilter::eval`]
//! evaluates one filtered sample.

mod builders;
mod options;
mod point;
mod separable;
mod triangle;

pub use options::{FilterKind, FilterOptions};
pub use point::PointFilter;
pub use separable::SeparableFilter;
pub use triangle::TriangleFilter;

use crate::face::MeshType;
use crate::texture_source::TextureSource;
use builders::CubicCoeffs;
use separable::Builder;

/// B-spline / Catmull-Rom / Mitchell are the three named cubics; each
/// pins its own sharpness rather than reading `FilterOptions::sharpness`
/// (which only the generic `bicubic` kind consults).
const BSPLINE_SHARPNESS: f32 = 0.0;
const CATMULLROM_SHARPNESS: f32 = 1.0;
const MITCHELL_SHARPNESS: f32 = 2.0 / 3.0;

/// Selects a filter instance for `source` given `options`. Triangular
/// meshes always get the triangular point filter regardless of
/// `options.filter`, matching the original's `mt_triangle` case.
pub fn get_filter<'a, S: TextureSource>(source: &'a S, options: FilterOptions) -> AnyFilter<'a, S> {
    if source.mesh_type() == MeshType::Triangle {
        return AnyFilter::Triangle(TriangleFilter::new(source));
    }
    match options.filter {
        FilterKind::Point => AnyFilter::Point(PointFilter::new(source)),
        FilterKind::Bilinear => AnyFilter::Separable(SeparableFilter::new(source, Builder::Bilinear)),
        FilterKind::Box => AnyFilter::Separable(SeparableFilter::new(source, Builder::Box)),
        FilterKind::Gaussian => {
            AnyFilter::Separable(SeparableFilter::new(source, Builder::Width4Gaussian))
        }
        FilterKind::Bicubic => AnyFilter::Separable(SeparableFilter::new(
            source,
            Builder::Width4Cubic(CubicCoeffs::from_sharpness(options.sharpness as f64)),
        )),
        FilterKind::Bspline => AnyFilter::Separable(SeparableFilter::new(
            source,
            Builder::Width4Cubic(CubicCoeffs::from_sharpness(BSPLINE_SHARPNESS as f64)),
        )),
        FilterKind::CatmullRom => AnyFilter::Separable(SeparableFilter::new(
            source,
            Builder::Width4Cubic(CubicCoeffs::from_sharpness(CATMULLROM_SHARPNESS as f64)),
        )),
        FilterKind::Mitchell | FilterKind::Default => AnyFilter::Separable(SeparableFilter::new(
            source,
            Builder::Width4Cubic(CubicCoeffs::from_sharpness(MITCHELL_SHARPNESS as f64)),
        )),
    }
}

/// Returns `true` if `eval`'s arguments are degenerate and the call
/// must be a silent no-op: a non-positive channel count, a face id
/// outside `[0, num_faces)`, or a channel range that doesn't fit the
/// source's channel count.
pub(crate) fn is_degenerate<S: TextureSource>(
    source: &S,
    face_id: i32,
    first_chan: i32,
    n_chan: i32,
) -> bool {
    n_chan <= 0
        || face_id < 0
        || face_id >= source.num_faces()
        || first_chan < 0
        || first_chan + n_chan > source.num_channels()
}

/// A filter instance bound to one [`TextureSource`]. Dynamic dispatch
/// happens once per `eval` call via this tagged variant rather than a
/// trait object, since there are only two shapes of filter: the
/// single-texel point/triangle evaluators, and the separable kernel
/// driver that all of box/bilinear/width-4 share.
pub enum AnyFilter<'a, S: TextureSource> {
    Point(PointFilter<'a, S>),
    Triangle(TriangleFilter<'a, S>),
    Separable(SeparableFilter<'a, S>),
}

impl<'a, S: TextureSource> AnyFilter<'a, S> {
    /// Writes at most `n_chan` filtered floats starting at `result[0]`.
    /// A no-op (buffer left untouched) for degenerate input.
    #[allow(clippy::too_many_arguments)]
    pub fn eval(
        &self,
        result: &mut [f32],
        first_chan: i32,
        n_chan: i32,
        face_id: i32,
        u: f32,
        v: f32,
        uw: f32,
        vw: f32,
    ) {
        match self {
            AnyFilter::Point(f) => f.eval(result, first_chan, n_chan, face_id, u, v, uw, vw),
            AnyFilter::Triangle(f) => f.eval(result, first_chan, n_chan, face_id, u, v, uw, vw),
            AnyFilter::Separable(f) => f.eval(result, first_chan, n_chan, face_id, u, v, uw, vw),
        }
    }
}
