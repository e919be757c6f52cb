// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! The driver shared by box, bilinear, and every width-4 (Gaussian /
//! B-spline / Catmull-Rom / Mitchell / generic bicubic) filter: builds
//! one kernel in the sample face's local frame, then recursively clips
//! and splits that kernel across face boundaries, accumulating
//! weighted texel contributions as it goes.

use crate::face::{Edge, FaceInfo};
use crate::filter::builders::{self, CubicCoeffs};
use crate::filter::is_degenerate;
use crate::kernel::SeparableKernel;
use crate::res::Res;
use crate::texture_source::TextureSource;
use crate::util::tracing_wrappers::{trace, warn};

/// A recursive split is allowed to cross at most two face boundaries:
/// the primary overflow, then (once) a corner propagation into the
/// diagonal neighbor. Any deeper overflow indicates a kernel wider than
/// the width-4 builders ever produce, so it is clipped away rather than
/// followed further.
const MAX_SPLIT_DEPTH: u8 = 2;

/// Which 1-D reconstruction kernel a [`SeparableFilter`] builds, and
/// with what parameters. A tagged variant rather than a boxed closure,
/// since the closures the width-4 family needs (cubic coefficients or
/// the fixed Gaussian) are both free functions / cheap-to-copy structs.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Builder {
    Box,
    Bilinear,
    Width4Cubic(CubicCoeffs),
    Width4Gaussian,
}

impl Builder {
    fn build(&self, face_res: Res, u: f32, v: f32, uw: f32, vw: f32) -> SeparableKernel {
        match self {
            Builder::Box => builders::build_box(face_res, u, v, uw, vw),
            Builder::Bilinear => builders::build_bilinear(face_res, u, v, uw, vw),
            Builder::Width4Cubic(c) => builders::build_width4(face_res, u, v, uw, vw, &|x| c.eval(x)),
            Builder::Width4Gaussian => builders::build_width4(face_res, u, v, uw, vw, &builders::gaussian),
        }
    }
}

/// Cross-face separable kernel filter. Shared driver for box, bilinear
/// and every width-4 builder; the only thing that varies between filter
/// kinds is which [`Builder`] populates the initial kernel.
pub struct SeparableFilter<'a, S: TextureSource> {
    source: &'a S,
    builder: Builder,
}

impl<'a, S: TextureSource> SeparableFilter<'a, S> {
    pub(crate) fn new(source: &'a S, builder: Builder) -> Self {
        Self { source, builder }
    }

    #[allow(clippy::too_many_arguments)]
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, result)))]
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
        if is_degenerate(self.source, face_id, first_chan, n_chan) {
            return;
        }
        trace!(face_id, u, v, uw, vw, "separable filter eval");

        let n = n_chan as usize;
        let face = self.source.face_info(face_id);
        if face.is_constant() {
            self.source
                .get_constant_pixel(face_id, &mut result[..n], first_chan, n_chan);
            return;
        }

        let mut kernel = self.builder.build(face.res, u, v, uw, vw);
        if kernel.res != face.res {
            kernel.adjust_res(face.res);
        }

        result[..n].fill(0.0);
        let mut weight = 0.0f64;
        self.accumulate(face_id, face, kernel, first_chan, n_chan, result, &mut weight, 0);

        if weight > 0.0 {
            let inv = (1.0 / weight) as f32;
            for r in result[..n].iter_mut() {
                *r *= inv;
            }
        }
        // weight == 0: footprint landed entirely outside the addressable
        // surface (every piece fell off a boundary with no neighbor).
        // Leaving the already-zeroed buffer is the documented outcome.
    }

    /// Splits `kernel` (in `face`'s local coordinates) against any axis
    /// it overflows, recursing into the relevant neighbor for each
    /// overflowing piece, then applies whatever remains in-bounds
    /// against `face` itself. U is split before V so a corner overflow
    /// reaches the diagonal neighbor through exactly one path (via
    /// whichever axis's neighbor recursion handles the leftover V/U
    /// overflow), never both.
    #[allow(clippy::too_many_arguments)]
    fn accumulate(
        &self,
        face_id: i32,
        face: &FaceInfo,
        mut kernel: SeparableKernel,
        first_chan: i32,
        n_chan: i32,
        result: &mut [f32],
        weight: &mut f64,
        depth: u8,
    ) {
        if depth >= MAX_SPLIT_DEPTH {
            // A correctly-built kernel never reaches this: the width-4
            // large-width fallback caps any single-face overflow to one
            // neighbor, and a corner can only ever touch one more. Clip
            // defensively instead of recursing further.
            kernel.clip_u(0, face.res.u());
            kernel.clip_v(0, face.res.v());
        } else {
            if let Some(piece) = kernel.split_u_left() {
                self.dispatch_piece(face, Edge::Left, piece, first_chan, n_chan, result, weight, depth);
            }
            if let Some(piece) = kernel.split_u_right() {
                self.dispatch_piece(face, Edge::Right, piece, first_chan, n_chan, result, weight, depth);
            }
            if let Some(piece) = kernel.split_v_bottom() {
                self.dispatch_piece(face, Edge::Bottom, piece, first_chan, n_chan, result, weight, depth);
            }
            if let Some(piece) = kernel.split_v_top() {
                self.dispatch_piece(face, Edge::Top, piece, first_chan, n_chan, result, weight, depth);
            }
        }

        if kernel.uw == 0 || kernel.vw == 0 {
            return;
        }
        if face.is_constant() {
            kernel.apply_const_from_source(self.source, face_id, first_chan, n_chan, result);
        } else {
            kernel.apply(self.source, face_id, first_chan, n_chan, result);
        }
        *weight += kernel.weight();
    }

    /// Reorients a split-off piece into the neighbor joined at `edge`
    /// and recurses, or discards it if the edge has no neighbor
    /// (reducing the effective weight sum — the documented behavior for
    /// a footprint that spills off the addressable surface).
    #[allow(clippy::too_many_arguments)]
    fn dispatch_piece(
        &self,
        face: &FaceInfo,
        edge: Edge,
        mut piece: SeparableKernel,
        first_chan: i32,
        n_chan: i32,
        result: &mut [f32],
        weight: &mut f64,
        depth: u8,
    ) {
        let Some(neighbor_id) = face.neighbor(edge) else {
            warn!(edge = ?edge, "dropping kernel piece: no neighbor at boundary");
            return;
        };
        let neighbor = self.source.face_info(neighbor_id);
        let their_edge = face.adjedge(edge);

        // Reorient in the piece's own working resolution first (a pure
        // coordinate-frame change), then resample to the neighbor's
        // actual resolution if it differs — e.g. a subface T-junction,
        // where `adjust_res` doubles or halves the footprint the same
        // way it does for any other working-resolution mismatch. Which
        // quadrant of a coarser parent a subface occupies isn't carried
        // by this crate's narrow `TextureSource` interface, so the
        // origin after `adjust_res` is the quadrant-0 mapping; see
        // DESIGN.md.
        let working_res = piece.res;
        piece.reorient_to_neighbor(edge, their_edge, working_res);
        if piece.res != neighbor.res {
            piece.adjust_res(neighbor.res);
        }

        self.accumulate(
            neighbor_id,
            neighbor,
            piece,
            first_chan,
            n_chan,
            result,
            weight,
            depth + 1,
        );
    }
}
