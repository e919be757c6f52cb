// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::filter::is_degenerate;
use crate::texture_source::TextureSource;
use crate::util::clamp;

/// Point evaluator for a triangular face: each face is a square grid
/// split along its diagonal into an "even" half-triangle (stored
/// lower-left) and an "odd" half-triangle (stored upper-right,
/// rotated 180 degrees). This is the only filter offered for the
/// `triangle` mesh type.
pub struct TriangleFilter<'a, S: TextureSource> {
    source: &'a S,
}

impl<'a, S: TextureSource> TriangleFilter<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn eval(
        &self,
        result: &mut [f32],
        first_chan: i32,
        n_chan: i32,
        face_id: i32,
        u: f32,
        v: f32,
        _uw: f32,
        _vw: f32,
    ) {
        if is_degenerate(self.source, face_id, first_chan, n_chan) {
            return;
        }
        let face = self.source.face_info(face_id);
        // Triangular faces are square: res.u() == res.v() is assumed.
        let res = face.res.u();
        let resm1 = res - 1;
        let ut = u * res as f32;
        let vt = v * res as f32;
        let ui = clamp(ut.floor() as i32, 0, resm1);
        let vi = clamp(vt.floor() as i32, 0, resm1);
        let uf = ut - ui as f32;
        let vf = vt - vi as f32;

        let (fetch_u, fetch_v) = if uf + vf <= 1.0 {
            (ui, vi)
        } else {
            (resm1 - vi, resm1 - ui)
        };
        self.source.get_pixel(
            face_id,
            fetch_u,
            fetch_v,
            &mut result[..n_chan as usize],
            first_chan,
            n_chan,
        );
    }
}
