// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::filter::is_degenerate;
use crate::res::Res;
use crate::texture_source::TextureSource;
use crate::util::clamp;

/// Nearest-texel lookup for quad faces. Never crosses a face boundary:
/// `(u, v)` is clamped into the face's own grid, so there is nothing
/// for a driver to split.
pub struct PointFilter<'a, S: TextureSource> {
    source: &'a S,
}

impl<'a, S: TextureSource> PointFilter<'a, S> {
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
        let (ui, vi) = texel_index(face.res, u, v);
        self.source
            .get_pixel(face_id, ui, vi, &mut result[..n_chan as usize], first_chan, n_chan);
    }
}

pub(crate) fn texel_index(res: Res, u: f32, v: f32) -> (i32, i32) {
    let ui = clamp((u * res.u() as f32).floor() as i32, 0, res.u() - 1);
    let vi = clamp((v * res.v() as f32).floor() as i32, 0, res.v() - 1);
    (ui, vi)
}
