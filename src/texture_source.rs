// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::face::{FaceInfo, MeshType};

/// The narrow interface the filter engine consumes. Tile storage,
/// on-disk parsing, caching and eviction all live on the other side of
/// this trait and are out of scope for this crate.
///
/// Implementations are expected to tolerate concurrent calls from
/// multiple filter `eval` invocations sharing one `TextureSource`, as
/// long as each caller uses an independent result buffer (see
/// `SeparableFilter` docs for the concurrency contract this implies).
pub trait TextureSource {
    fn mesh_type(&self) -> MeshType;
    fn num_faces(&self) -> i32;
    fn num_channels(&self) -> i32;
    fn face_info(&self, face_id: i32) -> &FaceInfo;

    /// Writes `n_chan` floats starting at `out[0]`. `ui`/`vi` are
    /// guaranteed by the caller to be in `[0, face.res.u()) x [0,
    /// face.res.v())`; a source whose own storage fails for some
    /// reason should write zeros rather than panic. Storage-layer
    /// errors are this trait's problem to handle, not the filter
    /// engine's.
    fn get_pixel(&self, face_id: i32, ui: i32, vi: i32, out: &mut [f32], first_chan: i32, n_chan: i32);

    /// Reads the constant pixel of a face flagged `FaceInfo::is_constant`.
    /// Default implementation just samples texel (0, 0), which is
    /// correct for a genuinely constant face and lets sources that
    /// never produce constant faces skip overriding this.
    fn get_constant_pixel(&self, face_id: i32, out: &mut [f32], first_chan: i32, n_chan: i32) {
        self.get_pixel(face_id, 0, 0, out, first_chan, n_chan)
    }
}
