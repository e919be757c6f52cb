// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::face::Edge;
use crate::res::Res;
use crate::texture_source::TextureSource;

/// Largest weight-array length a kernel can hold. Width-4 builders
/// produce footprints of 2, 4, 6 or 8; box produces 1..=3.
///
/// `SeparableKernel::adjust_res` can in principle be asked to upsize
/// across an arbitrarily large number of log2 steps — not just the
/// single subface step this constant was originally sized for — e.g.
/// a wide box or width-4 filter (half-width near its clamp ceiling)
/// sampled against a high-resolution face. Each upsize step that would
/// double past this bound first drops the texels farthest from the
/// kernel's own center (see `SeparableKernel::shrink_to_fit_u/v`),
/// folding their weight out of the running sum the same way a missing
/// neighbor already does, so `adjust_res` always terminates within
/// this bound instead of indexing out of range.
pub const MAX_WEIGHTS: usize = 16;

/// Max channels processed per texel fetch inside [`SeparableKernel::apply`].
/// Channel counts above this are handled by looping in batches, so this
/// is a performance knob, not a hard limit on `n_chan`.
const MAX_CHANNELS: usize = 16;

/// An axis-aligned, separable reconstruction kernel: an integer texel
/// footprint `[u, u+uw) x [v, v+vw)` at a given working `res`, with
/// per-axis weight vectors `ku`/`kv` such that the 2-D weight at
/// `(i, j)` is `ku[i] * kv[j]`.
///
/// Constructed per `eval` call by a [`crate::filter`] builder, mutated
/// in place by the driver while it clips and splits the footprint
/// across face boundaries, and discarded when the call returns.
#[derive(Clone, Copy, Debug)]
pub struct SeparableKernel {
    pub res: Res,
    pub u: i32,
    pub v: i32,
    pub uw: usize,
    pub vw: usize,
    pub ku: [f64; MAX_WEIGHTS],
    pub kv: [f64; MAX_WEIGHTS],
}

fn opposite(edge: Edge) -> Edge {
    Edge::from_index((edge.index() + 2) % 4)
}

impl SeparableKernel {
    pub fn valid(&self) -> bool {
        self.uw > 0
            && self.vw > 0
            && self.ku[..self.uw].iter().all(|w| w.is_finite())
            && self.kv[..self.vw].iter().all(|w| w.is_finite())
    }

    /// Sum over the outer product of `ku` and `kv`. Correct both
    /// before and after clipping, since clipping removes entries from
    /// the arrays directly rather than masking them.
    pub fn weight(&self) -> f64 {
        let su: f64 = self.ku[..self.uw].iter().sum();
        let sv: f64 = self.kv[..self.vw].iter().sum();
        su * sv
    }

    /// Fetches every in-footprint texel from `source` and accumulates
    /// `ku[i] * kv[j] * pixel` into `result`. The caller (the driver)
    /// must have already clipped this kernel to `[0, res.u()) x [0,
    /// res.v())` — texels outside that range are never requested.
    pub fn apply<S: TextureSource>(
        &self,
        source: &S,
        face_id: i32,
        first_chan: i32,
        n_chan: i32,
        result: &mut [f32],
    ) {
        let mut chan_offset = 0i32;
        while chan_offset < n_chan {
            let batch = (n_chan - chan_offset).min(MAX_CHANNELS as i32);
            let mut pixel = [0.0f32; MAX_CHANNELS];
            for i in 0..self.uw {
                let wu = self.ku[i];
                if wu == 0.0 {
                    continue;
                }
                for j in 0..self.vw {
                    let w = wu * self.kv[j];
                    if w == 0.0 {
                        continue;
                    }
                    source.get_pixel(
                        face_id,
                        self.u + i as i32,
                        self.v + j as i32,
                        &mut pixel[..batch as usize],
                        first_chan + chan_offset,
                        batch,
                    );
                    let base = chan_offset as usize;
                    for c in 0..batch as usize {
                        result[base + c] += (w as f32) * pixel[c];
                    }
                }
            }
            chan_offset += batch;
        }
    }

    /// Accumulates this kernel's weight sum times a known-constant
    /// face color, avoiding any per-texel fetch.
    pub fn apply_const(&self, const_pixel: &[f32], result: &mut [f32]) {
        let w = self.weight() as f32;
        for (r, &c) in result.iter_mut().zip(const_pixel.iter()) {
            *r += w * c;
        }
    }

    /// Like [`Self::apply_const`], but fetches the constant pixel from
    /// `source` itself (used when a split-off piece lands on a
    /// neighbor face that is flagged constant, so no per-texel fetch
    /// is issued for that piece either).
    pub fn apply_const_from_source<S: TextureSource>(
        &self,
        source: &S,
        face_id: i32,
        first_chan: i32,
        n_chan: i32,
        result: &mut [f32],
    ) {
        let w = self.weight() as f32;
        let mut chan_offset = 0i32;
        while chan_offset < n_chan {
            let batch = (n_chan - chan_offset).min(MAX_CHANNELS as i32);
            let mut pixel = [0.0f32; MAX_CHANNELS];
            source.get_constant_pixel(
                face_id,
                &mut pixel[..batch as usize],
                first_chan + chan_offset,
                batch,
            );
            let base = chan_offset as usize;
            for c in 0..batch as usize {
                result[base + c] += w * pixel[c];
            }
            chan_offset += batch;
        }
    }

    /// Crops the footprint to `[a, b)` along u, dropping leading and
    /// trailing weights. No-op if already within range.
    pub fn clip_u(&mut self, a: i32, b: i32) {
        while self.uw > 0 && self.u < a {
            self.ku.copy_within(1..self.uw, 0);
            self.uw -= 1;
            self.u += 1;
        }
        while self.uw > 0 && self.u + self.uw as i32 > b {
            self.uw -= 1;
        }
    }

    /// Crops the footprint to `[a, b)` along v, symmetric to `clip_u`.
    pub fn clip_v(&mut self, a: i32, b: i32) {
        while self.vw > 0 && self.v < a {
            self.kv.copy_within(1..self.vw, 0);
            self.vw -= 1;
            self.v += 1;
        }
        while self.vw > 0 && self.v + self.vw as i32 > b {
            self.vw -= 1;
        }
    }

    /// Peels off the portion of the footprint with `u < 0` into a new
    /// kernel (still expressed in this face's local, negative-u
    /// coordinates), trimming `self` to `u >= 0`. `None` if nothing
    /// overflows on this side.
    pub fn split_u_left(&mut self) -> Option<SeparableKernel> {
        if self.u >= 0 || self.uw == 0 {
            return None;
        }
        let split_w = ((-self.u) as usize).min(self.uw);
        let mut left = *self;
        left.uw = split_w;
        self.ku.copy_within(split_w..self.uw, 0);
        self.u += split_w as i32;
        self.uw -= split_w;
        Some(left)
    }

    /// Peels off the portion of the footprint with `u >= res.u()` into
    /// a new kernel, trimming `self` to `u + uw <= res.u()`.
    pub fn split_u_right(&mut self) -> Option<SeparableKernel> {
        let bound = self.res.u();
        let end = self.u + self.uw as i32;
        if end <= bound || self.uw == 0 {
            return None;
        }
        let overflow_start = bound.max(self.u);
        let offset = (overflow_start - self.u) as usize;
        let split_w = self.uw - offset;
        let mut right = *self;
        right.u = overflow_start;
        right.uw = split_w;
        right.ku.copy_within(offset..self.uw, 0);
        self.uw = offset;
        Some(right)
    }

    /// Peels off the portion of the footprint with `v < 0`.
    pub fn split_v_bottom(&mut self) -> Option<SeparableKernel> {
        if self.v >= 0 || self.vw == 0 {
            return None;
        }
        let split_w = ((-self.v) as usize).min(self.vw);
        let mut bottom = *self;
        bottom.vw = split_w;
        self.kv.copy_within(split_w..self.vw, 0);
        self.v += split_w as i32;
        self.vw -= split_w;
        Some(bottom)
    }

    /// Peels off the portion of the footprint with `v >= res.v()`.
    pub fn split_v_top(&mut self) -> Option<SeparableKernel> {
        let bound = self.res.v();
        let end = self.v + self.vw as i32;
        if end <= bound || self.vw == 0 {
            return None;
        }
        let overflow_start = bound.max(self.v);
        let offset = (overflow_start - self.v) as usize;
        let split_w = self.vw - offset;
        let mut top = *self;
        top.v = overflow_start;
        top.vw = split_w;
        top.kv.copy_within(offset..self.vw, 0);
        self.vw = offset;
        Some(top)
    }

    /// Reverses the u axis in place: texel `u + i` becomes `res.u() -
    /// 1 - (u + i)`.
    pub fn flip_u(&mut self) {
        self.ku[..self.uw].reverse();
        self.u = self.res.u() - self.u - self.uw as i32;
    }

    /// Reverses the v axis in place, symmetric to `flip_u`.
    pub fn flip_v(&mut self) {
        self.kv[..self.vw].reverse();
        self.v = self.res.v() - self.v - self.vw as i32;
    }

    /// Cyclically reorients the kernel by `quarter_turns * 90`
    /// degrees (mod 4), swapping axes on odd turns. `self.res` is
    /// taken to be the current working resolution the footprint lives
    /// in; on odd turns the result's `res` has its axes swapped too.
    pub fn rotate(&mut self, quarter_turns: i32) {
        for _ in 0..quarter_turns.rem_euclid(4) {
            self.rotate90_ccw();
        }
    }

    fn rotate90_ccw(&mut self) {
        let old_res_u = self.res.u();
        let (u, v, uw, vw) = (self.u, self.v, self.uw, self.vw);

        let mut new_ku = [0.0; MAX_WEIGHTS];
        new_ku[..vw].copy_from_slice(&self.kv[..vw]);
        let mut new_kv = [0.0; MAX_WEIGHTS];
        for i in 0..uw {
            new_kv[i] = self.ku[uw - 1 - i];
        }

        self.u = v;
        self.uw = vw;
        self.ku = new_ku;
        self.v = old_res_u - u - uw as i32;
        self.vw = uw;
        self.kv = new_kv;
        self.res = Res::from_log2_unchecked(self.res.vlog2 as i32, self.res.ulog2 as i32);
    }

    /// Maps a split-off kernel piece (expressed in this face's local
    /// coordinates, overflowing across `my_edge`) into the coordinate
    /// frame of the face joined at that edge: translates the
    /// footprint into the neighbor's positive coordinate range, then
    /// composes whatever extra 90-degree rotation `their_edge` (the
    /// neighbor's edge index glued to `my_edge`, i.e.
    /// `FaceInfo::adjedge`) implies relative to the simple
    /// opposite-edge alignment.
    pub fn reorient_to_neighbor(&mut self, my_edge: Edge, their_edge: Edge, neighbor_res: Res) {
        match my_edge {
            Edge::Left => self.u += neighbor_res.u(),
            Edge::Right => self.u -= self.res.u(),
            Edge::Bottom => self.v += neighbor_res.v(),
            Edge::Top => self.v -= self.res.v(),
        }
        self.res = neighbor_res;

        let expected = opposite(my_edge);
        let quarter_turns = their_edge.index() as i32 - expected.index() as i32;
        self.rotate(quarter_turns);
    }

    /// Resamples the footprint from its current working resolution to
    /// `target`, one log2 step at a time: halving an axis pair-sums
    /// adjacent weights (downsize), doubling an axis splits each
    /// weight evenly between two zero-initialized companions
    /// (upsize). An even split is the symmetric value of the
    /// large-width fallback's Hermite smoothstep (`smoothstep(0.5, 0,
    /// 1) == 0.5`), since by the time a kernel reaches `adjust_res` no
    /// finer sub-texel position is retained to bias the split with.
    pub fn adjust_res(&mut self, target: Res) {
        while self.res.ulog2 != target.ulog2 {
            if target.ulog2 > self.res.ulog2 {
                self.upsize_u();
            } else {
                self.downsize_u();
            }
        }
        while self.res.vlog2 != target.vlog2 {
            if target.vlog2 > self.res.vlog2 {
                self.upsize_v();
            } else {
                self.downsize_v();
            }
        }
    }

    fn downsize_u(&mut self) {
        let new_u = self.u.div_euclid(2);
        let mut out = [0.0; MAX_WEIGHTS];
        let mut new_w = 0usize;
        for i in 0..self.uw {
            let old_index = self.u + i as i32;
            let ni = (old_index.div_euclid(2) - new_u) as usize;
            out[ni] += self.ku[i];
            new_w = new_w.max(ni + 1);
        }
        self.ku = out;
        self.u = new_u;
        self.uw = new_w;
        self.res = Res::from_log2_unchecked(self.res.ulog2 as i32 - 1, self.res.vlog2 as i32);
    }

    fn downsize_v(&mut self) {
        let new_v = self.v.div_euclid(2);
        let mut out = [0.0; MAX_WEIGHTS];
        let mut new_w = 0usize;
        for j in 0..self.vw {
            let old_index = self.v + j as i32;
            let nj = (old_index.div_euclid(2) - new_v) as usize;
            out[nj] += self.kv[j];
            new_w = new_w.max(nj + 1);
        }
        self.kv = out;
        self.v = new_v;
        self.vw = new_w;
        self.res = Res::from_log2_unchecked(self.res.ulog2 as i32, self.res.vlog2 as i32 - 1);
    }

    fn upsize_u(&mut self) {
        self.shrink_to_fit_u(MAX_WEIGHTS / 2);
        let mut out = [0.0; MAX_WEIGHTS];
        for i in 0..self.uw {
            out[2 * i] = self.ku[i] * 0.5;
            out[2 * i + 1] = self.ku[i] * 0.5;
        }
        self.ku = out;
        self.u *= 2;
        self.uw *= 2;
        self.res = Res::from_log2_unchecked(self.res.ulog2 as i32 + 1, self.res.vlog2 as i32);
    }

    fn upsize_v(&mut self) {
        self.shrink_to_fit_v(MAX_WEIGHTS / 2);
        let mut out = [0.0; MAX_WEIGHTS];
        for j in 0..self.vw {
            out[2 * j] = self.kv[j] * 0.5;
            out[2 * j + 1] = self.kv[j] * 0.5;
        }
        self.kv = out;
        self.v *= 2;
        self.vw *= 2;
        self.res = Res::from_log2_unchecked(self.res.ulog2 as i32, self.res.vlog2 as i32 + 1);
    }

    /// Drops texels from both ends of the u footprint, symmetrically,
    /// until at most `cap` remain, keeping the window centered on the
    /// kernel's own midpoint. Used only to keep `upsize_u` from
    /// doubling past `MAX_WEIGHTS`; the dropped weight is simply
    /// absent from `weight()` afterwards, which the driver already
    /// treats as a (partially) surviving-weight normalization, same as
    /// a kernel piece that falls off a boundary with no neighbor.
    fn shrink_to_fit_u(&mut self, cap: usize) {
        if self.uw <= cap {
            return;
        }
        let drop = self.uw - cap;
        let drop_left = drop / 2;
        let keep_end = self.uw - (drop - drop_left);
        self.ku.copy_within(drop_left..keep_end, 0);
        self.u += drop_left as i32;
        self.uw = cap;
    }

    /// Symmetric to `shrink_to_fit_u`.
    fn shrink_to_fit_v(&mut self, cap: usize) {
        if self.vw <= cap {
            return;
        }
        let drop = self.vw - cap;
        let drop_left = drop / 2;
        let keep_end = self.vw - (drop - drop_left);
        self.kv.copy_within(drop_left..keep_end, 0);
        self.v += drop_left as i32;
        self.vw = cap;
    }
}
