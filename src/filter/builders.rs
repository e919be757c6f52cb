// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Kernel builders: populate a [`SeparableKernel`] in a face's local
//! coordinate space from a normalized sample location and filter
//! half-width. Each builder is a pure function of `(u, v, uw, vw,
//! face_res)`; the [`crate::filter::separable`] driver is responsible
//! for everything that happens to the kernel after it is built.

use crate::kernel::{SeparableKernel, MAX_WEIGHTS};
use crate::res::Res;
use crate::util::{ceil_log2_inv, clamp, smoothstep};

fn empty_kernel(res: Res) -> SeparableKernel {
    SeparableKernel {
        res,
        u: 0,
        v: 0,
        uw: 0,
        vw: 0,
        ku: [0.0; MAX_WEIGHTS],
        kv: [0.0; MAX_WEIGHTS],
    }
}

/// Single-texel footprint at the face's native resolution.
pub fn build_point(face_res: Res, u: f32, v: f32) -> SeparableKernel {
    let mut k = empty_kernel(face_res);
    let ui = clamp((u * face_res.u() as f32).floor() as i32, 0, face_res.u() - 1);
    let vi = clamp((v * face_res.v() as f32).floor() as i32, 0, face_res.v() - 1);
    k.u = ui;
    k.v = vi;
    k.uw = 1;
    k.vw = 1;
    k.ku[0] = 1.0;
    k.kv[0] = 1.0;
    k
}

/// Trapezoidal box filter: the kernel is the box convolved with the
/// texels as area samples, so interior weights are 1.0 and the two
/// edge weights are fractional texel coverage.
pub fn build_box(face_res: Res, u: f32, v: f32, uw: f32, vw: f32) -> SeparableKernel {
    let uw = clamp(uw, 1.0 / face_res.u() as f32, 1.0) as f64;
    let vw = clamp(vw, 1.0 / face_res.v() as f32, 1.0) as f64;

    let ureslog2 = ceil_log2_inv(uw);
    let vreslog2 = ceil_log2_inv(vw);
    let res = Res::from_log2_unchecked(ureslog2, vreslog2);

    let u = u as f64 * res.u() as f64;
    let v = v as f64 * res.v() as f64;
    let uw = uw * res.u() as f64;
    let vw = vw * res.v() as f64;

    let mut k = empty_kernel(res);
    let (ou, ow, kuw) = box_axis(u, uw);
    let (ov, ovw, kvw) = box_axis(v, vw);
    k.u = ou;
    k.uw = ow;
    k.ku = kuw;
    k.v = ov;
    k.vw = ovw;
    k.kv = kvw;
    k
}

fn box_axis(center: f64, width: f64) -> (i32, usize, [f64; MAX_WEIGHTS]) {
    let a = center - 0.5 * width;
    let b = center + 0.5 * width;
    let a_floor = a.floor();
    let b_ceil = b.ceil();
    let origin = a_floor as i32;
    let size = (b_ceil - a_floor) as usize;
    let f1 = 1.0 - (a - a_floor);
    let f2 = 1.0 - (b_ceil - b);
    let mut weights = [0.0; MAX_WEIGHTS];
    match size {
        0 => {}
        1 => weights[0] = f1 + f2 - 1.0,
        _ => {
            weights[0] = f1;
            for w in weights.iter_mut().take(size - 1).skip(1) {
                *w = 1.0;
            }
            weights[size - 1] = f2;
        }
    }
    (origin, size, weights)
}

/// Resolution-rounding bias for [`build_bilinear`]: `1 - log2(1/0.75)`.
/// Picks the working resolution whose filter-width period is closest
/// to the requested one, which in log2 terms means rounding up once
/// the fractional part exceeds `log2(1/0.75)`.
const BILINEAR_ROUND_BIAS: f64 = 0.5849625007211563;

/// Two-tap linear interpolation, with the working resolution chosen to
/// minimize signal-period error for the requested half-width.
pub fn build_bilinear(face_res: Res, u: f32, v: f32, uw: f32, vw: f32) -> SeparableKernel {
    let uw = clamp(uw, 1.0 / face_res.u() as f32, 1.0) as f64;
    let vw = clamp(vw, 1.0 / face_res.v() as f32, 1.0) as f64;

    let ureslog2 = ((1.0 / uw).log2() + BILINEAR_ROUND_BIAS) as i32;
    let vreslog2 = ((1.0 / vw).log2() + BILINEAR_ROUND_BIAS) as i32;
    let res = Res::from_log2_unchecked(ureslog2, vreslog2);

    let mut k = empty_kernel(res);
    let (ou, ku) = bilinear_axis(u as f64 * res.u() as f64);
    let (ov, kv) = bilinear_axis(v as f64 * res.v() as f64);
    k.u = ou;
    k.uw = 2;
    k.ku = ku;
    k.v = ov;
    k.vw = 2;
    k.kv = kv;
    k
}

fn bilinear_axis(pix: f64) -> (i32, [f64; MAX_WEIGHTS]) {
    let pix = pix - 0.5;
    let floor = pix.floor();
    let frac = pix - floor;
    let mut k = [0.0; MAX_WEIGHTS];
    k[0] = 1.0 - frac;
    k[1] = frac;
    (floor as i32, k)
}

/// Coefficients for the shared cubic family (B-spline / Catmull-Rom /
/// Mitchell / generic bicubic all share this piecewise formula,
/// parameterized by `B = 1 - sharpness`, `C = (1 - B) / 2`).
#[derive(Clone, Copy, Debug)]
pub struct CubicCoeffs {
    c: [f64; 7],
}

impl CubicCoeffs {
    pub fn from_sharpness(sharpness: f64) -> Self {
        let b = 1.0 - sharpness;
        Self {
            c: [
                1.5 - b,
                1.5 * b - 2.5,
                1.0 - b / 3.0,
                b / 3.0 - 0.5,
                2.5 - 1.5 * b,
                2.0 * b - 4.0,
                2.0 - 2.0 * b / 3.0,
            ],
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        let x = x.abs();
        let c = &self.c;
        if x < 1.0 {
            (c[0] * x + c[1]) * x * x + c[2]
        } else if x < 2.0 {
            ((c[3] * x + c[4]) * x + c[5]) * x + c[6]
        } else {
            0.0
        }
    }
}

/// `exp(-2x^2)`, the Gaussian member of the width-4 family.
pub fn gaussian(x: f64) -> f64 {
    (-2.0 * x * x).exp()
}

/// `uw > 0.5` is always handled by the single-level Hermite smoothstep
/// fallback; the dual-level branch is permanently disabled. See
/// DESIGN.md.
const FORCE_SINGLE_LEVEL_FALLBACK: bool = true;

/// Builds a width-4 (well, 2/4/6/8) separable kernel axis-by-axis from
/// a 1-D kernel function `k(x)`, used for the Gaussian and all three
/// pinned/generic cubics.
pub fn build_width4(
    face_res: Res,
    u: f32,
    v: f32,
    uw: f32,
    vw: f32,
    k: &dyn Fn(f64) -> f64,
) -> SeparableKernel {
    let (ureslog2, ou, ouw, ku) = build_width4_axis(face_res.ulog2, u, uw, k);
    let (vreslog2, ov, ovw, kv) = build_width4_axis(face_res.vlog2, v, vw, k);
    SeparableKernel {
        res: Res::from_log2_unchecked(ureslog2 as i32, vreslog2 as i32),
        u: ou,
        v: ov,
        uw: ouw,
        vw: ovw,
        ku,
        kv,
    }
}

fn build_width4_axis(
    face_reslog2: i8,
    pos: f32,
    width: f32,
    k: &dyn Fn(f64) -> f64,
) -> (i8, i32, usize, [f64; MAX_WEIGHTS]) {
    let pos = pos as f64;
    let mut weights = [0.0; MAX_WEIGHTS];

    if FORCE_SINGLE_LEVEL_FALLBACK && width as f64 > 0.5 {
        let upix = pos - 0.5;
        let ui = upix.floor();
        let k0 = 1.0 - smoothstep(upix - ui, 0.0, 1.0);
        weights[0] = k0;
        weights[1] = 1.0 - k0;
        return (0, ui as i32, 2, weights);
    }

    // Two sequential clamps, not one `clamp(v, lo, hi)`: `min_w` can
    // exceed 0.3125 on a 1- or 2-texel-wide face axis, and a single
    // `lo > hi` clamp would wrongly return `min_w` instead of 0.3125
    // for every reachable width in this branch (entered only when
    // `width <= 0.5`, which is always `< min_w` whenever `min_w` > 0.3125).
    let min_w = 1.0 / (1i64 << face_reslog2) as f64;
    let width = (width as f64).max(min_w).min(0.3125);

    let reslog2 = ceil_log2_inv(width) as i8;
    let res = (1i64 << reslog2) as f64;
    let upix = pos * res - 0.5;
    let uwpix = width * res;

    let dupix = 2.0 * uwpix;
    let u1 = (upix - dupix).ceil() as i32;
    let u2 = (upix + dupix).ceil() as i32;

    // klerp: blend the current working resolution towards the
    // next-lower one so the kernel doesn't alias as filter width
    // crosses a mip boundary.
    let uwhi = 2.0 / res;
    let uwlo = uwhi * 0.5;
    let lerp2 = (width - uwlo) / uwlo;
    let lerp1 = 1.0 - lerp2;

    // extend the footprint to an even pair via round-to-even on the
    // integer bounds rather than arithmetic rounding (see DESIGN.md).
    let u1 = u1 & !1;
    let u2 = (u2 + 1) & !1;
    let size = (u2 - u1) as usize;

    let step = 1.0 / uwpix;
    let x1 = (u1 as f64 - upix) * step;
    let mut i = 0;
    while i < size {
        let xa = x1 + i as f64 * step;
        let xb = xa + step;
        let xc = (xa + xb) * 0.5;
        let (ka, kb, kc) = (k(xa), k(xb), k(xc));
        weights[i] = ka * lerp1 + kc * lerp2;
        weights[i + 1] = kb * lerp1 + kc * lerp2;
        i += 2;
    }

    (reslog2, u1, size, weights)
}
