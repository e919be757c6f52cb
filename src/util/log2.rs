// Copyright (c) the Ptex Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

/// `ceil(log2(1/x))` for `x` in `(0, 1]`, used to pick a working
/// resolution from a filter half-width. Returns 0 for `x >= 1.0`.
pub fn ceil_log2_inv(x: f64) -> i32 {
    if x <= 0.0 {
        return 0;
    }
    (1.0 / x).log2().ceil() as i32
}
