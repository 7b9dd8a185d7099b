//! Discrete cumulative-sum integration
//!
//! Sums grad_y down the first column to build the left-edge profile, then
//! sums grad_x across each row on top of it. Exact for consistent gradients
//! but accumulates noise along the summation path, and padded regions would
//! bias every downstream pixel, so the caller must crop the gradients first.

use crate::fft::idx2d;

use super::anchor_to_center;

/// Integrate a gradient pair by row/column cumulative sums
///
/// # Arguments
/// * `grad_y`, `grad_x` - Gradient components (ny * nx), row-major, unpadded
/// * `ny`, `nx` - Array dimensions
/// * `bc_center` - Phase value the center pixel is anchored to
///
/// # Returns
/// Phase field (ny * nx)
pub fn discrete_integrate(
    grad_y: &[f64],
    grad_x: &[f64],
    ny: usize, nx: usize,
    bc_center: f64,
) -> Vec<f64> {
    let mut out = vec![0.0; ny * nx];

    let mut left_edge = 0.0;
    for r in 0..ny {
        left_edge += grad_y[idx2d(r, 0, nx)];
        let mut acc = 0.0;
        for c in 0..nx {
            acc += grad_x[idx2d(r, c, nx)];
            out[idx2d(r, c, nx)] = left_edge + acc;
        }
    }

    anchor_to_center(&mut out, ny, nx, bc_center);
    out
}
