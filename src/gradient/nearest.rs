//! Nearest-neighbor finite differences
//!
//! Single-pixel differences with edge-replicated (clamped, not wrapped)
//! neighbors. Cheaper than the Fourier-shift strategy but more prone to
//! aliasing where the phase changes by close to π between adjacent pixels.

use num_complex::Complex64;

use super::apply_noise_floor;
use crate::fft::idx2d;

/// Finite-difference direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// img[i+1] - img[i]
    Forward,
    /// img[i] - img[i-1]
    Backward,
}

/// Nearest-neighbor complex difference along both axes
///
/// Out-of-range neighbors are edge-replicated, so the first (backward) or
/// last (forward) line of each axis gets a zero difference.
///
/// # Arguments
/// * `img` - Complex image (ny * nx), row-major
/// * `ny`, `nx` - Array dimensions
/// * `direction` - Forward or backward difference
///
/// # Returns
/// (diff_y, diff_x), each ny * nx
pub fn nearest_neighbor_difference(
    img: &[Complex64],
    ny: usize, nx: usize,
    direction: Direction,
) -> (Vec<Complex64>, Vec<Complex64>) {
    let n_total = ny * nx;
    let mut dy = vec![Complex64::new(0.0, 0.0); n_total];
    let mut dx = vec![Complex64::new(0.0, 0.0); n_total];

    for r in 0..ny {
        for c in 0..nx {
            let i = idx2d(r, c, nx);
            match direction {
                Direction::Forward => {
                    let rn = if r + 1 < ny { r + 1 } else { r };
                    let cn = if c + 1 < nx { c + 1 } else { c };
                    dy[i] = img[idx2d(rn, c, nx)] - img[i];
                    dx[i] = img[idx2d(r, cn, nx)] - img[i];
                }
                Direction::Backward => {
                    let rp = r.saturating_sub(1);
                    let cp = c.saturating_sub(1);
                    dy[i] = img[i] - img[idx2d(rp, c, nx)];
                    dx[i] = img[i] - img[idx2d(r, cp, nx)];
                }
            }
        }
    }

    (dy, dx)
}

/// Phase gradient by single-pixel backward differences
///
/// Forms img · conj(img shifted by one pixel) per axis, zeroes near-zero
/// products, and reads the gradient as the product phase over the one-pixel
/// baseline.
///
/// # Arguments
/// * `img` - Complex image (ny * nx), row-major
/// * `ny`, `nx` - Array dimensions
///
/// # Returns
/// (grad_y, grad_x), each ny * nx
pub fn nearest_gradient(img: &[Complex64], ny: usize, nx: usize) -> (Vec<f64>, Vec<f64>) {
    let n_total = ny * nx;

    let mut prod_y = vec![Complex64::new(0.0, 0.0); n_total];
    let mut prod_x = vec![Complex64::new(0.0, 0.0); n_total];
    for r in 0..ny {
        for c in 0..nx {
            let i = idx2d(r, c, nx);
            let rp = r.saturating_sub(1);
            let cp = c.saturating_sub(1);
            prod_y[i] = img[i] * img[idx2d(rp, c, nx)].conj();
            prod_x[i] = img[i] * img[idx2d(r, cp, nx)].conj();
        }
    }

    apply_noise_floor(&mut prod_y);
    apply_noise_floor(&mut prod_x);

    let gy = prod_y.iter().map(|z| z.arg()).collect();
    let gx = prod_x.iter().map(|z| z.arg()).collect();
    (gy, gx)
}
