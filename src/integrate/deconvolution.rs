//! Ramp-filter deconvolution integration
//!
//! Least-squares inversion of the differentiation operator: the gradient
//! spectra are combined against the transfer functions of the derivative
//! kernels and divided by their total power plus a small stabilizer. With
//! the default ramp transfer functions (2πi·u, 2πi·v) this is equivalent to
//! spectral integration; custom transfer functions allow inverting other
//! differentiation kernels.
//!
//! Adapted from Tripathi et al., "Single-view phase retrieval of an extended
//! sample by exploiting edge detection and sparsity", Opt. Express 24(21),
//! 2016.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::fft::{fft2d, fftfreq, idx2d, ifft2d};

use super::anchor_to_center;

/// Stabilizer added to the transfer-function power spectrum
const STABILIZER: f64 = 1e-5;

/// Integrate a gradient pair by ramp-filter deconvolution
///
/// # Arguments
/// * `grad_y`, `grad_x` - Gradient components (ny * nx), row-major
/// * `ny`, `nx` - Array dimensions
/// * `transfer` - Optional (tf_y, tf_x) transfer functions, each ny * nx;
///   the ramp functions 2πi·u and 2πi·v are used when absent
/// * `bc_center` - Phase value the center pixel is anchored to
///
/// # Returns
/// Phase field (ny * nx)
pub fn deconvolve_gradients(
    grad_y: &[f64],
    grad_x: &[f64],
    ny: usize, nx: usize,
    transfer: Option<(&[Complex64], &[Complex64])>,
    bc_center: f64,
) -> Vec<f64> {
    let n_total = ny * nx;

    let mut f_gy: Vec<Complex64> = grad_y.iter().map(|&g| Complex64::new(g, 0.0)).collect();
    let mut f_gx: Vec<Complex64> = grad_x.iter().map(|&g| Complex64::new(g, 0.0)).collect();
    fft2d(&mut f_gy, ny, nx);
    fft2d(&mut f_gx, ny, nx);

    let u = fftfreq(ny, 1.0);
    let v = fftfreq(nx, 1.0);

    let mut field = vec![Complex64::new(0.0, 0.0); n_total];
    for r in 0..ny {
        for c in 0..nx {
            let i = idx2d(r, c, nx);
            let (tf_y, tf_x) = match transfer {
                Some((ty, tx)) => (ty[i], tx[i]),
                None => (
                    Complex64::new(0.0, 2.0 * PI * u[r]),
                    Complex64::new(0.0, 2.0 * PI * v[c]),
                ),
            };
            let power = tf_y.norm_sqr() + tf_x.norm_sqr() + STABILIZER;
            field[i] = (f_gy[i] * tf_y + f_gx[i] * tf_x) / power;
        }
    }

    ifft2d(&mut field, ny, nx);

    let mut out: Vec<f64> = field.iter().map(|z| -z.re).collect();
    anchor_to_center(&mut out, ny, nx, bc_center);
    out
}
