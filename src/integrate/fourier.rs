//! Spectral (Fourier) integration
//!
//! Treats grad_x + i·grad_y as one complex field and divides its spectrum by
//! 2πi·(v + i·u), the exact inverse of the spectral differentiation
//! operator. The DC coefficient is zeroed explicitly; the integration
//! constant it would carry is supplied by the center-pixel anchor instead.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::fft::{fft2d, fftfreq, idx2d, ifft2d};

use super::anchor_to_center;

/// Integrate a gradient pair by spectral inversion
///
/// # Arguments
/// * `grad_y`, `grad_x` - Gradient components (ny * nx), row-major
/// * `ny`, `nx` - Array dimensions
/// * `bc_center` - Phase value the center pixel is anchored to
///
/// # Returns
/// Phase field (ny * nx)
pub fn fourier_integrate(
    grad_y: &[f64],
    grad_x: &[f64],
    ny: usize, nx: usize,
    bc_center: f64,
) -> Vec<f64> {
    let n_total = ny * nx;

    let mut field: Vec<Complex64> = (0..n_total)
        .map(|i| Complex64::new(grad_x[i], grad_y[i]))
        .collect();
    fft2d(&mut field, ny, nx);

    let u = fftfreq(ny, 1.0);
    let v = fftfreq(nx, 1.0);
    for r in 0..ny {
        for c in 0..nx {
            let i = idx2d(r, c, nx);
            if r == 0 && c == 0 {
                field[i] = Complex64::new(0.0, 0.0);
                continue;
            }
            // 2πi·(v + i·u) + small stabilizer against exact zeros
            let denom = Complex64::new(-2.0 * PI * u[r] + 1e-15, 2.0 * PI * v[c]);
            field[i] /= denom;
        }
    }

    ifft2d(&mut field, ny, nx);

    let mut out: Vec<f64> = field.iter().map(|z| z.re).collect();
    anchor_to_center(&mut out, ny, nx, bc_center);
    out
}
