//! Gaussian-derivative gradient for real images
//!
//! Separable derivative-of-Gaussian kernel with nearest-edge extension.
//! This operates on plain real images (not the complex-product phase
//! gradient); the surrounding analysis code uses it for smoothed gradients
//! of amplitude or already-unwrapped phase maps.

use crate::fft::idx2d;

/// Gradient of a real 2D image with a Gaussian-derivative kernel
///
/// Gradient magnitudes between 0 and 1e-6 are gated to exactly 0 so that
/// negligible responses do not masquerade as structure downstream.
///
/// # Arguments
/// * `img` - Real image (ny * nx), row-major
/// * `ny`, `nx` - Array dimensions
/// * `sigma` - Sigma of the Gaussian
/// * `kernel_size` - Kernel length (odd; 5 in the usual configuration)
///
/// # Returns
/// (grad_y, grad_x), each ny * nx
pub fn gaussian_gradient(
    img: &[f64],
    ny: usize, nx: usize,
    sigma: f64,
    kernel_size: usize,
) -> (Vec<f64>, Vec<f64>) {
    let kernel = derivative_of_gaussian(sigma, kernel_size);

    let mut gy = convolve_axis(img, ny, nx, &kernel, true);
    let mut gx = convolve_axis(img, ny, nx, &kernel, false);

    gate_small_magnitudes(&mut gy);
    gate_small_magnitudes(&mut gx);

    (gy, gx)
}

/// k(r) = -r / (sqrt(2π)·σ³) · exp(-r² / (2σ²)), r centered on the kernel
fn derivative_of_gaussian(sigma: f64, kernel_size: usize) -> Vec<f64> {
    let center = (kernel_size as f64 - 1.0) / 2.0;
    let norm = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * sigma.powi(3));
    (0..kernel_size)
        .map(|j| {
            let r = j as f64 - center;
            -r * norm * (-r * r / (2.0 * sigma * sigma)).exp()
        })
        .collect()
}

/// Convolve one axis with the kernel, nearest-edge extension
fn convolve_axis(
    img: &[f64],
    ny: usize, nx: usize,
    kernel: &[f64],
    along_y: bool,
) -> Vec<f64> {
    let center = kernel.len() / 2;
    let mut out = vec![0.0; ny * nx];

    for r in 0..ny {
        for c in 0..nx {
            let mut acc = 0.0;
            for (j, &k) in kernel.iter().enumerate() {
                // Convolution: the kernel is flipped relative to correlation
                let offset = center as isize - j as isize;
                let (sr, sc) = if along_y {
                    (clamp_index(r as isize + offset, ny), c)
                } else {
                    (r, clamp_index(c as isize + offset, nx))
                };
                acc += k * img[idx2d(sr, sc, nx)];
            }
            out[idx2d(r, c, nx)] = acc;
        }
    }

    out
}

#[inline]
fn clamp_index(i: isize, n: usize) -> usize {
    i.clamp(0, n as isize - 1) as usize
}

fn gate_small_magnitudes(g: &mut [f64]) {
    for v in g.iter_mut() {
        if *v != 0.0 && v.abs() < 1e-6 {
            *v = 0.0;
        }
    }
}
