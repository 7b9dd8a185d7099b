//! Boundary conditioning for spectral phase analysis
//!
//! Prepares a complex image for FFT-based gradient and integration operators:
//! amplitude normalization (keeping only phase, scaled by an optional weight
//! map), capture of the center-pixel boundary condition, reflect padding, and
//! a Gaussian-ramp vignette that tapers the border to suppress spectral edge
//! artifacts.

use num_complex::Complex64;

use crate::error::UnwrapError;
use crate::fft::idx2d;
use crate::utils::padding::pad_reflect_2d;

/// Weight applied to the image before normalization
///
/// Values are clamped to [0, 1] at application time.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightMap {
    /// A single weight broadcast over the whole image
    Uniform(f64),
    /// A per-pixel weight map, same length as the image
    Map(Vec<f64>),
}

impl Default for WeightMap {
    fn default() -> Self {
        WeightMap::Uniform(1.0)
    }
}

impl WeightMap {
    /// Check the map length against the image length
    pub fn validate(&self, image_len: usize) -> Result<(), UnwrapError> {
        match self {
            WeightMap::Uniform(_) => Ok(()),
            WeightMap::Map(w) if w.len() == image_len => Ok(()),
            WeightMap::Map(w) => Err(UnwrapError::WeightMapShape {
                expected: image_len,
                actual: w.len(),
            }),
        }
    }

    #[inline]
    fn at(&self, i: usize) -> f64 {
        let w = match self {
            WeightMap::Uniform(w) => *w,
            WeightMap::Map(w) => w[i],
        };
        w.clamp(0.0, 1.0)
    }
}

/// A conditioned image ready for gradient estimation
pub struct Conditioned {
    /// Normalized, padded, vignetted image
    pub image: Vec<Complex64>,
    /// Padded dimensions
    pub ny: usize,
    pub nx: usize,
    /// Phase at the center pixel of the normalized, unpadded image
    pub bc_center: f64,
}

/// Strip amplitude variation, keeping phase scaled by the weight map
///
/// out[i] = w[i] * img[i] / (|img[i]| + eps)
///
/// The epsilon keeps zero-magnitude pixels at exactly zero instead of NaN.
pub fn normalize_image(img: &[Complex64], weight: &WeightMap, eps: f64) -> Vec<Complex64> {
    img.iter()
        .enumerate()
        .map(|(i, &z)| z * (weight.at(i) / (z.norm() + eps)))
        .collect()
}

/// Normalize, capture the boundary condition, pad, and vignette
///
/// The boundary condition is the phase of the center pixel (ny/2, nx/2) of
/// the normalized image, read before any padding. Padding and vignetting are
/// skipped when both padding widths are zero.
///
/// # Arguments
/// * `img` - Complex image (ny * nx), row-major
/// * `ny`, `nx` - Image dimensions
/// * `weight` - Weight map, validated against the image length
/// * `pad_y`, `pad_x` - Reflect padding widths per axis
/// * `margin`, `sigma` - Vignette ramp width and Gaussian smoothing sigma
/// * `eps` - Stabilizer for the magnitude division
pub fn condition_image(
    img: &[Complex64],
    ny: usize, nx: usize,
    weight: &WeightMap,
    pad_y: usize, pad_x: usize,
    margin: usize, sigma: f64,
    eps: f64,
) -> Result<Conditioned, UnwrapError> {
    weight.validate(ny * nx)?;

    let normalized = normalize_image(img, weight, eps);
    let bc_center = normalized[idx2d(ny / 2, nx / 2, nx)].arg();

    if pad_y == 0 && pad_x == 0 {
        return Ok(Conditioned { image: normalized, ny, nx, bc_center });
    }

    let padded_ny = ny + 2 * pad_y;
    let padded_nx = nx + 2 * pad_x;
    let mut padded = pad_reflect_2d(&normalized, ny, nx, pad_y, pad_x);
    vignette(&mut padded, padded_ny, padded_nx, margin, sigma);

    Ok(Conditioned {
        image: padded,
        ny: padded_ny,
        nx: padded_nx,
        bc_center,
    })
}

/// Taper the image border with a Gaussian-smoothed ramp
///
/// For each axis longer than 2*margin, the leading `margin` band is scaled by
/// a ramp rising from 0 at the edge to 1 in the interior, and the trailing
/// band by the reversed ramp.
pub fn vignette(img: &mut [Complex64], ny: usize, nx: usize, margin: usize, sigma: f64) {
    if margin == 0 {
        return;
    }
    let ramp = vignette_ramp(margin, sigma);

    if ny > 2 * margin {
        for j in 0..margin {
            let bottom = ny - 1 - j;
            for c in 0..nx {
                img[idx2d(j, c, nx)] *= ramp[j];
                img[idx2d(bottom, c, nx)] *= ramp[j];
            }
        }
    }

    if nx > 2 * margin {
        for j in 0..margin {
            let right = nx - 1 - j;
            for r in 0..ny {
                img[idx2d(r, j, nx)] *= ramp[j];
                img[idx2d(r, right, nx)] *= ramp[j];
            }
        }
    }
}

/// Build the vignette ramp: a step mask of width 2*margin convolved with a
/// normalized Gaussian window of length margin/2, cropped to the `margin`
/// samples covering the transition. Values below 1e-3 snap to exactly 0 so
/// negligible leakage does not propagate through later spectral operations.
fn vignette_ramp(margin: usize, sigma: f64) -> Vec<f64> {
    let g = margin / 2;
    if g == 0 {
        return vec![1.0; margin];
    }
    let win = gaussian_window(g, sigma);

    // Step mask over [0, 2*margin): zeros then ones, zero-extended outside.
    // conv[i] = sum_k win[k] * mask[i + k - g/2]; the ramp is conv[g..g+margin].
    let mut ramp = vec![0.0; margin];
    for (j, out) in ramp.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (k, &w) in win.iter().enumerate() {
            let pos = (g + j + k) as isize - (g / 2) as isize;
            if pos >= margin as isize && pos < 2 * margin as isize {
                acc += w;
            }
        }
        *out = if acc < 1e-3 { 0.0 } else { acc };
    }
    ramp
}

/// Gaussian window of the given length, normalized to unit sum
fn gaussian_window(len: usize, sigma: f64) -> Vec<f64> {
    let center = (len as f64 - 1.0) / 2.0;
    let mut win: Vec<f64> = (0..len)
        .map(|k| {
            let t = (k as f64 - center) / sigma;
            (-0.5 * t * t).exp()
        })
        .collect();
    let sum: f64 = win.iter().sum();
    for w in win.iter_mut() {
        *w /= sum;
    }
    win
}
