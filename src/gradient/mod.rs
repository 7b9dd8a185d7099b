//! Phase gradient estimation
//!
//! Computes the y/x spatial gradient of the *phase* of a complex image. The
//! gradient is taken as the phase of a complex finite difference (or the
//! imaginary part of a conjugate product), never as a finite difference of
//! the wrapped phase itself, which sidesteps the ±2π branch-cut jumps.
//!
//! Strategies:
//! - Fourier shift: sub-pixel ±step shifts, most numerically careful (default)
//! - Fourier differentiation: spectral derivative, no spatial shift
//! - Nearest: single-pixel finite difference, cheapest

pub mod fourier_diff;
pub mod fourier_shift;
pub mod gaussian;
pub mod nearest;

pub use fourier_diff::*;
pub use fourier_shift::*;
pub use gaussian::*;
pub use nearest::*;

use num_complex::Complex64;

use crate::error::UnwrapError;

/// Relative magnitude below which complex products count as noise
pub(crate) const NOISE_FLOOR: f64 = 1e-6;

/// Phase gradient strategy
///
/// The sub-pixel step only exists for the Fourier-shift strategy; the other
/// strategies take no parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientMethod {
    /// Sub-pixel Fourier shift finite difference with the given step
    FourierShift { step: f64 },
    /// Spectral differentiation via multiplication by 2πi·freq
    FourierDifferentiation,
    /// Single-pixel nearest-neighbor finite difference
    Nearest,
}

impl Default for GradientMethod {
    fn default() -> Self {
        GradientMethod::FourierShift { step: 0.5 }
    }
}

impl GradientMethod {
    /// Parse a strategy name as used by the calling reconstruction code
    pub fn from_name(name: &str, fourier_shift_step: f64) -> Result<Self, UnwrapError> {
        match name {
            "fourier_shift" => Ok(GradientMethod::FourierShift { step: fourier_shift_step }),
            "fourier_differentiation" => Ok(GradientMethod::FourierDifferentiation),
            "nearest" => Ok(GradientMethod::Nearest),
            _ => Err(UnwrapError::UnknownGradientMethod(name.to_string())),
        }
    }

    /// Reject configurations that cannot produce a gradient
    pub fn validate(&self) -> Result<(), UnwrapError> {
        match *self {
            GradientMethod::FourierShift { step } if !(step > 0.0 && step.is_finite()) => {
                Err(UnwrapError::InvalidShiftStep(step))
            }
            _ => Ok(()),
        }
    }
}

/// Compute the phase gradient of a complex image
///
/// # Arguments
/// * `img` - Complex image (ny * nx), row-major
/// * `ny`, `nx` - Array dimensions
/// * `method` - Gradient strategy
///
/// # Returns
/// (grad_y, grad_x), each ny * nx
pub fn phase_gradient(
    img: &[Complex64],
    ny: usize, nx: usize,
    method: &GradientMethod,
) -> Result<(Vec<f64>, Vec<f64>), UnwrapError> {
    method.validate()?;
    Ok(match *method {
        GradientMethod::FourierShift { step } => fourier_shift_gradient(img, ny, nx, step),
        GradientMethod::FourierDifferentiation => fourier_differentiation_gradient(img, ny, nx),
        GradientMethod::Nearest => nearest_gradient(img, ny, nx),
    })
}

/// Zero complex products whose magnitude falls below NOISE_FLOOR times the
/// maximum magnitude. Near-zero products carry meaningless phase (e.g. from
/// FFT round-off at zero-magnitude pixels); zeroing them biases the gradient
/// to 0 there instead of letting it dangle between -π and π.
pub(crate) fn apply_noise_floor(prod: &mut [Complex64]) {
    let max_mag = prod.iter().map(|z| z.norm()).fold(0.0, f64::max);
    if max_mag == 0.0 {
        return;
    }
    let floor = max_mag * NOISE_FLOOR;
    for z in prod.iter_mut() {
        if z.norm() < floor {
            *z = Complex64::new(0.0, 0.0);
        }
    }
}
