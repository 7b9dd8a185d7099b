//! Gradient integration
//!
//! Reconstructs a scalar phase field from a (grad_y, grad_x) pair. All
//! strategies leave an arbitrary integration constant; each one finishes by
//! shifting the result so the center pixel equals the boundary-condition
//! value captured before padding.
//!
//! Strategies:
//! - Discrete: row/column cumulative sums (exact but path-sensitive; must
//!   run on cropped, unpadded gradients)
//! - Fourier: spectral inversion of the differentiation operator (default)
//! - Deconvolution: least-squares ramp-filter deconvolution with optional
//!   custom transfer functions

pub mod deconvolution;
pub mod discrete;
pub mod fourier;

pub use deconvolution::*;
pub use discrete::*;
pub use fourier::*;

use crate::error::UnwrapError;
use crate::fft::idx2d;

/// Gradient integration strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationMethod {
    /// Row/column cumulative sums on unpadded gradients
    Discrete,
    /// Spectral inversion of the differentiation operator
    Fourier,
    /// Least-squares ramp-filter deconvolution
    Deconvolution,
}

impl Default for IntegrationMethod {
    fn default() -> Self {
        IntegrationMethod::Fourier
    }
}

impl IntegrationMethod {
    /// Parse a strategy name as used by the calling reconstruction code
    pub fn from_name(name: &str) -> Result<Self, UnwrapError> {
        match name {
            "discrete" => Ok(IntegrationMethod::Discrete),
            "fourier" => Ok(IntegrationMethod::Fourier),
            "deconvolution" => Ok(IntegrationMethod::Deconvolution),
            _ => Err(UnwrapError::UnknownIntegrationMethod(name.to_string())),
        }
    }
}

/// Integrate a gradient pair into a phase field
///
/// # Arguments
/// * `grad_y`, `grad_x` - Gradient components (ny * nx), row-major
/// * `ny`, `nx` - Array dimensions
/// * `method` - Integration strategy
/// * `bc_center` - Phase value the center pixel is anchored to
///
/// # Returns
/// Phase field (ny * nx)
pub fn integrate_gradients(
    grad_y: &[f64],
    grad_x: &[f64],
    ny: usize, nx: usize,
    method: &IntegrationMethod,
    bc_center: f64,
) -> Vec<f64> {
    match method {
        IntegrationMethod::Discrete => discrete_integrate(grad_y, grad_x, ny, nx, bc_center),
        IntegrationMethod::Fourier => fourier_integrate(grad_y, grad_x, ny, nx, bc_center),
        IntegrationMethod::Deconvolution => {
            deconvolve_gradients(grad_y, grad_x, ny, nx, None, bc_center)
        }
    }
}

/// Shift the field so its center pixel equals the boundary condition
pub(crate) fn anchor_to_center(phase: &mut [f64], ny: usize, nx: usize, bc_center: f64) {
    let shift = bc_center - phase[idx2d(ny / 2, nx / 2, nx)];
    for p in phase.iter_mut() {
        *p += shift;
    }
}
