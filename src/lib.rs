//! PHASE-UNWRAP-WASM: WebAssembly-accelerated phase unwrapping
//!
//! This crate recovers the continuous (unwrapped) phase of a complex 2D
//! image for browser-based ptychographic reconstruction. The gradient of the
//! phase is computed from complex products rather than wrapped angles, then
//! integrated back with the branch-cut ambiguity resolved by a center-pixel
//! boundary condition.
//!
//! # Modules
//! - `fft`: 2D FFT operations using rustfft
//! - `condition`: normalization, reflect padding, and border vignetting
//! - `gradient`: phase gradient strategies (Fourier shift, spectral, nearest)
//! - `integrate`: gradient integration strategies (discrete, Fourier, deconvolution)
//! - `unwrap`: the unwrapping pipeline and its configuration
//! - `utils`: padding helpers

// Core modules
pub mod error;
pub mod fft;

// Algorithm modules
pub mod condition;
pub mod gradient;
pub mod integrate;
pub mod unwrap;
pub mod utils;

use num_complex::Complex64;
use wasm_bindgen::prelude::*;

use crate::condition::WeightMap;
use crate::gradient::GradientMethod;
use crate::integrate::IntegrationMethod;
use crate::unwrap::{unwrap_phase, UnwrapConfig};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[allow(unused_macros)]
macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn build_config(
    grad_method: &str,
    integration_method: &str,
    fourier_shift_step: f64,
    weight_map: WeightMap,
    eps: f64,
) -> Result<UnwrapConfig, JsValue> {
    let grad_method = GradientMethod::from_name(grad_method, fourier_shift_step)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let integration_method = IntegrationMethod::from_name(integration_method)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(UnwrapConfig {
        grad_method,
        integration_method,
        weight_map,
        eps,
        ..UnwrapConfig::default()
    })
}

fn run_unwrap(
    real: &[f64],
    imag: &[f64],
    ny: usize, nx: usize,
    config: &UnwrapConfig,
) -> Result<Vec<f64>, JsValue> {
    if real.len() != imag.len() {
        return Err(JsValue::from_str(&format!(
            "real and imaginary parts differ in length: {} vs {}",
            real.len(),
            imag.len()
        )));
    }

    let img: Vec<Complex64> = real
        .iter()
        .zip(imag.iter())
        .map(|(&re, &im)| Complex64::new(re, im))
        .collect();

    unwrap_phase(&img, ny, nx, config).map_err(|e| JsValue::from_str(&e.to_string()))
}

// ============================================================================
// WASM Exports: Phase Unwrapping
// ============================================================================

/// WASM-accessible phase unwrapping of a complex 2D image
///
/// # Arguments
/// * `real`, `imag` - Float64Arrays holding the complex image (ny * nx), row-major
/// * `ny`, `nx` - Image dimensions
/// * `grad_method` - "fourier_shift", "fourier_differentiation", or "nearest"
/// * `integration_method` - "discrete", "fourier", or "deconvolution"
/// * `fourier_shift_step` - Finite-difference step for the Fourier-shift method
/// * `eps` - Stabilizer for the amplitude normalization
///
/// # Returns
/// Unwrapped phase (ny * nx)
#[wasm_bindgen]
pub fn unwrap_phase_wasm(
    real: &[f64],
    imag: &[f64],
    ny: usize,
    nx: usize,
    grad_method: &str,
    integration_method: &str,
    fourier_shift_step: f64,
    eps: f64,
) -> Result<Vec<f64>, JsValue> {
    console_log!("WASM unwrap_phase: {}x{}, grad={}, integration={}",
                 ny, nx, grad_method, integration_method);

    let config = build_config(
        grad_method,
        integration_method,
        fourier_shift_step,
        WeightMap::default(),
        eps,
    )?;
    let phase = run_unwrap(real, imag, ny, nx, &config)?;

    console_log!("WASM unwrap_phase complete");
    Ok(phase)
}

/// Phase unwrapping with a per-pixel weight map
///
/// The weight map multiplies the image before normalization; values are
/// clamped to [0, 1]. Same contract as `unwrap_phase_wasm` otherwise.
#[wasm_bindgen]
pub fn unwrap_phase_weighted_wasm(
    real: &[f64],
    imag: &[f64],
    weight_map: &[f64],
    ny: usize,
    nx: usize,
    grad_method: &str,
    integration_method: &str,
    fourier_shift_step: f64,
    eps: f64,
) -> Result<Vec<f64>, JsValue> {
    console_log!("WASM unwrap_phase_weighted: {}x{}, grad={}, integration={}",
                 ny, nx, grad_method, integration_method);

    let config = build_config(
        grad_method,
        integration_method,
        fourier_shift_step,
        WeightMap::Map(weight_map.to_vec()),
        eps,
    )?;
    let phase = run_unwrap(real, imag, ny, nx, &config)?;

    console_log!("WASM unwrap_phase_weighted complete");
    Ok(phase)
}
