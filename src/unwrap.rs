//! Phase unwrapping for complex 2D images
//!
//! Recovers a continuous phase map from a complex field without ever reading
//! the wrapped principal-value angle directly. The pipeline is a single
//! linear pass: condition (normalize, pad, vignette) → phase gradient →
//! gradient integration → crop. Every call is a pure function of its inputs
//! and configuration; no state survives between calls.

use num_complex::Complex64;

use crate::condition::{condition_image, WeightMap};
use crate::error::UnwrapError;
use crate::gradient::{phase_gradient, GradientMethod};
use crate::integrate::{integrate_gradients, IntegrationMethod};
use crate::utils::padding::crop_2d;

/// Configuration for a phase unwrapping pass
///
/// Set once and passed per call; never mutated mid-call.
#[derive(Debug, Clone)]
pub struct UnwrapConfig {
    /// Phase gradient strategy
    pub grad_method: GradientMethod,
    /// Gradient integration strategy
    pub integration_method: IntegrationMethod,
    /// Weight multiplied into the image before normalization
    pub weight_map: WeightMap,
    /// Reflect padding per axis applied before spectral operations
    pub padding: (usize, usize),
    /// Width of the vignette taper at the padded border
    pub vignette_margin: usize,
    /// Sigma of the Gaussian smoothing the vignette ramp
    pub vignette_sigma: f64,
    /// Stabilizer for the amplitude division during normalization
    pub eps: f64,
}

impl Default for UnwrapConfig {
    fn default() -> Self {
        UnwrapConfig {
            grad_method: GradientMethod::default(),
            integration_method: IntegrationMethod::default(),
            weight_map: WeightMap::default(),
            padding: (64, 64),
            vignette_margin: 10,
            vignette_sigma: 2.5,
            eps: 1e-9,
        }
    }
}

/// Unwrap the phase of a complex 2D image
///
/// The returned phase field has the same shape as the input and is anchored
/// so its center pixel equals the phase of the input's center pixel.
///
/// Discrete integration runs on gradients cropped back to the input shape,
/// since cumulative sums would drag padded samples into every interior
/// pixel; the spectral integrators run on the padded gradients and the
/// result is cropped afterwards.
///
/// # Arguments
/// * `img` - Complex image (ny * nx), row-major
/// * `ny`, `nx` - Image dimensions
/// * `config` - Strategy selection and conditioning parameters
///
/// # Returns
/// Unwrapped phase (ny * nx)
pub fn unwrap_phase(
    img: &[Complex64],
    ny: usize, nx: usize,
    config: &UnwrapConfig,
) -> Result<Vec<f64>, UnwrapError> {
    if ny == 0 || nx == 0 || img.len() != ny * nx {
        return Err(UnwrapError::ShapeMismatch {
            expected: ny * nx,
            actual: img.len(),
        });
    }
    // Fail on bad configuration before any array work
    config.grad_method.validate()?;
    config.weight_map.validate(ny * nx)?;

    let (pad_y, pad_x) = config.padding;
    let cond = condition_image(
        img, ny, nx,
        &config.weight_map,
        pad_y, pad_x,
        config.vignette_margin, config.vignette_sigma,
        config.eps,
    )?;

    let (gy, gx) = phase_gradient(&cond.image, cond.ny, cond.nx, &config.grad_method)?;

    let phase = match config.integration_method {
        IntegrationMethod::Discrete => {
            let gy = crop_2d(&gy, cond.ny, cond.nx, pad_y, pad_x);
            let gx = crop_2d(&gx, cond.ny, cond.nx, pad_y, pad_x);
            integrate_gradients(&gy, &gx, ny, nx, &config.integration_method, cond.bc_center)
        }
        _ => {
            let full = integrate_gradients(
                &gy, &gx,
                cond.ny, cond.nx,
                &config.integration_method,
                cond.bc_center,
            );
            crop_2d(&full, cond.ny, cond.nx, pad_y, pad_x)
        }
    };

    Ok(phase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::idx2d;
    use std::f64::consts::PI;

    const GRAD_METHODS: [GradientMethod; 3] = [
        GradientMethod::FourierShift { step: 0.5 },
        GradientMethod::FourierDifferentiation,
        GradientMethod::Nearest,
    ];
    const INTEGRATION_METHODS: [IntegrationMethod; 3] = [
        IntegrationMethod::Discrete,
        IntegrationMethod::Fourier,
        IntegrationMethod::Deconvolution,
    ];

    fn config_for(grad: GradientMethod, integration: IntegrationMethod) -> UnwrapConfig {
        UnwrapConfig {
            grad_method: grad,
            integration_method: integration,
            ..UnwrapConfig::default()
        }
    }

    /// Per-combination accuracy bounds. Cumulative summation accumulates
    /// error along the path; the Fourier-shift strategy leaves ±π products
    /// dangling on the vignette-zeroed border, which the spectral
    /// integrators smear slightly into the interior.
    fn tolerance_for(grad: GradientMethod, integration: IntegrationMethod) -> f64 {
        match (grad, integration) {
            (_, IntegrationMethod::Discrete) => 0.2,
            (GradientMethod::FourierShift { .. }, _) => 0.15,
            _ => 0.1,
        }
    }

    fn image_from_phase(phase: &[f64]) -> Vec<Complex64> {
        phase.iter().map(|&p| Complex64::from_polar(1.0, p)).collect()
    }

    fn smooth_phase(ny: usize, nx: usize) -> Vec<f64> {
        let wy = 2.0 * PI / ny as f64;
        let wx = 2.0 * PI / nx as f64;
        (0..ny * nx)
            .map(|i| {
                let (r, c) = (i / nx, i % nx);
                0.4 * (wy * r as f64).sin() * (wx * c as f64).cos()
            })
            .collect()
    }

    #[test]
    fn test_flat_phase_unwraps_to_zero() {
        let ny = 64;
        let nx = 64;
        let img = vec![Complex64::new(1.0, 0.0); ny * nx];

        for grad in GRAD_METHODS {
            for integration in INTEGRATION_METHODS {
                let out = unwrap_phase(&img, ny, nx, &config_for(grad, integration))
                    .expect("flat phase should unwrap");
                assert_eq!(out.len(), ny * nx);
                // Exact-zero gradients everywhere except the Fourier-shift
                // strategy feeding a spectral integrator, where the dangling
                // border products leave a small residue.
                let tol = match (grad, integration) {
                    (GradientMethod::FourierShift { .. }, IntegrationMethod::Fourier)
                    | (GradientMethod::FourierShift { .. }, IntegrationMethod::Deconvolution) => 0.15,
                    _ => 1e-6,
                };
                for (i, &p) in out.iter().enumerate() {
                    assert!(
                        p.abs() < tol,
                        "{:?}/{:?}: expected 0 at {}, got {}",
                        grad, integration, i, p
                    );
                }
            }
        }
    }

    #[test]
    fn test_round_trip_smooth_phase() {
        let ny = 64;
        let nx = 64;
        let phi = smooth_phase(ny, nx);
        let img = image_from_phase(&phi);

        for grad in GRAD_METHODS {
            for integration in INTEGRATION_METHODS {
                let out = unwrap_phase(&img, ny, nx, &config_for(grad, integration))
                    .expect("smooth phase should unwrap");
                let tol = tolerance_for(grad, integration);
                for i in 0..ny * nx {
                    assert!(
                        (out[i] - phi[i]).abs() < tol,
                        "{:?}/{:?}: phase mismatch at {}: expected {}, got {}",
                        grad, integration, i, phi[i], out[i]
                    );
                }
            }
        }
    }

    #[test]
    fn test_linear_ramp() {
        let ny = 64;
        let nx = 64;
        let phi: Vec<f64> = (0..ny * nx).map(|i| 0.01 * (i % nx) as f64).collect();
        let img = image_from_phase(&phi);

        for grad in GRAD_METHODS {
            for integration in INTEGRATION_METHODS {
                let out = unwrap_phase(&img, ny, nx, &config_for(grad, integration))
                    .expect("ramp should unwrap");
                // Anchoring pins the center pixel to its input phase, which
                // for this unwrapped ramp is the ramp value itself.
                let tol = tolerance_for(grad, integration);
                for i in 0..ny * nx {
                    assert!(
                        (out[i] - phi[i]).abs() < tol,
                        "{:?}/{:?}: ramp mismatch at {}: expected {}, got {}",
                        grad, integration, i, phi[i], out[i]
                    );
                }
            }
        }
    }

    #[test]
    fn test_wrap_invariance() {
        // Adding 2πk (integer k) to the phase leaves the complex field, and
        // therefore the unwrapped result, unchanged.
        let ny = 48;
        let nx = 48;
        let phi = smooth_phase(ny, nx);
        let img_plain = image_from_phase(&phi);
        let img_wrapped: Vec<Complex64> = phi
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let k = ((i % 5) as f64) - 2.0;
                Complex64::from_polar(1.0, p + 2.0 * PI * k)
            })
            .collect();

        // The fully linear spectral pair keeps the comparison free of the
        // noise-floor threshold, which could flip on borderline products.
        let config = config_for(
            GradientMethod::FourierDifferentiation,
            IntegrationMethod::Fourier,
        );
        let out_plain = unwrap_phase(&img_plain, ny, nx, &config).unwrap();
        let out_wrapped = unwrap_phase(&img_wrapped, ny, nx, &config).unwrap();

        for i in 0..ny * nx {
            assert!(
                (out_plain[i] - out_wrapped[i]).abs() < 1e-6,
                "Wrapped input diverged at {}: {} vs {}",
                i, out_plain[i], out_wrapped[i]
            );
        }
    }

    #[test]
    fn test_boundary_anchoring() {
        let ny = 32;
        let nx = 32;
        let phi = smooth_phase(ny, nx);
        let img = image_from_phase(&phi);
        let center_phase = img[idx2d(ny / 2, nx / 2, nx)].arg();

        for integration in INTEGRATION_METHODS {
            let out = unwrap_phase(
                &img, ny, nx,
                &config_for(GradientMethod::default(), integration),
            )
            .unwrap();
            assert!(
                (out[idx2d(ny / 2, nx / 2, nx)] - center_phase).abs() < 1e-9,
                "{:?}: center pixel {} must equal the input center phase {}",
                integration,
                out[idx2d(ny / 2, nx / 2, nx)],
                center_phase
            );
        }
    }

    #[test]
    fn test_zero_magnitude_block_is_robust() {
        let ny = 64;
        let nx = 64;
        let phi = smooth_phase(ny, nx);
        let mut img = image_from_phase(&phi);
        for r in 20..32 {
            for c in 20..32 {
                img[idx2d(r, c, nx)] = Complex64::new(0.0, 0.0);
            }
        }

        for grad in GRAD_METHODS {
            for integration in INTEGRATION_METHODS {
                let out = unwrap_phase(&img, ny, nx, &config_for(grad, integration))
                    .expect("zero block must not error");
                for (i, &p) in out.iter().enumerate() {
                    assert!(
                        p.is_finite(),
                        "{:?}/{:?}: non-finite output at {}",
                        grad, integration, i
                    );
                }
            }
        }
    }

    #[test]
    fn test_shape_preservation() {
        for &(ny, nx) in &[(48usize, 80usize), (33, 47)] {
            let phi = smooth_phase(ny, nx);
            let img = image_from_phase(&phi);

            let out = unwrap_phase(&img, ny, nx, &UnwrapConfig::default()).unwrap();
            assert_eq!(out.len(), ny * nx, "Output shape must match input for {}x{}", ny, nx);
            assert!(out.iter().all(|p| p.is_finite()));
        }
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let img = vec![Complex64::new(1.0, 0.0); 10];
        let err = unwrap_phase(&img, 4, 4, &UnwrapConfig::default()).unwrap_err();
        assert_eq!(err, UnwrapError::ShapeMismatch { expected: 16, actual: 10 });

        let err = unwrap_phase(&img, 0, 10, &UnwrapConfig::default()).unwrap_err();
        assert!(matches!(err, UnwrapError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_invalid_step_rejected_before_work() {
        let img = vec![Complex64::new(1.0, 0.0); 16];
        let config = config_for(
            GradientMethod::FourierShift { step: 0.0 },
            IntegrationMethod::Fourier,
        );
        let err = unwrap_phase(&img, 4, 4, &config).unwrap_err();
        assert_eq!(err, UnwrapError::InvalidShiftStep(0.0));
    }

    #[test]
    fn test_weight_map_mismatch_rejected() {
        let img = vec![Complex64::new(1.0, 0.0); 16];
        let config = UnwrapConfig {
            weight_map: WeightMap::Map(vec![1.0; 9]),
            ..UnwrapConfig::default()
        };
        let err = unwrap_phase(&img, 4, 4, &config).unwrap_err();
        assert_eq!(err, UnwrapError::WeightMapShape { expected: 16, actual: 9 });
    }

    #[test]
    fn test_weighted_unwrap_runs() {
        let ny = 32;
        let nx = 32;
        let phi = smooth_phase(ny, nx);
        let img = image_from_phase(&phi);
        // Downweight a band of rows; result must stay finite and anchored
        let weights: Vec<f64> = (0..ny * nx)
            .map(|i| if (i / nx) < 4 { 0.2 } else { 1.0 })
            .collect();

        let config = UnwrapConfig {
            weight_map: WeightMap::Map(weights),
            ..UnwrapConfig::default()
        };
        let out = unwrap_phase(&img, ny, nx, &config).unwrap();
        assert_eq!(out.len(), ny * nx);
        assert!(out.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_no_padding_configuration() {
        // With zero padding the pipeline skips the pad/vignette step and the
        // crop becomes a no-op; results stay finite and correctly shaped.
        let ny = 32;
        let nx = 32;
        let phi = smooth_phase(ny, nx);
        let img = image_from_phase(&phi);

        let config = UnwrapConfig {
            padding: (0, 0),
            ..UnwrapConfig::default()
        };
        let out = unwrap_phase(&img, ny, nx, &config).unwrap();
        assert_eq!(out.len(), ny * nx);
        assert!(out.iter().all(|p| p.is_finite()));
    }
}
