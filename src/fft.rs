//! FFT wrapper for 2D transforms using rustfft
//!
//! Provides 2D FFT/IFFT operations compatible with NumPy's FFT conventions.
//! Arrays are stored in row-major (C) order with shape (ny, nx) to match the
//! image convention of the calling reconstruction code.

use num_complex::Complex64;
use rustfft::{FftDirection, FftPlanner};
use std::f64::consts::PI;

/// Index into a 2D array stored in row-major (C) order
/// index = c + r*nx
#[inline(always)]
pub fn idx2d(r: usize, c: usize, nx: usize) -> usize {
    c + r * nx
}

/// 2D FFT (in-place, complex-to-complex)
///
/// Transforms data in row-major order with shape (ny, nx).
/// Matches numpy.fft.fft2 behavior.
pub fn fft2d(data: &mut [Complex64], ny: usize, nx: usize) {
    let mut planner = FftPlanner::new();

    // Transform along rows (contiguous, stride 1)
    let fft_row = planner.plan_fft(nx, FftDirection::Forward);
    let mut scratch_row = vec![Complex64::new(0.0, 0.0); fft_row.get_inplace_scratch_len()];
    for r in 0..ny {
        let start = idx2d(r, 0, nx);
        fft_row.process_with_scratch(&mut data[start..start + nx], &mut scratch_row);
    }

    // Transform along columns (stride nx)
    let fft_col = planner.plan_fft(ny, FftDirection::Forward);
    let mut scratch_col = vec![Complex64::new(0.0, 0.0); fft_col.get_inplace_scratch_len()];
    let mut buffer_col = vec![Complex64::new(0.0, 0.0); ny];
    for c in 0..nx {
        // Gather data along the column
        for r in 0..ny {
            buffer_col[r] = data[idx2d(r, c, nx)];
        }
        fft_col.process_with_scratch(&mut buffer_col, &mut scratch_col);
        // Scatter back
        for r in 0..ny {
            data[idx2d(r, c, nx)] = buffer_col[r];
        }
    }
}

/// 2D IFFT (in-place, complex-to-complex)
///
/// Transforms data in row-major order with shape (ny, nx).
/// Matches numpy.fft.ifft2 behavior (includes 1/N normalization).
pub fn ifft2d(data: &mut [Complex64], ny: usize, nx: usize) {
    let mut planner = FftPlanner::new();
    let n_total = (ny * nx) as f64;

    // Transform along rows (contiguous, stride 1)
    let ifft_row = planner.plan_fft(nx, FftDirection::Inverse);
    let mut scratch_row = vec![Complex64::new(0.0, 0.0); ifft_row.get_inplace_scratch_len()];
    for r in 0..ny {
        let start = idx2d(r, 0, nx);
        ifft_row.process_with_scratch(&mut data[start..start + nx], &mut scratch_row);
    }

    // Transform along columns (stride nx)
    let ifft_col = planner.plan_fft(ny, FftDirection::Inverse);
    let mut scratch_col = vec![Complex64::new(0.0, 0.0); ifft_col.get_inplace_scratch_len()];
    let mut buffer_col = vec![Complex64::new(0.0, 0.0); ny];
    for c in 0..nx {
        for r in 0..ny {
            buffer_col[r] = data[idx2d(r, c, nx)];
        }
        ifft_col.process_with_scratch(&mut buffer_col, &mut scratch_col);
        for r in 0..ny {
            data[idx2d(r, c, nx)] = buffer_col[r];
        }
    }

    // Normalize by 1/N (numpy convention)
    for val in data.iter_mut() {
        *val /= n_total;
    }
}

/// Generate FFT frequency values for a given dimension
/// Matches numpy.fft.fftfreq(n, d)
pub fn fftfreq(n: usize, d: f64) -> Vec<f64> {
    let mut freq = vec![0.0; n];
    let val = 1.0 / (n as f64 * d);

    if n % 2 == 0 {
        // Even: [0, 1, ..., n/2-1, -n/2, ..., -1]
        for i in 0..n / 2 {
            freq[i] = (i as f64) * val;
        }
        for i in n / 2..n {
            freq[i] = ((i as i64) - (n as i64)) as f64 * val;
        }
    } else {
        // Odd: [0, 1, ..., (n-1)/2, -(n-1)/2, ..., -1]
        for i in 0..=(n - 1) / 2 {
            freq[i] = (i as f64) * val;
        }
        for i in (n + 1) / 2..n {
            freq[i] = ((i as i64) - (n as i64)) as f64 * val;
        }
    }
    freq
}

/// Sub-pixel shift of a 2D complex image via a Fourier phase ramp
///
/// Multiplies the spectrum by exp(-2πi(u*shift_y + v*shift_x)), which moves
/// the image content by (shift_y, shift_x) pixels with periodic wrap-around.
///
/// If `strictly_preserve_zeros` is set, a mask of the exactly-zero pixels is
/// shifted by the same amount and every pixel the shifted mask touches is set
/// back to exactly zero. This prevents FFT round-off from turning exact zeros
/// into small dangling values whose phase is meaningless.
///
/// # Arguments
/// * `data` - Input image (ny * nx), row-major
/// * `ny`, `nx` - Array dimensions
/// * `shift_y`, `shift_x` - Shift in pixels (may be fractional)
/// * `strictly_preserve_zeros` - Re-zero pixels covered by the shifted zero mask
///
/// # Returns
/// Shifted image (ny * nx)
pub fn fourier_shift_2d(
    data: &[Complex64],
    ny: usize, nx: usize,
    shift_y: f64, shift_x: f64,
    strictly_preserve_zeros: bool,
) -> Vec<Complex64> {
    let zero_mask_shifted = if strictly_preserve_zeros {
        let mask: Vec<Complex64> = data.iter()
            .map(|&z| if z == Complex64::new(0.0, 0.0) {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            })
            .collect();
        Some(fourier_shift_2d(&mask, ny, nx, shift_y, shift_x, false))
    } else {
        None
    };

    let mut shifted = data.to_vec();
    fft2d(&mut shifted, ny, nx);

    let u = fftfreq(ny, 1.0);
    let v = fftfreq(nx, 1.0);
    for r in 0..ny {
        for c in 0..nx {
            let arg = -2.0 * PI * (u[r] * shift_y + v[c] * shift_x);
            shifted[idx2d(r, c, nx)] *= Complex64::from_polar(1.0, arg);
        }
    }

    ifft2d(&mut shifted, ny, nx);

    if let Some(mask) = zero_mask_shifted {
        for (s, m) in shifted.iter_mut().zip(mask.iter()) {
            if m.re > 0.0 {
                *s = Complex64::new(0.0, 0.0);
            }
        }
    }

    shifted
}

/// Wrap angle to [-π, π]
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    } else if a < -PI {
        a += 2.0 * PI;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fft_ifft_roundtrip() {
        let ny = 4;
        let nx = 6;

        let original: Vec<f64> = (0..ny * nx).map(|i| i as f64).collect();

        let mut data: Vec<Complex64> = original.iter()
            .map(|&x| Complex64::new(x, 0.0))
            .collect();

        fft2d(&mut data, ny, nx);
        ifft2d(&mut data, ny, nx);

        for (i, (&orig, result)) in original.iter().zip(data.iter()).enumerate() {
            assert!(
                (result.re - orig).abs() < 1e-10,
                "Mismatch at index {}: expected {}, got {}",
                i, orig, result.re
            );
            assert!(
                result.im.abs() < 1e-10,
                "Imaginary part not zero at index {}: {}",
                i, result.im
            );
        }
    }

    #[test]
    fn test_fftfreq() {
        // Test even n=4
        let freq = fftfreq(4, 1.0);
        assert!((freq[0] - 0.0).abs() < 1e-10);
        assert!((freq[1] - 0.25).abs() < 1e-10);
        assert!((freq[2] - (-0.5)).abs() < 1e-10);
        assert!((freq[3] - (-0.25)).abs() < 1e-10);

        // Test odd n=5
        let freq = fftfreq(5, 1.0);
        assert!((freq[0] - 0.0).abs() < 1e-10);
        assert!((freq[1] - 0.2).abs() < 1e-10);
        assert!((freq[2] - 0.4).abs() < 1e-10);
        assert!((freq[3] - (-0.4)).abs() < 1e-10);
        assert!((freq[4] - (-0.2)).abs() < 1e-10);
    }

    #[test]
    fn test_fourier_shift_integer_is_rotation() {
        let ny = 8;
        let nx = 8;
        let data: Vec<Complex64> = (0..ny * nx)
            .map(|i| Complex64::new((i as f64 * 0.37).sin(), (i as f64 * 0.11).cos()))
            .collect();

        let shifted = fourier_shift_2d(&data, ny, nx, 1.0, 0.0, false);

        // A shift of exactly one row equals a circular row rotation
        for r in 0..ny {
            let src = (r + ny - 1) % ny;
            for c in 0..nx {
                let expected = data[idx2d(src, c, nx)];
                let got = shifted[idx2d(r, c, nx)];
                assert!(
                    (got - expected).norm() < 1e-10,
                    "Shift mismatch at ({}, {}): expected {}, got {}",
                    r, c, expected, got
                );
            }
        }
    }

    #[test]
    fn test_fourier_shift_preserves_zeros() {
        let ny = 8;
        let nx = 8;
        let mut data = vec![Complex64::new(1.0, 0.5); ny * nx];
        for c in 0..nx {
            data[idx2d(3, c, nx)] = Complex64::new(0.0, 0.0);
        }

        let shifted = fourier_shift_2d(&data, ny, nx, 1.0, 0.0, true);

        // The zero row moved down by one and must still be exactly zero
        for c in 0..nx {
            let z = shifted[idx2d(4, c, nx)];
            assert_eq!(z, Complex64::new(0.0, 0.0), "Zero not preserved at column {}", c);
        }
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.0) - 0.0).abs() < 1e-10);
        assert!((wrap_angle(PI) - PI).abs() < 1e-10);
        assert!((wrap_angle(-PI) - (-PI)).abs() < 1e-10);
        assert!((wrap_angle(2.0 * PI) - 0.0).abs() < 1e-10);
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-10);
        assert!((wrap_angle(-3.0 * PI) - (-PI)).abs() < 1e-10);
    }
}
