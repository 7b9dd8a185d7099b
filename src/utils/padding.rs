//! Reflect padding for FFT boundary handling
//!
//! Spectral operations treat the image as periodic, so a bare crop boundary
//! becomes a jump discontinuity and rings. Padding by reflection keeps the
//! field continuous across the seam (zero padding would not).

use crate::fft::idx2d;

/// Map an out-of-range index into [0, n) by mirror reflection
///
/// Matches numpy's `reflect` mode: the edge sample is not repeated
/// (-1 maps to 1, n maps to n-2). Handles pads wider than the axis.
#[inline]
fn reflect_index(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let mut i = i.rem_euclid(period) as usize;
    if i >= n {
        i = period as usize - i;
    }
    i
}

/// Pad a 2D array by mirror reflection
///
/// # Arguments
/// * `data` - Input array (ny * nx), row-major
/// * `ny`, `nx` - Original dimensions
/// * `pad_y`, `pad_x` - Samples added on each side of the respective axis
///
/// # Returns
/// Padded array of size (ny + 2*pad_y) * (nx + 2*pad_x)
pub fn pad_reflect_2d<T: Copy>(
    data: &[T],
    ny: usize, nx: usize,
    pad_y: usize, pad_x: usize,
) -> Vec<T> {
    let new_ny = ny + 2 * pad_y;
    let new_nx = nx + 2 * pad_x;
    let mut padded = Vec::with_capacity(new_ny * new_nx);

    for r in 0..new_ny {
        let src_r = reflect_index(r as isize - pad_y as isize, ny);
        for c in 0..new_nx {
            let src_c = reflect_index(c as isize - pad_x as isize, nx);
            padded.push(data[idx2d(src_r, src_c, nx)]);
        }
    }

    padded
}

/// Extract the centered original-sized region from a padded array
///
/// # Arguments
/// * `padded` - Padded array, row-major
/// * `padded_ny`, `padded_nx` - Padded dimensions
/// * `pad_y`, `pad_x` - Padding widths that were applied on each side
///
/// # Returns
/// Array of size (padded_ny - 2*pad_y) * (padded_nx - 2*pad_x)
pub fn crop_2d<T: Copy>(
    padded: &[T],
    padded_ny: usize, padded_nx: usize,
    pad_y: usize, pad_x: usize,
) -> Vec<T> {
    let ny = padded_ny - 2 * pad_y;
    let nx = padded_nx - 2 * pad_x;
    let mut data = Vec::with_capacity(ny * nx);

    for r in 0..ny {
        for c in 0..nx {
            data.push(padded[idx2d(r + pad_y, c + pad_x, padded_nx)]);
        }
    }

    data
}
