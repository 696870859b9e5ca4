use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayViewMut1, Axis};

use crate::consts::{MEDIAN_STENCIL_SIZE, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{MgcError, Result};
use crate::frame::{alloc_plane, Frame, Image};

const STENCIL_LEN: usize = MEDIAN_STENCIL_SIZE * MEDIAN_STENCIL_SIZE;
const STENCIL_HALF: isize = (MEDIAN_STENCIL_SIZE / 2) as isize;

/// Median of a slice, reordering it in place.
///
/// Uses `select_nth_unstable` for O(n) median without full sort. Even counts
/// return the mean of the two central samples.
pub fn median_of(values: &mut [f32]) -> Option<f32> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(values[0]);
    }
    let mid = n / 2;
    let upper = *values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b)).1;
    if n % 2 == 1 {
        Some(upper)
    } else {
        let lower = *values[..mid]
            .select_nth_unstable_by(mid - 1, |a, b| a.total_cmp(b))
            .1;
        Some((lower + upper) / 2.0)
    }
}

/// Median sample value of a frame.
pub fn frame_median(frame: &Frame) -> Result<f32> {
    let mut values: Vec<f32> = Vec::new();
    values
        .try_reserve_exact(frame.data.len())
        .map_err(|_| MgcError::AllocationFailure("median scratch buffer".into()))?;
    values.extend(frame.data.iter().copied());
    median_of(&mut values).ok_or_else(|| MgcError::DimensionMismatch {
        expected: "non-empty image".into(),
        actual: format!("{}x{}", frame.width(), frame.height()),
    })
}

/// Per-channel medians (one value for mono, R/G/B for color).
pub fn image_median(image: &Image) -> Result<Vec<f32>> {
    image.channels().into_iter().map(frame_median).collect()
}

/// 5x5 median filter with the sampling grid dilated by `row_step`/`col_step`.
///
/// Borders are mirrored. Parallelizes at the row level for planes of at least
/// `PARALLEL_PIXEL_THRESHOLD` pixels.
pub fn dilated_median_filter(
    data: &Array2<f32>,
    row_step: usize,
    col_step: usize,
) -> Result<Array2<f32>> {
    let (h, w) = data.dim();
    let mut result = alloc_plane(h, w)?;

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, out)| median_row(data, row, row_step, col_step, out));
    } else {
        for (row, out) in result.axis_iter_mut(Axis(0)).enumerate() {
            median_row(data, row, row_step, col_step, out);
        }
    }

    Ok(result)
}

fn median_row(
    data: &Array2<f32>,
    row: usize,
    row_step: usize,
    col_step: usize,
    mut out: ArrayViewMut1<f32>,
) {
    let (h, w) = data.dim();
    let mut src_rows = [0usize; MEDIAN_STENCIL_SIZE];
    for (i, src) in src_rows.iter_mut().enumerate() {
        let offset = (i as isize - STENCIL_HALF) * row_step as isize;
        *src = mirror_index(row as isize + offset, h);
    }

    let mut window = [0.0f32; STENCIL_LEN];
    for col in 0..w {
        let mut k = 0;
        for j in 0..MEDIAN_STENCIL_SIZE {
            let offset = (j as isize - STENCIL_HALF) * col_step as isize;
            let src_col = mirror_index(col as isize + offset, w);
            for &src_row in &src_rows {
                window[k] = data[[src_row, src_col]];
                k += 1;
            }
        }
        out[col] = *window
            .select_nth_unstable_by(STENCIL_LEN / 2, |a, b| a.total_cmp(b))
            .1;
    }
}

/// Mirror boundary handling: reflect index into [0, size).
/// Even function (f(-k) = f(k)) with period 2*size, ping-ponging within [0, size).
pub fn mirror_index(idx: isize, size: usize) -> usize {
    if size <= 1 {
        return 0;
    }
    let period = 2 * size;
    let abs_idx = idx.unsigned_abs();
    let m = abs_idx % period;

    if m < size {
        m
    } else {
        2 * size - 1 - m
    }
}
