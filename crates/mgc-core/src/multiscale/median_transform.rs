use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cancel::CancelToken;
use crate::color::process::try_process_image;
use crate::consts::{DEFAULT_LAYER_COUNT, MAX_DILATION_DIVISOR, MAX_TYPICAL_LAYER_COUNT};
use crate::error::{MgcError, Result};
use crate::frame::{alloc_plane, ensure_non_empty, Frame, Image};

use super::median::dilated_median_filter;

/// Parameters for the multiscale median decomposition.
///
/// Only the layer count affects the output; thresholds and masking are fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompositionParameters {
    /// Number of detail layers removed before the residual is kept (>= 1).
    pub layer_count: usize,
}

impl Default for DecompositionParameters {
    fn default() -> Self {
        Self {
            layer_count: DEFAULT_LAYER_COUNT,
        }
    }
}

impl DecompositionParameters {
    pub fn new(layer_count: usize) -> Self {
        Self { layer_count }
    }

    pub fn validate(&self) -> Result<()> {
        if self.layer_count < 1 {
            return Err(MgcError::InvalidParameter(format!(
                "layer count must be at least 1 (got {})",
                self.layer_count
            )));
        }
        if self.layer_count > MAX_TYPICAL_LAYER_COUNT {
            warn!(
                layers = self.layer_count,
                "Layer count above the typical range of {MAX_TYPICAL_LAYER_COUNT}"
            );
        }
        Ok(())
    }
}

/// Dilation of the median stencil along one axis at a given scale.
///
/// Doubles per layer (1, 2, 4, ...) and is capped at `axis_len / 4` so the
/// stencil never folds over the whole axis.
pub fn layer_dilation(scale: usize, axis_len: usize) -> usize {
    let cap = (axis_len / MAX_DILATION_DIVISOR).max(1);
    let step = 1usize.checked_shl(scale as u32).unwrap_or(usize::MAX);
    step.min(cap)
}

/// Median-smooth a plane at the given scale.
fn smooth(data: &Array2<f32>, scale: usize) -> Result<Array2<f32>> {
    let (h, w) = data.dim();
    dilated_median_filter(data, layer_dilation(scale, h), layer_dilation(scale, w))
}

/// `current - smoothed`, allocated fallibly.
fn detail_plane(current: &Array2<f32>, smoothed: &Array2<f32>) -> Result<Array2<f32>> {
    let (h, w) = current.dim();
    let mut detail = alloc_plane(h, w)?;
    Zip::from(&mut detail)
        .and(current)
        .and(smoothed)
        .for_each(|d, &c, &s| *d = c - s);
    Ok(detail)
}

/// Decompose a plane into median detail layers + residual.
///
/// Returns (detail_layers, residual) where the original can be reconstructed as:
/// original = sum(detail_layers) + residual
pub fn decompose_layers(
    data: &Array2<f32>,
    layer_count: usize,
) -> Result<(Vec<Array2<f32>>, Array2<f32>)> {
    DecompositionParameters::new(layer_count).validate()?;
    let mut layers = Vec::with_capacity(layer_count);

    let mut current = smooth(data, 0)?;
    layers.push(detail_plane(data, &current)?);
    for scale in 1..layer_count {
        let smoothed = smooth(&current, scale)?;
        layers.push(detail_plane(&current, &smoothed)?);
        current = smoothed;
    }

    Ok((layers, current))
}

/// Large-scale residual of a single frame after `layer_count` median layers.
///
/// The detail at each scale is `current - smoothed`; only the residual is kept.
pub fn low_pass_frame(
    frame: &Frame,
    layer_count: usize,
    cancel: Option<&CancelToken>,
) -> Result<Frame> {
    if layer_count < 1 {
        return Err(MgcError::InvalidParameter(
            "layer count must be at least 1 (got 0)".into(),
        ));
    }
    let check = || cancel.map_or(Ok(()), CancelToken::check);

    check()?;
    let mut current = smooth(&frame.data, 0)?;
    debug!(scale = 0, "Median layer extracted");
    for scale in 1..layer_count {
        check()?;
        current = smooth(&current, scale)?;
        debug!(scale, "Median layer extracted");
    }
    Ok(frame.with_data(current))
}

/// Reduce an image to its large-scale structure.
///
/// Color images are decomposed per channel. The input is not modified.
pub fn decompose(image: &Image, params: &DecompositionParameters) -> Result<Image> {
    decompose_cancellable(image, params, None)
}

/// `decompose` with a cancellation check before every layer.
pub fn decompose_cancellable(
    image: &Image,
    params: &DecompositionParameters,
    cancel: Option<&CancelToken>,
) -> Result<Image> {
    params.validate()?;
    ensure_non_empty(image)?;
    try_process_image(image, |frame| {
        low_pass_frame(frame, params.layer_count, cancel)
    })
}
