use ndarray::Zip;

use crate::color::process::try_zip_image;
use crate::error::Result;
use crate::frame::{alloc_plane, ensure_same_shape, Frame, Image};
use crate::multiscale::median::frame_median;

use super::gradient::GradientMap;

/// corrected = target - gradient + median(gradient), truncated to [0, 1].
///
/// Re-adding the median keeps the overall level; only spatial variation is
/// removed. The gradient map is consumed.
pub fn apply_correction(original_target: &Image, gradient: GradientMap) -> Result<Image> {
    let gradient = gradient.into_image();
    ensure_same_shape(original_target, &gradient)?;
    try_zip_image(original_target, &gradient, correct_channel)
}

fn correct_channel(target: &Frame, gradient: &Frame) -> Result<Frame> {
    let level = frame_median(gradient)?;
    let mut out = alloc_plane(target.height(), target.width())?;
    Zip::from(&mut out)
        .and(&target.data)
        .and(&gradient.data)
        .par_for_each(|o, &t, &g| {
            *o = (t - g + level).clamp(0.0, 1.0);
        });
    Ok(target.with_data(out))
}
