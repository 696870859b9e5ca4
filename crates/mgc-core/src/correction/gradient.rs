use ndarray::Zip;

use crate::color::process::try_zip_image;
use crate::error::Result;
use crate::frame::{alloc_plane, ensure_non_empty, ensure_same_shape, Frame, Image};
use crate::multiscale::median::frame_median;

use super::params::CorrectionParameters;

/// Estimated large-scale gradient of the target, consumed by the corrector.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientMap(Image);

impl GradientMap {
    pub fn image(&self) -> &Image {
        &self.0
    }

    pub fn into_image(self) -> Image {
        self.0
    }
}

impl From<Image> for GradientMap {
    fn from(image: Image) -> Self {
        Self(image)
    }
}

/// gradient = target_ls - k * (reference_ls - median(reference_ls)), truncated to [0, 1].
///
/// The median is taken per channel. With k = 0 the map equals the
/// decomposed target.
pub fn estimate_gradient(
    decomposed_reference: &Image,
    decomposed_target: &Image,
    params: &CorrectionParameters,
) -> Result<GradientMap> {
    params.validate()?;
    ensure_non_empty(decomposed_target)?;
    ensure_same_shape(decomposed_target, decomposed_reference)?;

    let k = params.k;
    let map = try_zip_image(decomposed_target, decomposed_reference, |target, reference| {
        gradient_channel(target, reference, k)
    })?;
    Ok(GradientMap(map))
}

fn gradient_channel(target: &Frame, reference: &Frame, k: f32) -> Result<Frame> {
    let reference_median = frame_median(reference)?;
    let mut out = alloc_plane(target.height(), target.width())?;
    Zip::from(&mut out)
        .and(&target.data)
        .and(&reference.data)
        .par_for_each(|o, &t, &r| {
            *o = (t - k * (r - reference_median)).clamp(0.0, 1.0);
        });
    Ok(target.with_data(out))
}
