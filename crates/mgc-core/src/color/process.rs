use crate::error::{MgcError, Result};
use crate::frame::{ColorFrame, Frame, Image};

/// Apply a processing function to each channel of a color frame independently.
pub fn process_color<F>(color: &ColorFrame, mut process_fn: F) -> ColorFrame
where
    F: FnMut(&Frame) -> Frame,
{
    ColorFrame {
        red: process_fn(&color.red),
        green: process_fn(&color.green),
        blue: process_fn(&color.blue),
    }
}

/// Fallible per-channel processing with the three channels run in parallel.
pub fn try_process_color_parallel<F>(color: &ColorFrame, process_fn: F) -> Result<ColorFrame>
where
    F: Fn(&Frame) -> Result<Frame> + Sync,
{
    let (red, (green, blue)) = rayon::join(
        || process_fn(&color.red),
        || rayon::join(|| process_fn(&color.green), || process_fn(&color.blue)),
    );
    Ok(ColorFrame {
        red: red?,
        green: green?,
        blue: blue?,
    })
}

/// Run `process_fn` on every channel of an image, keeping the mono/color layout.
pub fn try_process_image<F>(image: &Image, process_fn: F) -> Result<Image>
where
    F: Fn(&Frame) -> Result<Frame> + Sync,
{
    match image {
        Image::Mono(f) => Ok(Image::Mono(process_fn(f)?)),
        Image::Color(cf) => Ok(Image::Color(try_process_color_parallel(cf, process_fn)?)),
    }
}

/// Combine two images channel by channel. A mono/color mix is a
/// `DimensionMismatch`.
pub fn try_zip_image<F>(a: &Image, b: &Image, combine_fn: F) -> Result<Image>
where
    F: Fn(&Frame, &Frame) -> Result<Frame> + Sync,
{
    match (a, b) {
        (Image::Mono(fa), Image::Mono(fb)) => Ok(Image::Mono(combine_fn(fa, fb)?)),
        (Image::Color(ca), Image::Color(cb)) => {
            let (red, (green, blue)) = rayon::join(
                || combine_fn(&ca.red, &cb.red),
                || {
                    rayon::join(
                        || combine_fn(&ca.green, &cb.green),
                        || combine_fn(&ca.blue, &cb.blue),
                    )
                },
            );
            Ok(Image::Color(ColorFrame {
                red: red?,
                green: green?,
                blue: blue?,
            }))
        }
        _ => Err(MgcError::DimensionMismatch {
            expected: a.shape().to_string(),
            actual: b.shape().to_string(),
        }),
    }
}

/// Create a ColorFrame from three separate mono frames.
pub fn from_channels(red: Frame, green: Frame, blue: Frame) -> ColorFrame {
    ColorFrame { red, green, blue }
}
