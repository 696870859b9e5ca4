use std::fmt;

use ndarray::Array2;

use crate::color::process::process_color;
use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{MgcError, Result};

/// A single image channel.
/// Pixel values are f32, nominally in [0.0, 1.0].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Same bit depth, new pixel data.
    pub fn with_data(&self, data: Array2<f32>) -> Self {
        Self::new(data, self.original_bit_depth)
    }
}

/// Color image composed of separate channel frames.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorFrame {
    pub red: Frame,
    pub green: Frame,
    pub blue: Frame,
}

impl ColorFrame {
    pub fn channels(&self) -> [&Frame; 3] {
        [&self.red, &self.green, &self.blue]
    }
}

/// Image shape: rows, columns and channel count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl Shape {
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}

/// A mono or RGB image flowing through the correction pipeline.
#[derive(Clone, Debug, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum Image {
    Mono(Frame),
    Color(ColorFrame),
}

impl Image {
    pub fn shape(&self) -> Shape {
        match self {
            Self::Mono(f) => Shape {
                height: f.height(),
                width: f.width(),
                channels: 1,
            },
            Self::Color(cf) => Shape {
                height: cf.red.height(),
                width: cf.red.width(),
                channels: COLOR_CHANNEL_COUNT,
            },
        }
    }

    pub fn width(&self) -> usize {
        self.shape().width
    }

    pub fn height(&self) -> usize {
        self.shape().height
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Self::Color(_))
    }

    /// Channel frames in R, G, B order (a single frame for mono).
    pub fn channels(&self) -> Vec<&Frame> {
        match self {
            Self::Mono(f) => vec![f],
            Self::Color(cf) => cf.channels().to_vec(),
        }
    }

    /// Clamp every sample into [0, 1] without rescaling.
    pub fn truncated(&self) -> Image {
        match self {
            Self::Mono(f) => Self::Mono(truncate(f)),
            Self::Color(cf) => Self::Color(process_color(cf, truncate)),
        }
    }
}

impl From<Frame> for Image {
    fn from(frame: Frame) -> Self {
        Self::Mono(frame)
    }
}

impl From<ColorFrame> for Image {
    fn from(color: ColorFrame) -> Self {
        Self::Color(color)
    }
}

/// Clamp a frame to [0, 1]. Out-of-range samples are clipped, not rescaled.
pub fn truncate(frame: &Frame) -> Frame {
    frame.with_data(frame.data.mapv(|v| v.clamp(0.0, 1.0)))
}

/// Fail with `DimensionMismatch` unless both images have the same shape.
///
/// Every channel plane of both images is checked, not only the first.
pub fn ensure_same_shape(expected: &Image, actual: &Image) -> Result<()> {
    ensure_consistent_channels(expected)?;
    ensure_consistent_channels(actual)?;
    let (e, a) = (expected.shape(), actual.shape());
    if e != a {
        return Err(MgcError::DimensionMismatch {
            expected: e.to_string(),
            actual: a.to_string(),
        });
    }
    Ok(())
}

/// Fail with `DimensionMismatch` when the image has zero area.
pub fn ensure_non_empty(image: &Image) -> Result<()> {
    let shape = image.shape();
    if shape.is_empty() {
        return Err(MgcError::DimensionMismatch {
            expected: "non-empty image".into(),
            actual: shape.to_string(),
        });
    }
    ensure_consistent_channels(image)
}

fn ensure_consistent_channels(image: &Image) -> Result<()> {
    let shape = image.shape();
    for ch in image.channels() {
        if ch.data.dim() != (shape.height, shape.width) {
            return Err(MgcError::DimensionMismatch {
                expected: format!("{}x{}", shape.width, shape.height),
                actual: format!("{}x{}", ch.width(), ch.height()),
            });
        }
    }
    Ok(())
}

/// Allocate a zeroed plane, reporting failure instead of aborting.
pub fn alloc_plane(height: usize, width: usize) -> Result<Array2<f32>> {
    let len = height
        .checked_mul(width)
        .ok_or_else(|| MgcError::AllocationFailure(format!("{width}x{height} plane")))?;
    let mut buf: Vec<f32> = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| MgcError::AllocationFailure(format!("{width}x{height} plane")))?;
    buf.resize(len, 0.0);
    Array2::from_shape_vec((height, width), buf)
        .map_err(|e| MgcError::AllocationFailure(e.to_string()))
}
