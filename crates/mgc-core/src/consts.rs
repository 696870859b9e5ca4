/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default number of median detail layers removed before the residual is kept.
pub const DEFAULT_LAYER_COUNT: usize = 8;

/// Largest layer count the interactive tool offered. Higher values are allowed
/// but only warned about.
pub const MAX_TYPICAL_LAYER_COUNT: usize = 12;

/// Default gradient correction strength.
pub const DEFAULT_K: f32 = 0.2;

/// Side length of the dilated median stencil (5x5 samples).
pub const MEDIAN_STENCIL_SIZE: usize = 5;

/// The dilation of a layer never exceeds `axis_len / MAX_DILATION_DIVISOR`.
pub const MAX_DILATION_DIVISOR: usize = 4;

/// Suffix appended to the target id when the corrected image is stored.
pub const CORRECTED_SUFFIX: &str = "_corrected";

/// Number of channels in a color image (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;
