pub mod median;
pub mod median_transform;

pub use median::{image_median, mirror_index};
pub use median_transform::{decompose, decompose_cancellable, DecompositionParameters};
