pub mod corrector;
pub mod gradient;
pub mod params;

pub use corrector::apply_correction;
pub use gradient::{estimate_gradient, GradientMap};
pub use params::CorrectionParameters;
