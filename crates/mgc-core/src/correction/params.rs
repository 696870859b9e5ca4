use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::DEFAULT_K;
use crate::error::{MgcError, Result};

/// Strength of the gradient correction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectionParameters {
    /// Scale factor applied to the reference's large-scale deviation.
    /// Nominal range [0, 1]; values above 1 over-subtract.
    pub k: f32,
}

impl Default for CorrectionParameters {
    fn default() -> Self {
        Self { k: DEFAULT_K }
    }
}

impl CorrectionParameters {
    pub fn new(k: f32) -> Self {
        Self { k }
    }

    /// Rejects non-finite k. Values outside [0, 1] are accepted with a warning.
    pub fn validate(&self) -> Result<()> {
        if !self.k.is_finite() {
            return Err(MgcError::InvalidParameter(format!(
                "k must be a finite number (got {})",
                self.k
            )));
        }
        if !(0.0..=1.0).contains(&self.k) {
            warn!(k = self.k, "Scale factor outside [0, 1]");
        }
        Ok(())
    }
}
