//! Default render parameter values and their validation/sanitization.

use crate::models::SampleMode;
use serde::Deserialize;

/// Fallback values used when the corresponding command-line flags are omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    /// Sampling mode ("color" or "normal_map").
    pub mode: SampleMode,

    /// Multisample level; -1 derives the level from the source/target size ratio.
    pub multisample: i32,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            mode: SampleMode::Color,
            multisample: -1,
        }
    }
}

impl RenderDefaults {
    /// Clamp out-of-range values, returning a warning per adjustment.
    pub(crate) fn sanitize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !(-1..=100).contains(&self.multisample) {
            let clamped = self.multisample.clamp(-1, 100);
            warnings.push(format!(
                "Default multisample level {} out of range, clamping to {}",
                self.multisample, clamped
            ));
            self.multisample = clamped;
        }

        warnings
    }
}
