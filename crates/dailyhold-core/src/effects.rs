//! Completion celebration.
//!
//! A one-shot, fire-and-forget visual effect with fixed parameters. The
//! core only decides *when* to fire; what a burst of confetti looks like is
//! up to the host behind the [`Celebrator`] port.

use serde::{Deserialize, Serialize};

/// Parameters for the one-shot completion celebration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelebrationParams {
    pub particle_count: u32,
    /// Spread angle in degrees.
    pub spread: u32,
    /// Vertical origin, 0.0 (top) to 1.0 (bottom).
    pub origin_y: f64,
    pub colors: Vec<String>,
    pub disable_for_reduced_motion: bool,
}

impl Default for CelebrationParams {
    fn default() -> Self {
        Self {
            particle_count: 150,
            spread: 70,
            origin_y: 0.6,
            colors: vec!["#2d5446".into(), "#ffffff".into(), "#3e6b5a".into()],
            disable_for_reduced_motion: true,
        }
    }
}

/// Fire-and-forget celebration sink. No return value: the core never
/// learns, and never cares, whether the effect actually rendered.
pub trait Celebrator {
    fn fire(&mut self, params: &CelebrationParams);
}

/// Celebrator for headless hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCelebrator;

impl Celebrator for NoopCelebrator {
    fn fire(&mut self, _params: &CelebrationParams) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_match_the_product_palette() {
        let params = CelebrationParams::default();
        assert_eq!(params.particle_count, 150);
        assert_eq!(params.spread, 70);
        assert_eq!(params.colors.len(), 3);
        assert!(params.disable_for_reduced_motion);
    }
}
