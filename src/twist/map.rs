//! The Chirikov standard (twist) map.
//!
//! # Governing Equations
//!
//! ```text
//! J' = J + ε sin θ
//! θ' = (θ + J') mod 2π
//! ```
//!
//! The map is area-preserving on the cylinder (J, θ). The new state depends
//! only on the previous one, so [`PhaseState`] is the whole recurrence state.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Default perturbation strength of the experiment.
pub const DEFAULT_EPSILON: f64 = 0.3;

/// Default number of map iterations per unit of shifted action.
pub const DEFAULT_STEPS_PER_UNIT: f64 = 200.0;

/// Largest accepted steps-per-unit factor. Bounds an orbit at roughly
/// 47 000 points over the sampled action range.
pub const MAX_STEPS_PER_UNIT: f64 = 10_000.0;

/// One point on the cylinder: action `J` and angle `θ`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    /// Action (radial-like coordinate).
    pub action: f64,
    /// Angle, in [0, 2π) after any map step.
    pub angle: f64,
}

impl PhaseState {
    /// Create a new phase state.
    #[must_use]
    pub const fn new(action: f64, angle: f64) -> Self {
        Self { action, angle }
    }
}

/// Standard map with fixed perturbation constant ε.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandardMap {
    /// Perturbation strength ε.
    pub epsilon: f64,
}

impl Default for StandardMap {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl StandardMap {
    /// Create a map with the given perturbation strength.
    #[must_use]
    pub const fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Apply the map once.
    ///
    /// The action kick uses the *previous* angle; the angle drift uses the
    /// *new* action.
    #[must_use]
    pub fn step(&self, state: PhaseState) -> PhaseState {
        let action = state.action + self.epsilon * state.angle.sin();
        let angle = wrap_angle(state.angle + action);
        PhaseState { action, angle }
    }
}

/// Reduce an angle to [0, 2π) with a true (Euclidean) modulo.
///
/// `rem_euclid` can round up to exactly 2π for tiny negative inputs; that
/// case folds back to 0 so the interval stays half-open.
#[must_use]
pub fn wrap_angle(theta: f64) -> f64 {
    let r = theta.rem_euclid(TAU);
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Remap an angle to the signed range (-π, π].
///
/// Computes `((θ - π) mod 2π) - π`; the single endpoint where that formula
/// lands on -π is reported as +π.
#[must_use]
pub fn signed_angle(theta: f64) -> f64 {
    let s = wrap_angle(theta - PI) - PI;
    if s <= -PI {
        PI
    } else {
        s
    }
}

/// Number of map iterations for an orbit starting at `action0`.
///
/// `floor(steps_per_unit * (action0 + π/2))`, floored toward negative
/// infinity and clamped at zero. Non-finite inputs give zero.
#[must_use]
pub fn orbit_length(action0: f64, steps_per_unit: f64) -> usize {
    let n = (steps_per_unit * (action0 + FRAC_PI_2)).floor();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_wrap_angle_in_range(theta in -1e6f64..1e6) {
            let w = wrap_angle(theta);
            prop_assert!((0.0..TAU).contains(&w), "{} not in [0, 2π)", w);
        }

        #[test]
        fn prop_signed_angle_in_range(theta in -1e6f64..1e6) {
            let s = signed_angle(theta);
            prop_assert!(s > -PI && s <= PI, "{} not in (-π, π]", s);
        }

        #[test]
        fn prop_step_angle_in_range(
            action in -10.0f64..10.0,
            angle in 0.0f64..TAU,
            epsilon in 0.0f64..2.0,
        ) {
            let next = StandardMap::new(epsilon).step(PhaseState::new(action, angle));
            prop_assert!((0.0..TAU).contains(&next.angle));
        }

        #[test]
        fn prop_orbit_length_matches_floor(action0 in -FRAC_PI_2..PI) {
            let n = orbit_length(action0, DEFAULT_STEPS_PER_UNIT);
            let expected = (DEFAULT_STEPS_PER_UNIT * (action0 + FRAC_PI_2)).floor();
            prop_assert_eq!(n as f64, expected);
        }
    }
}
