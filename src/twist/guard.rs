//! Non-finite guard for generated orbits.
//!
//! The map is closed-form arithmetic, so a NaN or Inf can only come from a
//! pathological parameter. The guard finds the first offending field and
//! stops that orbit from reaching the figure.

use serde::{Deserialize, Serialize};

use super::orbit::Orbit;
use crate::error::{TwistError, TwistResult};

/// Running status of the guard over an ensemble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardStatus {
    /// Orbits checked so far.
    pub checked: usize,
    /// Orbits rejected for non-finite values.
    pub violations: usize,
}

impl GuardStatus {
    /// True while no orbit has been rejected.
    #[must_use]
    pub const fn finite_ok(&self) -> bool {
        self.violations == 0
    }
}

/// Checks every recorded point of an orbit for finiteness.
#[derive(Debug, Clone, Default)]
pub struct OrbitGuard {
    status: GuardStatus,
}

impl OrbitGuard {
    /// Create a fresh guard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> GuardStatus {
        self.status
    }

    /// Check orbit `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TwistError::NonFiniteValue`] naming the first non-finite
    /// field found.
    pub fn check(&mut self, index: usize, orbit: &Orbit) -> TwistResult<()> {
        self.status.checked += 1;
        match first_non_finite(orbit) {
            None => Ok(()),
            Some((point, field)) => {
                self.status.violations += 1;
                Err(TwistError::NonFiniteValue {
                    location: format!("orbit[{index}].point[{point}].{field}"),
                })
            }
        }
    }
}

fn first_non_finite(orbit: &Orbit) -> Option<(usize, &'static str)> {
    orbit.points.iter().enumerate().find_map(|(i, p)| {
        [
            ("action", p.action),
            ("angle", p.angle),
            ("signed_angle", p.signed_angle),
            ("x", p.x),
            ("y", p.y),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(field, _)| (i, field))
    })
}
