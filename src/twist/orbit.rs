//! Orbit generation.
//!
//! An [`Orbit`] is the full record of one initial condition pushed through
//! the standard map: raw action, wrapped angle, signed angle and the
//! Cartesian projection used for the phase portrait.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

use super::map::{orbit_length, signed_angle, PhaseState, StandardMap, DEFAULT_STEPS_PER_UNIT};
use crate::engine::rng::SimRng;

/// Default radial offset of the Cartesian projection.
pub const DEFAULT_RADIUS_OFFSET: f64 = 0.25;

/// Upper bound on the up-front allocation for one orbit.
const MAX_PREALLOCATED_POINTS: usize = 1 << 16;

/// Starting point of one orbit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialCondition {
    /// Initial action, in [-π/2, π) when drawn.
    pub action: f64,
    /// Initial angle, in [0, 2π) when drawn.
    pub angle: f64,
}

impl InitialCondition {
    /// Create an initial condition from explicit values.
    #[must_use]
    pub const fn new(action: f64, angle: f64) -> Self {
        Self { action, angle }
    }

    /// Draw an initial condition from the shared stream.
    ///
    /// Consumes exactly two draws: action first, then angle.
    pub fn draw(rng: &mut SimRng) -> Self {
        let action = PI * (1.5 * rng.gen_f64() - 0.5);
        let angle = TAU * rng.gen_f64();
        Self { action, angle }
    }

    /// As a phase state.
    #[must_use]
    pub const fn state(&self) -> PhaseState {
        PhaseState::new(self.action, self.angle)
    }
}

/// One recorded step of an orbit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPoint {
    /// Action after the step.
    pub action: f64,
    /// Angle after the step, in [0, 2π).
    pub angle: f64,
    /// Angle after the step, in (-π, π].
    pub signed_angle: f64,
    /// Cartesian x of the projection.
    pub x: f64,
    /// Cartesian y of the projection.
    pub y: f64,
}

impl OrbitPoint {
    /// Record a map state, projecting with `radius = action + π + offset`.
    #[must_use]
    pub fn record(state: PhaseState, radius_offset: f64) -> Self {
        let radius = projection_radius(state.action, radius_offset);
        let (sin, cos) = state.angle.sin_cos();
        Self {
            action: state.action,
            angle: state.angle,
            signed_angle: signed_angle(state.angle),
            x: radius * cos,
            y: radius * sin,
        }
    }
}

/// Radius of the Cartesian projection for a given action.
#[must_use]
pub fn projection_radius(action: f64, radius_offset: f64) -> f64 {
    action + PI + radius_offset
}

/// A generated orbit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    /// Where the orbit started.
    pub initial: InitialCondition,
    /// Recorded points, in iteration order.
    pub points: Vec<OrbitPoint>,
}

impl Orbit {
    /// Number of recorded points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True for a degenerate initial condition with no iterations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Cartesian x sequence.
    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Cartesian y sequence.
    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Final state, if any step was taken.
    #[must_use]
    pub fn last_state(&self) -> Option<PhaseState> {
        self.points
            .last()
            .map(|p| PhaseState::new(p.action, p.angle))
    }
}

/// Generates orbits of a fixed standard map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitGenerator {
    map: StandardMap,
    steps_per_unit: f64,
    radius_offset: f64,
}

impl OrbitGenerator {
    /// Generator with the experiment's default length rule and projection.
    #[must_use]
    pub const fn new(epsilon: f64) -> Self {
        Self {
            map: StandardMap::new(epsilon),
            steps_per_unit: DEFAULT_STEPS_PER_UNIT,
            radius_offset: DEFAULT_RADIUS_OFFSET,
        }
    }

    /// Override the steps-per-unit factor of the length rule.
    #[must_use]
    pub const fn with_steps_per_unit(mut self, steps_per_unit: f64) -> Self {
        self.steps_per_unit = steps_per_unit;
        self
    }

    /// Override the radial offset of the Cartesian projection.
    #[must_use]
    pub const fn with_radius_offset(mut self, radius_offset: f64) -> Self {
        self.radius_offset = radius_offset;
        self
    }

    /// The underlying map.
    #[must_use]
    pub const fn map(&self) -> StandardMap {
        self.map
    }

    /// Iteration count for a given starting action.
    #[must_use]
    pub fn orbit_length(&self, action0: f64) -> usize {
        orbit_length(action0, self.steps_per_unit)
    }

    /// Run the map from `initial` for the computed number of steps.
    #[must_use]
    pub fn generate(&self, initial: InitialCondition) -> Orbit {
        let n = self.orbit_length(initial.action);
        let mut points = Vec::with_capacity(n.min(MAX_PREALLOCATED_POINTS));
        let mut state = initial.state();
        for _ in 0..n {
            state = self.map.step(state);
            points.push(OrbitPoint::record(state, self.radius_offset));
        }
        Orbit { initial, points }
    }
}

/// Generate one orbit with the default length rule and projection.
#[must_use]
pub fn generate_orbit(action0: f64, angle0: f64, epsilon: f64) -> Orbit {
    OrbitGenerator::new(epsilon).generate(InitialCondition::new(action0, angle0))
}
