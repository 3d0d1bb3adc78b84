//! Ensemble driver: many orbits from one seeded stream.
//!
//! Orbits are generated sequentially in draw order. Each iteration draws
//! its initial condition (two values), generates the orbit, runs the guard
//! and hands the orbit to the caller-owned collection.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::guard::{GuardStatus, OrbitGuard};
use super::orbit::{InitialCondition, Orbit, OrbitGenerator};
use crate::config::MapConfig;
use crate::engine::rng::SimRng;
use crate::error::{TwistError, TwistResult};

/// The result of one ensemble run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ensemble {
    /// Seed of the stream the initial conditions came from.
    pub seed: u64,
    /// Perturbation strength used.
    pub epsilon: f64,
    /// Orbits that passed the guard, in draw order.
    pub orbits: Vec<Orbit>,
    /// Guard counters.
    pub guard: GuardStatus,
}

impl Ensemble {
    /// Summary statistics for reporting.
    #[must_use]
    pub fn summary(&self) -> EnsembleSummary {
        EnsembleSummary::from_orbits(&self.orbits, self.guard.violations)
    }

    /// Blake3 fingerprint of the orbit data.
    ///
    /// # Errors
    ///
    /// Returns error if the orbits cannot be encoded.
    pub fn fingerprint(&self) -> TwistResult<String> {
        fingerprint(&self.orbits)
    }
}

/// Counts and ranges over an ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleSummary {
    /// Orbits kept.
    pub orbits: usize,
    /// Points across all kept orbits.
    pub total_points: usize,
    /// Kept orbits with no points.
    pub empty_orbits: usize,
    /// Orbits dropped by the guard.
    pub rejected: usize,
    /// Smallest recorded action, if any point exists.
    pub action_min: Option<f64>,
    /// Largest recorded action, if any point exists.
    pub action_max: Option<f64>,
}

impl EnsembleSummary {
    /// Compute a summary over `orbits`.
    #[must_use]
    pub fn from_orbits(orbits: &[Orbit], rejected: usize) -> Self {
        let mut action_min: Option<f64> = None;
        let mut action_max: Option<f64> = None;
        for p in orbits.iter().flat_map(|o| o.points.iter()) {
            action_min = Some(action_min.map_or(p.action, |m| m.min(p.action)));
            action_max = Some(action_max.map_or(p.action, |m| m.max(p.action)));
        }
        Self {
            orbits: orbits.len(),
            total_points: orbits.iter().map(Orbit::len).sum(),
            empty_orbits: orbits.iter().filter(|o| o.is_empty()).count(),
            rejected,
            action_min,
            action_max,
        }
    }
}

/// Run `config.orbits` orbits, drawing every initial condition from `rng`.
#[must_use]
pub fn run_ensemble(config: &MapConfig, rng: &mut SimRng) -> Ensemble {
    let generator = OrbitGenerator::new(config.epsilon)
        .with_steps_per_unit(config.steps_per_unit)
        .with_radius_offset(config.radius_offset);
    let mut guard = OrbitGuard::new();
    let mut orbits = Vec::with_capacity(config.orbits);

    info!(
        seed = rng.master_seed(),
        epsilon = config.epsilon,
        orbits = config.orbits,
        "running twist-map ensemble"
    );

    for index in 0..config.orbits {
        let initial = InitialCondition::draw(rng);
        let orbit = generator.generate(initial);
        debug!(
            index,
            action0 = initial.action,
            angle0 = initial.angle,
            length = orbit.len(),
            "orbit generated"
        );
        match guard.check(index, &orbit) {
            Ok(()) => orbits.push(orbit),
            Err(e) => warn!(index, error = %e, "orbit dropped"),
        }
    }

    let ensemble = Ensemble {
        seed: rng.master_seed(),
        epsilon: config.epsilon,
        orbits,
        guard: guard.status(),
    };
    info!(
        kept = ensemble.orbits.len(),
        rejected = ensemble.guard.violations,
        "ensemble complete"
    );
    ensemble
}

/// Hex blake3 digest of the bincode encoding of `orbits`.
///
/// # Errors
///
/// Returns error if encoding fails.
pub fn fingerprint(orbits: &[Orbit]) -> TwistResult<String> {
    let bytes = bincode::serialize(orbits)
        .map_err(|e| TwistError::serialization(format!("Fingerprint orbits: {e}")))?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}
