//! KAM twist-map experiment.
//!
//! - [`map`]: the standard map recurrence and angle arithmetic
//! - [`orbit`]: initial conditions, recorded points, orbit generation
//! - [`guard`]: non-finite detection over generated orbits
//! - [`ensemble`]: the seeded outer loop, summaries and fingerprints
//!
//! # Example
//!
//! ```rust
//! use kamtwist::twist::prelude::*;
//! use kamtwist::engine::rng::SimRng;
//!
//! let orbit = generate_orbit(0.0, 0.0, 0.3);
//! assert_eq!(orbit.len(), 314);
//!
//! let mut rng = SimRng::new(2);
//! let ensemble = run_ensemble(&MapConfig::default(), &mut rng);
//! assert_eq!(ensemble.orbits.len(), 50);
//! ```

pub mod ensemble;
pub mod guard;
pub mod map;
pub mod orbit;

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::ensemble::{fingerprint, run_ensemble, Ensemble, EnsembleSummary};
    pub use super::guard::{GuardStatus, OrbitGuard};
    pub use super::map::{orbit_length, signed_angle, wrap_angle, PhaseState, StandardMap};
    pub use super::orbit::{generate_orbit, InitialCondition, Orbit, OrbitGenerator, OrbitPoint};
    pub use crate::config::MapConfig;
}
