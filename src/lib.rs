//! # kamtwist
//!
//! Reproducible phase portraits of the Chirikov standard (twist) map.
//!
//! Fifty initial conditions are drawn from one seeded PCG stream, each is
//! iterated through
//!
//! ```text
//! J' = J + ε sin θ
//! θ' = (θ + J') mod 2π
//! ```
//!
//! for `floor(200 (J₀ + π/2))` steps, and all orbits are overlaid on one
//! figure. At ε = 0.3 the picture mixes invariant KAM tori with thin
//! chaotic layers around the resonances.
//!
//! ## Example
//!
//! ```rust
//! use kamtwist::prelude::*;
//!
//! let config = TwistConfig::builder().seed(2).orbits(5).build();
//! let mut rng = SimRng::new(config.reproducibility.seed);
//! let ensemble = run_ensemble(&config.map, &mut rng);
//! assert_eq!(ensemble.orbits.len(), 5);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::imprecise_flops,
    clippy::missing_const_for_fn,
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod render;
pub mod twist;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{MapConfig, PlotConfig, Projection, TwistConfig, TwistConfigBuilder};
    pub use crate::engine::rng::SimRng;
    pub use crate::error::{TwistError, TwistResult};
    pub use crate::render::{render_svg, write_svg, Figure, PlotBounds};
    pub use crate::twist::ensemble::{fingerprint, run_ensemble, Ensemble, EnsembleSummary};
    pub use crate::twist::map::{PhaseState, StandardMap};
    pub use crate::twist::orbit::{generate_orbit, InitialCondition, Orbit, OrbitGenerator, OrbitPoint};
}

/// Re-export for public API
pub use error::{TwistError, TwistResult};
