//! Simulation engine primitives.
//!
//! The twist-map experiment needs exactly one shared resource across its
//! outer loop: the pseudorandom stream. It lives here so that every draw is
//! made through an explicitly passed handle.

pub mod rng;

pub use rng::SimRng;
