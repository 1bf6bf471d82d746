//! Projectile motion and light refraction simulations.
//!
//! `core` holds the closed-form physics, `sim` the per-frame state machines
//! behind a common [`sim::Simulation`] contract. Windowing, GPU work and the
//! GUI overlay are reached only through the traits in [`sim::graphics`] and
//! [`sim::panel`].

pub mod config;
pub mod core;
pub mod error;
pub mod sim;

pub use error::{ResourceInitError, Result, SimError};
