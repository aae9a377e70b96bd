//! Per-tick simulation parameters.

use crate::aero::Aerodynamics;
use crate::error::ClothError;
use crate::float::Float;
use crate::vec::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters sampled once at the start of every tick.
///
/// # Builder Pattern
/// ```
/// use aerocloth::config::SolverConfig;
/// use aerocloth::vec::Vec3;
///
/// let config: SolverConfig<f32> = SolverConfig::new()
///     .with_iterations(16)
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_wind(Vec3::new(0.0, 0.0, -4.0))
///     .with_dt(1.0 / 120.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig<F: Float> {
    /// Gravity acceleration. Default: (0, -9.8, 0).
    pub gravity: Vec3<F>,
    /// Wind and air coefficients.
    pub aerodynamics: Aerodynamics<F>,
    /// Relaxation passes over all constraints per tick. Default: 30.
    pub iterations: usize,
    /// Timestep in seconds. Default: 1/60.
    pub dt: F,
    /// Abort the tick instead of clamping when a constraint collapses.
    /// Default: false.
    pub strict_relaxation: bool,
}

impl<F: Float> SolverConfig<F> {
    pub fn new() -> Self {
        SolverConfig {
            gravity: Vec3::new(F::zero(), F::from_f32(-9.8), F::zero()),
            aerodynamics: Aerodynamics::new(),
            iterations: 30,
            dt: F::from_f32(1.0 / 60.0),
            strict_relaxation: false,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_aerodynamics(mut self, aerodynamics: Aerodynamics<F>) -> Self {
        self.aerodynamics = aerodynamics;
        self
    }

    /// Set only the wind velocity, keeping the air coefficients.
    pub fn with_wind(mut self, wind: Vec3<F>) -> Self {
        self.aerodynamics.wind = wind;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_dt(mut self, dt: F) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_strict_relaxation(mut self, strict: bool) -> Self {
        self.strict_relaxation = strict;
        self
    }

    pub fn validate(&self) -> Result<(), ClothError> {
        if !self.dt.is_finite() || self.dt <= F::zero() {
            return Err(ClothError::InvalidTimestep);
        }
        if !self.gravity.is_finite() {
            return Err(ClothError::InvalidParameter { name: "gravity" });
        }
        self.aerodynamics.validate()
    }
}

impl<F: Float> Default for SolverConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
