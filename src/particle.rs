//! Point masses carrying committed and predicted state.

use crate::error::ClothError;
use crate::float::Float;
use crate::vec::Vec3;

/// A cloth particle.
///
/// `position`/`velocity` are the committed state seen by renderers.
/// `position_predicted`/`velocity_predicted` are the working values a tick
/// reads and writes before committing. The two pairs are never merged: the
/// aerodynamic pass reads committed positions while predicted velocities
/// are being accumulated.
///
/// A pinned particle has infinite mass and an inverse mass of exactly zero.
#[derive(Clone, Debug)]
pub struct Particle<F: Float> {
    pub position: Vec3<F>,
    pub position_predicted: Vec3<F>,
    pub velocity: Vec3<F>,
    pub velocity_predicted: Vec3<F>,
    mass: F,
    inv_mass: F,
}

impl<F: Float> Particle<F> {
    /// Create a particle at rest.
    ///
    /// `mass` must be positive; `F::infinity()` pins the particle. Zero,
    /// negative, and NaN masses are rejected with [`ClothError::InvalidMass`].
    pub fn new(position: Vec3<F>, mass: F) -> Result<Self, ClothError> {
        if mass.is_nan() || mass <= F::zero() {
            return Err(ClothError::InvalidMass);
        }
        let inv_mass = if mass.is_infinite() { F::zero() } else { F::one() / mass };
        Ok(Particle {
            position,
            position_predicted: position,
            velocity: Vec3::zero(),
            velocity_predicted: Vec3::zero(),
            mass,
            inv_mass,
        })
    }

    /// Create an immovable particle.
    pub fn pinned(position: Vec3<F>) -> Self {
        Particle {
            position,
            position_predicted: position,
            velocity: Vec3::zero(),
            velocity_predicted: Vec3::zero(),
            mass: F::infinity(),
            inv_mass: F::zero(),
        }
    }

    /// `velocity_predicted += force / mass * dt`. No-op for pinned particles.
    pub fn accumulate_force(&mut self, force: Vec3<F>, dt: F) {
        if self.is_pinned() {
            return;
        }
        self.velocity_predicted += force.scale(self.inv_mass * dt);
    }

    pub fn is_pinned(&self) -> bool {
        self.mass.is_infinite()
    }

    pub fn mass(&self) -> F {
        self.mass
    }

    pub fn inv_mass(&self) -> F {
        self.inv_mass
    }
}
