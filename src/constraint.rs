//! Distance constraints relaxed in place on predicted positions.

use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest separation used in the correction formula. Predicted positions
/// closer than this are treated as this far apart.
pub const MIN_RELAXATION_DISTANCE: f32 = 1e-6;

/// Outcome of a single [`DistanceConstraint::project`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Projection {
    /// The correction was applied.
    Applied,
    /// Both endpoints are pinned; nothing moved.
    Pinned,
    /// The endpoints coincided and the distance was clamped to
    /// [`MIN_RELAXATION_DISTANCE`].
    Degenerate,
}

/// Keeps two particles at the distance they had when the constraint was built.
///
/// Holds particle indices into the solver's particle arena, never references.
/// The rest length is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistanceConstraint<F: Float> {
    p1: usize,
    p2: usize,
    rest_length: F,
    stiffness: F,
}

impl<F: Float> DistanceConstraint<F> {
    /// Bind `p1` and `p2`, taking the rest length from their committed positions.
    pub fn between(
        p1: usize,
        p2: usize,
        particles: &[Particle<F>],
        stiffness: F,
    ) -> Result<Self, ClothError> {
        let count = particles.len();
        for index in [p1, p2] {
            if index >= count {
                return Err(ClothError::ParticleOutOfBounds { index, count });
            }
        }
        let rest_length = (particles[p1].position - particles[p2].position).length();
        let constraint = DistanceConstraint { p1, p2, rest_length, stiffness };
        constraint.validate(count)?;
        Ok(constraint)
    }

    /// Check the constraint against a particle arena of `count` particles.
    ///
    /// Endpoints must be distinct and in range, stiffness in [0, 1], and the
    /// rest length finite and no shorter than [`MIN_RELAXATION_DISTANCE`] so
    /// a cloth at rest is never clamped.
    pub fn validate(&self, count: usize) -> Result<(), ClothError> {
        for index in [self.p1, self.p2] {
            if index >= count {
                return Err(ClothError::ParticleOutOfBounds { index, count });
            }
        }
        let s = self.stiffness;
        if s.is_nan() || s < F::zero() || s > F::one() {
            return Err(ClothError::InvalidStiffness);
        }
        let rest = self.rest_length;
        if self.p1 == self.p2 || !rest.is_finite() || rest < F::from_f32(MIN_RELAXATION_DISTANCE) {
            return Err(ClothError::DegenerateConstraint { a: self.p1, b: self.p2 });
        }
        Ok(())
    }

    /// Move both predicted positions toward the rest length.
    ///
    /// Each endpoint takes a share of the correction proportional to its
    /// inverse mass, scaled by `stiffness`. Reads and writes live predicted
    /// positions, so constraints projected earlier in the same pass are seen.
    pub fn project(&self, particles: &mut [Particle<F>]) -> Projection {
        let w1 = particles[self.p1].inv_mass();
        let w2 = particles[self.p2].inv_mass();
        let w_total = w1 + w2;
        if w_total == F::zero() {
            return Projection::Pinned;
        }

        let delta = particles[self.p1].position_predicted - particles[self.p2].position_predicted;
        let min_dist = F::from_f32(MIN_RELAXATION_DISTANCE);
        let mut dist = delta.length();
        let outcome = if dist < min_dist {
            dist = min_dist;
            Projection::Degenerate
        } else {
            Projection::Applied
        };

        let error = (dist - self.rest_length) / dist * self.stiffness;

        if w1 != F::zero() {
            let p1 = &mut particles[self.p1];
            p1.position_predicted += delta.scale(-(w1 / w_total) * error);
        }
        if w2 != F::zero() {
            let p2 = &mut particles[self.p2];
            p2.position_predicted += delta.scale((w2 / w_total) * error);
        }
        outcome
    }

    /// Relative stretch of the predicted positions: `(dist - rest) / rest`.
    pub fn stretch(&self, particles: &[Particle<F>]) -> F {
        let dist = (particles[self.p1].position_predicted - particles[self.p2].position_predicted).length();
        (dist - self.rest_length) / self.rest_length
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.p1, self.p2)
    }

    pub fn rest_length(&self) -> F {
        self.rest_length
    }

    pub fn stiffness(&self) -> F {
        self.stiffness
    }
}
