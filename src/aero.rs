//! Per-triangle drag and lift from relative airflow.
//!
//! Thin-triangle drag/lift decomposition (doi:10.1145/2614106.2614120): the
//! velocity of the triangle relative to the wind is split into a drag part
//! along that velocity and a lift part along the windward normal.

use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Three particle indices forming one cloth triangle.
pub type Triangle = [usize; 3];

/// Ambient air parameters for one tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aerodynamics<F: Float> {
    /// Wind velocity in world space.
    pub wind: Vec3<F>,
    /// Drag coefficient. Default: 0.01.
    pub drag_coefficient: F,
    /// Lift coefficient. Default: 0.01.
    pub lift_coefficient: F,
    /// Air density (rho). Default: 1.225, sea-level air in kg/m^3.
    pub air_density: F,
}

impl<F: Float> Aerodynamics<F> {
    pub fn new() -> Self {
        Aerodynamics {
            wind: Vec3::zero(),
            drag_coefficient: F::from_f32(0.01),
            lift_coefficient: F::from_f32(0.01),
            air_density: F::from_f32(1.225),
        }
    }

    pub fn with_wind(mut self, wind: Vec3<F>) -> Self {
        self.wind = wind;
        self
    }

    /// Wind blowing along -Z at `speed`, the single wind axis of a cloth
    /// hanging in the XY plane.
    pub fn with_wind_speed(mut self, speed: F) -> Self {
        self.wind = Vec3::new(F::zero(), F::zero(), -speed);
        self
    }

    pub fn with_drag(mut self, drag_coefficient: F) -> Self {
        self.drag_coefficient = drag_coefficient;
        self
    }

    pub fn with_lift(mut self, lift_coefficient: F) -> Self {
        self.lift_coefficient = lift_coefficient;
        self
    }

    pub fn with_air_density(mut self, air_density: F) -> Self {
        self.air_density = air_density;
        self
    }

    /// Coefficients and density must be finite and non-negative; wind must be finite.
    pub fn validate(&self) -> Result<(), ClothError> {
        if !self.wind.is_finite() {
            return Err(ClothError::InvalidParameter { name: "wind" });
        }
        let scalars = [
            ("drag_coefficient", self.drag_coefficient),
            ("lift_coefficient", self.lift_coefficient),
            ("air_density", self.air_density),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value < F::zero() {
                return Err(ClothError::InvalidParameter { name });
            }
        }
        Ok(())
    }
}

impl<F: Float> Default for Aerodynamics<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Aerodynamic force on `triangle`, split across its vertices by mass share.
///
/// Returns zero for every vertex when the triangle's total mass is infinite
/// (any vertex pinned) or when the triangle has no area. The triangle
/// velocity is the mass-weighted mean of the vertices' *predicted*
/// velocities; the normal and area come from *committed* positions.
///
/// # Panics
/// If any index in `triangle` is out of range for `particles`.
/// [`ClothSolver`](crate::ClothSolver) checks this once at construction.
pub fn triangle_forces<F: Float>(
    particles: &[Particle<F>],
    triangle: Triangle,
    aero: &Aerodynamics<F>,
) -> [Vec3<F>; 3] {
    let zero = [Vec3::zero(); 3];
    let (a, b, c) = (&particles[triangle[0]], &particles[triangle[1]], &particles[triangle[2]]);

    let mass_sum = a.mass() + b.mass() + c.mass();
    if mass_sum.is_infinite() {
        return zero;
    }

    let v_triangle = (a.velocity_predicted.scale(a.mass())
        + b.velocity_predicted.scale(b.mass())
        + c.velocity_predicted.scale(c.mass()))
    .scale(F::one() / mass_sum);

    let v_rel = v_triangle - aero.wind;
    let v_rel_sq = v_rel.length_sq();

    let cross = (b.position - a.position).cross(c.position - a.position);
    let n_base = cross.normalize();
    if n_base == Vec3::zero() {
        return zero;
    }
    let area = cross.length() * F::half();
    let n = if v_rel.dot(n_base) > F::zero() { n_base } else { -n_base };

    let coef = F::half() * aero.air_density * area;
    let drag_minus_lift = aero.drag_coefficient - aero.lift_coefficient;
    let force = (v_rel.scale(drag_minus_lift * v_rel.dot(n))
        + n.scale(aero.lift_coefficient * v_rel_sq))
    .scale(-coef);

    [a.mass(), b.mass(), c.mass()].map(|m| force.scale(m / mass_sum))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Right triangle with unit legs in the XY plane; area 0.5.
    fn flat_triangle(mass: f64) -> [Particle<f64>; 3] {
        [
            Particle::new(Vec3::new(0.0, 0.0, 0.0), mass).unwrap(),
            Particle::new(Vec3::new(0.0, 1.0, 0.0), mass).unwrap(),
            Particle::new(Vec3::new(1.0, 0.0, 0.0), mass).unwrap(),
        ]
    }

    #[test]
    fn still_air_produces_no_force() {
        let particles = flat_triangle(0.1);
        let forces = triangle_forces(&particles, [0, 1, 2], &Aerodynamics::new());
        for f in forces {
            assert_eq!(f, Vec3::zero());
        }
    }

    #[test]
    fn pinned_vertex_skips_triangle() {
        let mut particles = flat_triangle(0.1);
        particles[2] = Particle::pinned(Vec3::new(1.0, 0.0, 0.0));
        let aero = Aerodynamics::new().with_wind_speed(5.0);
        let forces = triangle_forces(&particles, [0, 1, 2], &aero);
        for f in forces {
            assert_eq!(f, Vec3::zero());
        }
    }

    #[test]
    fn perpendicular_wind_is_pure_drag() {
        // Triangle at rest, wind (0, 0, -5): v_rel = (0, 0, 5).
        let particles = flat_triangle(1.0);
        let aero = Aerodynamics::new()
            .with_wind(Vec3::new(0.0, 0.0, -5.0))
            .with_drag(0.01)
            .with_lift(0.0)
            .with_air_density(1.225);
        let forces = triangle_forces(&particles, [0, 1, 2], &aero);

        // n faces +Z, dot(v_rel, n) = 5, coef = 0.5 * 1.225 * 0.5.
        // force = -coef * 0.01 * 5 * (0, 0, 5) = (0, 0, -0.0765625)
        let total = forces[0] + forces[1] + forces[2];
        assert!(total.x.abs() < 1e-12);
        assert!(total.y.abs() < 1e-12);
        assert!((total.z + 0.0765625).abs() < 1e-12);
        // Equal masses share equally.
        assert!((forces[0].z - total.z / 3.0).abs() < 1e-12);
    }

    #[test]
    fn equal_coefficients_cancel_the_velocity_term() {
        // With drag == lift only the normal term remains, which for
        // perpendicular flow is the same magnitude as pure drag.
        let particles = flat_triangle(1.0);
        let c = 0.01;
        let aero = Aerodynamics::new()
            .with_wind(Vec3::new(0.0, 0.0, -5.0))
            .with_drag(c)
            .with_lift(c);
        let forces = triangle_forces(&particles, [0, 1, 2], &aero);
        let total = forces[0] + forces[1] + forces[2];
        assert!((total.z + 0.0765625).abs() < 1e-12);
    }

    #[test]
    fn force_is_independent_of_winding() {
        let particles = flat_triangle(1.0);
        let aero = Aerodynamics::new().with_wind(Vec3::new(1.0, 2.0, -3.0));
        let a = triangle_forces(&particles, [0, 1, 2], &aero);
        let b = triangle_forces(&particles, [0, 2, 1], &aero);
        let ta = a[0] + a[1] + a[2];
        let tb = b[0] + b[1] + b[2];
        assert!((ta - tb).length() < 1e-12);
    }

    #[test]
    fn drag_pushes_cloth_downwind() {
        let particles = flat_triangle(1.0);
        let aero = Aerodynamics::new()
            .with_wind(Vec3::new(0.0, 0.0, -5.0))
            .with_drag(0.5)
            .with_lift(0.0);
        let forces = triangle_forces(&particles, [0, 1, 2], &aero);
        let total = forces[0] + forces[1] + forces[2];
        assert!(total.dot(aero.wind) > 0.0);
    }

    #[test]
    fn heavier_vertex_takes_larger_share() {
        let particles = [
            Particle::new(Vec3::new(0.0, 0.0, 0.0), 2.0).unwrap(),
            Particle::new(Vec3::new(0.0, 1.0, 0.0), 1.0).unwrap(),
            Particle::new(Vec3::new(1.0, 0.0, 0.0), 1.0).unwrap(),
        ];
        let aero = Aerodynamics::new().with_wind_speed(5.0);
        let forces = triangle_forces(&particles, [0, 1, 2], &aero);
        assert!((forces[0].z - 2.0 * forces[1].z).abs() < 1e-12);
    }

    #[test]
    fn negative_density_is_invalid() {
        let aero = Aerodynamics::<f32>::new().with_air_density(-1.0);
        assert_eq!(
            aero.validate().unwrap_err(),
            ClothError::InvalidParameter { name: "air_density" },
        );
    }
}
