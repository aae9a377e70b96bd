//! Per-tick integrator: forces, prediction, relaxation, commit.

use crate::aero::{triangle_forces, Triangle};
use crate::config::SolverConfig;
use crate::constraint::{DistanceConstraint, Projection};
use crate::error::ClothError;
use crate::float::Float;
use crate::grid::{flatten_triangles, ClothGrid};
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec;
use log::{debug, trace, warn};

/// What happened during one committed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Constraint projections whose endpoints had collapsed and were clamped.
    pub degenerate_relaxations: usize,
}

/// Owns the particle arena and steps it.
///
/// Constraints and triangles refer to particles by index. Particles,
/// triangles, and constraints are always visited in the order they were
/// supplied, so two solvers built from the same input produce bit-identical
/// results.
#[derive(Clone, Debug)]
pub struct ClothSolver<F: Float> {
    particles: Vec<Particle<F>>,
    constraints: Vec<DistanceConstraint<F>>,
    triangles: Vec<Triangle>,
    config: SolverConfig<F>,
    ticks: u64,
}

impl<F: Float> ClothSolver<F> {
    /// Take ownership of a built grid.
    pub fn new(grid: ClothGrid<F>, config: SolverConfig<F>) -> Result<Self, ClothError> {
        let (particles, constraints, triangles) = grid.into_parts();
        Self::from_parts(particles, constraints, triangles, config)
    }

    /// Assemble a solver from arbitrary topology.
    ///
    /// Every constraint must pass [`DistanceConstraint::validate`] (constraints
    /// may come from deserialization and bypass [`DistanceConstraint::between`]),
    /// every triangle vertex must index into `particles`, and the config must
    /// pass [`SolverConfig::validate`].
    pub fn from_parts(
        particles: Vec<Particle<F>>,
        constraints: Vec<DistanceConstraint<F>>,
        triangles: Vec<Triangle>,
        config: SolverConfig<F>,
    ) -> Result<Self, ClothError> {
        config.validate()?;

        let count = particles.len();
        let in_range = |index: usize| {
            if index < count {
                Ok(())
            } else {
                Err(ClothError::ParticleOutOfBounds { index, count })
            }
        };
        for c in constraints.iter() {
            c.validate(count)?;
        }
        for t in triangles.iter() {
            for &i in t {
                in_range(i)?;
            }
        }

        debug!(
            "cloth solver ready: {} particles, {} constraints, {} triangles",
            count,
            constraints.len(),
            triangles.len()
        );

        Ok(ClothSolver { particles, constraints, triangles, config, ticks: 0 })
    }

    /// Replace the per-tick parameters. Takes effect at the next tick.
    pub fn set_config(&mut self, config: SolverConfig<F>) -> Result<(), ClothError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Advance the simulation by one tick of `config.dt`.
    ///
    /// On error the tick is rolled back and the committed state is unchanged.
    pub fn step<O: StepObserver>(&mut self, observer: &mut O) -> Result<StepReport, ClothError> {
        // Parameters hold for the whole tick.
        let config = self.config;
        let dt = config.dt;

        for p in self.particles.iter_mut() {
            if !p.is_pinned() {
                let weight = config.gravity.scale(p.mass());
                p.accumulate_force(weight, dt);
            }
        }

        for &triangle in self.triangles.iter() {
            let forces = triangle_forces(&self.particles, triangle, &config.aerodynamics);
            for (&i, force) in triangle.iter().zip(forces) {
                self.particles[i].accumulate_force(force, dt);
            }
        }
        observer.on_forces_applied();

        // Committed velocity is written at commit so a rollback can restore it.
        for p in self.particles.iter_mut() {
            p.position_predicted = p.position + p.velocity_predicted.scale(dt);
        }
        observer.on_predict();

        let mut report = StepReport::default();
        let mut collapsed = None;
        'relax: for pass in 0..config.iterations {
            for (index, constraint) in self.constraints.iter().enumerate() {
                if constraint.project(&mut self.particles) != Projection::Degenerate {
                    continue;
                }
                if config.strict_relaxation {
                    collapsed = Some(index);
                    break 'relax;
                }
                report.degenerate_relaxations += 1;
            }
            observer.on_relaxation_pass(pass);
        }
        if let Some(constraint) = collapsed {
            warn!("tick {} aborted: constraint {} collapsed", self.ticks, constraint);
            self.rollback();
            return Err(ClothError::DegenerateRelaxation { constraint });
        }

        if let Some(particle) = self.particles.iter().position(|p| !p.position_predicted.is_finite()) {
            warn!("tick {} aborted: particle {} is no longer finite", self.ticks, particle);
            self.rollback();
            return Err(ClothError::NonFiniteState { particle });
        }

        for p in self.particles.iter_mut() {
            p.velocity = (p.position_predicted - p.position).scale(F::one() / dt);
            p.velocity_predicted = p.velocity;
            p.position = p.position_predicted;
        }

        if report.degenerate_relaxations > 0 {
            warn!(
                "tick {}: clamped {} degenerate relaxations",
                self.ticks, report.degenerate_relaxations
            );
        }
        trace!("tick {} committed ({} passes)", self.ticks, config.iterations);
        self.ticks += 1;
        observer.on_step_complete();
        Ok(report)
    }

    fn rollback(&mut self) {
        for p in self.particles.iter_mut() {
            p.velocity_predicted = p.velocity;
            p.position_predicted = p.position;
        }
    }

    /// Committed positions in particle order.
    pub fn positions(&self) -> Vec<Vec3<F>> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Copy committed positions into a vertex buffer without allocating.
    ///
    /// # Panics
    /// If `out.len()` differs from the particle count.
    pub fn write_positions(&self, out: &mut [[F; 3]]) {
        assert_eq!(out.len(), self.particles.len(), "vertex buffer size mismatch");
        for (slot, p) in out.iter_mut().zip(self.particles.iter()) {
            *slot = p.position.to_array();
        }
    }

    /// Largest relative stretch `(dist - rest) / rest` over all constraints.
    pub fn max_stretch(&self) -> F {
        self.constraints
            .iter()
            .map(|c| c.stretch(&self.particles))
            .fold(F::zero(), F::max)
    }

    /// Triangle vertex indices flattened for a render index buffer.
    pub fn index_buffer(&self) -> Vec<u32> {
        flatten_triangles(&self.triangles)
    }

    pub fn config(&self) -> &SolverConfig<F> { &self.config }
    pub fn tick_count(&self) -> u64 { self.ticks }
    pub fn particle(&self, index: usize) -> &Particle<F> { &self.particles[index] }
    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn constraints(&self) -> &[DistanceConstraint<F>] { &self.constraints }
    pub fn triangles(&self) -> &[Triangle] { &self.triangles }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridConfig;
    use crate::observer::NoOpStepObserver;

    #[derive(Default)]
    struct CountingObserver {
        forces: usize,
        predicts: usize,
        passes: usize,
        completed: usize,
    }

    impl StepObserver for CountingObserver {
        fn on_forces_applied(&mut self) { self.forces += 1; }
        fn on_predict(&mut self) { self.predicts += 1; }
        fn on_relaxation_pass(&mut self, _pass: usize) { self.passes += 1; }
        fn on_step_complete(&mut self) { self.completed += 1; }
    }

    fn small_cloth(iterations: usize) -> ClothSolver<f32> {
        let grid = ClothGrid::build(Vec3::zero(), &GridConfig::new(3, 3)).unwrap();
        ClothSolver::new(grid, SolverConfig::new().with_iterations(iterations)).unwrap()
    }

    #[test]
    fn observer_sees_every_phase() {
        let mut solver = small_cloth(5);
        let mut observer = CountingObserver::default();
        solver.step(&mut observer).unwrap();
        assert_eq!(observer.forces, 1);
        assert_eq!(observer.predicts, 1);
        assert_eq!(observer.passes, 5);
        assert_eq!(observer.completed, 1);
        assert_eq!(solver.tick_count(), 1);
    }

    #[test]
    fn rejects_out_of_range_triangle() {
        let particles = alloc::vec![
            Particle::new(Vec3::new(0.0f32, 0.0, 0.0), 1.0).unwrap(),
            Particle::new(Vec3::new(1.0f32, 0.0, 0.0), 1.0).unwrap(),
        ];
        let err = ClothSolver::from_parts(particles, Vec::new(), alloc::vec![[0, 1, 2]], SolverConfig::new())
            .unwrap_err();
        assert_eq!(err, ClothError::ParticleOutOfBounds { index: 2, count: 2 });
    }

    #[test]
    fn rejects_invalid_timestep_at_construction_and_update() {
        let grid = ClothGrid::build(Vec3::zero(), &GridConfig::<f32>::new(2, 2)).unwrap();
        let err = ClothSolver::new(grid, SolverConfig::new().with_dt(0.0)).unwrap_err();
        assert_eq!(err, ClothError::InvalidTimestep);

        let mut solver = small_cloth(1);
        let before = *solver.config();
        assert_eq!(
            solver.set_config(SolverConfig::new().with_dt(-1.0)).unwrap_err(),
            ClothError::InvalidTimestep,
        );
        assert_eq!(*solver.config(), before);
    }

    #[test]
    fn strict_mode_aborts_and_rolls_back() {
        // Two free particles moving toward each other meet exactly at the
        // midpoint after one tick, so the constraint sees zero distance.
        let mut particles = alloc::vec![
            Particle::new(Vec3::new(0.0f64, 0.0, 0.0), 1.0).unwrap(),
            Particle::new(Vec3::new(2.0f64, 0.0, 0.0), 1.0).unwrap(),
        ];
        let constraint = DistanceConstraint::between(0, 1, &particles, 1.0).unwrap();
        particles[0].velocity = Vec3::new(1.0, 0.0, 0.0);
        particles[0].velocity_predicted = particles[0].velocity;
        particles[1].velocity = Vec3::new(-1.0, 0.0, 0.0);
        particles[1].velocity_predicted = particles[1].velocity;

        let config = SolverConfig::new()
            .with_gravity(Vec3::zero())
            .with_dt(1.0)
            .with_iterations(1);
        let mut lenient = ClothSolver::from_parts(
            particles.clone(),
            alloc::vec![constraint.clone()],
            Vec::new(),
            config,
        )
        .unwrap();
        let report = lenient.step(&mut NoOpStepObserver).unwrap();
        assert_eq!(report.degenerate_relaxations, 1);
        assert!(lenient.positions().iter().all(|p| p.is_finite()));

        let mut strict = ClothSolver::from_parts(
            particles,
            alloc::vec![constraint],
            Vec::new(),
            config.with_strict_relaxation(true),
        )
        .unwrap();
        let err = strict.step(&mut NoOpStepObserver).unwrap_err();
        assert_eq!(err, ClothError::DegenerateRelaxation { constraint: 0 });
        assert_eq!(strict.tick_count(), 0);
        assert_eq!(strict.particle(0).position, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(strict.particle(0).velocity_predicted, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(strict.particle(1).position_predicted, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn write_positions_fills_vertex_buffer() {
        let mut solver = small_cloth(4);
        solver.step(&mut NoOpStepObserver).unwrap();
        let mut buffer = alloc::vec![[0.0f32; 3]; solver.particle_count()];
        solver.write_positions(&mut buffer);
        for (slot, p) in buffer.iter().zip(solver.positions()) {
            assert_eq!(*slot, p.to_array());
        }
    }
}
