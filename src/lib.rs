//! Position-based cloth simulation with per-triangle aerodynamics.
//!
//! `aerocloth` steps an inextensible sheet under gravity, wind drag/lift,
//! and internal tension. Each tick accumulates forces into predicted
//! velocities, predicts positions, relaxes distance constraints in place
//! (Gauss-Seidel order), and commits the result.
//!
//! # Features
//!
//! - **Particle arena**: constraints and triangles hold indices, not references
//! - **Distance constraints**: mass-weighted correction with per-constraint stiffness
//! - **Aerodynamics**: drag/lift per triangle from relative wind
//! - **Grid builder**: rectangular sheet with caller-selected anchors
//! - **Observable**: watch tick phases via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! ```
//! use aerocloth::{ClothGrid, ClothSolver, GridConfig, NoOpStepObserver, SolverConfig, Vec3};
//!
//! let grid = ClothGrid::build(Vec3::zero(), &GridConfig::<f32>::new(8, 8)).unwrap();
//! let mut solver = ClothSolver::new(grid, SolverConfig::new().with_iterations(10)).unwrap();
//! solver.step(&mut NoOpStepObserver).unwrap();
//! assert_eq!(solver.positions().len(), 64);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod constraint;
pub mod aero;
pub mod grid;
pub mod solver;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use particle::Particle;
pub use constraint::{DistanceConstraint, Projection, MIN_RELAXATION_DISTANCE};
pub use aero::{triangle_forces, Aerodynamics, Triangle};
pub use grid::{Anchors, ClothGrid, GridConfig};
pub use solver::{ClothSolver, StepReport};
pub use config::SolverConfig;
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::ClothError;
