//! Error types for cloth construction and stepping.

use core::fmt;

/// Errors reported by the cloth simulation.
///
/// Everything except [`ClothError::DegenerateRelaxation`] and
/// [`ClothError::NonFiniteState`] is a construction-time precondition and is
/// returned before any tick runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Mass must be positive (finite, or infinite for a pinned particle).
    InvalidMass,
    /// Timestep must be positive and finite.
    InvalidTimestep,
    /// Stiffness must be in [0, 1].
    InvalidStiffness,
    /// Grid spacing must be finite and no smaller than the relaxation clamp distance.
    InvalidSpacing,
    /// Grid dimensions must be at least 2x2.
    InvalidGridDimensions,
    /// A scalar or vector parameter is negative or not finite.
    InvalidParameter { name: &'static str },
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
    /// An anchor cell lies outside the grid.
    AnchorOutOfBounds { col: usize, row: usize, cols: usize, rows: usize },
    /// The two particles of a constraint coincide, so its rest length is zero.
    DegenerateConstraint { a: usize, b: usize },
    /// Predicted positions of a constraint collapsed onto each other mid-tick.
    DegenerateRelaxation { constraint: usize },
    /// A predicted position became NaN or infinite; the tick was not committed.
    NonFiniteState { particle: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidMass => write!(f, "mass must be positive (or infinite when pinned)"),
            ClothError::InvalidTimestep => write!(f, "timestep must be positive and finite"),
            ClothError::InvalidStiffness => write!(f, "stiffness must be in [0, 1]"),
            ClothError::InvalidSpacing => {
                write!(f, "grid spacing must be finite and at least the relaxation clamp distance")
            }
            ClothError::InvalidGridDimensions => write!(f, "grid must be at least 2x2"),
            ClothError::InvalidParameter { name } => {
                write!(f, "parameter `{}` must be finite and non-negative", name)
            }
            ClothError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
            ClothError::AnchorOutOfBounds { col, row, cols, rows } => {
                write!(f, "anchor ({}, {}) outside {}x{} grid", col, row, cols, rows)
            }
            ClothError::DegenerateConstraint { a, b } => {
                write!(f, "particles {} and {} coincide; constraint has zero rest length", a, b)
            }
            ClothError::DegenerateRelaxation { constraint } => {
                write!(f, "constraint {} collapsed during relaxation", constraint)
            }
            ClothError::NonFiniteState { particle } => {
                write!(f, "particle {} reached a non-finite position", particle)
            }
        }
    }
}

impl core::error::Error for ClothError {}
