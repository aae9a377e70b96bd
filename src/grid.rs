//! Rectangular cloth topology: particles, constraints, and triangles.

use crate::aero::Triangle;
use crate::constraint::{DistanceConstraint, MIN_RELAXATION_DISTANCE};
use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which grid particles are pinned.
///
/// Rows grow along +Y, so the last row is the top edge of a hanging cloth.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Anchors {
    /// Nothing pinned.
    None,
    /// The two corners of the last row.
    TopCorners,
    /// Every particle of the last row.
    TopRow,
    /// Explicit `(col, row)` cells.
    Cells(Vec<(usize, usize)>),
}

/// Configuration for a cloth grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig<F: Float> {
    pub cols: usize,
    pub rows: usize,
    /// Distance between neighbouring particles. Must be at least
    /// [`MIN_RELAXATION_DISTANCE`]. Default: 1.0.
    pub spacing: F,
    /// Mass of every unpinned particle. Default: 0.1.
    pub particle_mass: F,
    /// Stiffness shared by all constraints. Default: 1.0.
    pub stiffness: F,
    pub anchors: Anchors,
}

impl<F: Float> GridConfig<F> {
    /// A `cols x rows` grid with default spacing, mass, and stiffness,
    /// hanging from its top corners.
    pub fn new(cols: usize, rows: usize) -> Self {
        GridConfig {
            cols,
            rows,
            spacing: F::one(),
            particle_mass: F::from_f32(0.1),
            stiffness: F::one(),
            anchors: Anchors::TopCorners,
        }
    }

    pub fn with_spacing(mut self, spacing: F) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_anchors(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }

    /// Pin one more `(col, row)` cell, keeping any explicit cells already set.
    pub fn with_anchor(mut self, col: usize, row: usize) -> Self {
        match &mut self.anchors {
            Anchors::Cells(cells) => cells.push((col, row)),
            _ => self.anchors = Anchors::Cells(alloc::vec![(col, row)]),
        }
        self
    }

    pub fn with_top_corners_pinned(self) -> Self {
        self.with_anchors(Anchors::TopCorners)
    }

    fn anchor_cells(&self) -> Vec<(usize, usize)> {
        let top = self.rows - 1;
        match &self.anchors {
            Anchors::None => Vec::new(),
            Anchors::TopCorners => alloc::vec![(0, top), (self.cols - 1, top)],
            Anchors::TopRow => (0..self.cols).map(|col| (col, top)).collect(),
            Anchors::Cells(cells) => cells.clone(),
        }
    }
}

impl<F: Float> Default for GridConfig<F> {
    fn default() -> Self {
        Self::new(64, 64)
    }
}

/// A cloth sheet laid out as a `cols x rows` grid in the XY plane.
///
/// Particle at (col, row) has index `row * cols + col` and sits at
/// `origin + (col * spacing, row * spacing, 0)`.
#[derive(Clone, Debug)]
pub struct ClothGrid<F: Float> {
    particles: Vec<Particle<F>>,
    constraints: Vec<DistanceConstraint<F>>,
    triangles: Vec<Triangle>,
    cols: usize,
    rows: usize,
}

impl<F: Float> ClothGrid<F> {
    /// Build the particles, constraints, and triangles for `config`.
    ///
    /// For every particle, in row-major order, a constraint is added to the
    /// right neighbour, the neighbour in the next row, and the diagonal
    /// neighbour `(col + 1, row + 1)`. The opposite diagonal is never added,
    /// so shear resistance differs between the two triangles of a cell.
    ///
    /// Each cell is split into `(i, i + cols, i + 1)` and
    /// `(i + 1, i + cols, i + cols + 1)` where `i` is its lower-left particle.
    pub fn build(origin: Vec3<F>, config: &GridConfig<F>) -> Result<Self, ClothError> {
        let (cols, rows) = (config.cols, config.rows);
        if cols < 2 || rows < 2 {
            return Err(ClothError::InvalidGridDimensions);
        }
        if !config.spacing.is_finite() || config.spacing < F::from_f32(MIN_RELAXATION_DISTANCE) {
            return Err(ClothError::InvalidSpacing);
        }
        if config.particle_mass.is_infinite() {
            // Pinning goes through `anchors`; a free particle needs finite mass.
            return Err(ClothError::InvalidMass);
        }

        let count = cols * rows;
        let mut pinned = alloc::vec![false; count];
        for (col, row) in config.anchor_cells() {
            if col >= cols || row >= rows {
                return Err(ClothError::AnchorOutOfBounds { col, row, cols, rows });
            }
            pinned[row * cols + col] = true;
        }

        let mut particles = Vec::with_capacity(count);
        for row in 0..rows {
            for col in 0..cols {
                let pos = origin
                    + Vec3::new(
                        F::from_f32(col as f32) * config.spacing,
                        F::from_f32(row as f32) * config.spacing,
                        F::zero(),
                    );
                let particle = if pinned[row * cols + col] {
                    Particle::pinned(pos)
                } else {
                    Particle::new(pos, config.particle_mass)?
                };
                particles.push(particle);
            }
        }

        let mut constraints = Vec::with_capacity(3 * count);
        for row in 0..rows {
            for col in 0..cols {
                let i = row * cols + col;
                let has_right = col + 1 < cols;
                let has_up = row + 1 < rows;
                if has_right {
                    constraints.push(DistanceConstraint::between(i, i + 1, &particles, config.stiffness)?);
                }
                if has_up {
                    constraints.push(DistanceConstraint::between(i, i + cols, &particles, config.stiffness)?);
                }
                if has_right && has_up {
                    constraints.push(DistanceConstraint::between(i, i + cols + 1, &particles, config.stiffness)?);
                }
            }
        }

        let mut triangles = Vec::with_capacity(2 * (cols - 1) * (rows - 1));
        for row in 0..(rows - 1) {
            for col in 0..(cols - 1) {
                let i = row * cols + col;
                triangles.push([i, i + cols, i + 1]);
                triangles.push([i + 1, i + cols, i + cols + 1]);
            }
        }

        Ok(ClothGrid { particles, constraints, triangles, cols, rows })
    }

    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    pub fn position_at(&self, col: usize, row: usize) -> Vec3<F> {
        self.particles[self.index(col, row)].position
    }

    /// Triangle vertex indices flattened for a render index buffer.
    pub fn index_buffer(&self) -> Vec<u32> {
        flatten_triangles(&self.triangles)
    }

    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }
    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn constraints(&self) -> &[DistanceConstraint<F>] { &self.constraints }
    pub fn triangles(&self) -> &[Triangle] { &self.triangles }

    pub fn into_parts(self) -> (Vec<Particle<F>>, Vec<DistanceConstraint<F>>, Vec<Triangle>) {
        (self.particles, self.constraints, self.triangles)
    }
}

pub(crate) fn flatten_triangles(triangles: &[Triangle]) -> Vec<u32> {
    triangles.iter().flat_map(|t| t.iter().map(|&i| i as u32)).collect()
}
