//! Local coordinate storage for mesh nodes.
//!
//! Coordinates are a flat buffer with a fixed dimension per node, the way
//! the mesh library hands out its local coordinate vector.

use crate::mesh_error::MeshError;

/// Coordinate buffer with an attached dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct LocalCoordinates {
    dimension: usize,
    values: Vec<f64>,
}

impl LocalCoordinates {
    /// Wrap `values`, checking that they hold whole nodes of `dimension`.
    pub fn try_new(dimension: usize, values: Vec<f64>) -> Result<Self, MeshError> {
        if dimension == 0 || dimension > 3 {
            return Err(MeshError::SnapshotParse(format!(
                "coordinate dimension must be 1..=3, got {dimension}"
            )));
        }
        if values.len() % dimension != 0 {
            return Err(MeshError::SnapshotParse(format!(
                "{} coordinate values not divisible by dimension {dimension}",
                values.len()
            )));
        }
        Ok(Self { dimension, values })
    }

    /// Returns the spatial dimension per node.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of local nodes, ghosts included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.values.len() / self.dimension
    }

    /// Number of coordinate dofs (`node_count * dimension`).
    #[inline]
    pub fn dof_count(&self) -> usize {
        self.values.len()
    }

    /// Raw interleaved coordinate values.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Nodes padded with zeros to three components, as VTK points.
    pub fn to_xyz(&self) -> Vec<[f64; 3]> {
        self.values
            .chunks_exact(self.dimension)
            .map(|node| {
                let mut xyz = [0.0f64; 3];
                xyz[..node.len()].copy_from_slice(node);
                xyz
            })
            .collect()
    }
}
