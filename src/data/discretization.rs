//! Lagrange space rebuilt for the stored solution.
//!
//! The file records the polynomial degree of its field; the reader clears
//! the stored field and builds a fresh Lagrange space of the same degree on
//! the mesh's reference cell before loading values into it.

use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;

/// Lagrange finite-element space: reference cell, degree, components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LagrangeSpace {
    cell_type: CellType,
    degree: usize,
    components: usize,
}

impl LagrangeSpace {
    /// Build a space, rejecting cell/degree pairs without a node formula.
    pub fn try_new(cell_type: CellType, degree: usize, components: usize) -> Result<Self, MeshError> {
        if cell_type.lagrange_node_count(degree).is_none() {
            return Err(MeshError::UnsupportedDegree { cell_type, degree });
        }
        Ok(Self {
            cell_type,
            degree,
            components,
        })
    }

    /// Reference cell of the space.
    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Polynomial degree.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Field components per node.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Nodes in one cell closure.
    pub fn nodes_per_cell(&self) -> usize {
        // try_new guarantees a node count exists.
        self.cell_type.lagrange_node_count(self.degree).unwrap_or(0)
    }

    /// Coordinate dofs in one cell closure, `None` on overflow.
    pub fn closure_dofs(&self, coord_dim: usize) -> Option<usize> {
        self.nodes_per_cell().checked_mul(coord_dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_hexahedron_closure() {
        let space = LagrangeSpace::try_new(CellType::Hexahedron, 2, 5).unwrap();
        assert_eq!(space.nodes_per_cell(), 27);
        assert_eq!(space.closure_dofs(3), Some(81));
    }

    #[test]
    fn pyramid_has_no_space() {
        assert_eq!(
            LagrangeSpace::try_new(CellType::Pyramid, 1, 5).unwrap_err(),
            MeshError::UnsupportedDegree {
                cell_type: CellType::Pyramid,
                degree: 1
            }
        );
    }

    #[test]
    fn overflowing_degree_is_rejected() {
        let err = LagrangeSpace::try_new(CellType::Hexahedron, 3_000_000, 5).unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedDegree { degree: 3_000_000, .. }));
    }
}
