//! Reference cell shapes reported by the mesh library.

use std::fmt;

/// Reference cell types of a DMPlex-style mesh.
///
/// Only segments, triangles, quadrilaterals, tetrahedra and hexahedra carry
/// CGNS node-order tables; the remaining shapes can appear in a mesh but
/// fail every table lookup.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    /// 0D vertex.
    #[default]
    Vertex,
    /// 1D segment/edge.
    Segment,
    /// 2D simplex (triangle).
    Triangle,
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D tensor-product cell (hex).
    Hexahedron,
    /// 3D wedge/prism.
    Prism,
    /// 3D pyramid.
    Pyramid,
}

impl CellType {
    /// Returns the topological dimension of the cell.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Vertex => 0,
            CellType::Segment => 1,
            CellType::Triangle | CellType::Quadrilateral => 2,
            CellType::Tetrahedron | CellType::Hexahedron | CellType::Prism | CellType::Pyramid => 3,
        }
    }

    /// Number of Lagrange nodes in the closure of one cell at `degree`.
    ///
    /// Returns `None` for shapes without a tensor/simplex node formula here
    /// (prisms, pyramids), for degree 0, and when the count overflows.
    pub fn lagrange_node_count(self, degree: usize) -> Option<usize> {
        if degree == 0 {
            return None;
        }
        let k1 = degree.checked_add(1)?;
        let k2 = degree.checked_add(2)?;
        match self {
            CellType::Vertex => Some(1),
            CellType::Segment => Some(k1),
            CellType::Triangle => Some(k1.checked_mul(k2)? / 2),
            CellType::Quadrilateral => k1.checked_mul(k1),
            CellType::Tetrahedron => {
                let k3 = degree.checked_add(3)?;
                Some(k1.checked_mul(k2)?.checked_mul(k3)? / 6)
            }
            CellType::Hexahedron => k1.checked_mul(k1)?.checked_mul(k1),
            CellType::Prism | CellType::Pyramid => None,
        }
    }

    /// Lower-case polytope name, as the mesh library prints it.
    pub fn name(self) -> &'static str {
        match self {
            CellType::Vertex => "point",
            CellType::Segment => "segment",
            CellType::Triangle => "triangle",
            CellType::Quadrilateral => "quadrilateral",
            CellType::Tetrahedron => "tetrahedron",
            CellType::Hexahedron => "hexahedron",
            CellType::Prism => "triangular prism",
            CellType::Pyramid => "pyramid",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
