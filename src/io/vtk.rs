//! VTK cell tags and CGNS-to-VTK node order for hexahedra.
//!
//! VTK agrees with CGNS on the vertices and bottom/top edges of a
//! hexahedron but lists vertical edges, faces and interior nodes in its own
//! order. The translators below map VTK slot `i` to the CGNS slot that
//! holds that node.

use crate::mesh_error::MeshError;

static HEXA_8_TO_VTK: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
#[rustfmt::skip]
static HEXA_27_TO_VTK: [usize; 27] = [
    0, 1, 2, 3, 4, 5, 6, 7,
    8, 9, 10, 11, 16, 17, 18, 19, 12, 13, 14, 15,
    24, 22, 21, 23, 20, 25,
    26,
];
#[rustfmt::skip]
static HEXA_64_TO_VTK: [usize; 64] = [
    0, 1, 2, 3, 4, 5, 6, 7,
    8, 9, 10, 11, 13, 12, 15, 14, 24, 25, 26, 27, 29, 28, 31, 30, 16, 17, 18, 19, 22, 23, 20, 21,
    49, 48, 50, 51, 40, 41, 43, 42, 36, 37, 39, 38, 45, 44, 46, 47, 32, 33, 35, 34, 52, 53, 55, 54,
    56, 57, 59, 58, 60, 61, 63, 62,
];

/// VTK cell-type tags written into the `types` array.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum VtkCellType {
    /// `VTK_HEXAHEDRON`, 8 nodes.
    Hexahedron,
    /// `VTK_TRIQUADRATIC_HEXAHEDRON`, 27 nodes.
    TriquadraticHexahedron,
    /// `VTK_LAGRANGE_HEXAHEDRON`, arbitrary order (64 nodes here).
    LagrangeHexahedron,
}

impl VtkCellType {
    /// Numeric tag from `vtkCellType.h`.
    pub fn code(self) -> u8 {
        match self {
            VtkCellType::Hexahedron => 12,
            VtkCellType::TriquadraticHexahedron => 29,
            VtkCellType::LagrangeHexahedron => 72,
        }
    }

    /// Inverse of [`VtkCellType::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            12 => Some(VtkCellType::Hexahedron),
            29 => Some(VtkCellType::TriquadraticHexahedron),
            72 => Some(VtkCellType::LagrangeHexahedron),
            _ => None,
        }
    }
}

/// A CGNS-to-VTK node permutation together with the tag it implies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VtkNodeOrder {
    /// VTK slot `i` reads CGNS slot `permutation[i]`.
    pub permutation: &'static [usize],
    /// Tag for every cell using this order.
    pub cell_type: VtkCellType,
}

impl VtkNodeOrder {
    /// Nodes per cell.
    #[inline]
    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }
}

/// Node order for a hexahedron with `node_count` nodes (8, 27 or 64).
///
/// # Errors
/// [`MeshError::UnsupportedCellSize`] for any other node count.
pub fn vtk_hexahedron_order(node_count: usize) -> Result<VtkNodeOrder, MeshError> {
    let (permutation, cell_type) = match node_count {
        8 => (&HEXA_8_TO_VTK[..], VtkCellType::Hexahedron),
        27 => (&HEXA_27_TO_VTK[..], VtkCellType::TriquadraticHexahedron),
        64 => (&HEXA_64_TO_VTK[..], VtkCellType::LagrangeHexahedron),
        other => return Err(MeshError::UnsupportedCellSize(other)),
    };
    Ok(VtkNodeOrder {
        permutation,
        cell_type,
    })
}
