//! CGNS node ordering for high-order cells.
//!
//! The mesh library lists a cell's closure as cell interior, then faces,
//! then edges, then vertices. CGNS lists vertices first, then mid-edge,
//! mid-face and interior nodes
//! (<https://cgns.github.io/CGNS_docs_current/sids/conv.html#unstructgrid>).
//! Each table below maps CGNS slot `i` to the closure slot that holds that
//! node. There is exactly one table per polynomial degree.

use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;

static BAR_2: [usize; 2] = [0, 1];
static BAR_3: [usize; 3] = [1, 2, 0];
static BAR_4: [usize; 4] = [2, 3, 0, 1];
static BAR_5: [usize; 5] = [3, 4, 0, 1, 2];

static TRI_3: [usize; 3] = [0, 1, 2];
static TRI_6: [usize; 6] = [3, 4, 5, 0, 1, 2];
static TRI_10: [usize; 10] = [7, 8, 9, 1, 2, 3, 4, 5, 6, 0];

static QUAD_4: [usize; 4] = [0, 1, 2, 3];
#[rustfmt::skip]
static QUAD_9: [usize; 9] = [
    5, 6, 7, 8, // vertices
    1, 2, 3, 4, // edges
    0,          // center
];
#[rustfmt::skip]
static QUAD_16: [usize; 16] = [
    12, 13, 14, 15,               // vertices
    4,  5,  6,  7,  8, 9, 10, 11, // edges
    0,  1,  3,  2,                // centers
];
#[rustfmt::skip]
static QUAD_25: [usize; 25] = [
    21, 22, 23, 24,                                 // vertices
    9,  10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, // edges
    0,  1,  2,  5,  8,  7,  6,  3,  4,              // centers
];

static TETRA_4: [usize; 4] = [0, 2, 1, 3];
static TETRA_10: [usize; 10] = [6, 8, 7, 9, 2, 1, 0, 3, 5, 4];
#[rustfmt::skip]
static TETRA_20: [usize; 20] = [
    16, 18, 17, 19,         // vertices
    9,  8,  7,  6,  5,  4,  // bottom edges
    10, 11, 14, 15, 13, 12, // side edges
    0,  2,  3,  1,          // faces
];

static HEXA_8: [usize; 8] = [0, 3, 2, 1, 4, 5, 6, 7];
#[rustfmt::skip]
static HEXA_27: [usize; 27] = [
    19, 22, 21, 20, 23, 24, 25, 26, // vertices
    10, 9,  8,  7,                  // bottom edges
    16, 15, 18, 17,                 // mid edges
    11, 12, 13, 14,                 // top edges
    1,  3,  5,  4,  6,  2,          // faces
    0,                              // center
];
#[rustfmt::skip]
static HEXA_64: [usize; 64] = [
    56, 59, 58, 57, 60, 61, 62, 63, // vertices
    39, 38, 37, 36, 35, 34, 33, 32, // bottom edges
    51, 50, 48, 49, 52, 53, 55, 54, // mid edges (ParaView order: 21-22 swapped with 23-24)
    40, 41, 42, 43, 44, 45, 46, 47, // top edges
    8,  10, 11, 9,                  // z-minus face
    16, 17, 19, 18,                 // y-minus face
    24, 25, 27, 26,                 // x-plus face
    20, 21, 23, 22,                 // y-plus face
    30, 28, 29, 31,                 // x-minus face
    12, 13, 15, 14,                 // z-plus face
    0,  1,  3,  2,  4,  5,  7,  6,  // center
];

/// Every (cell type, closure size) pair with a CGNS table.
pub const SUPPORTED_CONFIGURATIONS: [(CellType, usize); 17] = [
    (CellType::Segment, 2),
    (CellType::Segment, 3),
    (CellType::Segment, 4),
    (CellType::Segment, 5),
    (CellType::Triangle, 3),
    (CellType::Triangle, 6),
    (CellType::Triangle, 10),
    (CellType::Quadrilateral, 4),
    (CellType::Quadrilateral, 9),
    (CellType::Quadrilateral, 16),
    (CellType::Quadrilateral, 25),
    (CellType::Tetrahedron, 4),
    (CellType::Tetrahedron, 10),
    (CellType::Tetrahedron, 20),
    (CellType::Hexahedron, 8),
    (CellType::Hexahedron, 27),
    (CellType::Hexahedron, 64),
];

/// Permutation from mesh-library closure order to CGNS node order.
///
/// `closure_size` counts nodes, not coordinate dofs. Slot `i` of the result
/// is the closure slot holding the `i`-th CGNS node.
///
/// # Errors
/// [`MeshError::UnsupportedCellConfiguration`] for any pair missing from
/// [`SUPPORTED_CONFIGURATIONS`].
pub fn cgns_permutation(
    cell_type: CellType,
    closure_size: usize,
) -> Result<&'static [usize], MeshError> {
    let perm: &'static [usize] = match (cell_type, closure_size) {
        (CellType::Segment, 2) => &BAR_2,
        (CellType::Segment, 3) => &BAR_3,
        (CellType::Segment, 4) => &BAR_4,
        (CellType::Segment, 5) => &BAR_5,
        (CellType::Triangle, 3) => &TRI_3,
        (CellType::Triangle, 6) => &TRI_6,
        (CellType::Triangle, 10) => &TRI_10,
        (CellType::Quadrilateral, 4) => &QUAD_4,
        (CellType::Quadrilateral, 9) => &QUAD_9,
        (CellType::Quadrilateral, 16) => &QUAD_16,
        (CellType::Quadrilateral, 25) => &QUAD_25,
        (CellType::Tetrahedron, 4) => &TETRA_4,
        (CellType::Tetrahedron, 10) => &TETRA_10,
        (CellType::Tetrahedron, 20) => &TETRA_20,
        (CellType::Hexahedron, 8) => &HEXA_8,
        (CellType::Hexahedron, 27) => &HEXA_27,
        (CellType::Hexahedron, 64) => &HEXA_64,
        _ => {
            return Err(MeshError::UnsupportedCellConfiguration {
                cell_type,
                closure_size,
            });
        }
    };
    log::debug!("CGNS permutation for {cell_type} with closure size {closure_size}");
    Ok(perm)
}
