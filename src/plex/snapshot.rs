//! Serialized local state of a mesh loaded from CGNS.
//!
//! A snapshot is JSON:
//!
//! ```json
//! {
//!   "dimension": 3,
//!   "cell_type": "hexahedron",
//!   "degree": 1,
//!   "coordinate_dim": 3,
//!   "coordinates": [0.0, 0.0, 0.0, ...],
//!   "closures": [[0, 1, 2, ...]],
//!   "solutions": [{ "name": "FlowSolution", "time": 0.5, "values": [...] }]
//! }
//! ```

use crate::topology::cell_type::CellType;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlexSnapshot {
    /// Topological dimension.
    pub dimension: usize,
    /// Reference shape shared by every cell.
    pub cell_type: CellType,
    /// Polynomial degree of the stored field.
    pub degree: usize,
    pub coordinate_dim: usize,
    /// Local coordinate vector, `coordinate_dim` values per node.
    pub coordinates: Vec<f64>,
    /// Per-cell closure dof indices into `coordinates`.
    pub closures: Vec<Vec<usize>>,
    #[serde(default)]
    pub solutions: Vec<SolutionRecord>,
}

/// One stored solution (a CGNS `FlowSolution_t` node).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub name: String,
    #[serde(default)]
    pub time: Option<f64>,
    /// Interleaved values, five per local node.
    pub values: Vec<f64>,
}
