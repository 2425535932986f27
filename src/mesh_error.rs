//! MeshError: Unified error type for cgns-vtu public APIs
//!
//! Every fallible operation in the crate returns `Result<_, MeshError>`.
//! None of these are recovered locally: a failure aborts the current
//! grid-construction pass and the binaries turn it into an exit code.

use crate::topology::cell_type::CellType;
use thiserror::Error;

/// Unified error type for cgns-vtu operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// No CGNS permutation table exists for this (cell type, closure size) pair.
    #[error("Cell type {cell_type} with closure size {closure_size} is not supported")]
    UnsupportedCellConfiguration {
        cell_type: CellType,
        closure_size: usize,
    },
    /// No Lagrange node formula for this shape at this degree, or the node
    /// count would overflow.
    #[error("Degree {degree} is not supported for cell type {cell_type}")]
    UnsupportedDegree { cell_type: CellType, degree: usize },
    /// No VTK node-order translator exists for this node count.
    #[error("Cell type not supported: no VTK node order for {0} nodes per cell")]
    UnsupportedCellSize(usize),
    /// A closure whose length does not fit the coordinate dimension or the tables.
    #[error("Malformed closure for cell {cell}: {reason}")]
    MalformedClosure { cell: usize, reason: String },
    /// Solution values do not match the local node count times components.
    #[error("Solution layout mismatch: expected {expected} values, found {found}")]
    SolutionLayout { expected: usize, found: usize },
    /// The requested solution index does not exist in the file.
    #[error("Solution index {index} not found ({available} solutions stored)")]
    MissingSolution { index: i64, available: usize },
    /// A cell index outside the local cell range.
    #[error("Cell {cell} outside local range {start}..{end}")]
    CellOutOfRange { cell: usize, start: usize, end: usize },
    /// A closure index that does not address a local coordinate dof.
    #[error("Closure index {index} of cell {cell} exceeds {dofs} local coordinate dofs")]
    ClosureIndexOutOfRange { cell: usize, index: usize, dofs: usize },
    /// Wrapped I/O error (kept as text so the enum stays `Clone + Eq`).
    #[error("I/O error: {0}")]
    Io(String),
    /// The mesh snapshot could not be decoded.
    #[error("Mesh snapshot parse error: {0}")]
    SnapshotParse(String),
    /// A `.vtu` document could not be decoded.
    #[error("VTU parse error: {0}")]
    VtuParse(String),
    /// Parallel runtime failure (initialization or collective mismatch).
    #[error("Parallel runtime error: {0}")]
    Runtime(String),
}

impl MeshError {
    /// Process exit status for this failure kind. Success is always 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            MeshError::Io(_) => 2,
            MeshError::SnapshotParse(_) => 3,
            MeshError::UnsupportedCellConfiguration { .. }
            | MeshError::UnsupportedDegree { .. } => 4,
            MeshError::UnsupportedCellSize(_) => 5,
            MeshError::MalformedClosure { .. }
            | MeshError::CellOutOfRange { .. }
            | MeshError::ClosureIndexOutOfRange { .. } => 6,
            MeshError::SolutionLayout { .. } | MeshError::MissingSolution { .. } => 7,
            MeshError::VtuParse(_) => 8,
            MeshError::Runtime(_) => 9,
        }
    }
}

impl From<std::io::Error> for MeshError {
    fn from(err: std::io::Error) -> Self {
        MeshError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MeshError {
    fn from(err: serde_json::Error) -> Self {
        MeshError::SnapshotParse(err.to_string())
    }
}

impl From<roxmltree::Error> for MeshError {
    fn from(err: roxmltree::Error) -> Self {
        MeshError::VtuParse(err.to_string())
    }
}
