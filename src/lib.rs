#![cfg_attr(docsrs, feature(doc_cfg))]
//! # cgns-vtu
//!
//! cgns-vtu turns the local state of a DMPlex-style mesh loaded from a CGNS
//! file into a VTK XML unstructured grid. The mesh library does the hard
//! parts (CGNS parsing, distribution, ghost exchange); this crate reorders
//! each cell's closure nodes from the library's order into CGNS order and
//! then into VTK order, attaches the five-component flow solution as point
//! data, and writes ASCII `.vtu`.
//!
//! ## Features
//! - CGNS node-order tables for segments, triangles, quadrilaterals,
//!   tetrahedra and hexahedra up to the degrees CGNS defines
//! - CGNS-to-VTK translators for linear, triquadratic and cubic Lagrange
//!   hexahedra
//! - A [`plex::PlexSource`] seam to the mesh library, with a snapshot-backed
//!   implementation
//! - ASCII `.vtu` writer and reader
//! - Serial or MPI runtime (`mpi-support` feature) for the binaries
//!
//! ## Usage
//!
//! ```no_run
//! use cgns_vtu::prelude::*;
//!
//! let reader = PlexCgnsReader::new(ReaderOptions::default());
//! let grid = reader.update()?;
//! VtuWriter::default().write_file("grid.vtu", &grid)?;
//! # Ok::<(), cgns_vtu::mesh_error::MeshError>(())
//! ```

pub mod algs;
pub mod data;
pub mod io;
pub mod mesh_error;
pub mod plex;
pub mod reader;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::communicator::{ParallelRuntime, SerialRuntime};
    #[cfg(feature = "mpi-support")]
    pub use crate::algs::communicator::MpiRuntime;
    pub use crate::algs::connectivity::{CellArrays, ConnectivityBuilder};
    pub use crate::io::cgns::cgns_permutation;
    pub use crate::io::vtk::{VtkCellType, VtkNodeOrder, vtk_hexahedron_order};
    pub use crate::io::vtu::{PointDataArray, UnstructuredGrid, VtuReader, VtuWriter};
    pub use crate::mesh_error::MeshError;
    pub use crate::plex::{PlexMesh, PlexSnapshot, PlexSource, SolutionRecord};
    pub use crate::reader::{PlexCgnsReader, ReaderOptions};
    pub use crate::topology::cell_type::CellType;
}
