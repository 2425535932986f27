//! Node-order tables and grid serialization.
//!
//! `cgns` and `vtk` hold the two independent node-order conventions; a
//! cell's VTK connectivity is the composition of both (see
//! [`crate::algs::connectivity`]). `vtu` writes and reads the result.

pub mod cgns;
pub mod vtk;
pub mod vtu;

pub use vtu::{PointDataArray, UnstructuredGrid, VtuReader, VtuWriter};
