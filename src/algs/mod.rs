//! Algorithms over local mesh data.

pub mod communicator;
pub mod connectivity;

pub use connectivity::{CellArrays, ConnectivityBuilder, cell_connectivity};
