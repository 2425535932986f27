//! Mesh topology types shared with the mesh library.

pub mod cell_type;

pub use cell_type::CellType;
