//! Data module: coordinates, solution fields and the rebuilt discretization
#![warn(missing_docs)]

pub mod coordinates;
pub mod discretization;
pub mod solution;

pub use coordinates::LocalCoordinates;
pub use discretization::LagrangeSpace;
pub use solution::SolutionField;
