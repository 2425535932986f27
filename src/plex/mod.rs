//! Seam to the external mesh library.
//!
//! The mesh library parses CGNS, distributes the mesh and owns the local
//! sections. The reader only needs what a rank holds after that: the cell
//! range, cell types, the local coordinate vector, each cell's closure
//! indices into it, and the stored solutions. [`PlexSource`] is that
//! surface; [`PlexMesh`] implements it from a snapshot of the library's
//! local state.

pub mod snapshot;

use crate::data::coordinates::LocalCoordinates;
use crate::data::solution::SolutionField;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::CellType;
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::Range;
use std::path::Path;

pub use snapshot::{PlexSnapshot, SolutionRecord};

/// Selects which stored solution to load. Negative values count from the
/// end, so `-1` is the last one written.
pub type SolutionIndex = i64;

/// Local view of a distributed mesh, as the mesh library exposes it.
pub trait PlexSource {
    /// Topological dimension of the mesh.
    fn dimension(&self) -> usize;

    /// Components per coordinate node.
    fn coordinate_dim(&self) -> usize;

    /// Local cells (height-0 stratum).
    fn cell_range(&self) -> Range<usize>;

    /// Reference shape of `cell`.
    fn cell_type(&self, cell: usize) -> Result<CellType, MeshError>;

    /// Polynomial degree of the field stored in the file.
    fn field_degree(&self) -> usize;

    /// Local coordinate vector, ghost nodes included.
    fn local_coordinates(&self) -> &LocalCoordinates;

    /// Coordinate-section dof indices of `cell`'s closure, in closure order.
    fn closure_indices(&self, cell: usize) -> Result<&[usize], MeshError>;

    /// Load a stored solution into the local layout.
    fn load_solution(&self, index: SolutionIndex) -> Result<SolutionField, MeshError>;
}

/// In-memory local mesh restored from a [`PlexSnapshot`].
#[derive(Clone, Debug)]
pub struct PlexMesh {
    dimension: usize,
    cell_type: CellType,
    degree: usize,
    coordinates: LocalCoordinates,
    closures: Vec<Vec<usize>>,
    solutions: Vec<SolutionRecord>,
}

impl PlexMesh {
    /// Open a snapshot file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let path = path.as_ref();
        log::info!("loading mesh {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a snapshot from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MeshError> {
        let snapshot: PlexSnapshot = serde_json::from_reader(reader)?;
        Self::try_from_snapshot(snapshot)
    }

    /// Validate a snapshot: every closure index must address a local
    /// coordinate dof.
    pub fn try_from_snapshot(snapshot: PlexSnapshot) -> Result<Self, MeshError> {
        let coordinates =
            LocalCoordinates::try_new(snapshot.coordinate_dim, snapshot.coordinates)?;
        let dofs = coordinates.dof_count();
        for (cell, closure) in snapshot.closures.iter().enumerate() {
            if let Some(&index) = closure.iter().find(|&&i| i >= dofs) {
                return Err(MeshError::ClosureIndexOutOfRange { cell, index, dofs });
            }
        }
        if snapshot.closures.is_empty() {
            log::warn!("mesh has no local cells");
        }
        Ok(Self {
            dimension: snapshot.dimension,
            cell_type: snapshot.cell_type,
            degree: snapshot.degree,
            coordinates,
            closures: snapshot.closures,
            solutions: snapshot.solutions,
        })
    }

    /// Number of solutions stored in the file.
    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    fn check_cell(&self, cell: usize) -> Result<(), MeshError> {
        if cell >= self.closures.len() {
            return Err(MeshError::CellOutOfRange {
                cell,
                start: 0,
                end: self.closures.len(),
            });
        }
        Ok(())
    }

    fn resolve_solution(&self, index: SolutionIndex) -> Result<&SolutionRecord, MeshError> {
        let available = self.solutions.len();
        let missing = MeshError::MissingSolution { index, available };
        let resolved = if index < 0 {
            available.checked_sub(index.unsigned_abs() as usize)
        } else {
            Some(index as usize)
        };
        resolved
            .and_then(|i| self.solutions.get(i))
            .ok_or(missing)
    }
}

impl PlexSource for PlexMesh {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn coordinate_dim(&self) -> usize {
        self.coordinates.dimension()
    }

    fn cell_range(&self) -> Range<usize> {
        0..self.closures.len()
    }

    fn cell_type(&self, cell: usize) -> Result<CellType, MeshError> {
        self.check_cell(cell)?;
        Ok(self.cell_type)
    }

    fn field_degree(&self) -> usize {
        self.degree
    }

    fn local_coordinates(&self) -> &LocalCoordinates {
        &self.coordinates
    }

    fn closure_indices(&self, cell: usize) -> Result<&[usize], MeshError> {
        self.check_cell(cell)?;
        Ok(&self.closures[cell])
    }

    fn load_solution(&self, index: SolutionIndex) -> Result<SolutionField, MeshError> {
        let record = self.resolve_solution(index)?;
        if let Some(time) = record.time {
            log::info!("solution {:?} at time {time}", record.name);
        }
        SolutionField::try_new(
            record.name.clone(),
            record.time,
            record.values.clone(),
            self.coordinates.node_count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_segments() -> PlexSnapshot {
        PlexSnapshot {
            dimension: 1,
            cell_type: CellType::Segment,
            degree: 1,
            coordinate_dim: 1,
            coordinates: vec![0.0, 1.0, 2.0],
            closures: vec![vec![0, 1], vec![1, 2]],
            solutions: vec![
                SolutionRecord {
                    name: "first".into(),
                    time: Some(0.0),
                    values: vec![0.0; 15],
                },
                SolutionRecord {
                    name: "last".into(),
                    time: Some(1.0),
                    values: vec![1.0; 15],
                },
            ],
        }
    }

    #[test]
    fn negative_index_counts_from_end() {
        let mesh = PlexMesh::try_from_snapshot(two_segments()).unwrap();
        assert_eq!(mesh.load_solution(-1).unwrap().name(), "last");
        assert_eq!(mesh.load_solution(-2).unwrap().name(), "first");
        assert_eq!(mesh.load_solution(0).unwrap().name(), "first");
        assert_eq!(
            mesh.load_solution(-3).unwrap_err(),
            MeshError::MissingSolution {
                index: -3,
                available: 2
            }
        );
        assert!(mesh.load_solution(2).is_err());
    }

    #[test]
    fn closure_outside_coordinates_is_rejected() {
        let mut snapshot = two_segments();
        snapshot.closures[1] = vec![1, 3];
        let err = PlexMesh::try_from_snapshot(snapshot).unwrap_err();
        assert_eq!(
            err,
            MeshError::ClosureIndexOutOfRange {
                cell: 1,
                index: 3,
                dofs: 3
            }
        );
    }

    #[test]
    fn closures_are_fetched_by_cell() {
        let mesh = PlexMesh::try_from_snapshot(two_segments()).unwrap();
        assert_eq!(mesh.closure_indices(1).unwrap(), &[1, 2]);
        assert!(matches!(
            mesh.closure_indices(2),
            Err(MeshError::CellOutOfRange { cell: 2, .. })
        ));
    }

    #[test]
    fn short_solution_is_a_layout_error() {
        let mut snapshot = two_segments();
        snapshot.solutions[1].values.pop();
        let mesh = PlexMesh::try_from_snapshot(snapshot).unwrap();
        assert!(matches!(
            mesh.load_solution(-1),
            Err(MeshError::SolutionLayout { .. })
        ));
    }
}
