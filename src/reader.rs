//! Drives a [`PlexSource`] into a VTK unstructured grid.

use crate::algs::connectivity::ConnectivityBuilder;
use crate::data::discretization::LagrangeSpace;
use crate::data::solution::{COMPONENT_NAMES, COMPONENTS, FIELD_ARRAY_NAME};
use crate::io::vtu::{PointDataArray, UnstructuredGrid};
use crate::mesh_error::MeshError;
use crate::plex::{PlexMesh, PlexSource, SolutionIndex};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options for [`PlexCgnsReader`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderOptions {
    /// CGNS file (as exported by the mesh library) to read.
    pub file_name: PathBuf,
    /// Stored solution to load; negative counts from the end.
    pub solution_index: SolutionIndex,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            file_name: PathBuf::from("test.cgns"),
            solution_index: -1,
        }
    }
}

/// Reads a CGNS mesh and solution through the mesh library and produces
/// an [`UnstructuredGrid`] with a `fields` point array.
#[derive(Clone, Debug, Default)]
pub struct PlexCgnsReader {
    options: ReaderOptions,
}

impl PlexCgnsReader {
    pub fn new(options: ReaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Open the configured file and build the grid.
    pub fn update(&self) -> Result<UnstructuredGrid, MeshError> {
        let mesh = PlexMesh::open(&self.options.file_name)?;
        self.request_data(&mesh)
    }

    /// Build the grid from an already opened mesh.
    pub fn request_data<S: PlexSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<UnstructuredGrid, MeshError> {
        let cells = source.cell_range();
        let coord_dim = source.coordinate_dim();
        let degree = source.field_degree();
        let cell_type = match cells.clone().next() {
            Some(first) => source.cell_type(first)?,
            None => {
                log::warn!("no local cells; emitting points only");
                let points = source.local_coordinates().to_xyz();
                let mut grid = UnstructuredGrid::new(points, Default::default());
                self.attach_solution(source, &mut grid)?;
                return Ok(grid);
            }
        };

        // Node count comes from the closure itself; tables are resolved
        // before the stored degree is trusted.
        let first_closure = source.closure_indices(cells.start)?;
        let nodes = match first_closure.len().checked_div(coord_dim) {
            Some(nodes) if first_closure.len() % coord_dim == 0 => nodes,
            _ => {
                return Err(MeshError::MalformedClosure {
                    cell: cells.start,
                    reason: format!(
                        "{} closure dofs not divisible by coordinate dimension {coord_dim}",
                        first_closure.len()
                    ),
                });
            }
        };
        let builder = ConnectivityBuilder::new(cell_type, nodes, coord_dim)?;

        let space = LagrangeSpace::try_new(cell_type, degree, COMPONENTS)?;
        if space.closure_dofs(coord_dim) != Some(first_closure.len()) {
            return Err(MeshError::MalformedClosure {
                cell: cells.start,
                reason: format!(
                    "closure has {nodes} nodes, degree-{degree} {cell_type} needs {}",
                    space.nodes_per_cell()
                ),
            });
        }
        log::debug!(
            "dimension {}, {cell_type} cells of degree {degree}, {} cells",
            source.dimension(),
            cells.len()
        );

        let cell_arrays = builder.build(source)?;

        let points = source.local_coordinates().to_xyz();
        let mut grid = UnstructuredGrid::new(points, cell_arrays);
        self.attach_solution(source, &mut grid)?;
        Ok(grid)
    }

    fn attach_solution<S: PlexSource + ?Sized>(
        &self,
        source: &S,
        grid: &mut UnstructuredGrid,
    ) -> Result<(), MeshError> {
        let solution = source.load_solution(self.options.solution_index)?;
        log::info!(
            "loaded solution {:?}: {} nodes x {COMPONENTS} components",
            solution.name(),
            solution.node_count()
        );
        grid.add_point_data(PointDataArray {
            name: FIELD_ARRAY_NAME.to_string(),
            components: COMPONENTS,
            component_names: COMPONENT_NAMES.iter().map(|s| s.to_string()).collect(),
            values: solution.into_values(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plex::{PlexSnapshot, SolutionRecord};
    use crate::topology::cell_type::CellType;

    fn single_hex(degree: usize, closure: Vec<usize>) -> PlexMesh {
        let coordinates = vec![
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
        ];
        PlexMesh::try_from_snapshot(PlexSnapshot {
            dimension: 3,
            cell_type: CellType::Hexahedron,
            degree,
            coordinate_dim: 3,
            coordinates,
            closures: vec![closure],
            solutions: vec![SolutionRecord {
                name: "FlowSolution".into(),
                time: None,
                values: vec![2.0; 40],
            }],
        })
        .unwrap()
    }

    #[test]
    fn closure_disagreeing_with_degree_is_malformed() {
        let mesh = single_hex(2, (0..24).collect());
        let err = PlexCgnsReader::default().request_data(&mesh).unwrap_err();
        assert!(matches!(err, MeshError::MalformedClosure { cell: 0, .. }));
    }

    #[test]
    fn unknown_node_count_is_an_unsupported_size() {
        let mesh = single_hex(1, (0..21).collect());
        let err = PlexCgnsReader::default().request_data(&mesh).unwrap_err();
        assert_eq!(err, MeshError::UnsupportedCellSize(7));
    }

    #[test]
    fn huge_stored_degree_is_rejected_without_panicking() {
        let mesh = single_hex(3_000_000, (0..24).collect());
        let err = PlexCgnsReader::default().request_data(&mesh).unwrap_err();
        assert_eq!(
            err,
            MeshError::UnsupportedDegree {
                cell_type: CellType::Hexahedron,
                degree: 3_000_000
            }
        );
    }

    #[test]
    fn degree_zero_is_rejected() {
        let mesh = single_hex(0, (0..24).collect());
        let err = PlexCgnsReader::default().request_data(&mesh).unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedDegree { degree: 0, .. }));
    }

    #[test]
    fn linear_prism_has_no_vtk_translator() {
        let mesh = PlexMesh::try_from_snapshot(PlexSnapshot {
            dimension: 3,
            cell_type: CellType::Prism,
            degree: 1,
            coordinate_dim: 3,
            coordinates: vec![0.0; 18],
            closures: vec![(0..18).collect()],
            solutions: vec![],
        })
        .unwrap();
        let err = PlexCgnsReader::default().request_data(&mesh).unwrap_err();
        assert_eq!(err, MeshError::UnsupportedCellSize(6));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn fields_array_carries_component_names() {
        let mesh = single_hex(1, (0..24).collect());
        let grid = PlexCgnsReader::default().request_data(&mesh).unwrap();
        let fields = grid.point_array("fields").unwrap();
        assert_eq!(fields.components, 5);
        assert_eq!(fields.component_names[0], "Pressure");
        assert_eq!(fields.component_names[4], "Temperature");
        assert_eq!(grid.cells.types, vec![12]);
        assert_eq!(grid.cells.offsets, vec![8]);
    }

    #[test]
    fn options_default_to_last_solution() {
        let opts: ReaderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, ReaderOptions::default());
        assert_eq!(opts.solution_index, -1);
    }

    #[test]
    fn options_reject_unknown_keys() {
        let err = serde_json::from_str::<ReaderOptions>(r#"{"cgns_parallel": false}"#);
        assert!(err.is_err());
    }
}
