//! Per-cell VTK connectivity from mesh-library closures.
//!
//! A closure lists coordinate dofs, `coord_dim` per node, in the mesh
//! library's order. Two independent permutations turn that into VTK order:
//! the CGNS table first, then the CGNS-to-VTK translator.

use crate::io::cgns::cgns_permutation;
use crate::io::vtk::{VtkNodeOrder, vtk_hexahedron_order};
use crate::mesh_error::MeshError;
use crate::plex::PlexSource;
use crate::topology::cell_type::CellType;

/// Write one cell's VTK point indices into `out`.
///
/// For each slot `i`: `tmp[i] = closure[perm[i] * coord_dim] / coord_dim`,
/// then `out[i] = tmp[translator[i]]`. `cell` only labels errors.
///
/// # Errors
/// [`MeshError::MalformedClosure`] when the closure length is not a
/// multiple of `coord_dim`, its node count disagrees with either table or
/// with `out`, or a table entry points past the closure.
pub fn cell_connectivity(
    cell: usize,
    closure: &[usize],
    coord_dim: usize,
    perm: &[usize],
    translator: &[usize],
    out: &mut [i64],
) -> Result<(), MeshError> {
    let malformed = |reason: String| MeshError::MalformedClosure { cell, reason };
    if coord_dim == 0 {
        return Err(malformed("coordinate dimension is zero".into()));
    }
    if closure.len() % coord_dim != 0 {
        return Err(malformed(format!(
            "{} closure dofs not divisible by coordinate dimension {coord_dim}",
            closure.len()
        )));
    }
    let nodes = closure.len() / coord_dim;
    if perm.len() != nodes || translator.len() != nodes || out.len() != nodes {
        return Err(malformed(format!(
            "{nodes} closure nodes but permutation has {}, translator {}, output {}",
            perm.len(),
            translator.len(),
            out.len()
        )));
    }

    let tmp = perm
        .iter()
        .map(|&p| {
            p.checked_mul(coord_dim)
                .and_then(|dof| closure.get(dof))
                .map(|&dof| dof / coord_dim)
                .ok_or_else(|| malformed(format!("permutation entry {p} exceeds {nodes} nodes")))
        })
        .collect::<Result<Vec<usize>, _>>()?;
    for (slot, &t) in out.iter_mut().zip(translator) {
        let node = tmp
            .get(t)
            .ok_or_else(|| malformed(format!("translator entry {t} exceeds {nodes} nodes")))?;
        *slot = *node as i64;
    }
    Ok(())
}

/// Cell arrays of a homogeneous grid, ready for [`crate::io::vtu::UnstructuredGrid`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellArrays {
    pub connectivity: Vec<i64>,
    /// End offset of every cell (VTK XML convention).
    pub offsets: Vec<i64>,
    pub types: Vec<u8>,
}

/// Resolves both node-order tables once, then remaps every local cell.
#[derive(Clone, Copy, Debug)]
pub struct ConnectivityBuilder {
    cell_type: CellType,
    coord_dim: usize,
    perm: &'static [usize],
    order: VtkNodeOrder,
}

impl ConnectivityBuilder {
    /// Look up the tables for cells of `cell_type` with `nodes_per_cell` nodes.
    ///
    /// The VTK translator is resolved first, so an unsupported node count is
    /// reported as [`MeshError::UnsupportedCellSize`] before the CGNS lookup.
    pub fn new(
        cell_type: CellType,
        nodes_per_cell: usize,
        coord_dim: usize,
    ) -> Result<Self, MeshError> {
        let order = vtk_hexahedron_order(nodes_per_cell)?;
        let perm = cgns_permutation(cell_type, nodes_per_cell)?;
        Ok(Self {
            cell_type,
            coord_dim,
            perm,
            order,
        })
    }

    pub fn nodes_per_cell(&self) -> usize {
        self.order.len()
    }

    pub fn vtk_order(&self) -> VtkNodeOrder {
        self.order
    }

    /// Remap every cell in `source.cell_range()`.
    ///
    /// Each closure is fetched by the cell being processed and released at
    /// the end of its iteration.
    pub fn build<S: PlexSource + ?Sized>(&self, source: &S) -> Result<CellArrays, MeshError> {
        let cells = source.cell_range();
        let n_cells = cells.len();
        let nodes = self.nodes_per_cell();

        let mut arrays = CellArrays {
            connectivity: vec![0; n_cells * nodes],
            offsets: (1..=n_cells).map(|i| (i * nodes) as i64).collect(),
            types: vec![self.order.cell_type.code(); n_cells],
        };

        for (local, cell) in cells.enumerate() {
            let cell_type = source.cell_type(cell)?;
            let closure = source.closure_indices(cell)?;
            if cell_type != self.cell_type {
                log::error!(
                    "cell {cell} is a {cell_type}, grid holds {} cells only",
                    self.cell_type
                );
                return Err(MeshError::UnsupportedCellConfiguration {
                    cell_type,
                    closure_size: closure.len() / self.coord_dim.max(1),
                });
            }
            let out = &mut arrays.connectivity[local * nodes..(local + 1) * nodes];
            cell_connectivity(
                cell,
                closure,
                self.coord_dim,
                self.perm,
                self.order.permutation,
                out,
            )?;
        }
        log::debug!(
            "built connectivity for {n_cells} {} cells ({nodes} nodes each)",
            self.cell_type
        );
        Ok(arrays)
    }
}
