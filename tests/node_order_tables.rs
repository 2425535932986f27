use cgns_vtu::algs::connectivity::cell_connectivity;
use cgns_vtu::io::cgns::{SUPPORTED_CONFIGURATIONS, cgns_permutation};
use cgns_vtu::io::vtk::vtk_hexahedron_order;
use cgns_vtu::mesh_error::MeshError;
use cgns_vtu::topology::cell_type::CellType;
use proptest::prelude::*;

fn is_bijection(perm: &[usize]) -> bool {
    let mut sorted = perm.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(i, &p)| i == p)
}

#[test]
fn every_cgns_table_is_a_bijection() {
    for (cell_type, size) in SUPPORTED_CONFIGURATIONS {
        let perm = cgns_permutation(cell_type, size).expect("supported pair");
        assert_eq!(perm.len(), size);
        assert!(is_bijection(perm), "{cell_type} with {size} nodes");
    }
}

#[test]
fn every_vtk_translator_is_a_bijection() {
    for n in [8, 27, 64] {
        let order = vtk_hexahedron_order(n).expect("supported size");
        assert_eq!(order.len(), n);
        assert!(is_bijection(order.permutation), "{n} nodes");
    }
}

#[test]
fn unsupported_pairs_fail_instead_of_truncating() {
    let cases = [
        (CellType::Hexahedron, 12),
        (CellType::Hexahedron, 125),
        (CellType::Segment, 6),
        (CellType::Triangle, 4),
        (CellType::Quadrilateral, 36),
        (CellType::Tetrahedron, 35),
    ];
    for (cell_type, closure_size) in cases {
        assert_eq!(
            cgns_permutation(cell_type, closure_size),
            Err(MeshError::UnsupportedCellConfiguration {
                cell_type,
                closure_size
            })
        );
    }
}

#[test]
fn linear_hexahedron_keeps_cgns_order() {
    // The translator is the identity, so the output is the CGNS-permuted
    // closure itself.
    let perm = cgns_permutation(CellType::Hexahedron, 8).unwrap();
    let order = vtk_hexahedron_order(8).unwrap();
    let closure: Vec<usize> = (0..8).collect();
    let mut out = [0i64; 8];
    cell_connectivity(0, &closure, 1, perm, order.permutation, &mut out).unwrap();
    let expected: Vec<i64> = perm.iter().map(|&p| p as i64).collect();
    assert_eq!(out.to_vec(), expected);
}

#[test]
fn triquadratic_hexahedron_regression() {
    let perm = cgns_permutation(CellType::Hexahedron, 27).unwrap();
    let order = vtk_hexahedron_order(27).unwrap();
    let closure: Vec<usize> = (0..27).collect();
    let mut out = [0i64; 27];
    cell_connectivity(0, &closure, 1, perm, order.permutation, &mut out).unwrap();
    assert_eq!(
        out,
        [
            19, 22, 21, 20, 23, 24, 25, 26, // vertices
            10, 9, 8, 7, 11, 12, 13, 14, 16, 15, 18, 17, // edges
            6, 5, 3, 4, 1, 2, // faces
            0, // center
        ]
    );
}

proptest! {
    // Relabelling the closure nodes relabels the connectivity the same way.
    #[test]
    fn connectivity_commutes_with_node_relabelling(
        labels in Just((0..64usize).collect::<Vec<_>>()).prop_shuffle(),
        coord_dim in 1usize..=3,
    ) {
        let perm = cgns_permutation(CellType::Hexahedron, 64).unwrap();
        let order = vtk_hexahedron_order(64).unwrap();

        let identity: Vec<usize> = (0..64 * coord_dim).collect();
        let mut base = [0i64; 64];
        cell_connectivity(0, &identity, coord_dim, perm, order.permutation, &mut base).unwrap();

        let relabelled: Vec<usize> = labels
            .iter()
            .flat_map(|&l| (0..coord_dim).map(move |c| l * coord_dim + c))
            .collect();
        let mut out = [0i64; 64];
        cell_connectivity(0, &relabelled, coord_dim, perm, order.permutation, &mut out).unwrap();

        for (o, b) in out.iter().zip(base.iter()) {
            prop_assert_eq!(*o as usize, labels[*b as usize]);
        }
    }
}
