//! Property tests over random polylines in R^1..R^3.

use super::*;
use nalgebra::DMatrix;
use proptest::prelude::*;

fn polyline() -> impl Strategy<Value = LineMesh> {
    (1usize..=3, 2usize..24, any::<bool>()).prop_flat_map(|(d, n, closed)| {
        prop::collection::vec(-10.0f64..10.0, d * n).prop_map(move |data| {
            LineMesh::polyline(DMatrix::from_vec(d, n, data), closed).unwrap()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_edge_respects_threshold(mesh in polyline(), threshold in 0.05f64..5.0) {
        let r = refine(&mesh, threshold).unwrap();
        for l in r.mesh.edge_lengths() {
            prop_assert!(l <= threshold * (1.0 + 1e-12), "{} > {}", l, threshold);
        }
    }

    #[test]
    fn total_length_is_preserved(mesh in polyline(), threshold in 0.05f64..5.0) {
        let r = refine(&mesh, threshold).unwrap();
        let before = mesh.total_length();
        let after = r.mesh.total_length();
        prop_assert!((after - before).abs() <= 1e-10 * before.max(1e-300));
    }

    #[test]
    fn prefix_and_parents_are_consistent(mesh in polyline(), threshold in 0.05f64..5.0) {
        let r = refine(&mesh, threshold).unwrap();
        prop_assert_eq!(r.parent_map.len(), r.mesh.num_edges());
        prop_assert!(r.mesh.num_edges() >= mesh.num_edges());
        let n = mesh.dim() * mesh.num_vertices();
        let prefix = &r.mesh.coordinates().as_slice()[..n];
        prop_assert!(prefix
            .iter()
            .zip(mesh.coordinates().as_slice())
            .all(|(a, b)| a.to_bits() == b.to_bits()));
        for c in 0..mesh.num_edges() {
            prop_assert!(!r.parent_map.children(c).is_empty());
        }
        prop_assert!(r.check(&mesh, threshold).is_ok());
    }

    #[test]
    fn conforming_meshes_are_fixed_points(mesh in polyline(), slack in 1.0f64..3.0) {
        let longest = mesh.edge_lengths().into_iter().fold(0.0, f64::max);
        prop_assume!(longest > 0.0);
        let r = refine(&mesh, longest * slack).unwrap();
        prop_assert_eq!(&r.mesh, &mesh);
        prop_assert_eq!(r.parent_map, ParentMap::identity(mesh.num_edges()));
    }
}
