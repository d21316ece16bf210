use super::*;
use crate::mesh::rand::{draw_random_walk, ReplayToken, WalkCfg};
use nalgebra::DMatrix;

fn seven_vertex_loop() -> LineMesh {
    LineMesh::polyline_from_rows(
        &[
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 0.2],
            [1.0, 0.5],
            [1.0, 0.7],
            [1.0, 1.0],
            [0.0, 1.0],
        ],
        true,
    )
    .unwrap()
}

/// Straightforward single-pass version that grows the vertex list in place.
fn reference_refine(
    mesh: &LineMesh,
    threshold: f64,
) -> (Vec<Vec<f64>>, Vec<[usize; 2]>, Vec<usize>) {
    let mut x = mesh.to_rows();
    let mut edges = Vec::new();
    let mut parents = Vec::new();
    for (c, &[v0, v1]) in mesh.edges().iter().enumerate() {
        let l = mesh.edge_length(c).unwrap();
        let n = if l <= threshold {
            1
        } else {
            (l / threshold).ceil() as usize
        };
        let (x0, x1) = (x[v0].clone(), x[v1].clone());
        let mut nodes = vec![v0];
        for k in 1..n {
            let t = k as f64 / n as f64;
            x.push(x0.iter().zip(&x1).map(|(a, b)| a + t * (b - a)).collect());
            nodes.push(x.len() - 1);
        }
        nodes.push(v1);
        for w in nodes.windows(2) {
            edges.push([w[0], w[1]]);
            parents.push(c);
        }
    }
    (x, edges, parents)
}

#[test]
fn seven_vertex_loop_scenario() {
    let mesh = seven_vertex_loop();
    let r = refine(&mesh, 0.6).unwrap();

    // the three unit-length edges are halved, the short ones are untouched
    assert_eq!(
        r.mesh.edges(),
        &[
            [0, 7],
            [7, 1],
            [1, 2],
            [2, 3],
            [3, 4],
            [4, 5],
            [5, 8],
            [8, 6],
            [6, 9],
            [9, 0]
        ]
    );
    assert_eq!(r.parent_map.as_slice(), &[0, 0, 1, 2, 3, 4, 5, 5, 6, 6]);
    assert_eq!(r.parent_map.len(), r.mesh.num_edges());

    // loop-closing edge (0,1) -> (0,0): two halves of length 0.5
    let closing = r.parent_map.children(6);
    assert_eq!(closing, 8..10);
    for e in closing {
        assert!((r.mesh.edge_length(e).unwrap() - 0.5).abs() < 1e-15);
    }
    assert_eq!(r.mesh.vertex(9).as_slice(), &[0.0, 0.5]);

    let rows = r.mesh.to_rows();
    assert_eq!(&rows[..7], &mesh.to_rows()[..]);
    r.check(&mesh, 0.6).unwrap();
}

#[test]
fn conforming_mesh_is_returned_unchanged() {
    let mesh = seven_vertex_loop();
    let r = refine(&mesh, 1.0).unwrap();
    assert_eq!(r.mesh, mesh);
    assert_eq!(r.parent_map, ParentMap::identity(mesh.num_edges()));
}

#[test]
fn zero_length_edge_is_kept() {
    let mesh = LineMesh::from_rows(&[[0.3, 0.3, 0.3], [0.3, 0.3, 0.3]], vec![[0, 1]]).unwrap();
    let r = refine(&mesh, 1e-6).unwrap();
    assert_eq!(r.mesh.edges(), &[[0, 1]]);
    assert_eq!(r.mesh.num_vertices(), 2);
    assert_eq!(r.parent_map.as_slice(), &[0]);
    r.check(&mesh, 1e-6).unwrap();
}

#[test]
fn split_into_equal_pieces_in_3d() {
    // length 3, threshold 0.8 -> ceil(3.75) = 4 pieces
    let mesh = LineMesh::from_rows(&[[0.0, 0.0, 0.0], [1.0, 2.0, 2.0]], vec![[0, 1]]).unwrap();
    let r = refine(&mesh, 0.8).unwrap();
    assert_eq!(r.mesh.edges(), &[[0, 2], [2, 3], [3, 4], [4, 1]]);
    for e in 0..4 {
        assert!((r.mesh.edge_length(e).unwrap() - 0.75).abs() < 1e-12);
    }
    assert_eq!(r.mesh.vertex(3).as_slice(), &[0.5, 1.0, 1.0]);
    r.check(&mesh, 0.8).unwrap();
}

#[test]
fn orientation_follows_each_parent() {
    // second edge runs backwards (2 -> 1); its pieces must too
    let mesh = LineMesh::from_rows(&[[0.0], [1.0], [3.0]], vec![[0, 1], [2, 1]]).unwrap();
    let r = refine(&mesh, 1.0).unwrap();
    assert_eq!(r.mesh.edges(), &[[0, 1], [2, 3], [3, 1]]);
    assert_eq!(r.mesh.vertex(3)[0], 2.0);
    r.check(&mesh, 1.0).unwrap();
}

#[test]
fn split_count_formula() {
    assert_eq!(split_count(0.0, 1.0), Some(1));
    assert_eq!(split_count(1.0, 1.0), Some(1));
    assert_eq!(split_count(1.0 + f64::EPSILON, 1.0), Some(2));
    assert_eq!(split_count(1.01, 1.0), Some(2));
    assert_eq!(split_count(2.0, 1.0), Some(2));
    assert_eq!(split_count(2.000001, 1.0), Some(3));
    assert_eq!(split_count(10.0, 0.3), Some(34));
    assert_eq!(split_count(1e10, 1e-300), None);
    assert_eq!(split_count(1e20, 1.0), None);
}

#[test]
fn oversized_split_counts_are_rejected() {
    // ratio overflows to infinity
    let mesh = LineMesh::from_rows(&[[0.0, 0.0], [1e10, 0.0]], vec![[0, 1]]).unwrap();
    assert_eq!(
        RefinePlan::new(&mesh, 1e-300).unwrap_err(),
        RefineError::TooManySplits { edge: 0 }
    );
    assert!(refine(&mesh, 1e-300).is_err());

    // each count fits, their sum does not
    let line = LineMesh::polyline_from_rows(&[[0.0], [1.5e19], [0.0]], false).unwrap();
    assert_eq!(
        refine(&line, 1.0),
        Err(RefineError::TooManySplits { edge: 1 })
    );

    // the vertex count fits, the 2d coordinate buffer does not
    let flat = LineMesh::polyline_from_rows(&[[0.0, 0.0], [1.5e19, 0.0]], false).unwrap();
    assert_eq!(
        refine(&flat, 1.0),
        Err(RefineError::TooManySplits { edge: 0 })
    );
}

#[test]
fn plan_offsets_are_prefix_sums() {
    let mesh = seven_vertex_loop();
    let plan = RefinePlan::new(&mesh, 0.6).unwrap();
    assert_eq!(plan.splits(), &[2, 1, 1, 1, 1, 2, 2]);
    assert_eq!(plan.num_split_edges(), 3);
    assert_eq!(plan.num_output_edges(), 10);
    assert_eq!(plan.num_new_vertices(), 3);
    assert_eq!(plan.edge_offset(1), 2);
    assert_eq!(plan.edge_offset(6), 8);
    assert_eq!(plan.vertex_offset(0), 7);
    assert_eq!(plan.vertex_offset(1), 8);
    assert_eq!(plan.vertex_offset(6), 9);
    assert_eq!(plan.vertex_offset(7), 10);
}

#[test]
fn invalid_arguments_are_rejected() {
    let mesh = seven_vertex_loop();
    for t in [0.0, -0.5, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            refine(&mesh, t),
            Err(RefineError::InvalidThreshold(_))
        ));
    }
    let edgeless = LineMesh::new(DMatrix::zeros(2, 3), vec![]).unwrap();
    assert_eq!(refine(&edgeless, 1.0), Err(RefineError::EmptyMesh));

    let broken = LineMesh::from_rows(&[[0.0, 0.0], [f64::NAN, 1.0]], vec![[0, 1]]).unwrap();
    assert_eq!(
        refine(&broken, 1.0),
        Err(RefineError::NonFiniteLength { edge: 0 })
    );
}

#[test]
fn input_mesh_is_not_modified() {
    let mesh = seven_vertex_loop();
    let before = mesh.clone();
    let _ = refine(&mesh, 0.1).unwrap();
    assert_eq!(mesh, before);
}

#[test]
fn matches_single_pass_reference() {
    for index in 0..8 {
        let cfg = WalkCfg {
            vertex_count: 40,
            dim: 1 + (index as usize % 3),
            step_min: 0.01,
            step_max: 2.0,
            closed: index % 2 == 0,
        };
        let mesh = draw_random_walk(cfg, ReplayToken { seed: 11, index }).unwrap();
        let threshold = 0.15 + 0.1 * index as f64;
        let r = refine(&mesh, threshold).unwrap();
        let (x, edges, parents) = reference_refine(&mesh, threshold);
        assert_eq!(r.mesh.to_rows(), x);
        assert_eq!(r.mesh.edges(), &edges[..]);
        assert_eq!(r.parent_map.as_slice(), &parents[..]);
        r.check(&mesh, threshold).unwrap();
    }
}

#[cfg(feature = "rayon")]
#[test]
fn sequential_and_parallel_fill_agree() {
    for index in 0..6 {
        let cfg = WalkCfg {
            vertex_count: 200,
            dim: 1 + (index as usize % 3),
            step_min: 0.0,
            step_max: 3.0,
            closed: index % 2 == 1,
        };
        let mesh = draw_random_walk(cfg, ReplayToken { seed: 5, index }).unwrap();
        let plan = RefinePlan::new(&mesh, 0.2).unwrap();

        let mut seq = fill::empty_output(&mesh, &plan);
        fill::fill_sequential(&mesh, &plan, &mut seq);
        let mut par = fill::empty_output(&mesh, &plan);
        fill::fill_parallel(&mesh, &plan, &mut par);

        assert_eq!(seq.edges, par.edges);
        assert_eq!(seq.parents, par.parents);
        let bits = |x: &[f64]| x.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&seq.coords), bits(&par.coords));
    }
}

#[test]
fn composed_parent_maps_trace_back_two_passes() {
    let mesh = seven_vertex_loop();
    let first = refine(&mesh, 0.6).unwrap();
    let second = refine(&first.mesh, 0.25).unwrap();
    let traced = second.parent_map.compose(&first.parent_map).unwrap();
    assert_eq!(traced.len(), second.mesh.num_edges());
    // edge 0 of the input (length 1) ends up as 2 * ceil(0.5 / 0.25) = 4 pieces
    assert_eq!(traced.children(0), 0..4);
    let through = Refinement {
        mesh: second.mesh,
        parent_map: traced,
    };
    through.check(&mesh, 0.25).unwrap();

    let short = ParentMap::from_vec(vec![0, 5]);
    assert_eq!(
        short.compose(&ParentMap::identity(2)),
        Err(RefineError::ParentIndex {
            edge: 1,
            parent: 5,
            len: 2
        })
    );
}

#[test]
fn check_rejects_tampered_results() {
    let mesh = seven_vertex_loop();
    let good = refine(&mesh, 0.6).unwrap();

    // reverse one sub-edge
    let (coords, mut edges) = good.mesh.clone().into_parts();
    edges[0] = [7, 0];
    let flipped = Refinement {
        mesh: LineMesh::new(coords.clone(), edges).unwrap(),
        parent_map: good.parent_map.clone(),
    };
    assert!(matches!(
        flipped.check(&mesh, 0.6),
        Err(RefineError::Postcondition(_))
    ));

    // move an original vertex by one ulp
    let mut nudged = coords;
    nudged[(0, 2)] = f64::from_bits(nudged[(0, 2)].to_bits() + 1);
    let moved = Refinement {
        mesh: LineMesh::new(nudged, good.mesh.edges().to_vec()).unwrap(),
        parent_map: good.parent_map.clone(),
    };
    assert!(moved.check(&mesh, 0.6).is_err());

    // a threshold the result does not satisfy
    assert!(good.check(&mesh, 0.4).is_err());
}
