use mbed::api::{LineMesh, MeshError, RefineError};
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

pub type Edges = Vec<(usize, usize)>;

pub fn mesh_from_py(
    points: Vec<Vec<f64>>,
    edges: Option<Edges>,
    close: bool,
) -> PyResult<LineMesh> {
    let mesh = match edges {
        Some(edges) => {
            if let Some(i) = edges.iter().position(|&(a, b)| a == b) {
                return Err(PyValueError::new_err(format!(
                    "edge {i} joins vertex {} to itself",
                    edges[i].0
                )));
            }
            LineMesh::from_rows(&points, edges.into_iter().map(|(a, b)| [a, b]).collect())
        }
        None => LineMesh::polyline_from_rows(&points, close),
    };
    mesh.map_err(map_mesh_err)
}

pub fn edges_to_py(mesh: &LineMesh) -> Edges {
    mesh.edges().iter().map(|&[a, b]| (a, b)).collect()
}

pub fn map_mesh_err(err: MeshError) -> PyErr {
    match err {
        MeshError::EdgeIndex { .. } | MeshError::VertexIndex { .. } => {
            PyIndexError::new_err(err.to_string())
        }
        _ => PyValueError::new_err(err.to_string()),
    }
}

pub fn map_refine_err(err: RefineError) -> PyErr {
    match err {
        RefineError::Mesh(err) => map_mesh_err(err),
        _ => PyValueError::new_err(err.to_string()),
    }
}
