//! Refinement bindings.

use crate::common::{edges_to_py, map_refine_err, mesh_from_py, Edges};
use pyo3::prelude::*;

/// Refine a curve mesh; returns `(points, edges, parent_map)`.
///
/// Without `edges` the points form a polyline, closed into a loop if `close`.
#[pyfunction]
#[pyo3(signature = (points, threshold, edges=None, close=false))]
pub fn refine(
    points: Vec<Vec<f64>>,
    threshold: f64,
    edges: Option<Edges>,
    close: bool,
) -> PyResult<(Vec<Vec<f64>>, Edges, Vec<usize>)> {
    let mesh = mesh_from_py(points, edges, close)?;
    let r = mbed::api::refine(&mesh, threshold).map_err(map_refine_err)?;
    let edges = edges_to_py(&r.mesh);
    Ok((r.mesh.to_rows(), edges, r.parent_map.into_inner()))
}

/// Per-edge lengths of a curve mesh.
#[pyfunction]
#[pyo3(signature = (points, edges=None, close=false))]
pub fn edge_lengths(
    points: Vec<Vec<f64>>,
    edges: Option<Edges>,
    close: bool,
) -> PyResult<Vec<f64>> {
    Ok(mesh_from_py(points, edges, close)?.edge_lengths())
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(refine, m)?)?;
    m.add_function(wrap_pyfunction!(edge_lengths, m)?)?;
    Ok(())
}
