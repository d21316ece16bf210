use nalgebra::{DMatrix, DVectorView};
use thiserror::Error;

/// Structural violations detected while building or querying a `LineMesh`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("edge index {edge} out of range (mesh has {len} edges)")]
    EdgeIndex { edge: usize, len: usize },
    #[error("edge {edge} references vertex {vertex}, but the mesh has {len} vertices")]
    VertexIndex { edge: usize, vertex: usize, len: usize },
    #[error("point {point} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        point: usize,
        expected: usize,
        found: usize,
    },
    #[error("mesh geometry must have dimension >= 1")]
    ZeroDimension,
    #[error("need at least {needed} vertices, got {found}")]
    TooFewVertices { needed: usize, found: usize },
}

/// Vertex coordinates plus edge connectivity of a 1D mesh.
///
/// Invariants:
/// - `coords.nrows() >= 1` (the geometric dimension).
/// - Every edge references a column of `coords`.
#[derive(Clone, Debug, PartialEq)]
pub struct LineMesh {
    coords: DMatrix<f64>,
    edges: Vec<[usize; 2]>,
}

impl LineMesh {
    /// Build from a `d × n` coordinate matrix and explicit connectivity.
    pub fn new(coords: DMatrix<f64>, edges: Vec<[usize; 2]>) -> Result<Self, MeshError> {
        if coords.nrows() == 0 {
            return Err(MeshError::ZeroDimension);
        }
        let len = coords.ncols();
        for (edge, &[a, b]) in edges.iter().enumerate() {
            for vertex in [a, b] {
                if vertex >= len {
                    return Err(MeshError::VertexIndex { edge, vertex, len });
                }
            }
            debug_assert_ne!(a, b, "edge {edge} is degenerate");
        }
        Ok(Self { coords, edges })
    }

    /// Build from row-major points (one slice per vertex).
    pub fn from_rows<R: AsRef<[f64]>>(
        rows: &[R],
        edges: Vec<[usize; 2]>,
    ) -> Result<Self, MeshError> {
        Self::new(rows_to_matrix(rows)?, edges)
    }

    /// Connect consecutive vertices; `close_path` adds the edge `(n-1, 0)`.
    pub fn polyline(coords: DMatrix<f64>, close_path: bool) -> Result<Self, MeshError> {
        let n = coords.ncols();
        if n < 2 {
            return Err(MeshError::TooFewVertices { needed: 2, found: n });
        }
        let mut edges: Vec<[usize; 2]> = (0..n - 1).map(|i| [i, i + 1]).collect();
        if close_path {
            edges.push([n - 1, 0]);
        }
        Self::new(coords, edges)
    }

    /// Row-major variant of [`LineMesh::polyline`].
    pub fn polyline_from_rows<R: AsRef<[f64]>>(
        rows: &[R],
        close_path: bool,
    ) -> Result<Self, MeshError> {
        Self::polyline(rows_to_matrix(rows)?, close_path)
    }

    /// Used by the refiner, whose output satisfies the invariants by construction.
    pub(crate) fn from_parts_unchecked(coords: DMatrix<f64>, edges: Vec<[usize; 2]>) -> Self {
        debug_assert!(coords.nrows() > 0);
        debug_assert!(edges.iter().flatten().all(|&v| v < coords.ncols()));
        Self { coords, edges }
    }

    /// Geometric dimension `d`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.coords.nrows()
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.coords.ncols()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Read view of the vertex set (`d × n`, column per vertex).
    #[inline]
    pub fn coordinates(&self) -> &DMatrix<f64> {
        &self.coords
    }

    /// Coordinates of vertex `i`. Panics if `i >= num_vertices()`.
    #[inline]
    pub fn vertex(&self, i: usize) -> DVectorView<'_, f64> {
        self.coords.column(i)
    }

    #[inline]
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    pub fn edge_vertices(&self, edge: usize) -> Result<(usize, usize), MeshError> {
        self.edges
            .get(edge)
            .map(|&[a, b]| (a, b))
            .ok_or(MeshError::EdgeIndex {
                edge,
                len: self.edges.len(),
            })
    }

    /// Euclidean distance between the two endpoints of `edge`.
    pub fn edge_length(&self, edge: usize) -> Result<f64, MeshError> {
        let (a, b) = self.edge_vertices(edge)?;
        Ok(self.segment_length(a, b))
    }

    /// Lengths of all edges, in edge order.
    pub fn edge_lengths(&self) -> Vec<f64> {
        self.edges
            .iter()
            .map(|&[a, b]| self.segment_length(a, b))
            .collect()
    }

    /// Sum of all edge lengths.
    pub fn total_length(&self) -> f64 {
        self.edges
            .iter()
            .map(|&[a, b]| self.segment_length(a, b))
            .sum()
    }

    /// Row-major copy of the coordinates (one `Vec` per vertex).
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.coords
            .column_iter()
            .map(|c| c.iter().copied().collect())
            .collect()
    }

    pub fn into_parts(self) -> (DMatrix<f64>, Vec<[usize; 2]>) {
        (self.coords, self.edges)
    }

    #[inline]
    fn segment_length(&self, a: usize, b: usize) -> f64 {
        self.coords.column(a).metric_distance(&self.coords.column(b))
    }
}

/// Ascending indices `i` with `predicate(values[i])`.
pub fn find_edges<P: Fn(f64) -> bool>(values: &[f64], predicate: P) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| predicate(v))
        .map(|(i, _)| i)
        .collect()
}

fn rows_to_matrix<R: AsRef<[f64]>>(rows: &[R]) -> Result<DMatrix<f64>, MeshError> {
    let first = rows.first().ok_or(MeshError::TooFewVertices {
        needed: 1,
        found: 0,
    })?;
    let dim = first.as_ref().len();
    if dim == 0 {
        return Err(MeshError::ZeroDimension);
    }
    let mut data = Vec::with_capacity(dim * rows.len());
    for (point, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != dim {
            return Err(MeshError::DimensionMismatch {
                point,
                expected: dim,
                found: row.len(),
            });
        }
        data.extend_from_slice(row);
    }
    Ok(DMatrix::from_vec(dim, rows.len(), data))
}
