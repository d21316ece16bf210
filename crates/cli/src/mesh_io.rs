//! Mesh files for the CLI: JSON meshes, CSV point lists, per-edge tables.
//!
//! JSON input is `{"points": [[x, y, ..], ..], "edges": [[a, b], ..]}`; when
//! `edges` is missing the points are connected as a polyline. CSV input has a
//! header and one coordinate per column.

use anyhow::{bail, Context, Result};
use mbed::api::{LineMesh, Refinement};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeshFile {
    points: Vec<Vec<f64>>,
    #[serde(default)]
    edges: Option<Vec<[usize; 2]>>,
}

#[derive(Debug, Serialize)]
struct RefinedFile {
    points: Vec<Vec<f64>>,
    edges: Vec<[usize; 2]>,
    parent_map: Vec<usize>,
}

/// Load a mesh from `.json` or `.csv`; `close` adds the loop-closing edge to polylines.
pub fn read_mesh(path: &Path, close: bool) -> Result<LineMesh> {
    let is_csv = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    let mesh = if is_csv {
        LineMesh::polyline_from_rows(&read_points_csv(path)?, close)?
    } else {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let file: MeshFile = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", path.display()))?;
        match file.edges {
            Some(edges) => {
                // the mesh type only debug-asserts this
                if let Some(i) = edges.iter().position(|&[a, b]| a == b) {
                    bail!("{}: edge {i} joins vertex {} to itself", path.display(), edges[i][0]);
                }
                LineMesh::from_rows(&file.points, edges)?
            }
            None => LineMesh::polyline_from_rows(&file.points, close)?,
        }
    };
    Ok(mesh)
}

fn read_points_csv(path: &Path) -> Result<Vec<Vec<f64>>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .collect()?;
    if df.width() == 0 {
        bail!("{} has no coordinate columns", path.display());
    }
    let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
    for series in df.get_columns() {
        let col = series.cast(&DataType::Float64)?;
        for (i, v) in col.f64()?.into_iter().enumerate() {
            let v = v.with_context(|| {
                format!("missing value in column `{}`, row {i}", series.name())
            })?;
            rows[i].push(v);
        }
    }
    Ok(rows)
}

/// Write points, edges and parent map as JSON.
pub fn write_refined(path: &Path, refinement: &Refinement) -> Result<()> {
    ensure_parent(path)?;
    let doc = RefinedFile {
        points: refinement.mesh.to_rows(),
        edges: refinement.mesh.edges().to_vec(),
        parent_map: refinement.parent_map.as_slice().to_vec(),
    };
    fs::write(path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// One row per refined edge: `edge, v0, v1, parent, length`. Parquet for
/// `.parquet` paths, CSV otherwise.
pub fn write_edge_table(path: &Path, refinement: &Refinement) -> Result<()> {
    ensure_parent(path)?;
    let mesh = &refinement.mesh;
    let ids: Vec<u64> = (0..mesh.num_edges() as u64).collect();
    let v0: Vec<u64> = mesh.edges().iter().map(|e| e[0] as u64).collect();
    let v1: Vec<u64> = mesh.edges().iter().map(|e| e[1] as u64).collect();
    let parent: Vec<u64> = refinement.parent_map.as_slice().iter().map(|&p| p as u64).collect();
    let mut df = df!(
        "edge" => ids,
        "v0" => v0,
        "v1" => v1,
        "parent" => parent,
        "length" => mesh.edge_lengths()
    )?;

    let mut file =
        fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if path.extension().is_some_and(|e| e == "parquet") {
        ParquetWriter::new(&mut file).finish(&mut df)?;
    } else {
        CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
