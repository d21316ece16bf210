//! Fill pass: each input edge writes only its own, pre-reserved output slots.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::plan::RefinePlan;
use crate::mesh::LineMesh;

/// Output buffers of one pass; `coords` holds only the new vertices (column-major).
#[derive(Debug)]
pub(super) struct Filled {
    pub edges: Vec<[usize; 2]>,
    pub parents: Vec<usize>,
    pub coords: Vec<f64>,
}

/// Mutable output window of a single input edge.
struct Slot<'a> {
    edge: usize,
    first_new: usize,
    edges: &'a mut [[usize; 2]],
    parents: &'a mut [usize],
    coords: &'a mut [f64],
}

pub(super) fn fill(mesh: &LineMesh, plan: &RefinePlan) -> Filled {
    let mut out = empty_output(mesh, plan);
    #[cfg(feature = "rayon")]
    fill_parallel(mesh, plan, &mut out);
    #[cfg(not(feature = "rayon"))]
    fill_sequential(mesh, plan, &mut out);
    out
}

pub(super) fn empty_output(mesh: &LineMesh, plan: &RefinePlan) -> Filled {
    Filled {
        edges: vec![[0, 0]; plan.num_output_edges()],
        parents: vec![0; plan.num_output_edges()],
        coords: vec![0.0; mesh.dim() * plan.num_new_vertices()],
    }
}

#[cfg_attr(feature = "rayon", allow(dead_code))]
pub(super) fn fill_sequential(mesh: &LineMesh, plan: &RefinePlan, out: &mut Filled) {
    for slot in split_slots(out, plan, mesh.dim()) {
        fill_edge(mesh, plan, slot);
    }
}

#[cfg(feature = "rayon")]
pub(super) fn fill_parallel(mesh: &LineMesh, plan: &RefinePlan, out: &mut Filled) {
    split_slots(out, plan, mesh.dim())
        .into_par_iter()
        .for_each(|slot| fill_edge(mesh, plan, slot));
}

/// Carve the output buffers into one disjoint window per input edge.
fn split_slots<'a>(out: &'a mut Filled, plan: &RefinePlan, d: usize) -> Vec<Slot<'a>> {
    let mut edges = out.edges.as_mut_slice();
    let mut parents = out.parents.as_mut_slice();
    let mut coords = out.coords.as_mut_slice();
    let mut slots = Vec::with_capacity(plan.splits().len());
    for (edge, &n) in plan.splits().iter().enumerate() {
        let (e, e_rest) = std::mem::take(&mut edges).split_at_mut(n);
        let (p, p_rest) = std::mem::take(&mut parents).split_at_mut(n);
        let (x, x_rest) = std::mem::take(&mut coords).split_at_mut(d * (n - 1));
        edges = e_rest;
        parents = p_rest;
        coords = x_rest;
        slots.push(Slot {
            edge,
            first_new: plan.vertex_offset(edge),
            edges: e,
            parents: p,
            coords: x,
        });
    }
    debug_assert!(edges.is_empty() && parents.is_empty() && coords.is_empty());
    slots
}

fn fill_edge(mesh: &LineMesh, plan: &RefinePlan, slot: Slot<'_>) {
    let [v0, v1] = mesh.edges()[slot.edge];
    let n = plan.splits()[slot.edge];
    slot.parents.fill(slot.edge);
    if n == 1 {
        slot.edges[0] = [v0, v1];
        return;
    }

    let x0 = mesh.vertex(v0);
    let dx = mesh.vertex(v1) - &x0;
    let d = x0.len();
    for k in 1..n {
        let t = k as f64 / n as f64;
        let dst = &mut slot.coords[(k - 1) * d..k * d];
        for ((y, a), b) in dst.iter_mut().zip(x0.iter()).zip(dx.iter()) {
            *y = a + t * b;
        }
    }

    let first_new = slot.first_new;
    let node = |j: usize| match j {
        0 => v0,
        j if j == n => v1,
        j => first_new + j - 1,
    };
    for (j, e) in slot.edges.iter_mut().enumerate() {
        *e = [node(j), node(j + 1)];
    }
}
