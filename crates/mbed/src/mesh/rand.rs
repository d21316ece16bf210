//! Random polylines in R^d (isotropic random walk + replay tokens).
//!
//! Purpose
//! - Deterministic test and benchmark inputs for the refiner: curves with a
//!   controllable spread of edge lengths, optionally closed into a loop.
//!
//! Model
//! - Start at the origin; each step picks a direction uniformly on the unit
//!   sphere (rejection sampling in the cube) and a length uniform in
//!   `[step_min, step_max]`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{LineMesh, MeshError};

/// Random-walk sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct WalkCfg {
    pub vertex_count: usize,
    pub dim: usize,
    /// Step lengths are uniform in `[step_min, step_max]`.
    /// `step_max` is raised to `step_min` if smaller.
    pub step_min: f64,
    pub step_max: f64,
    /// Add the loop-closing edge `(n-1, 0)`.
    pub closed: bool,
}
impl Default for WalkCfg {
    fn default() -> Self {
        Self {
            vertex_count: 64,
            dim: 3,
            step_min: 0.05,
            step_max: 1.0,
            closed: false,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Draw a random-walk polyline. Fails for `dim == 0` or fewer than 2 vertices.
pub fn draw_random_walk(cfg: WalkCfg, tok: ReplayToken) -> Result<LineMesh, MeshError> {
    if cfg.dim == 0 {
        return Err(MeshError::ZeroDimension);
    }
    let mut rng = tok.to_std_rng();
    let lo = cfg.step_min.max(0.0);
    let hi = cfg.step_max.max(lo);
    let mut coords = DMatrix::<f64>::zeros(cfg.dim, cfg.vertex_count);
    for j in 1..cfg.vertex_count {
        let dir = unit_direction(&mut rng, cfg.dim);
        let step = if hi > lo { rng.gen_range(lo..=hi) } else { lo };
        let next = coords.column(j - 1) + dir * step;
        coords.set_column(j, &next);
    }
    LineMesh::polyline(coords, cfg.closed)
}

fn unit_direction<R: Rng>(rng: &mut R, dim: usize) -> DVector<f64> {
    loop {
        let v = DVector::from_fn(dim, |_, _| rng.gen_range(-1.0..=1.0));
        let n = v.norm();
        if n > 1e-3 && n <= 1.0 {
            return v / n;
        }
    }
}
