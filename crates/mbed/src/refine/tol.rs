//! Tolerances used when verifying a refinement.
//!
//! Policy
//! - Fixed constants; refinement itself never snaps or rounds, these only
//!   bound the floating-point drift accepted by `Refinement::check`.

/// Relative slack on `edge length <= threshold`.
pub const THRESHOLD_REL: f64 = 1e-12;
/// Relative error on the total curve length.
pub const LENGTH_REL: f64 = 1e-10;
/// Bound on `1 - cos(angle)` between a refined edge and its parent.
pub const DIRECTION: f64 = 1e-10;
/// Distance of a refined midpoint from its parent segment, relative to the coordinate scale.
pub const ON_SEGMENT: f64 = 1e-9;
/// Absolute coordinate round-off, relative to the coordinate scale.
pub const COORD_ABS: f64 = 16.0 * f64::EPSILON;
