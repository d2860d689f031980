use crate::geo::Ellipsoid;

/// Default convergence threshold on λ, in radians.
///
/// The iteration stops as soon as two consecutive values of λ differ by
/// less than this amount. `1e-12` rad is well under a millimetre on the
/// ground.
///
/// ```
/// # use vincenty_core::defaults::*;
/// assert_eq!(DEFAULT_TOLERANCE, 1e-12);
/// ```
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Default iteration cap for the λ fixed-point iteration.
///
/// Each round is a handful of trigonometric calls, so the cap also bounds
/// the worst case running time of a single solve.
///
/// ```
/// # use vincenty_core::defaults::*;
/// assert_eq!(DEFAULT_MAX_ITERATIONS, 200);
/// ```
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// Default [`Ellipsoid`]: WGS-84.
///
/// ```
/// # use vincenty_core::defaults::*;
/// # use vincenty_core::Ellipsoid;
/// assert_eq!(DEFAULT_ELLIPSOID, Ellipsoid::WGS84);
/// assert_eq!(DEFAULT_ELLIPSOID.semi_major_axis(), 6_378_137.0);
/// ```
pub const DEFAULT_ELLIPSOID: Ellipsoid = Ellipsoid::WGS84;
