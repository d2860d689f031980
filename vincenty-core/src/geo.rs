mod angle;
mod coordinate;
mod ellipsoid;
mod inverse;

pub use self::{
    angle::wrap_two_pi,
    coordinate::{GeoPoint, Latitude, Longitude},
    ellipsoid::Ellipsoid,
    inverse::{Azimuths, InverseResult, InverseSolver, SolverConfig},
};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("latitude out of range [-π/2, π/2] radians: {value}")]
    InvalidLatitude { value: f64 },
    #[error("longitude out of range [-π, π] radians: {value}")]
    InvalidLongitude { value: f64 },
    #[error("tolerance must be finite and strictly positive, got {value}")]
    InvalidTolerance { value: f64 },
    #[error("maximum number of iterations must be at least 1")]
    InvalidIterationLimit,
    #[error("invalid ellipsoid: semi-major axis {a} must be > 0 and flattening {f} within [0, 1)")]
    InvalidEllipsoid { a: f64, f: f64 },
    #[error("vincenty inverse formula did not converge: {0}")]
    NonConvergent(#[from] ConvergenceFailure),
    #[error("geo computation produced a non-finite value")]
    NonFiniteComputation,
}

/// Diagnostic returned when the λ iteration runs out of rounds.
///
/// This is an expected outcome for nearly antipodal point pairs: past
/// roughly 179.6° of longitude difference near the equator Vincenty's
/// iteration does not settle. Callers can retry with a looser `tolerance`,
/// more iterations, or fall back to another algorithm.
///
/// ```
/// use vincenty_core::{GeoError, GeoPoint, distance};
///
/// let x = GeoPoint::from_degrees(0.0, 0.0).unwrap();
/// let y = GeoPoint::from_degrees(0.5, 179.7).unwrap();
///
/// let Err(GeoError::NonConvergent(failure)) = distance(x, y) else {
///     panic!("expected a convergence failure");
/// };
/// assert_eq!(failure.max_iterations, 200);
/// assert!(failure.eps >= failure.tolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{max_iterations} iterations did not reach tolerance {tolerance:e} (eps = {eps:e})")]
pub struct ConvergenceFailure {
    /// iteration cap that was exhausted
    pub max_iterations: u32,
    /// requested convergence threshold on λ
    pub tolerance: f64,
    /// last `|λ_new - λ_old|` reached
    pub eps: f64,
}

/// Distance in meters between `x` and `y` on WGS-84, with the default
/// [`SolverConfig`].
///
/// # Example
///
/// ```
/// use vincenty_core::{GeoPoint, distance};
///
/// // Eastern longitude (Paris) -> western longitude (San Francisco)
/// let paris = GeoPoint::from_degrees(48.8566, 2.3522).unwrap();
/// let san_francisco = GeoPoint::from_degrees(37.7749, -122.4194).unwrap();
///
/// let meters = distance(paris, san_francisco).unwrap();
/// assert!(meters > 8_000_000.0);
/// ```
pub fn distance(x: GeoPoint, y: GeoPoint) -> Result<f64, GeoError> {
    InverseSolver::default().distance(x, y)
}

/// Distance in meters between `x` and `y` on the given ellipsoid.
pub fn distance_with(
    x: GeoPoint,
    y: GeoPoint,
    ellipsoid: Ellipsoid,
    config: SolverConfig,
) -> Result<f64, GeoError> {
    InverseSolver::new(ellipsoid, config).distance(x, y)
}

/// Distance and azimuths between `x` and `y` on WGS-84, with the default
/// [`SolverConfig`].
///
/// Azimuths are in radians, clockwise from true north, within `[0, 2π)`.
///
/// # Example
///
/// ```
/// use std::f64::consts::FRAC_PI_2;
/// use vincenty_core::{GeoPoint, solve_inverse};
///
/// let origin = GeoPoint::from_degrees(0.0, 0.0).unwrap();
/// let east = GeoPoint::from_degrees(0.0, 1.0).unwrap();
///
/// let (meters, azimuths) = solve_inverse(origin, east).unwrap();
/// assert!((meters - 111_319.491).abs() < 1e-3);
/// assert!((azimuths.initial_azimuth - FRAC_PI_2).abs() < 1e-9);
/// ```
pub fn solve_inverse(x: GeoPoint, y: GeoPoint) -> Result<(f64, Azimuths), GeoError> {
    solve_inverse_with(x, y, Ellipsoid::default(), SolverConfig::default())
}

/// Distance and azimuths between `x` and `y` on the given ellipsoid.
pub fn solve_inverse_with(
    x: GeoPoint,
    y: GeoPoint,
    ellipsoid: Ellipsoid,
    config: SolverConfig,
) -> Result<(f64, Azimuths), GeoError> {
    InverseSolver::new(ellipsoid, config).solve(x, y)
}
