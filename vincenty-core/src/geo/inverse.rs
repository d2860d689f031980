use super::{ConvergenceFailure, Ellipsoid, GeoError, GeoPoint, Latitude, Longitude, wrap_two_pi};
use crate::defaults::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use std::f64::consts::PI;

/// Convergence controls of the λ iteration.
///
/// ```
/// use vincenty_core::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_tolerance(1e-9)
///     .with_max_iterations(50);
///
/// assert_eq!(config.tolerance, 1e-9);
/// assert_eq!(config.max_iterations, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// threshold on `|λ_new - λ_old|`, must be `> 0`
    pub tolerance: f64,
    /// iteration cap, must be at least `1`
    pub max_iterations: u32,
}

impl SolverConfig {
    pub const fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub const fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<(), GeoError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(GeoError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        if self.max_iterations == 0 {
            return Err(GeoError::InvalidIterationLimit);
        }

        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }
}

/// Initial and final true track of the geodesic, in radians clockwise from
/// true north, within `[0, 2π)`.
///
/// Both values are NaN when the points are distinct but the computed
/// distance is zero: there is no meaningful bearing in that case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Azimuths {
    pub initial_azimuth: f64,
    pub final_azimuth: f64,
}

impl Azimuths {
    const ZERO: Self = Self {
        initial_azimuth: 0.0,
        final_azimuth: 0.0,
    };

    /// Purely meridional bearing used when `sin²σ` underflows.
    ///
    /// Always north then south, whichever way the path actually runs.
    const MERIDIONAL: Self = Self {
        initial_azimuth: 0.0,
        final_azimuth: PI,
    };

    const UNDEFINED: Self = Self {
        initial_azimuth: f64::NAN,
        final_azimuth: f64::NAN,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseResult {
    /// surface distance in meters
    pub distance: f64,
    /// only set when azimuths were requested
    pub azimuths: Option<Azimuths>,
}

/// Vincenty inverse solver, parametrized with the [`Ellipsoid`] and the
/// [`SolverConfig`] to iterate with.
///
/// Known limitation:
/// this iterative method can fail to converge for nearly antipodal point
/// pairs. Exhausting `max_iterations` maps to
/// [`GeoError::NonConvergent`], never to an inaccurate distance.
///
/// [Wikipedia Vincenty formulae](https://en.wikipedia.org/wiki/Vincenty%27s_formulae)
///
/// ```
/// use vincenty_core::{Ellipsoid, GeoPoint, InverseSolver, SolverConfig};
///
/// let solver = InverseSolver::new(Ellipsoid::GRS80, SolverConfig::default());
/// let north_pole = GeoPoint::from_degrees(90.0, 0.0).unwrap();
/// let south_pole = GeoPoint::from_degrees(-90.0, 0.0).unwrap();
///
/// let meters = solver.distance(north_pole, south_pole).unwrap();
/// assert!((meters - 20_003_931.46).abs() < 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InverseSolver {
    ellipsoid: Ellipsoid,
    config: SolverConfig,
}

/// Trigonometric state of the last λ iteration.
#[derive(Debug, Clone, Copy, Default)]
struct Iteration {
    lambda: f64,
    sin_lambda: f64,
    cos_lambda: f64,
    p: f64,
    q: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    sigma: f64,
    cos_sq_alpha: f64,
    cos_2sigma_m: f64,
}

impl InverseSolver {
    pub const fn new(ellipsoid: Ellipsoid, config: SolverConfig) -> Self {
        Self { ellipsoid, config }
    }

    pub const fn ellipsoid(&self) -> Ellipsoid {
        self.ellipsoid
    }

    pub const fn config(&self) -> SolverConfig {
        self.config
    }

    /// Surface distance in meters between `x` and `y`.
    pub fn distance(&self, x: GeoPoint, y: GeoPoint) -> Result<f64, GeoError> {
        self.inverse(x, y, false).map(|result| result.distance)
    }

    /// Surface distance in meters and both azimuths between `x` and `y`.
    pub fn solve(&self, x: GeoPoint, y: GeoPoint) -> Result<(f64, Azimuths), GeoError> {
        let result = self.inverse(x, y, true)?;
        let azimuths = result.azimuths.ok_or(GeoError::NonFiniteComputation)?;

        Ok((result.distance, azimuths))
    }

    /// Solve the inverse problem from `x` to `y`.
    ///
    /// Azimuths are computed only when `with_azimuths` is set.
    pub fn inverse(
        &self,
        x: GeoPoint,
        y: GeoPoint,
        with_azimuths: bool,
    ) -> Result<InverseResult, GeoError> {
        self.config.validate()?;
        let (lat_x, lon_x) = checked_radians(x)?;
        let (lat_y, lon_y) = checked_radians(y)?;

        if lat_x == lat_y && lon_x == lon_y {
            log::debug!("identical points {x}, skipping iteration");
            return Ok(InverseResult {
                distance: 0.0,
                azimuths: with_azimuths.then_some(Azimuths::ZERO),
            });
        }

        let f = self.ellipsoid.flattening();
        let b = self.ellipsoid.semi_minor_axis();
        let c2 = self.ellipsoid.second_eccentricity_squared();

        // u = 'reduced latitude'
        let (sin_u_x, cos_u_x) = ((1.0 - f) * lat_x.tan()).atan().sin_cos();
        let (sin_u_y, cos_u_y) = ((1.0 - f) * lat_y.tan()).atan().sin_cos();

        let l = lon_y - lon_x;

        let mut it = Iteration {
            lambda: l,
            ..Iteration::default()
        };
        let mut eps = f64::INFINITY;
        let mut rounds = 0;

        while rounds < self.config.max_iterations {
            rounds += 1;

            let (sin_lambda, cos_lambda) = it.lambda.sin_cos();
            let p = cos_u_y * sin_lambda;
            let q = cos_u_x * sin_u_y - sin_u_x * cos_u_y * cos_lambda;

            let mut sin_sigma = (p * p + q * q).sqrt();
            let cos_sigma = sin_u_x * sin_u_y + cos_u_x * cos_u_y * cos_lambda;
            let sigma = sin_sigma.atan2(cos_sigma);

            // meridional or coincident: keep the division finite
            if sin_sigma == 0.0 {
                sin_sigma = f64::MIN_POSITIVE;
            }

            let sin_alpha = cos_u_x * cos_u_y * sin_lambda / sin_sigma;
            let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

            // 0/0 when both points lie on the equator
            let mut cos_2sigma_m = cos_sigma - 2.0 * sin_u_x * sin_u_y / cos_sq_alpha;
            if cos_2sigma_m.is_nan() {
                cos_2sigma_m = 0.0;
            }

            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            let lambda = l
                + (1.0 - c)
                    * f
                    * sin_alpha
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

            eps = (lambda - it.lambda).abs();
            log::trace!("round {rounds}: lambda = {lambda:e}, eps = {eps:e}");

            it = Iteration {
                lambda,
                sin_lambda,
                cos_lambda,
                p,
                q,
                sin_sigma,
                cos_sigma,
                sigma,
                cos_sq_alpha,
                cos_2sigma_m,
            };

            if eps < self.config.tolerance {
                break;
            }
        }

        if eps.is_nan() || eps >= self.config.tolerance {
            let failure = ConvergenceFailure {
                max_iterations: self.config.max_iterations,
                tolerance: self.config.tolerance,
                eps,
            };
            log::warn!("no convergence between {x} and {y}: {failure}");
            return Err(failure.into());
        }
        log::debug!("converged after {rounds} round(s), eps = {eps:e}");

        let distance = distance_on_ellipsoid(&it, b, c2);
        if !distance.is_finite() {
            return Err(GeoError::NonFiniteComputation);
        }
        // σ = 0 with the substituted sin σ leaves Δσ slightly above σ
        let distance = distance.max(0.0);

        let azimuths =
            with_azimuths.then(|| azimuths(&it, distance, (sin_u_x, cos_u_x), (sin_u_y, cos_u_y)));

        Ok(InverseResult { distance, azimuths })
    }
}

/// `b·A·(σ - Δσ)` from the converged state.
fn distance_on_ellipsoid(it: &Iteration, b: f64, c2: f64) -> f64 {
    let u_sq = it.cos_sq_alpha * c2;
    let cap_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let cap_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

    let cos_2sigma_m_sq = it.cos_2sigma_m * it.cos_2sigma_m;
    let delta_sigma = cap_b
        * it.sin_sigma
        * (it.cos_2sigma_m
            + cap_b / 4.0
                * (it.cos_sigma * (-1.0 + 2.0 * cos_2sigma_m_sq)
                    - cap_b / 6.0
                        * it.cos_2sigma_m
                        * (-3.0 + 4.0 * it.sin_sigma * it.sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m_sq)));

    b * cap_a * (it.sigma - delta_sigma)
}

fn azimuths(
    it: &Iteration,
    distance: f64,
    (sin_u_x, cos_u_x): (f64, f64),
    (sin_u_y, cos_u_y): (f64, f64),
) -> Azimuths {
    if distance == 0.0 {
        return Azimuths::UNDEFINED;
    }

    let sin_sq_sigma = it.p * it.p + it.q * it.q;
    if sin_sq_sigma.abs() < f64::MIN_POSITIVE {
        log::debug!("sin²σ underflow, using meridional azimuths");
        return Azimuths::MERIDIONAL;
    }

    let initial = it.p.atan2(it.q);
    let terminal =
        (cos_u_x * it.sin_lambda).atan2(cos_u_x * sin_u_y * it.cos_lambda - sin_u_x * cos_u_y);

    Azimuths {
        initial_azimuth: wrap_two_pi(initial),
        final_azimuth: wrap_two_pi(terminal),
    }
}

/// Re-check the range invariant at the solver boundary.
fn checked_radians(point: GeoPoint) -> Result<(f64, f64), GeoError> {
    let (latitude, longitude) = point.to_radians();
    Latitude::try_from_radians(latitude)?;
    Longitude::try_from_radians(longitude)?;

    Ok((latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    const ACCURACY_M: f64 = 1e-3;
    const ACCURACY_RAD: f64 = 1e-3;

    fn point(lat_deg: f64, lon_deg: f64) -> GeoPoint {
        GeoPoint::from_degrees(lat_deg, lon_deg).unwrap()
    }

    fn radians(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::from_radians(lat, lon).unwrap()
    }

    fn solver() -> InverseSolver {
        InverseSolver::default()
    }

    fn assert_distance(x: GeoPoint, y: GeoPoint, expected: f64) {
        let distance = solver().distance(x, y).unwrap();
        assert!(
            (distance - expected).abs() < ACCURACY_M,
            "distance {x} -> {y}: got {distance}, expected {expected}"
        );
    }

    fn assert_azimuths(y: GeoPoint, expected: f64) {
        let (_, azimuths) = solver().solve(point(0.0, 0.0), y).unwrap();
        assert!(
            (azimuths.initial_azimuth - expected).abs() < ACCURACY_RAD,
            "initial azimuth to {y}: {azimuths:?}"
        );
        assert!(
            (azimuths.final_azimuth - expected).abs() < ACCURACY_RAD,
            "final azimuth to {y}: {azimuths:?}"
        );
    }

    #[test]
    fn identical_points_skip_iteration() {
        let config = SolverConfig::default().with_max_iterations(1);
        let solver = InverseSolver::new(Ellipsoid::WGS84, config);
        let x = point(48.8566, 2.3522);

        let result = solver.inverse(x, x, true).unwrap();
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.azimuths, Some(Azimuths::ZERO));
    }

    #[test]
    fn identical_poles_are_zero() {
        let north = radians(FRAC_PI_2, 0.0);
        assert_eq!(solver().distance(north, north).unwrap(), 0.0);
    }

    #[test]
    fn antipodal_poles_converge() {
        let north = radians(FRAC_PI_2, 0.0);
        let south = radians(-FRAC_PI_2, 0.0);

        let distance = solver().distance(north, south).unwrap();
        assert!(distance > 20_000_000.0);
    }

    #[test]
    fn antipodal_poles_converge_on_grs80() {
        let solver = InverseSolver::new(Ellipsoid::GRS80, SolverConfig::default());
        let north = radians(FRAC_PI_2, 0.0);
        let south = radians(-FRAC_PI_2, 0.0);

        assert!(solver.distance(north, south).is_ok());
    }

    #[test]
    fn meridian_fixtures() {
        assert_distance(point(0.0, 0.0), point(1.0, 0.0), 110_574.389);
        assert_distance(point(0.0, 0.0), point(2.0, 0.0), 221_149.453);
    }

    #[test]
    fn meridian_fixture_is_symmetric() {
        assert_distance(point(-0.5, 0.0), point(0.5, 0.0), 110_574.304);
        assert_distance(point(0.5, 0.0), point(-0.5, 0.0), 110_574.304);
    }

    #[test]
    fn equator_fixtures() {
        assert_distance(point(0.0, 0.0), point(0.0, 1.0), 111_319.491);
        assert_distance(point(0.0, 0.0), point(0.0, 2.0), 222_638.982);
    }

    #[test]
    fn cardinal_bearings() {
        assert_azimuths(radians(FRAC_PI_2, 0.0), 0.0);
        assert_azimuths(point(0.0, 1.0), FRAC_PI_2);
        assert_azimuths(radians(-FRAC_PI_2, 0.0), PI);
        assert_azimuths(point(0.0, -1.0), 3.0 * FRAC_PI_2);
    }

    #[test]
    fn azimuths_are_normalized() {
        let (_, azimuths) = solver()
            .solve(point(48.8566, 2.3522), point(37.7749, -122.4194))
            .unwrap();

        assert!((0.0..TAU).contains(&azimuths.initial_azimuth));
        assert!((0.0..TAU).contains(&azimuths.final_azimuth));
    }

    #[test]
    fn near_antipodal_converges() {
        assert_distance(point(0.0, 0.0), point(0.5, 179.5), 19_936_288.579);
    }

    #[test]
    fn near_antipodal_fails_to_converge() {
        let error = solver()
            .distance(point(0.0, 0.0), point(0.5, 179.7))
            .unwrap_err();

        let GeoError::NonConvergent(failure) = error else {
            panic!("expected a convergence failure, got {error:?}");
        };
        assert_eq!(failure.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(failure.tolerance, DEFAULT_TOLERANCE);
        assert!(failure.eps >= failure.tolerance);
    }

    #[test]
    fn not_enough_iterations() {
        let config = SolverConfig::default().with_max_iterations(1);
        let solver = InverseSolver::new(Ellipsoid::WGS84, config);

        let error = solver
            .distance(point(48.8534, 2.3487), point(-49.3523, 70.2150))
            .unwrap_err();
        assert!(matches!(
            error,
            GeoError::NonConvergent(ConvergenceFailure {
                max_iterations: 1,
                ..
            })
        ));
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let x = point(48.8534, 2.3487);
        let y = point(-49.3523, 70.2150);

        let (d1, a1) = solver().solve(x, y).unwrap();
        let (d2, a2) = solver().solve(x, y).unwrap();

        assert_eq!(d1.to_bits(), d2.to_bits());
        assert_eq!(a1.initial_azimuth.to_bits(), a2.initial_azimuth.to_bits());
        assert_eq!(a1.final_azimuth.to_bits(), a2.final_azimuth.to_bits());
    }

    #[test]
    fn distance_does_not_compute_azimuths() {
        let result = solver()
            .inverse(point(0.0, 0.0), point(1.0, 1.0), false)
            .unwrap();

        assert!(result.azimuths.is_none());
    }

    #[test]
    fn rejects_invalid_tolerance() {
        for tolerance in [0.0, -1e-12, f64::NAN, f64::INFINITY] {
            let solver = InverseSolver::new(
                Ellipsoid::WGS84,
                SolverConfig::default().with_tolerance(tolerance),
            );
            let error = solver
                .distance(point(0.0, 0.0), point(1.0, 0.0))
                .unwrap_err();

            assert!(matches!(error, GeoError::InvalidTolerance { .. }));
        }
    }

    #[test]
    fn rejects_zero_iterations() {
        let solver = InverseSolver::new(
            Ellipsoid::WGS84,
            SolverConfig::default().with_max_iterations(0),
        );

        assert_eq!(
            solver.distance(point(0.0, 0.0), point(0.0, 0.0)).unwrap_err(),
            GeoError::InvalidIterationLimit
        );
    }

    #[test]
    fn underflowing_separation_on_sphere_has_undefined_azimuths() {
        let sphere = Ellipsoid::new(6_371_000.0, 0.0).unwrap();
        let solver = InverseSolver::new(sphere, SolverConfig::default());

        let result = solver
            .inverse(radians(0.0, 0.0), radians(1e-310, 0.0), true)
            .unwrap();
        let azimuths = result.azimuths.unwrap();

        assert_eq!(result.distance, 0.0);
        assert!(azimuths.initial_azimuth.is_nan());
        assert!(azimuths.final_azimuth.is_nan());
    }

    #[test]
    fn underflowing_separation_on_wgs84_is_not_an_error() {
        let result = solver()
            .inverse(radians(0.0, 0.0), radians(1e-200, 0.0), true)
            .unwrap();
        let azimuths = result.azimuths.unwrap();

        assert_eq!(result.distance, 0.0);
        assert!(azimuths.initial_azimuth.is_nan());
        assert!(azimuths.final_azimuth.is_nan());

        assert_eq!(
            solver()
                .distance(radians(0.0, 0.0), radians(1e-200, 0.0))
                .unwrap(),
            0.0
        );
    }

    #[test]
    fn sin_sigma_underflow_uses_meridional_azimuths() {
        let it = Iteration {
            p: 0.0,
            q: 1e-170,
            sin_lambda: 0.0,
            cos_lambda: 1.0,
            ..Iteration::default()
        };

        let azimuths = azimuths(&it, 1.0, (0.0, 1.0), (1e-170, 1.0));
        assert_eq!(azimuths, Azimuths::MERIDIONAL);
    }

    #[test]
    fn zero_distance_takes_precedence_over_meridional() {
        let it = Iteration::default();

        let azimuths = azimuths(&it, 0.0, (0.0, 1.0), (0.0, 1.0));
        assert!(azimuths.initial_azimuth.is_nan());
        assert!(azimuths.final_azimuth.is_nan());
    }

    #[test]
    fn default_solver_uses_defaults() {
        let solver = InverseSolver::default();

        assert_eq!(solver.ellipsoid(), Ellipsoid::WGS84);
        assert_eq!(solver.config().tolerance, DEFAULT_TOLERANCE);
        assert_eq!(solver.config().max_iterations, DEFAULT_MAX_ITERATIONS);
    }
}
