/*!
# Vincenty inverse solver

Ellipsoidal distance and azimuths between two points, computed with
Vincenty's inverse formulae.

```
use vincenty_core::{GeoPoint, distance};

let origin = GeoPoint::from_degrees(0.0, 0.0).unwrap();
let north = GeoPoint::from_degrees(1.0, 0.0).unwrap();

let meters = distance(origin, north).unwrap();
assert!((meters - 110_574.389).abs() < 1e-3);
```
*/

pub mod defaults;
pub mod geo;
pub mod units;

pub use self::{
    geo::{
        Azimuths, ConvergenceFailure, Ellipsoid, GeoError, GeoPoint, InverseResult, InverseSolver,
        Latitude, Longitude, SolverConfig, distance, distance_with, solve_inverse,
        solve_inverse_with, wrap_two_pi,
    },
    units::LengthUnit,
};
