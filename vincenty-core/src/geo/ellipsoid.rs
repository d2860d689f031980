use super::GeoError;
use anyhow::anyhow;
use std::{fmt, str::FromStr};

/// Reference ellipsoid, defined by its semi-major axis and flattening.
///
/// for the earth, use [`Ellipsoid::WGS84`] (the default)
///
/// It holds that `b = (1.0 - f) * a`.
///
/// ```
/// use vincenty_core::Ellipsoid;
///
/// let grs80: Ellipsoid = "GRS-80".parse().unwrap();
/// assert_eq!(grs80, Ellipsoid::GRS80);
/// assert!((Ellipsoid::WGS84.semi_minor_axis() - 6_356_752.314245).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi Major Axis in meter / Radius at equator
    a: f64,
    /// flattening `(a - b) / a`
    f: f64,
}

impl Ellipsoid {
    /// World Geodetic System 1984.
    pub const WGS84: Self = Self {
        a: 6_378_137.0,
        f: 1.0 / 298.257223563,
    };

    /// Geodetic Reference System 1980.
    pub const GRS80: Self = Self {
        a: 6_378_137.0,
        f: 1.0 / 298.257222100882711,
    };

    pub fn new(a: f64, f: f64) -> Result<Self, GeoError> {
        if !a.is_finite() || a <= 0.0 || !f.is_finite() || !(0.0..1.0).contains(&f) {
            return Err(GeoError::InvalidEllipsoid { a, f });
        }

        Ok(Self { a, f })
    }

    /// Look an ellipsoid up by name, ignoring case and dashes.
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase().replace('-', "");
        match name.as_str() {
            "wgs84" => Some(Self::WGS84),
            "grs80" => Some(Self::GRS80),
            _ => None,
        }
    }

    pub const fn semi_major_axis(&self) -> f64 {
        self.a
    }

    pub const fn flattening(&self) -> f64 {
        self.f
    }

    pub fn inverse_flattening(&self) -> f64 {
        1.0 / self.f
    }

    /// Radius at pole, in meter
    pub fn semi_minor_axis(&self) -> f64 {
        (1.0 - self.f) * self.a
    }

    /// `(a² - b²) / b²`
    pub fn second_eccentricity_squared(&self) -> f64 {
        let b = self.semi_minor_axis();
        (self.a * self.a - b * b) / (b * b)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        crate::defaults::DEFAULT_ELLIPSOID
    }
}

impl fmt::Display for Ellipsoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::WGS84 {
            f.write_str("WGS-84")
        } else if *self == Self::GRS80 {
            f.write_str("GRS-80")
        } else {
            write!(f, "a={}m, 1/f={}", self.a, self.inverse_flattening())
        }
    }
}

impl FromStr for Ellipsoid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::named(s).ok_or_else(|| {
            anyhow!("Failed to parse Ellipsoid: unknown `{s}`, expected `wgs84` or `grs80`")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_wgs84() {
        assert_eq!(Ellipsoid::default(), Ellipsoid::WGS84);
    }

    #[test]
    fn derived_constants() {
        let wgs84 = Ellipsoid::WGS84;

        assert!((wgs84.inverse_flattening() - 298.257223563).abs() < 1e-9);
        assert!((wgs84.semi_minor_axis() - 6_356_752.314245).abs() < 1e-6);
        assert!((wgs84.second_eccentricity_squared() - 0.006_739_496_742_3).abs() < 1e-12);
    }

    #[test]
    fn sphere_has_no_eccentricity() {
        let sphere = Ellipsoid::new(6_371_000.0, 0.0).unwrap();

        assert_eq!(sphere.semi_minor_axis(), 6_371_000.0);
        assert_eq!(sphere.second_eccentricity_squared(), 0.0);
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(
            Ellipsoid::new(0.0, 0.003).unwrap_err(),
            GeoError::InvalidEllipsoid { a: 0.0, f: 0.003 }
        );
        assert_eq!(
            Ellipsoid::new(6_378_137.0, 1.0).unwrap_err(),
            GeoError::InvalidEllipsoid {
                a: 6_378_137.0,
                f: 1.0
            }
        );
        assert!(Ellipsoid::new(f64::INFINITY, 0.003).is_err());
        assert!(Ellipsoid::new(6_378_137.0, -0.1).is_err());
    }

    #[test]
    fn named_lookup() {
        assert_eq!(Ellipsoid::named("wgs84"), Some(Ellipsoid::WGS84));
        assert_eq!(Ellipsoid::named(" WGS-84 "), Some(Ellipsoid::WGS84));
        assert_eq!(Ellipsoid::named("grs80"), Some(Ellipsoid::GRS80));
        assert_eq!(Ellipsoid::named("clarke1866"), None);
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(Ellipsoid::WGS84.to_string(), "WGS-84");
        assert_eq!(Ellipsoid::GRS80.to_string(), "GRS-80");
        assert_eq!("WGS-84".parse::<Ellipsoid>().unwrap(), Ellipsoid::WGS84);

        let error = "airy".parse::<Ellipsoid>().unwrap_err().to_string();
        assert!(error.contains("unknown `airy`"));
    }
}
