use super::GeoError;
use anyhow::{Context as _, anyhow, ensure};
use std::{
    f64::consts::{FRAC_PI_2, PI},
    fmt,
    str::FromStr,
};

const DEGREE_SUFFIX: char = '\u{00BA}';
const ALT_DEGREE_SUFFIX: char = '\u{00B0}';

/// Latitude in radians, within `[-π/2, π/2]`.
///
/// # Parsing and display
///
/// Text is in decimal degrees.
///
/// ```
/// use vincenty_core::Latitude;
///
/// let latitude: Latitude = "48.8534".parse().unwrap();
/// assert_eq!(latitude.to_string(), "48.853400º");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Latitude(f64);

impl Latitude {
    pub const MIN: f64 = -FRAC_PI_2;
    pub const MAX: f64 = FRAC_PI_2;

    /// Creates a latitude from radians.
    ///
    /// Valid range: `[-π/2, π/2]`.
    pub fn try_from_radians(value: f64) -> Result<Self, GeoError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(GeoError::InvalidLatitude { value });
        }

        Ok(Self(value))
    }

    /// Creates a latitude from decimal degrees.
    pub fn from_degrees(value: f64) -> Result<Self, GeoError> {
        if !value.is_finite() {
            return Err(GeoError::NonFiniteComputation);
        }
        if !(-90.0..=90.0).contains(&value) {
            return Err(GeoError::InvalidLatitude {
                value: value.to_radians(),
            });
        }

        Self::try_from_radians(value.to_radians().clamp(Self::MIN, Self::MAX))
    }

    pub const fn as_radians(self) -> f64 {
        self.0
    }

    pub fn as_degrees(self) -> f64 {
        self.0.to_degrees()
    }
}

impl fmt::Display for Latitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}{DEGREE_SUFFIX}", self.as_degrees())
    }
}

impl FromStr for Latitude {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees = parse_coordinate_degrees(s).context("Failed to parse Latitude")?;
        Self::from_degrees(degrees).map_err(|error| anyhow!("Failed to parse Latitude: {error}"))
    }
}

/// Longitude in radians, within `[-π, π]`.
///
/// # Eastern and western examples
///
/// ```
/// use vincenty_core::Longitude;
///
/// let paris_east: Longitude = "2.3522".parse().unwrap();
/// let san_francisco_west: Longitude = "-122.4194".parse().unwrap();
///
/// assert!(paris_east.as_radians() > 0.0);
/// assert!(san_francisco_west.as_radians() < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Longitude(f64);

impl Longitude {
    pub const MIN: f64 = -PI;
    pub const MAX: f64 = PI;

    /// Creates a longitude from radians.
    ///
    /// Valid range: `[-π, π]`.
    pub fn try_from_radians(value: f64) -> Result<Self, GeoError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(GeoError::InvalidLongitude { value });
        }

        Ok(Self(value))
    }

    /// Creates a longitude from decimal degrees.
    pub fn from_degrees(value: f64) -> Result<Self, GeoError> {
        if !value.is_finite() {
            return Err(GeoError::NonFiniteComputation);
        }
        if !(-180.0..=180.0).contains(&value) {
            return Err(GeoError::InvalidLongitude {
                value: value.to_radians(),
            });
        }

        Self::try_from_radians(value.to_radians().clamp(Self::MIN, Self::MAX))
    }

    pub const fn as_radians(self) -> f64 {
        self.0
    }

    pub fn as_degrees(self) -> f64 {
        self.0.to_degrees()
    }
}

impl fmt::Display for Longitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}{DEGREE_SUFFIX}", self.as_degrees())
    }
}

impl FromStr for Longitude {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees = parse_coordinate_degrees(s).context("Failed to parse Longitude")?;
        Self::from_degrees(degrees).map_err(|error| anyhow!("Failed to parse Longitude: {error}"))
    }
}

/// Geographic point with validated latitude and longitude.
///
/// # Examples
///
/// ```
/// use vincenty_core::GeoPoint;
///
/// // Eastern longitude (Paris)
/// let paris = GeoPoint::from_degrees(48.8566, 2.3522).unwrap();
/// // Western longitude (San Francisco)
/// let san_francisco = GeoPoint::from_degrees(37.7749, -122.4194).unwrap();
///
/// assert!(paris.longitude.as_radians() > 0.0);
/// assert!(san_francisco.longitude.as_radians() < 0.0);
///
/// let parsed: GeoPoint = "48.8566, 2.3522".parse().unwrap();
/// assert_eq!(parsed.to_string(), "48.856600º, 2.352200º");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: Latitude,
    pub longitude: Longitude,
}

impl GeoPoint {
    pub const fn new(latitude: Latitude, longitude: Longitude) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn from_radians(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        Ok(Self::new(
            Latitude::try_from_radians(latitude)?,
            Longitude::try_from_radians(longitude)?,
        ))
    }

    pub fn from_degrees(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        Ok(Self::new(
            Latitude::from_degrees(latitude)?,
            Longitude::from_degrees(longitude)?,
        ))
    }

    /// `(latitude, longitude)` in radians.
    pub const fn to_radians(self) -> (f64, f64) {
        (self.latitude.as_radians(), self.longitude.as_radians())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

impl FromStr for GeoPoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(latitude_raw), Some(longitude_raw)) = (parts.next(), parts.next()) else {
            return Err(anyhow!(
                "Failed to parse GeoPoint: expected format `<latitude>, <longitude>`"
            ));
        };
        ensure!(
            parts.next().is_none(),
            "Failed to parse GeoPoint: expected a single comma separator"
        );

        let latitude: Latitude = latitude_raw
            .trim()
            .parse()
            .context("Failed to parse GeoPoint latitude")?;
        let longitude: Longitude = longitude_raw
            .trim()
            .parse()
            .context("Failed to parse GeoPoint longitude")?;

        Ok(Self::new(latitude, longitude))
    }
}

fn parse_coordinate_degrees(input: &str) -> anyhow::Result<f64> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_suffix(DEGREE_SUFFIX)
        .or_else(|| trimmed.strip_suffix(ALT_DEGREE_SUFFIX))
        .unwrap_or(trimmed)
        .trim();

    ensure!(!trimmed.is_empty(), "cannot parse from empty string");

    trimmed
        .parse::<f64>()
        .map_err(|error| anyhow!("failed to parse `{input}`: {error}"))
}
