use anyhow::{anyhow, ensure};
use std::{fmt, str::FromStr};

/// International nautical mile, in meters.
pub const METERS_PER_NAUTICAL_MILE: f64 = 1_852.0;
pub const METERS_PER_KILOMETER: f64 = 1_000.0;

/// ```
/// # use vincenty_core::units::meters_to_nautical_miles;
/// assert_eq!(meters_to_nautical_miles(3_704.0), 2.0);
/// ```
pub fn meters_to_nautical_miles(meters: f64) -> f64 {
    meters / METERS_PER_NAUTICAL_MILE
}

pub fn nautical_miles_to_meters(nautical_miles: f64) -> f64 {
    nautical_miles * METERS_PER_NAUTICAL_MILE
}

/// Unit a distance in meters can be reported in.
///
/// # Parsing and display
///
/// ```
/// use vincenty_core::LengthUnit;
///
/// let unit: LengthUnit = "nmi".parse().unwrap();
/// assert_eq!(unit, LengthUnit::NauticalMiles);
/// assert_eq!(unit.to_string(), "nmi");
/// assert_eq!(unit.from_meters(1_852.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthUnit {
    #[default]
    Meters,
    Kilometers,
    NauticalMiles,
}

impl LengthUnit {
    const fn meters_per_unit(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Kilometers => METERS_PER_KILOMETER,
            Self::NauticalMiles => METERS_PER_NAUTICAL_MILE,
        }
    }

    pub fn from_meters(self, meters: f64) -> f64 {
        meters / self.meters_per_unit()
    }

    pub fn to_meters(self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Kilometers => "km",
            Self::NauticalMiles => "nmi",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ensure!(!trimmed.is_empty(), "Failed to parse LengthUnit: empty");

        match trimmed {
            "m" | "meter" | "meters" => Ok(Self::Meters),
            "km" | "kilometer" | "kilometers" => Ok(Self::Kilometers),
            "nmi" | "NM" | "nautical-miles" => Ok(Self::NauticalMiles),
            _ => Err(anyhow!(
                "Failed to parse LengthUnit `{trimmed}`: expected `m`, `km` or `nmi`"
            )),
        }
    }
}
