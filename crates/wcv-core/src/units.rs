//! Named units and conversion to the internal SI representation.
//!
//! Internally every distance is in meters, every time in seconds, every
//! speed in meters per second and every angle in radians.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WcvError;

const FOOT_M: f64 = 0.3048;
const NMI_M: f64 = 1852.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Meter,
    Kilometer,
    Foot,
    NauticalMile,
    Second,
    Minute,
    Hour,
    MeterPerSecond,
    Knot,
    FootPerMinute,
    Degree,
    Radian,
    Unitless,
}

impl Unit {
    /// Multiplier from this unit to the internal unit.
    pub fn factor(self) -> f64 {
        match self {
            Unit::Meter | Unit::Second | Unit::MeterPerSecond | Unit::Radian | Unit::Unitless => {
                1.0
            }
            Unit::Kilometer => 1000.0,
            Unit::Foot => FOOT_M,
            Unit::NauticalMile => NMI_M,
            Unit::Minute => 60.0,
            Unit::Hour => 3600.0,
            Unit::Knot => NMI_M / 3600.0,
            Unit::FootPerMinute => FOOT_M / 60.0,
            Unit::Degree => std::f64::consts::PI / 180.0,
        }
    }

    /// Convert `value` expressed in this unit to internal units.
    pub fn from_value(self, value: f64) -> f64 {
        value * self.factor()
    }

    /// Convert an internal `value` to this unit.
    pub fn to_value(self, value: f64) -> f64 {
        value / self.factor()
    }

    /// Short canonical name, as written inside `[...]` in parameter text.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Meter => "m",
            Unit::Kilometer => "km",
            Unit::Foot => "ft",
            Unit::NauticalMile => "nmi",
            Unit::Second => "s",
            Unit::Minute => "min",
            Unit::Hour => "h",
            Unit::MeterPerSecond => "m/s",
            Unit::Knot => "knot",
            Unit::FootPerMinute => "fpm",
            Unit::Degree => "deg",
            Unit::Radian => "rad",
            Unit::Unitless => "unitless",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = WcvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim().to_ascii_lowercase().as_str() {
            "m" | "meter" | "meters" => Unit::Meter,
            "km" | "kilometer" | "kilometers" => Unit::Kilometer,
            "ft" | "foot" | "feet" => Unit::Foot,
            "nmi" | "nm" | "nautical_mile" => Unit::NauticalMile,
            "s" | "sec" | "second" | "seconds" => Unit::Second,
            "min" | "minute" | "minutes" => Unit::Minute,
            "h" | "hr" | "hour" | "hours" => Unit::Hour,
            "m/s" | "mps" => Unit::MeterPerSecond,
            "kn" | "kts" | "knot" | "knots" => Unit::Knot,
            "fpm" | "ft/min" => Unit::FootPerMinute,
            "deg" | "degree" | "degrees" => Unit::Degree,
            "rad" | "radian" | "radians" => Unit::Radian,
            "unitless" | "unspecified" | "" => Unit::Unitless,
            other => return Err(WcvError::UnknownUnit(other.to_string())),
        };
        Ok(unit)
    }
}
