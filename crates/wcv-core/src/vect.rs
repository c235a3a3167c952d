//! Vector kinematics: 2D/3D Cartesian vectors and velocities.
//!
//! All values are in internal units (meters, meters/second). The invalid
//! vector has every component NaN; any arithmetic touching it stays invalid.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::units::Unit;

/// Horizontal vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vect2 {
    pub x: f64,
    pub y: f64,
}

impl Vect2 {
    pub const ZERO: Vect2 = Vect2 { x: 0.0, y: 0.0 };
    pub const INVALID: Vect2 = Vect2 {
        x: f64::NAN,
        y: f64::NAN,
    };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_invalid(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn add(&self, other: Vect2) -> Vect2 {
        Vect2::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: Vect2) -> Vect2 {
        Vect2::new(self.x - other.x, self.y - other.y)
    }

    pub fn neg(&self) -> Vect2 {
        Vect2::new(-self.x, -self.y)
    }

    pub fn scal(&self, k: f64) -> Vect2 {
        Vect2::new(k * self.x, k * self.y)
    }

    /// `self * k + other`.
    pub fn scal_add(&self, k: f64, other: Vect2) -> Vect2 {
        Vect2::new(k * self.x + other.x, k * self.y + other.y)
    }

    /// Position after moving with velocity `v` for time `t`.
    pub fn linear(&self, v: Vect2, t: f64) -> Vect2 {
        v.scal_add(t, *self)
    }

    pub fn dot(&self, other: Vect2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (determinant).
    pub fn det(&self, other: Vect2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Squared norm.
    pub fn sqv(&self) -> f64 {
        self.dot(*self)
    }

    pub fn norm(&self) -> f64 {
        self.sqv().sqrt()
    }

    /// Unit vector, or the zero vector when the norm is exactly zero.
    pub fn hat(&self) -> Vect2 {
        let n = self.norm();
        if n == 0.0 {
            return Vect2::ZERO;
        }
        Vect2::new(self.x / n, self.y / n)
    }

    /// Compass-style track angle, clockwise from the +y axis, in `[0, 2pi)`.
    pub fn track(&self) -> f64 {
        let a = self.x.atan2(self.y);
        if a < 0.0 {
            a + 2.0 * PI
        } else {
            a
        }
    }
}

impl Add for Vect2 {
    type Output = Vect2;
    fn add(self, rhs: Vect2) -> Vect2 {
        Vect2::add(&self, rhs)
    }
}

impl Sub for Vect2 {
    type Output = Vect2;
    fn sub(self, rhs: Vect2) -> Vect2 {
        Vect2::sub(&self, rhs)
    }
}

impl Neg for Vect2 {
    type Output = Vect2;
    fn neg(self) -> Vect2 {
        Vect2::neg(&self)
    }
}

impl Mul<f64> for Vect2 {
    type Output = Vect2;
    fn mul(self, k: f64) -> Vect2 {
        self.scal(k)
    }
}

impl fmt::Display for Vect2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Three dimensional vector, z is up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vect3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vect3 {
    pub const ZERO: Vect3 = Vect3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const INVALID: Vect3 = Vect3 {
        x: f64::NAN,
        y: f64::NAN,
        z: f64::NAN,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build from components given in a horizontal and a vertical unit.
    pub fn make_xyz(x: f64, y: f64, uxy: Unit, z: f64, uz: Unit) -> Self {
        Self::new(uxy.from_value(x), uxy.from_value(y), uz.from_value(z))
    }

    pub fn is_invalid(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Horizontal projection.
    pub fn vect2(&self) -> Vect2 {
        Vect2::new(self.x, self.y)
    }

    pub fn add(&self, other: Vect3) -> Vect3 {
        Vect3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(&self, other: Vect3) -> Vect3 {
        Vect3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn neg(&self) -> Vect3 {
        Vect3::new(-self.x, -self.y, -self.z)
    }

    pub fn scal(&self, k: f64) -> Vect3 {
        Vect3::new(k * self.x, k * self.y, k * self.z)
    }

    /// `self * k + other`.
    pub fn scal_add(&self, k: f64, other: Vect3) -> Vect3 {
        Vect3::new(k * self.x + other.x, k * self.y + other.y, k * self.z + other.z)
    }

    /// Position after moving with velocity `v` for time `t`.
    pub fn linear(&self, v: Velocity, t: f64) -> Vect3 {
        v.as_vect3().scal_add(t, *self)
    }

    pub fn dot(&self, other: Vect3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn sqv(&self) -> f64 {
        self.dot(*self)
    }

    pub fn norm(&self) -> f64 {
        self.sqv().sqrt()
    }

    /// Unit vector, or the zero vector when the norm is exactly zero.
    pub fn hat(&self) -> Vect3 {
        let n = self.norm();
        if n == 0.0 {
            return Vect3::ZERO;
        }
        Vect3::new(self.x / n, self.y / n, self.z / n)
    }
}

impl Add for Vect3 {
    type Output = Vect3;
    fn add(self, rhs: Vect3) -> Vect3 {
        Vect3::add(&self, rhs)
    }
}

impl Sub for Vect3 {
    type Output = Vect3;
    fn sub(self, rhs: Vect3) -> Vect3 {
        Vect3::sub(&self, rhs)
    }
}

impl Neg for Vect3 {
    type Output = Vect3;
    fn neg(self) -> Vect3 {
        Vect3::neg(&self)
    }
}

impl Mul<f64> for Vect3 {
    type Output = Vect3;
    fn mul(self, k: f64) -> Vect3 {
        self.scal(k)
    }
}

impl fmt::Display for Vect3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Velocity vector. Algebraically a [`Vect3`]; adds the track, ground speed
/// and vertical speed views used by surveillance data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const INVALID: Velocity = Velocity {
        x: f64::NAN,
        y: f64::NAN,
        z: f64::NAN,
    };

    /// Velocity from Cartesian components in internal units.
    pub const fn mk_vxyz(vx: f64, vy: f64, vz: f64) -> Self {
        Self {
            x: vx,
            y: vy,
            z: vz,
        }
    }

    /// Velocity from Cartesian components in named units.
    pub fn make_vxyz(vx: f64, vy: f64, uxy: Unit, vz: f64, uz: Unit) -> Self {
        Self::mk_vxyz(uxy.from_value(vx), uxy.from_value(vy), uz.from_value(vz))
    }

    /// Velocity from track (radians, true north clockwise), ground speed and
    /// vertical speed, all internal units.
    pub fn mk_trk_gs_vs(trk: f64, gs: f64, vs: f64) -> Self {
        Self::mk_vxyz(gs * trk.sin(), gs * trk.cos(), vs)
    }

    /// Velocity from track in degrees, ground speed in knots and vertical
    /// speed in feet per minute.
    pub fn make_trk_gs_vs(trk_deg: f64, gs_kn: f64, vs_fpm: f64) -> Self {
        Self::mk_trk_gs_vs(
            Unit::Degree.from_value(trk_deg),
            Unit::Knot.from_value(gs_kn),
            Unit::FootPerMinute.from_value(vs_fpm),
        )
    }

    pub fn as_vect3(&self) -> Vect3 {
        Vect3::new(self.x, self.y, self.z)
    }

    pub fn vect2(&self) -> Vect2 {
        Vect2::new(self.x, self.y)
    }

    pub fn is_invalid(&self) -> bool {
        self.as_vect3().is_invalid()
    }

    pub fn is_zero(&self) -> bool {
        self.as_vect3().is_zero()
    }

    pub fn sub(&self, other: Velocity) -> Velocity {
        Velocity::from(self.as_vect3().sub(other.as_vect3()))
    }

    pub fn neg(&self) -> Velocity {
        Velocity::from(self.as_vect3().neg())
    }

    pub fn scal(&self, k: f64) -> Velocity {
        Velocity::from(self.as_vect3().scal(k))
    }

    /// Track angle in radians, true north clockwise, `[0, 2pi)`.
    pub fn trk(&self) -> f64 {
        self.vect2().track()
    }

    /// Ground speed.
    pub fn gs(&self) -> f64 {
        self.vect2().norm()
    }

    /// Vertical speed.
    pub fn vs(&self) -> f64 {
        self.z
    }
}

impl From<Vect3> for Velocity {
    fn from(v: Vect3) -> Self {
        Velocity::mk_vxyz(v.x, v.y, v.z)
    }
}

impl From<Velocity> for Vect3 {
    fn from(v: Velocity) -> Self {
        v.as_vect3()
    }
}

impl Sub for Velocity {
    type Output = Velocity;
    fn sub(self, rhs: Velocity) -> Velocity {
        Velocity::sub(&self, rhs)
    }
}

impl Neg for Velocity {
    type Output = Velocity;
    fn neg(self) -> Velocity {
        Velocity::neg(&self)
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
