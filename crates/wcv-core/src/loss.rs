//! Loss-of-well-clear intervals and conflict results.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vect::Vect3;

/// Time interval `(time_in, time_out)` of loss of well clear, in seconds
/// relative to the current time.
///
/// Every point strictly between the bounds is a violation time, and
/// `time_in < time_out` holds exactly when there is a conflict. The bounds
/// themselves are not guaranteed to be violations.
///
/// No conflict is represented by an inverted interval, canonically
/// `(T, B)` for the lookahead window `[B, T]`. Do not read it as a conflict
/// of negative duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossData {
    pub time_in: f64,
    pub time_out: f64,
}

impl Default for LossData {
    /// The empty interval over an instantaneous window.
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl LossData {
    pub const fn new(time_in: f64, time_out: f64) -> Self {
        Self { time_in, time_out }
    }

    /// Inverted sentinel for the lookahead window `[b, t]`.
    pub const fn no_conflict(b: f64, t: f64) -> Self {
        Self::new(t, b)
    }

    /// Result for NaN-bearing geometry. Never a conflict.
    pub const fn invalid() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn is_invalid(&self) -> bool {
        self.time_in.is_nan() || self.time_out.is_nan()
    }

    pub fn conflict(&self) -> bool {
        self.time_in < self.time_out
    }

    /// Conflict lasting at least `thr` seconds.
    pub fn conflict_longer_than(&self, thr: f64) -> bool {
        self.conflict() && self.time_out - self.time_in >= thr
    }

    pub fn time_in(&self) -> f64 {
        self.time_in
    }

    pub fn time_out(&self) -> f64 {
        self.time_out
    }

    /// Length of the violation, 0 when there is none.
    pub fn duration(&self) -> f64 {
        if self.conflict() {
            self.time_out - self.time_in
        } else {
            0.0
        }
    }

    /// Midpoint of the bounds.
    pub fn midpoint(&self) -> f64 {
        (self.time_in + self.time_out) / 2.0
    }

    /// Shift both bounds by `dt`.
    pub fn shift(&self, dt: f64) -> Self {
        Self::new(self.time_in + dt, self.time_out + dt)
    }
}

impl fmt::Display for LossData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[time_in: {}, time_out: {}]", self.time_in, self.time_out)
    }
}

/// How horizontal and vertical separation are folded into one severity
/// figure. Each distance is first divided by its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityNorm {
    /// `max(h / DTHR, |z| / ZTHR)`: below 1 exactly inside the cylinder.
    #[default]
    MaxRatio,
    /// `sqrt((h / DTHR)^2 + (z / ZTHR)^2)`.
    EuclideanRatio,
}

fn ratio(dist: f64, thr: f64) -> f64 {
    if thr > 0.0 {
        dist / thr
    } else if dist == 0.0 {
        0.0
    } else {
        f64::INFINITY
    }
}

impl SeverityNorm {
    /// Normalized distance of relative position `s` against the cylinder
    /// of radius `dthr` and half-height `zthr`.
    pub fn distance(self, s: Vect3, dthr: f64, zthr: f64) -> f64 {
        if s.is_invalid() {
            return f64::NAN;
        }
        let h = ratio(s.vect2().norm(), dthr);
        let v = ratio(s.z.abs(), zthr);
        match self {
            SeverityNorm::MaxRatio => h.max(v),
            SeverityNorm::EuclideanRatio => h.hypot(v),
        }
    }
}

/// A [`LossData`] enriched with the time of closest approach and the
/// normalized severity distance at that time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConflictData {
    #[serde(flatten)]
    pub loss: LossData,
    /// Midpoint of the loss interval (s)
    pub time_crit: f64,
    /// Severity distance at `time_crit`, dimensionless
    pub dist_crit: f64,
}

impl ConflictData {
    pub fn new(loss: LossData, time_crit: f64, dist_crit: f64) -> Self {
        Self {
            loss,
            time_crit,
            dist_crit,
        }
    }

    pub fn conflict(&self) -> bool {
        self.loss.conflict()
    }

    pub fn loss(&self) -> LossData {
        self.loss
    }

    pub fn time_in(&self) -> f64 {
        self.loss.time_in
    }

    pub fn time_out(&self) -> f64 {
        self.loss.time_out
    }

    pub fn time_crit(&self) -> f64 {
        self.time_crit
    }

    pub fn dist_crit(&self) -> f64 {
        self.dist_crit
    }
}

impl fmt::Display for ConflictData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [time_crit: {}, dist_crit: {}]",
            self.loss, self.time_crit, self.dist_crit
        )
    }
}
