//! Horizontal closure model.
//!
//! Closest-point-of-approach primitives for straight-line relative motion,
//! and the [`HorizontalTvar`] capability implemented by each horizontal
//! time-variable strategy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::WcvError;
use crate::loss::LossData;
use crate::table::WcvTable;
use crate::taumod::TauMod;
use crate::tcpa::Tcpa;
use crate::tep::Tep;
use crate::util::{root2b, sq};
use crate::vect::Vect2;

/// Time of closest point of approach. Negative when the closest point is in
/// the past; 0 when there is no relative motion.
pub fn tcpa(s: Vect2, v: Vect2) -> f64 {
    let nv = v.sqv();
    if nv > 0.0 {
        -s.dot(v) / nv
    } else {
        0.0
    }
}

/// Minimum separation from now on along the relative trajectory.
///
/// Returns `|s|` when the aircraft are diverging or have no relative motion.
pub fn dcpa(s: Vect2, v: Vect2) -> f64 {
    v.scal_add(tcpa(s, v).max(0.0), s).norm()
}

/// `D^2 |v|^2 - (s x v)^2`. Non-negative iff the relative trajectory line
/// meets the circle of radius `d`.
pub fn delta(s: Vect2, v: Vect2, d: f64) -> f64 {
    sq(d) * v.sqv() - sq(s.det(v))
}

/// Time at which the relative trajectory crosses the circle of radius `d`:
/// entry for `eps = -1`, exit for `eps = 1`. NaN when it never does.
pub fn theta_d(s: Vect2, v: Vect2, eps: i32, d: f64) -> f64 {
    let a = v.sqv();
    let b = s.dot(v);
    let c = s.sqv() - sq(d);
    root2b(a, b, c, eps)
}

/// Capability of a horizontal closure-time strategy.
///
/// Implementations define the closure-time variable `tvar` and solve for
/// the window where the horizontal violation predicate holds. `tvar` must
/// be continuous in `s` and `v`, and every interval reported as violating
/// must contain a time where [`HorizontalTvar::horizontal_wcv`] is true.
pub trait HorizontalTvar: fmt::Debug + Send + Sync {
    /// Strategy name, e.g. `WCV_TAUMOD`.
    fn name(&self) -> &'static str;

    /// Closure-time variable for relative position `s` and velocity `v`.
    /// Negative when undefined (diverging geometry).
    fn horizontal_tvar(&self, table: &WcvTable, s: Vect2, v: Vect2) -> f64;

    /// Interval within `[0, duration]` where the horizontal predicate holds,
    /// `(duration, 0)` when nowhere.
    fn horizontal_wcv_interval(
        &self,
        table: &WcvTable,
        duration: f64,
        s: Vect2,
        v: Vect2,
    ) -> LossData;

    /// Horizontal well-clear violation at the current relative state.
    fn horizontal_wcv(&self, table: &WcvTable, s: Vect2, v: Vect2) -> bool {
        if s.norm() <= table.dthr() {
            return true;
        }
        if dcpa(s, v) <= table.dthr() {
            let tvar = self.horizontal_tvar(table, s, v);
            return 0.0 <= tvar && tvar <= table.tthr();
        }
        false
    }
}

/// Selector for the built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TvarKind {
    /// Modified tau
    #[default]
    TauMod,
    /// Time to closest point of approach
    Tcpa,
    /// Time to entry point
    Tep,
}

impl TvarKind {
    pub fn build(self) -> Arc<dyn HorizontalTvar> {
        match self {
            TvarKind::TauMod => Arc::new(TauMod),
            TvarKind::Tcpa => Arc::new(Tcpa),
            TvarKind::Tep => Arc::new(Tep),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TvarKind::TauMod => TauMod::NAME,
            TvarKind::Tcpa => Tcpa::NAME,
            TvarKind::Tep => Tep::NAME,
        }
    }
}

impl fmt::Display for TvarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TvarKind {
    type Err = WcvError;

    /// Accepts `taumod`, `tcpa`, `tep`, with or without the `wcv_` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.strip_prefix("wcv_").unwrap_or(&lower) {
            "taumod" | "tau_mod" => Ok(TvarKind::TauMod),
            "tcpa" => Ok(TvarKind::Tcpa),
            "tep" => Ok(TvarKind::Tep),
            _ => Err(WcvError::UnknownTvar(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tcpa_and_dcpa() {
        let s = Vect2::new(-100.0, 50.0);
        let v = Vect2::new(10.0, 0.0);
        assert_eq!(tcpa(s, v), 10.0);
        assert_eq!(dcpa(s, v), 50.0);
    }

    #[test]
    fn test_dcpa_without_relative_motion() {
        let s = Vect2::new(3.0, 4.0);
        assert_eq!(tcpa(s, Vect2::ZERO), 0.0);
        assert_eq!(dcpa(s, Vect2::ZERO), 5.0);
    }

    #[test]
    fn test_dcpa_when_diverging_is_current_distance() {
        let s = Vect2::new(100.0, 50.0);
        let v = Vect2::new(10.0, 0.0);
        assert!(tcpa(s, v) < 0.0);
        assert!((dcpa(s, v) - s.norm()).abs() < 1e-12);
    }

    #[test]
    fn test_theta_d_entry_exit() {
        let s = Vect2::new(-100.0, 0.0);
        let v = Vect2::new(10.0, 0.0);
        assert_eq!(theta_d(s, v, -1, 20.0), 8.0);
        assert_eq!(theta_d(s, v, 1, 20.0), 12.0);
        assert!(delta(s, v, 20.0) > 0.0);

        let miss = Vect2::new(-100.0, 30.0);
        assert!(delta(miss, v, 20.0) < 0.0);
        assert!(theta_d(miss, v, -1, 20.0).is_nan());
    }

    #[test]
    fn test_tvar_kind_parse() {
        assert_eq!("TAUMOD".parse::<TvarKind>().unwrap(), TvarKind::TauMod);
        assert_eq!("wcv_tcpa".parse::<TvarKind>().unwrap(), TvarKind::Tcpa);
        assert_eq!("WCV_TEP".parse::<TvarKind>().unwrap(), TvarKind::Tep);
        assert!(matches!(
            "tau".parse::<TvarKind>(),
            Err(WcvError::UnknownTvar(_))
        ));
        assert_eq!(TvarKind::Tep.build().name(), "WCV_TEP");
    }
}
