//! Modified-tau horizontal time variable.
//!
//! `tau_mod = (DTHR^2 - |s|^2) / (s . v)` for converging geometry. It
//! approximates the time to reach the DTHR circle and stays finite when
//! the aircraft pass close to each other.

use crate::horizontal::{delta, theta_d, HorizontalTvar};
use crate::loss::LossData;
use crate::table::WcvTable;
use crate::util::{almost_equals, sq};
use crate::vect::Vect2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TauMod;

impl TauMod {
    pub const NAME: &'static str = "WCV_TAUMOD";
}

impl HorizontalTvar for TauMod {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn horizontal_tvar(&self, table: &WcvTable, s: Vect2, v: Vect2) -> f64 {
        let sdotv = s.dot(v);
        if sdotv < 0.0 {
            return (sq(table.dthr()) - s.sqv()) / sdotv;
        }
        -1.0
    }

    fn horizontal_wcv_interval(
        &self,
        table: &WcvTable,
        duration: f64,
        s: Vect2,
        v: Vect2,
    ) -> LossData {
        let none = LossData::new(duration, 0.0);
        let sqs = s.sqv();
        let sdotv = s.dot(v);
        let sqd = sq(table.dthr());
        let a = v.sqv();

        if almost_equals(a, 0.0) {
            return if sqs <= sqd {
                LossData::new(0.0, duration)
            } else {
                none
            };
        }
        if sqs <= sqd {
            return LossData::new(0.0, duration.min(theta_d(s, v, 1, table.dthr())));
        }

        // tau_mod(t) <= TTHR  <=>  a t^2 + b t + c <= 0 while converging
        let b = 2.0 * sdotv + table.tthr() * a;
        let c = sqs + table.tthr() * sdotv - sqd;
        let discr = sq(b) - 4.0 * a * c;
        if sdotv >= 0.0 || discr < 0.0 {
            return none;
        }
        let t = (-b - discr.sqrt()) / (2.0 * a);
        if delta(s, v, table.dthr()) >= 0.0 && t <= duration {
            return LossData::new(t.max(0.0), duration.min(theta_d(s, v, 1, table.dthr())));
        }
        none
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> WcvTable {
        WcvTable::new(100.0, 50.0, 20.0, 0.0)
    }

    #[test]
    fn test_tvar_converging_and_diverging() {
        let s = Vect2::new(-1000.0, 0.0);
        let v = Vect2::new(10.0, 0.0);
        // (100^2 - 1000^2) / -10000
        assert_eq!(TauMod.horizontal_tvar(&table(), s, v), 99.0);
        assert_eq!(TauMod.horizontal_tvar(&table(), s.neg(), v), -1.0);
    }

    #[test]
    fn test_head_on_interval() {
        // Closing at 10 m/s from 1000 m; circle reached at t = 90, left at 110.
        let s = Vect2::new(-1000.0, 0.0);
        let v = Vect2::new(10.0, 0.0);
        let ld = TauMod.horizontal_wcv_interval(&table(), 200.0, s, v);
        assert!(ld.conflict());
        assert!(ld.time_in < 90.0 && ld.time_in > 60.0);
        assert!((ld.time_out - 110.0).abs() < 1e-9);

        // tau_mod at entry equals TTHR
        let at_in = s.linear(v, ld.time_in);
        let tv = TauMod.horizontal_tvar(&table(), at_in, v);
        assert!((tv - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_duration_clips_interval() {
        let s = Vect2::new(-1000.0, 0.0);
        let v = Vect2::new(10.0, 0.0);
        let ld = TauMod.horizontal_wcv_interval(&table(), 100.0, s, v);
        assert_eq!(ld.time_out, 100.0);
        let none = TauMod.horizontal_wcv_interval(&table(), 50.0, s, v);
        assert!(!none.conflict());
        assert_eq!(none, LossData::new(50.0, 0.0));
    }

    #[test]
    fn test_inside_without_motion() {
        let ld = TauMod.horizontal_wcv_interval(&table(), 30.0, Vect2::new(10.0, 0.0), Vect2::ZERO);
        assert_eq!(ld, LossData::new(0.0, 30.0));
        let out = TauMod.horizontal_wcv_interval(&table(), 30.0, Vect2::new(500.0, 0.0), Vect2::ZERO);
        assert!(!out.conflict());
    }

    #[test]
    fn test_miss_distance_too_large() {
        let s = Vect2::new(-1000.0, 150.0);
        let v = Vect2::new(10.0, 0.0);
        assert!(!TauMod.horizontal_wcv_interval(&table(), 500.0, s, v).conflict());
        assert!(!TauMod.horizontal_wcv(&table(), s.linear(v, 100.0), v));
    }

    #[test]
    fn test_interval_agrees_with_predicate() {
        let s = Vect2::new(-800.0, 40.0);
        let v = Vect2::new(12.0, -1.0);
        let ld = TauMod.horizontal_wcv_interval(&table(), 300.0, s, v);
        assert!(ld.conflict());
        let mid = ld.midpoint();
        assert!(TauMod.horizontal_wcv(&table(), s.linear(v, mid), v));
        assert!(!TauMod.horizontal_wcv(&table(), s.linear(v, ld.time_in - 1.0), v));
        assert!(!TauMod.horizontal_wcv(&table(), s.linear(v, ld.time_out + 1.0), v));
    }
}
