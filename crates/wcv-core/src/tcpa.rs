//! Time-to-closest-point-of-approach horizontal time variable.

use crate::horizontal::{self, delta, theta_d, HorizontalTvar};
use crate::loss::LossData;
use crate::table::WcvTable;
use crate::util::{almost_equals, sq};
use crate::vect::Vect2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tcpa;

impl Tcpa {
    pub const NAME: &'static str = "WCV_TCPA";
}

impl HorizontalTvar for Tcpa {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn horizontal_tvar(&self, _table: &WcvTable, s: Vect2, v: Vect2) -> f64 {
        horizontal::tcpa(s, v)
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
        let sqd = sq(table.dthr());

        if almost_equals(v.sqv(), 0.0) {
            return if sqs <= sqd {
                LossData::new(0.0, duration)
            } else {
                none
            };
        }
        if sqs <= sqd {
            return LossData::new(0.0, duration.min(theta_d(s, v, 1, table.dthr())));
        }
        if s.dot(v) > 0.0 {
            return none;
        }
        let tcpa = horizontal::tcpa(s, v);
        if v.scal_add(tcpa, s).norm() > table.dthr() {
            return none;
        }
        // Only reachable through rounding once the CPA is inside DTHR.
        if delta(s, v, table.dthr()) < 0.0 {
            if tcpa - table.tthr() > duration {
                return none;
            }
            return LossData::new((tcpa - table.tthr()).max(0.0), duration.min(tcpa));
        }
        let tmin = theta_d(s, v, -1, table.dthr()).min(tcpa - table.tthr());
        if tmin > duration {
            return none;
        }
        LossData::new(tmin.max(0.0), duration.min(theta_d(s, v, 1, table.dthr())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> WcvTable {
        WcvTable::new(100.0, 50.0, 20.0, 0.0)
    }

    #[test]
    fn test_tvar_is_tcpa() {
        let s = Vect2::new(-1000.0, 0.0);
        let v = Vect2::new(10.0, 0.0);
        assert_eq!(Tcpa.horizontal_tvar(&table(), s, v), 100.0);
    }

    #[test]
    fn test_interval_starts_tthr_before_cpa() {
        // CPA at t = 100, entry at 90: the TTHR window opens at t = 80.
        let s = Vect2::new(-1000.0, 0.0);
        let v = Vect2::new(10.0, 0.0);
        let ld = Tcpa.horizontal_wcv_interval(&table(), 300.0, s, v);
        assert_eq!(ld, LossData::new(80.0, 110.0));
    }

    #[test]
    fn test_entry_before_tthr_window() {
        // Slow closure: entry at t = 900 precedes tcpa - TTHR = 980.
        let s = Vect2::new(-1000.0, 0.0);
        let v = Vect2::new(1.0, 0.0);
        let ld = Tcpa.horizontal_wcv_interval(&table(), 2000.0, s, v);
        assert_eq!(ld.time_in, 900.0);
        assert_eq!(ld.time_out, 1100.0);
    }

    #[test]
    fn test_diverging_is_clear() {
        let s = Vect2::new(500.0, 0.0);
        let v = Vect2::new(10.0, 0.0);
        assert!(!Tcpa.horizontal_wcv_interval(&table(), 300.0, s, v).conflict());
        assert!(!Tcpa.horizontal_wcv(&table(), s, v));
    }

    #[test]
    fn test_window_after_duration() {
        let s = Vect2::new(-1000.0, 0.0);
        let v = Vect2::new(10.0, 0.0);
        let ld = Tcpa.horizontal_wcv_interval(&table(), 70.0, s, v);
        assert_eq!(ld, LossData::new(70.0, 0.0));
    }
}
