//! Time-to-entry-point horizontal time variable.
//!
//! `tvar` is the time at which the relative trajectory enters the DTHR
//! circle, defined only for converging geometry that reaches it.

use crate::horizontal::{delta, theta_d, HorizontalTvar};
use crate::loss::LossData;
use crate::table::WcvTable;
use crate::util::{almost_equals, sq};
use crate::vect::Vect2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tep;

impl Tep {
    pub const NAME: &'static str = "WCV_TEP";
}

impl HorizontalTvar for Tep {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn horizontal_tvar(&self, table: &WcvTable, s: Vect2, v: Vect2) -> f64 {
        if s.dot(v) < 0.0 && delta(s, v, table.dthr()) >= 0.0 {
            return theta_d(s, v, -1, table.dthr());
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
        if s.dot(v) >= 0.0 || delta(s, v, table.dthr()) < 0.0 {
            return none;
        }
        let tin = theta_d(s, v, -1, table.dthr()) - table.tthr();
        if tin > duration {
            return none;
        }
        LossData::new(tin.max(0.0), duration.min(theta_d(s, v, 1, table.dthr())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> WcvTable {
        WcvTable::new(100.0, 50.0, 20.0, 0.0)
    }

    #[test]
    fn test_tvar_is_entry_time() {
        let s = Vect2::new(-1000.0, 0.0);
        let v = Vect2::new(10.0, 0.0);
        assert_eq!(Tep.horizontal_tvar(&table(), s, v), 90.0);
        assert_eq!(Tep.horizontal_tvar(&table(), Vect2::new(-1000.0, 500.0), v), -1.0);
    }

    #[test]
    fn test_interval_opens_tthr_before_entry() {
        let s = Vect2::new(-1000.0, 0.0);
        let v = Vect2::new(10.0, 0.0);
        let ld = Tep.horizontal_wcv_interval(&table(), 300.0, s, v);
        assert_eq!(ld, LossData::new(70.0, 110.0));
        assert!(Tep.horizontal_wcv(&table(), s.linear(v, 75.0), v));
        assert!(!Tep.horizontal_wcv(&table(), s.linear(v, 65.0), v));
    }

    #[test]
    fn test_already_inside() {
        let s = Vect2::new(-50.0, 0.0);
        let v = Vect2::new(10.0, 0.0);
        let ld = Tep.horizontal_wcv_interval(&table(), 300.0, s, v);
        assert_eq!(ld, LossData::new(0.0, 15.0));
    }

    #[test]
    fn test_miss_is_clear() {
        let s = Vect2::new(-1000.0, 500.0);
        let v = Vect2::new(10.0, 0.0);
        assert!(!Tep.horizontal_wcv_interval(&table(), 300.0, s, v).conflict());
    }
}
