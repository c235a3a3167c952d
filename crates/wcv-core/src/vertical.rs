//! Vertical closure model.
//!
//! Vertical well-clear is lost when the altitude difference is within ZTHR,
//! or when the aircraft converge to co-altitude within TCOA.

use crate::loss::LossData;
use crate::util::{almost_equals, sign};

/// Time to co-altitude: 0 at co-altitude, `-sz/vz` when converging, -1
/// otherwise.
pub fn time_coalt(sz: f64, vz: f64) -> f64 {
    if sz == 0.0 {
        return 0.0;
    }
    if sz * vz < 0.0 {
        return -sz / vz;
    }
    -1.0
}

/// Vertical well-clear violation at the current relative state.
pub fn vertical_wcv(zthr: f64, tcoa: f64, sz: f64, vz: f64) -> bool {
    if sz.abs() <= zthr {
        return true;
    }
    let tcoalt = time_coalt(sz, vz);
    0.0 <= tcoalt && tcoalt <= tcoa
}

/// Interval within `[b, t]` where the vertical predicate holds for the
/// altitude difference `sz + vz * time`.
///
/// Returns `(t, b)` when there is none, including for NaN inputs.
pub fn vertical_wcv_interval(zthr: f64, tcoa: f64, b: f64, t: f64, sz: f64, vz: f64) -> LossData {
    let none = LossData::no_conflict(b, t);
    if sz.is_nan() || vz.is_nan() {
        return none;
    }
    if almost_equals(vz, 0.0) {
        return if sz.abs() <= zthr {
            LossData::new(b, t)
        } else {
            none
        };
    }
    let act_h = zthr.max(vz.abs() * tcoa);
    let tentry = (-sign(vz) * act_h - sz) / vz;
    let texit = (sign(vz) * zthr - sz) / vz;
    if t < tentry || texit < b {
        return none;
    }
    LossData::new(b.max(tentry), t.min(texit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_coalt() {
        assert_eq!(time_coalt(0.0, 5.0), 0.0);
        assert_eq!(time_coalt(100.0, -5.0), 20.0);
        assert_eq!(time_coalt(100.0, 5.0), -1.0);
        assert_eq!(time_coalt(-100.0, 5.0), 20.0);
    }

    #[test]
    fn test_vertical_wcv() {
        assert!(vertical_wcv(50.0, 0.0, 40.0, 0.0));
        assert!(!vertical_wcv(50.0, 0.0, 100.0, -5.0));
        assert!(vertical_wcv(50.0, 25.0, 100.0, -5.0));
        assert!(!vertical_wcv(50.0, 25.0, 100.0, 5.0));
    }

    #[test]
    fn test_level_flight_inside() {
        let ld = vertical_wcv_interval(50.0, 0.0, 0.0, 180.0, 10.0, 0.0);
        assert_eq!(ld, LossData::new(0.0, 180.0));
    }

    #[test]
    fn test_level_flight_outside() {
        let ld = vertical_wcv_interval(50.0, 0.0, 0.0, 180.0, 300.0, 0.0);
        assert_eq!(ld, LossData::new(180.0, 0.0));
    }

    #[test]
    fn test_descending_through_band() {
        // 200 m above, closing at 5 m/s, band of 50 m: inside from 30 to 50 s.
        let ld = vertical_wcv_interval(50.0, 0.0, 0.0, 180.0, 200.0, -5.0);
        assert_eq!(ld, LossData::new(30.0, 50.0));
    }

    #[test]
    fn test_tcoa_extends_entry() {
        // Co-altitude in 40 s; TCOA of 20 s opens the window at 20 s.
        let ld = vertical_wcv_interval(50.0, 20.0, 0.0, 180.0, 200.0, -5.0);
        assert_eq!(ld, LossData::new(20.0, 50.0));
    }

    #[test]
    fn test_clipped_to_horizon() {
        let ld = vertical_wcv_interval(50.0, 0.0, 35.0, 45.0, 200.0, -5.0);
        assert_eq!(ld, LossData::new(35.0, 45.0));
        let late = vertical_wcv_interval(50.0, 0.0, 60.0, 100.0, 200.0, -5.0);
        assert_eq!(late, LossData::new(100.0, 60.0));
    }

    #[test]
    fn test_nan_is_no_overlap() {
        let ld = vertical_wcv_interval(50.0, 0.0, 0.0, 180.0, f64::NAN, -5.0);
        assert!(!ld.conflict());
    }
}
