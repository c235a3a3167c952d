//! Well-clear threshold table.
//!
//! Holds the four thresholds that define the protected volume. Values are
//! stored in internal units (meters, seconds).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, WcvError};
use crate::params::ParameterData;
use crate::units::Unit;

/// Horizontal distance threshold key.
pub const KEY_DTHR: &str = "DTHR";
/// Vertical distance threshold key.
pub const KEY_ZTHR: &str = "ZTHR";
/// Horizontal time threshold key.
pub const KEY_TTHR: &str = "TTHR";
/// Vertical time-to-co-altitude threshold key.
pub const KEY_TCOA: &str = "TCOA";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WcvTable {
    /// Horizontal distance threshold (m)
    dthr: f64,
    /// Vertical distance threshold (m)
    zthr: f64,
    /// Horizontal time threshold (s)
    tthr: f64,
    /// Vertical time-to-co-altitude threshold (s)
    tcoa: f64,
}

impl Default for WcvTable {
    /// DTHR 4000 ft, ZTHR 450 ft, TTHR 35 s, TCOA 0 s.
    fn default() -> Self {
        Self {
            dthr: Unit::Foot.from_value(4000.0),
            zthr: Unit::Foot.from_value(450.0),
            tthr: 35.0,
            tcoa: 0.0,
        }
    }
}

/// Thresholds are non-negative; negative input is taken by magnitude and
/// NaN leaves the stored value untouched.
fn normalized(current: f64, val: f64) -> f64 {
    if val.is_nan() {
        current
    } else {
        val.abs()
    }
}

impl WcvTable {
    /// Table from internal-unit values.
    pub fn new(dthr: f64, zthr: f64, tthr: f64, tcoa: f64) -> Self {
        let mut table = Self::default();
        table.set_dthr(dthr);
        table.set_zthr(zthr);
        table.set_tthr(tthr);
        table.set_tcoa(tcoa);
        table
    }

    /// Table populated from parameters, defaults for missing keys.
    pub fn from_parameters(params: &ParameterData) -> Self {
        let mut table = Self::default();
        table.set_parameters(params);
        table
    }

    pub fn dthr(&self) -> f64 {
        self.dthr
    }

    pub fn dthr_in(&self, unit: Unit) -> f64 {
        unit.to_value(self.dthr)
    }

    pub fn zthr(&self) -> f64 {
        self.zthr
    }

    pub fn zthr_in(&self, unit: Unit) -> f64 {
        unit.to_value(self.zthr)
    }

    pub fn tthr(&self) -> f64 {
        self.tthr
    }

    pub fn tthr_in(&self, unit: Unit) -> f64 {
        unit.to_value(self.tthr)
    }

    pub fn tcoa(&self) -> f64 {
        self.tcoa
    }

    pub fn tcoa_in(&self, unit: Unit) -> f64 {
        unit.to_value(self.tcoa)
    }

    pub fn set_dthr(&mut self, val: f64) {
        self.dthr = normalized(self.dthr, val);
    }

    pub fn set_dthr_in(&mut self, val: f64, unit: Unit) {
        self.set_dthr(unit.from_value(val));
    }

    pub fn set_zthr(&mut self, val: f64) {
        self.zthr = normalized(self.zthr, val);
    }

    pub fn set_zthr_in(&mut self, val: f64, unit: Unit) {
        self.set_zthr(unit.from_value(val));
    }

    pub fn set_tthr(&mut self, val: f64) {
        self.tthr = normalized(self.tthr, val);
    }

    pub fn set_tthr_in(&mut self, val: f64, unit: Unit) {
        self.set_tthr(unit.from_value(val));
    }

    pub fn set_tcoa(&mut self, val: f64) {
        self.tcoa = normalized(self.tcoa, val);
    }

    pub fn set_tcoa_in(&mut self, val: f64, unit: Unit) {
        self.set_tcoa(unit.from_value(val));
    }

    /// Check that every threshold is finite and non-negative.
    ///
    /// Setters already normalize their input, so this only fails for
    /// tables deserialized from untrusted data.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            (KEY_DTHR, self.dthr),
            (KEY_ZTHR, self.zthr),
            (KEY_TTHR, self.tthr),
            (KEY_TCOA, self.tcoa),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WcvError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }

    /// Write the thresholds into `params`.
    pub fn update_parameters(&self, params: &mut ParameterData) {
        params.set_internal(KEY_DTHR, self.dthr, Unit::NauticalMile);
        params.set_internal(KEY_ZTHR, self.zthr, Unit::Foot);
        params.set_internal(KEY_TTHR, self.tthr, Unit::Second);
        params.set_internal(KEY_TCOA, self.tcoa, Unit::Second);
    }

    pub fn to_parameters(&self) -> ParameterData {
        let mut params = ParameterData::new();
        self.update_parameters(&mut params);
        params
    }

    /// Read the thresholds present in `params`; other keys are ignored.
    pub fn set_parameters(&mut self, params: &ParameterData) {
        if let Some(v) = params.get_value(KEY_DTHR) {
            self.set_dthr(v);
        }
        if let Some(v) = params.get_value(KEY_ZTHR) {
            self.set_zthr(v);
        }
        if let Some(v) = params.get_value(KEY_TTHR) {
            self.set_tthr(v);
        }
        if let Some(v) = params.get_value(KEY_TCOA) {
            self.set_tcoa(v);
        }
    }
}

impl fmt::Display for WcvTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DTHR = {:.4} [nmi], ZTHR = {:.1} [ft], TTHR = {} [s], TCOA = {} [s]",
            self.dthr_in(Unit::NauticalMile),
            self.zthr_in(Unit::Foot),
            self.tthr,
            self.tcoa
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = WcvTable::default();
        assert!((t.dthr_in(Unit::Foot) - 4000.0).abs() < 1e-9);
        assert!((t.zthr_in(Unit::Foot) - 450.0).abs() < 1e-9);
        assert_eq!(t.tthr(), 35.0);
        assert_eq!(t.tcoa(), 0.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_setters_normalize() {
        let mut t = WcvTable::default();
        t.set_dthr(-100.0);
        assert_eq!(t.dthr(), 100.0);
        t.set_tthr(f64::NAN);
        assert_eq!(t.tthr(), 35.0);
        t.set_zthr_in(1.0, Unit::Kilometer);
        assert_eq!(t.zthr(), 1000.0);
    }

    #[test]
    fn test_parameter_round_trip() {
        let t = WcvTable::new(1500.0, 200.0, 20.0, 10.0);
        let params = t.to_parameters();
        assert_eq!(params.get_unit("dthr"), Some(Unit::NauticalMile));
        let back = WcvTable::from_parameters(&params);
        assert_eq!(back, t);
    }

    #[test]
    fn test_unrecognized_keys_ignored() {
        let mut params = ParameterData::new();
        params.set("zthr", "100 [m]").unwrap();
        params.set("lookahead", "180").unwrap();
        let t = WcvTable::from_parameters(&params);
        assert_eq!(t.zthr(), 100.0);
        assert_eq!(t.dthr(), WcvTable::default().dthr());
    }

    #[test]
    fn test_validate_rejects_bad_deserialized_values() {
        let t: WcvTable =
            serde_json::from_str(r#"{"dthr": -5.0, "zthr": 100.0, "tthr": 20.0, "tcoa": 0.0}"#)
                .unwrap();
        assert!(matches!(
            t.validate(),
            Err(WcvError::InvalidThreshold { name: "DTHR", .. })
        ));
    }
}
