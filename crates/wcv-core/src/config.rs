//! Detector configuration.
//!
//! A serde-loadable description of a [`WcvDetector`]. Every field has a
//! default, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::detector::WcvDetector;
use crate::error::Result;
use crate::horizontal::TvarKind;
use crate::loss::SeverityNorm;
use crate::params::ParameterData;
use crate::table::WcvTable;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Horizontal time variable strategy
    pub tvar: TvarKind,
    /// Thresholds in internal units
    pub table: WcvTable,
    /// Threshold overrides as `key = value [unit]` text, applied after `table`
    #[serde(skip_serializing_if = "ParameterData::is_empty")]
    pub parameters: ParameterData,
    pub id: String,
    /// Emit the formal-model cross-check dump
    pub pvs_check: bool,
    pub severity: SeverityNorm,
}

impl DetectorConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Detector with `parameters` applied over `table`. The resulting
    /// thresholds must be finite and non-negative.
    pub fn build(&self) -> Result<WcvDetector> {
        let mut detector = WcvDetector::new(self.tvar, self.table)
            .with_identifier(self.id.clone())
            .with_pvs_check(self.pvs_check)
            .with_severity(self.severity);
        if !self.parameters.is_empty() {
            detector.set_parameters(&self.parameters)?;
        }
        detector.table().validate()?;
        Ok(detector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WcvError;
    use crate::units::Unit;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = DetectorConfig::from_json("{}").unwrap();
        let d = cfg.build().unwrap();
        assert_eq!(d, WcvDetector::default());
        assert!(!d.pvs_check());
    }

    #[test]
    fn test_config_with_overrides() {
        let cfg = DetectorConfig::from_json(
            r#"{
                "tvar": "tep",
                "id": "ownship",
                "pvs_check": true,
                "severity": "euclidean_ratio",
                "parameters": { "DTHR": "0.66 [nmi]", "zthr": "450 [ft]", "TTHR": 20 }
            }"#,
        )
        .unwrap();
        let d = cfg.build().unwrap();
        assert_eq!(d.strategy_name(), "WCV_TEP");
        assert_eq!(d.identifier(), "ownship");
        assert!(d.pvs_check());
        assert_eq!(d.severity(), SeverityNorm::EuclideanRatio);
        assert!((d.dthr_in(Unit::NauticalMile) - 0.66).abs() < 1e-12);
        assert_eq!(d.tthr(), 20.0);
    }

    #[test]
    fn test_bad_config() {
        assert!(matches!(
            DetectorConfig::from_json(r#"{"tvar": "tau"}"#),
            Err(WcvError::Config(_))
        ));
        let mut cfg = DetectorConfig::default();
        cfg.parameters.set_string("tvar", "tau");
        assert!(matches!(cfg.build(), Err(WcvError::UnknownTvar(_))));
    }

    #[test]
    fn test_infinite_parameter_rejected() {
        let cfg = DetectorConfig::from_json(r#"{"parameters": {"DTHR": "inf", "TTHR": "inf"}}"#)
            .unwrap();
        assert!(cfg.parameters.get_value("dthr").unwrap().is_infinite());
        assert!(matches!(
            cfg.build(),
            Err(WcvError::InvalidThreshold { name: "DTHR", .. })
        ));

        let mut cfg = DetectorConfig::default();
        cfg.table = WcvTable::new(f64::INFINITY, 100.0, 30.0, 0.0);
        assert!(matches!(cfg.build(), Err(WcvError::InvalidThreshold { .. })));
        cfg.parameters.set("dthr", "1000 [m]").unwrap();
        assert_eq!(cfg.build().unwrap().dthr(), 1000.0);
    }
}
