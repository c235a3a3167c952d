//! Encounter scenarios: a pair of aircraft states plus a lookahead window.
//!
//! Positions are local Cartesian meters (x east, y north, z up). Velocities
//! are either Cartesian m/s or heading/speed as in drone telemetry.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use wcv_core::{ParameterData, Vect3, Velocity, WcvDetector};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VelocityInput {
    Cartesian {
        x: f64,
        y: f64,
        z: f64,
    },
    Heading {
        heading_deg: f64,
        speed_mps: f64,
        #[serde(default)]
        velocity_z: f64,
    },
}

impl VelocityInput {
    pub fn to_velocity(self) -> Velocity {
        match self {
            VelocityInput::Cartesian { x, y, z } => Velocity::mk_vxyz(x, y, z),
            VelocityInput::Heading {
                heading_deg,
                speed_mps,
                velocity_z,
            } => Velocity::mk_trk_gs_vs(heading_deg.to_radians(), speed_mps, velocity_z),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftState {
    #[serde(default)]
    pub id: String,
    pub position: Vect3,
    pub velocity: VelocityInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub ownship: AircraftState,
    pub intruder: AircraftState,
    /// `[B, T]` in seconds
    #[serde(default)]
    pub lookahead: Option<[f64; 2]>,
    /// Detector parameters, e.g. `{"DTHR": "4000 [ft]"}`
    #[serde(default)]
    pub parameters: ParameterData,
}

impl Scenario {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid scenario JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Lookahead window, falling back to `[0, default_t]`.
    pub fn window(&self, default_t: f64) -> (f64, f64) {
        self.lookahead
            .map(|[b, t]| (b, t))
            .unwrap_or((0.0, default_t))
    }
}

/// Result of running a detector over one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    pub detector: String,
    pub ownship: String,
    pub intruder: String,
    pub lookahead: [f64; 2],
    /// Well-clear already lost at the current time
    pub violation: bool,
    pub conflict: bool,
    pub time_in: f64,
    pub time_out: f64,
    pub time_crit: f64,
    pub dist_crit: f64,
}

pub fn run(detector: &WcvDetector, scenario: &Scenario, default_t: f64) -> DetectionReport {
    let so = scenario.ownship.position;
    let vo = scenario.ownship.velocity.to_velocity();
    let si = scenario.intruder.position;
    let vi = scenario.intruder.velocity.to_velocity();
    let (b, t) = scenario.window(default_t);

    let violation = detector.violation(so, vo, si, vi);
    let cd = detector.detect(so, vo, si, vi, b, t);

    if cd.conflict() {
        tracing::info!(
            ownship = %scenario.ownship.id,
            intruder = %scenario.intruder.id,
            time_in = cd.time_in(),
            time_out = cd.time_out(),
            "Loss of well clear predicted"
        );
    } else {
        tracing::debug!(
            ownship = %scenario.ownship.id,
            intruder = %scenario.intruder.id,
            "No loss of well clear in lookahead"
        );
    }

    DetectionReport {
        detector: detector.to_string(),
        ownship: scenario.ownship.id.clone(),
        intruder: scenario.intruder.id.clone(),
        lookahead: [b, t],
        violation,
        conflict: cd.conflict(),
        time_in: cd.time_in(),
        time_out: cd.time_out(),
        time_crit: cd.time_crit(),
        dist_crit: cd.dist_crit(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_velocity() {
        let v = VelocityInput::Heading {
            heading_deg: 90.0,
            speed_mps: 15.0,
            velocity_z: -1.0,
        }
        .to_velocity();
        assert!((v.x - 15.0).abs() < 1e-9);
        assert!(v.y.abs() < 1e-9);
        assert_eq!(v.z, -1.0);
    }

    #[test]
    fn test_window_default() {
        let s = Scenario::from_json_str(
            r#"{
                "ownship": {"position": {"x": 0, "y": 0, "z": 0}, "velocity": {"x": 0, "y": 0, "z": 0}},
                "intruder": {"position": {"x": 0, "y": 0, "z": 0}, "velocity": {"x": 0, "y": 0, "z": 0}}
            }"#,
        )
        .unwrap();
        assert_eq!(s.window(120.0), (0.0, 120.0));
        assert!(s.parameters.is_empty());
    }
}
