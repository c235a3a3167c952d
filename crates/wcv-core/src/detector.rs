//! Well-clear conflict detector.
//!
//! Intersects the vertical closure interval with the horizontal violation
//! predicate of a pluggable [`HorizontalTvar`] strategy to compute the time
//! interval of loss of well clear for a pair of aircraft.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::horizontal::{HorizontalTvar, TvarKind};
use crate::loss::{ConflictData, LossData, SeverityNorm};
use crate::params::ParameterData;
use crate::table::WcvTable;
use crate::units::Unit;
use crate::util::almost_equals;
use crate::vect::{Vect3, Velocity};
use crate::vertical::{vertical_wcv, vertical_wcv_interval};

/// Upper lookahead bound used when the caller's `T <= B`.
pub const UNBOUNDED: f64 = f64::MAX;

/// Parameter key for the detector identifier.
pub const KEY_ID: &str = "id";
/// Parameter key for the horizontal strategy name.
pub const KEY_TVAR: &str = "tvar";

/// Target of the formal-model cross-check dump.
pub const PVS_TARGET: &str = "wcv_core::pvs";

#[derive(Debug, Clone)]
pub struct WcvDetector {
    table: WcvTable,
    tvar: Arc<dyn HorizontalTvar>,
    id: String,
    /// Emit inputs and results in the formal model's syntax.
    pvs_check: bool,
    severity: SeverityNorm,
}

impl Default for WcvDetector {
    fn default() -> Self {
        Self::new(TvarKind::default(), WcvTable::default())
    }
}

impl WcvDetector {
    pub fn new(kind: TvarKind, table: WcvTable) -> Self {
        Self::with_strategy(kind.build(), table)
    }

    /// Detector using a caller-provided strategy.
    pub fn with_strategy(tvar: Arc<dyn HorizontalTvar>, table: WcvTable) -> Self {
        Self {
            table,
            tvar,
            id: String::new(),
            pvs_check: false,
            severity: SeverityNorm::default(),
        }
    }

    pub fn with_pvs_check(mut self, enabled: bool) -> Self {
        self.pvs_check = enabled;
        self
    }

    pub fn with_severity(mut self, severity: SeverityNorm) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_identifier(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn strategy(&self) -> &dyn HorizontalTvar {
        self.tvar.as_ref()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.tvar.name()
    }

    pub fn table(&self) -> WcvTable {
        self.table
    }

    pub fn set_table(&mut self, table: WcvTable) {
        self.table = table;
    }

    pub fn identifier(&self) -> &str {
        &self.id
    }

    pub fn set_identifier(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn pvs_check(&self) -> bool {
        self.pvs_check
    }

    pub fn set_pvs_check(&mut self, enabled: bool) {
        self.pvs_check = enabled;
    }

    pub fn severity(&self) -> SeverityNorm {
        self.severity
    }

    pub fn dthr(&self) -> f64 {
        self.table.dthr()
    }

    pub fn dthr_in(&self, unit: Unit) -> f64 {
        self.table.dthr_in(unit)
    }

    pub fn zthr(&self) -> f64 {
        self.table.zthr()
    }

    pub fn zthr_in(&self, unit: Unit) -> f64 {
        self.table.zthr_in(unit)
    }

    pub fn tthr(&self) -> f64 {
        self.table.tthr()
    }

    pub fn tthr_in(&self, unit: Unit) -> f64 {
        self.table.tthr_in(unit)
    }

    pub fn tcoa(&self) -> f64 {
        self.table.tcoa()
    }

    pub fn tcoa_in(&self, unit: Unit) -> f64 {
        self.table.tcoa_in(unit)
    }

    pub fn set_dthr(&mut self, val: f64) {
        self.table.set_dthr(val);
    }

    pub fn set_dthr_in(&mut self, val: f64, unit: Unit) {
        self.table.set_dthr_in(val, unit);
    }

    pub fn set_zthr(&mut self, val: f64) {
        self.table.set_zthr(val);
    }

    pub fn set_zthr_in(&mut self, val: f64, unit: Unit) {
        self.table.set_zthr_in(val, unit);
    }

    pub fn set_tthr(&mut self, val: f64) {
        self.table.set_tthr(val);
    }

    pub fn set_tthr_in(&mut self, val: f64, unit: Unit) {
        self.table.set_tthr_in(val, unit);
    }

    pub fn set_tcoa(&mut self, val: f64) {
        self.table.set_tcoa(val);
    }

    pub fn set_tcoa_in(&mut self, val: f64, unit: Unit) {
        self.table.set_tcoa_in(val, unit);
    }

    /// Whether the current state is already a well-clear violation.
    pub fn violation(&self, so: Vect3, vo: Velocity, si: Vect3, vi: Velocity) -> bool {
        if any_invalid(so, vo, si, vi) {
            return false;
        }
        let s2 = so.vect2().sub(si.vect2());
        let v2 = vo.vect2().sub(vi.vect2());
        self.tvar.horizontal_wcv(&self.table, s2, v2)
            && vertical_wcv(
                self.table.zthr(),
                self.table.tcoa(),
                so.z - si.z,
                vo.z - vi.z,
            )
    }

    /// Whether a loss of well clear occurs within the lookahead `[b, t]`.
    pub fn conflict(
        &self,
        so: Vect3,
        vo: Velocity,
        si: Vect3,
        vi: Velocity,
        b: f64,
        t: f64,
    ) -> bool {
        self.compute_interval(so, vo, si, vi, b, t).conflict()
    }

    /// Loss interval plus time of closest approach and severity.
    pub fn detect(
        &self,
        so: Vect3,
        vo: Velocity,
        si: Vect3,
        vi: Velocity,
        b: f64,
        t: f64,
    ) -> ConflictData {
        let loss = self.compute_interval(so, vo, si, vi, b, t);
        let t_tca = loss.midpoint();
        let s_tca = so.sub(si).linear(vo.sub(vi), t_tca);
        let dist_tca = self
            .severity
            .distance(s_tca, self.table.dthr(), self.table.zthr());
        ConflictData::new(loss, t_tca, dist_tca)
    }

    /// Time interval of loss of well clear within `[b, t]` for ownship
    /// `(so, vo)` and intruder `(si, vi)`. `t <= b` means no upper bound.
    ///
    /// When the vertical window collapses to almost a single instant, that
    /// window is returned as is, so `conflict()` may hold for an interval
    /// only rounding-error long.
    pub fn compute_interval(
        &self,
        so: Vect3,
        vo: Velocity,
        si: Vect3,
        vi: Velocity,
        b: f64,
        t: f64,
    ) -> LossData {
        let t = if t <= b { UNBOUNDED } else { t };

        self.print_pvs_input(so, vo, si, vi, b, t);

        if any_invalid(so, vo, si, vi) {
            let ld = LossData::invalid();
            self.print_pvs_output(ld, "invalid");
            return ld;
        }

        let s2 = so.vect2().sub(si.vect2());
        let v2 = vo.vect2().sub(vi.vect2());
        let sz = so.z - si.z;
        let vz = vo.z - vi.z;

        let wcvz = vertical_wcv_interval(self.table.zthr(), self.table.tcoa(), b, t, sz, vz);

        if wcvz.time_in > wcvz.time_out {
            let ld = LossData::no_conflict(b, t);
            self.print_pvs_output(ld, "case 1");
            return ld;
        }

        let step = v2.scal_add(wcvz.time_in, s2);
        if almost_equals(wcvz.time_in, wcvz.time_out) {
            let ld = if self.tvar.horizontal_wcv(&self.table, step, v2) {
                wcvz
            } else {
                LossData::no_conflict(b, t)
            };
            self.print_pvs_output(ld, "case 2");
            return ld;
        }

        let local = self.tvar.horizontal_wcv_interval(
            &self.table,
            wcvz.time_out - wcvz.time_in,
            step,
            v2,
        );
        let ld = if local.time_in > local.time_out {
            LossData::no_conflict(b, t)
        } else {
            local.shift(wcvz.time_in)
        };
        self.print_pvs_output(ld, "case 3");
        ld
    }

    fn print_pvs_input(&self, so: Vect3, vo: Velocity, si: Vect3, vi: Velocity, b: f64, t: f64) {
        if self.pvs_check {
            for line in pvs_input_lines(&self.table, so, vo, si, vi, b, t) {
                tracing::info!(target: PVS_TARGET, "{}", line);
            }
        }
    }

    fn print_pvs_output(&self, ld: LossData, comment: &str) {
        if self.pvs_check {
            let line = pvs_output_line(ld, self.tvar.name(), &self.id, comment);
            tracing::info!(target: PVS_TARGET, "{}", line);
        }
    }

    /// Thresholds, identifier and strategy as parameters.
    pub fn parameters(&self) -> ParameterData {
        let mut params = ParameterData::new();
        self.update_parameters(&mut params);
        params
    }

    pub fn update_parameters(&self, params: &mut ParameterData) {
        self.table.update_parameters(params);
        params.set_string(KEY_ID, &self.id);
        params.set_string(KEY_TVAR, self.tvar.name());
    }

    /// Apply recognized parameters; unknown keys are ignored. Fails only on
    /// an unknown strategy name, leaving the detector unchanged.
    pub fn set_parameters(&mut self, params: &ParameterData) -> Result<()> {
        let kind = match params.get_string(KEY_TVAR) {
            Some(name) => Some(name.parse::<TvarKind>()?),
            None => None,
        };
        if let Some(kind) = kind {
            if kind.name() != self.tvar.name() {
                self.tvar = kind.build();
            }
        }
        self.table.set_parameters(params);
        if let Some(id) = params.get_string(KEY_ID) {
            self.id = id.to_string();
        }
        tracing::debug!(detector = %self, "applied parameters");
        Ok(())
    }
}

impl PartialEq for WcvDetector {
    fn eq(&self, other: &Self) -> bool {
        self.tvar.name() == other.tvar.name() && self.table == other.table && self.id == other.id
    }
}

impl fmt::Display for WcvDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.id.is_empty() {
            write!(f, "{} = ", self.id)?;
        }
        write!(f, "{}: {{{}}}", self.tvar.name(), self.table)
    }
}

fn any_invalid(so: Vect3, vo: Velocity, si: Vect3, vi: Velocity) -> bool {
    so.is_invalid() || vo.is_invalid() || si.is_invalid() || vi.is_invalid()
}

fn fm8(x: f64) -> String {
    format!("{:.8}", x)
}

fn pvs_record(x: f64, y: f64, z: f64, label: &str) -> String {
    format!(
        "(# x := {}, y := {}, z := {} #) % {}",
        fm8(x),
        fm8(y),
        fm8(z),
        label
    )
}

/// Input records for the formal-model cross-check.
pub fn pvs_input_lines(
    table: &WcvTable,
    so: Vect3,
    vo: Velocity,
    si: Vect3,
    vi: Velocity,
    b: f64,
    t: f64,
) -> Vec<String> {
    vec![
        format!(
            "(# DTHR := {}, ZTHR := {}, TTHR := {}, TCOA := {}, B := {}, T := {} #)",
            fm8(table.dthr()),
            fm8(table.zthr()),
            fm8(table.tthr()),
            fm8(table.tcoa()),
            fm8(b),
            fm8(t)
        ),
        pvs_record(so.x, so.y, so.z, "so"),
        pvs_record(vo.x, vo.y, vo.z, "vo"),
        pvs_record(si.x, si.y, si.z, "si"),
        pvs_record(vi.x, vi.y, vi.z, "vi"),
    ]
}

/// Result record for the formal-model cross-check.
pub fn pvs_output_line(ld: LossData, name: &str, id: &str, comment: &str) -> String {
    format!(
        "({},{}) % {} {} time in/out {}",
        fm8(ld.time_in),
        fm8(ld.time_out),
        name,
        id,
        comment
    )
}
