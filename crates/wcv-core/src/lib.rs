//! Well-clear violation detection for pairs of aircraft.
//!
//! Computes, from ownship and intruder position and velocity, the time
//! interval within a lookahead window during which the pair is in loss of
//! well clear, and a normalized severity for that interval.

pub mod config;
pub mod detector;
pub mod error;
pub mod horizontal;
pub mod loss;
pub mod params;
pub mod table;
pub mod taumod;
pub mod tcpa;
pub mod tep;
pub mod units;
pub mod util;
pub mod vect;
pub mod vertical;

pub use config::DetectorConfig;
pub use detector::{WcvDetector, UNBOUNDED};
pub use error::{Result, WcvError};
pub use horizontal::{HorizontalTvar, TvarKind};
pub use loss::{ConflictData, LossData, SeverityNorm};
pub use params::{ParameterData, ParameterEntry};
pub use table::WcvTable;
pub use taumod::TauMod;
pub use tcpa::Tcpa;
pub use tep::Tep;
pub use units::Unit;
pub use vect::{Vect2, Vect3, Velocity};
