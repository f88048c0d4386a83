//! Deterministic probe for block-based audio processing units.
//!
//! A run initializes a [`unit::ProcessingUnit`], discovers its discrete
//! controls, then computes one stream in two blocks with the latching
//! controls switched off at the boundary. The output buffers are rendered
//! as a fixed-precision table for diffing against a reference.

pub mod buffers;
pub mod config;
pub mod control;
pub mod diff;
pub mod error;
pub mod harness;
#[doc(hidden)]
pub mod invariant_ppt;
pub mod report;
pub mod unit;
pub mod units;

pub use buffers::BufferSet;
pub use config::RunParams;
pub use control::{Control, ControlCategory, ControlRegistry};
pub use error::{ComputeError, ProbeError};
pub use harness::{run_probe, PhasePlan, ProbeHarness, RunOutput};
pub use unit::{ControlSurface, ControlZone, ProcessingUnit};
