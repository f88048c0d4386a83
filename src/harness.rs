//! Probe harness: drives a unit through a two-phase control transition.
//!
//! The run is one continuous stream delivered in two compute calls. Both
//! calls receive the same views, built once over the whole buffers, so
//! each call writes from frame 0 of the buffers. Phase 1 computes the
//! first `split` frames of the stream with every discrete control on;
//! phase 2 computes the remainder with the momentary controls still on and
//! the latching controls off, overwriting the start of the buffers. The
//! unit's own frame cursor carries the stream across the boundary.
//!
//! When `frames <= split` phase 1 is clamped to `frames` and phase 2 is
//! still issued, with a count of `frames - split` (zero or negative). A
//! conforming unit must treat it as a no-op.

use crate::buffers::BufferSet;
use crate::config::RunParams;
use crate::control::ControlRegistry;
use crate::error::ProbeError;
use crate::invariant_ppt::{assert_invariant, PHASE_COUNTS_COVER_RUN};
use crate::unit::ProcessingUnit;
use tracing::{debug, trace};

/// Control state applied before a phase's compute call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub momentary: bool,
    pub latching: bool,
}

impl ControlState {
    fn apply(self, registry: &ControlRegistry) {
        if self.momentary {
            registry.activate_momentary();
        } else {
            registry.deactivate_momentary();
        }
        if self.latching {
            registry.activate_latching();
        } else {
            registry.deactivate_latching();
        }
    }
}

/// One compute call of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhasePlan {
    /// Count handed to `compute`. May be non-positive for the second phase.
    pub count: i64,
    pub controls: ControlState,
}

impl PhasePlan {
    /// The two phases for `params`.
    pub fn for_params(params: &RunParams) -> [PhasePlan; 2] {
        let frames = i64::try_from(params.frames).unwrap_or(i64::MAX);
        let split = i64::try_from(params.split).unwrap_or(i64::MAX);
        let phases = [
            PhasePlan {
                count: split.min(frames),
                controls: ControlState {
                    momentary: true,
                    latching: true,
                },
            },
            PhasePlan {
                count: frames.saturating_sub(split),
                controls: ControlState {
                    momentary: true,
                    latching: false,
                },
            },
        ];
        assert_invariant(
            PHASE_COUNTS_COVER_RUN,
            phases[0].count >= 0 && phases[0].count + phases[1].count.max(0) == frames,
            "phase counts must add up to the run length",
            None,
        );
        phases
    }
}

/// Everything a finished run leaves behind.
#[derive(Debug)]
pub struct RunOutput<U> {
    pub unit: U,
    pub inputs: BufferSet,
    pub outputs: BufferSet,
    pub sample_rate: u32,
}

/// A unit that has been initialized, surveyed and given buffers.
pub struct ProbeHarness<U: ProcessingUnit> {
    unit: U,
    registry: ControlRegistry,
    inputs: BufferSet,
    outputs: BufferSet,
    params: RunParams,
}

impl<U: ProcessingUnit> ProbeHarness<U> {
    /// Initialize `unit`, build its control registry and provision buffers.
    pub fn new(mut unit: U, params: RunParams) -> Self {
        debug!(sample_rate = params.sample_rate, "initializing unit");
        unit.init(params.sample_rate);
        let registry = ControlRegistry::build(&unit);
        let inputs = BufferSet::new(unit.num_inputs(), params.frames);
        let outputs = BufferSet::new(unit.num_outputs(), params.frames);
        debug!(
            inputs = inputs.channel_count(),
            outputs = outputs.channel_count(),
            frames = params.frames,
            "buffers provisioned"
        );
        Self {
            unit,
            registry,
            inputs,
            outputs,
            params,
        }
    }

    pub fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    pub fn params(&self) -> &RunParams {
        &self.params
    }

    /// Run both phases over the same views and hand back the buffers.
    ///
    /// A compute failure aborts the run; nothing partial is returned.
    pub fn run(self) -> Result<RunOutput<U>, ProbeError> {
        let ProbeHarness {
            mut unit,
            registry,
            inputs,
            mut outputs,
            params,
        } = self;
        {
            let input_views = inputs.views(0..params.frames);
            let mut output_views = outputs.views_mut(0..params.frames);
            for (index, phase) in PhasePlan::for_params(&params).iter().enumerate() {
                phase.controls.apply(&registry);
                trace!(phase = index + 1, count = phase.count, "compute");
                unit.compute(phase.count, &input_views, &mut output_views)
                    .map_err(|source| ProbeError::Compute {
                        phase: index + 1,
                        source,
                    })?;
            }
        }
        Ok(RunOutput {
            unit,
            inputs,
            outputs,
            sample_rate: params.sample_rate,
        })
    }
}

/// Build a harness for `unit` and run it.
pub fn run_probe<U: ProcessingUnit>(unit: U, params: RunParams) -> Result<RunOutput<U>, ProbeError> {
    ProbeHarness::new(unit, params).run()
}
