//! Built-in reference units.
//!
//! Small, deterministic units with one momentary and one latching control
//! each, so a probe run shows the control transition directly in the output.

use crate::error::{ComputeError, ProbeError};
use crate::unit::{ControlSurface, ControlZone, ProcessingUnit};
use std::f32::consts::TAU;

/// Names accepted by [`by_name`].
pub const UNIT_NAMES: &[&str] = &["gated-sine", "dc-step"];

/// Look up a reference unit by its command-line name.
pub fn by_name(name: &str) -> Result<Box<dyn ProcessingUnit>, ProbeError> {
    match name {
        "gated-sine" => Ok(Box::new(GatedSine::default())),
        "dc-step" => Ok(Box::new(DcStep::default())),
        other => Err(ProbeError::UnknownUnit(other.to_owned())),
    }
}

fn check_channels(direction: &'static str, expected: usize, got: usize) -> Result<(), ComputeError> {
    if expected == got {
        Ok(())
    } else {
        Err(ComputeError::ChannelMismatch {
            direction,
            expected,
            got,
        })
    }
}

/// Sine generator: no inputs, two outputs.
///
/// Output 0 is the sine scaled by the `gate` button, output 1 the sine
/// scaled by the `hold` checkbox. The phase runs on across calls.
#[derive(Debug)]
pub struct GatedSine {
    sample_rate: u32,
    phase: f32,
    freq: ControlZone,
    gate: ControlZone,
    hold: ControlZone,
}

impl Default for GatedSine {
    fn default() -> Self {
        Self {
            sample_rate: 0,
            phase: 0.0,
            freq: ControlZone::new(440.0),
            gate: ControlZone::default(),
            hold: ControlZone::default(),
        }
    }
}

impl ProcessingUnit for GatedSine {
    fn init(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
        self.phase = 0.0;
        self.freq.set(440.0);
        self.gate.set(0.0);
        self.hold.set(0.0);
    }

    fn num_inputs(&self) -> usize {
        0
    }

    fn num_outputs(&self) -> usize {
        2
    }

    fn build_controls(&self, surface: &mut dyn ControlSurface) {
        surface.declare(None, "name", "gated-sine");
        surface.open_vertical_box("gated-sine");
        surface.add_horizontal_slider("freq", &self.freq, 440.0, 20.0, 20_000.0, 1.0);
        surface.add_button("gate", &self.gate);
        surface.add_check_button("hold", &self.hold);
        surface.add_soundfile("sample", "{'sample.wav'}");
        surface.close_box();
    }

    fn compute(
        &mut self,
        count: i64,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
    ) -> Result<(), ComputeError> {
        if self.sample_rate == 0 {
            return Err(ComputeError::NotInitialized);
        }
        check_channels("input", 0, inputs.len())?;
        check_channels("output", 2, outputs.len())?;
        if count <= 0 {
            return Ok(());
        }
        let n = count as usize;
        let gate = self.gate.get();
        let hold = self.hold.get();
        let step = TAU * self.freq.get() / self.sample_rate as f32;
        let [left, right] = outputs else {
            return Ok(());
        };
        for (l, r) in left.iter_mut().zip(right.iter_mut()).take(n) {
            let s = self.phase.sin();
            *l = s * gate;
            *r = s * hold;
            self.phase = (self.phase + step) % TAU;
        }
        Ok(())
    }
}

/// Step detector: one input, one output.
///
/// `out = in + trig + 0.5 * latch`, so each control's state is readable
/// straight off the output.
#[derive(Debug, Default)]
pub struct DcStep {
    initialized: bool,
    trig: ControlZone,
    latch: ControlZone,
}

impl ProcessingUnit for DcStep {
    fn init(&mut self, _sample_rate: u32) {
        self.initialized = true;
        self.trig.set(0.0);
        self.latch.set(0.0);
    }

    fn num_inputs(&self) -> usize {
        1
    }

    fn num_outputs(&self) -> usize {
        1
    }

    fn build_controls(&self, surface: &mut dyn ControlSurface) {
        surface.open_horizontal_box("dc-step");
        surface.declare(Some(&self.trig), "tooltip", "adds 1.0 while held");
        surface.add_button("trig", &self.trig);
        surface.add_check_button("latch", &self.latch);
        surface.close_box();
    }

    fn compute(
        &mut self,
        count: i64,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
    ) -> Result<(), ComputeError> {
        if !self.initialized {
            return Err(ComputeError::NotInitialized);
        }
        check_channels("input", 1, inputs.len())?;
        check_channels("output", 1, outputs.len())?;
        if count <= 0 {
            return Ok(());
        }
        let offset = self.trig.get() + 0.5 * self.latch.get();
        for (o, &i) in outputs[0].iter_mut().zip(inputs[0]).take(count as usize) {
            *o = i + offset;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_knows_every_unit() {
        for name in UNIT_NAMES {
            assert!(by_name(name).is_ok(), "{name}");
        }
        assert!(matches!(by_name("nope"), Err(ProbeError::UnknownUnit(_))));
    }

    #[test]
    fn compute_before_init_fails() {
        let mut unit = GatedSine::default();
        let mut out = [vec![0.0f32; 4], vec![0.0f32; 4]];
        let mut views: Vec<&mut [f32]> = out.iter_mut().map(|c| c.as_mut_slice()).collect();
        assert_eq!(
            unit.compute(4, &[], &mut views),
            Err(ComputeError::NotInitialized)
        );
    }

    #[test]
    fn non_positive_count_writes_nothing() {
        let mut unit = DcStep::default();
        unit.init(48_000);
        unit.trig.set(1.0);
        let input: Vec<f32> = Vec::new();
        let mut output: Vec<f32> = Vec::new();
        let mut outputs = [output.as_mut_slice()];
        assert!(unit.compute(-12, &[input.as_slice()], &mut outputs).is_ok());
        assert!(unit.compute(0, &[input.as_slice()], &mut outputs).is_ok());
    }

    #[test]
    fn gated_sine_phase_continues_across_calls() {
        let mut whole = GatedSine::default();
        whole.init(48_000);
        whole.gate.set(1.0);
        let mut a = vec![0.0f32; 8];
        let mut b = vec![0.0f32; 8];
        whole.compute(8, &[], &mut [a.as_mut_slice(), b.as_mut_slice()]).unwrap();

        let mut split = GatedSine::default();
        split.init(48_000);
        split.gate.set(1.0);
        let mut c = vec![0.0f32; 8];
        let mut d = vec![0.0f32; 8];
        split.compute(3, &[], &mut [&mut c[..3], &mut d[..3]]).unwrap();
        split.compute(5, &[], &mut [&mut c[3..], &mut d[3..]]).unwrap();

        assert_eq!(a, c);
        assert!(b.iter().chain(&d).all(|&s| s == 0.0));
    }

    #[test]
    fn wrong_channel_count_is_reported() {
        let mut unit = DcStep::default();
        unit.init(48_000);
        let err = unit.compute(1, &[], &mut []).unwrap_err();
        assert_eq!(
            err,
            ComputeError::ChannelMismatch {
                direction: "input",
                expected: 1,
                got: 0
            }
        );
    }
}
