//! Trait-based contract for the block-based processing units under test.

#![forbid(unsafe_code)]

use crate::error::ComputeError;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Handle to a single control value owned by a processing unit.
///
/// The unit creates the zone and reads it during `compute`; the registry
/// holds a clone and only ever writes activation values through it.
#[derive(Debug, Clone, Default)]
pub struct ControlZone(Arc<AtomicU32>);

impl ControlZone {
    /// Create a zone holding `value`.
    pub fn new(value: f32) -> Self {
        Self(Arc::new(AtomicU32::new(value.to_bits())))
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Overwrite the value.
    #[inline]
    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    /// True when both handles point at the same storage.
    pub fn same_storage(&self, other: &ControlZone) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Visitor a processing unit drives to expose its controls.
///
/// One method per control kind. Only the discrete kinds are required;
/// layout, continuous, display, metadata and soundfile callbacks default to
/// no-ops so any unit layout can be walked.
pub trait ControlSurface {
    fn open_tab_box(&mut self, _label: &str) {}
    fn open_horizontal_box(&mut self, _label: &str) {}
    fn open_vertical_box(&mut self, _label: &str) {}
    fn close_box(&mut self) {}

    /// Momentary (button-like) control.
    fn add_button(&mut self, label: &str, zone: &ControlZone);
    /// Latching (checkbox-like) control.
    fn add_check_button(&mut self, label: &str, zone: &ControlZone);

    fn add_vertical_slider(
        &mut self,
        _label: &str,
        _zone: &ControlZone,
        _init: f32,
        _min: f32,
        _max: f32,
        _step: f32,
    ) {
    }
    fn add_horizontal_slider(
        &mut self,
        _label: &str,
        _zone: &ControlZone,
        _init: f32,
        _min: f32,
        _max: f32,
        _step: f32,
    ) {
    }
    fn add_num_entry(
        &mut self,
        _label: &str,
        _zone: &ControlZone,
        _init: f32,
        _min: f32,
        _max: f32,
        _step: f32,
    ) {
    }

    fn add_horizontal_bargraph(&mut self, _label: &str, _zone: &ControlZone, _min: f32, _max: f32) {}
    fn add_vertical_bargraph(&mut self, _label: &str, _zone: &ControlZone, _min: f32, _max: f32) {}

    /// Soundfile slot; resolving `url` is left to a resource loader.
    fn add_soundfile(&mut self, _label: &str, _url: &str) {}

    /// Metadata attached to the next control (or to the unit when `zone` is `None`).
    fn declare(&mut self, _zone: Option<&ControlZone>, _key: &str, _value: &str) {}
}

/// A block-based audio processing unit.
///
/// Implementations keep their own frame cursor: consecutive `compute` calls
/// continue the stream where the previous call left off.
pub trait ProcessingUnit {
    /// Prepare internal state for `sample_rate`.
    fn init(&mut self, sample_rate: u32);

    /// Number of input channels. Fixed after `init`.
    fn num_inputs(&self) -> usize;

    /// Number of output channels. Fixed after `init`.
    fn num_outputs(&self) -> usize;

    /// Expose every control to `surface`. Called once, after `init`.
    fn build_controls(&self, surface: &mut dyn ControlSurface);

    /// Process `count` frames.
    ///
    /// Views span the whole run and may be longer than `count`; only their
    /// first `count` samples are read or written. A non-positive `count`
    /// must be a no-op. Views must not be retained past the call.
    fn compute(
        &mut self,
        count: i64,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
    ) -> Result<(), ComputeError>;
}

impl<U: ProcessingUnit + ?Sized> ProcessingUnit for Box<U> {
    fn init(&mut self, sample_rate: u32) {
        (**self).init(sample_rate)
    }

    fn num_inputs(&self) -> usize {
        (**self).num_inputs()
    }

    fn num_outputs(&self) -> usize {
        (**self).num_outputs()
    }

    fn build_controls(&self, surface: &mut dyn ControlSurface) {
        (**self).build_controls(surface)
    }

    fn compute(
        &mut self,
        count: i64,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
    ) -> Result<(), ComputeError> {
        (**self).compute(count, inputs, outputs)
    }
}
