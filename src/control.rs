//! Control surface registry: discovers a unit's discrete controls.
//!
//! The registry is handed to [`ProcessingUnit::build_controls`] once, right
//! after the unit is initialized. Buttons land in the momentary list and
//! checkboxes in the latching list; every other callback is accepted and
//! ignored. Afterwards the lists never change shape, only the values behind
//! their zones do.
//!
//! Both categories are driven the same way (1.0 for on, 0.0 for off). They
//! stay separate so a run can flip one category without touching the other.

use crate::unit::{ControlSurface, ControlZone, ProcessingUnit};
use tracing::{debug, warn};

/// Value written to a control that is switched on.
pub const CONTROL_ON: f32 = 1.0;
/// Value written to a control that is switched off.
pub const CONTROL_OFF: f32 = 0.0;

/// Which list a control was registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCategory {
    /// Button-like: conventionally a pulse.
    Momentary,
    /// Checkbox-like: conventionally a persistent state.
    Latching,
}

/// A registered control: its label and a handle to the unit's storage.
#[derive(Debug, Clone)]
pub struct Control {
    pub label: String,
    zone: ControlZone,
}

impl Control {
    fn new(label: &str, zone: &ControlZone) -> Self {
        Self {
            label: label.to_owned(),
            zone: zone.clone(),
        }
    }

    /// Current value of the backing storage.
    pub fn value(&self) -> f32 {
        self.zone.get()
    }

    /// Handle to the backing storage.
    pub fn zone(&self) -> &ControlZone {
        &self.zone
    }
}

/// Momentary and latching controls discovered on one unit.
#[derive(Debug, Default)]
pub struct ControlRegistry {
    momentary: Vec<Control>,
    latching: Vec<Control>,
}

impl ControlRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `unit`'s controls and return the populated registry.
    pub fn build<U: ProcessingUnit + ?Sized>(unit: &U) -> Self {
        let mut registry = Self::new();
        unit.build_controls(&mut registry);
        debug!(
            momentary = registry.momentary.len(),
            latching = registry.latching.len(),
            "control surface built"
        );
        if !registry.categories_isolated() {
            warn!("a control zone is registered as both momentary and latching");
        }
        registry
    }

    pub fn momentary(&self) -> &[Control] {
        &self.momentary
    }

    pub fn latching(&self) -> &[Control] {
        &self.latching
    }

    /// Controls of `category`, in registration order.
    pub fn category(&self, category: ControlCategory) -> &[Control] {
        match category {
            ControlCategory::Momentary => &self.momentary,
            ControlCategory::Latching => &self.latching,
        }
    }

    /// Total number of registered controls.
    pub fn len(&self) -> usize {
        self.momentary.len() + self.latching.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn activate_momentary(&self) {
        self.drive(ControlCategory::Momentary, CONTROL_ON);
    }

    pub fn deactivate_momentary(&self) {
        self.drive(ControlCategory::Momentary, CONTROL_OFF);
    }

    pub fn activate_latching(&self) {
        self.drive(ControlCategory::Latching, CONTROL_ON);
    }

    pub fn deactivate_latching(&self) {
        self.drive(ControlCategory::Latching, CONTROL_OFF);
    }

    /// False when some zone sits in both categories, so driving one
    /// category also moves a control of the other.
    pub fn categories_isolated(&self) -> bool {
        self.momentary.iter().all(|m| {
            self.latching
                .iter()
                .all(|l| !m.zone.same_storage(&l.zone))
        })
    }

    /// Write `value` to every control of `category`. Empty categories are a no-op.
    fn drive(&self, category: ControlCategory, value: f32) {
        for control in self.category(category) {
            control.zone.set(value);
        }
    }

    fn register(&mut self, category: ControlCategory, label: &str, zone: &ControlZone) {
        let list = match category {
            ControlCategory::Momentary => &mut self.momentary,
            ControlCategory::Latching => &mut self.latching,
        };
        if list.iter().any(|c| c.label == label) {
            warn!(label, ?category, "duplicate control label ignored");
            return;
        }
        list.push(Control::new(label, zone));
    }
}

impl ControlSurface for ControlRegistry {
    fn add_button(&mut self, label: &str, zone: &ControlZone) {
        self.register(ControlCategory::Momentary, label, zone);
    }

    fn add_check_button(&mut self, label: &str, zone: &ControlZone) {
        self.register(ControlCategory::Latching, label, zone);
    }
}
