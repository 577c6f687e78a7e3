//! Ordered pin collection with digital and analog id indexes.
//!
//! The registry is replaced wholesale at each discovery boundary; both
//! indexes are rebuilt on every replacement and never patched.

use std::collections::HashMap;

use pinio_protocol::{AnalogMapping, PinCapabilities};
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use crate::pin::PinRecord;

#[derive(Debug, Clone, Default)]
pub struct PinRegistry {
    pins: Vec<PinRecord>,
    by_digital: HashMap<u8, usize>,
    by_analog: HashMap<u8, usize>,
}

impl PinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from records, keeping the first record for any
    /// repeated digital or analog id.
    pub fn from_records(records: impl IntoIterator<Item = PinRecord>) -> Self {
        let mut registry = Self::new();
        registry.replace(records);
        registry
    }

    pub fn from_capabilities(capabilities: &[PinCapabilities]) -> Self {
        Self::from_records(capabilities.iter().map(PinRecord::from))
    }

    pub(crate) fn replace(&mut self, records: impl IntoIterator<Item = PinRecord>) {
        self.clear();
        for mut record in records {
            let digital_id = record.digital_id();
            if self.by_digital.contains_key(&digital_id) {
                warn!(digital_id, "duplicate digital id, record dropped");
                continue;
            }
            let index = self.pins.len();
            if let Some(analog_id) = record.analog_id() {
                if self.by_analog.contains_key(&analog_id) {
                    warn!(digital_id, analog_id, "duplicate analog id, channel dropped");
                    record = PinRecord::new(
                        digital_id,
                        record.is_digital(),
                        record.is_analog(),
                        record.is_pwm(),
                    );
                } else {
                    self.by_analog.insert(analog_id, index);
                }
            }
            self.by_digital.insert(digital_id, index);
            self.pins.push(record);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.pins.clear();
        self.by_digital.clear();
        self.by_analog.clear();
    }

    /// Assign analog channels from a mapping response. Entries for unknown
    /// pins are ignored. A channel already held by another pin moves to the
    /// pin named later in the response.
    pub(crate) fn apply_analog_mapping(&mut self, mapping: &AnalogMapping) {
        for &(digital_id, analog_id) in mapping.entries() {
            let Some(&index) = self.by_digital.get(&digital_id) else {
                debug!(digital_id, analog_id, "analog mapping for unknown pin ignored");
                continue;
            };
            if let Some(&owner) = self.by_analog.get(&analog_id)
                && owner != index
                && let Some(previous) = self.pins.get_mut(owner)
            {
                warn!(
                    digital_id,
                    analog_id,
                    previous = previous.digital_id(),
                    "analog channel reassigned"
                );
                previous.clear_analog_id();
            }
            let Some(pin) = self.pins.get_mut(index) else {
                continue;
            };
            if !pin.is_analog() {
                debug!(digital_id, analog_id, "analog channel for pin without analog capability");
            }
            pin.set_analog_id(analog_id);
            self.rebuild_analog_index();
        }
    }

    fn rebuild_analog_index(&mut self) {
        self.by_analog = self
            .pins
            .iter()
            .enumerate()
            .filter_map(|(index, pin)| pin.analog_id().map(|analog_id| (analog_id, index)))
            .collect();
    }

    pub fn get(&self, digital_id: u8) -> Option<&PinRecord> {
        self.by_digital
            .get(&digital_id)
            .and_then(|&index| self.pins.get(index))
    }

    pub(crate) fn get_mut(&mut self, digital_id: u8) -> Option<&mut PinRecord> {
        let index = *self.by_digital.get(&digital_id)?;
        self.pins.get_mut(index)
    }

    pub fn by_analog(&self, analog_id: u8) -> Option<&PinRecord> {
        self.by_analog
            .get(&analog_id)
            .and_then(|&index| self.pins.get(index))
    }

    pub(crate) fn by_analog_mut(&mut self, analog_id: u8) -> Option<&mut PinRecord> {
        let index = *self.by_analog.get(&analog_id)?;
        self.pins.get_mut(index)
    }

    /// Pins in registry order.
    pub fn pins(&self) -> &[PinRecord] {
        &self.pins
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PinRecord> {
        self.pins.iter()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn digital_pin_count(&self) -> usize {
        self.pins.iter().filter(|p| p.is_digital()).count()
    }

    pub fn analog_pin_count(&self) -> usize {
        self.pins.iter().filter(|p| p.is_analog()).count()
    }
}

impl<'a> IntoIterator for &'a PinRegistry {
    type Item = &'a PinRecord;
    type IntoIter = std::slice::Iter<'a, PinRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for PinRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.pins)
    }
}
