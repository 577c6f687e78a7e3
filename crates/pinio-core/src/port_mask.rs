//! Last digital output word written to each port.

use pinio_protocol::DigitalValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMaskCache {
    masks: Vec<u8>,
}

impl PortMaskCache {
    pub fn new(port_count: u8) -> Self {
        Self {
            masks: vec![0; usize::from(port_count)],
        }
    }

    pub fn port_count(&self) -> usize {
        self.masks.len()
    }

    pub fn mask(&self, port: u8) -> Option<u8> {
        self.masks.get(usize::from(port)).copied()
    }

    /// Replace one bit of a port mask and return the new mask, or `None` if
    /// the port is not cached. Bits above 7 are ignored.
    pub fn update(&mut self, port: u8, bit: u8, value: DigitalValue) -> Option<u8> {
        let mask = self.masks.get_mut(usize::from(port))?;
        let flag = 1u8.checked_shl(u32::from(bit))?;
        *mask &= !flag;
        if value.is_high() {
            *mask |= flag;
        }
        Some(*mask)
    }
}
