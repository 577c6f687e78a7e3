//! Fallback pin table used when discovery times out, is aborted or returns
//! nothing usable.
//!
//! Slots 3..=8 are plain digital pins. Pins 3, 5 and 6 are PWM-capable on
//! common boards but stay flagged as plain digital here. Slots 14..=19 are
//! analog pins on channels 0..=5. Every other slot of the 20-slot table is
//! left out.

use crate::pin::PinRecord;

pub const DEFAULT_SLOT_COUNT: u8 = 20;
pub const FIRST_DIGITAL_PIN: u8 = 3;
pub const LAST_DIGITAL_PIN: u8 = 8;
pub const FIRST_ANALOG_PIN: u8 = 14;
pub const LAST_ANALOG_PIN: u8 = 19;

pub fn default_layout() -> Vec<PinRecord> {
    (0..DEFAULT_SLOT_COUNT)
        .filter_map(|id| match id {
            FIRST_DIGITAL_PIN..=LAST_DIGITAL_PIN => Some(PinRecord::new(id, true, false, false)),
            FIRST_ANALOG_PIN..=LAST_ANALOG_PIN => {
                Some(PinRecord::new(id, true, true, false).with_analog_id(id - FIRST_ANALOG_PIN))
            }
            _ => None,
        })
        .collect()
}
