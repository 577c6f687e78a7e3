//! Convenience re-exports for tests.

pub use crate::fixtures::{
    TestManager, UNO_ANALOG_MAPPING_RESPONSE, UNO_CAPABILITY_RESPONSE, UNO_PIN_COUNT,
    UNO_PWM_PINS, analog_report, default_layout_manager, digital_report,
    discovered_uno_manager, test_manager, test_manager_with_config,
};
pub use crate::mock::{RecordingTimer, RecordingWriter, SharedRecordingWriter};
pub use crate::must::{must, must_err, must_some};
