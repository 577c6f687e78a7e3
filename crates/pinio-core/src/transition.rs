//! Analog reporting side effects of mode changes.
//!
//! | previous    | next        | action    |
//! |-------------|-------------|-----------|
//! | any         | `Analog`    | enable    |
//! | `Analog`    | not analog  | disable   |
//! | not analog  | not analog  | unchanged |
//!
//! `Analog -> Analog` re-enables, so re-asserting modes after discovery also
//! restores reporting subscriptions. `Unknown -> Unknown` and every other
//! non-analog pair leave reporting untouched.

use pinio_protocol::PinMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportingAction {
    Unchanged,
    Enable,
    Disable,
}

impl ReportingAction {
    pub fn for_transition(previous: PinMode, next: PinMode) -> Self {
        match (previous, next) {
            (_, PinMode::Analog) => Self::Enable,
            (PinMode::Analog, _) => Self::Disable,
            _ => Self::Unchanged,
        }
    }

    /// The reporting flag to send, if any.
    pub fn enabled(self) -> Option<bool> {
        match self {
            Self::Unchanged => None,
            Self::Enable => Some(true),
            Self::Disable => Some(false),
        }
    }
}
