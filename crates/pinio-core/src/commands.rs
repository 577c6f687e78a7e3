//! Outgoing pin commands.

use std::time::Instant;

use pinio_protocol::{
    DigitalValue, FrameError, MAX_ANALOG_VALUE, PINS_PER_PORT, PinMode, build_analog_write,
    build_digital_port_write, build_report_analog, build_report_digital, build_set_pin_mode,
};
use tracing::{debug, warn};

use crate::error::{PinIoError, PinIoResult};
use crate::io::{DiscoveryTimer, EventSink, FrameWriter};
use crate::manager::PinIoManager;
use crate::transition::ReportingAction;

impl<W, T, S> PinIoManager<W, T, S>
where
    W: FrameWriter,
    T: DiscoveryTimer,
    S: EventSink,
{
    /// Store and send a pin mode, subscribing to or unsubscribing from analog
    /// reports as the mode enters or leaves [`PinMode::Analog`].
    ///
    /// # Errors
    ///
    /// Returns [`PinIoError::UnknownPin`] if no pin has `digital_id`.
    pub fn set_mode(&mut self, digital_id: u8, mode: PinMode) -> PinIoResult<()> {
        let pin = self
            .registry
            .get_mut(digital_id)
            .ok_or(PinIoError::UnknownPin(digital_id))?;
        let previous = pin.mode();
        pin.set_mode(mode);
        let analog_id = pin.analog_id();

        debug!(digital_id, %previous, %mode, "set pin mode");
        self.send(&build_set_pin_mode(digital_id, mode));

        if let Some(enabled) = ReportingAction::for_transition(previous, mode).enabled() {
            self.send_analog_reporting(digital_id, analog_id, enabled);
        }
        Ok(())
    }

    /// Store a digital output value and write the pin's whole port.
    ///
    /// # Errors
    ///
    /// Returns [`PinIoError::UnknownPin`] for an unknown pin and
    /// [`PinIoError::InvalidOperation`] if its port is beyond the configured
    /// port count. Nothing is stored in either case.
    pub fn set_digital_value(&mut self, digital_id: u8, value: DigitalValue) -> PinIoResult<()> {
        if self.registry.get(digital_id).is_none() {
            return Err(PinIoError::UnknownPin(digital_id));
        }
        let port = digital_id / PINS_PER_PORT;
        let bit = digital_id % PINS_PER_PORT;
        let mask = self.port_masks.update(port, bit, value).ok_or_else(|| {
            PinIoError::invalid_operation(format!(
                "pin {digital_id} is on port {port}, only {} ports are cached",
                self.port_masks.port_count()
            ))
        })?;
        let frame = build_digital_port_write(port, mask)?;

        if let Some(pin) = self.registry.get_mut(digital_id) {
            pin.set_digital_value(value);
        }
        debug!(digital_id, %value, port, mask, "set digital value");
        self.send(&frame);
        Ok(())
    }

    /// Store an analog value locally. Only pins in analog mode accept one.
    ///
    /// # Errors
    ///
    /// Returns [`PinIoError::UnknownPin`] for an unknown pin,
    /// [`PinIoError::InvalidOperation`] if the pin is not in analog mode and
    /// [`PinIoError::Frame`] if the value does not fit in 14 bits.
    pub fn set_analog_value(&mut self, digital_id: u8, value: u16) -> PinIoResult<()> {
        let pin = self
            .registry
            .get_mut(digital_id)
            .ok_or(PinIoError::UnknownPin(digital_id))?;
        if pin.mode() != PinMode::Analog {
            let err = PinIoError::invalid_operation(format!(
                "pin {digital_id} is in {} mode, not Analog",
                pin.mode()
            ));
            err.log("analog value rejected");
            return Err(err);
        }
        if value > MAX_ANALOG_VALUE {
            return Err(FrameError::ValueOutOfRange {
                value,
                max: MAX_ANALOG_VALUE,
            }
            .into());
        }
        pin.set_analog_value(value);
        Ok(())
    }

    /// Rate-limited PWM write using the current time.
    ///
    /// # Errors
    ///
    /// See [`PinIoManager::set_pwm_value_at`].
    pub fn set_pwm_value(&mut self, digital_id: u8, value: u16) -> PinIoResult<bool> {
        self.set_pwm_value_at(digital_id, value, Instant::now())
    }

    /// Store and send a PWM value unless another PWM write on any pin was
    /// accepted less than the configured interval before `now`. Returns
    /// whether the write was accepted.
    ///
    /// # Errors
    ///
    /// Returns [`PinIoError::UnknownPin`] for an unknown pin and
    /// [`PinIoError::Frame`] if the pin id or value cannot be encoded. A
    /// failed request does not use up the rate limit.
    pub fn set_pwm_value_at(&mut self, digital_id: u8, value: u16, now: Instant) -> PinIoResult<bool> {
        if self.registry.get(digital_id).is_none() {
            return Err(PinIoError::UnknownPin(digital_id));
        }
        let frame = build_analog_write(digital_id, value)?;

        if !self.pwm_limiter.try_acquire_at(now) {
            debug!(digital_id, value, "PWM write rate limited");
            return Ok(false);
        }

        if let Some(pin) = self.registry.get_mut(digital_id) {
            pin.set_analog_value(value);
        }
        debug!(digital_id, value, "set PWM value");
        self.send(&frame);
        Ok(true)
    }

    /// Enable digital reporting on every configured port, then re-send every
    /// pin's stored mode. Analog pins are re-subscribed as a side effect.
    pub fn enable_read_reports(&mut self) {
        for port in 0..self.config.port_count {
            match build_report_digital(port, true) {
                Ok(frame) => self.send(&frame),
                Err(e) => warn!(error = %e, port, "cannot enable port reporting"),
            }
        }

        let pins: Vec<_> = self
            .registry
            .iter()
            .map(|p| (p.digital_id(), p.mode()))
            .collect();
        for (digital_id, mode) in pins {
            if let Err(e) = self.set_mode(digital_id, mode) {
                e.log("cannot re-assert pin mode");
            }
        }
    }

    /// Subscribe to or unsubscribe from a pin's analog reports.
    ///
    /// # Errors
    ///
    /// Returns [`PinIoError::UnknownPin`] for an unknown pin,
    /// [`PinIoError::InvalidOperation`] if it has no analog channel and
    /// [`PinIoError::Frame`] if the channel cannot be encoded.
    pub fn set_analog_reporting(&mut self, digital_id: u8, enabled: bool) -> PinIoResult<()> {
        let pin = self
            .registry
            .get(digital_id)
            .ok_or(PinIoError::UnknownPin(digital_id))?;
        let analog_id = pin.analog_id().ok_or_else(|| {
            PinIoError::invalid_operation(format!("pin {digital_id} has no analog channel"))
        })?;
        let frame = build_report_analog(analog_id, enabled)?;
        debug!(digital_id, analog_id, enabled, "set analog reporting");
        self.send(&frame);
        Ok(())
    }

    /// Mode-change side effect: never fails the mode change itself.
    fn send_analog_reporting(&mut self, digital_id: u8, analog_id: Option<u8>, enabled: bool) {
        let Some(analog_id) = analog_id else {
            warn!(digital_id, enabled, "pin has no analog channel, reporting unchanged");
            return;
        };
        match build_report_analog(analog_id, enabled) {
            Ok(frame) => self.send(&frame),
            Err(e) => warn!(error = %e, digital_id, analog_id, "cannot change analog reporting"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::io::{NullSink, NullTimer};
    use crate::layout::default_layout;

    type Manager = PinIoManager<Vec<Vec<u8>>, NullTimer, NullSink>;

    fn manager() -> Manager {
        let mut manager = PinIoManager::new(Vec::new(), NullTimer, NullSink);
        manager.registry.replace(default_layout());
        manager
    }

    #[test]
    fn test_set_mode_analog_subscribes() -> PinIoResult<()> {
        let mut m = manager();
        m.set_mode(15, PinMode::Analog)?;
        m.set_mode(15, PinMode::Input)?;
        assert_eq!(
            m.writer(),
            &vec![
                vec![0xF4, 15, 0x02],
                vec![0xC1, 1],
                vec![0xF4, 15, 0x00],
                vec![0xC1, 0],
            ]
        );
        Ok(())
    }

    #[test]
    fn test_set_mode_unknown_pin() {
        let mut m = manager();
        assert_eq!(m.set_mode(2, PinMode::Output), Err(PinIoError::UnknownPin(2)));
        assert!(m.writer().is_empty());
    }

    #[test]
    fn test_analog_mode_without_channel_skips_reporting() -> PinIoResult<()> {
        let mut m = manager();
        m.set_mode(4, PinMode::Analog)?;
        assert_eq!(m.writer(), &vec![vec![0xF4, 4, 0x02]]);
        Ok(())
    }

    #[test]
    fn test_digital_value_port_write() -> PinIoResult<()> {
        let mut m = manager();
        m.set_digital_value(7, DigitalValue::High)?;
        m.set_digital_value(15, DigitalValue::High)?;
        assert_eq!(
            m.writer(),
            &vec![vec![0x90, 0x00, 0x01], vec![0x91, 0x00, 0x01]]
        );
        assert_eq!(
            m.registry().get(7).map(|p| p.digital_value()),
            Some(DigitalValue::High)
        );
        Ok(())
    }

    #[test]
    fn test_digital_value_beyond_cached_ports() {
        let mut m = manager();
        m.registry.replace(vec![crate::pin::PinRecord::new(30, true, false, false)]);
        assert!(matches!(
            m.set_digital_value(30, DigitalValue::High),
            Err(PinIoError::InvalidOperation(_))
        ));
        assert_eq!(
            m.registry().get(30).map(|p| p.digital_value()),
            Some(DigitalValue::Low)
        );
        assert!(m.writer().is_empty());
    }

    #[test]
    fn test_set_analog_value_requires_analog_mode() -> PinIoResult<()> {
        let mut m = manager();
        assert!(matches!(
            m.set_analog_value(14, 100),
            Err(PinIoError::InvalidOperation(_))
        ));
        assert_eq!(m.registry().get(14).map(|p| p.analog_value()), Some(0));

        m.set_mode(14, PinMode::Analog)?;
        m.writer_mut().clear();
        m.set_analog_value(14, 100)?;
        assert_eq!(m.registry().get(14).map(|p| p.analog_value()), Some(100));
        assert!(m.writer().is_empty());
        Ok(())
    }

    #[test]
    fn test_pwm_rate_limit() -> PinIoResult<()> {
        let mut m = manager();
        let start = Instant::now();
        assert!(m.set_pwm_value_at(3, 128, start)?);
        assert!(!m.set_pwm_value_at(5, 64, start + Duration::from_millis(20))?);
        assert!(m.set_pwm_value_at(5, 64, start + Duration::from_millis(60))?);
        assert_eq!(
            m.writer(),
            &vec![vec![0xE3, 0x00, 0x01], vec![0xE5, 0x40, 0x00]]
        );
        assert_eq!(m.registry().get(3).map(|p| p.analog_value()), Some(128));
        Ok(())
    }

    #[test]
    fn test_rejected_pwm_request_keeps_slot() -> PinIoResult<()> {
        let mut m = manager();
        let start = Instant::now();
        assert!(m.set_pwm_value_at(3, 0x4000, start).is_err());
        assert!(m.set_pwm_value_at(2, 1, start).is_err());
        assert!(m.set_pwm_value_at(3, 1, start)?);
        Ok(())
    }

    #[test]
    fn test_set_analog_reporting() -> PinIoResult<()> {
        let mut m = manager();
        m.set_analog_reporting(19, true)?;
        assert_eq!(m.writer(), &vec![vec![0xC5, 1]]);
        assert!(matches!(
            m.set_analog_reporting(3, true),
            Err(PinIoError::InvalidOperation(_))
        ));
        Ok(())
    }

    #[test]
    fn test_enable_read_reports() {
        let mut m = manager();
        m.enable_read_reports();
        let frames = m.writer();
        assert_eq!(frames.first(), Some(&vec![0xD0, 1]));
        assert_eq!(frames.get(1), Some(&vec![0xD1, 1]));
        assert_eq!(frames.get(2), Some(&vec![0xD2, 1]));
        // One mode frame per pin, no analog pin starts in analog mode.
        assert_eq!(frames.len(), 3 + 12);
    }
}
