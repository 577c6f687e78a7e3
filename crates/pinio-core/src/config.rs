//! Manager configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PinIoError, PinIoResult};

/// Upper bound on ports; port commands address them with a single nibble.
pub const MAX_PORT_COUNT: u8 = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinIoConfig {
    /// Capability query timeout (milliseconds).
    pub discovery_timeout_ms: u64,
    /// Minimum spacing between accepted PWM writes, across all pins (milliseconds).
    pub pwm_min_interval_ms: u64,
    /// Number of 8-pin ports with digital reporting and a cached output mask.
    pub port_count: u8,
}

impl Default for PinIoConfig {
    fn default() -> Self {
        Self {
            discovery_timeout_ms: 5_000,
            pwm_min_interval_ms: 50,
            port_count: 3,
        }
    }
}

impl PinIoConfig {
    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_millis(self.discovery_timeout_ms)
    }

    pub fn pwm_min_interval(&self) -> Duration {
        Duration::from_millis(self.pwm_min_interval_ms)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PinIoError::InvalidConfiguration`] for zero durations or a
    /// port count outside `1..=16`.
    pub fn validate(&self) -> PinIoResult<()> {
        if self.discovery_timeout_ms == 0 {
            return Err(PinIoError::invalid_configuration(
                "discovery_timeout_ms must be greater than 0",
            ));
        }
        if self.pwm_min_interval_ms == 0 {
            return Err(PinIoError::invalid_configuration(
                "pwm_min_interval_ms must be greater than 0",
            ));
        }
        if self.port_count == 0 || self.port_count > MAX_PORT_COUNT {
            return Err(PinIoError::invalid_configuration(format!(
                "port_count must be in 1..={MAX_PORT_COUNT}, got {}",
                self.port_count
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`PinIoError::InvalidConfiguration`] if the document does not
    /// parse or fails [`PinIoConfig::validate`].
    pub fn from_json_str(input: &str) -> PinIoResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| PinIoError::invalid_configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`PinIoError::InvalidConfiguration`] if the document does not
    /// parse or fails [`PinIoConfig::validate`].
    pub fn from_yaml_str(input: &str) -> PinIoResult<Self> {
        let config: Self = serde_yaml::from_str(input)
            .map_err(|e| PinIoError::invalid_configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn builder() -> PinIoConfigBuilder {
        PinIoConfigBuilder::default()
    }
}

/// Builder for [`PinIoConfig`].
#[derive(Debug, Default)]
pub struct PinIoConfigBuilder {
    config: PinIoConfig,
}

impl PinIoConfigBuilder {
    #[must_use]
    pub fn discovery_timeout(mut self, timeout: Duration) -> Self {
        self.config.discovery_timeout_ms = duration_to_ms(timeout);
        self
    }

    #[must_use]
    pub fn pwm_min_interval(mut self, interval: Duration) -> Self {
        self.config.pwm_min_interval_ms = duration_to_ms(interval);
        self
    }

    #[must_use]
    pub fn port_count(mut self, count: u8) -> Self {
        self.config.port_count = count;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> PinIoResult<PinIoConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
