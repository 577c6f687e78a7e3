//! Configuration file loading and validation.

use std::fs;
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use pinio_core::PinIoConfig;
use tracing::info;

use crate::error::CliError;
use crate::output;

/// Load and validate a configuration file, choosing the format by extension.
pub fn load_config(path: &Path) -> Result<PinIoConfig, CliError> {
    let text = fs::read_to_string(path)?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => PinIoConfig::from_json_str(&text)?,
        Some("yaml" | "yml") => PinIoConfig::from_yaml_str(&text)?,
        other => {
            return Err(CliError::UnsupportedConfigFormat(
                other.unwrap_or("no extension").to_string(),
            ));
        }
    };
    Ok(config)
}

pub fn check_config(path: &Path, json: bool) -> Result<()> {
    let config = load_config(path)?;
    info!(path = %path.display(), "configuration is valid");

    if json {
        output::print_json("config", &config);
    } else {
        println!("{} {}", "Valid:".green().bold(), path.display());
        println!("  discovery timeout: {:?}", config.discovery_timeout());
        println!("  PWM min interval:  {:?}", config.pwm_min_interval());
        println!("  port count:        {}", config.port_count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_loads_json_and_yaml() -> TestResult {
        let dir = tempfile::tempdir()?;
        let json_path = dir.path().join("pinio.json");
        fs::write(&json_path, r#"{"discovery_timeout_ms": 2000}"#)?;
        let config = load_config(&json_path)?;
        assert_eq!(config.discovery_timeout(), Duration::from_secs(2));
        assert_eq!(config.port_count, 3);

        let yaml_path = dir.path().join("pinio.yml");
        fs::write(&yaml_path, "port_count: 2\npwm_min_interval_ms: 20\n")?;
        let config = load_config(&yaml_path)?;
        assert_eq!(config.port_count, 2);
        assert_eq!(config.pwm_min_interval(), Duration::from_millis(20));
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_extension() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pinio.toml");
        fs::write(&path, "port_count = 2")?;
        assert!(matches!(
            load_config(&path),
            Err(CliError::UnsupportedConfigFormat(ext)) if ext == "toml"
        ));
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_values() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("pinio.json");
        fs::write(&path, r#"{"port_count": 0}"#)?;
        assert!(matches!(
            load_config(&path),
            Err(CliError::InvalidConfiguration(_))
        ));
        Ok(())
    }
}
