use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common_types::{DEVICE_RELEASE_LATENCY, FEEDBACK_LEVELS, MAX_TICKS, QUANTUM};
use crate::error::ConfigError;

const DEFAULT_QUANTUM: NonZeroUsize = match NonZeroUsize::new(QUANTUM) {
    Some(quantum) => quantum,
    None => panic!("QUANTUM must not be zero"),
};

/// Tunables of a simulation run.
///
/// Every field is optional in a TOML file, missing ones keep the defaults:
///
/// ```toml
/// max_ticks = 1000
/// quantum = 5
/// feedback_levels = 3
/// device_latency = 1
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Ticks after which the run stops even if processes are left
    pub max_ticks: usize,
    /// Time slice of round robin and feedback
    pub quantum: NonZeroUsize,
    /// Ready queues used by feedback
    pub feedback_levels: usize,
    /// Ticks a device holds a process past its service time
    pub device_latency: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            max_ticks: MAX_TICKS,
            quantum: DEFAULT_QUANTUM,
            feedback_levels: FEEDBACK_LEVELS,
            device_latency: DEVICE_RELEASE_LATENCY,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<SimConfig, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML configuration file
    pub fn load(path: &Path) -> Result<SimConfig, ConfigError> {
        let text = fs::read_to_string(path)?;
        SimConfig::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ticks == 0 {
            return Err(ConfigError::Invalid("max_ticks must be positive".to_string()));
        }

        if self.feedback_levels == 0 {
            return Err(ConfigError::Invalid(
                "feedback_levels must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = SimConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimConfig::default());
        assert_eq!(config.quantum.get(), 5);
        assert_eq!(config.max_ticks, 1000);
    }

    #[test]
    fn partial_file_overrides_fields() {
        let config = SimConfig::from_toml_str("quantum = 2\nmax_ticks = 50\n").unwrap();
        assert_eq!(config.quantum.get(), 2);
        assert_eq!(config.max_ticks, 50);
        assert_eq!(config.feedback_levels, 3);
    }

    #[test]
    fn zero_quantum_is_a_parse_error() {
        assert!(matches!(
            SimConfig::from_toml_str("quantum = 0"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_levels_are_rejected() {
        assert!(matches!(
            SimConfig::from_toml_str("feedback_levels = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(SimConfig::from_toml_str("quanta = 3").is_err());
    }
}
