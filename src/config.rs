use std::path::PathBuf;

use crate::data::join::DEFAULT_RISK_THRESHOLD;

pub const DATA_DIR_ENV: &str = "INSURANCE_DATA_DIR";
pub const RISK_THRESHOLD_ENV: &str = "INSURANCE_RISK_THRESHOLD";
pub const DEFAULT_DATA_DIR: &str = "data";

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Directory holding the three CSV files.
    pub data_dir: PathBuf,
    /// Initial cut-off for the high-risk view.
    pub risk_threshold: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            risk_threshold: DEFAULT_RISK_THRESHOLD,
        }
    }
}

impl ExplorerConfig {
    /// First CLI argument, then `INSURANCE_DATA_DIR`, then `./data`.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::args().nth(1),
            std::env::var(DATA_DIR_ENV).ok(),
            std::env::var(RISK_THRESHOLD_ENV).ok(),
        )
    }

    fn resolve(arg: Option<String>, env_dir: Option<String>, env_threshold: Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = arg.or(env_dir).filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = env_threshold {
            match raw.trim().parse::<f64>() {
                Ok(t) if (0.0..=1.0).contains(&t) => config.risk_threshold = t,
                _ => log::warn!(
                    "Ignoring {RISK_THRESHOLD_ENV}={raw:?}: expected a number in [0, 1]"
                ),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_overrides() {
        assert_eq!(ExplorerConfig::resolve(None, None, None), ExplorerConfig::default());
    }

    #[test]
    fn cli_argument_wins_over_environment() {
        let config = ExplorerConfig::resolve(
            Some("/srv/cli".into()),
            Some("/srv/env".into()),
            None,
        );
        assert_eq!(config.data_dir, PathBuf::from("/srv/cli"));

        let config = ExplorerConfig::resolve(None, Some("/srv/env".into()), None);
        assert_eq!(config.data_dir, PathBuf::from("/srv/env"));
    }

    #[test]
    fn threshold_override_is_validated() {
        let config = ExplorerConfig::resolve(None, None, Some("0.65".into()));
        assert_eq!(config.risk_threshold, 0.65);

        for bad in ["high", "1.5", "-0.1", "NaN"] {
            let config = ExplorerConfig::resolve(None, None, Some(bad.into()));
            assert_eq!(config.risk_threshold, DEFAULT_RISK_THRESHOLD);
        }
    }
}
