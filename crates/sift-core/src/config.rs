//! Pipeline configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. Explicit path, or the override in the data dir
//!    (~/.local/share/sift/config/insights.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::insights::DEFAULT_CORRELATION_THRESHOLD;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/insights.toml");

/// Settings for the correlation insight
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationConfig {
    /// Minimum signed coefficient for a correlation to be kept
    pub threshold: f64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CORRELATION_THRESHOLD,
        }
    }
}

/// Settings for proposal enumeration
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalConfig {
    /// Proposal count per insight type above which a warning is logged
    pub warn_above: usize,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self { warn_above: 1000 }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineConfig {
    pub correlation: CorrelationConfig,
    pub proposals: ProposalConfig,
}

impl PipelineConfig {
    /// Load configuration (explicit path or override first, then default)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = match path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?,
            None => match default_config_path() {
                Some(default_path) if default_path.exists() => {
                    fs::read_to_string(&default_path).map_err(|e| {
                        Error::Config(format!("Failed to read {}: {}", default_path.display(), e))
                    })?
                }
                _ => DEFAULT_CONFIG.to_string(),
            },
        };

        Self::parse(&content)
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = PipelineConfig::default();

        if let Some(correlation) = raw.correlation {
            if let Some(threshold) = correlation.threshold {
                if !(-1.0..=1.0).contains(&threshold) {
                    return Err(Error::Config(format!(
                        "correlation.threshold must be within [-1, 1], got {}",
                        threshold
                    )));
                }
                config.correlation.threshold = threshold;
            }
        }

        if let Some(proposals) = raw.proposals {
            if let Some(warn_above) = proposals.warn_above {
                config.proposals.warn_above = warn_above;
            }
        }

        Ok(config)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("sift").join("config").join("insights.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    correlation: Option<RawCorrelation>,
    proposals: Option<RawProposals>,
}

#[derive(Debug, Deserialize)]
struct RawCorrelation {
    threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawProposals {
    warn_above: Option<usize>,
}
