//! Configuration for the FIR offload system.
//!
//! Everything has a working default, so a config file only needs the keys it changes:
//!
//! ```toml
//! [catalog.low_pass]
//! config_token = "/home/xilinx/lowpass_81.bit"
//! cutoffs = [392.0]
//!
//! [session]
//! transfer_timeout_ms = 2000
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CATALOG_SAMPLE_RATE, CATALOG_TAP_COUNT, CATALOG_WINDOW_BETA, DEFAULT_TRANSFER_TIMEOUT_MS,
};
use crate::error::ConfigError;
use crate::signal_processing::FilterKind;

/// System-wide configuration
///
/// # Example
/// ```
/// use firoffload::config::EqualizerConfig;
///
/// let config = EqualizerConfig::from_toml_str("[session]\ntransfer_timeout_ms = 500").unwrap();
/// assert_eq!(config.session.transfer_timeout_ms, 500);
/// assert_eq!(config.catalog.tap_count, 81);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EqualizerConfig {
    /// Filter designs and accelerator configuration tokens
    pub catalog: CatalogConfig,
    /// Offload run behaviour
    pub session: SessionConfig,
    /// Where filtered results are written
    pub output: OutputConfig,
}

/// Shared design parameters plus one entry per filter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Design sample rate in Hz
    pub sample_rate: u32,
    /// Tap count for every filter (must be odd)
    pub tap_count: usize,
    /// Kaiser window beta
    pub window_beta: f64,
    pub low_pass: FilterEntryConfig,
    pub band_pass: FilterEntryConfig,
    pub high_pass: FilterEntryConfig,
}

/// One filter's cutoff(s) and the accelerator configuration that implements it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterEntryConfig {
    /// Opaque accelerator configuration identifier (e.g. a bitstream path)
    pub config_token: String,
    /// Design cutoff(s) in Hz. These are the tuned values that yield the nominal
    /// corners on hardware, not the nominal corners themselves.
    pub cutoffs: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Deadline for one accelerator transfer in milliseconds
    pub transfer_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving filtered WAV files
    pub directory: PathBuf,
    /// File name prefix, followed by the filter name without spaces
    pub file_prefix: String,
}

impl EqualizerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Checks that do not need a full filter design. Cutoff ranges are checked
    /// when the catalog is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.transfer_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "session.transfer_timeout_ms must be positive".to_string(),
            ));
        }
        self.catalog.validate_tokens()
    }
}

impl CatalogConfig {
    /// Tokens must be non-empty and distinct across filters.
    pub fn validate_tokens(&self) -> Result<(), ConfigError> {
        let mut seen: BTreeMap<&str, FilterKind> = BTreeMap::new();
        for kind in FilterKind::ALL {
            let token = self.entry(kind).config_token.as_str();
            if token.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "{} has an empty config_token",
                    kind
                )));
            }
            if let Some(other) = seen.insert(token, kind) {
                return Err(ConfigError::Invalid(format!(
                    "{} and {} share config_token {}",
                    other, kind, token
                )));
            }
        }
        Ok(())
    }

    pub fn entry(&self, kind: FilterKind) -> &FilterEntryConfig {
        match kind {
            FilterKind::LowPass => &self.low_pass,
            FilterKind::BandPass => &self.band_pass,
            FilterKind::HighPass => &self.high_pass,
        }
    }
}

impl SessionConfig {
    pub fn transfer_timeout(&self) -> Duration {
        Duration::from_millis(self.transfer_timeout_ms)
    }
}

impl OutputConfig {
    /// Output path for a filter, e.g. `./out_LowPass.wav`
    pub fn path_for(&self, kind: FilterKind) -> PathBuf {
        self.directory
            .join(format!("{}{}.wav", self.file_prefix, kind.compact_name()))
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            sample_rate: CATALOG_SAMPLE_RATE,
            tap_count: CATALOG_TAP_COUNT,
            window_beta: CATALOG_WINDOW_BETA,
            // 392 Hz yields an actual corner of ~400 Hz
            low_pass: FilterEntryConfig {
                config_token: "your_file_name1.bit".to_string(),
                cutoffs: vec![392.0],
            },
            // 219/2224 Hz yield ~400-2000 Hz
            band_pass: FilterEntryConfig {
                config_token: "your_file_name2.bit".to_string(),
                cutoffs: vec![219.0, 2224.0],
            },
            // 1781 Hz yields ~2000 Hz
            high_pass: FilterEntryConfig {
                config_token: "your_file_name3.bit".to_string(),
                cutoffs: vec![1781.0],
            },
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            transfer_timeout_ms: DEFAULT_TRANSFER_TIMEOUT_MS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_prefix: "out_".to_string(),
        }
    }
}
