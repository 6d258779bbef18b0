use std::path::PathBuf;

use thiserror::Error;

/// Rejections raised while building a `FilterSpec` or designing its taps.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    #[error("Tap count must be odd, got {0}")]
    EvenTapCount(usize),

    #[error("Invalid cutoff: {0}")]
    InvalidCutoff(String),

    #[error("Window parameter must be finite and non-negative, got {0}")]
    InvalidWindowParam(f64),

    #[error("Sample rate must be positive")]
    InvalidSampleRate,
}

/// Failures while reading a PCM source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Unreadable PCM source: {0}")]
    Format(String),
}

/// Failures of a single offload run. None of them leave the session unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("No audio loaded")]
    NoAudioLoaded,

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Accelerator configuration error: {0}")]
    ChannelBind(String),

    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("Transfer did not complete within {0:.3}s")]
    Timeout(f64),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid filter design: {0}")]
    Design(#[from] DesignError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Design(#[from] DesignError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("WAV output error: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
