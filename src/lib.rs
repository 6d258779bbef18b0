pub mod audio;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod offload;
pub mod output;
pub mod signal_processing;
pub mod wav;

pub use audio::AudioBuffer;
pub use catalog::{CatalogEntry, FilterCatalog};
pub use config::EqualizerConfig;
pub use error::{ConfigError, DesignError, Error, LoadError, Result, SessionError};
pub use offload::{
    AcceleratorBinding, ConfigToken, OffloadResult, OffloadSession, ResultStore, TransferChannel,
};
pub use signal_processing::{FilterKind, FilterSpec, GainScaling, TapSequence, design};
pub use wav::save_wav;
