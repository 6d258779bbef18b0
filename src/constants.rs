//! Numeric constants shared by the design and offload paths.

/// Digits after the decimal point in the exported coefficient format.
/// The downstream accelerator-configuration tool depends on this exact precision.
pub const COEFFICIENT_PRECISION: usize = 18;

/// Relative tolerance at which the modified Bessel I0 power series is truncated.
pub const BESSEL_SERIES_EPSILON: f64 = 1e-17;

/// Stride used for waveform previews handed to plotting collaborators.
pub const DEFAULT_PREVIEW_STRIDE: usize = 100;

/// Sample rate used by every catalog filter.
pub const CATALOG_SAMPLE_RATE: u32 = 48_000;

/// Tap count used by every catalog filter.
pub const CATALOG_TAP_COUNT: usize = 81;

/// Kaiser shape parameter used by every catalog filter.
pub const CATALOG_WINDOW_BETA: f64 = 4.0;

/// Progress milestones reported by an offload run, in order.
pub const PROGRESS_RESOLVED: u8 = 10;
pub const PROGRESS_BOUND: u8 = 30;
pub const PROGRESS_ALLOCATED: u8 = 50;
pub const PROGRESS_COPIED: u8 = 70;
pub const PROGRESS_TRANSFERRED: u8 = 90;
pub const PROGRESS_DONE: u8 = 100;

/// Default deadline for a single transfer.
pub const DEFAULT_TRANSFER_TIMEOUT_MS: u64 = 10_000;

/// Argument above which the scaled Bessel I0 switches to its asymptotic expansion.
pub const BESSEL_ASYMPTOTIC_THRESHOLD: f64 = 50.0;
