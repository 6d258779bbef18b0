use std::time::Duration;

use serde::Serialize;

use super::{AcceleratorBinding, ProgressObserver, RegionPool, TransferChannel};
use crate::audio::AudioBuffer;
use crate::catalog::FilterCatalog;
use crate::config::EqualizerConfig;
use crate::constants::{
    DEFAULT_TRANSFER_TIMEOUT_MS, PROGRESS_ALLOCATED, PROGRESS_BOUND, PROGRESS_COPIED,
    PROGRESS_DONE, PROGRESS_RESOLVED, PROGRESS_TRANSFERRED,
};
use crate::error::{ConfigError, SessionError};
use crate::signal_processing::FilterKind;

/// Filtered signal produced by one successful offload run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffloadResult {
    filter: FilterKind,
    samples: Vec<i16>,
    sample_rate: u32,
    elapsed: Duration,
    clipped_samples: usize,
    latency_samples: usize,
}

impl OffloadResult {
    pub fn filter(&self) -> FilterKind {
        self.filter
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Wall time of the accelerator transfer alone
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Samples that fell outside the 16-bit range and were clamped
    pub fn clipped_samples(&self) -> usize {
        self.clipped_samples
    }

    /// Group delay of the filter that produced this result. The accelerator
    /// output is not shifted; sample `i + latency` corresponds to input sample `i`.
    pub fn latency_samples(&self) -> usize {
        self.latency_samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Every `stride`-th sample, for plotting collaborators
    pub fn preview(&self, stride: usize) -> impl Iterator<Item = i16> + '_ {
        self.samples.iter().copied().step_by(stride.max(1))
    }
}

/// Orchestrates one filter application against an accelerator channel
///
/// The session owns no hardware state itself: the caller passes the channel and
/// its `AcceleratorBinding` into every run, and must not run two sessions
/// against the same channel at once (see `OffloadWorker` for a serialized front end).
pub struct OffloadSession {
    catalog: FilterCatalog,
    transfer_timeout: Duration,
    regions: RegionPool,
}

impl OffloadSession {
    pub fn new(catalog: FilterCatalog) -> Self {
        Self {
            catalog,
            transfer_timeout: Duration::from_millis(DEFAULT_TRANSFER_TIMEOUT_MS),
            regions: RegionPool::new(),
        }
    }

    pub fn from_config(config: &EqualizerConfig) -> Result<Self, ConfigError> {
        let catalog = FilterCatalog::from_config(&config.catalog)?;
        Ok(Self::new(catalog).with_timeout(config.session.transfer_timeout()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transfer_timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    pub fn transfer_timeout(&self) -> Duration {
        self.transfer_timeout
    }

    /// Transfer regions currently allocated by this session. Zero between runs.
    pub fn live_regions(&self) -> usize {
        self.regions.live_regions()
    }

    /// Apply `filter_name` to `buffer` on `channel`
    ///
    /// Steps, each followed by a progress milestone:
    /// 1. resolve the filter and reject a missing or empty buffer (10%)
    /// 2. load the filter's configuration unless `binding` says it is already loaded (30%)
    /// 3. allocate input and output regions of `buffer.len()` samples (50%)
    /// 4. copy the samples into the input region (70%)
    /// 5. run the blocking transfer (90%)
    /// 6. clamp the output to 16-bit and release the regions (100%)
    ///
    /// # Errors
    /// Any `SessionError`. Regions are released on every path and `binding` only
    /// changes when a reconfiguration succeeds.
    pub fn run<C>(
        &self,
        buffer: Option<&AudioBuffer>,
        filter_name: &str,
        channel: &mut C,
        binding: &mut AcceleratorBinding,
        progress: &mut dyn ProgressObserver,
    ) -> Result<OffloadResult, SessionError>
    where
        C: TransferChannel + ?Sized,
    {
        let entry = self.catalog.resolve(filter_name)?;
        let buffer = match buffer {
            Some(buffer) if !buffer.is_empty() => buffer,
            _ => return Err(SessionError::NoAudioLoaded),
        };
        progress.on_progress(PROGRESS_RESOLVED);

        binding.ensure(channel, &entry.config_token)?;
        progress.on_progress(PROGRESS_BOUND);

        let len = buffer.len();
        let mut input = self.regions.allocate(len);
        let mut output = self.regions.allocate(len);
        progress.on_progress(PROGRESS_ALLOCATED);

        input.copy_from_slice(buffer.samples());
        progress.on_progress(PROGRESS_COPIED);

        let elapsed = channel.transfer(
            &entry.config_token,
            &input,
            &mut output,
            self.transfer_timeout,
        )?;
        if elapsed > self.transfer_timeout {
            return Err(SessionError::Timeout(self.transfer_timeout.as_secs_f64()));
        }
        progress.on_progress(PROGRESS_TRANSFERRED);

        let (samples, clipped_samples) = clamp_to_i16(&output);
        drop(input);
        drop(output);
        if clipped_samples > 0 {
            log::warn!(
                "{}: {} of {} samples clipped to 16-bit range",
                entry.spec.kind(),
                clipped_samples,
                len
            );
        }

        log::info!(
            "{} applied to {} samples in {:.4}s",
            entry.spec.kind(),
            len,
            elapsed.as_secs_f64()
        );
        progress.on_progress(PROGRESS_DONE);

        Ok(OffloadResult {
            filter: entry.spec.kind(),
            samples,
            sample_rate: buffer.sample_rate(),
            elapsed,
            clipped_samples,
            latency_samples: entry.taps.group_delay_samples(),
        })
    }

    /// Apply `filter_name` `repeat` times (at least once) and return the last
    /// result together with the transfer time of every run.
    ///
    /// # Errors
    /// The first failing run's `SessionError`. Results of earlier runs in the
    /// same call are discarded.
    pub fn run_repeated<C>(
        &self,
        buffer: Option<&AudioBuffer>,
        filter_name: &str,
        repeat: usize,
        channel: &mut C,
        binding: &mut AcceleratorBinding,
        progress: &mut dyn ProgressObserver,
    ) -> Result<(OffloadResult, Vec<Duration>), SessionError>
    where
        C: TransferChannel + ?Sized,
    {
        let mut result = self.run(buffer, filter_name, channel, binding, progress)?;
        let mut durations = Vec::with_capacity(repeat.max(1));
        durations.push(result.elapsed());
        for _ in 1..repeat {
            result = self.run(buffer, filter_name, channel, binding, progress)?;
            durations.push(result.elapsed());
        }
        Ok((result, durations))
    }
}

/// Saturating conversion to 16-bit. Returns the samples and how many were clamped.
pub fn clamp_to_i16(samples: &[i32]) -> (Vec<i16>, usize) {
    let lo = i16::MIN as i32;
    let hi = i16::MAX as i32;
    let mut clipped = 0;
    let converted = samples
        .iter()
        .map(|&s| {
            if s < lo || s > hi {
                clipped += 1;
            }
            s.clamp(lo, hi) as i16
        })
        .collect();
    (converted, clipped)
}
