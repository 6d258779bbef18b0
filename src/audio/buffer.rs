use std::iter::{Copied, StepBy};
use std::slice;

/// Decimated read-only view over an `AudioBuffer`. Finite; clone it to restart.
pub type Preview<'a> = StepBy<Copied<slice::Iter<'a, i32>>>;

/// Mono PCM signal at its native sample rate and bit depth
///
/// Samples are stored widened to `i32` whatever the source width. Transformations
/// produce a new buffer; an existing one is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    samples: Vec<i32>,
    sample_rate: u32,
    bits_per_sample: u16,
}

impl AudioBuffer {
    pub fn new(samples: Vec<i32>, sample_rate: u32, bits_per_sample: u16) -> Self {
        Self {
            samples,
            sample_rate,
            bits_per_sample,
        }
    }

    /// Build from interleaved frames, keeping only channel 0
    pub fn from_interleaved(
        interleaved: &[i32],
        channels: u16,
        sample_rate: u32,
        bits_per_sample: u16,
    ) -> Self {
        let step = usize::from(channels.max(1));
        let samples = interleaved.iter().step_by(step).copied().collect();
        Self::new(samples, sample_rate, bits_per_sample)
    }

    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Every `stride`-th sample starting at index 0. A stride of 0 is treated as 1.
    pub fn preview(&self, stride: usize) -> Preview<'_> {
        self.samples.iter().copied().step_by(stride.max(1))
    }

    /// Status line shown after a successful load
    pub fn summary(&self) -> String {
        format!("Loaded {} samples @ {}Hz", self.samples.len(), self.sample_rate)
    }
}
