use crate::signal_processing::TapSequence;

/// Streaming direct-form FIR convolution
///
/// Holds the tap coefficients and a circular delay line, so a signal can be pushed
/// through one sample at a time exactly as a hardware FIR block would see it.
/// Output is causal: a linear-phase kernel delays the signal by `group_delay_samples()`.
pub struct FirFilterCore {
    taps: Vec<f64>,
    delay_line: Vec<f64>,
    pos: usize,
}

impl FirFilterCore {
    pub fn new(taps: Vec<f64>) -> Self {
        Self {
            delay_line: vec![0.0; taps.len()],
            taps,
            pos: 0,
        }
    }

    pub fn from_taps(taps: &TapSequence) -> Self {
        Self::new(taps.taps().to_vec())
    }

    /// Push one sample and return the filter output for it
    pub fn process(&mut self, sample: f64) -> f64 {
        if self.taps.is_empty() {
            return 0.0;
        }
        self.delay_line[self.pos] = sample;

        // Newest sample sits at `pos`; walking back from it and then down from the
        // end of the ring yields x[n], x[n-1], ... in tap order.
        let (recent, older) = self.delay_line.split_at(self.pos + 1);
        let history = recent.iter().rev().chain(older.iter().rev());
        let output: f64 = self.taps.iter().zip(history).map(|(h, x)| h * x).sum();

        self.pos = (self.pos + 1) % self.taps.len();
        output
    }

    /// Filter integer samples into `output`, rounding to nearest and saturating
    /// at the `i32` range. Both slices must have the same length.
    pub fn process_i32(&mut self, input: &[i32], output: &mut [i32]) {
        debug_assert_eq!(input.len(), output.len());
        for (out, &sample) in output.iter_mut().zip(input) {
            // `as` saturates on overflow.
            *out = self.process(sample as f64).round() as i32;
        }
    }

    /// Clear the delay line
    pub fn reset(&mut self) {
        self.delay_line.fill(0.0);
        self.pos = 0;
    }

    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Delay the accelerator output carries relative to the input, in samples
    pub fn group_delay_samples(&self) -> usize {
        self.taps.len().saturating_sub(1) / 2
    }
}
