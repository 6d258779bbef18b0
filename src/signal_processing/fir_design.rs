use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DesignError;
use crate::signal_processing::window::kaiser;

/// Filter class realised by a windowed-sinc design.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum FilterKind {
    LowPass,
    BandPass,
    HighPass,
}

impl FilterKind {
    pub const ALL: [FilterKind; 3] = [FilterKind::LowPass, FilterKind::BandPass, FilterKind::HighPass];

    /// Display name, e.g. `"Low Pass"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::LowPass => "Low Pass",
            FilterKind::BandPass => "Band Pass",
            FilterKind::HighPass => "High Pass",
        }
    }

    /// Display name with the space removed, used for output file names.
    pub fn compact_name(&self) -> &'static str {
        match self {
            FilterKind::LowPass => "LowPass",
            FilterKind::BandPass => "BandPass",
            FilterKind::HighPass => "HighPass",
        }
    }

    fn cutoff_count(&self) -> usize {
        match self {
            FilterKind::BandPass => 2,
            FilterKind::LowPass | FilterKind::HighPass => 1,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = String;

    /// Accepts the display names (`"Low Pass"`) as well as `lowpass`, `low-pass`, `low_pass`
    /// and the short forms `low`, `band`, `high`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "lowpass" | "low" | "lpf" => Ok(FilterKind::LowPass),
            "bandpass" | "band" | "bpf" => Ok(FilterKind::BandPass),
            "highpass" | "high" | "hpf" => Ok(FilterKind::HighPass),
            _ => Err(format!("unknown filter: {}", s)),
        }
    }
}

/// Normalisation applied after windowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GainScaling {
    /// Scale so the response is exactly 1.0 at the passband reference frequency:
    /// DC for low-pass, Nyquist for high-pass, band centre for band-pass.
    #[default]
    PassbandCenter,
    /// Leave the windowed ideal kernel as is.
    Unscaled,
}

/// Immutable description of one FIR design.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    kind: FilterKind,
    tap_count: usize,
    cutoffs: Vec<f64>,
    window_param: f64,
    sample_rate: u32,
    scaling: GainScaling,
}

impl FilterSpec {
    /// Validate and build a spec
    ///
    /// # Arguments
    /// * `kind` - Filter class
    /// * `tap_count` - Number of taps (must be odd for a Type I linear-phase kernel)
    /// * `cutoffs` - Band edge(s) in Hz: one for low/high-pass, two increasing for band-pass
    /// * `window_param` - Kaiser shape parameter (beta), >= 0
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Errors
    /// Returns `DesignError` if any parameter is out of range
    pub fn new(
        kind: FilterKind,
        tap_count: usize,
        cutoffs: &[f64],
        window_param: f64,
        sample_rate: u32,
    ) -> Result<Self, DesignError> {
        if tap_count % 2 == 0 {
            return Err(DesignError::EvenTapCount(tap_count));
        }
        if sample_rate == 0 {
            return Err(DesignError::InvalidSampleRate);
        }
        if !window_param.is_finite() || window_param < 0.0 {
            return Err(DesignError::InvalidWindowParam(window_param));
        }
        if cutoffs.len() != kind.cutoff_count() {
            return Err(DesignError::InvalidCutoff(format!(
                "{} needs {} cutoff(s), got {}",
                kind,
                kind.cutoff_count(),
                cutoffs.len()
            )));
        }

        let nyquist = sample_rate as f64 / 2.0;
        for &fc in cutoffs {
            if !fc.is_finite() || fc <= 0.0 || fc >= nyquist {
                return Err(DesignError::InvalidCutoff(format!(
                    "{} Hz must lie strictly between 0 and {} Hz",
                    fc, nyquist
                )));
            }
        }
        if cutoffs.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(DesignError::InvalidCutoff(format!(
                "band edges must be strictly increasing, got {:?}",
                cutoffs
            )));
        }

        Ok(Self {
            kind,
            tap_count,
            cutoffs: cutoffs.to_vec(),
            window_param,
            sample_rate,
            scaling: GainScaling::default(),
        })
    }

    pub fn with_scaling(mut self, scaling: GainScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn tap_count(&self) -> usize {
        self.tap_count
    }

    pub fn cutoffs(&self) -> &[f64] {
        &self.cutoffs
    }

    pub fn window_param(&self) -> f64 {
        self.window_param
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn scaling(&self) -> GainScaling {
        self.scaling
    }

    /// Passband as `(left, right)` edges normalised to Nyquist = 1.
    fn passband(&self) -> (f64, f64) {
        let nyquist = self.sample_rate as f64 / 2.0;
        let norm = |hz: f64| hz / nyquist;
        match self.kind {
            FilterKind::LowPass => (0.0, norm(self.cutoffs[0])),
            FilterKind::HighPass => (norm(self.cutoffs[0]), 1.0),
            FilterKind::BandPass => (norm(self.cutoffs[0]), norm(self.cutoffs[1])),
        }
    }
}

/// Designed FIR coefficients. Read-only once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TapSequence {
    taps: Vec<f64>,
}

impl TapSequence {
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Group delay in samples (half the filter length for linear phase)
    pub fn group_delay_samples(&self) -> usize {
        self.taps.len().saturating_sub(1) / 2
    }

    /// Sum of the taps, i.e. the gain at 0 Hz
    pub fn dc_gain(&self) -> f64 {
        self.taps.iter().sum()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.taps
    }
}

impl AsRef<[f64]> for TapSequence {
    fn as_ref(&self) -> &[f64] {
        &self.taps
    }
}

/// Normalised sinc, `sin(pi x) / (pi x)`, with the limit 1 at `x = 0`.
fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

/// Design FIR taps for `spec` with the windowed-sinc method.
///
/// The ideal kernel is built from low-pass sinc terms on a time index centred at
/// `(N - 1) / 2`:
/// - low-pass: `lp(fc)`
/// - high-pass: `delta - lp(fc)` (spectral inversion)
/// - band-pass: `lp(f_high) - lp(f_low)`
///
/// It is then tapered by a Kaiser window with `beta = spec.window_param()` and,
/// unless the spec asks for `GainScaling::Unscaled`, divided by its response at the
/// passband reference frequency.
///
/// Pure and deterministic: equal specs give bit-identical taps.
pub fn design(spec: &FilterSpec) -> TapSequence {
    let n = spec.tap_count;
    let center = (n - 1) as f64 / 2.0;
    let (left, right) = spec.passband();

    // A passband edge at Nyquist contributes `1 * sinc(m)`, the unit impulse at the
    // centre tap, which is how the high-pass case performs its inversion.
    let window = kaiser(n, spec.window_param);
    let mut taps: Vec<f64> = (0..n)
        .map(|i| {
            let m = i as f64 - center;
            let ideal = right * sinc(right * m) - left * sinc(left * m);
            ideal * window[i]
        })
        .collect();

    if spec.scaling == GainScaling::PassbandCenter {
        let reference = if left == 0.0 {
            0.0
        } else if right == 1.0 {
            1.0
        } else {
            0.5 * (left + right)
        };
        let gain: f64 = taps
            .iter()
            .enumerate()
            .map(|(i, &h)| h * (PI * (i as f64 - center) * reference).cos())
            .sum();
        if gain != 0.0 {
            for tap in taps.iter_mut() {
                *tap /= gain;
            }
        } else {
            log::warn!("{} design has zero passband gain; leaving taps unscaled", spec.kind);
        }
    }

    log::trace!(
        "Designed {} ({} taps, cutoffs {:?} Hz, beta {})",
        spec.kind,
        n,
        spec.cutoffs,
        spec.window_param
    );

    TapSequence { taps }
}
