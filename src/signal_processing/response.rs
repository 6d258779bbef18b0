use std::f64::consts::PI;

use num_complex::Complex64;

/// Complex frequency response of `taps` at `freq_hz`.
pub fn frequency_response(taps: &[f64], freq_hz: f64, sample_rate: u32) -> Complex64 {
    let omega = 2.0 * PI * freq_hz / sample_rate as f64;
    taps.iter()
        .enumerate()
        .map(|(k, &h)| Complex64::from_polar(h, -omega * k as f64))
        .sum()
}

/// Magnitude of the frequency response at `freq_hz`.
pub fn magnitude(taps: &[f64], freq_hz: f64, sample_rate: u32) -> f64 {
    frequency_response(taps, freq_hz, sample_rate).norm()
}

/// Magnitude in dB, floored at -300 dB for exact nulls.
pub fn magnitude_db(taps: &[f64], freq_hz: f64, sample_rate: u32) -> f64 {
    20.0 * magnitude(taps, freq_hz, sample_rate).max(1e-15).log10()
}

/// Frequencies at which the magnitude crosses `level_db`, found on a uniform
/// grid of `points` bins between 0 Hz and Nyquist and refined by linear interpolation.
pub fn crossings(taps: &[f64], sample_rate: u32, level_db: f64, points: usize) -> Vec<f64> {
    if points < 2 {
        return Vec::new();
    }
    let nyquist = sample_rate as f64 / 2.0;
    let step = nyquist / (points - 1) as f64;

    let mut found = Vec::new();
    let mut prev_f = 0.0;
    let mut prev_db = magnitude_db(taps, prev_f, sample_rate) - level_db;
    for i in 1..points {
        let f = i as f64 * step;
        let db = magnitude_db(taps, f, sample_rate) - level_db;
        if (prev_db < 0.0) != (db < 0.0) {
            let t = prev_db / (prev_db - db);
            found.push(prev_f + t * step);
        }
        prev_f = f;
        prev_db = db;
    }
    found
}
