use std::f64::consts::PI;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use hound::{WavSpec, WavWriter};

/// Sine tone as integer samples with the given peak amplitude
pub fn sine_i32(freq_hz: f64, amplitude: f64, sample_rate: u32, len: usize) -> Vec<i32> {
    (0..len)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (amplitude * (2.0 * PI * freq_hz * t).sin()).round() as i32
        })
        .collect()
}

/// RMS of `samples[skip..]`
pub fn rms<T: Copy + Into<f64>>(samples: &[T], skip: usize) -> f64 {
    let tail = &samples[skip..];
    let sum: f64 = tail.iter().map(|&s| Into::<f64>::into(s).powi(2)).sum();
    (sum / tail.len() as f64).sqrt()
}

/// Unique path in the system temp dir
pub fn temp_wav_path(label: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "firoffload_{}_{}_{}.wav",
        label,
        std::process::id(),
        n
    ))
}

/// Write interleaved 16-bit PCM
pub fn write_wav_i16(path: &PathBuf, channels: u16, sample_rate: u32, interleaved: &[i16]) {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).expect("create wav");
    for &s in interleaved {
        writer.write_sample(s).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}
