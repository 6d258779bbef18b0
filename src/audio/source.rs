use std::io::Read;
use std::path::Path;

use hound::{SampleFormat, WavReader};

use super::AudioBuffer;
use crate::error::LoadError;

/// Load a PCM WAV file as a mono `AudioBuffer`
///
/// Multi-channel files are reduced to their first channel. Integer formats keep
/// their native values; float formats are scaled to the 16-bit range.
///
/// # Errors
/// `LoadError::SourceNotFound` if `path` does not exist, `LoadError::Format` if
/// the header or sample data cannot be read.
pub fn load<P: AsRef<Path>>(path: P) -> Result<AudioBuffer, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::SourceNotFound(path.to_path_buf()));
    }

    let reader = WavReader::open(path).map_err(|e| LoadError::Format(e.to_string()))?;
    let buffer = read_buffer(reader)?;
    log::info!("{} from {}", buffer.summary(), path.display());
    Ok(buffer)
}

/// Same as [`load`] for an in-memory or already-open source.
pub fn load_from_reader<R: Read>(reader: R) -> Result<AudioBuffer, LoadError> {
    let reader = WavReader::new(reader).map_err(|e| LoadError::Format(e.to_string()))?;
    read_buffer(reader)
}

fn read_buffer<R: Read>(mut reader: WavReader<R>) -> Result<AudioBuffer, LoadError> {
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(LoadError::Format("WAV header declares zero channels".to_string()));
    }
    if spec.channels > 1 {
        log::warn!("Source has {} channels, keeping channel 0", spec.channels);
    }

    let (interleaved, bits) = match spec.sample_format {
        SampleFormat::Int => {
            let samples = reader
                .samples::<i32>()
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| LoadError::Format(e.to_string()))?;
            (samples, spec.bits_per_sample)
        }
        SampleFormat::Float => {
            let samples = reader
                .samples::<f32>()
                .map(|s| s.map(float_to_i16_range))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| LoadError::Format(e.to_string()))?;
            (samples, 16)
        }
    };

    Ok(AudioBuffer::from_interleaved(
        &interleaved,
        spec.channels,
        spec.sample_rate,
        bits,
    ))
}

fn float_to_i16_range(sample: f32) -> i32 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};
    use std::io::Cursor;

    fn wav_bytes<S: hound::Sample + Copy>(spec: WavSpec, samples: &[S]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_stereo_reduced_to_first_channel() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, &[0i16, -1, 100, -1, 200, -1, 300, -1]);

        let buffer = load_from_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(buffer.samples(), &[0, 100, 200, 300]);
        assert_eq!(buffer.sample_rate(), 44100);
        assert_eq!(buffer.bits_per_sample(), 16);
    }

    #[test]
    fn test_float_source_scaled() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let bytes = wav_bytes(spec, &[0.0f32, 1.0, -1.0, 2.0]);

        let buffer = load_from_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(buffer.samples(), &[0, 32767, -32767, 32767]);
    }

    #[test]
    fn test_garbage_is_format_error() {
        let result = load_from_reader(Cursor::new(b"not a wav file at all".to_vec()));
        assert!(matches!(result, Err(LoadError::Format(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load("/nonexistent/input.wav");
        assert!(matches!(result, Err(LoadError::SourceNotFound(_))));
    }
}
