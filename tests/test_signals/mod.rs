#![allow(dead_code)]

mod channels;
mod generate;

pub use channels::{LoopbackDevice, ScriptedChannel, ScriptedLog};
pub use generate::{rms, sine_i32, temp_wav_path, write_wav_i16};
