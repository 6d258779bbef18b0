pub mod buffer;
pub mod source;

pub use buffer::{AudioBuffer, Preview};
pub use source::{load, load_from_reader};
