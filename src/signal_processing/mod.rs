pub mod coefficients;
pub mod fir_core;
pub mod fir_design;
pub mod response;
pub mod window;

pub use coefficients::{export_block, format_coefficients, header_line, parse_coefficients};
pub use fir_core::FirFilterCore;
pub use fir_design::{FilterKind, FilterSpec, GainScaling, TapSequence, design};
pub use response::{crossings, frequency_response, magnitude, magnitude_db};
pub use window::{bessel_i0, bessel_i0_scaled, kaiser};
