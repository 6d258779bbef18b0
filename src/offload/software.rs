use std::time::{Duration, Instant};

use super::{ConfigToken, TransferChannel};
use crate::catalog::FilterCatalog;
use crate::error::SessionError;
use crate::signal_processing::{FilterKind, FirFilterCore};

/// Reference channel for machines without the accelerator
///
/// "Loading" a configuration selects the catalog taps registered under that token;
/// a transfer convolves the input with them from a zeroed delay line, which is
/// what the hardware FIR block does with a fresh stream.
pub struct SoftwareChannel {
    catalog: FilterCatalog,
    loaded: Option<Loaded>,
}

struct Loaded {
    token: ConfigToken,
    kind: FilterKind,
    core: FirFilterCore,
}

impl SoftwareChannel {
    pub fn new(catalog: FilterCatalog) -> Self {
        Self {
            catalog,
            loaded: None,
        }
    }

    /// Filter currently loaded, if any
    pub fn loaded_filter(&self) -> Option<FilterKind> {
        self.loaded.as_ref().map(|l| l.kind)
    }
}

impl TransferChannel for SoftwareChannel {
    fn reconfigure(&mut self, token: &ConfigToken) -> Result<(), SessionError> {
        let entry = self.catalog.by_token(token).ok_or_else(|| {
            SessionError::ChannelBind(format!("no filter configured as {}", token))
        })?;

        self.loaded = Some(Loaded {
            token: token.clone(),
            kind: entry.spec.kind(),
            core: FirFilterCore::from_taps(&entry.taps),
        });
        Ok(())
    }

    fn transfer(
        &mut self,
        token: &ConfigToken,
        input: &[i32],
        output: &mut [i32],
        timeout: Duration,
    ) -> Result<Duration, SessionError> {
        let loaded = self
            .loaded
            .as_mut()
            .filter(|l| &l.token == token)
            .ok_or_else(|| SessionError::Transfer(format!("configuration {} is not loaded", token)))?;
        if input.len() != output.len() {
            return Err(SessionError::Transfer(format!(
                "input has {} samples but output has {}",
                input.len(),
                output.len()
            )));
        }

        let start = Instant::now();
        loaded.core.reset();
        loaded.core.process_i32(input, output);
        let elapsed = start.elapsed();

        if elapsed > timeout {
            return Err(SessionError::Timeout(timeout.as_secs_f64()));
        }
        Ok(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> SoftwareChannel {
        SoftwareChannel::new(FilterCatalog::standard().unwrap())
    }

    #[test]
    fn test_unknown_token_fails_to_bind() {
        let mut ch = channel();
        let err = ch.reconfigure(&ConfigToken::new("missing.bit")).unwrap_err();
        assert!(matches!(err, SessionError::ChannelBind(_)));
        assert_eq!(ch.loaded_filter(), None);
    }

    #[test]
    fn test_transfer_requires_loaded_token() {
        let mut ch = channel();
        let mut out = [0; 4];
        let token = ConfigToken::new("your_file_name1.bit");
        let err = ch
            .transfer(&token, &[1, 2, 3, 4], &mut out, Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, SessionError::Transfer(_)));

        ch.reconfigure(&token).unwrap();
        assert_eq!(ch.loaded_filter(), Some(FilterKind::LowPass));
        let other = ConfigToken::new("your_file_name3.bit");
        assert!(ch.transfer(&other, &[1, 2, 3, 4], &mut out, Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_impulse_yields_scaled_taps() {
        let catalog = FilterCatalog::standard().unwrap();
        let entry = catalog.get(FilterKind::HighPass).unwrap().clone();
        let mut ch = SoftwareChannel::new(catalog);
        ch.reconfigure(&entry.config_token).unwrap();

        let mut input = vec![0i32; 81];
        input[0] = 10_000;
        let mut output = vec![0i32; 81];
        ch.transfer(&entry.config_token, &input, &mut output, Duration::from_secs(1))
            .unwrap();

        for (out, tap) in output.iter().zip(entry.taps.taps()) {
            assert_eq!(*out, (tap * 10_000.0).round() as i32);
        }
    }

    #[test]
    fn test_transfers_are_independent() {
        let catalog = FilterCatalog::standard().unwrap();
        let token = catalog.get(FilterKind::LowPass).unwrap().config_token.clone();
        let mut ch = SoftwareChannel::new(catalog);
        ch.reconfigure(&token).unwrap();

        let input: Vec<i32> = (0..200).map(|i| (i * 37 % 2000) - 1000).collect();
        let mut first = vec![0; 200];
        let mut second = vec![0; 200];
        ch.transfer(&token, &input, &mut first, Duration::from_secs(1)).unwrap();
        ch.transfer(&token, &input, &mut second, Duration::from_secs(1)).unwrap();
        assert_eq!(first, second);
    }
}
