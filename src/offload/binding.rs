use super::{ConfigToken, TransferChannel};
use crate::error::SessionError;

/// One-entry cache of the configuration loaded on a channel
///
/// Reconfiguration happens when, and only when, the requested token differs
/// from the loaded one. A failed reconfiguration leaves the binding untouched.
#[derive(Debug, Clone, Default)]
pub struct AcceleratorBinding {
    loaded: Option<ConfigToken>,
    reconfigurations: u64,
}

impl AcceleratorBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token of the last successfully loaded configuration
    pub fn loaded(&self) -> Option<&ConfigToken> {
        self.loaded.as_ref()
    }

    pub fn needs_rebind(&self, token: &ConfigToken) -> bool {
        self.loaded.as_ref() != Some(token)
    }

    /// Number of successful reconfigurations through this binding
    pub fn reconfigurations(&self) -> u64 {
        self.reconfigurations
    }

    /// Make `token` the loaded configuration on `channel`.
    ///
    /// Returns `true` if the channel was reconfigured, `false` if it already had it.
    pub fn ensure<C>(&mut self, channel: &mut C, token: &ConfigToken) -> Result<bool, SessionError>
    where
        C: TransferChannel + ?Sized,
    {
        if !self.needs_rebind(token) {
            log::debug!("Configuration {} already loaded, skipping reconfiguration", token);
            return Ok(false);
        }

        log::info!("Loading accelerator configuration {}", token);
        channel.reconfigure(token)?;
        self.loaded = Some(token.clone());
        self.reconfigurations += 1;
        Ok(true)
    }

    /// Forget the loaded configuration, forcing the next `ensure` to reconfigure.
    pub fn invalidate(&mut self) {
        self.loaded = None;
    }
}
