use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Opaque identifier of an accelerator configuration (e.g. a bitstream file)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigToken(String);

impl ConfigToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Block-transfer link to an FIR accelerator
///
/// Implementations are stateful and non-reentrant: one transfer at a time,
/// always against the configuration most recently loaded by `reconfigure`.
pub trait TransferChannel: Send {
    /// Load accelerator configuration `token`. This is expensive; callers go
    /// through `AcceleratorBinding` to skip redundant loads.
    ///
    /// # Errors
    /// `SessionError::ChannelBind` if the configuration cannot be loaded. A failed
    /// load must leave the previously loaded configuration active, since
    /// `AcceleratorBinding` keeps treating it as loaded.
    fn reconfigure(&mut self, token: &ConfigToken) -> Result<(), SessionError>;

    /// Stream `input` through the accelerator configured as `token`, filling
    /// `output` (same length). Blocks until both directions have completed and
    /// returns the time the transfer took.
    ///
    /// Implementations should give up with `SessionError::Timeout` once `timeout`
    /// has passed; the session also rejects late completions.
    ///
    /// # Errors
    /// `SessionError::Transfer` if the transfer does not complete, or if `token`
    /// is not the loaded configuration.
    fn transfer(
        &mut self,
        token: &ConfigToken,
        input: &[i32],
        output: &mut [i32],
        timeout: Duration,
    ) -> Result<Duration, SessionError>;
}

impl<T: TransferChannel + ?Sized> TransferChannel for Box<T> {
    fn reconfigure(&mut self, token: &ConfigToken) -> Result<(), SessionError> {
        (**self).reconfigure(token)
    }

    fn transfer(
        &mut self,
        token: &ConfigToken,
        input: &[i32],
        output: &mut [i32],
        timeout: Duration,
    ) -> Result<Duration, SessionError> {
        (**self).transfer(token, input, output, timeout)
    }
}
