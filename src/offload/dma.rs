use std::time::{Duration, Instant};

use thiserror::Error;

use super::{ConfigToken, TransferChannel};
use crate::error::SessionError;

/// Direction of one half of a DMA transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Memory to accelerator
    Send,
    /// Accelerator to memory
    Receive,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DmaFault {
    #[error("{0:?} channel timed out")]
    Timeout(Direction),

    #[error("{0}")]
    Device(String),
}

/// Register-level view of an accelerator with a send/receive DMA channel pair
///
/// The calls mirror the hardware handshake: queue the send, queue the receive,
/// then wait for both to report completion before reading the result back.
pub trait DmaDevice: Send {
    /// Load a configuration (bitstream) onto the device. On error the previously
    /// loaded configuration must still be active.
    fn load_configuration(&mut self, token: &ConfigToken) -> Result<(), DmaFault>;

    /// Start streaming `input` to the accelerator.
    fn start_send(&mut self, input: &[i32]) -> Result<(), DmaFault>;

    /// Start receiving `len` samples from the accelerator.
    fn start_receive(&mut self, len: usize) -> Result<(), DmaFault>;

    /// Block until `direction` completes or `timeout` passes.
    fn wait(&mut self, direction: Direction, timeout: Duration) -> Result<(), DmaFault>;

    /// Copy the completed receive into `output`.
    fn read_received(&mut self, output: &mut [i32]) -> Result<(), DmaFault>;
}

/// `TransferChannel` over a DMA-capable accelerator
///
/// Devices must reject a configuration before touching the loaded one, so a
/// failed `load_configuration` leaves the previous configuration running.
pub struct DmaChannel<D: DmaDevice> {
    device: D,
    loaded: Option<ConfigToken>,
}

impl<D: DmaDevice> DmaChannel<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            loaded: None,
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    fn handshake(
        &mut self,
        input: &[i32],
        output: &mut [i32],
        deadline: Instant,
    ) -> Result<(), DmaFault> {
        self.device.start_send(input)?;
        self.device.start_receive(output.len())?;

        let remaining = deadline.saturating_duration_since(Instant::now());
        self.device.wait(Direction::Send, remaining)?;
        let remaining = deadline.saturating_duration_since(Instant::now());
        self.device.wait(Direction::Receive, remaining)?;

        self.device.read_received(output)
    }
}

impl<D: DmaDevice> TransferChannel for DmaChannel<D> {
    fn reconfigure(&mut self, token: &ConfigToken) -> Result<(), SessionError> {
        self.device
            .load_configuration(token)
            .map_err(|e| SessionError::ChannelBind(format!("{}: {}", token, e)))?;
        self.loaded = Some(token.clone());
        Ok(())
    }

    fn transfer(
        &mut self,
        token: &ConfigToken,
        input: &[i32],
        output: &mut [i32],
        timeout: Duration,
    ) -> Result<Duration, SessionError> {
        if self.loaded.as_ref() != Some(token) {
            return Err(SessionError::Transfer(format!(
                "configuration {} is not loaded",
                token
            )));
        }
        if input.len() != output.len() {
            return Err(SessionError::Transfer(format!(
                "input has {} samples but output has {}",
                input.len(),
                output.len()
            )));
        }

        let start = Instant::now();
        match self.handshake(input, output, start + timeout) {
            Ok(()) => Ok(start.elapsed()),
            Err(DmaFault::Timeout(direction)) => {
                log::warn!("DMA {:?} did not complete within {:?}", direction, timeout);
                Err(SessionError::Timeout(timeout.as_secs_f64()))
            }
            Err(DmaFault::Device(msg)) => Err(SessionError::Transfer(msg)),
        }
    }
}
