use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use firoffload::offload::{ConfigToken, Direction, DmaDevice, DmaFault, TransferChannel};
use firoffload::SessionError;

/// What a `ScriptedChannel` saw, shared with the test after the channel moves.
#[derive(Debug, Default)]
pub struct ScriptedLog {
    pub reconfigurations: Vec<String>,
    pub transfers: usize,
    pub calls: usize,
    pub overlapping: bool,
    in_transfer: bool,
}

/// Channel double with configurable behaviour
///
/// By default it echoes the input multiplied by `gain` (saturating at `i32`).
pub struct ScriptedChannel {
    pub log: Arc<Mutex<ScriptedLog>>,
    pub gain: i64,
    pub fixed_output: Option<Vec<i32>>,
    pub fail_bind: bool,
    pub fail_transfer: bool,
    pub reported_elapsed: Option<Duration>,
    pub delay: Duration,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(ScriptedLog::default())),
            gain: 1,
            fixed_output: None,
            fail_bind: false,
            fail_transfer: false,
            reported_elapsed: None,
            delay: Duration::ZERO,
        }
    }

    pub fn log(&self) -> Arc<Mutex<ScriptedLog>> {
        Arc::clone(&self.log)
    }
}

impl TransferChannel for ScriptedChannel {
    fn reconfigure(&mut self, token: &ConfigToken) -> Result<(), SessionError> {
        let mut log = self.log.lock().unwrap();
        log.calls += 1;
        if self.fail_bind {
            return Err(SessionError::ChannelBind(format!("cannot load {}", token)));
        }
        log.reconfigurations.push(token.to_string());
        Ok(())
    }

    fn transfer(
        &mut self,
        _token: &ConfigToken,
        input: &[i32],
        output: &mut [i32],
        _timeout: Duration,
    ) -> Result<Duration, SessionError> {
        {
            let mut log = self.log.lock().unwrap();
            log.calls += 1;
            if log.in_transfer {
                log.overlapping = true;
            }
            log.in_transfer = true;
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let result = if self.fail_transfer {
            Err(SessionError::Transfer("DMA error".to_string()))
        } else {
            match &self.fixed_output {
                Some(fixed) => output.copy_from_slice(&fixed[..output.len()]),
                None => {
                    for (out, &s) in output.iter_mut().zip(input) {
                        let v = (s as i64 * self.gain).clamp(i32::MIN as i64, i32::MAX as i64);
                        *out = v as i32;
                    }
                }
            }
            Ok(self.reported_elapsed.unwrap_or(self.delay))
        };

        let mut log = self.log.lock().unwrap();
        log.in_transfer = false;
        if result.is_ok() {
            log.transfers += 1;
        }
        result
    }
}

/// DMA device that echoes what it is sent. Loads can be made to fail.
#[derive(Debug, Default)]
pub struct LoopbackDevice {
    pub reject_load: bool,
    pub loads: usize,
    sent: Vec<i32>,
    receive_len: usize,
}

impl DmaDevice for LoopbackDevice {
    fn load_configuration(&mut self, token: &ConfigToken) -> Result<(), DmaFault> {
        if self.reject_load {
            return Err(DmaFault::Device(format!("{} rejected", token)));
        }
        self.loads += 1;
        Ok(())
    }

    fn start_send(&mut self, input: &[i32]) -> Result<(), DmaFault> {
        self.sent = input.to_vec();
        Ok(())
    }

    fn start_receive(&mut self, len: usize) -> Result<(), DmaFault> {
        self.receive_len = len;
        Ok(())
    }

    fn wait(&mut self, _direction: Direction, _timeout: Duration) -> Result<(), DmaFault> {
        Ok(())
    }

    fn read_received(&mut self, output: &mut [i32]) -> Result<(), DmaFault> {
        if self.receive_len != output.len() || self.sent.len() != output.len() {
            return Err(DmaFault::Device("length mismatch".to_string()));
        }
        output.copy_from_slice(&self.sent);
        Ok(())
    }
}
