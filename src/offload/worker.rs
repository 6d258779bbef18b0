use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded};

use super::{
    AcceleratorBinding, ChannelProgress, LogProgress, OffloadResult, OffloadSession,
    ProgressObserver, ResultStore, TransferChannel,
};
use crate::audio::AudioBuffer;
use crate::error::SessionError;
use crate::signal_processing::FilterKind;

/// Capacity of the request queue. `submit` blocks while it is full.
const QUEUE_DEPTH: usize = 8;

enum Request {
    Apply {
        buffer: Option<Arc<AudioBuffer>>,
        filter: String,
        progress: Option<Sender<u8>>,
        reply: Sender<Result<OffloadResult, SessionError>>,
    },
    Latest {
        filter: FilterKind,
        reply: Sender<Option<OffloadResult>>,
    },
}

/// Serialized front end to one accelerator
///
/// A dedicated thread owns the session, the channel, its binding, and the result
/// store. Requests from any number of callers are queued and executed strictly
/// one after another, so the channel is never entered twice and the binding
/// always reflects what is really loaded.
pub struct OffloadWorker {
    tx: Option<Sender<Request>>,
    handle: Option<JoinHandle<()>>,
}

impl OffloadWorker {
    pub fn spawn<C>(session: OffloadSession, channel: C) -> Self
    where
        C: TransferChannel + 'static,
    {
        let (tx, rx) = bounded(QUEUE_DEPTH);
        let handle = thread::Builder::new()
            .name("offload-worker".to_string())
            .spawn(move || serve(session, channel, rx));

        match handle {
            Ok(handle) => Self {
                tx: Some(tx),
                handle: Some(handle),
            },
            Err(e) => {
                log::error!("Could not start offload worker: {}", e);
                Self {
                    tx: None,
                    handle: None,
                }
            }
        }
    }

    /// Queue a run and return the receiver its result will arrive on.
    ///
    /// Milestones are forwarded to `progress` if given.
    pub fn submit(
        &self,
        buffer: Option<Arc<AudioBuffer>>,
        filter: &str,
        progress: Option<Sender<u8>>,
    ) -> Receiver<Result<OffloadResult, SessionError>> {
        let (reply, rx) = bounded(1);
        let request = Request::Apply {
            buffer,
            filter: filter.to_string(),
            progress,
            reply: reply.clone(),
        };
        if !self.send(request) {
            let _ = reply.send(Err(SessionError::Transfer(
                "offload worker is not running".to_string(),
            )));
        }
        rx
    }

    /// Queue a run and wait for its result.
    pub fn apply(
        &self,
        buffer: Option<Arc<AudioBuffer>>,
        filter: &str,
    ) -> Result<OffloadResult, SessionError> {
        self.submit(buffer, filter, None)
            .recv()
            .unwrap_or_else(|_| Err(SessionError::Transfer("offload worker stopped".to_string())))
    }

    /// Latest stored result for `filter`, after all previously queued runs.
    pub fn latest(&self, filter: FilterKind) -> Option<OffloadResult> {
        let (reply, rx) = bounded(1);
        if !self.send(Request::Latest { filter, reply }) {
            return None;
        }
        rx.recv().ok().flatten()
    }

    fn send(&self, request: Request) -> bool {
        match &self.tx {
            Some(tx) => tx.send(request).is_ok(),
            None => false,
        }
    }
}

impl Drop for OffloadWorker {
    fn drop(&mut self) {
        // Closing the queue ends the worker loop once pending requests are served.
        self.tx.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            log::error!("Offload worker panicked");
        }
    }
}

fn serve<C: TransferChannel>(session: OffloadSession, mut channel: C, rx: Receiver<Request>) {
    let mut binding = AcceleratorBinding::new();
    let mut store = ResultStore::new();

    for request in rx {
        match request {
            Request::Apply {
                buffer,
                filter,
                progress,
                reply,
            } => {
                let mut observer: Box<dyn ProgressObserver> = match progress {
                    Some(tx) => Box::new(ChannelProgress::new(tx)),
                    None => Box::new(LogProgress),
                };
                let result = session.run(
                    buffer.as_deref(),
                    &filter,
                    &mut channel,
                    &mut binding,
                    observer.as_mut(),
                );
                match &result {
                    Ok(output) => {
                        store.put(output.filter(), output.clone());
                    }
                    Err(e) => log::error!("{} failed: {}", filter, e),
                }
                if reply.send(result).is_err() {
                    log::debug!("Caller stopped waiting for {}", filter);
                }
            }
            Request::Latest { filter, reply } => {
                let _ = reply.send(store.get(filter).cloned());
            }
        }
    }
    log::debug!("Offload worker exiting");
}
