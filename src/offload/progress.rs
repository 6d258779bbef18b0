use crossbeam_channel::Sender;

/// Receives advisory progress milestones (percent, 0-100) from an offload run.
pub trait ProgressObserver {
    fn on_progress(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressObserver for F {
    fn on_progress(&mut self, percent: u8) {
        self(percent)
    }
}

/// Discards progress.
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _percent: u8) {}
}

/// Logs each milestone at debug level.
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&mut self, percent: u8) {
        log::debug!("Offload progress: {}%", percent);
    }
}

/// Forwards milestones to another thread, e.g. a UI progress bar.
///
/// Never blocks the run: milestones are dropped if the receiver is full or gone.
pub struct ChannelProgress {
    tx: Sender<u8>,
}

impl ChannelProgress {
    pub fn new(tx: Sender<u8>) -> Self {
        Self { tx }
    }
}

impl ProgressObserver for ChannelProgress {
    fn on_progress(&mut self, percent: u8) {
        if self.tx.try_send(percent).is_err() {
            log::trace!("Progress receiver unavailable, dropped {}%", percent);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |p: u8| seen.push(p);
            observer.on_progress(10);
            observer.on_progress(100);
        }
        assert_eq!(seen, vec![10, 100]);
    }

    #[test]
    fn test_channel_progress_drops_when_full() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut observer = ChannelProgress::new(tx);
        observer.on_progress(10);
        observer.on_progress(30);
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![10]);
    }

    #[test]
    fn test_channel_progress_survives_dropped_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        ChannelProgress::new(tx).on_progress(50);
    }
}
