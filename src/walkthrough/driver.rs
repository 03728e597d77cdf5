//! Real-time driver: a background thread that resumes the sequencer at its deadlines.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use crate::walkthrough::sequencer::SequencerHandle;

/// Re-check interval while the sequencer has no active run.
const IDLE_WAIT: Duration = Duration::from_millis(100);

pub type RenderRequester = Arc<dyn Fn() + Send + Sync>;

pub struct WalkthroughDriver {
    sequencer: SequencerHandle,
    render_requester: Option<RenderRequester>,
    stop_flag: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl WalkthroughDriver {
    pub fn new(sequencer: SequencerHandle, render_requester: Option<RenderRequester>) -> Self {
        Self {
            sequencer,
            render_requester,
            stop_flag: Arc::new(AtomicBool::new(false)),
            thread: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    /// Spawns the driver thread. A second call while running is a no-op.
    pub fn start(&mut self) -> io::Result<()> {
        if self.thread.is_some() {
            return Ok(());
        }

        self.stop_flag.store(false, Ordering::SeqCst);
        let stop_flag = Arc::clone(&self.stop_flag);
        let sequencer = self.sequencer.clone();
        let render_requester = self.render_requester.clone();

        let handle = thread::Builder::new()
            .name("walkthrough-driver".to_string())
            .spawn(move || {
                while !stop_flag.load(Ordering::SeqCst) {
                    let outcome = sequencer.poll();
                    if outcome.applied > 0 {
                        if let Some(request) = render_requester.as_ref() {
                            request();
                        }
                    }
                    match outcome.wait {
                        Some(wait) => thread::park_timeout(wait),
                        None => thread::park_timeout(IDLE_WAIT),
                    }
                }
            })?;

        debug!("walkthrough driver started");
        self.thread = Some(handle);
        Ok(())
    }

    /// Stops and joins the thread. A wait that was still pending simply never resumes.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            handle.thread().unpark();
            let _ = handle.join();
            debug!("walkthrough driver stopped");
        }
    }
}

impl Drop for WalkthroughDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
