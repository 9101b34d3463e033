//! Callbacks from the interpreter into its hosting front-end.

use crate::types::NodeId;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Fire-and-forget request to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellSignal {
    /// Open a file in the named editor application
    OpenFile { file_id: NodeId, app: String },
    /// Close the interpreter's window once `after` has elapsed
    CloseWindow { after: Duration },
}

pub trait ShellHost: Send + Sync {
    fn signal(&self, signal: ShellSignal);
}

/// Host that ignores every signal
pub struct NullHost;

impl ShellHost for NullHost {
    fn signal(&self, _signal: ShellSignal) {}
}

/// Host that queues signals for the front-end to drain after each command
#[derive(Clone, Default)]
pub struct SignalQueue {
    pending: Arc<Mutex<VecDeque<ShellSignal>>>,
}

impl SignalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<ShellSignal> {
        self.pending.lock().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl ShellHost for SignalQueue {
    fn signal(&self, signal: ShellSignal) {
        self.pending.lock().push_back(signal);
    }
}
