//! Bounded command channel between the interaction layer and the scheduler.
//!
//! Any number of [`CommandSender`]s may submit from other threads. Each
//! submission takes a monotonic arrival sequence number; the scheduler
//! drains the channel at the start of a tick and applies the commands
//! in arrival order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use ripple_core::{Command, IngressError};

/// Cloneable handle for submitting commands to a scheduler.
#[derive(Clone, Debug)]
pub struct CommandSender {
    tx: Sender<Command>,
    next_seq: Arc<AtomicU64>,
}

impl CommandSender {
    /// Queue a command for the next tick and return its arrival sequence.
    ///
    /// Never blocks: a full queue is reported as
    /// [`IngressError::QueueFull`], a dropped scheduler as
    /// [`IngressError::Disconnected`].
    pub fn submit(&self, command: impl Into<Command>) -> Result<u64, IngressError> {
        let mut command = command.into();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        command.arrival_seq = seq;
        self.tx.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => IngressError::QueueFull,
            TrySendError::Disconnected(_) => IngressError::Disconnected,
        })?;
        Ok(seq)
    }
}

/// Receiving end owned by the scheduler.
#[derive(Debug)]
pub(crate) struct CommandQueue {
    tx: Sender<Command>,
    rx: Receiver<Command>,
    next_seq: Arc<AtomicU64>,
}

impl CommandQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        Self {
            tx,
            rx,
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub(crate) fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
            next_seq: Arc::clone(&self.next_seq),
        }
    }

    /// Everything queued so far, sorted by arrival sequence.
    pub(crate) fn drain(&self) -> Vec<Command> {
        let mut commands: Vec<Command> = self.rx.try_iter().collect();
        commands.sort_by_key(|c| c.arrival_seq);
        commands
    }
}
