//! # Simulated Typing Delay
//!
//! File: cli/src/commands/chat/typing.rs
//!
//! ## Overview
//!
//! Replies are computed the moment a message is submitted, so the session
//! context changes in submission order. Showing them is deferred by a delay
//! proportional to the reply length, capped at a maximum.
//!
//! A single `Typist` task delivers replies one after another, which keeps
//! them in order even when a short reply follows a long one. Every reply is
//! stamped with the current epoch; `cancel_pending` bumps the epoch, which
//! interrupts a reply that is mid-delay and drops anything still queued.
//!
use crate::core::config::ChatConfig;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

/// Delay policy: `min(base + len / chars_per_second seconds, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    enabled: bool,
    base_ms: u64,
    chars_per_second: u64,
    max_ms: u64,
}

impl TypingDelay {
    pub fn from_config(config: &ChatConfig) -> Self {
        Self {
            enabled: config.typing_delay,
            base_ms: config.base_delay_ms,
            chars_per_second: config.chars_per_second.max(1),
            max_ms: config.max_delay_ms,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::from_config(&ChatConfig::default())
        }
    }

    pub fn for_reply(&self, reply: &str) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let chars = reply.chars().count() as u64;
        let typing_ms = chars.saturating_mul(1000) / self.chars_per_second;
        Duration::from_millis(self.base_ms.saturating_add(typing_ms).min(self.max_ms))
    }
}

#[derive(Debug)]
struct Pending {
    epoch: u64,
    text: String,
    delay: Duration,
}

/// Handle to the delivery task. Dropping it lets the task finish the queue.
#[derive(Debug)]
pub struct Typist {
    queue: mpsc::UnboundedSender<Pending>,
    epoch: watch::Sender<u64>,
}

impl Typist {
    /// Starts the delivery task; replies that survive their delay go to `out`.
    pub fn spawn(out: mpsc::UnboundedSender<String>) -> (Self, JoinHandle<()>) {
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let (epoch_tx, epoch_rx) = watch::channel(0u64);
        let handle = tokio::spawn(deliver(queue_rx, epoch_rx, out));
        (
            Self {
                queue: queue_tx,
                epoch: epoch_tx,
            },
            handle,
        )
    }

    pub fn schedule(&self, text: String, delay: Duration) {
        let pending = Pending {
            epoch: *self.epoch.borrow(),
            text,
            delay,
        };
        if self.queue.send(pending).is_err() {
            debug!("typist task is gone; reply dropped");
        }
    }

    /// Invalidates every reply scheduled so far.
    pub fn cancel_pending(&self) {
        self.epoch.send_modify(|e| *e += 1);
        debug!(epoch = *self.epoch.borrow(), "pending replies cancelled");
    }
}

async fn deliver(
    mut queue: mpsc::UnboundedReceiver<Pending>,
    mut epoch: watch::Receiver<u64>,
    out: mpsc::UnboundedSender<String>,
) {
    while let Some(pending) = queue.recv().await {
        if pending.epoch != *epoch.borrow() {
            debug!("dropping stale reply");
            continue;
        }

        if !pending.delay.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(pending.delay) => {}
                _ = epoch_moved(&mut epoch, pending.epoch) => {
                    debug!("reply cancelled while typing");
                    continue;
                }
            }
        }

        if pending.epoch != *epoch.borrow() {
            continue;
        }
        if out.send(pending.text).is_err() {
            break;
        }
    }
}

/// Resolves once the epoch differs from `from`. Never resolves after the
/// sender is gone.
async fn epoch_moved(epoch: &mut watch::Receiver<u64>, from: u64) {
    loop {
        if epoch.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        if *epoch.borrow_and_update() != from {
            return;
        }
    }
}
