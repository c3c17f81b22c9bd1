//! Polling substitute for a push channel on an order's chat.

use crate::MessageSource;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use kb_core::{Message, MessageId, OrderId, UserId};
use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const UPDATE_BUFFER: usize = 16;

/// Period used in place of a zero interval
const FALLBACK_INTERVAL: Duration = Duration::from_secs(kb_config::MIN_POLL_INTERVAL_SECS);

/// A changed chat history
#[derive(Debug, Clone, PartialEq)]
pub struct ChatUpdate {
    pub messages: Vec<Message>,
    /// True for the fetch made when the poller starts
    pub initial: bool,
    /// The newest message was written by someone other than the viewer
    pub newest_from_other: bool,
}

impl ChatUpdate {
    pub fn newest(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Whether to alert the viewer about a fresh incoming message
    pub fn should_alert(&self) -> bool {
        !self.initial && self.newest_from_other
    }
}

/// The other participant of a conversation, read off its first message
pub fn counterpart(messages: &[Message], viewer_id: UserId) -> Option<UserId> {
    messages.first().map(|first| {
        if first.sender_id == viewer_id {
            first.receiver_id
        } else {
            first.sender_id
        }
    })
}

/// Background task re-fetching one order's messages on a fixed interval.
///
/// The first fetch happens immediately; later ticks only fetch while
/// auto-refresh is on. Until one update has been published, ticks ignore the
/// auto-refresh gate and updates are marked `initial`. A zero interval is
/// replaced by the minimum poll interval. The task ends on `stop()`, on drop,
/// or when the receiving side goes away.
pub struct ChatPoller {
    auto_refresh: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl ChatPoller {
    pub fn spawn<M>(
        source: Arc<M>,
        order_id: OrderId,
        viewer_id: UserId,
        interval: Duration,
    ) -> (Self, mpsc::Receiver<ChatUpdate>)
    where
        M: MessageSource + ?Sized + 'static,
    {
        let interval = if interval.is_zero() {
            warn!(
                "Zero chat poll interval for order {}, using {:?}",
                order_id, FALLBACK_INTERVAL
            );
            FALLBACK_INTERVAL
        } else {
            interval
        };

        let (tx, rx) = mpsc::channel(UPDATE_BUFFER);
        let auto_refresh = Arc::new(AtomicBool::new(true));
        let gate = Arc::clone(&auto_refresh);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            let mut last_seen: Option<Option<MessageId>> = None;
            let mut initial = true;

            loop {
                ticker.tick().await;
                if !initial && !gate.load(Ordering::Relaxed) {
                    continue;
                }

                let messages = match source.messages_by_order(order_id).await {
                    Ok(messages) => messages,
                    Err(e) => {
                        warn!("Chat poll for order {} failed: {}", order_id, e);
                        continue;
                    }
                };

                let newest = messages.last().map(|message| message.id);
                if last_seen == Some(newest) {
                    continue;
                }
                last_seen = Some(newest);

                let update = ChatUpdate {
                    newest_from_other: messages
                        .last()
                        .is_some_and(|message| message.sender_id != viewer_id),
                    messages,
                    initial,
                };
                initial = false;

                if tx.send(update).await.is_err() {
                    debug!("Chat receiver for order {} closed", order_id);
                    break;
                }
            }
        });

        debug!("Chat poller started for order {} every {:?}", order_id, interval);

        (
            Self {
                auto_refresh,
                handle,
            },
            rx,
        )
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh.load(Ordering::Relaxed)
    }

    pub fn set_auto_refresh(&self, enabled: bool) {
        self.auto_refresh.store(enabled, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for ChatPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
