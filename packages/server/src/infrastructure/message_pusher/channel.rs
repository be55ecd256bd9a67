//! Channel-backed [`OutboundSink`] implementation.
//!
//! Every client gets its own bounded queue. The hub pushes with `try_send`, so a
//! peer that stops draining its queue only fills its own buffer and gets evicted
//! instead of stalling the fan-out for everyone else.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::{Notify, mpsc};

use crate::domain::{DeliveryError, Message, OutboundSink};

/// Close flag shared by both ends of a queue.
#[derive(Default)]
struct CloseSignal {
    closed: AtomicBool,
    notify: Notify,
}

impl CloseSignal {
    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            // notify_one stores a permit if the receiver is not waiting yet
            self.notify.notify_one();
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

/// Hub-facing end of a client's outbound queue.
pub struct ChannelSink {
    tx: mpsc::Sender<Message>,
    signal: Arc<CloseSignal>,
}

/// Session-facing end of a client's outbound queue.
pub struct OutboundReceiver {
    rx: mpsc::Receiver<Message>,
    signal: Arc<CloseSignal>,
}

impl ChannelSink {
    /// Create a queue holding at most `capacity` undelivered messages.
    ///
    /// A `capacity` of 0 is treated as 1.
    pub fn new(capacity: usize) -> (Self, OutboundReceiver) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let signal = Arc::new(CloseSignal::default());
        (
            Self {
                tx,
                signal: signal.clone(),
            },
            OutboundReceiver { rx, signal },
        )
    }
}

impl OutboundSink for ChannelSink {
    fn push(&self, message: &Message) -> Result<(), DeliveryError> {
        if self.signal.is_closed() {
            return Err(DeliveryError::Disconnected);
        }
        self.tx.try_send(message.clone()).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryError::BufferFull,
            mpsc::error::TrySendError::Closed(_) => DeliveryError::Disconnected,
        })
    }

    fn close(&self) {
        self.signal.close();
    }
}

impl OutboundReceiver {
    /// Wait for the next queued message.
    ///
    /// Returns `None` once the sink has been closed or every sender is gone.
    /// Messages still queued at close time are discarded.
    pub async fn recv(&mut self) -> Option<Message> {
        if self.signal.is_closed() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.signal.notify.notified() => None,
            message = self.rx.recv() => message,
        }
    }

    /// Close the queue from the session side so later pushes fail.
    pub fn close(&mut self) {
        self.signal.close();
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageId, Username};
    use chrono::Utc;

    fn create_test_message(id: u64) -> Message {
        Message {
            id: MessageId::new(id),
            username: Username::from("alice"),
            text: format!("message {}", id),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_push_then_recv() {
        // テスト項目: push したメッセージを受信側が順に受け取れる
        // given (前提条件):
        let (sink, mut receiver) = ChannelSink::new(4);

        // when (操作):
        sink.push(&create_test_message(1)).unwrap();
        sink.push(&create_test_message(2)).unwrap();

        // then (期待する結果):
        assert_eq!(receiver.recv().await.unwrap().id.value(), 1);
        assert_eq!(receiver.recv().await.unwrap().id.value(), 2);
    }

    #[tokio::test]
    async fn test_push_to_full_queue_fails() {
        // テスト項目: キューが満杯の場合は BufferFull で失敗する
        // given (前提条件):
        let (sink, _receiver) = ChannelSink::new(1);
        sink.push(&create_test_message(1)).unwrap();

        // when (操作):
        let result = sink.push(&create_test_message(2));

        // then (期待する結果):
        assert_eq!(result, Err(DeliveryError::BufferFull));
    }

    #[tokio::test]
    async fn test_push_after_receiver_dropped_fails() {
        // テスト項目: 受信側が破棄された後の push は Disconnected で失敗する
        // given (前提条件):
        let (sink, receiver) = ChannelSink::new(4);
        drop(receiver);

        // when (操作):
        let result = sink.push(&create_test_message(1));

        // then (期待する結果):
        assert_eq!(result, Err(DeliveryError::Disconnected));
    }

    #[tokio::test]
    async fn test_close_wakes_waiting_receiver() {
        // テスト項目: 待機中の受信側は close によって None を受け取る
        // given (前提条件):
        let (sink, mut receiver) = ChannelSink::new(4);
        let waiter = tokio::spawn(async move { receiver.recv().await });

        // when (操作):
        tokio::task::yield_now().await;
        sink.close();

        // then (期待する結果):
        assert!(waiter.await.unwrap().is_none());
        assert_eq!(
            sink.push(&create_test_message(1)),
            Err(DeliveryError::Disconnected)
        );
    }

    #[tokio::test]
    async fn test_close_before_recv_discards_queued_messages() {
        // テスト項目: close 後は未配信のメッセージがあっても None が返る
        // given (前提条件):
        let (sink, mut receiver) = ChannelSink::new(4);
        sink.push(&create_test_message(1)).unwrap();

        // when (操作):
        sink.close();
        sink.close();

        // then (期待する結果):
        assert!(receiver.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_receiver_close_rejects_pushes() {
        // テスト項目: 受信側から close すると以降の push は失敗する
        // given (前提条件):
        let (sink, mut receiver) = ChannelSink::new(4);

        // when (操作):
        receiver.close();

        // then (期待する結果):
        assert_eq!(
            sink.push(&create_test_message(1)),
            Err(DeliveryError::Disconnected)
        );
    }
}
