//! In-order notification channel.
//!
//! Notices flow from the table state to the grid, and grid events flow from
//! the grid to its observers. Both ends are single-consumer and deliver in
//! send order.

use tokio::sync::mpsc;

/// Sender half of a notification channel.
#[derive(Debug)]
pub struct EventSender<E> {
    tx: mpsc::UnboundedSender<E>,
}

impl<E> Clone for EventSender<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E> EventSender<E> {
    /// Send an event.
    ///
    /// Non-blocking. Errors are ignored (receiver dropped = nobody listening).
    pub fn send(&self, event: E) {
        let _ = self.tx.send(event);
    }

    /// True once the receiver is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiver half of a notification channel.
#[derive(Debug)]
pub struct EventReceiver<E> {
    rx: mpsc::UnboundedReceiver<E>,
}

impl<E> EventReceiver<E> {
    /// Wait for the next event.
    pub async fn recv(&mut self) -> Option<E> {
        self.rx.recv().await
    }

    /// Take the next event if one is queued.
    pub fn try_recv(&mut self) -> Option<E> {
        self.rx.try_recv().ok()
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<E> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Create a new channel pair.
pub fn channel<E>() -> (EventSender<E>, EventReceiver<E>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, EventReceiver { rx })
}
