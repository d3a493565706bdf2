//! In-memory transport for tests/dev.

use std::sync::{Mutex, mpsc};

use crate::transport::{EventTransport, Subscription};

#[derive(Debug)]
pub enum InMemoryTransportError {
    /// Publish failed due to internal lock poisoning.
    Poisoned,
    /// Publish was rejected on purpose (failure-injection for tests).
    Rejected,
}

/// In-memory pub/sub transport.
///
/// - No IO / no async
/// - Best-effort fan-out; dead subscribers are dropped while publishing
/// - Can be switched into a rejecting mode to exercise publish-failure paths
#[derive(Debug)]
pub struct InMemoryTransport<M> {
    subscribers: Mutex<Vec<mpsc::Sender<M>>>,
    reject: std::sync::atomic::AtomicBool,
}

impl<M> Default for InMemoryTransport<M> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            reject: std::sync::atomic::AtomicBool::new(false),
        }
    }
}

impl<M> InMemoryTransport<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent publish fail with `Rejected`.
    pub fn reject_publishes(&self, reject: bool) {
        self.reject.store(reject, std::sync::atomic::Ordering::SeqCst);
    }
}

impl<M> EventTransport<M> for InMemoryTransport<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryTransportError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        if self.reject.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(InMemoryTransportError::Rejected);
        }

        let mut subs = self
            .subscribers
            .lock()
            .map_err(|_| InMemoryTransportError::Poisoned)?;

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(message.clone()).is_ok());

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive messages until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_to_every_live_subscriber() {
        let transport: InMemoryTransport<u32> = InMemoryTransport::new();
        let a = transport.subscribe();
        let b = transport.subscribe();

        transport.publish(7).unwrap();

        assert_eq!(a.try_recv().unwrap(), 7);
        assert_eq!(b.try_recv().unwrap(), 7);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let transport: InMemoryTransport<u32> = InMemoryTransport::new();
        let keep = transport.subscribe();
        drop(transport.subscribe());

        transport.publish(1).unwrap();
        transport.publish(2).unwrap();

        assert_eq!(keep.try_recv().unwrap(), 1);
        assert_eq!(keep.try_recv().unwrap(), 2);
    }

    #[test]
    fn rejecting_mode_fails_publishes() {
        let transport: InMemoryTransport<u32> = InMemoryTransport::new();
        transport.reject_publishes(true);
        assert!(matches!(
            transport.publish(1),
            Err(InMemoryTransportError::Rejected)
        ));
    }
}
