//! Event transport abstraction (pub/sub mechanics only).
//!
//! The transport is the fallible seam towards a broker. It makes minimal
//! assumptions: broadcast semantics, no persistence, no ordering guarantees
//! across publishers. Delivery is at-most-once from the ledger's point of
//! view; the ledger never retries a failed publish (see
//! [`crate::best_effort::BestEffortPublisher`]).

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to a transport's message stream.
///
/// Each subscription receives a copy of every message published after it was
/// created. Designed for single-threaded consumption.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic publish/subscribe transport.
///
/// `publish` may fail (broker down, channel full); whether that failure
/// matters is the caller's decision. The ledger service wraps transports in a
/// [`crate::best_effort::BestEffortPublisher`], which downgrades failures to a
/// log line by contract.
pub trait EventTransport<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, T> EventTransport<M> for Arc<T>
where
    T: EventTransport<M> + ?Sized,
{
    type Error = T::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
