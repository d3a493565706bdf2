//! Fire-and-forget publisher wrapper.

use tracing::warn;

use crate::event::Event;
use crate::transport::EventTransport;

/// Publisher whose `publish` can never fail or block its caller.
///
/// This is a stated interface guarantee, not an incidental catch: ledger
/// operations emit lifecycle facts best-effort, and a broker outage must
/// never roll back or fail the originating write. A transport failure is
/// logged at `warn` and discarded (at-most-once delivery).
#[derive(Debug)]
pub struct BestEffortPublisher<T> {
    transport: T,
}

impl<T> BestEffortPublisher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn into_inner(self) -> T {
        self.transport
    }
}

impl<T> BestEffortPublisher<T> {
    /// Publish an event, swallowing (and logging) any transport failure.
    pub fn publish<M>(&self, message: M)
    where
        M: Event,
        T: EventTransport<M>,
    {
        let event_type = message.event_type();
        if let Err(err) = self.transport.publish(message) {
            warn!(event_type, error = ?err, "event publish failed; dropping event");
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::in_memory::InMemoryTransport;

    #[derive(Debug, Clone, PartialEq)]
    struct Ping(DateTime<Utc>);

    impl Event for Ping {
        fn event_type(&self) -> &'static str {
            "test.ping"
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn forwards_to_the_transport() {
        let transport = InMemoryTransport::new();
        let sub = transport.subscribe();
        let publisher = BestEffortPublisher::new(transport);

        let ping = Ping(Utc::now());
        publisher.publish(ping.clone());

        assert_eq!(sub.try_recv().unwrap(), ping);
    }

    #[test]
    fn transport_failure_does_not_surface() {
        let transport = InMemoryTransport::new();
        transport.reject_publishes(true);
        let publisher = BestEffortPublisher::new(transport);

        // Must not panic or return an error; the failure is logged only.
        publisher.publish(Ping(Utc::now()));
    }
}
