//! Event publishing plumbing (mechanics only).
//!
//! Domain event types live next to the aggregates that emit them; this crate
//! only provides the transport seam and the best-effort publisher wrapper.

pub mod best_effort;
pub mod event;
pub mod in_memory;
pub mod transport;

pub use best_effort::BestEffortPublisher;
pub use event::Event;
pub use in_memory::InMemoryTransport;
pub use transport::{EventTransport, Subscription};
