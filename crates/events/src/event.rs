//! Minimal contract for publishable domain events.

use chrono::{DateTime, Utc};

/// A domain event with a stable type discriminator.
///
/// The discriminator is what external consumers route on; keep the strings
/// stable once they have shipped.
pub trait Event: core::fmt::Debug {
    /// Stable, namespaced event type (e.g. `ledger.account.opened`).
    fn event_type(&self) -> &'static str;

    /// When the fact the event describes happened.
    fn occurred_at(&self) -> DateTime<Utc>;
}
