//! Topic-based event delivery for loadout changes.
//!
//! Every successful or rejected roster operation publishes a [`LoadoutEvent`].
//! Delivery is best-effort: events published without subscribers are dropped.
mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::LoadoutEvent;
