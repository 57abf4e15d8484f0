//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::LoadoutEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Equip, unequip, transfer, reclaim, curse and stat changes
    Loadout,
    /// Runtime item registration
    Catalog,
    /// Save and load
    Session,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Loadout, Topic::Catalog, Topic::Session];
}

struct Channels {
    loadout: broadcast::Sender<LoadoutEvent>,
    catalog: broadcast::Sender<LoadoutEvent>,
    session: broadcast::Sender<LoadoutEvent>,
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                loadout: broadcast::channel(capacity).0,
                catalog: broadcast::channel(capacity).0,
                session: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<LoadoutEvent> {
        match topic {
            Topic::Loadout => &self.channels.loadout,
            Topic::Catalog => &self.channels.catalog,
            Topic::Session => &self.channels.session,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: LoadoutEvent) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<LoadoutEvent> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<LoadoutEvent>> {
        topics
            .iter()
            .map(|topic| (*topic, self.subscribe(*topic)))
            .collect()
    }

    /// Number of active receivers on a topic
    pub fn receiver_count(&self, topic: Topic) -> usize {
        self.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_core::ItemHandle;

    #[test]
    fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut loadout = bus.subscribe(Topic::Loadout);
        let mut catalog = bus.subscribe(Topic::Catalog);

        bus.publish(LoadoutEvent::ItemRegistered {
            item: ItemHandle(100_000),
            name: "Etched Band".into(),
        });

        assert!(matches!(
            catalog.try_recv(),
            Ok(LoadoutEvent::ItemRegistered { .. })
        ));
        assert!(loadout.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(LoadoutEvent::SessionSaved {
            session_id: "default".into(),
        });
        assert_eq!(bus.receiver_count(Topic::Session), 0);

        let receivers = bus.subscribe_multiple(&Topic::ALL);
        assert_eq!(receivers.len(), 3);
        assert_eq!(bus.clone().receiver_count(Topic::Loadout), 1);
    }
}
