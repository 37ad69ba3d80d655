use serde::{Deserialize, Serialize};

/// Monotonic ID generator for one entity family (agents, laws, logs...).
///
/// Each family keeps its own counter so ids stay dense and readable in the
/// emitted deltas. Counters are part of world state, so two worlds built from
/// the same seed hand out the same ids in the same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to `next_id` will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// One counter per entity family owned by the world.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdRegistry {
    pub agents: IdGenerator,
    pub buildings: IdGenerator,
    pub laws: IdGenerator,
    pub logs: IdGenerator,
    pub market_events: IdGenerator,
    pub ethics: IdGenerator,
}
