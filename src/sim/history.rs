use crate::model::{
    BoundedLog, HistorySnapshot, LawStatus, PopulationSample, ResearchStatus, World,
};

pub const SNAPSHOT_AGENT_SAMPLE: usize = 20;
pub const SNAPSHOT_BUILDING_SAMPLE: usize = 20;
pub const SNAPSHOT_LOG_SAMPLE: usize = 10;

/// Append this tick's population and economy rows to the rolling histories.
pub fn record_samples(world: &mut World, births: usize, deaths: usize) {
    let tick = world.tick();
    let sample = PopulationSample {
        tick,
        active: world.active_count(),
        births,
        deaths,
    };
    world.population.history.push(sample);
    let economy = world.economy.sample(tick);
    world.economy.history.push(economy);
}

/// Freeze the world's aggregates with a sample of the newest agents,
/// buildings and log entries.
pub fn take_snapshot(world: &World) -> HistorySnapshot {
    let tick = world.tick();
    let newest = |len: usize, cap: usize| len.saturating_sub(cap);
    HistorySnapshot {
        id: HistorySnapshot::id_for_tick(tick),
        tick,
        governance_mode: world.clock.governance_mode,
        stability_index: world.clock.stability_index,
        ethical_integrity: world.clock.ethical_integrity,
        active_population: world.active_count(),
        total_agents: world.agents.len(),
        building_count: world.buildings.len(),
        currency_supply: world.economy.currency_supply,
        production_output: world.economy.production_output,
        inequality_index: world.economy.inequality_index,
        taxation_level: world.economy.taxation_level,
        active_laws: world.laws_with_status(LawStatus::Active).count(),
        completed_research: world.research.count(ResearchStatus::Completed),
        agent_sample: world.agents[newest(world.agents.len(), SNAPSHOT_AGENT_SAMPLE)..].to_vec(),
        building_sample: world.buildings
            [newest(world.buildings.len(), SNAPSHOT_BUILDING_SAMPLE)..]
            .to_vec(),
        recent_logs: world
            .governance_logs
            .recent(SNAPSHOT_LOG_SAMPLE)
            .cloned()
            .collect(),
    }
}

/// Every `interval` ticks, freeze a snapshot into a fixed-capacity ring.
#[derive(Debug, Clone)]
pub struct SnapshotManager {
    interval: u64,
    ring: BoundedLog<HistorySnapshot>,
}

impl SnapshotManager {
    pub fn new(interval: u64, capacity: usize) -> Self {
        Self {
            interval: interval.max(1),
            ring: BoundedLog::new(capacity),
        }
    }

    /// Snapshot the world if this tick falls on the interval.
    pub fn capture(&mut self, world: &World) -> Option<HistorySnapshot> {
        let tick = world.tick();
        if tick == 0 || tick % self.interval != 0 {
            return None;
        }
        let snapshot = take_snapshot(world);
        if let Some(evicted) = self.ring.push(snapshot.clone()) {
            tracing::trace!(evicted = %evicted.id, "snapshot evicted");
        }
        Some(snapshot)
    }

    pub fn snapshots(&self) -> &BoundedLog<HistorySnapshot> {
        &self.ring
    }

    pub fn clear(&mut self) {
        self.ring.clear();
    }
}
