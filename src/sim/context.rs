use super::signal::Signal;
use crate::config::SimConfig;
use crate::model::World;
use crate::rng::SimRng;

/// Context passed to each system on every tick.
///
/// Bundled so systems share one random source and one signal buffer without
/// the `SimSystem` trait signature growing.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut SimRng,
    pub config: &'a SimConfig,
    /// Systems push what happened this tick here; the orchestrator drains it.
    pub signals: &'a mut Vec<Signal>,
}

impl TickContext<'_> {
    pub fn tick(&self) -> u64 {
        self.world.clock.tick
    }

    pub fn emit(&mut self, signal: Signal) {
        self.signals.push(signal);
    }
}
