use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::config::{SimConfig, clamp_tick_rate};
use crate::delta::TickDelta;
use crate::error::ConfigError;
use crate::id::IdGenerator;
use crate::model::{BoundedLog, HistorySnapshot, World};
use crate::notify::{self, NotificationOutbox};
use crate::rng::SimRng;
use crate::scoring::Scorer;
use crate::sim::{
    Signal, SimSystem, SnapshotManager, default_systems, dispatch_systems, generate_world,
    history, stability,
};

pub type SubscriptionId = u64;

/// Called synchronously, in subscription order, with every tick's delta.
pub type Listener = Box<dyn FnMut(Arc<TickDelta>) + Send>;

/// The tick orchestrator: sole owner and mutator of the world.
///
/// Each call to [`Engine::tick`] advances the clock by exactly one, runs the
/// subsystems in their fixed order, refreshes histories, stability and
/// snapshots, and hands subscribers one immutable delta.
pub struct Engine {
    config: SimConfig,
    world: World,
    rng: SimRng,
    systems: Vec<Box<dyn SimSystem>>,
    snapshots: SnapshotManager,
    subscribers: BTreeMap<SubscriptionId, Listener>,
    subscription_ids: IdGenerator,
    scorer: Option<Box<dyn Scorer>>,
    outbox: Option<NotificationOutbox>,
}

impl Engine {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let rng = SimRng::from_seed(config.seed);
        Self::with_rng(config, rng)
    }

    /// Build an engine around an injected random source. Genesis draws from
    /// it first, then every tick.
    pub fn with_rng(config: SimConfig, mut rng: SimRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = generate_world(&config, &mut rng);
        let snapshots = SnapshotManager::new(config.snapshot_interval, config.snapshot_capacity);
        tracing::info!(
            seed = rng.seed(),
            population = config.initial_population,
            "engine created"
        );
        Ok(Self {
            config,
            world,
            rng,
            systems: default_systems(),
            snapshots,
            subscribers: BTreeMap::new(),
            subscription_ids: IdGenerator::new(),
            scorer: None,
            outbox: None,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for scenario setup between ticks.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn snapshots(&self) -> &BoundedLog<HistorySnapshot> {
        self.snapshots.snapshots()
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = self.subscription_ids.next_id();
        self.subscribers.insert(id, listener);
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn set_scorer(&mut self, scorer: Box<dyn Scorer>) {
        self.scorer = Some(scorer);
    }

    pub fn clear_scorer(&mut self) {
        self.scorer = None;
    }

    pub fn attach_notifier(&mut self, outbox: NotificationOutbox) {
        self.outbox = Some(outbox);
    }

    /// Clamp and store a new wall-clock rate. Returns the rate in effect.
    /// A running [`TickDriver`](crate::TickDriver) picks it up after its next tick.
    pub fn set_tick_rate(&mut self, hz: f64) -> f64 {
        let rate = clamp_tick_rate(hz);
        self.world.clock.tick_rate_hz = rate;
        rate
    }

    pub fn tick_rate(&self) -> f64 {
        self.world.clock.tick_rate_hz
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.world.clock.is_running = running;
    }

    /// Regenerate the genesis world from the config and rewind the random
    /// source. Subscribers and collaborators stay attached.
    pub fn reset(&mut self) {
        let rate = self.world.clock.tick_rate_hz;
        let running = self.world.clock.is_running;
        self.rng.reseed();
        self.world = generate_world(&self.config, &mut self.rng);
        self.world.clock.tick_rate_hz = rate;
        self.world.clock.is_running = running;
        self.snapshots.clear();
        tracing::info!(seed = self.rng.seed(), "engine reset");
    }

    /// Advance the simulation by exactly one tick.
    pub fn tick(&mut self) -> Arc<TickDelta> {
        let tick = self.world.clock.advance();
        let first_new_log = self.world.ids.logs.peek();

        let mut signals =
            dispatch_systems(&mut self.world, &mut self.systems, &mut self.rng, &self.config);

        let births = count(&signals, |s| matches!(s, Signal::AgentBorn { .. }));
        let deaths = count(&signals, |s| matches!(s, Signal::AgentDied { .. }));
        history::record_samples(&mut self.world, births, deaths);
        signals.extend(stability::update(&mut self.world));

        let snapshot = self.snapshots.capture(&self.world);
        if let Some(snapshot) = &snapshot {
            tracing::info!(tick, id = %snapshot.id, "snapshot taken");
        }

        let mut delta = TickDelta::assemble(&self.world, &signals, first_new_log, snapshot);
        delta.scores = self.score(&delta);
        self.notify(&signals);

        let delta = Arc::new(delta);
        for listener in self.subscribers.values_mut() {
            listener(Arc::clone(&delta));
        }

        tracing::debug!(
            tick,
            active = delta.population.active,
            births,
            deaths,
            stability = self.world.clock.stability_index,
            mode = %self.world.clock.governance_mode,
            "tick complete"
        );
        delta
    }

    fn score(&self, delta: &TickDelta) -> Option<crate::scoring::ScoreCard> {
        let scorer = self.scorer.as_ref()?;
        match catch_unwind(AssertUnwindSafe(|| scorer.score(delta))) {
            Ok(Ok(card)) => Some(card),
            Ok(Err(err)) => {
                tracing::warn!(tick = delta.tick(), error = %err, "scoring failed");
                None
            }
            Err(_) => {
                tracing::warn!(tick = delta.tick(), "scorer panicked");
                None
            }
        }
    }

    fn notify(&self, signals: &[Signal]) {
        let Some(outbox) = &self.outbox else {
            return;
        };
        for signal in signals {
            if let Some(message) = notify::describe(signal, &self.world) {
                outbox.send(message);
            }
        }
    }
}

fn count(signals: &[Signal], pred: impl Fn(&Signal) -> bool) -> usize {
    signals.iter().filter(|s| pred(s)).count()
}
