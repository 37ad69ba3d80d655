use std::collections::BTreeMap;

use super::economy::{raw_production, recompute_inequality};
use super::factory;
use super::tables::{CONSTITUTION, ETHICS_FRAMEWORK_NAME, ETHICS_PRINCIPLES};
use crate::config::SimConfig;
use crate::id::IdRegistry;
use crate::model::{
    BoundedLog, Economy, EthicsFramework, PopulationState, ResourceKind, SimulationClock, World,
    WorldBounds,
};
use crate::rng::SimRng;

const STARTING_RESOURCES: [(ResourceKind, f64); 4] = [
    (ResourceKind::Food, 1000.0),
    (ResourceKind::Energy, 1000.0),
    (ResourceKind::Materials, 800.0),
    (ResourceKind::Technology, 200.0),
];

/// Build the genesis world: founding citizens, the constitution, the research
/// tree, the ethics charter, and the opening economy.
///
/// Draws from `rng` in a fixed order (agents only), so the same seed always
/// yields the same city.
pub fn generate_world(config: &SimConfig, rng: &mut SimRng) -> World {
    let bounds = WorldBounds {
        width: config.world_width,
        height: config.world_height,
    };
    let mut ids = IdRegistry::default();

    let agents = (0..config.initial_population)
        .map(|_| {
            let id = ids.agents.next_id();
            factory::genesis_agent(id, bounds, config.agent_log_capacity, rng)
        })
        .collect();

    let laws = (0..CONSTITUTION.len())
        .map(|i| factory::constitutional_law(ids.laws.next_id(), i))
        .collect();

    let ethics = EthicsFramework::new(
        ETHICS_FRAMEWORK_NAME.to_string(),
        ETHICS_PRINCIPLES.iter().map(|p| p.to_string()).collect(),
        config.log_capacity,
    );

    let economy = Economy {
        currency_supply: config.initial_currency_supply,
        taxation_level: 0.1,
        production_output: 0.0,
        production_multiplier: 1.0,
        baseline_production: 0.0,
        inequality_index: 0.0,
        resource_distribution: BTreeMap::from(STARTING_RESOURCES),
        market_events: BoundedLog::new(config.market_event_capacity),
        history: BoundedLog::new(config.history_capacity),
    };

    let population = PopulationState {
        initial_population: config.initial_population,
        max_population: config.max_population,
        birth_rate: config.birth_rate,
        total_births: 0,
        total_deaths: 0,
        history: BoundedLog::new(config.history_capacity),
    };

    let mut world = World {
        clock: SimulationClock::new(config.tick_rate_hz),
        bounds,
        agents,
        buildings: Vec::new(),
        laws,
        research: factory::research_tree(),
        ethics,
        economy,
        population,
        governance_logs: BoundedLog::new(config.log_capacity),
        ids,
    };

    let production = raw_production(&world);
    world.economy.production_output = production;
    world.economy.baseline_production = production;
    world.economy.inequality_index = recompute_inequality(&world);

    tracing::debug!(
        seed = config.seed,
        agents = world.agents.len(),
        production,
        "generated genesis world"
    );
    world
}
