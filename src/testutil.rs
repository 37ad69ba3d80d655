use crate::config::SimConfig;
use crate::model::World;
use crate::rng::SimRng;
use crate::sim::{Signal, SimSystem, TickContext, generate_world};

// ---------------------------------------------------------------------------
// World builders
// ---------------------------------------------------------------------------

/// Default configuration with the given starting population.
pub fn test_config(population: u32) -> SimConfig {
    SimConfig {
        initial_population: population,
        max_population: population.max(500),
        ..SimConfig::default()
    }
}

/// A genesis world of `population` citizens drawn from `seed`.
pub fn test_world(population: u32, seed: u64) -> World {
    let config = SimConfig {
        seed,
        ..test_config(population)
    };
    let mut rng = SimRng::from_seed(seed);
    generate_world(&config, &mut rng)
}

// ---------------------------------------------------------------------------
// Tick execution helpers
// ---------------------------------------------------------------------------

/// Run one system once at the world's current tick with default config.
/// The clock is not advanced. Returns emitted signals.
pub fn tick_system(world: &mut World, system: &mut dyn SimSystem, seed: u64) -> Vec<Signal> {
    let config = test_config(world.population.initial_population);
    tick_system_with(world, system, &config, seed)
}

/// Run one system once with an explicit config. Returns emitted signals.
pub fn tick_system_with(
    world: &mut World,
    system: &mut dyn SimSystem,
    config: &SimConfig,
    seed: u64,
) -> Vec<Signal> {
    let mut rng = SimRng::from_seed(seed);
    let mut signals = Vec::new();
    let mut ctx = TickContext {
        world,
        rng: &mut rng,
        config,
        signals: &mut signals,
    };
    system.tick(&mut ctx);
    signals
}

// ---------------------------------------------------------------------------
// Assertions
// ---------------------------------------------------------------------------

pub fn assert_approx(actual: f64, expected: f64, epsilon: f64, what: &str) {
    assert!(
        (actual - expected).abs() < epsilon,
        "{what}: expected {expected}, got {actual}"
    );
}
