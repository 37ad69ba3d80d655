#![allow(dead_code)]

use std::sync::Arc;

use polis_sim::{Engine, SimConfig, TickDelta};

pub fn config(seed: u64, population: u32) -> SimConfig {
    SimConfig {
        seed,
        initial_population: population,
        ..SimConfig::default()
    }
}

pub fn engine(seed: u64, population: u32) -> Engine {
    Engine::new(config(seed, population)).unwrap()
}

/// Tick `n` times, returning every delta.
pub fn run(engine: &mut Engine, n: u64) -> Vec<Arc<TickDelta>> {
    (0..n).map(|_| engine.tick()).collect()
}

/// Serialized deltas for byte-level comparison.
pub fn run_json(seed: u64, population: u32, n: u64) -> Vec<String> {
    let mut engine = engine(seed, population);
    run(&mut engine, n)
        .iter()
        .map(|d| serde_json::to_string(&**d).unwrap())
        .collect()
}
