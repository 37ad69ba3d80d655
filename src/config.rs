use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const MIN_TICK_RATE_HZ: f64 = 0.1;
pub const MAX_TICK_RATE_HZ: f64 = 10.0;

/// Clamp a requested tick rate into the supported range.
/// NaN falls back to 1 Hz.
pub fn clamp_tick_rate(rate: f64) -> f64 {
    if rate.is_nan() {
        return 1.0;
    }
    rate.clamp(MIN_TICK_RATE_HZ, MAX_TICK_RATE_HZ)
}

/// Configuration for one simulated city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for deterministic runs.
    pub seed: u64,
    /// Agents created at genesis.
    pub initial_population: u32,
    /// Hard cap on simultaneously active agents.
    pub max_population: u32,
    /// Map width in abstract tile units.
    pub world_width: f64,
    /// Map height in abstract tile units.
    pub world_height: f64,
    /// Expected births per active agent per tick.
    pub birth_rate: f64,
    /// Per-tick death probability for a newborn with zero longevity.
    pub base_death_rate: f64,
    /// Money paid per tick to an agent with productivity 1.0.
    pub salary_base: f64,
    pub initial_currency_supply: f64,
    /// Currency supply never drops below this after the economy step.
    pub min_currency_supply: f64,
    /// Research progress per tick per researcher at creativity 1.0.
    pub research_progress_rate: f64,
    /// Wall-clock ticks per second when driven by a `TickDriver`.
    pub tick_rate_hz: f64,
    /// Freeze a history snapshot every N ticks.
    pub snapshot_interval: u64,
    pub history_capacity: usize,
    pub log_capacity: usize,
    pub snapshot_capacity: usize,
    pub market_event_capacity: usize,
    /// Cap on each agent's activity log and law impact list.
    pub agent_log_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            initial_population: 50,
            max_population: 500,
            world_width: 100.0,
            world_height: 100.0,
            birth_rate: 0.01,
            base_death_rate: 0.0005,
            salary_base: 10.0,
            initial_currency_supply: 100_000.0,
            min_currency_supply: 10_000.0,
            research_progress_rate: 0.002,
            tick_rate_hz: 1.0,
            snapshot_interval: 10,
            history_capacity: 500,
            log_capacity: 500,
            snapshot_capacity: 1000,
            market_event_capacity: 50,
            agent_log_capacity: 50,
        }
    }
}

impl SimConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse a JSON document (missing fields take defaults) and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_population == 0 {
            return Err(ConfigError::ZeroMaxPopulation);
        }
        if self.initial_population > self.max_population {
            return Err(ConfigError::PopulationAboveMax {
                initial: self.initial_population,
                max: self.max_population,
            });
        }
        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return Err(ConfigError::InvalidWorldSize {
                width: self.world_width,
                height: self.world_height,
            });
        }
        for (field, value) in [
            ("birth_rate", self.birth_rate),
            ("base_death_rate", self.base_death_rate),
            ("research_progress_rate", self.research_progress_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { field, value });
            }
        }
        for (field, value) in [
            ("salary_base", self.salary_base),
            ("min_currency_supply", self.min_currency_supply),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.min_currency_supply > self.initial_currency_supply {
            return Err(ConfigError::CurrencyFloorAboveSupply {
                min: self.min_currency_supply,
                initial: self.initial_currency_supply,
            });
        }
        if self.snapshot_interval == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "snapshot_interval",
            });
        }
        for (field, value) in [
            ("history_capacity", self.history_capacity),
            ("log_capacity", self.log_capacity),
            ("snapshot_capacity", self.snapshot_capacity),
            ("market_event_capacity", self.market_event_capacity),
            ("agent_log_capacity", self.agent_log_capacity),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCapacity { field });
            }
        }
        Ok(())
    }
}
