use thiserror::Error;

/// Rejected engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_population must be greater than zero")]
    ZeroMaxPopulation,

    #[error("initial_population {initial} exceeds max_population {max}")]
    PopulationAboveMax { initial: u32, max: u32 },

    #[error("world dimensions must be positive (got {width} x {height})")]
    InvalidWorldSize { width: f64, height: f64 },

    #[error("{field} must be within [0, 1] (got {value})")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be non-negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("min_currency_supply {min} exceeds initial_currency_supply {initial}")]
    CurrencyFloorAboveSupply { min: f64, initial: f64 },

    #[error("{field} must be greater than zero")]
    ZeroCapacity { field: &'static str },

    #[error("invalid config json: {0}")]
    Parse(String),
}

/// Failure reported by an outbound notification collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("notification channel unavailable: {0}")]
    Unavailable(String),

    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Failure reported by a scoring collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("scoring failed: {0}")]
pub struct ScoreError(pub String);
