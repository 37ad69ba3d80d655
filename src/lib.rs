pub mod config;
pub mod delta;
pub mod engine;
pub mod error;
pub mod id;
pub mod model;
pub mod notify;
pub mod rng;
pub mod runtime;
pub mod scoring;
pub mod sim;

#[cfg(test)]
mod testutil;

pub use config::SimConfig;
pub use delta::{PopulationSummary, TickDelta};
pub use engine::{Engine, Listener, SubscriptionId};
pub use error::{ConfigError, NotifyError, ScoreError};
pub use id::IdGenerator;
pub use model::{
    Agent, Building, GovernanceMode, Law, LawStatus, ResearchNode, ResearchStatus, Role, World,
};
pub use notify::{NotificationOutbox, Notifier};
pub use rng::SimRng;
pub use runtime::TickDriver;
pub use scoring::{BaselineScorer, ScoreCard, Scorer};
