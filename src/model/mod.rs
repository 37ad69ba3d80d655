#[macro_use]
mod macros;

pub mod agent;
pub mod bounded;
pub mod building;
pub mod clock;
pub mod economy;
pub mod ethics;
pub mod law;
pub mod log;
pub mod research;
pub mod snapshot;
pub mod world;

pub use agent::{ActivityEntry, Agent, AgentStatus, LawImpact, Position, Role, Traits};
pub use bounded::BoundedLog;
pub use building::{Building, BuildingType};
pub use clock::{GovernanceMode, SimulationClock};
pub use economy::{Economy, EconomySample, MarketEvent, MarketEventKind, ResourceKind};
pub use ethics::{BlockedAction, EthicsFramework, SelfCorrection};
pub use law::{Law, LawAction, LawCategory, LawHistoryEntry, LawImpactMetrics, LawStatus};
pub use log::{GovernanceLog, LogKind, Severity};
pub use research::{ResearchNode, ResearchStatus, ResearchTree};
pub use snapshot::HistorySnapshot;
pub use world::{PopulationSample, PopulationState, World, WorldBounds};
