mod context;
mod runner;
mod signal;
mod system;

pub mod construction;
pub mod demographics;
pub mod economy;
pub mod ethics;
pub mod factory;
pub mod genesis;
pub mod governance;
pub mod history;
pub mod movement;
pub mod payroll;
pub mod research;
pub mod stability;
pub mod tables;

pub use construction::ConstructionSystem;
pub use context::TickContext;
pub use demographics::{BirthSystem, MortalitySystem};
pub use economy::EconomySystem;
pub use ethics::EthicsSystem;
pub use genesis::generate_world;
pub use governance::GovernanceSystem;
pub use history::{SnapshotManager, take_snapshot};
pub use movement::MovementSystem;
pub use payroll::PayrollSystem;
pub use research::ResearchSystem;
pub use runner::{default_systems, dispatch_systems};
pub use signal::Signal;
pub use system::SimSystem;
