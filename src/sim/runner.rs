use super::construction::ConstructionSystem;
use super::context::TickContext;
use super::demographics::{BirthSystem, MortalitySystem};
use super::economy::EconomySystem;
use super::ethics::EthicsSystem;
use super::governance::GovernanceSystem;
use super::movement::MovementSystem;
use super::payroll::PayrollSystem;
use super::research::ResearchSystem;
use super::signal::Signal;
use super::system::SimSystem;
use crate::config::SimConfig;
use crate::model::World;
use crate::rng::SimRng;

/// The city's subsystems in their fixed run order.
///
/// Movement, births, deaths, aging and pay, construction, economy,
/// governance, research, then ethics. Stability and history are recomputed by
/// the engine after these have all run.
pub fn default_systems() -> Vec<Box<dyn SimSystem>> {
    vec![
        Box::new(MovementSystem),
        Box::new(BirthSystem),
        Box::new(MortalitySystem),
        Box::new(PayrollSystem),
        Box::new(ConstructionSystem),
        Box::new(EconomySystem),
        Box::new(GovernanceSystem),
        Box::new(ResearchSystem),
        Box::new(EthicsSystem),
    ]
}

/// Run every system once, in registration order, against the current tick.
///
/// Signals are single-pass: systems see each other's effects on the world,
/// never each other's signals. The caller receives the whole tick's signals
/// in emission order.
pub fn dispatch_systems(
    world: &mut World,
    systems: &mut [Box<dyn SimSystem>],
    rng: &mut SimRng,
    config: &SimConfig,
) -> Vec<Signal> {
    let mut signals = Vec::new();
    for system in systems.iter_mut() {
        let before = signals.len();
        let mut ctx = TickContext {
            world,
            rng,
            config,
            signals: &mut signals,
        };
        system.tick(&mut ctx);
        tracing::trace!(
            system = system.name(),
            signals = signals.len() - before,
            "system ticked"
        );
    }
    signals
}
