use super::context::TickContext;

/// A pluggable subsystem the orchestrator runs once per tick.
///
/// Object-safe so systems can be stored as `Box<dyn SimSystem>`. Systems run
/// in registration order and share the tick's single random source, so the
/// order they are registered in is part of the determinism contract.
pub trait SimSystem: Send {
    fn name(&self) -> &str;
    fn tick(&mut self, ctx: &mut TickContext);
}
