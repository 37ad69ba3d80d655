use super::signal::Signal;
use crate::model::{GovernanceMode, LogKind, Severity, World};

/// Below this the city drops from STANDARD into EMERGENCY.
pub const EMERGENCY_THRESHOLD: f64 = 0.5;
/// Above this an EMERGENCY lifts back to STANDARD.
pub const RECOVERY_THRESHOLD: f64 = 0.7;

/// Equal-weight blend of population, economy, equality and ethics, in [0, 1].
pub fn stability_index(world: &World) -> f64 {
    let initial = world.population.initial_population.max(1) as f64;
    let pop_factor = (world.active_count() as f64 / initial).min(1.0);

    let economy = &world.economy;
    let econ_factor = if economy.baseline_production > 0.0 {
        (economy.production_output / economy.baseline_production).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let index = 0.25 * pop_factor
        + 0.25 * econ_factor
        + 0.25 * (1.0 - economy.inequality_index)
        + 0.25 * world.clock.ethical_integrity;
    if index.is_nan() {
        0.0
    } else {
        index.clamp(0.0, 1.0)
    }
}

/// Threshold transitions with a hysteresis band between the two thresholds.
/// Only STANDARD and EMERGENCY move here; other modes belong to ethics.
pub fn next_mode(current: GovernanceMode, stability: f64) -> GovernanceMode {
    match current {
        GovernanceMode::Standard if stability < EMERGENCY_THRESHOLD => GovernanceMode::Emergency,
        GovernanceMode::Emergency if stability > RECOVERY_THRESHOLD => GovernanceMode::Standard,
        mode => mode,
    }
}

/// Switch the governance mode, logging the change. `None` when already there.
pub fn change_mode(world: &mut World, to: GovernanceMode, reason: &str) -> Option<Signal> {
    let from = world.clock.governance_mode;
    if from == to {
        return None;
    }
    world.clock.governance_mode = to;
    let message = format!("Governance mode {from} -> {to}: {reason}");
    world.add_log(LogKind::ModeChange, Severity::Warning, message, None);
    tracing::warn!(tick = world.tick(), %from, %to, reason, "governance mode changed");
    Some(Signal::GovernanceModeChanged { from, to })
}

/// Recompute the stability index and apply any threshold transition.
pub fn update(world: &mut World) -> Option<Signal> {
    let stability = stability_index(world);
    world.clock.stability_index = stability;
    let to = next_mode(world.clock.governance_mode, stability);
    change_mode(world, to, &format!("stability {stability:.3}"))
}
