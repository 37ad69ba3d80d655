use super::context::TickContext;
use super::factory;
use super::signal::Signal;
use super::stability;
use super::system::SimSystem;
use crate::model::{GovernanceMode, LogKind, SelfCorrection, Severity};

/// Inequality above this triggers a redistribution.
pub const INTERVENTION_THRESHOLD: f64 = 0.5;
/// Inequality still above this after redistributing forces ETHICAL_OVERRIDE.
pub const OVERRIDE_THRESHOLD: f64 = 0.45;
pub const INEQUALITY_DECAY: f64 = 0.9;
pub const TAX_STEP: f64 = 0.02;
pub const MAX_TAXATION: f64 = 0.3;
pub const BLOCKED_ACTION_CHANCE: f64 = 0.005;
/// Self-corrections inside this many ticks count against integrity.
pub const INTEGRITY_WINDOW: u64 = 100;
pub const INTEGRITY_PENALTY: f64 = 0.05;
pub const MIN_INTEGRITY: f64 = 0.5;

/// Threshold-triggered redistribution, random vetoes, and the ethical
/// integrity score.
pub struct EthicsSystem;

impl SimSystem for EthicsSystem {
    fn name(&self) -> &str {
        "ethics"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let mode_target = if ctx.world.economy.inequality_index > INTERVENTION_THRESHOLD {
            let after = intervene(ctx);
            (after > OVERRIDE_THRESHOLD).then_some(GovernanceMode::EthicalOverride)
        } else {
            None
        };

        let current = ctx.world.clock.governance_mode;
        let signal = match mode_target {
            Some(to) => stability::change_mode(ctx.world, to, "inequality remains high"),
            None if current == GovernanceMode::EthicalOverride => stability::change_mode(
                ctx.world,
                GovernanceMode::Standard,
                "inequality back within bounds",
            ),
            None => None,
        };
        if let Some(signal) = signal {
            ctx.emit(signal);
        }

        if ctx.rng.chance(BLOCKED_ACTION_CHANCE) {
            block_action(ctx);
        }

        let tick = ctx.tick();
        let recent = ctx.world.ethics.corrections_within(tick, INTEGRITY_WINDOW);
        ctx.world.clock.ethical_integrity =
            (1.0 - INTEGRITY_PENALTY * recent as f64).max(MIN_INTEGRITY);
    }
}

/// Redistribute: decay inequality, raise taxes, log a self-correction.
/// Returns inequality after the intervention.
fn intervene(ctx: &mut TickContext) -> f64 {
    let tick = ctx.tick();
    let economy = &mut ctx.world.economy;
    let before = economy.inequality_index;
    let after = before * INEQUALITY_DECAY;
    economy.inequality_index = after;
    economy.taxation_level = (economy.taxation_level + TAX_STEP).min(MAX_TAXATION);
    let taxation = economy.taxation_level;

    let id = ctx.world.ids.ethics.next_id();
    ctx.world.ethics.intervention_count += 1;
    ctx.world.ethics.self_corrections.push(SelfCorrection {
        id,
        tick,
        trigger: format!("Inequality index {before:.3} above {INTERVENTION_THRESHOLD}"),
        action: format!("Progressive redistribution; taxation now {taxation:.2}"),
        inequality_before: before,
        inequality_after: after,
    });
    let message = format!("Self-correction: inequality {before:.3} -> {after:.3}");
    ctx.world.add_log(LogKind::SelfCorrection, Severity::Warning, message, None);
    tracing::info!(tick, before, after, taxation, "ethics intervention");
    ctx.emit(Signal::SelfCorrection { correction_id: id });
    after
}

fn block_action(ctx: &mut TickContext) {
    let tick = ctx.tick();
    let id = ctx.world.ids.ethics.next_id();
    let blocked = factory::blocked_action(id, tick, ctx.rng);
    let message = format!("Blocked: {} ({})", blocked.action, blocked.reason);
    ctx.world.ethics.blocked_actions.push(blocked);
    ctx.world.add_log(LogKind::BlockedAction, Severity::Critical, message, None);
    tracing::warn!(tick, blocked_id = id, "action blocked");
    ctx.emit(Signal::ActionBlocked { blocked_id: id });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn high_inequality_is_corrected() {
        let mut world = testutil::test_world(10, 1);
        world.economy.inequality_index = 0.6;
        world.economy.taxation_level = 0.1;
        world.clock.tick = 5;
        let signals = testutil::tick_system(&mut world, &mut EthicsSystem, 1);

        assert!((world.economy.inequality_index - 0.54).abs() < 1e-12);
        assert!((world.economy.taxation_level - 0.12).abs() < 1e-12);
        assert_eq!(world.ethics.intervention_count, 1);
        let correction = world.ethics.self_corrections.last().unwrap();
        assert_eq!(correction.tick, 5);
        assert_eq!(correction.inequality_before, 0.6);
        assert_eq!(world.clock.governance_mode, GovernanceMode::EthicalOverride);
        assert!(signals.contains(&Signal::GovernanceModeChanged {
            from: GovernanceMode::Standard,
            to: GovernanceMode::EthicalOverride,
        }));
        assert!((world.clock.ethical_integrity - 0.95).abs() < 1e-12);
    }

    #[test]
    fn taxation_is_capped() {
        let mut world = testutil::test_world(10, 2);
        world.economy.inequality_index = 0.9;
        world.economy.taxation_level = 0.29;
        testutil::tick_system(&mut world, &mut EthicsSystem, 2);
        assert_eq!(world.economy.taxation_level, MAX_TAXATION);
    }

    #[test]
    fn intervention_overrides_emergency() {
        // Any value above 0.5 is still above 0.45 after a 10% decay.
        let mut world = testutil::test_world(10, 3);
        world.clock.governance_mode = GovernanceMode::Emergency;
        world.economy.inequality_index = 0.501;
        testutil::tick_system(&mut world, &mut EthicsSystem, 3);
        assert_eq!(world.clock.governance_mode, GovernanceMode::EthicalOverride);
    }

    #[test]
    fn override_lifts_once_inequality_is_low() {
        let mut world = testutil::test_world(10, 4);
        world.clock.governance_mode = GovernanceMode::EthicalOverride;
        world.economy.inequality_index = 0.2;
        testutil::tick_system(&mut world, &mut EthicsSystem, 4);
        assert_eq!(world.clock.governance_mode, GovernanceMode::Standard);
        assert_eq!(world.ethics.intervention_count, 0);
    }

    #[test]
    fn emergency_is_left_alone() {
        let mut world = testutil::test_world(10, 5);
        world.clock.governance_mode = GovernanceMode::Emergency;
        world.economy.inequality_index = 0.2;
        testutil::tick_system(&mut world, &mut EthicsSystem, 5);
        assert_eq!(world.clock.governance_mode, GovernanceMode::Emergency);
    }

    #[test]
    fn integrity_floors_at_half() {
        let mut world = testutil::test_world(10, 6);
        for tick in 0..40 {
            world.clock.tick = tick;
            world.economy.inequality_index = 0.9;
            testutil::tick_system(&mut world, &mut EthicsSystem, tick);
        }
        assert_eq!(world.clock.ethical_integrity, MIN_INTEGRITY);
        world.clock.tick = 500;
        world.economy.inequality_index = 0.0;
        testutil::tick_system(&mut world, &mut EthicsSystem, 500);
        assert_eq!(world.clock.ethical_integrity, 1.0);
    }

    #[test]
    fn blocked_actions_are_critical() {
        let mut world = testutil::test_world(10, 7);
        let mut blocked = 0;
        for seed in 0..5_000 {
            for signal in testutil::tick_system(&mut world, &mut EthicsSystem, seed) {
                if let Signal::ActionBlocked { blocked_id } = signal {
                    blocked += 1;
                    let entry = world.ethics.blocked_actions.last().unwrap();
                    assert_eq!(entry.id, blocked_id);
                    assert_eq!(entry.severity, Severity::Critical);
                }
            }
        }
        assert!(blocked > 0);
        assert!(
            world
                .governance_logs
                .iter()
                .any(|l| l.kind == LogKind::BlockedAction && l.severity == Severity::Critical)
        );
    }
}
