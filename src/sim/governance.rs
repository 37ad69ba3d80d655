use super::context::TickContext;
use super::factory;
use super::signal::Signal;
use super::system::SimSystem;
use super::tables;
use crate::model::{LawImpact, LawStatus, LogKind, Role, Severity};

pub const LAW_CREATION_CHANCE: f64 = 0.01;
/// Chance per tick that one active law comes up for review.
pub const LAW_REVIEW_CHANCE: f64 = 0.05;
pub const REPEAL_AGE: u64 = 500;
pub const REPEAL_CHANCE: f64 = 0.3;
pub const DEPRECATE_AGE: u64 = 200;
pub const DEPRECATE_CHANCE: f64 = 0.1;

/// Law creation by governors and age-driven law retirement.
///
/// Only ACTIVE, non-constitutional laws are reviewed, so a DEPRECATED law is
/// never reviewed again and never reaches REPEALED.
pub struct GovernanceSystem;

impl SimSystem for GovernanceSystem {
    fn name(&self) -> &str {
        "governance"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        enact_law(ctx);
        review_law(ctx);
    }
}

fn enact_law(ctx: &mut TickContext) {
    let tick = ctx.tick();
    let governors: Vec<u64> = ctx
        .world
        .active_with_role(Role::Governor)
        .map(|a| a.id)
        .collect();
    if governors.is_empty() || !ctx.rng.chance(LAW_CREATION_CHANCE) {
        return;
    }
    let governor_id = governors[ctx.rng.index(governors.len())];
    let law_id = ctx.world.ids.laws.next_id();
    let law = factory::new_law(law_id, tick, governor_id, ctx.rng);

    let affected = tables::law_template(law.category).affected_roles;
    let effect = ((law.impact.economic + law.impact.social) / 2.0).clamp(-1.0, 1.0);
    for agent in ctx
        .world
        .agents
        .iter_mut()
        .filter(|a| a.is_active() && affected.contains(&a.role))
    {
        agent.law_impact.push(LawImpact {
            law_id,
            tick,
            effect,
        });
    }

    let message = format!("Enacted {} ({})", law.title, law.category);
    tracing::info!(tick, law_id, title = %law.title, "law enacted");
    ctx.world.laws.push(law);
    ctx.world.add_log(
        LogKind::LawEnacted,
        Severity::Info,
        message,
        Some(governor_id),
    );
    ctx.emit(Signal::LawEnacted { law_id });
}

fn review_law(ctx: &mut TickContext) {
    let tick = ctx.tick();
    if !ctx.rng.chance(LAW_REVIEW_CHANCE) {
        return;
    }
    let candidates: Vec<usize> = ctx
        .world
        .laws
        .iter()
        .enumerate()
        .filter(|(_, l)| !l.is_constitutional && l.status == LawStatus::Active)
        .map(|(i, _)| i)
        .collect();
    if candidates.is_empty() {
        return;
    }
    let idx = candidates[ctx.rng.index(candidates.len())];
    let age = ctx.world.laws[idx].age(tick);

    let (to, reason, kind, severity) = if age > REPEAL_AGE {
        if !ctx.rng.chance(REPEAL_CHANCE) {
            return;
        }
        (
            LawStatus::Repealed,
            format!("Repealed after {age} ticks in force"),
            LogKind::LawRepealed,
            Severity::Warning,
        )
    } else if age > DEPRECATE_AGE {
        if !ctx.rng.chance(DEPRECATE_CHANCE) {
            return;
        }
        (
            LawStatus::Deprecated,
            format!("Deprecated after {age} ticks in force"),
            LogKind::LawDeprecated,
            Severity::Info,
        )
    } else {
        return;
    };

    let law = &mut ctx.world.laws[idx];
    let from = law.status;
    if !law.transition(to, tick, reason) {
        return;
    }
    let law_id = law.id;
    let message = format!("{} is now {to}", law.title);
    tracing::info!(tick, law_id, from = %from, to = %to, "law transitioned");
    ctx.world.add_log(kind, severity, message, None);
    ctx.emit(Signal::LawTransitioned { law_id, from, to });
}
