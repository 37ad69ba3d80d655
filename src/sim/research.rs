use super::context::TickContext;
use super::signal::Signal;
use super::system::SimSystem;
use crate::model::{LogKind, ResearchStatus, Role, Severity, World};

/// Advances the single in-flight project, or starts one when idle.
///
/// Progress per tick is `research_progress_rate * mean creativity * count`
/// over active researchers. With no researchers nothing moves.
pub struct ResearchSystem;

impl SimSystem for ResearchSystem {
    fn name(&self) -> &str {
        "research"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let (count, creativity) = ctx
            .world
            .active_with_role(Role::Researcher)
            .fold((0usize, 0.0), |(n, sum), a| (n + 1, sum + a.traits.creativity));
        if count == 0 {
            return;
        }
        match ctx.world.research.in_progress_index() {
            Some(idx) => {
                let mean = creativity / count as f64;
                let gain = ctx.config.research_progress_rate * mean * count as f64;
                advance(ctx, idx, gain);
            }
            None => start_project(ctx),
        }
    }
}

fn advance(ctx: &mut TickContext, idx: usize, gain: f64) {
    let tick = ctx.tick();
    let node = &mut ctx.world.research.nodes[idx];
    node.progress = (node.progress + gain).min(1.0);
    if node.progress < 1.0 {
        return;
    }

    let origin_ai = lead_researcher(ctx.world);
    let node = &mut ctx.world.research.nodes[idx];
    node.status = ResearchStatus::Completed;
    node.discovered_at = Some(tick);
    node.origin_ai = origin_ai;
    let node_id = node.id.clone();
    let name = node.name.clone();
    let (economy_effect, population_effect) = (node.economy_effect, node.population_effect);

    let unlocked = unlock_ready(ctx.world);

    let economy = &mut ctx.world.economy;
    economy.production_multiplier *= economy_effect;
    economy.production_output *= economy_effect;
    ctx.world.population.birth_rate *= population_effect;

    if let Some(agent) = origin_ai.and_then(|id| ctx.world.agent_mut(id)) {
        agent.log_activity(tick, format!("Led the {name} breakthrough"));
    }
    let message = if unlocked.is_empty() {
        format!("Research completed: {name}")
    } else {
        format!("Research completed: {name}; unlocked {}", unlocked.join(", "))
    };
    ctx.world.add_log(
        LogKind::ResearchCompleted,
        Severity::Info,
        message,
        origin_ai,
    );
    tracing::info!(tick, node = %node_id, ?origin_ai, "research completed");
    ctx.emit(Signal::ResearchCompleted {
        node_id,
        origin_ai,
        unlocked,
    });
}

/// The active researcher with the highest creativity; ties go to the lowest id.
fn lead_researcher(world: &World) -> Option<u64> {
    world
        .active_with_role(Role::Researcher)
        .fold(None, |best: Option<(u64, f64)>, a| match best {
            Some((_, c)) if c >= a.traits.creativity => best,
            _ => Some((a.id, a.traits.creativity)),
        })
        .map(|(id, _)| id)
}

/// Flip every LOCKED node whose prerequisites are all complete to AVAILABLE.
fn unlock_ready(world: &mut World) -> Vec<String> {
    let ready: Vec<usize> = world
        .research
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| {
            n.status == ResearchStatus::Locked && world.research.prerequisites_met(n)
        })
        .map(|(i, _)| i)
        .collect();
    ready
        .into_iter()
        .map(|i| {
            let node = &mut world.research.nodes[i];
            node.status = ResearchStatus::Available;
            node.id.clone()
        })
        .collect()
}

fn start_project(ctx: &mut TickContext) {
    let available: Vec<usize> = ctx
        .world
        .research
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, n)| n.status == ResearchStatus::Available)
        .map(|(i, _)| i)
        .collect();
    if available.is_empty() {
        return;
    }
    let tick = ctx.tick();
    let idx = available[ctx.rng.index(available.len())];
    let node = &mut ctx.world.research.nodes[idx];
    node.status = ResearchStatus::InProgress;
    node.started_at = Some(tick);
    let node_id = node.id.clone();
    let message = format!("Research started: {}", node.name);
    ctx.world.add_log(LogKind::ResearchStarted, Severity::Info, message, None);
    tracing::debug!(tick, node = %node_id, "research started");
    ctx.emit(Signal::ResearchStarted { node_id });
}
