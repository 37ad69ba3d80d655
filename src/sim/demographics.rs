use std::f64::consts::TAU;

use super::context::TickContext;
use super::factory::{self, AgentSeed};
use super::signal::Signal;
use super::system::SimSystem;
use crate::model::{LogKind, Position, Severity, World};
use crate::rng::SimRng;

/// Minimum chance of one extra birth per tick, so small cities keep growing.
pub const SMALL_POPULATION_BONUS: f64 = 0.1;

/// Spawn ring around the first parent.
pub const SPAWN_RING_MIN: f64 = 2.0;
pub const SPAWN_RING_MAX: f64 = 5.0;
/// Ring placements tried before falling back to a random map position.
pub const RING_ATTEMPTS: usize = 5;
/// After this many attempts the last candidate is accepted as-is.
pub const MAX_SPAWN_ATTEMPTS: usize = 10;
pub const CROWD_RADIUS: f64 = 2.0;
/// A spot with this many active agents within `CROWD_RADIUS` is crowded.
pub const CROWD_LIMIT: usize = 3;

/// Age at which the quadratic mortality term doubles the base risk.
pub const MORTALITY_AGE_SCALE: f64 = 1000.0;

/// Sexual reproduction between random active pairs, capped by the city's
/// remaining capacity.
pub struct BirthSystem;

impl SimSystem for BirthSystem {
    fn name(&self) -> &str {
        "births"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let tick = ctx.tick();
        let parents = ctx.world.active_ids();
        let active = parents.len();
        if active == 0 {
            return;
        }
        let capacity = (ctx.world.population.max_population as usize).saturating_sub(active);
        let births = birth_count(active, ctx.world.population.birth_rate, capacity, ctx.rng);

        for _ in 0..births {
            let first = parents[ctx.rng.index(active)];
            let second = parents[ctx.rng.index(active)];
            let (Some(a), Some(_)) = (ctx.world.agent(first), ctx.world.agent(second)) else {
                continue;
            };
            let (parent_traits, origin) = (a.traits, a.position);

            let traits = factory::inherit_traits(&parent_traits, ctx.rng);
            let role = factory::pick_role(ctx.rng);
            let position = spawn_position(ctx.world, origin, ctx.rng);
            let id = ctx.world.ids.agents.next_id();
            let mut parent_ids = vec![first, second];
            parent_ids.dedup();
            let child = factory::new_agent(
                AgentSeed {
                    id,
                    tick,
                    role,
                    position,
                    traits,
                    parent_ids: parent_ids.clone(),
                    money: 0.0,
                },
                ctx.config.agent_log_capacity,
                ctx.rng,
            );
            let message = format!("{} ({}) was born", child.name, child.role);
            ctx.world.add_agent(child);

            for parent_id in parent_ids {
                if let Some(parent) = ctx.world.agent_mut(parent_id) {
                    parent.child_ids.push(id);
                    parent.log_activity(tick, format!("Welcomed child {id}"));
                }
            }

            ctx.world.population.total_births += 1;
            ctx.world.add_log(LogKind::Birth, Severity::Info, message, Some(id));
            tracing::trace!(agent_id = id, first, second, "agent born");
            ctx.emit(Signal::AgentBorn {
                agent_id: id,
                parent_ids: [first, second],
            });
        }
    }
}

/// Births this tick: the whole part of `active * birth_rate`, plus one more
/// with probability `max(fractional part, SMALL_POPULATION_BONUS)`, never
/// exceeding `capacity`.
pub fn birth_count(active: usize, birth_rate: f64, capacity: usize, rng: &mut SimRng) -> usize {
    if capacity == 0 {
        return 0;
    }
    let expected = active as f64 * birth_rate;
    let mut births = expected.floor() as usize;
    if rng.chance(expected.fract().max(SMALL_POPULATION_BONUS)) {
        births += 1;
    }
    births.min(capacity)
}

fn crowded(world: &World, spot: Position) -> bool {
    world
        .active_agents()
        .filter(|a| a.position.distance(&spot) < CROWD_RADIUS)
        .take(CROWD_LIMIT)
        .count()
        >= CROWD_LIMIT
}

/// Place a newborn on a ring around `origin`; if the ring keeps landing in
/// crowded spots, try random map positions; accept the final try regardless.
pub fn spawn_position(world: &World, origin: Position, rng: &mut SimRng) -> Position {
    let bounds = world.bounds;
    let mut candidate = origin;
    for attempt in 0..MAX_SPAWN_ATTEMPTS {
        candidate = if attempt < RING_ATTEMPTS {
            let angle = rng.next_f64() * TAU;
            let radius = rng.range(SPAWN_RING_MIN, SPAWN_RING_MAX);
            Position::new(
                origin.x + radius * angle.cos(),
                origin.y + radius * angle.sin(),
            )
            .clamped(bounds.width, bounds.height)
        } else {
            factory::random_position(bounds, rng)
        };
        if !crowded(world, candidate) {
            break;
        }
    }
    candidate
}

/// Age- and longevity-dependent mortality.
pub struct MortalitySystem;

impl SimSystem for MortalitySystem {
    fn name(&self) -> &str {
        "mortality"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let tick = ctx.tick();
        let base = ctx.config.base_death_rate;
        let candidates: Vec<(u64, f64)> = ctx
            .world
            .active_agents()
            .map(|a| (a.id, death_probability(base, a.age, a.traits.longevity)))
            .collect();

        for (id, p) in candidates {
            if !ctx.rng.chance(p) {
                continue;
            }
            let Some(agent) = ctx.world.agent_mut(id) else {
                continue;
            };
            if !agent.die(tick) {
                continue;
            }
            let age = agent.age;
            let message = format!("{} died at age {age}", agent.name);
            ctx.world.population.total_deaths += 1;
            ctx.world.add_log(LogKind::Death, Severity::Info, message, Some(id));
            tracing::trace!(agent_id = id, age, "agent died");
            ctx.emit(Signal::AgentDied { agent_id: id, age });
        }
    }
}

/// `base * (1 + (age / 1000)^2) * (1 - longevity / 2)`, clamped to [0, 1].
pub fn death_probability(base: f64, age: u64, longevity: f64) -> f64 {
    let age_factor = 1.0 + (age as f64 / MORTALITY_AGE_SCALE).powi(2);
    (base * age_factor * (1.0 - longevity.clamp(0.0, 1.0) * 0.5)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AgentStatus;
    use crate::testutil;

    #[test]
    fn death_probability_grows_with_age() {
        let young = death_probability(0.001, 0, 0.0);
        let old = death_probability(0.001, 1000, 0.0);
        assert!((young - 0.001).abs() < 1e-15);
        assert!((old - 0.002).abs() < 1e-15);
    }

    #[test]
    fn longevity_halves_risk_at_most() {
        let frail = death_probability(0.01, 100, 0.0);
        let hardy = death_probability(0.01, 100, 1.0);
        assert!((hardy - frail * 0.5).abs() < 1e-15);
    }

    #[test]
    fn birth_count_respects_capacity() {
        let mut rng = SimRng::from_seed(1);
        for _ in 0..100 {
            assert!(birth_count(400, 0.5, 3, &mut rng) <= 3);
            assert_eq!(birth_count(400, 0.5, 0, &mut rng), 0);
        }
    }

    #[test]
    fn birth_count_has_bonus_at_small_sizes() {
        let mut rng = SimRng::from_seed(2);
        let total: usize = (0..1000).map(|_| birth_count(2, 0.0, 100, &mut rng)).sum();
        assert!(total > 0, "bonus term should yield occasional births");
    }

    #[test]
    fn births_link_parents_and_children() {
        let mut world = testutil::test_world(20, 7);
        world.population.birth_rate = 0.5;
        let signals = testutil::tick_system(&mut world, &mut BirthSystem, 7);
        assert!(world.agents.len() > 20);
        assert_eq!(signals.len(), world.agents.len() - 20);
        for child in &world.agents[20..] {
            assert!(!child.parent_ids.is_empty());
            for parent_id in &child.parent_ids {
                let parent = world.agent(*parent_id).unwrap();
                assert!(parent.child_ids.contains(&child.id));
            }
        }
    }

    #[test]
    fn newborns_take_traits_from_first_parent() {
        let mut world = testutil::test_world(20, 8);
        world.population.birth_rate = 0.5;
        testutil::tick_system(&mut world, &mut BirthSystem, 8);
        assert!(world.agents.len() > 20);
        for child in &world.agents[20..] {
            let parent = world.agent(child.parent_ids[0]).unwrap();
            let pairs = [
                (child.traits.productivity, parent.traits.productivity),
                (child.traits.creativity, parent.traits.creativity),
                (child.traits.compliance, parent.traits.compliance),
                (child.traits.longevity, parent.traits.longevity),
                (child.traits.mutability, parent.traits.mutability),
            ];
            for (mine, theirs) in pairs {
                assert!((mine - theirs).abs() <= factory::TRAIT_MUTATION_DELTA + 1e-12);
            }
        }
    }

    #[test]
    fn births_never_exceed_max_population() {
        let mut world = testutil::test_world(20, 9);
        world.population.birth_rate = 1.0;
        world.population.max_population = 25;
        for seed in 0..5 {
            testutil::tick_system(&mut world, &mut BirthSystem, seed);
        }
        assert_eq!(world.active_count(), 25);
    }

    #[test]
    fn spawn_lands_on_ring_when_space_is_free() {
        let mut world = testutil::test_world(1, 11);
        world.agents[0].position = Position::new(90.0, 90.0);
        let mut rng = SimRng::from_seed(3);
        let origin = Position::new(50.0, 50.0);
        for _ in 0..50 {
            let d = spawn_position(&world, origin, &mut rng).distance(&origin);
            assert!((SPAWN_RING_MIN - 1e-9..=SPAWN_RING_MAX + 1e-9).contains(&d));
        }
    }

    #[test]
    fn spawn_falls_back_when_ring_is_crowded() {
        // 21x21 grid with unit spacing covering [40, 60]^2
        let mut world = testutil::test_world(441, 11);
        for (i, agent) in world.agents.iter_mut().enumerate() {
            agent.position = Position::new(40.0 + (i % 21) as f64, 40.0 + (i / 21) as f64);
        }
        let mut rng = SimRng::from_seed(3);
        let origin = Position::new(50.0, 50.0);
        let spot = spawn_position(&world, origin, &mut rng);
        assert!(!crowded(&world, spot));
        assert!(spot.distance(&origin) > SPAWN_RING_MAX);
    }

    #[test]
    fn spawn_accepts_last_try_when_everything_is_crowded() {
        let mut world = testutil::test_world(121, 12);
        world.bounds.width = 10.0;
        world.bounds.height = 10.0;
        for (i, agent) in world.agents.iter_mut().enumerate() {
            agent.position = Position::new((i % 11) as f64, (i / 11) as f64);
        }
        let mut rng = SimRng::from_seed(4);
        let spot = spawn_position(&world, Position::new(5.0, 5.0), &mut rng);
        assert!(crowded(&world, spot));
        assert!((0.0..=10.0).contains(&spot.x) && (0.0..=10.0).contains(&spot.y));
    }

    #[test]
    fn mortality_marks_deceased_and_keeps_agents() {
        let mut world = testutil::test_world(30, 5);
        let config = crate::config::SimConfig {
            base_death_rate: 1.0,
            ..testutil::test_config(30)
        };
        let signals = testutil::tick_system_with(&mut world, &mut MortalitySystem, &config, 5);
        assert_eq!(world.agents.len(), 30);
        let dead = world
            .agents
            .iter()
            .filter(|a| a.status == AgentStatus::Deceased)
            .count();
        assert_eq!(dead, signals.len());
        assert!(dead > 0);
        assert!(world.agents.iter().filter(|a| !a.is_active()).all(|a| a.died_at.is_some()));
    }
}
