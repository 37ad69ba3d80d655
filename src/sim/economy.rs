use super::context::TickContext;
use super::factory;
use super::signal::Signal;
use super::system::SimSystem;
use crate::model::{LogKind, Role, Severity, World};

/// Output produced per unit of worker productivity.
pub const PRODUCTION_SCALE: f64 = 10.0;
/// Half-width of the relative currency noise per tick.
pub const CURRENCY_NOISE: f64 = 0.01;
/// Relative resource drift per tick lies in `[RESOURCE_DRIFT_LOW, RESOURCE_DRIFT_HIGH)`.
pub const RESOURCE_DRIFT_LOW: f64 = -0.02;
pub const RESOURCE_DRIFT_HIGH: f64 = 0.03;
pub const MARKET_EVENT_CHANCE: f64 = 0.02;

/// Production, currency, resources, inequality and market events.
pub struct EconomySystem;

impl SimSystem for EconomySystem {
    fn name(&self) -> &str {
        "economy"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let tick = ctx.tick();
        let floor = ctx.config.min_currency_supply;

        let production = raw_production(ctx.world);
        let economy = &mut ctx.world.economy;
        economy.production_output = production;

        let noise = ctx.rng.symmetric(CURRENCY_NOISE);
        economy.currency_supply = (economy.currency_supply * (1.0 + noise)).max(floor);

        for stock in economy.resource_distribution.values_mut() {
            let drift = ctx.rng.range(RESOURCE_DRIFT_LOW, RESOURCE_DRIFT_HIGH);
            *stock = (*stock * (1.0 + drift)).max(0.0);
        }

        let inequality = recompute_inequality(ctx.world);
        ctx.world.economy.inequality_index = inequality;

        if !ctx.rng.chance(MARKET_EVENT_CHANCE) {
            return;
        }
        let id = ctx.world.ids.market_events.next_id();
        let event = factory::market_event(id, tick, ctx.rng);
        ctx.world.economy.production_output *= event.magnitude;
        let message = format!(
            "Market {}: {} (output x{:.2})",
            event.kind, event.description, event.magnitude
        );
        let severity = if event.kind.is_shock() {
            Severity::Warning
        } else {
            Severity::Info
        };
        let (kind, magnitude) = (event.kind, event.magnitude);
        ctx.world.economy.market_events.push(event);
        ctx.world.add_log(LogKind::MarketEvent, severity, message, None);
        tracing::debug!(tick, kind = %kind, magnitude, "market event");
        ctx.emit(Signal::MarketShock {
            event_id: id,
            kind,
            magnitude,
        });
    }
}

/// Mean worker productivity times worker count, scaled and multiplied by the
/// compounded research bonus. Zero with no active workers.
pub fn raw_production(world: &World) -> f64 {
    let (count, total) = world
        .active_with_role(Role::Worker)
        .fold((0usize, 0.0), |(n, sum), a| (n + 1, sum + a.traits.productivity));
    if count == 0 {
        return 0.0;
    }
    let mean = total / count as f64;
    mean * count as f64 * PRODUCTION_SCALE * world.economy.production_multiplier
}

/// `(max - min) / (4 * mean)` over active agents' money, clamped to [0, 1].
/// Zero when there are no active agents or the mean is not positive.
pub fn recompute_inequality(world: &World) -> f64 {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for agent in world.active_agents() {
        count += 1;
        sum += agent.money;
        min = min.min(agent.money);
        max = max.max(agent.money);
    }
    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    if mean <= 0.0 {
        return 0.0;
    }
    ((max - min) / (4.0 * mean)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MarketEventKind;
    use crate::testutil;

    #[test]
    fn inequality_formula() {
        let mut world = testutil::test_world(4, 1);
        for (agent, money) in world.agents.iter_mut().zip([100.0, 200.0, 300.0, 400.0]) {
            agent.money = money;
        }
        // (400 - 100) / (4 * 250)
        assert!((recompute_inequality(&world) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn inequality_clamped_and_ignores_deceased() {
        let mut world = testutil::test_world(5, 1);
        for agent in world.agents.iter_mut() {
            agent.money = 0.0;
        }
        world.agents[4].money = 10_000.0;
        assert_eq!(recompute_inequality(&world), 1.0);
        world.agents[4].die(1);
        assert_eq!(recompute_inequality(&world), 0.0);
    }

    #[test]
    fn production_tracks_workers() {
        let mut world = testutil::test_world(4, 1);
        for agent in world.agents.iter_mut() {
            agent.role = Role::Worker;
            agent.traits.productivity = 0.5;
        }
        world.agents[3].role = Role::Merchant;
        world.economy.production_multiplier = 2.0;
        assert!((raw_production(&world) - 0.5 * 3.0 * PRODUCTION_SCALE * 2.0).abs() < 1e-9);
    }

    #[test]
    fn currency_floored_and_resources_non_negative() {
        let mut world = testutil::test_world(10, 2);
        world.economy.currency_supply = -5_000.0;
        for stock in world.economy.resource_distribution.values_mut() {
            *stock = 0.0;
        }
        let config = testutil::test_config(10);
        testutil::tick_system_with(&mut world, &mut EconomySystem, &config, 2);
        assert_eq!(world.economy.currency_supply, config.min_currency_supply);
        assert!(world.economy.resource_distribution.values().all(|v| *v >= 0.0));
    }

    #[test]
    fn market_events_are_capped_and_scale_output() {
        let mut world = testutil::test_world(30, 3);
        for agent in world.agents.iter_mut() {
            agent.role = Role::Worker;
        }
        let config = testutil::test_config(30);
        let mut events = 0;
        for seed in 0..2_000 {
            let signals = testutil::tick_system_with(&mut world, &mut EconomySystem, &config, seed);
            for signal in signals {
                if let Signal::MarketShock { magnitude, kind, .. } = signal {
                    events += 1;
                    let expected = raw_production(&world) * magnitude;
                    assert!((world.economy.production_output - expected).abs() < 1e-9);
                    assert!(MarketEventKind::ALL.contains(&kind));
                }
            }
        }
        assert!(events > 0);
        assert!(world.economy.market_events.len() <= config.market_event_capacity);
    }
}
