use super::context::TickContext;
use super::factory;
use super::signal::Signal;
use super::system::SimSystem;
use super::tables;
use crate::model::{LogKind, Role, Severity};

/// At most one building per tick, put up by an architect when the city has
/// any, otherwise by any active citizen.
pub struct ConstructionSystem;

impl SimSystem for ConstructionSystem {
    fn name(&self) -> &str {
        "construction"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let tick = ctx.tick();
        let architects: Vec<u64> = ctx
            .world
            .active_with_role(Role::Architect)
            .map(|a| a.id)
            .collect();
        let pool = if architects.is_empty() {
            ctx.world.active_ids()
        } else {
            architects
        };
        if pool.is_empty() {
            return;
        }

        let builder_id = pool[ctx.rng.index(pool.len())];
        let Some(builder) = ctx.world.agent(builder_id) else {
            return;
        };
        if !ctx.rng.chance(tables::role_def(builder.role).build_chance) {
            return;
        }
        let cost = factory::build_cost(ctx.rng);
        if builder.money < cost {
            return;
        }

        let building_id = ctx.world.ids.buildings.peek();
        let building = factory::new_building(
            building_id,
            builder,
            tick,
            cost,
            ctx.world.bounds,
            ctx.rng,
        );
        let message = format!("{} built {} for {cost:.0}", builder.name, building.name);

        ctx.world.ids.buildings.next_id();
        if let Some(builder) = ctx.world.agent_mut(builder_id) {
            builder.money -= cost;
            builder.log_activity(tick, format!("Built {}", building.name));
        }
        ctx.world.economy.currency_supply += cost;
        ctx.world.buildings.push(building);
        ctx.world.add_log(
            LogKind::Construction,
            Severity::Info,
            message,
            Some(builder_id),
        );
        tracing::trace!(building_id, builder_id, cost, "building constructed");
        ctx.emit(Signal::BuildingConstructed {
            building_id,
            builder_id,
        });
    }
}
