use super::context::TickContext;
use super::system::SimSystem;

/// Ages every active agent by one tick and pays `salary_base * productivity`
/// out of the currency supply.
///
/// The supply may dip below its floor here; the economy step restores it.
pub struct PayrollSystem;

impl SimSystem for PayrollSystem {
    fn name(&self) -> &str {
        "payroll"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let salary_base = ctx.config.salary_base;
        let mut paid = 0.0;
        for agent in ctx.world.agents.iter_mut().filter(|a| a.is_active()) {
            agent.age += 1;
            let wage = salary_base * agent.traits.productivity;
            agent.money += wage;
            paid += wage;
        }
        ctx.world.economy.currency_supply -= paid;
    }
}
