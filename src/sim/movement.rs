use super::context::TickContext;
use super::system::SimSystem;
use crate::model::Position;

/// Largest random step per axis per tick.
pub const RANDOM_STEP: f64 = 1.0;
/// Agents closer than this push each other apart.
pub const REPULSION_RADIUS: f64 = 5.0;
/// Scale applied to the summed repulsion vector.
pub const REPULSION_SCALE: f64 = 0.5;

/// Random walk with short-range repulsion, clamped to the map.
///
/// Repulsion is computed against the positions at the start of the tick, so
/// the result does not depend on which agent moves first. The neighbour scan
/// is O(n^2) over active agents, fine at a few hundred citizens.
pub struct MovementSystem;

impl SimSystem for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let bounds = ctx.world.bounds;
        let positions: Vec<(u64, Position)> = ctx
            .world
            .active_agents()
            .map(|a| (a.id, a.position))
            .collect();

        let mut moves = Vec::with_capacity(positions.len());
        for &(id, pos) in &positions {
            let step_x = ctx.rng.symmetric(RANDOM_STEP);
            let step_y = ctx.rng.symmetric(RANDOM_STEP);
            let (push_x, push_y) = repulsion(id, pos, &positions);
            let next = Position::new(
                pos.x + step_x + push_x * REPULSION_SCALE,
                pos.y + step_y + push_y * REPULSION_SCALE,
            )
            .clamped(bounds.width, bounds.height);
            moves.push((id, next));
        }

        for (id, next) in moves {
            if let Some(agent) = ctx.world.agent_mut(id) {
                agent.position = next;
            }
        }
    }
}

/// Sum of unit vectors away from each neighbour within `REPULSION_RADIUS`,
/// each weighted by `1 / distance`. Coincident agents exert no force.
pub fn repulsion(self_id: u64, pos: Position, others: &[(u64, Position)]) -> (f64, f64) {
    let mut fx = 0.0;
    let mut fy = 0.0;
    for &(other_id, other) in others {
        if other_id == self_id {
            continue;
        }
        let dx = pos.x - other.x;
        let dy = pos.y - other.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist <= f64::EPSILON || dist >= REPULSION_RADIUS {
            continue;
        }
        // unit vector (dx/d, dy/d) scaled by 1/d
        fx += dx / (dist * dist);
        fy += dy / (dist * dist);
    }
    (fx, fy)
}
