//! Entity factories. Pure functions of their arguments and the random source:
//! they build values but never touch the world.

use super::tables::{
    self, BLOCKED_ACTIONS, BUILDING_NAME_SUFFIXES, CONSTITUTION, NAME_PREFIXES, NAME_SURNAMES,
    RESEARCH_TREE, ROLES,
};
use crate::model::{
    Agent, AgentStatus, BlockedAction, BoundedLog, Building, BuildingType, Law, LawAction,
    LawCategory, LawHistoryEntry, LawImpactMetrics, LawStatus, MarketEvent, MarketEventKind,
    Position, ResearchNode, ResearchStatus, ResearchTree, Role, Severity, Traits, WorldBounds,
};
use crate::rng::SimRng;

/// Chance that each inherited trait mutates at birth.
pub const TRAIT_MUTATION_CHANCE: f64 = 0.2;
/// Largest single-trait mutation.
pub const TRAIT_MUTATION_DELTA: f64 = 0.1;

pub const MIN_BUILD_COST: f64 = 500.0;
pub const MAX_BUILD_COST: f64 = 1000.0;

/// Weighted draw from `(item, weight)` pairs. Panics on an empty table.
pub fn weighted_pick<T: Copy>(items: &[(T, u32)], rng: &mut SimRng) -> T {
    let total: u32 = items.iter().map(|(_, w)| *w).sum();
    let mut roll = rng.next_f64() * total as f64;
    for (item, weight) in items {
        let w = *weight as f64;
        if roll < w {
            return *item;
        }
        roll -= w;
    }
    items[items.len() - 1].0
}

pub fn pick_role(rng: &mut SimRng) -> Role {
    let weighted: Vec<(Role, u32)> = ROLES.iter().map(|d| (d.role, d.weight)).collect();
    weighted_pick(&weighted, rng)
}

pub fn person_name(rng: &mut SimRng) -> String {
    let prefix = NAME_PREFIXES[rng.index(NAME_PREFIXES.len())];
    let surname = NAME_SURNAMES[rng.index(NAME_SURNAMES.len())];
    format!("{prefix} {surname}")
}

pub fn pick<'a>(items: &'a [&'a str], rng: &mut SimRng) -> &'a str {
    items[rng.index(items.len())]
}

/// Fresh traits for a genesis agent, nudged by its role.
pub fn random_traits(role: Role, rng: &mut SimRng) -> Traits {
    let [p, c, k] = tables::role_def(role).trait_bias;
    Traits {
        productivity: (rng.range(0.3, 0.8) + p).clamp(0.0, 1.0),
        creativity: (rng.range(0.3, 0.8) + c).clamp(0.0, 1.0),
        compliance: (rng.range(0.3, 0.8) + k).clamp(0.0, 1.0),
        longevity: rng.range(0.2, 0.9),
        mutability: rng.range(0.1, 0.5),
    }
}

/// Traits for a newborn: the first parent's values, each independently
/// perturbed by a small symmetric delta at `TRAIT_MUTATION_CHANCE`.
pub fn inherit_traits(parent: &Traits, rng: &mut SimRng) -> Traits {
    let mut traits = *parent;
    for value in traits.values_mut() {
        if rng.chance(TRAIT_MUTATION_CHANCE) {
            *value = (*value + rng.symmetric(TRAIT_MUTATION_DELTA)).clamp(0.0, 1.0);
        }
    }
    traits
}

pub struct AgentSeed {
    pub id: u64,
    pub tick: u64,
    pub role: Role,
    pub position: Position,
    pub traits: Traits,
    pub parent_ids: Vec<u64>,
    pub money: f64,
}

pub fn new_agent(seed: AgentSeed, log_capacity: usize, rng: &mut SimRng) -> Agent {
    let name = person_name(rng);
    let title = pick(tables::role_def(seed.role).titles, rng).to_string();
    Agent {
        id: seed.id,
        name,
        title,
        created_at: seed.tick,
        role: seed.role,
        parent_ids: seed.parent_ids,
        child_ids: Vec::new(),
        age: 0,
        money: seed.money,
        position: seed.position,
        status: AgentStatus::Active,
        died_at: None,
        traits: seed.traits,
        activity_log: BoundedLog::new(log_capacity),
        law_impact: BoundedLog::new(log_capacity),
    }
}

/// A founding citizen placed uniformly on the map.
pub fn genesis_agent(id: u64, bounds: WorldBounds, log_capacity: usize, rng: &mut SimRng) -> Agent {
    let role = pick_role(rng);
    let traits = random_traits(role, rng);
    let position = random_position(bounds, rng);
    let money = rng.range(100.0, 1000.0);
    let mut agent = new_agent(
        AgentSeed {
            id,
            tick: 0,
            role,
            position,
            traits,
            parent_ids: Vec::new(),
            money,
        },
        log_capacity,
        rng,
    );
    agent.age = (rng.next_f64() * 400.0) as u64;
    agent
}

pub fn random_position(bounds: WorldBounds, rng: &mut SimRng) -> Position {
    Position::new(
        rng.next_f64() * bounds.width,
        rng.next_f64() * bounds.height,
    )
}

pub fn build_cost(rng: &mut SimRng) -> f64 {
    rng.range(MIN_BUILD_COST, MAX_BUILD_COST)
}

/// A building placed within a few tiles of its builder.
pub fn new_building(
    id: u64,
    builder: &Agent,
    tick: u64,
    cost: f64,
    bounds: WorldBounds,
    rng: &mut SimRng,
) -> Building {
    let building_type: BuildingType =
        weighted_pick(tables::role_def(builder.role).building_bias, rng);
    let position = Position::new(
        builder.position.x + rng.symmetric(3.0),
        builder.position.y + rng.symmetric(3.0),
    )
    .clamped(bounds.width, bounds.height);
    let size = 1 + rng.index(3) as u32;
    let productivity = rng.range(0.5, 1.5);
    let suffix = pick(BUILDING_NAME_SUFFIXES, rng);
    let type_name = building_type.as_str();
    let mut label = type_name[..1].to_string();
    label.push_str(&type_name[1..].to_lowercase());
    Building {
        id,
        building_type,
        name: format!("{label} {suffix} {id}"),
        position,
        size,
        built_by: builder.id,
        built_at: tick,
        cost,
        productivity,
    }
}

/// A law proposed by `governor_id`, enacted immediately as ACTIVE.
pub fn new_law(id: u64, tick: u64, governor_id: u64, rng: &mut SimRng) -> Law {
    let category = LawCategory::ALL[rng.index(LawCategory::ALL.len())];
    let template = tables::law_template(category);
    let title = pick(template.titles, rng);
    let description = pick(template.descriptions, rng);
    let impact = LawImpactMetrics {
        economic: rng.symmetric(1.0),
        social: rng.symmetric(1.0),
        ethical: rng.symmetric(1.0),
    };
    Law {
        id,
        title: format!("{title} #{id}"),
        description: description.to_string(),
        category,
        status: LawStatus::Active,
        is_constitutional: false,
        created_at: tick,
        proposed_by: Some(governor_id),
        impact,
        history: vec![LawHistoryEntry {
            tick,
            action: LawAction::Created,
            reason: format!("Proposed by governor {governor_id}"),
        }],
    }
}

/// The `index`th constitutional article. Its history holds exactly one entry.
pub fn constitutional_law(id: u64, index: usize) -> Law {
    let (title, description, category) = CONSTITUTION[index % CONSTITUTION.len()];
    Law {
        id,
        title: title.to_string(),
        description: description.to_string(),
        category,
        status: LawStatus::Active,
        is_constitutional: true,
        created_at: 0,
        proposed_by: None,
        impact: LawImpactMetrics {
            economic: 0.0,
            social: 0.5,
            ethical: 1.0,
        },
        history: vec![LawHistoryEntry {
            tick: 0,
            action: LawAction::Created,
            reason: "Founding constitution".to_string(),
        }],
    }
}

/// The research tree from the static table. Roots start AVAILABLE.
pub fn research_tree() -> ResearchTree {
    let nodes = RESEARCH_TREE
        .iter()
        .map(|def| ResearchNode {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            status: if def.prerequisite.is_none() {
                ResearchStatus::Available
            } else {
                ResearchStatus::Locked
            },
            progress: 0.0,
            prerequisites: def.prerequisite.map(str::to_string).into_iter().collect(),
            economy_effect: def.economy_effect,
            population_effect: def.population_effect,
            started_at: None,
            discovered_at: None,
            origin_ai: None,
        })
        .collect();
    ResearchTree { nodes }
}

pub fn market_event(id: u64, tick: u64, rng: &mut SimRng) -> MarketEvent {
    let kind = MarketEventKind::ALL[rng.index(MarketEventKind::ALL.len())];
    let (lo, hi, description) = tables::market_event_profile(kind);
    MarketEvent {
        id,
        tick,
        kind,
        magnitude: rng.range(lo, hi),
        description: description.to_string(),
    }
}

pub fn blocked_action(id: u64, tick: u64, rng: &mut SimRng) -> BlockedAction {
    let (action, reason) = BLOCKED_ACTIONS[rng.index(BLOCKED_ACTIONS.len())];
    BlockedAction {
        id,
        tick,
        action: action.to_string(),
        reason: reason.to_string(),
        severity: Severity::Critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> WorldBounds {
        WorldBounds {
            width: 100.0,
            height: 100.0,
        }
    }

    #[test]
    fn weighted_pick_respects_zero_weights() {
        let mut rng = SimRng::from_seed(1);
        for _ in 0..200 {
            assert_eq!(weighted_pick(&[("a", 0), ("b", 5)], &mut rng), "b");
        }
    }

    #[test]
    fn genesis_agents_are_in_bounds_and_active() {
        let mut rng = SimRng::from_seed(42);
        for id in 1..=100 {
            let agent = genesis_agent(id, bounds(), 10, &mut rng);
            assert_eq!(agent.id, id);
            assert!(agent.is_active());
            assert!((0.0..=100.0).contains(&agent.position.x));
            assert!((0.0..=100.0).contains(&agent.position.y));
            for v in [
                agent.traits.productivity,
                agent.traits.creativity,
                agent.traits.compliance,
                agent.traits.longevity,
                agent.traits.mutability,
            ] {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn inherited_traits_stay_near_parent() {
        let mut rng = SimRng::from_seed(3);
        let parent = Traits::uniform(0.4);
        let mut mutated = 0;
        for _ in 0..200 {
            let child = inherit_traits(&parent, &mut rng);
            assert!((child.productivity - 0.4).abs() <= TRAIT_MUTATION_DELTA + 1e-12);
            if child.productivity != 0.4 {
                mutated += 1;
            }
        }
        // roughly one in five
        assert!((10..=80).contains(&mutated), "mutated {mutated} of 200");
    }

    #[test]
    fn inherited_traits_clamp_to_unit_interval() {
        let mut rng = SimRng::from_seed(8);
        let top = Traits::uniform(1.0);
        for _ in 0..200 {
            let child = inherit_traits(&top, &mut rng);
            assert!(child.creativity <= 1.0);
        }
    }

    #[test]
    fn new_law_starts_active_with_created_entry() {
        let mut rng = SimRng::from_seed(5);
        let law = new_law(4, 120, 9, &mut rng);
        assert_eq!(law.status, LawStatus::Active);
        assert!(!law.is_constitutional);
        assert_eq!(law.history.len(), 1);
        assert_eq!(law.history[0].action, LawAction::Created);
        assert_eq!(law.proposed_by, Some(9));
        assert!(law.impact.economic.abs() <= 1.0);
    }

    #[test]
    fn research_roots_available_rest_locked() {
        let tree = research_tree();
        for node in &tree.nodes {
            if node.prerequisites.is_empty() {
                assert_eq!(node.status, ResearchStatus::Available);
            } else {
                assert_eq!(node.prerequisites.len(), 1);
                assert_eq!(node.status, ResearchStatus::Locked);
            }
        }
    }

    #[test]
    fn market_event_magnitude_in_profile() {
        let mut rng = SimRng::from_seed(13);
        for id in 0..100 {
            let event = market_event(id, 1, &mut rng);
            let (lo, hi, _) = tables::market_event_profile(event.kind);
            assert!(event.magnitude >= lo && event.magnitude < hi);
        }
    }

    #[test]
    fn building_near_builder() {
        let mut rng = SimRng::from_seed(21);
        let builder = genesis_agent(1, bounds(), 10, &mut rng);
        let cost = build_cost(&mut rng);
        assert!((MIN_BUILD_COST..MAX_BUILD_COST).contains(&cost));
        let building = new_building(1, &builder, 5, cost, bounds(), &mut rng);
        assert_eq!(building.built_by, builder.id);
        assert!(building.position.distance(&builder.position) <= 3.0 * 2f64.sqrt() + 1e-9);
        assert!((1..=3).contains(&building.size));
    }
}
