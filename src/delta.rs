use serde::Serialize;

use crate::model::{
    Agent, Building, Economy, EthicsFramework, GovernanceLog, HistorySnapshot, Law,
    PopulationSample, ResearchTree, SimulationClock, World,
};
use crate::scoring::ScoreCard;
use crate::sim::Signal;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationSummary {
    pub active: usize,
    pub total: usize,
    pub deceased: usize,
    pub max_population: u32,
    pub birth_rate: f64,
    pub total_births: u64,
    pub total_deaths: u64,
    pub history: Vec<PopulationSample>,
}

/// Everything a subscriber sees after one tick: full current collections,
/// the tick's incremental changes, and optional scoring output.
///
/// Built from copies, so holding a delta never aliases engine state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickDelta {
    pub clock: SimulationClock,
    pub population: PopulationSummary,
    pub economy: Economy,
    pub agents: Vec<Agent>,
    pub buildings: Vec<Building>,
    pub new_agents: Vec<Agent>,
    /// Agents that left the active population this tick. They stay in `agents`.
    pub removed_agent_ids: Vec<u64>,
    pub new_laws: Vec<Law>,
    pub new_logs: Vec<GovernanceLog>,
    pub new_buildings: Vec<Building>,
    pub laws: Vec<Law>,
    pub logs: Vec<GovernanceLog>,
    pub research: ResearchTree,
    pub ethics: EthicsFramework,
    pub snapshot: Option<HistorySnapshot>,
    pub scores: Option<ScoreCard>,
}

impl TickDelta {
    /// Assemble the delta for the world's current tick. `first_new_log` is
    /// the first log id issued during this tick.
    pub fn assemble(
        world: &World,
        signals: &[Signal],
        first_new_log: u64,
        snapshot: Option<HistorySnapshot>,
    ) -> Self {
        let mut new_agents = Vec::new();
        let mut removed_agent_ids = Vec::new();
        let mut new_laws = Vec::new();
        let mut new_buildings = Vec::new();
        for signal in signals {
            match signal {
                Signal::AgentBorn { agent_id, .. } => {
                    new_agents.extend(world.agent(*agent_id).cloned());
                }
                Signal::AgentDied { agent_id, .. } => removed_agent_ids.push(*agent_id),
                Signal::LawEnacted { law_id } => {
                    new_laws.extend(world.laws.iter().find(|l| l.id == *law_id).cloned());
                }
                Signal::BuildingConstructed { building_id, .. } => {
                    new_buildings.extend(
                        world
                            .buildings
                            .iter()
                            .rev()
                            .find(|b| b.id == *building_id)
                            .cloned(),
                    );
                }
                _ => {}
            }
        }

        let active = world.active_count();
        let population = PopulationSummary {
            active,
            total: world.agents.len(),
            deceased: world.agents.len() - active,
            max_population: world.population.max_population,
            birth_rate: world.population.birth_rate,
            total_births: world.population.total_births,
            total_deaths: world.population.total_deaths,
            history: world.population.history.to_vec(),
        };

        TickDelta {
            clock: world.clock.clone(),
            population,
            economy: world.economy.clone(),
            agents: world.agents.clone(),
            buildings: world.buildings.clone(),
            new_agents,
            removed_agent_ids,
            new_laws,
            new_logs: world
                .governance_logs
                .iter()
                .filter(|l| l.id >= first_new_log)
                .cloned()
                .collect(),
            new_buildings,
            laws: world.laws.clone(),
            logs: world.governance_logs.to_vec(),
            research: world.research.clone(),
            ethics: world.ethics.clone(),
            snapshot,
            scores: None,
        }
    }

    pub fn tick(&self) -> u64 {
        self.clock.tick
    }
}
