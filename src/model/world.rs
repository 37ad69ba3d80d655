use serde::{Deserialize, Serialize};

use super::agent::{Agent, Role};
use super::bounded::BoundedLog;
use super::building::Building;
use super::clock::SimulationClock;
use super::economy::Economy;
use super::ethics::EthicsFramework;
use super::law::{Law, LawStatus};
use super::log::{GovernanceLog, LogKind, Severity};
use super::research::ResearchTree;
use crate::id::IdRegistry;

/// One row of the rolling population history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationSample {
    pub tick: u64,
    pub active: usize,
    pub births: usize,
    pub deaths: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationState {
    pub initial_population: u32,
    pub max_population: u32,
    /// Live birth rate; research breakthroughs compound into it.
    pub birth_rate: f64,
    pub total_births: u64,
    pub total_deaths: u64,
    pub history: BoundedLog<PopulationSample>,
}

/// Map extent in tile units. Positions live in `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f64,
    pub height: f64,
}

/// All authoritative state of one simulated city.
///
/// Agents are never removed: deceased agents stay for lineage queries, and an
/// agent with id `n` always sits at index `n - 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub clock: SimulationClock,
    pub bounds: WorldBounds,
    pub agents: Vec<Agent>,
    pub buildings: Vec<Building>,
    pub laws: Vec<Law>,
    pub research: ResearchTree,
    pub ethics: EthicsFramework,
    pub economy: Economy,
    pub population: PopulationState,
    pub governance_logs: BoundedLog<GovernanceLog>,
    pub ids: IdRegistry,
}

impl World {
    pub fn tick(&self) -> u64 {
        self.clock.tick
    }

    pub fn agent(&self, id: u64) -> Option<&Agent> {
        let idx = usize::try_from(id).ok()?.checked_sub(1)?;
        self.agents.get(idx).filter(|a| a.id == id)
    }

    pub fn agent_mut(&mut self, id: u64) -> Option<&mut Agent> {
        let idx = usize::try_from(id).ok()?.checked_sub(1)?;
        self.agents.get_mut(idx).filter(|a| a.id == id)
    }

    /// Append a newly created agent. Its id must be the next in sequence.
    pub fn add_agent(&mut self, agent: Agent) {
        debug_assert_eq!(
            agent.id as usize,
            self.agents.len() + 1,
            "add_agent: agent ids must be dense"
        );
        self.agents.push(agent);
    }

    pub fn active_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active_agents().count()
    }

    /// Ids of active agents in id order.
    pub fn active_ids(&self) -> Vec<u64> {
        self.active_agents().map(|a| a.id).collect()
    }

    pub fn active_with_role(&self, role: Role) -> impl Iterator<Item = &Agent> {
        self.active_agents().filter(move |a| a.role == role)
    }

    pub fn laws_with_status(&self, status: LawStatus) -> impl Iterator<Item = &Law> {
        self.laws.iter().filter(move |l| l.status == status)
    }

    /// Append a governance log entry, escalating its severity for the current
    /// governance mode. Returns the entry id.
    pub fn add_log(
        &mut self,
        kind: LogKind,
        severity: Severity,
        message: String,
        agent_id: Option<u64>,
    ) -> u64 {
        let id = self.ids.logs.next_id();
        let severity = severity.under_mode(kind, self.clock.governance_mode);
        self.governance_logs.push(GovernanceLog {
            id,
            tick: self.clock.tick,
            kind,
            severity,
            message,
            agent_id,
        });
        id
    }
}
