use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::building::Building;
use super::clock::GovernanceMode;
use super::log::GovernanceLog;

/// Periodic, read-only freeze of the city's aggregates with a capped sample
/// of its most recent agents, buildings and log entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    /// `"snapshot-<tick>"`.
    pub id: String,
    pub tick: u64,
    pub governance_mode: GovernanceMode,
    pub stability_index: f64,
    pub ethical_integrity: f64,
    pub active_population: usize,
    pub total_agents: usize,
    pub building_count: usize,
    pub currency_supply: f64,
    pub production_output: f64,
    pub inequality_index: f64,
    pub taxation_level: f64,
    pub active_laws: usize,
    pub completed_research: usize,
    pub agent_sample: Vec<Agent>,
    pub building_sample: Vec<Building>,
    pub recent_logs: Vec<GovernanceLog>,
}

impl HistorySnapshot {
    pub fn id_for_tick(tick: u64) -> String {
        format!("snapshot-{tick}")
    }
}
