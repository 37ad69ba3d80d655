use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::delta::TickDelta;
use crate::error::ScoreError;
use crate::model::{GovernanceMode, ResearchStatus, Role, Severity};
use crate::sim::economy::PRODUCTION_SCALE;

pub const TOP_N: usize = 5;
pub const LOW_STABILITY: f64 = 0.5;
pub const HIGH_INEQUALITY: f64 = 0.5;

/// Downstream metrics collaborator run on every delta.
///
/// Failures are logged by the engine and leave `TickDelta::scores` empty.
pub trait Scorer: Send {
    fn score(&self, delta: &TickDelta) -> Result<ScoreCard, ScoreError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub severity: Severity,
    pub metric: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummary {
    pub id: u64,
    pub name: String,
    pub role: Role,
    pub money: f64,
    pub buildings_built: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub metrics: BTreeMap<String, f64>,
    pub alerts: Vec<Alert>,
    pub top_earners: Vec<AgentSummary>,
    pub top_builders: Vec<AgentSummary>,
}

/// Prosperity, cohesion and innovation in [0, 1], threshold alerts, and the
/// richest and most prolific citizens.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineScorer;

impl Scorer for BaselineScorer {
    fn score(&self, delta: &TickDelta) -> Result<ScoreCard, ScoreError> {
        let clock = &delta.clock;
        let economy = &delta.economy;
        let active = delta.population.active;

        let per_capita = if active == 0 {
            0.0
        } else {
            economy.production_output / active as f64
        };
        let prosperity = 0.5 * (1.0 - economy.inequality_index)
            + 0.5 * (per_capita / PRODUCTION_SCALE).clamp(0.0, 1.0);
        let cohesion = 0.5 * clock.stability_index + 0.5 * clock.ethical_integrity;
        let nodes = delta.research.nodes.len();
        let innovation = if nodes == 0 {
            0.0
        } else {
            delta.research.count(ResearchStatus::Completed) as f64 / nodes as f64
        };

        let metrics = BTreeMap::from([
            ("prosperity".to_string(), finite(prosperity)),
            ("cohesion".to_string(), finite(cohesion)),
            ("innovation".to_string(), finite(innovation)),
            ("stability".to_string(), clock.stability_index),
            ("inequality".to_string(), economy.inequality_index),
            ("activePopulation".to_string(), active as f64),
        ]);

        let mut alerts = Vec::new();
        if clock.stability_index < LOW_STABILITY {
            alerts.push(Alert {
                severity: Severity::Critical,
                metric: "stability".to_string(),
                message: format!("Stability at {:.2}", clock.stability_index),
            });
        }
        if economy.inequality_index > HIGH_INEQUALITY {
            alerts.push(Alert {
                severity: Severity::Warning,
                metric: "inequality".to_string(),
                message: format!("Inequality at {:.2}", economy.inequality_index),
            });
        }
        if clock.governance_mode == GovernanceMode::Emergency {
            alerts.push(Alert {
                severity: Severity::Critical,
                metric: "governanceMode".to_string(),
                message: "City is in EMERGENCY mode".to_string(),
            });
        }

        let (top_earners, top_builders) = rank_agents(delta);
        Ok(ScoreCard {
            metrics,
            alerts,
            top_earners,
            top_builders,
        })
    }
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn rank_agents(delta: &TickDelta) -> (Vec<AgentSummary>, Vec<AgentSummary>) {
    let mut built: BTreeMap<u64, usize> = BTreeMap::new();
    for building in &delta.buildings {
        *built.entry(building.built_by).or_default() += 1;
    }
    let summaries: Vec<AgentSummary> = delta
        .agents
        .iter()
        .filter(|a| a.is_active())
        .map(|a| AgentSummary {
            id: a.id,
            name: a.name.clone(),
            role: a.role,
            money: a.money,
            buildings_built: built.get(&a.id).copied().unwrap_or(0),
        })
        .collect();

    let mut earners = summaries.clone();
    earners.sort_by(|a, b| b.money.total_cmp(&a.money).then(a.id.cmp(&b.id)));
    earners.truncate(TOP_N);

    let mut builders: Vec<AgentSummary> = summaries
        .into_iter()
        .filter(|s| s.buildings_built > 0)
        .collect();
    builders.sort_by(|a, b| {
        b.buildings_built
            .cmp(&a.buildings_built)
            .then(a.id.cmp(&b.id))
    });
    builders.truncate(TOP_N);
    (earners, builders)
}
