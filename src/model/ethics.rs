use serde::{Deserialize, Serialize};

use super::bounded::BoundedLog;
use super::log::Severity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedAction {
    pub id: u64,
    pub tick: u64,
    pub action: String,
    pub reason: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfCorrection {
    pub id: u64,
    pub tick: u64,
    pub trigger: String,
    pub action: String,
    pub inequality_before: f64,
    pub inequality_after: f64,
}

/// The city's fixed ethical charter plus its oversight record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthicsFramework {
    pub name: String,
    pub principles: Vec<String>,
    pub blocked_actions: BoundedLog<BlockedAction>,
    pub self_corrections: BoundedLog<SelfCorrection>,
    pub intervention_count: u64,
}

impl EthicsFramework {
    pub fn new(name: String, principles: Vec<String>, capacity: usize) -> Self {
        Self {
            name,
            principles,
            blocked_actions: BoundedLog::new(capacity),
            self_corrections: BoundedLog::new(capacity),
            intervention_count: 0,
        }
    }

    /// Self-corrections logged within the last `window` ticks, inclusive of `tick`.
    pub fn corrections_within(&self, tick: u64, window: u64) -> usize {
        self.self_corrections
            .iter()
            .filter(|c| tick.saturating_sub(c.tick) < window)
            .count()
    }
}
