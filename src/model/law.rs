use serde::{Deserialize, Serialize};

/// Lifecycle status. Declaration order is lifecycle order: a law only ever
/// moves to a greater status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum LawStatus {
    Pending,
    Active,
    Deprecated,
    Repealed,
}

string_enum!(LawStatus {
    Pending => "PENDING",
    Active => "ACTIVE",
    Deprecated => "DEPRECATED",
    Repealed => "REPEALED",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum LawCategory {
    Economic,
    Social,
    Environmental,
    Technology,
    Ethics,
    Security,
}

string_enum!(LawCategory {
    Economic => "ECONOMIC",
    Social => "SOCIAL",
    Environmental => "ENVIRONMENTAL",
    Technology => "TECHNOLOGY",
    Ethics => "ETHICS",
    Security => "SECURITY",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum LawAction {
    Created,
    Deprecated,
    Repealed,
}

string_enum!(LawAction {
    Created => "CREATED",
    Deprecated => "DEPRECATED",
    Repealed => "REPEALED",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawHistoryEntry {
    pub tick: u64,
    pub action: LawAction,
    pub reason: String,
}

/// Projected effects of a law, each in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LawImpactMetrics {
    pub economic: f64,
    pub social: f64,
    pub ethical: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Law {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: LawCategory,
    pub status: LawStatus,
    pub is_constitutional: bool,
    pub created_at: u64,
    /// Governor who proposed it; `None` for constitutional laws.
    pub proposed_by: Option<u64>,
    pub impact: LawImpactMetrics,
    pub history: Vec<LawHistoryEntry>,
}

impl Law {
    pub fn age(&self, tick: u64) -> u64 {
        tick.saturating_sub(self.created_at)
    }

    /// Move the law forward in its lifecycle, recording the transition.
    ///
    /// Refuses (returns false) for constitutional laws and for any move that
    /// would not strictly advance the status.
    pub fn transition(&mut self, to: LawStatus, tick: u64, reason: impl Into<String>) -> bool {
        if self.is_constitutional || to <= self.status {
            return false;
        }
        let action = match to {
            LawStatus::Deprecated => LawAction::Deprecated,
            LawStatus::Repealed => LawAction::Repealed,
            LawStatus::Pending | LawStatus::Active => return false,
        };
        self.status = to;
        self.history.push(LawHistoryEntry {
            tick,
            action,
            reason: reason.into(),
        });
        true
    }
}
