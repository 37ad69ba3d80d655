use serde::{Deserialize, Serialize};

use super::bounded::BoundedLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Role {
    Worker,
    Architect,
    Governor,
    Researcher,
    Ethicist,
    Merchant,
    Engineer,
    Medic,
}

string_enum!(Role {
    Worker => "WORKER",
    Architect => "ARCHITECT",
    Governor => "GOVERNOR",
    Researcher => "RESEARCHER",
    Ethicist => "ETHICIST",
    Merchant => "MERCHANT",
    Engineer => "ENGINEER",
    Medic => "MEDIC",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AgentStatus {
    Active,
    Inactive,
    Deceased,
}

string_enum!(AgentStatus {
    Active => "ACTIVE",
    Inactive => "INACTIVE",
    Deceased => "DECEASED",
});

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Clamp into `[0, width] x [0, height]`.
    pub fn clamped(self, width: f64, height: f64) -> Self {
        Self {
            x: self.x.clamp(0.0, width),
            y: self.y.clamp(0.0, height),
        }
    }
}

/// Heritable traits, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    pub productivity: f64,
    pub creativity: f64,
    pub compliance: f64,
    pub longevity: f64,
    pub mutability: f64,
}

impl Traits {
    pub fn uniform(value: f64) -> Self {
        let v = value.clamp(0.0, 1.0);
        Self {
            productivity: v,
            creativity: v,
            compliance: v,
            longevity: v,
            mutability: v,
        }
    }

    /// Mutable access to every trait in a fixed order.
    pub fn values_mut(&mut self) -> [&mut f64; 5] {
        [
            &mut self.productivity,
            &mut self.creativity,
            &mut self.compliance,
            &mut self.longevity,
            &mut self.mutability,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub tick: u64,
    pub description: String,
}

/// A record of a law touching this agent when it was enacted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawImpact {
    pub law_id: u64,
    pub tick: u64,
    /// Net effect on the agent's well-being, in [-1, 1].
    pub effect: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: u64,
    pub name: String,
    pub title: String,
    pub created_at: u64,
    pub role: Role,
    /// Empty for genesis agents. Both ids may be equal (self-pairing).
    pub parent_ids: Vec<u64>,
    pub child_ids: Vec<u64>,
    pub age: u64,
    pub money: f64,
    pub position: Position,
    pub status: AgentStatus,
    pub died_at: Option<u64>,
    pub traits: Traits,
    pub activity_log: BoundedLog<ActivityEntry>,
    pub law_impact: BoundedLog<LawImpact>,
}

impl Agent {
    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }

    pub fn log_activity(&mut self, tick: u64, description: impl Into<String>) {
        self.activity_log.push(ActivityEntry {
            tick,
            description: description.into(),
        });
    }

    /// Mark the agent deceased. Returns false if it was not active.
    pub fn die(&mut self, tick: u64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = AgentStatus::Deceased;
        self.died_at = Some(tick);
        true
    }
}
