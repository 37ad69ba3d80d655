use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ResearchStatus {
    Locked,
    Available,
    InProgress,
    Completed,
    /// Part of the status vocabulary; the engine never fails a project.
    Failed,
}

string_enum!(ResearchStatus {
    Locked => "LOCKED",
    Available => "AVAILABLE",
    InProgress => "IN_PROGRESS",
    Completed => "COMPLETED",
    Failed => "FAILED",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchNode {
    /// Stable key from the research table, e.g. `"urban_ai"`.
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ResearchStatus,
    /// In [0, 1]; completion happens once it reaches 1.
    pub progress: f64,
    /// Node ids that must be completed first. The generated tree lists at most one.
    pub prerequisites: Vec<String>,
    /// Multiplier applied to production output on completion.
    pub economy_effect: f64,
    /// Multiplier applied to the birth rate on completion.
    pub population_effect: f64,
    pub started_at: Option<u64>,
    pub discovered_at: Option<u64>,
    /// Agent credited with the breakthrough.
    #[serde(rename = "originAI")]
    pub origin_ai: Option<u64>,
}

impl ResearchNode {
    pub fn is_complete(&self) -> bool {
        self.status == ResearchStatus::Completed
    }
}

/// The research tree in table order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResearchTree {
    pub nodes: Vec<ResearchNode>,
}

impl ResearchTree {
    pub fn get(&self, id: &str) -> Option<&ResearchNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut ResearchNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn in_progress_index(&self) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.status == ResearchStatus::InProgress)
    }

    pub fn count(&self, status: ResearchStatus) -> usize {
        self.nodes.iter().filter(|n| n.status == status).count()
    }

    /// Whether every prerequisite of `node` is completed.
    pub fn prerequisites_met(&self, node: &ResearchNode) -> bool {
        node.prerequisites
            .iter()
            .all(|p| self.get(p).is_some_and(ResearchNode::is_complete))
    }
}
