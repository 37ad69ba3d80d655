use serde::{Deserialize, Serialize};

use crate::model::{GovernanceMode, LawStatus, MarketEventKind};

/// Something a system did this tick that other parts of the engine care
/// about. The orchestrator turns the tick's signals into the delta's "new"
/// lists and into outbound notification text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Signal {
    AgentBorn {
        agent_id: u64,
        parent_ids: [u64; 2],
    },
    AgentDied {
        agent_id: u64,
        age: u64,
    },
    BuildingConstructed {
        building_id: u64,
        builder_id: u64,
    },
    LawEnacted {
        law_id: u64,
    },
    LawTransitioned {
        law_id: u64,
        from: LawStatus,
        to: LawStatus,
    },
    MarketShock {
        event_id: u64,
        kind: MarketEventKind,
        magnitude: f64,
    },
    ResearchStarted {
        node_id: String,
    },
    ResearchCompleted {
        node_id: String,
        origin_ai: Option<u64>,
        unlocked: Vec<String>,
    },
    SelfCorrection {
        correction_id: u64,
    },
    ActionBlocked {
        blocked_id: u64,
    },
    GovernanceModeChanged {
        from: GovernanceMode,
        to: GovernanceMode,
    },
}
