use serde::{Deserialize, Serialize};

use super::clock::GovernanceMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

string_enum!(Severity {
    Info => "INFO",
    Warning => "WARNING",
    Critical => "CRITICAL",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum LogKind {
    Birth,
    Death,
    Construction,
    LawEnacted,
    LawDeprecated,
    LawRepealed,
    MarketEvent,
    ResearchStarted,
    ResearchCompleted,
    SelfCorrection,
    BlockedAction,
    ModeChange,
}

string_enum!(LogKind {
    Birth => "BIRTH",
    Death => "DEATH",
    Construction => "CONSTRUCTION",
    LawEnacted => "LAW_ENACTED",
    LawDeprecated => "LAW_DEPRECATED",
    LawRepealed => "LAW_REPEALED",
    MarketEvent => "MARKET_EVENT",
    ResearchStarted => "RESEARCH_STARTED",
    ResearchCompleted => "RESEARCH_COMPLETED",
    SelfCorrection => "SELF_CORRECTION",
    BlockedAction => "BLOCKED_ACTION",
    ModeChange => "MODE_CHANGE",
});

impl LogKind {
    /// Kinds whose severity escalates while the city is in an emergency.
    fn is_civic_pulse(self) -> bool {
        matches!(
            self,
            LogKind::Birth | LogKind::Death | LogKind::Construction | LogKind::MarketEvent
        )
    }
}

impl Severity {
    /// Severity after applying the governance mode. Emergency raises routine
    /// population and economy entries from INFO to WARNING.
    pub fn under_mode(self, kind: LogKind, mode: GovernanceMode) -> Severity {
        if mode == GovernanceMode::Emergency && self == Severity::Info && kind.is_civic_pulse() {
            Severity::Warning
        } else {
            self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceLog {
    pub id: u64,
    pub tick: u64,
    pub kind: LogKind,
    pub severity: Severity,
    pub message: String,
    pub agent_id: Option<u64>,
}
