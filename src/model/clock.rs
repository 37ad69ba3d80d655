use serde::{Deserialize, Serialize};

use crate::config::clamp_tick_rate;

/// Coarse operating regime of the city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GovernanceMode {
    Standard,
    Emergency,
    /// Reserved for narrative use; no threshold in the engine enters it.
    Transition,
    EthicalOverride,
}

string_enum!(GovernanceMode {
    Standard => "STANDARD",
    Emergency => "EMERGENCY",
    Transition => "TRANSITION",
    EthicalOverride => "ETHICAL_OVERRIDE",
});

/// Authoritative simulation clock and top-level health readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationClock {
    pub tick: u64,
    pub tick_rate_hz: f64,
    pub is_running: bool,
    pub governance_mode: GovernanceMode,
    /// Composite health score in [0, 1].
    pub stability_index: f64,
    /// In [0.5, 1]; drops as self-corrections accumulate.
    pub ethical_integrity: f64,
}

impl SimulationClock {
    pub fn new(tick_rate_hz: f64) -> Self {
        Self {
            tick: 0,
            tick_rate_hz: clamp_tick_rate(tick_rate_hz),
            is_running: false,
            governance_mode: GovernanceMode::Standard,
            stability_index: 1.0,
            ethical_integrity: 1.0,
        }
    }

    /// Advance exactly one tick.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_increments_by_one() {
        let mut clock = SimulationClock::new(1.0);
        assert_eq!(clock.tick, 0);
        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.advance(), 2);
    }

    #[test]
    fn new_clamps_rate() {
        assert_eq!(SimulationClock::new(100.0).tick_rate_hz, 10.0);
    }

    #[test]
    fn mode_wire_names() {
        assert_eq!(GovernanceMode::EthicalOverride.as_str(), "ETHICAL_OVERRIDE");
        assert_eq!(
            GovernanceMode::try_from("EMERGENCY".to_string()),
            Ok(GovernanceMode::Emergency)
        );
        assert!(GovernanceMode::try_from("CHAOS".to_string()).is_err());
        assert_eq!(
            serde_json::to_string(&GovernanceMode::Standard).unwrap(),
            "\"STANDARD\""
        );
    }
}
