use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bounded::BoundedLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ResourceKind {
    Food,
    Energy,
    Materials,
    Technology,
}

string_enum!(ResourceKind {
    Food => "food",
    Energy => "energy",
    Materials => "materials",
    Technology => "technology",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum MarketEventKind {
    Boom,
    Recession,
    Innovation,
    Shortage,
    Intervention,
}

string_enum!(MarketEventKind {
    Boom => "BOOM",
    Recession => "RECESSION",
    Innovation => "INNOVATION",
    Shortage => "SHORTAGE",
    Intervention => "INTERVENTION",
});

impl MarketEventKind {
    /// Whether the event hurts output.
    pub fn is_shock(self) -> bool {
        matches!(self, MarketEventKind::Recession | MarketEventKind::Shortage)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    pub id: u64,
    pub tick: u64,
    pub kind: MarketEventKind,
    /// Multiplier applied to production output on the tick it fired.
    pub magnitude: f64,
    pub description: String,
}

/// One row of the rolling economy history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomySample {
    pub tick: u64,
    pub currency_supply: f64,
    pub production_output: f64,
    pub inequality_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Economy {
    pub currency_supply: f64,
    /// In [0, 0.3].
    pub taxation_level: f64,
    pub production_output: f64,
    /// Compounded research bonuses applied on top of raw worker output.
    pub production_multiplier: f64,
    /// Production output measured at genesis; the stability reference point.
    pub baseline_production: f64,
    /// In [0, 1].
    pub inequality_index: f64,
    pub resource_distribution: BTreeMap<ResourceKind, f64>,
    pub market_events: BoundedLog<MarketEvent>,
    pub history: BoundedLog<EconomySample>,
}

impl Economy {
    pub fn sample(&self, tick: u64) -> EconomySample {
        EconomySample {
            tick,
            currency_supply: self.currency_supply,
            production_output: self.production_output,
            inequality_index: self.inequality_index,
        }
    }
}
