use serde::{Deserialize, Serialize};

use super::agent::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BuildingType {
    Residential,
    Commercial,
    Industrial,
    Laboratory,
    Civic,
    Cultural,
    Medical,
    Infrastructure,
}

string_enum!(BuildingType {
    Residential => "RESIDENTIAL",
    Commercial => "COMMERCIAL",
    Industrial => "INDUSTRIAL",
    Laboratory => "LABORATORY",
    Civic => "CIVIC",
    Cultural => "CULTURAL",
    Medical => "MEDICAL",
    Infrastructure => "INFRASTRUCTURE",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: u64,
    #[serde(rename = "type")]
    pub building_type: BuildingType,
    pub name: String,
    pub position: Position,
    /// Footprint edge length in tiles.
    pub size: u32,
    /// Agent id of the builder.
    pub built_by: u64,
    pub built_at: u64,
    pub cost: f64,
    pub productivity: f64,
}
