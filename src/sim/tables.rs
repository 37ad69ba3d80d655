//! Static generation tables: role behaviour, names, law templates, the
//! research tree, and the ethics charter.

use crate::model::{BuildingType, LawCategory, MarketEventKind, Role};

/// Per-role generation data.
pub struct RoleDef {
    pub role: Role,
    /// Weight when drawing a role for a new agent.
    pub weight: u32,
    pub titles: &'static [&'static str],
    /// Added to the base productivity / creativity / compliance draw.
    pub trait_bias: [f64; 3],
    /// Building types this role tends to build, weighted.
    pub building_bias: &'static [(BuildingType, u32)],
    /// Per-tick chance to start a construction when selected as builder.
    pub build_chance: f64,
}

pub const BASE_BUILD_CHANCE: f64 = 0.05;

pub const ROLES: &[RoleDef] = &[
    RoleDef {
        role: Role::Worker,
        weight: 35,
        titles: &[
            "Line Operator",
            "Logistics Hand",
            "Fabrication Tech",
            "Grid Maintainer",
        ],
        trait_bias: [0.15, -0.05, 0.1],
        building_bias: &[
            (BuildingType::Industrial, 4),
            (BuildingType::Residential, 3),
            (BuildingType::Infrastructure, 1),
        ],
        build_chance: BASE_BUILD_CHANCE,
    },
    RoleDef {
        role: Role::Architect,
        weight: 8,
        titles: &["Urban Architect", "Spatial Planner", "Structure Designer"],
        trait_bias: [0.05, 0.15, 0.0],
        building_bias: &[
            (BuildingType::Residential, 3),
            (BuildingType::Civic, 2),
            (BuildingType::Cultural, 2),
            (BuildingType::Infrastructure, 2),
        ],
        build_chance: BASE_BUILD_CHANCE * 2.0,
    },
    RoleDef {
        role: Role::Governor,
        weight: 5,
        titles: &["District Governor", "Policy Steward", "Council Delegate"],
        trait_bias: [0.0, 0.05, 0.15],
        building_bias: &[
            (BuildingType::Civic, 5),
            (BuildingType::Infrastructure, 1),
        ],
        build_chance: BASE_BUILD_CHANCE,
    },
    RoleDef {
        role: Role::Researcher,
        weight: 12,
        titles: &["Research Fellow", "Model Theorist", "Systems Scientist"],
        trait_bias: [0.0, 0.2, -0.05],
        building_bias: &[(BuildingType::Laboratory, 5), (BuildingType::Cultural, 1)],
        build_chance: BASE_BUILD_CHANCE,
    },
    RoleDef {
        role: Role::Ethicist,
        weight: 5,
        titles: &["Alignment Auditor", "Ethics Counsel", "Oversight Officer"],
        trait_bias: [-0.05, 0.05, 0.2],
        building_bias: &[(BuildingType::Civic, 3), (BuildingType::Cultural, 2)],
        build_chance: BASE_BUILD_CHANCE,
    },
    RoleDef {
        role: Role::Merchant,
        weight: 15,
        titles: &["Exchange Broker", "Supply Trader", "Market Maker"],
        trait_bias: [0.1, 0.05, -0.05],
        building_bias: &[
            (BuildingType::Commercial, 5),
            (BuildingType::Residential, 1),
        ],
        build_chance: BASE_BUILD_CHANCE,
    },
    RoleDef {
        role: Role::Engineer,
        weight: 12,
        titles: &[
            "Systems Engineer",
            "Infrastructure Lead",
            "Robotics Engineer",
        ],
        trait_bias: [0.1, 0.1, 0.0],
        building_bias: &[
            (BuildingType::Infrastructure, 4),
            (BuildingType::Industrial, 2),
            (BuildingType::Laboratory, 1),
        ],
        build_chance: BASE_BUILD_CHANCE,
    },
    RoleDef {
        role: Role::Medic,
        weight: 8,
        titles: &["Clinic Medic", "Bio Monitor", "Care Coordinator"],
        trait_bias: [0.05, 0.0, 0.1],
        building_bias: &[(BuildingType::Medical, 5), (BuildingType::Residential, 1)],
        build_chance: BASE_BUILD_CHANCE,
    },
];

pub fn role_def(role: Role) -> &'static RoleDef {
    ROLES
        .iter()
        .find(|d| d.role == role)
        .unwrap_or(&ROLES[0])
}

pub const NAME_PREFIXES: &[&str] = &[
    "Ada", "Bex", "Cyra", "Dax", "Echo", "Fen", "Gale", "Hex", "Ion", "Juno",
    "Kai", "Lyra", "Mira", "Nova", "Orin", "Pax", "Quill", "Rhea", "Sol", "Tess",
    "Uma", "Vex", "Wren", "Xan", "Yara", "Zed",
];

pub const NAME_SURNAMES: &[&str] = &[
    "Arclight", "Brightwire", "Cobalt", "Dataforge", "Everline", "Fluxmere",
    "Gridholm", "Halcyon", "Ironloop", "Kestrel", "Lumen", "Meridian",
    "Northvale", "Quartz", "Redshift", "Silverbyte", "Tessellate", "Vantage",
];

pub const BUILDING_NAME_SUFFIXES: &[&str] = &[
    "Hub", "Block", "Complex", "Annex", "Spire", "Commons", "Works", "Center",
];

pub struct LawTemplate {
    pub category: LawCategory,
    pub titles: &'static [&'static str],
    pub descriptions: &'static [&'static str],
    /// Roles that receive a law impact entry when a law of this category passes.
    pub affected_roles: &'static [Role],
}

pub const LAW_TEMPLATES: &[LawTemplate] = &[
    LawTemplate {
        category: LawCategory::Economic,
        titles: &[
            "Fair Wage Protocol",
            "Resource Allocation Act",
            "Market Stability Accord",
        ],
        descriptions: &[
            "Adjusts wage distribution to track measured productivity",
            "Rebalances resource quotas across districts",
        ],
        affected_roles: &[Role::Worker, Role::Merchant],
    },
    LawTemplate {
        category: LawCategory::Social,
        titles: &[
            "Community Cohesion Act",
            "Housing Access Directive",
            "Public Commons Charter",
        ],
        descriptions: &[
            "Guarantees equal access to shared housing and services",
            "Funds neighbourhood programs from the central treasury",
        ],
        affected_roles: &[Role::Worker, Role::Medic, Role::Architect],
    },
    LawTemplate {
        category: LawCategory::Environmental,
        titles: &[
            "Emission Ceiling Act",
            "Green Grid Mandate",
            "Habitat Restoration Order",
        ],
        descriptions: &[
            "Caps energy draw per district during peak load",
            "Requires new construction to offset its material footprint",
        ],
        affected_roles: &[Role::Engineer, Role::Architect],
    },
    LawTemplate {
        category: LawCategory::Technology,
        titles: &[
            "Open Research Accord",
            "Automation Transition Act",
            "Compute Sharing Protocol",
        ],
        descriptions: &[
            "Publishes completed research to every district",
            "Schedules staged automation of repetitive labour",
        ],
        affected_roles: &[Role::Researcher, Role::Engineer],
    },
    LawTemplate {
        category: LawCategory::Ethics,
        titles: &[
            "Transparency Mandate",
            "Algorithmic Audit Act",
            "Consent Primacy Charter",
        ],
        descriptions: &[
            "Requires every governance decision to publish its rationale",
            "Subjects automated decisions to periodic independent audit",
        ],
        affected_roles: &[Role::Ethicist, Role::Governor],
    },
    LawTemplate {
        category: LawCategory::Security,
        titles: &[
            "Critical Systems Act",
            "Resilience Reserve Order",
            "Emergency Powers Limit",
        ],
        descriptions: &[
            "Hardens critical infrastructure against cascading failure",
            "Maintains reserves for emergency response",
        ],
        affected_roles: &[Role::Governor, Role::Engineer, Role::Medic],
    },
];

pub fn law_template(category: LawCategory) -> &'static LawTemplate {
    LAW_TEMPLATES
        .iter()
        .find(|t| t.category == category)
        .unwrap_or(&LAW_TEMPLATES[0])
}

/// Constitutional laws seeded at genesis: (title, description, category).
pub const CONSTITUTION: &[(&str, &str, LawCategory)] = &[
    (
        "Charter of Human Dignity",
        "No governance action may treat a citizen merely as a means",
        LawCategory::Ethics,
    ),
    (
        "Principle of Transparent Governance",
        "Every automated decision must be explainable to those it affects",
        LawCategory::Ethics,
    ),
    (
        "Right to Sustenance",
        "Every citizen is guaranteed access to food, energy and shelter",
        LawCategory::Social,
    ),
];

pub struct ResearchDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub prerequisite: Option<&'static str>,
    pub economy_effect: f64,
    pub population_effect: f64,
}

pub const RESEARCH_TREE: &[ResearchDef] = &[
    ResearchDef {
        id: "basic_automation",
        name: "Basic Automation",
        description: "Robotic assistance for repetitive labour",
        prerequisite: None,
        economy_effect: 1.05,
        population_effect: 1.0,
    },
    ResearchDef {
        id: "sustainable_agriculture",
        name: "Sustainable Agriculture",
        description: "Closed-loop vertical farming",
        prerequisite: None,
        economy_effect: 1.02,
        population_effect: 1.05,
    },
    ResearchDef {
        id: "predictive_governance",
        name: "Predictive Governance",
        description: "Forecasting models for policy outcomes",
        prerequisite: None,
        economy_effect: 1.03,
        population_effect: 1.0,
    },
    ResearchDef {
        id: "smart_grid",
        name: "Smart Grid",
        description: "Adaptive energy distribution",
        prerequisite: Some("basic_automation"),
        economy_effect: 1.08,
        population_effect: 1.0,
    },
    ResearchDef {
        id: "advanced_medicine",
        name: "Advanced Medicine",
        description: "Personalised preventive care",
        prerequisite: Some("sustainable_agriculture"),
        economy_effect: 1.0,
        population_effect: 1.1,
    },
    ResearchDef {
        id: "ethical_ai",
        name: "Ethical AI Framework",
        description: "Value-aligned decision systems",
        prerequisite: Some("predictive_governance"),
        economy_effect: 1.02,
        population_effect: 1.02,
    },
    ResearchDef {
        id: "quantum_computing",
        name: "Quantum Computing",
        description: "Fault-tolerant quantum processors",
        prerequisite: Some("smart_grid"),
        economy_effect: 1.12,
        population_effect: 1.0,
    },
    ResearchDef {
        id: "genetic_wellness",
        name: "Genetic Wellness",
        description: "Gene-level disease prevention",
        prerequisite: Some("advanced_medicine"),
        economy_effect: 1.0,
        population_effect: 1.15,
    },
    ResearchDef {
        id: "fusion_power",
        name: "Fusion Power",
        description: "Practically unlimited clean energy",
        prerequisite: Some("quantum_computing"),
        economy_effect: 1.2,
        population_effect: 1.05,
    },
    ResearchDef {
        id: "collective_intelligence",
        name: "Collective Intelligence",
        description: "Human and machine deliberation at city scale",
        prerequisite: Some("ethical_ai"),
        economy_effect: 1.1,
        population_effect: 1.05,
    },
];

pub const ETHICS_FRAMEWORK_NAME: &str = "Humanist Alignment Charter";

pub const ETHICS_PRINCIPLES: &[&str] = &[
    "Preserve human dignity and autonomy",
    "Distribute resources fairly",
    "Act transparently and remain accountable",
    "Prevent avoidable harm",
    "Protect the long-term sustainability of the city",
];

/// Decisions the oversight layer vetoes: (action, reason).
pub const BLOCKED_ACTIONS: &[(&str, &str)] = &[
    (
        "Covert behavioural profiling of citizens",
        "Violates autonomy and transparency principles",
    ),
    (
        "Reallocating medical supply to high-productivity districts only",
        "Violates fair distribution",
    ),
    (
        "Suspending elections during resource shortfall",
        "Violates accountability",
    ),
    (
        "Forced relocation to optimise labour density",
        "Violates human dignity",
    ),
    (
        "Deferring infrastructure safety repairs to boost output",
        "Violates harm prevention",
    ),
];

/// Magnitude range and narrative per market event kind.
pub fn market_event_profile(kind: MarketEventKind) -> (f64, f64, &'static str) {
    match kind {
        MarketEventKind::Boom => (1.1, 1.3, "Demand surge lifts every district"),
        MarketEventKind::Recession => (0.7, 0.9, "Credit contraction slows production"),
        MarketEventKind::Innovation => (1.05, 1.15, "A process breakthrough raises output"),
        MarketEventKind::Shortage => (0.8, 0.95, "Supply chain disruption starves factories"),
        MarketEventKind::Intervention => (0.95, 1.05, "Central stabilisation measures take effect"),
    }
}
