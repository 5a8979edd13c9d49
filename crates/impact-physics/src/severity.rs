use serde::{Deserialize, Serialize};

/// Qualitative destruction scale keyed on yield
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestructionLevel {
    Minor,
    Significant,
    Local,
    Severe,
    Massive,
    Regional,
    Continental,
    GlobalExtinction,
}

/// (lower bound MT, level), checked top-down with strict `>`
const LEVEL_THRESHOLDS: &[(f64, DestructionLevel)] = &[
    (100000.0, DestructionLevel::GlobalExtinction),
    (10000.0, DestructionLevel::Continental),
    (1000.0, DestructionLevel::Regional),
    (100.0, DestructionLevel::Massive),
    (10.0, DestructionLevel::Severe),
    (1.0, DestructionLevel::Local),
    (0.1, DestructionLevel::Significant),
];

impl DestructionLevel {
    pub fn from_energy(energy_mt: f64) -> Self {
        LEVEL_THRESHOLDS
            .iter()
            .find(|(bound, _)| energy_mt > *bound)
            .map(|(_, level)| *level)
            .unwrap_or(DestructionLevel::Minor)
    }

    /// Severity on a 3-10 scale
    pub fn severity(&self) -> u8 {
        match self {
            DestructionLevel::Minor => 3,
            DestructionLevel::Significant => 4,
            DestructionLevel::Local => 5,
            DestructionLevel::Severe => 6,
            DestructionLevel::Massive => 7,
            DestructionLevel::Regional => 8,
            DestructionLevel::Continental => 9,
            DestructionLevel::GlobalExtinction => 10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DestructionLevel::Minor => "Minor damage",
            DestructionLevel::Significant => "Significant damage",
            DestructionLevel::Local => "Local destruction",
            DestructionLevel::Severe => "Severe destruction",
            DestructionLevel::Massive => "Massive destruction",
            DestructionLevel::Regional => "Regional devastation",
            DestructionLevel::Continental => "Continental catastrophe",
            DestructionLevel::GlobalExtinction => "Global extinction event",
        }
    }
}
