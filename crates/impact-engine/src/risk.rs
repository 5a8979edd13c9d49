//! Risk analysis and mitigation planning for catalog objects.

use crate::catalog::{NeoRecord, RiskLevel};
use serde::{Deserialize, Serialize};

/// Diameter at which the size factor saturates (km)
const SIZE_SATURATION_KM: f64 = 10.0;
/// Velocity at which the velocity factor saturates (km/s)
const VELOCITY_SATURATION_KM_S: f64 = 30.0;
/// Miss distance beyond which proximity contributes nothing (km)
const PROXIMITY_HORIZON_KM: f64 = 5e7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub size: f64,
    pub velocity: f64,
    pub proximity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub asteroid_id: String,
    pub overall_risk_score: f64,
    pub risk_factors: RiskFactors,
    pub mitigation_urgency: RiskLevel,
    pub estimated_detection_time: String,
    pub recommended_actions: Vec<String>,
}

pub fn analyze_risk(record: &NeoRecord) -> RiskAnalysis {
    let factors = RiskFactors {
        size: (record.mean_diameter_km() / SIZE_SATURATION_KM).min(1.0),
        velocity: (record.velocity_km_s / VELOCITY_SATURATION_KM_S).min(1.0),
        proximity: (1.0 - record.miss_distance_km / PROXIMITY_HORIZON_KM).max(0.0),
    };
    let overall = (factors.size + factors.velocity + factors.proximity) / 3.0;

    let urgency = if overall > 0.7 {
        RiskLevel::High
    } else if overall > 0.4 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let detection = if factors.proximity > 0.8 {
        "6 months"
    } else {
        "2 years"
    };

    let planning = if overall > 0.5 {
        "Mission planning"
    } else {
        "Observation only"
    };

    RiskAnalysis {
        asteroid_id: record.id.clone(),
        overall_risk_score: overall,
        risk_factors: factors,
        mitigation_urgency: urgency,
        estimated_detection_time: detection.to_string(),
        recommended_actions: vec![
            "Continuous monitoring".to_string(),
            "Trajectory refinement".to_string(),
            planning.to_string(),
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationStrategy {
    pub name: String,
    pub description: String,
    pub success_probability: f64,
    pub cost_estimate_usd: f64,
    pub preparation_time: String,
    pub effectiveness: String,
}

impl MitigationStrategy {
    fn new(
        name: &str,
        description: &str,
        success_probability: f64,
        cost_estimate_usd: f64,
        preparation_time: &str,
        effectiveness: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            success_probability,
            cost_estimate_usd,
            preparation_time: preparation_time.to_string(),
            effectiveness: effectiveness.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationPlan {
    pub asteroid_id: String,
    pub available_strategies: Vec<MitigationStrategy>,
    pub recommended_strategy: String,
    pub decision_timeline: String,
}

/// Applicable strategies in preference order; evacuation is always offered
pub fn plan_mitigation(record: &NeoRecord) -> MitigationPlan {
    let mut strategies = Vec::new();

    if record.mean_diameter_km() < 5.0 {
        strategies.push(MitigationStrategy::new(
            "Kinetic Impactor",
            "Impact mission to change the trajectory",
            0.85,
            500e6,
            "3-5 years",
            "High for small asteroids",
        ));
    }

    if record.miss_distance_km > 1e7 {
        strategies.push(MitigationStrategy::new(
            "Gravity Tractor",
            "Spacecraft that uses gravity to deflect the asteroid",
            0.75,
            2e9,
            "10-15 years",
            "Medium, requires long lead time",
        ));
    }

    strategies.push(MitigationStrategy::new(
        "Evacuation",
        "Evacuation of potential impact areas",
        0.95,
        10e9,
        "1-2 years",
        "High for saving lives, zero for infrastructure",
    ));

    let recommended = strategies
        .first()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "Monitoring".to_string());

    let timeline = if record.risk_level() == RiskLevel::High {
        "Immediate action required"
    } else {
        "Plan within 2 years"
    };

    MitigationPlan {
        asteroid_id: record.id.clone(),
        available_strategies: strategies,
        recommended_strategy: recommended,
        decision_timeline: timeline.to_string(),
    }
}
