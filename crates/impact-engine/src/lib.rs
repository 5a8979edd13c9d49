//! Impact Engine
//!
//! Consolidated asteroid impact reports. Combines the physics chain with
//! region classification, casualty estimates and economic damage.
//!
//! # Report Pipeline
//!
//! | Stage | Crate | Output |
//! |-------|-------|--------|
//! | Region | geo-demographics | tier, density, nearest city |
//! | Physics | impact-physics | energy, crater, seismic, area, atmosphere |
//! | Casualties | geo-demographics | ring-integrated zone casualties, tsunami term |
//! | Economics | impact-engine | affected area × region multiplier |
//!
//! [`ImpactEngine`] is synchronous and pure. [`ImpactService`] wraps it
//! with an async place lookup bounded by a timeout.

use thiserror::Error;

pub mod catalog;
pub mod config;
pub mod economics;
pub mod orchestrator;
pub mod risk;
pub mod service;

pub use catalog::{NeoCatalog, NeoRecord, RiskLevel};
pub use config::EngineConfig;
pub use economics::EconomicTable;
pub use orchestrator::{terrain_for_region, DestructionSummary, ImpactEngine, ImpactReport};
pub use risk::{analyze_risk, plan_mitigation, MitigationPlan, RiskAnalysis};
pub use service::{ConfiguredLookup, ImpactService};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown asteroid: {0}")]
    UnknownAsteroid(String),
    #[error("Lookup error: {0}")]
    Lookup(#[from] geo_demographics::LookupError),
    #[error("Physics error: {0}")]
    Physics(#[from] impact_physics::PhysicsError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
