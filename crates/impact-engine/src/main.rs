//! Asteroid Impact Simulator CLI
//!
//! Usage:
//!   impact-sim simulate --lat 35.6762 --lon 139.6503 --diameter 1.0 --velocity 30
//!   impact-sim simulate --lat=-33.87 --lon 151.21 --asteroid 99942 --offline
//!   impact-sim classify --lat 40.7128 --lon=-74.006
//!   impact-sim risk 2025-IMPACT
//!   impact-sim catalog --threats

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use impact_engine::{
    analyze_risk, plan_mitigation, EngineConfig, ImpactService, NeoCatalog, NeoRecord,
};
use impact_physics::{AsteroidProperties, Composition, CraterLaw};
use serde::Serialize;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "impact-sim",
    about = "Estimate the physical and human consequences of an asteroid impact"
)]
struct Args {
    /// Engine configuration JSON (defaults to built-in tables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate an impact at a coordinate
    Simulate {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Catalog id to take diameter and velocity from
        #[arg(short, long, conflicts_with_all = ["diameter", "velocity"])]
        asteroid: Option<String>,

        /// Diameter in km
        #[arg(short, long, required_unless_present = "asteroid")]
        diameter: Option<f64>,

        /// Velocity in km/s
        #[arg(long, required_unless_present = "asteroid")]
        velocity: Option<f64>,

        /// Impact angle from horizontal in degrees
        #[arg(long, default_value_t = 45.0)]
        angle: f64,

        /// rocky, metallic or icy
        #[arg(long, default_value = "rocky")]
        composition: Composition,

        /// Bulk density in kg/m³ (composition default when omitted)
        #[arg(long)]
        density: Option<f64>,

        #[arg(long, value_enum)]
        crater_law: Option<CraterLawArg>,

        /// Skip the external place lookup
        #[arg(long)]
        offline: bool,
    },

    /// Classify the region at a coordinate
    Classify {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Skip the external place lookup
        #[arg(long)]
        offline: bool,
    },

    /// Risk analysis and mitigation options for a catalog object
    Risk {
        id: String,
    },

    /// List catalog objects
    Catalog {
        /// Only HIGH/MEDIUM or hazardous objects, riskiest first
        #[arg(long)]
        threats: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CraterLawArg {
    SchmidtHousen,
    VelocityScaled,
}

impl From<CraterLawArg> for CraterLaw {
    fn from(arg: CraterLawArg) -> Self {
        match arg {
            CraterLawArg::SchmidtHousen => CraterLaw::SchmidtHousen,
            CraterLawArg::VelocityScaled => CraterLaw::VelocityScaled,
        }
    }
}

#[derive(Serialize)]
struct Output<T: Serialize> {
    generated_at: String,
    result: T,
}

#[derive(Serialize)]
struct RiskOutput<'a> {
    asteroid: &'a NeoRecord,
    risk_level: impact_engine::RiskLevel,
    analysis: impact_engine::RiskAnalysis,
    mitigation: impact_engine::MitigationPlan,
}

#[derive(Serialize)]
struct CatalogEntry<'a> {
    #[serde(flatten)]
    record: &'a NeoRecord,
    risk_level: impact_engine::RiskLevel,
}

fn write_json<T: Serialize>(result: T) -> Result<()> {
    let output = Output {
        generated_at: Utc::now().to_rfc3339(),
        result,
    };
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    serde_json::to_writer_pretty(&mut writer, &output)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("loading config {:?}", path)),
        None => Ok(EngineConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "impact_sim=debug,debug"
    } else {
        "impact_sim=info,info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut config = load_config(args.config.as_ref())?;
    let catalog = NeoCatalog::with_defaults();

    match args.command {
        Command::Simulate {
            lat,
            lon,
            asteroid,
            diameter,
            velocity,
            angle,
            composition,
            density,
            crater_law,
            offline,
        } => {
            if let Some(law) = crater_law {
                config.crater_law = law.into();
            }
            if offline {
                config.lookup.enabled = false;
            }

            let mut properties = match asteroid.as_deref() {
                Some(id) => {
                    let record = catalog.get(id)?;
                    info!("Using catalog object {} ({})", record.name, record.id);
                    let mut props = record.to_asteroid(angle);
                    props.composition = composition;
                    props
                }
                None => AsteroidProperties::new(
                    diameter.unwrap_or_default(),
                    velocity.unwrap_or_default(),
                    angle,
                    composition,
                ),
            };
            if let Some(d) = density {
                properties = properties.with_density(d);
            }
            properties.validate()?;

            let service = ImpactService::from_config(&config)?;
            let report = service.simulate_impact(&properties, lat, lon).await;

            info!(
                "{}: {:.2} MT, crater {:.2} km, {} casualties",
                report.destruction.label,
                report.energy_megatons,
                report.crater_diameter_km,
                report.casualties_estimate
            );
            write_json(report)?;
        }

        Command::Classify { lat, lon, offline } => {
            if offline {
                config.lookup.enabled = false;
            }
            let service = ImpactService::from_config(&config)?;
            let region = service.classify_region(lat, lon).await;
            write_json(region)?;
        }

        Command::Risk { id } => {
            let record = catalog.get(&id)?;
            write_json(RiskOutput {
                asteroid: record,
                risk_level: record.risk_level(),
                analysis: analyze_risk(record),
                mitigation: plan_mitigation(record),
            })?;
        }

        Command::Catalog { threats } => {
            let records: Vec<&NeoRecord> = if threats {
                catalog.threats()
            } else {
                catalog.records().iter().collect()
            };
            let entries: Vec<CatalogEntry> = records
                .into_iter()
                .map(|record| CatalogEntry {
                    record,
                    risk_level: record.risk_level(),
                })
                .collect();
            info!("{} catalog objects", entries.len());
            write_json(entries)?;
        }
    }

    Ok(())
}
