//! Land/ocean masks and coarse place labels
//!
//! Both masks are rectangular approximations kept with their exact bounds.
//! Points near box edges are knowingly misclassified.
//!
//! | Mask | Bounds | Land when |
//! |------|--------|-----------|
//! | `Continental` | six continent boxes, strict `<` | inside any box, or lat < −60 |
//! | `Basin` | three continent boxes, inclusive | inside a continent box or \|lat\| > 60, unless it falls in an ocean basin |

use serde::{Deserialize, Serialize};

/// (min_lat, max_lat, min_lon, max_lon, name)
type Bounds = (f64, f64, f64, f64, &'static str);

const CONTINENT_BOXES: &[Bounds] = &[
    (10.0, 85.0, -180.0, -50.0, "North America"),
    (-60.0, 15.0, -90.0, -30.0, "South America"),
    (35.0, 75.0, -30.0, 60.0, "Europe"),
    (-40.0, 40.0, -25.0, 60.0, "Africa"),
    (-15.0, 85.0, 25.0, 180.0, "Asia"),
    (-55.0, -5.0, 110.0, 180.0, "Australia/Oceania"),
];

/// Latitude south of which everything is treated as land (Antarctica)
const POLAR_LAND_LAT: f64 = -60.0;

const MACRO_REGION_BOXES: &[(f64, f64, f64, f64, MacroRegion)] = &[
    (-60.0, 70.0, -20.0, 50.0, MacroRegion::AfricaEurope),
    (-55.0, 70.0, -170.0, -30.0, MacroRegion::Americas),
    (-50.0, 50.0, 60.0, 150.0, MacroRegion::AsiaOceania),
];

const OCEAN_BASINS: &[Bounds] = &[
    (-40.0, 40.0, -180.0, -60.0, "Pacific"),
    (-40.0, 60.0, -40.0, 20.0, "Atlantic"),
    (-40.0, 30.0, 40.0, 120.0, "Indian"),
];

/// (min_lat, max_lat, min_lon, max_lon, country label), strict bounds
const COUNTRY_BOXES: &[Bounds] = &[
    (24.0, 49.0, -125.0, -66.0, "United States"),
    (35.0, 71.0, -10.0, 40.0, "Europe"),
    (-35.0, 35.0, 70.0, 140.0, "Asia"),
    (-35.0, 37.0, -20.0, 55.0, "Africa"),
    (-55.0, -10.0, -75.0, -35.0, "South America"),
];

fn inside_strict(lat: f64, lon: f64, b: &Bounds) -> bool {
    b.0 < lat && lat < b.1 && b.2 < lon && lon < b.3
}

fn inside_inclusive(lat: f64, lon: f64, min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> bool {
    (min_lat..=max_lat).contains(&lat) && (min_lon..=max_lon).contains(&lon)
}

/// Broad label from the continent-first classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroRegion {
    AfricaEurope,
    Americas,
    AsiaOceania,
    ArcticAntarctica,
    Ocean,
    Continent,
}

impl MacroRegion {
    pub fn label(&self) -> &'static str {
        match self {
            MacroRegion::AfricaEurope => "Africa/Europe",
            MacroRegion::Americas => "Americas",
            MacroRegion::AsiaOceania => "Asia/Oceania",
            MacroRegion::ArcticAntarctica => "Arctic/Antarctica",
            MacroRegion::Ocean => "Ocean",
            MacroRegion::Continent => "Continent",
        }
    }
}

/// Continent-first label; basins are only checked when no continent matched
pub fn macro_region(lat: f64, lon: f64) -> MacroRegion {
    if let Some(&(.., region)) = MACRO_REGION_BOXES
        .iter()
        .find(|b| inside_inclusive(lat, lon, b.0, b.1, b.2, b.3))
    {
        return region;
    }
    if lat.abs() > 60.0 {
        return MacroRegion::ArcticAntarctica;
    }
    if OCEAN_BASINS
        .iter()
        .any(|b| inside_inclusive(lat, lon, b.0, b.1, b.2, b.3))
    {
        return MacroRegion::Ocean;
    }
    MacroRegion::Continent
}

/// Which box set decides ocean vs land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OceanMask {
    #[default]
    Continental,
    Basin,
}

impl OceanMask {
    pub fn is_ocean(&self, lat: f64, lon: f64) -> bool {
        match self {
            OceanMask::Continental => {
                if lat < POLAR_LAND_LAT {
                    return false;
                }
                !CONTINENT_BOXES.iter().any(|b| inside_strict(lat, lon, b))
            }
            OceanMask::Basin => macro_region(lat, lon) == MacroRegion::Ocean,
        }
    }
}

/// Coarse country/continent label; "Other" outside every box
pub fn estimate_country(lat: f64, lon: f64) -> &'static str {
    COUNTRY_BOXES
        .iter()
        .find(|b| inside_strict(lat, lon, b))
        .map(|b| b.4)
        .unwrap_or("Other")
}
