//! # Design Parameters
//!
//! The immutable input snapshot for one sizing run: topology choices,
//! equipment counts, floor geometry, IT load and plant efficiencies.
//!
//! Every field has a default (the reference two-floor, 240 kW hall), so a
//! JSON document only needs to name the fields it changes.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "electrical_redundancy": "2N",
//!   "supply_topology": "DualFeed",
//!   "enclosure_count": 6,
//!   "racks_per_enclosure": 10,
//!   "servers_per_rack": 12,
//!   "server_max_power_w": 650.0,
//!   "containment": "HotAisle",
//!   "suppression": "CleanAgent"
//! }
//! ```
//!
//! The engine performs no range validation beyond [`DesignParameters::validate`];
//! callers are expected to pass meaningful divisors (COPs, areas).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::redundancy::RedundancyTier;

// ============================================================================
// Topology Choices
// ============================================================================

/// Utility supply topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SupplyTopology {
    /// Two independent feeds (A and B sides)
    #[default]
    DualFeed,
    /// One feed; redundancy is carried by oversizing the single side
    SingleFeed,
}

impl SupplyTopology {
    /// Number of independent supply sides
    pub fn side_count(&self) -> u32 {
        match self {
            SupplyTopology::DualFeed => 2,
            SupplyTopology::SingleFeed => 1,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SupplyTopology::DualFeed => "2 sides (A and B)",
            SupplyTopology::SingleFeed => "1 side (A)",
        }
    }
}

/// Low-voltage distribution to the racks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItDistribution {
    #[default]
    Busway,
    Cable,
}

/// Aisle containment strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Containment {
    #[default]
    ColdAisle,
    HotAisle,
    /// No containment
    Open,
}

impl Containment {
    /// Air-side mixing loss multiplier applied to the air-cooled heat load
    pub fn inefficiency_factor(&self) -> f64 {
        match self {
            Containment::ColdAisle => 1.05,
            Containment::HotAisle | Containment::Open => 1.25,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Containment::ColdAisle => "Cold aisle",
            Containment::HotAisle => "Hot aisle",
            Containment::Open => "No containment",
        }
    }
}

/// Cooling production technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoolingProduction {
    DxCondenser,
    #[default]
    AirWaterChiller,
    AirWaterChillerFreeCooling,
    WaterWaterChiller,
}

impl CoolingProduction {
    pub fn display_name(&self) -> &'static str {
        match self {
            CoolingProduction::DxCondenser => "DX condenser",
            CoolingProduction::AirWaterChiller => "Air/water chiller",
            CoolingProduction::AirWaterChillerFreeCooling => "Air/water chiller with free cooling",
            CoolingProduction::WaterWaterChiller => "Water/water chiller",
        }
    }
}

/// Heat exchanger construction between primary and secondary loops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeatExchanger {
    #[default]
    BrazedPlate,
    GasketedPlate,
    ShellAndTube,
}

/// Room-level cooling distribution equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoolingDistribution {
    #[default]
    Crah,
    Crac,
    InRowWater,
    InRowDx,
}

impl CoolingDistribution {
    pub fn display_name(&self) -> &'static str {
        match self {
            CoolingDistribution::Crah => "CRAH",
            CoolingDistribution::Crac => "CRAC",
            CoolingDistribution::InRowWater => "In-row (water)",
            CoolingDistribution::InRowDx => "In-row (DX)",
        }
    }
}

/// Heat rejection for the direct-liquid-cooling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DlcGeneration {
    #[default]
    AdiabaticDryCooler,
    HighTemperatureChiller,
}

/// Coolant distribution for DLC racks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DlcDistribution {
    #[default]
    InRackCdu,
    InRowCdu,
    Immersion,
}

/// Fire suppression technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Suppression {
    #[default]
    WaterMist,
    /// Clean agent gas (FK-5-1-12), priced per kg
    CleanAgent,
    /// Inert gas (IG-55), priced per m³
    InertGas,
}

impl Suppression {
    pub fn display_name(&self) -> &'static str {
        match self {
            Suppression::WaterMist => "Water mist",
            Suppression::CleanAgent => "Clean agent (FK-5-1-12)",
            Suppression::InertGas => "Inert gas (IG-55)",
        }
    }
}

// ============================================================================
// Parameter Snapshot
// ============================================================================

/// Input parameters for a facility sizing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParameters {
    // --- Redundancy and topology ---
    pub electrical_redundancy: RedundancyTier,
    pub hvac_redundancy: RedundancyTier,
    pub supply_topology: SupplyTopology,
    pub it_distribution: ItDistribution,

    // --- IT white space ---
    /// Number of aisle enclosures (pods)
    pub enclosure_count: u32,
    pub racks_per_enclosure: u32,
    pub servers_per_rack: u32,
    pub containment: Containment,
    /// Server idle draw (W); informational
    pub server_idle_power_w: f64,
    /// Server maximum draw (W); sizes the IT load
    pub server_max_power_w: f64,

    // --- Auxiliary loads ---
    pub lighting_power_w: f64,
    pub other_power_w: f64,

    // --- Air-side cooling ---
    pub hvac_cop: f64,
    pub air_inlet_temp_c: f64,
    pub air_outlet_temp_c: f64,
    pub cooling_production: CoolingProduction,
    pub heat_exchanger: HeatExchanger,
    pub cooling_distribution: CoolingDistribution,
    pub heat_exchanger_count: u32,

    // --- Direct liquid cooling ---
    /// Enclosures fitted with DLC
    pub dlc_enclosures: u32,
    pub dlc_generation: DlcGeneration,
    pub dlc_generation_cop: f64,
    pub dlc_distribution: DlcDistribution,
    /// Pumping/CDU auxiliary draw per DLC enclosure (W)
    pub dlc_aux_power_per_enclosure_w: f64,
    /// Share of IT heat captured by the liquid loop (0-1)
    pub dlc_capture_efficiency: f64,

    // --- Fire, life safety and security ---
    pub suppression: Suppression,
    pub fire_panels: u32,
    pub detection_units: u32,
    pub fire_pump_groups: u32,
    pub cameras: u32,
    pub access_points: u32,

    // --- Building geometry ---
    pub floor_count: u32,
    /// Gross area of one floor (m²)
    pub floor_area_m2: f64,
    /// White-space area (m²)
    pub it_room_area_m2: f64,
    /// Floor-to-floor height (m)
    pub floor_height_m: f64,

    // --- Sustainability factors ---
    /// Water use per unit of cooling energy (L/kWh)
    pub water_consumption_ratio: f64,
    /// Grid carbon intensity (kgCO₂/kWh)
    pub carbon_emission_factor: f64,
}

impl Default for DesignParameters {
    fn default() -> Self {
        DesignParameters {
            electrical_redundancy: RedundancyTier::TwoN,
            hvac_redundancy: RedundancyTier::NPlusOne,
            supply_topology: SupplyTopology::DualFeed,
            it_distribution: ItDistribution::Busway,

            enclosure_count: 4,
            racks_per_enclosure: 12,
            servers_per_rack: 10,
            containment: Containment::ColdAisle,
            server_idle_power_w: 100.0,
            server_max_power_w: 500.0,

            lighting_power_w: 2000.0,
            other_power_w: 3000.0,

            hvac_cop: 3.5,
            air_inlet_temp_c: 22.0,
            air_outlet_temp_c: 34.0,
            cooling_production: CoolingProduction::AirWaterChiller,
            heat_exchanger: HeatExchanger::BrazedPlate,
            cooling_distribution: CoolingDistribution::Crah,
            heat_exchanger_count: 2,

            dlc_enclosures: 0,
            dlc_generation: DlcGeneration::AdiabaticDryCooler,
            dlc_generation_cop: 10.0,
            dlc_distribution: DlcDistribution::InRackCdu,
            dlc_aux_power_per_enclosure_w: 500.0,
            dlc_capture_efficiency: 0.8,

            suppression: Suppression::WaterMist,
            fire_panels: 2,
            detection_units: 4,
            fire_pump_groups: 1,
            cameras: 20,
            access_points: 10,

            floor_count: 2,
            floor_area_m2: 500.0,
            it_room_area_m2: 400.0,
            floor_height_m: 4.5,

            water_consumption_ratio: 0.5,
            carbon_emission_factor: 0.35,
        }
    }
}

impl DesignParameters {
    /// Check the preconditions the sizers rely on.
    ///
    /// Only a hall without enclosures is rejected. Out-of-range values
    /// (zero COP, zero area, a DLC share above one) are sized as given and
    /// surfaced as report advisories.
    pub fn validate(&self) -> CalcResult<()> {
        if self.enclosure_count == 0 {
            return Err(CalcError::configuration(
                "enclosure_count",
                "a facility needs at least one enclosure",
            ));
        }
        Ok(())
    }

    /// Racks across all enclosures
    pub fn total_racks(&self) -> u64 {
        u64::from(self.enclosure_count) * u64::from(self.racks_per_enclosure)
    }

    /// Servers across all racks, saturating at `u64::MAX`
    pub fn total_servers(&self) -> u64 {
        self.total_racks().saturating_mul(u64::from(self.servers_per_rack))
    }

    /// Maximum IT draw of one rack (W)
    pub fn rack_power_w(&self) -> f64 {
        f64::from(self.servers_per_rack) * self.server_max_power_w
    }

    /// Racks in DLC-fitted enclosures
    pub fn dlc_racks(&self) -> u64 {
        u64::from(self.dlc_enclosures) * u64::from(self.racks_per_enclosure)
    }

    /// Gross built area across all floors (m²)
    pub fn total_built_area_m2(&self) -> f64 {
        f64::from(self.floor_count) * self.floor_area_m2
    }

    /// Building height (m)
    pub fn building_height_m(&self) -> f64 {
        f64::from(self.floor_count) * self.floor_height_m
    }

    /// White-space air volume (m³)
    pub fn it_room_volume_m3(&self) -> f64 {
        self.it_room_area_m2 * self.floor_height_m
    }
}
