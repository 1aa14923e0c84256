//! # Budget Aggregator
//!
//! Turns the sizing results into an ordered list of priced line items
//! (capital expenditure estimate). Quantities come from the sizers and from
//! simple geometric cable and pipe runs; unit prices come from the injected
//! [`PriceCatalog`].
//!
//! ## Cable runs
//!
//! ```text
//! height_total = floors × floor_height
//! room_run     = (height_total / 2 + √floor_area / 2) × enclosures × sides
//! ```
//!
//! The DLC category is only present when at least one enclosure is fitted
//! with DLC; it is omitted, not zeroed.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::budget::{self, BudgetCategory};
//! use calc_core::calculations;
//! use calc_core::catalog::Catalog;
//! use calc_core::parameters::DesignParameters;
//!
//! let params = DesignParameters::default();
//! let catalog = Catalog::builtin();
//! let sizing = calculations::calculate(&params, catalog).unwrap();
//! let budget = budget::build(&params, &sizing, catalog).unwrap();
//!
//! assert_eq!(budget.lines_in(BudgetCategory::Dlc).count(), 0);
//! assert!(budget.grand_total > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::FacilitySizing;
use crate::catalog::{Catalog, PriceCatalog, PriceItem, Unit};
use crate::errors::CalcResult;
use crate::parameters::{DesignParameters, Suppression};
use crate::units::SquareMeters;

/// Valves, pumps and accessories as a share of the steel piping cost
pub const PIPING_ACCESSORIES_FACTOR: f64 = 0.4;
/// Circulator pumps included in the accessories lump
pub const CIRCULATOR_PUMPS: u32 = 4;
/// MV feeder allowance beyond the building height, per side (m)
const MV_FEEDER_ALLOWANCE_M: f64 = 50.0;
/// Main LV feeder length per side (m)
const LV_FEEDER_PER_SIDE_M: f64 = 20.0;
/// Built area covered by one water-mist nozzle (m²)
const AREA_PER_NOZZLE_M2: f64 = 20.0;
/// Installed nozzle cost as a multiple of the bare nozzle (piping included)
const NOZZLE_INSTALLED_FACTOR: f64 = 3.0;
/// Clean agent design concentration (kg per m³ of IT room)
const CLEAN_AGENT_KG_PER_M3: f64 = 0.75;
/// Inert gas design quantity (m³ per m³ of IT room)
const INERT_GAS_M3_PER_M3: f64 = 0.5;
/// Copper data ports per rack
const COPPER_PORTS_PER_RACK: f64 = 24.0;
/// Average copper patch length (m)
const COPPER_RUN_M: f64 = 10.0;
/// Fibre backbone strands per metre of building height
const FIBRE_BACKBONE_FACTOR: f64 = 4.0;
/// Fibre horizontal allowance per rack beyond the room side (m)
const FIBRE_RACK_ALLOWANCE_M: f64 = 10.0;
/// Cooling capacity per room unit for the CRAH line (kW)
const CRAH_UNIT_KW: f64 = 100.0;

// ============================================================================
// Line Items
// ============================================================================

/// Budget chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetCategory {
    Civil,
    Electrical,
    Hvac,
    Dlc,
    FireProtection,
    Communications,
    SecurityBms,
}

impl BudgetCategory {
    /// All categories in budget order
    pub const ALL: [BudgetCategory; 7] = [
        BudgetCategory::Civil,
        BudgetCategory::Electrical,
        BudgetCategory::Hvac,
        BudgetCategory::Dlc,
        BudgetCategory::FireProtection,
        BudgetCategory::Communications,
        BudgetCategory::SecurityBms,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            BudgetCategory::Civil => "Civil works",
            BudgetCategory::Electrical => "Electrical",
            BudgetCategory::Hvac => "HVAC",
            BudgetCategory::Dlc => "DLC",
            BudgetCategory::FireProtection => "Fire protection",
            BudgetCategory::Communications => "Communications",
            BudgetCategory::SecurityBms => "Security / BMS",
        }
    }
}

impl std::fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One priced budget line. `total` is always `quantity × unit_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLineItem {
    pub category: BudgetCategory,
    pub description: String,
    pub unit: Unit,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

impl BudgetLineItem {
    pub fn new(
        category: BudgetCategory,
        description: impl Into<String>,
        unit: Unit,
        quantity: f64,
        unit_price: f64,
    ) -> Self {
        BudgetLineItem {
            category,
            description: description.into(),
            unit,
            quantity,
            unit_price,
            total: quantity * unit_price,
        }
    }
}

/// Ordered budget with its grand total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub lines: Vec<BudgetLineItem>,
    /// Sum of every line total
    pub grand_total: f64,
}

impl Budget {
    fn from_lines(lines: Vec<BudgetLineItem>) -> Self {
        let grand_total = lines.iter().map(|line| line.total).sum();
        Budget { lines, grand_total }
    }

    /// Lines of one category, in budget order
    pub fn lines_in(&self, category: BudgetCategory) -> impl Iterator<Item = &BudgetLineItem> + '_ {
        self.lines.iter().filter(move |line| line.category == category)
    }

    /// Sum of the line totals in one category
    pub fn category_total(&self, category: BudgetCategory) -> f64 {
        self.lines_in(category).map(|line| line.total).sum()
    }

    /// (category, subtotal) for every category that has lines
    pub fn subtotals(&self) -> Vec<(BudgetCategory, f64)> {
        BudgetCategory::ALL
            .iter()
            .filter(|category| self.lines_in(**category).next().is_some())
            .map(|category| (*category, self.category_total(*category)))
            .collect()
    }

    /// Find a line by its description
    pub fn line(&self, description: &str) -> Option<&BudgetLineItem> {
        self.lines.iter().find(|line| line.description == description)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Collects lines, resolving catalog prices as it goes
struct LineBuilder<'a> {
    prices: &'a PriceCatalog,
    lines: Vec<BudgetLineItem>,
}

impl<'a> LineBuilder<'a> {
    fn new(prices: &'a PriceCatalog) -> Self {
        LineBuilder {
            prices,
            lines: Vec::new(),
        }
    }

    /// Line priced straight from a catalog item
    fn item(
        &mut self,
        category: BudgetCategory,
        description: &str,
        unit: Unit,
        quantity: f64,
        item: PriceItem,
    ) -> CalcResult<()> {
        let unit_price = self.prices.price(item)?;
        self.lines
            .push(BudgetLineItem::new(category, description, unit, quantity, unit_price));
        Ok(())
    }

    /// Lump-sum line with an already-computed price
    fn lump(&mut self, category: BudgetCategory, description: &str, price: f64) {
        self.lines
            .push(BudgetLineItem::new(category, description, Unit::Lump, 1.0, price));
    }
}

/// Geometric runs shared by the electrical and data lines (m)
struct CableRuns {
    height_total: f64,
    room_run: f64,
}

impl CableRuns {
    fn new(params: &DesignParameters, side_count: u32) -> Self {
        let height_total = params.building_height_m();
        let floor_side = SquareMeters(params.floor_area_m2).side().0;
        let room_run = (height_total / 2.0 + floor_side / 2.0)
            * f64::from(params.enclosure_count)
            * f64::from(side_count);
        CableRuns {
            height_total,
            room_run,
        }
    }
}

/// Build the facility budget.
///
/// # Arguments
///
/// * `params` - The parameter snapshot the sizing was run with
/// * `sizing` - Results of [`calculations::calculate`](crate::calculations::calculate)
/// * `catalog` - Unit prices and the electrical redundancy factor
///
/// # Errors
///
/// * `CalcError::CatalogEntryNotFound` - a required price is missing
pub fn build(params: &DesignParameters, sizing: &FacilitySizing, catalog: &Catalog) -> CalcResult<Budget> {
    use BudgetCategory::*;

    let mut b = LineBuilder::new(&catalog.prices);

    let racks = params.total_racks() as f64;
    let sides = f64::from(sizing.electrical.side_count);
    let runs = CableRuns::new(params, sizing.electrical.side_count);
    let elec_factor = catalog.redundancy.factor(params.electrical_redundancy);

    // --- Civil ---
    b.item(Civil, "Architectural fit-out", Unit::SquareMeter, params.total_built_area_m2(), PriceItem::RoomFitOut)?;
    b.item(Civil, "Raised floor", Unit::SquareMeter, params.it_room_area_m2, PriceItem::RaisedFloor)?;
    b.item(Civil, "Aisle containment", Unit::Each, f64::from(params.enclosure_count), PriceItem::AisleContainment)?;
    b.item(Civil, "Server racks", Unit::Each, racks, PriceItem::Rack42U)?;

    // --- Electrical ---
    b.item(Electrical, "MV cells", Unit::Each, f64::from(sizing.electrical.mv_cell_count), PriceItem::MvCell)?;
    b.item(Electrical, "Transformers", Unit::Each, sides, PriceItem::Transformer)?;
    b.item(
        Electrical,
        "Generator sets",
        Unit::Kva,
        sizing.electrical.total_apparent_kva * elec_factor,
        PriceItem::DieselGenerator,
    )?;
    b.item(Electrical, "UPS", Unit::Kw, sizing.loads.total_kw() * elec_factor, PriceItem::ModularUps)?;
    b.item(Electrical, "LV switchboards", Unit::Each, sides, PriceItem::LvSwitchboard)?;
    let feeders = (runs.height_total + MV_FEEDER_ALLOWANCE_M) * sides + LV_FEEDER_PER_SIDE_M * sides;
    b.item(Electrical, "MV/LV feeders", Unit::Meter, feeders, PriceItem::HeavyPowerCable)?;
    b.item(Electrical, "Busway / room lines", Unit::Meter, runs.room_run + 2.0 * racks, PriceItem::Busway)?;
    b.item(Electrical, "Electrical trays", Unit::Meter, runs.room_run, PriceItem::ElectricalTray)?;
    b.item(Electrical, "Last-mile rack cabling", Unit::Each, 2.0 * racks, PriceItem::RackCabling)?;

    // --- HVAC ---
    let installed_kw = sizing.hvac.installed_capacity_kw;
    let room_units = (installed_kw / CRAH_UNIT_KW).ceil();
    b.item(Hvac, "Cooling production", Unit::KwCooling, installed_kw, PriceItem::Chiller)?;
    b.item(Hvac, "CRAH units", Unit::Each, room_units, PriceItem::CrahUnit)?;
    let hvac_pipe_m = sizing.hvac.pipe_length_m();
    let steel_pipe_price = catalog.prices.price(PriceItem::SteelPipe)?;
    b.item(Hvac, "Insulated steel piping", Unit::Meter, hvac_pipe_m, PriceItem::SteelPipe)?;
    let accessories = hvac_pipe_m * steel_pipe_price * PIPING_ACCESSORIES_FACTOR
        + f64::from(CIRCULATOR_PUMPS) * catalog.prices.price(PriceItem::CirculatorPump)?;
    b.lump(Hvac, "Valves, pumps and accessories", accessories);

    // --- DLC ---
    if params.dlc_enclosures > 0 {
        b.item(Dlc, "CDUs", Unit::Each, f64::from(params.dlc_enclosures), PriceItem::Cdu)?;
        b.item(Dlc, "DLC hydraulic network", Unit::Meter, sizing.dlc.pipe_length_m(), PriceItem::SmallBorePipe)?;
        b.item(Dlc, "Manifolds and hoses", Unit::Each, params.dlc_racks() as f64, PriceItem::RackManifold)?;
    }

    // --- Fire protection ---
    let detection = catalog.prices.price(PriceItem::FirePanel)? + racks * catalog.prices.price(PriceItem::Detector)?;
    b.lump(FireProtection, "Detection system", detection);
    let it_volume = params.it_room_volume_m3();
    match params.suppression {
        Suppression::WaterMist => {
            b.item(FireProtection, "Water mist pump set", Unit::Each, 1.0, PriceItem::WaterMistPumpSet)?;
            let nozzles = (params.total_built_area_m2() / AREA_PER_NOZZLE_M2).floor();
            let installed_nozzle = catalog.prices.price(PriceItem::WaterMistNozzle)? * NOZZLE_INSTALLED_FACTOR;
            b.lines.push(BudgetLineItem::new(
                FireProtection,
                "Mist piping and nozzles",
                Unit::Each,
                nozzles,
                installed_nozzle,
            ));
        }
        Suppression::CleanAgent => {
            b.item(
                FireProtection,
                "Clean agent gas",
                Unit::Kilogram,
                it_volume * CLEAN_AGENT_KG_PER_M3,
                PriceItem::CleanAgentGas,
            )?;
        }
        Suppression::InertGas => {
            b.item(
                FireProtection,
                "Inert gas cylinders",
                Unit::CubicMeter,
                it_volume * INERT_GAS_M3_PER_M3,
                PriceItem::InertGas,
            )?;
        }
    }

    // --- Communications ---
    let copper = racks * COPPER_PORTS_PER_RACK * COPPER_RUN_M;
    let it_side = SquareMeters(params.it_room_area_m2).side().0;
    let fibre = runs.height_total * FIBRE_BACKBONE_FACTOR + (it_side + FIBRE_RACK_ALLOWANCE_M) * racks;
    b.item(Communications, "Cat6A copper cabling", Unit::Meter, copper, PriceItem::CopperCat6a)?;
    b.item(Communications, "Optical fibre", Unit::Meter, fibre, PriceItem::OpticalFibre)?;
    b.item(Communications, "Fibre / data trays", Unit::Meter, runs.room_run, PriceItem::FibreTray)?;

    // --- Security / BMS ---
    let bms_points = room_units * 10.0 + sides * 20.0 + racks * 2.0;
    b.item(SecurityBms, "BMS / DCIM integration", Unit::Point, bms_points, PriceItem::BmsPoint)?;
    let cctv = f64::from(params.cameras) * catalog.prices.price(PriceItem::CctvCamera)?
        + f64::from(params.access_points) * catalog.prices.price(PriceItem::AccessControlPoint)?;
    b.lump(SecurityBms, "CCTV and access control", cctv);

    let budget = Budget::from_lines(b.lines);
    tracing::debug!(
        lines = budget.lines.len(),
        grand_total = budget.grand_total,
        "budget assembled"
    );
    Ok(budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations;
    use crate::catalog::PriceCatalog;

    fn default_budget(params: &DesignParameters, catalog: &Catalog) -> Budget {
        let sizing = calculations::calculate(params, catalog).unwrap();
        build(params, &sizing, catalog).unwrap()
    }

    fn total_of(budget: &Budget, description: &str) -> f64 {
        budget.line(description).unwrap().total
    }

    #[test]
    fn test_default_line_values() {
        let params = DesignParameters::default();
        let budget = default_budget(&params, Catalog::builtin());

        assert_eq!(budget.lines.len(), 25);
        assert!((total_of(&budget, "Architectural fit-out") - 850_000.0).abs() < 1e-6);
        assert!((total_of(&budget, "Server racks") - 57_600.0).abs() < 1e-6);
        assert!((total_of(&budget, "MV cells") - 72_000.0).abs() < 1e-6);
        // 379 kVA × 2.0 × 200
        assert!((total_of(&budget, "Generator sets") - 151_600.0).abs() < 1e-6);
        // 341.1 kW × 2.0 × 250
        assert!((total_of(&budget, "UPS") - 170_550.0).abs() < 1e-6);
        // ((9 + 50) × 2 + 20 × 2) m × 60
        assert!((total_of(&budget, "MV/LV feeders") - 9_480.0).abs() < 1e-6);
        // 315 kW: 4 CRAH units
        assert!((total_of(&budget, "CRAH units") - 72_000.0).abs() < 1e-6);
        // 2500 + 48 × 150
        assert!((total_of(&budget, "Detection system") - 9_700.0).abs() < 1e-6);
        // 50 nozzles × 600
        assert!((total_of(&budget, "Mist piping and nozzles") - 30_000.0).abs() < 1e-6);
        // 48 × 240 m × 3
        assert!((total_of(&budget, "Cat6A copper cabling") - 34_560.0).abs() < 1e-6);
        // (9 × 4 + 30 × 48) m × 8
        assert!((total_of(&budget, "Optical fibre") - 11_808.0).abs() < 1e-6);
        // (40 + 40 + 96) points × 350
        assert!((total_of(&budget, "BMS / DCIM integration") - 61_600.0).abs() < 1e-6);
        // 20 × 400 + 10 × 1200
        assert!((total_of(&budget, "CCTV and access control") - 20_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_room_run_lines() {
        let params = DesignParameters::default();
        let budget = default_budget(&params, Catalog::builtin());
        // (4.5 + √500 / 2) × 4 × 2
        let room_run = (4.5 + 500f64.sqrt() / 2.0) * 8.0;
        let trays = budget.line("Electrical trays").unwrap();
        assert!((trays.quantity - room_run).abs() < 1e-9);
        let busway = budget.line("Busway / room lines").unwrap();
        assert!((busway.quantity - (room_run + 96.0)).abs() < 1e-9);
    }

    #[test]
    fn test_accessories_lump() {
        let params = DesignParameters::default();
        let catalog = Catalog::builtin();
        let sizing = calculations::calculate(&params, catalog).unwrap();
        let budget = build(&params, &sizing, catalog).unwrap();

        let piping = budget.line("Insulated steel piping").unwrap();
        let lump = budget.line("Valves, pumps and accessories").unwrap();
        assert_eq!(lump.unit, Unit::Lump);
        assert_eq!(lump.quantity, 1.0);
        assert!((lump.total - (piping.total * 0.4 + 4.0 * 4500.0)).abs() < 1e-6);
        assert!((piping.quantity - sizing.hvac.pipe_length_m()).abs() < 1e-9);
    }

    #[test]
    fn test_grand_total_is_sum_of_lines() {
        let budget = default_budget(&DesignParameters::default(), Catalog::builtin());
        let sum: f64 = budget.lines.iter().map(|line| line.total).sum();
        assert!((budget.grand_total - sum).abs() < 1e-6);

        let by_category: f64 = budget.subtotals().iter().map(|(_, total)| total).sum();
        assert!((budget.grand_total - by_category).abs() < 1e-6);
        for line in &budget.lines {
            assert!((line.total - line.quantity * line.unit_price).abs() < 1e-9);
        }
    }

    #[test]
    fn test_dlc_lines_only_with_dlc() {
        let params = DesignParameters::default();
        let budget = default_budget(&params, Catalog::builtin());
        assert_eq!(budget.lines_in(BudgetCategory::Dlc).count(), 0);
        assert!(budget.subtotals().iter().all(|(category, _)| *category != BudgetCategory::Dlc));

        let params = DesignParameters {
            dlc_enclosures: 2,
            ..DesignParameters::default()
        };
        let budget = default_budget(&params, Catalog::builtin());
        let dlc: Vec<_> = budget.lines_in(BudgetCategory::Dlc).collect();
        assert_eq!(dlc.len(), 3);
        assert!((dlc[0].total - 70_000.0).abs() < 1e-6);
        // 2 enclosures × 12 racks
        assert_eq!(dlc[2].quantity, 24.0);
        assert!(dlc[1].quantity > 0.0);
    }

    #[test]
    fn test_suppression_branches() {
        let params = DesignParameters {
            suppression: Suppression::CleanAgent,
            ..DesignParameters::default()
        };
        let budget = default_budget(&params, Catalog::builtin());
        assert_eq!(budget.lines_in(BudgetCategory::FireProtection).count(), 2);
        // 400 m² × 4.5 m × 0.75 kg/m³
        let gas = budget.line("Clean agent gas").unwrap();
        assert!((gas.quantity - 1350.0).abs() < 1e-9);
        assert!(budget.line("Water mist pump set").is_none());

        let params = DesignParameters {
            suppression: Suppression::InertGas,
            ..DesignParameters::default()
        };
        let budget = default_budget(&params, Catalog::builtin());
        let gas = budget.line("Inert gas cylinders").unwrap();
        assert!((gas.quantity - 900.0).abs() < 1e-9);
        assert_eq!(gas.unit, Unit::CubicMeter);
    }

    #[test]
    fn test_price_change_only_touches_its_lines() {
        let params = DesignParameters::default();
        let base_catalog = Catalog::default();
        let mut dear_catalog = Catalog::default();
        dear_catalog.prices.set(PriceItem::Chiller, 300.0);

        let base = default_budget(&params, &base_catalog);
        let dear = default_budget(&params, &dear_catalog);

        assert_eq!(base.lines.len(), dear.lines.len());
        for (a, b) in base.lines.iter().zip(&dear.lines) {
            if a.description == "Cooling production" {
                assert!((b.total - 2.0 * a.total).abs() < 1e-6);
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_steel_pipe_price_feeds_piping_and_accessories() {
        let params = DesignParameters::default();
        let base_catalog = Catalog::default();
        let mut dear_catalog = Catalog::default();
        let steel = base_catalog.prices.price(PriceItem::SteelPipe).unwrap();
        dear_catalog.prices.set(PriceItem::SteelPipe, 2.0 * steel);

        let base = default_budget(&params, &base_catalog);
        let dear = default_budget(&params, &dear_catalog);

        let changed: Vec<_> = base
            .lines
            .iter()
            .zip(&dear.lines)
            .filter(|(a, b)| a != b)
            .map(|(a, _)| a.description.as_str())
            .collect();
        assert_eq!(changed, ["Insulated steel piping", "Valves, pumps and accessories"]);
    }

    #[test]
    fn test_missing_price_is_error() {
        let params = DesignParameters::default();
        let mut catalog = Catalog::default();
        catalog.prices = PriceCatalog::empty().with_price(PriceItem::RoomFitOut, 850.0);
        let sizing = calculations::calculate(&params, &catalog).unwrap();
        let err = build(&params, &sizing, &catalog).unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_ENTRY_NOT_FOUND");
    }
}
