//! Reference Unit Prices
//!
//! The fixed price list used by the budget aggregator. Each [`PriceItem`]
//! carries its pricing unit and a default price in currency per unit; a
//! [`PriceCatalog`] maps items to prices and can be overridden per run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Unit of measure for catalog prices and budget quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    SquareMeter,
    Each,
    Meter,
    Kva,
    Kw,
    /// Kilowatt of cooling capacity
    KwCooling,
    Kilogram,
    CubicMeter,
    /// Integration or access point
    Point,
    /// Lump sum, quantity 1
    Lump,
    /// Fraction of another line's cost
    Fraction,
}

impl Unit {
    /// Short symbol for tables
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::SquareMeter => "m²",
            Unit::Each => "ud",
            Unit::Meter => "m",
            Unit::Kva => "kVA",
            Unit::Kw => "kW",
            Unit::KwCooling => "kW_cooling",
            Unit::Kilogram => "kg",
            Unit::CubicMeter => "m³",
            Unit::Point => "points",
            Unit::Lump => "lump",
            Unit::Fraction => "%",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Priced item in the reference catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceItem {
    // Civil
    RoomFitOut,
    StructuralReinforcement,
    RaisedFloor,
    AisleContainment,
    Rack42U,
    // Electrical
    MvCell,
    Transformer,
    DieselGenerator,
    ModularUps,
    LvSwitchboard,
    ItDistributionBoard,
    Busway,
    HeavyPowerCable,
    MediumPowerCable,
    RackCabling,
    ElectricalTray,
    // HVAC
    Chiller,
    CrahUnit,
    SteelPipe,
    SmallBorePipe,
    ValvesAndFittings,
    CirculatorPump,
    // DLC
    Cdu,
    RackManifold,
    DlcHose,
    // Fire / life safety
    FirePanel,
    Detector,
    CleanAgentGas,
    InertGas,
    WaterMistPumpSet,
    WaterMistNozzle,
    // Security / communications / BMS
    CctvCamera,
    AccessControlPoint,
    OpticalFibre,
    CopperCat6a,
    FibreTray,
    BmsPoint,
}

impl PriceItem {
    /// Every catalog item, in catalog order
    pub const ALL: [PriceItem; 37] = [
        PriceItem::RoomFitOut,
        PriceItem::StructuralReinforcement,
        PriceItem::RaisedFloor,
        PriceItem::AisleContainment,
        PriceItem::Rack42U,
        PriceItem::MvCell,
        PriceItem::Transformer,
        PriceItem::DieselGenerator,
        PriceItem::ModularUps,
        PriceItem::LvSwitchboard,
        PriceItem::ItDistributionBoard,
        PriceItem::Busway,
        PriceItem::HeavyPowerCable,
        PriceItem::MediumPowerCable,
        PriceItem::RackCabling,
        PriceItem::ElectricalTray,
        PriceItem::Chiller,
        PriceItem::CrahUnit,
        PriceItem::SteelPipe,
        PriceItem::SmallBorePipe,
        PriceItem::ValvesAndFittings,
        PriceItem::CirculatorPump,
        PriceItem::Cdu,
        PriceItem::RackManifold,
        PriceItem::DlcHose,
        PriceItem::FirePanel,
        PriceItem::Detector,
        PriceItem::CleanAgentGas,
        PriceItem::InertGas,
        PriceItem::WaterMistPumpSet,
        PriceItem::WaterMistNozzle,
        PriceItem::CctvCamera,
        PriceItem::AccessControlPoint,
        PriceItem::OpticalFibre,
        PriceItem::CopperCat6a,
        PriceItem::FibreTray,
        PriceItem::BmsPoint,
    ];

    /// Catalog description
    pub fn display_name(&self) -> &'static str {
        match self {
            PriceItem::RoomFitOut => "Room fit-out / civil works",
            PriceItem::StructuralReinforcement => "Structural reinforcement",
            PriceItem::RaisedFloor => "Raised technical floor",
            PriceItem::AisleContainment => "Aisle containment enclosure",
            PriceItem::Rack42U => "Rack 42U",
            PriceItem::MvCell => "MV switchgear cell",
            PriceItem::Transformer => "Transformer 1000-2500 kVA",
            PriceItem::DieselGenerator => "Diesel generator",
            PriceItem::ModularUps => "Modular UPS",
            PriceItem::LvSwitchboard => "Main LV switchboard",
            PriceItem::ItDistributionBoard => "IT distribution board",
            PriceItem::Busway => "Busway",
            PriceItem::HeavyPowerCable => "Heavy power cabling",
            PriceItem::MediumPowerCable => "Medium power cabling",
            PriceItem::RackCabling => "Rack power cabling",
            PriceItem::ElectricalTray => "Electrical cable tray",
            PriceItem::Chiller => "Chiller",
            PriceItem::CrahUnit => "CRAH / in-row unit",
            PriceItem::SteelPipe => "Steel pipe DN100-200",
            PriceItem::SmallBorePipe => "Copper/PPR small-bore pipe",
            PriceItem::ValvesAndFittings => "Valves and fittings (share of piping)",
            PriceItem::CirculatorPump => "Circulator pump",
            PriceItem::Cdu => "Coolant distribution unit",
            PriceItem::RackManifold => "Rack manifold",
            PriceItem::DlcHose => "DLC hose set",
            PriceItem::FirePanel => "Fire alarm panel",
            PriceItem::Detector => "Detector / sensor",
            PriceItem::CleanAgentGas => "Clean agent (FK-5-1-12)",
            PriceItem::InertGas => "Inert gas (IG-55)",
            PriceItem::WaterMistPumpSet => "Water mist pump set",
            PriceItem::WaterMistNozzle => "Water mist nozzle",
            PriceItem::CctvCamera => "CCTV camera",
            PriceItem::AccessControlPoint => "Access control point",
            PriceItem::OpticalFibre => "Optical fibre OM4/OS2",
            PriceItem::CopperCat6a => "Copper cable Cat6A",
            PriceItem::FibreTray => "Wire mesh / fibre tray",
            PriceItem::BmsPoint => "BMS integration point",
        }
    }

    /// Pricing unit
    pub fn unit(&self) -> Unit {
        match self {
            PriceItem::RoomFitOut | PriceItem::StructuralReinforcement | PriceItem::RaisedFloor => {
                Unit::SquareMeter
            }
            PriceItem::Busway
            | PriceItem::HeavyPowerCable
            | PriceItem::MediumPowerCable
            | PriceItem::ElectricalTray
            | PriceItem::SteelPipe
            | PriceItem::SmallBorePipe
            | PriceItem::OpticalFibre
            | PriceItem::CopperCat6a
            | PriceItem::FibreTray => Unit::Meter,
            PriceItem::DieselGenerator => Unit::Kva,
            PriceItem::ModularUps | PriceItem::Chiller => Unit::Kw,
            PriceItem::ValvesAndFittings => Unit::Fraction,
            PriceItem::CleanAgentGas => Unit::Kilogram,
            PriceItem::InertGas => Unit::CubicMeter,
            PriceItem::AccessControlPoint => Unit::Point,
            _ => Unit::Each,
        }
    }

    /// Reference price in currency per unit
    pub fn default_price(&self) -> f64 {
        match self {
            PriceItem::RoomFitOut => 850.0,
            PriceItem::StructuralReinforcement => 150.0,
            PriceItem::RaisedFloor => 120.0,
            PriceItem::AisleContainment => 3500.0,
            PriceItem::Rack42U => 1200.0,
            PriceItem::MvCell => 18_000.0,
            PriceItem::Transformer => 45_000.0,
            PriceItem::DieselGenerator => 200.0,
            PriceItem::ModularUps => 250.0,
            PriceItem::LvSwitchboard => 25_000.0,
            PriceItem::ItDistributionBoard => 8000.0,
            PriceItem::Busway => 450.0,
            PriceItem::HeavyPowerCable => 60.0,
            PriceItem::MediumPowerCable => 25.0,
            PriceItem::RackCabling => 50.0,
            PriceItem::ElectricalTray => 45.0,
            PriceItem::Chiller => 150.0,
            PriceItem::CrahUnit => 18_000.0,
            PriceItem::SteelPipe => 180.0,
            PriceItem::SmallBorePipe => 45.0,
            PriceItem::ValvesAndFittings => 0.30,
            PriceItem::CirculatorPump => 4500.0,
            PriceItem::Cdu => 35_000.0,
            PriceItem::RackManifold => 2000.0,
            PriceItem::DlcHose => 150.0,
            PriceItem::FirePanel => 2500.0,
            PriceItem::Detector => 150.0,
            PriceItem::CleanAgentGas => 60.0,
            PriceItem::InertGas => 40.0,
            PriceItem::WaterMistPumpSet => 40_000.0,
            PriceItem::WaterMistNozzle => 200.0,
            PriceItem::CctvCamera => 400.0,
            PriceItem::AccessControlPoint => 1200.0,
            PriceItem::OpticalFibre => 8.0,
            PriceItem::CopperCat6a => 3.0,
            PriceItem::FibreTray => 40.0,
            PriceItem::BmsPoint => 350.0,
        }
    }
}

/// Unit prices keyed by catalog item.
///
/// Serializes as a JSON object (`{"Chiller": 150.0, ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceCatalog {
    prices: BTreeMap<PriceItem, f64>,
}

impl Default for PriceCatalog {
    fn default() -> Self {
        PriceCatalog {
            prices: PriceItem::ALL
                .iter()
                .map(|item| (*item, item.default_price()))
                .collect(),
        }
    }
}

impl PriceCatalog {
    /// Catalog with no entries (every lookup fails)
    pub fn empty() -> Self {
        PriceCatalog {
            prices: BTreeMap::new(),
        }
    }

    /// Look up the unit price of an item
    pub fn price(&self, item: PriceItem) -> CalcResult<f64> {
        self.prices
            .get(&item)
            .copied()
            .ok_or_else(|| CalcError::catalog_entry_not_found(item.display_name()))
    }

    /// Set the unit price of an item
    pub fn set(&mut self, item: PriceItem, price: f64) {
        self.prices.insert(item, price);
    }

    /// Builder-style price override
    pub fn with_price(mut self, item: PriceItem, price: f64) -> Self {
        self.set(item, price);
        self
    }

    /// Apply overrides on top of the current prices
    pub fn merge(&mut self, overrides: BTreeMap<PriceItem, f64>) {
        self.prices.extend(overrides);
    }

    /// Iterate over (item, price) in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (PriceItem, f64)> + '_ {
        self.prices.iter().map(|(item, price)| (*item, *price))
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_complete() {
        let catalog = PriceCatalog::default();
        assert_eq!(catalog.len(), PriceItem::ALL.len());
        for item in PriceItem::ALL {
            assert_eq!(catalog.price(item).unwrap(), item.default_price());
        }
    }

    #[test]
    fn test_missing_entry() {
        let catalog = PriceCatalog::empty();
        let err = catalog.price(PriceItem::Chiller).unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_ENTRY_NOT_FOUND");
    }

    #[test]
    fn test_override() {
        let catalog = PriceCatalog::default().with_price(PriceItem::Chiller, 175.0);
        assert_eq!(catalog.price(PriceItem::Chiller).unwrap(), 175.0);
        assert_eq!(catalog.price(PriceItem::CrahUnit).unwrap(), 18_000.0);
    }

    #[test]
    fn test_merge_keeps_untouched_entries() {
        let mut catalog = PriceCatalog::default();
        let overrides: BTreeMap<PriceItem, f64> =
            serde_json::from_str(r#"{"Transformer": 52000.0}"#).unwrap();
        catalog.merge(overrides);
        assert_eq!(catalog.price(PriceItem::Transformer).unwrap(), 52_000.0);
        assert_eq!(catalog.len(), PriceItem::ALL.len());
    }

    #[test]
    fn test_units() {
        assert_eq!(PriceItem::RoomFitOut.unit(), Unit::SquareMeter);
        assert_eq!(PriceItem::CleanAgentGas.unit().symbol(), "kg");
        assert_eq!(PriceItem::InertGas.unit().symbol(), "m³");
        assert_eq!(PriceItem::Cdu.unit(), Unit::Each);
    }
}
