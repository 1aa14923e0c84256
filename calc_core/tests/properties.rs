//! Property tests over the sizing engine.

use calc_core::budget;
use calc_core::calculations::{self, hydraulic, HydraulicCircuit, LoopSizing};
use calc_core::catalog::{default_pipe_sizes, Catalog, PriceItem};
use calc_core::parameters::{Containment, DesignParameters, SupplyTopology};
use calc_core::redundancy::{RedundancyTable, RedundancyTier};
use calc_core::units::{pipe_bore_area, Kilowatts};
use proptest::prelude::*;

fn geometry() -> hydraulic::PipeRunGeometry {
    hydraulic::PipeRunGeometry {
        floor_area_m2: 500.0,
        floor_height_m: 4.5,
        floor_count: 2,
    }
}

fn velocity(flow_m3s: f64, circuits: u32, diameter_mm: f64) -> f64 {
    flow_m3s / f64::from(circuits) / pipe_bore_area(diameter_mm).0
}

/// Budget lines priced straight from `item`, and lump lines whose price
/// includes it
fn lines_fed_by(item: PriceItem) -> (Vec<&'static str>, Vec<&'static str>) {
    use PriceItem::*;
    match item {
        RoomFitOut => (vec!["Architectural fit-out"], vec![]),
        RaisedFloor => (vec!["Raised floor"], vec![]),
        AisleContainment => (vec!["Aisle containment"], vec![]),
        Rack42U => (vec!["Server racks"], vec![]),
        MvCell => (vec!["MV cells"], vec![]),
        Transformer => (vec!["Transformers"], vec![]),
        DieselGenerator => (vec!["Generator sets"], vec![]),
        ModularUps => (vec!["UPS"], vec![]),
        LvSwitchboard => (vec!["LV switchboards"], vec![]),
        Busway => (vec!["Busway / room lines"], vec![]),
        HeavyPowerCable => (vec!["MV/LV feeders"], vec![]),
        RackCabling => (vec!["Last-mile rack cabling"], vec![]),
        ElectricalTray => (vec!["Electrical trays"], vec![]),
        Chiller => (vec!["Cooling production"], vec![]),
        CrahUnit => (vec!["CRAH units"], vec![]),
        SteelPipe => (vec!["Insulated steel piping"], vec!["Valves, pumps and accessories"]),
        CirculatorPump => (vec![], vec!["Valves, pumps and accessories"]),
        SmallBorePipe => (vec!["DLC hydraulic network"], vec![]),
        Cdu => (vec!["CDUs"], vec![]),
        RackManifold => (vec!["Manifolds and hoses"], vec![]),
        FirePanel | Detector => (vec![], vec!["Detection system"]),
        CleanAgentGas => (vec!["Clean agent gas"], vec![]),
        InertGas => (vec!["Inert gas cylinders"], vec![]),
        WaterMistPumpSet => (vec!["Water mist pump set"], vec![]),
        WaterMistNozzle => (vec![], vec!["Mist piping and nozzles"]),
        CctvCamera | AccessControlPoint => (vec![], vec!["CCTV and access control"]),
        OpticalFibre => (vec!["Optical fibre"], vec![]),
        CopperCat6a => (vec!["Cat6A copper cabling"], vec![]),
        FibreTray => (vec!["Fibre / data trays"], vec![]),
        BmsPoint => (vec!["BMS / DCIM integration"], vec![]),
        // Catalogued for reference, never priced into the budget
        StructuralReinforcement | ItDistributionBoard | MediumPowerCable | ValvesAndFittings | DlcHose => {
            (vec![], vec![])
        }
    }
}

fn arb_containment() -> impl Strategy<Value = Containment> {
    prop_oneof![
        Just(Containment::ColdAisle),
        Just(Containment::HotAisle),
        Just(Containment::Open),
    ]
}

fn arb_tier() -> impl Strategy<Value = RedundancyTier> {
    prop::sample::select(RedundancyTier::ALL.to_vec())
}

prop_compose! {
    fn arb_params()(
        enclosure_count in 1u32..20,
        racks_per_enclosure in 1u32..20,
        servers_per_rack in 0u32..40,
        server_max_power_w in 100.0f64..1500.0,
        dlc_fraction in 0.0f64..=1.0,
        dlc_capture_efficiency in 0.0f64..=1.0,
        hvac_cop in 0.0f64..8.0,
        containment in arb_containment(),
        (electrical_redundancy, hvac_redundancy) in (arb_tier(), arb_tier()),
        single_feed in any::<bool>(),
        (floor_count, floor_area_m2) in (1u32..6, 100.0f64..5000.0),
    ) -> DesignParameters {
        let dlc_enclosures = (f64::from(enclosure_count) * dlc_fraction).floor() as u32;
        DesignParameters {
            enclosure_count,
            racks_per_enclosure,
            servers_per_rack,
            server_max_power_w,
            dlc_enclosures,
            dlc_capture_efficiency,
            hvac_cop,
            containment,
            electrical_redundancy,
            hvac_redundancy,
            supply_topology: if single_feed { SupplyTopology::SingleFeed } else { SupplyTopology::DualFeed },
            floor_count,
            floor_area_m2,
            ..DesignParameters::default()
        }
    }
}

proptest! {
    #[test]
    fn negligible_load_is_null_record(load_kw in -100.0f64..=0.1, delta_t in -10.0f64..20.0) {
        let sizing = hydraulic::size_loop(Kilowatts(load_kw), delta_t, &geometry(), &default_pipe_sizes());
        prop_assert!(sizing.is_degenerate());
        prop_assert_eq!(sizing.circuit(), HydraulicCircuit::null());
    }

    #[test]
    fn sized_loops_respect_velocity_and_minimal_circuits(load_kw in 0.11f64..20_000.0, delta_t in 0.5f64..15.0) {
        let pipes = default_pipe_sizes();
        let largest = pipes.iter().map(|p| p.diameter_mm).fold(0.0, f64::max);
        let flow = hydraulic::volumetric_flow(Kilowatts(load_kw), delta_t).0;

        match hydraulic::size_loop(Kilowatts(load_kw), delta_t, &geometry(), &pipes) {
            LoopSizing::Sized(c) => {
                prop_assert!(c.velocity_ms <= hydraulic::MAX_VELOCITY_MS);
                prop_assert!(c.circuit_count >= 1 && c.circuit_count <= hydraulic::MAX_CIRCUITS);
                // One circuit fewer would overspeed even the largest pipe
                if c.circuit_count > 1 {
                    prop_assert!(velocity(flow, c.circuit_count - 1, largest) > hydraulic::MAX_VELOCITY_MS);
                }
                // No smaller listed pipe would do at this circuit count
                for pipe in pipes.iter().filter(|p| p.diameter_mm < c.diameter_mm) {
                    prop_assert!(velocity(flow, c.circuit_count, pipe.diameter_mm) > hydraulic::MAX_VELOCITY_MS);
                }
            }
            LoopSizing::Degenerate(_) => {
                prop_assert!(velocity(flow, hydraulic::MAX_CIRCUITS, largest) > hydraulic::MAX_VELOCITY_MS);
            }
        }
    }

    #[test]
    fn unknown_redundancy_labels_map_to_one(label in "[a-z]{1,6}") {
        prop_assume!(RedundancyTier::from_label(&label).is_none());
        prop_assert_eq!(RedundancyTable::default().factor_for_label(&label), 1.0);
    }

    #[test]
    fn total_demand_is_sum_of_parts(params in arb_params()) {
        let sizing = calculations::calculate(&params, Catalog::builtin()).unwrap();
        let l = sizing.loads;
        let sum = l.it_w + l.hvac_w + l.dlc_w + l.aux_w;
        prop_assert!((l.total_w - sum).abs() <= 1e-9 * sum.max(1.0));
        prop_assert!(l.aux_w >= l.lighting_w + l.other_w);
    }

    #[test]
    fn selected_ratings_cover_requirement(params in arb_params()) {
        let sizing = calculations::calculate(&params, Catalog::builtin()).unwrap();
        let elec = sizing.electrical;
        if !elec.transformer.is_overflow() {
            prop_assert!(elec.rated_capacity_kva() >= elec.required_per_side_kva);
        }
        if !elec.busway.is_overflow() {
            prop_assert!(elec.busway_current_a() >= elec.panel_current_a);
        }
    }

    #[test]
    fn price_change_is_isolated(params in arb_params(), item_index in 0usize..PriceItem::ALL.len(), factor in 1.5f64..3.0) {
        let item = PriceItem::ALL[item_index];
        let base_catalog = Catalog::default();
        let mut changed_catalog = Catalog::default();
        let base_price = base_catalog.prices.price(item).unwrap();
        changed_catalog.prices.set(item, base_price * factor);

        let sizing = calculations::calculate(&params, &base_catalog).unwrap();
        let base = budget::build(&params, &sizing, &base_catalog).unwrap();
        let changed = budget::build(&params, &sizing, &changed_catalog).unwrap();
        let (priced, derived) = lines_fed_by(item);

        prop_assert_eq!(base.lines.len(), changed.lines.len());
        let mut delta = 0.0;
        for (a, b) in base.lines.iter().zip(&changed.lines) {
            prop_assert_eq!(&a.description, &b.description);
            let description = a.description.as_str();
            if priced.contains(&description) {
                prop_assert_eq!(a.unit_price, base_price);
                prop_assert_eq!(b.unit_price, base_price * factor);
                prop_assert_eq!(a.quantity, b.quantity);
            } else if derived.contains(&description) {
                prop_assert!(b.total >= a.total);
            } else {
                prop_assert_eq!(a, b);
            }
            delta += b.total - a.total;
        }
        prop_assert!((changed.grand_total - base.grand_total - delta).abs() <= 1e-6 * base.grand_total.max(1.0));
    }
}
