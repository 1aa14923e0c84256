//! End-to-end sizing scenarios on reference facilities.

use calc_core::calculations::{self, hydraulic, DensityKpis, LoopSizing};
use calc_core::catalog::{default_pipe_sizes, Catalog, PipeMaterial, RatingSelection};
use calc_core::parameters::{DesignParameters, SupplyTopology};
use calc_core::redundancy::{RedundancyTable, RedundancyTier};
use calc_core::report::{self, Advisory, ReportMetadata};
use calc_core::units::Kilowatts;

#[test]
fn air_cooled_hall_demand() {
    let params = DesignParameters::default();
    let sizing = calculations::calculate(&params, Catalog::builtin()).unwrap();

    assert_eq!(params.total_servers(), 480);
    assert!((sizing.loads.it_w - 240_000.0).abs() < 1e-9);
    // 240 000 × 1.05 / 3.5
    assert!((sizing.loads.hvac_w - 72_000.0).abs() < 1e-6);
    assert_eq!(sizing.loads.dlc_w, 0.0);
    // 2000 + 3000 + 21 000 fire + 3100 control
    assert!((sizing.loads.aux_w - 29_100.0).abs() < 1e-9);
    assert!((sizing.loads.total_w - 341_100.0).abs() < 1e-6);
}

#[test]
fn hydraulic_500kw_at_5k() {
    let pipes = default_pipe_sizes();
    let sizing = hydraulic::size_loop(Kilowatts(500.0), 5.0, &hydraulic::PipeRunGeometry {
        floor_area_m2: 500.0,
        floor_height_m: 4.5,
        floor_count: 2,
    }, &pipes);

    let LoopSizing::Sized(circuit) = sizing else {
        panic!("500 kW loop should be sized");
    };
    // 500 / (4.18 × 5) = 23.92 kg/s
    assert!((circuit.flow_m3h - 86.12).abs() < 0.01);
    assert_eq!(circuit.circuit_count, 1);
    assert_eq!(circuit.diameter_mm, 125.0);
    assert_eq!(circuit.material, PipeMaterial::CarbonSteel);
    assert!(circuit.velocity_ms <= hydraulic::MAX_VELOCITY_MS);
    assert!((circuit.velocity_ms - 1.949).abs() < 0.001);
}

#[test]
fn transformer_boundary_is_inclusive() {
    // 1 × 40 × 18 000 W = 720 kW IT; all other loads zeroed -> 800 kVA
    let params = DesignParameters {
        enclosure_count: 1,
        racks_per_enclosure: 40,
        servers_per_rack: 1,
        server_max_power_w: 18_000.0,
        hvac_cop: 0.0,
        lighting_power_w: 0.0,
        other_power_w: 0.0,
        fire_panels: 0,
        fire_pump_groups: 0,
        detection_units: 0,
        cameras: 0,
        access_points: 0,
        supply_topology: SupplyTopology::DualFeed,
        ..DesignParameters::default()
    };
    let sizing = calculations::calculate(&params, Catalog::builtin()).unwrap();
    assert!((sizing.electrical.required_per_side_kva - 800.0).abs() < 1e-9);
    assert_eq!(sizing.electrical.transformer, RatingSelection::Standard { rating: 800.0 });
}

#[test]
fn zero_it_room_area_has_no_density_kpis() {
    let params = DesignParameters {
        it_room_area_m2: 0.0,
        ..DesignParameters::default()
    };
    let sizing = calculations::calculate(&params, Catalog::builtin()).unwrap();
    assert!(sizing.density.is_none());
    assert!(DensityKpis::calculate(&params, &sizing.loads, &sizing.electrical, &sizing.hvac).is_none());

    let report = report::run(&params, Catalog::builtin(), ReportMetadata::default()).unwrap();
    assert!(report.advisories.contains(&Advisory::MissingDensityKpis));
}

#[test]
fn redundancy_mapping() {
    let table = RedundancyTable::default();
    let expected = [
        (RedundancyTier::N, 1.0),
        (RedundancyTier::NPlusOne, 1.25),
        (RedundancyTier::TwoN, 2.0),
        (RedundancyTier::TwoNPlusOne, 2.25),
    ];
    for (tier, factor) in expected {
        assert_eq!(table.factor(tier), factor);
        assert_eq!(table.factor_for_label(tier.label()), factor);
    }
    assert_eq!(table.factor_for_label("3N"), 1.0);
    assert_eq!(table.factor_for_label(""), 1.0);
}

#[test]
fn unknown_tier_in_json_sizes_as_n() {
    let params: DesignParameters =
        serde_json::from_str(r#"{ "electrical_redundancy": "3N", "hvac_redundancy": "tier-x" }"#).unwrap();
    assert_eq!(params.electrical_redundancy, RedundancyTier::Unrecognized);
    assert_eq!(params.hvac_redundancy, RedundancyTier::Unrecognized);

    let explicit_n = DesignParameters {
        electrical_redundancy: RedundancyTier::N,
        hvac_redundancy: RedundancyTier::N,
        ..DesignParameters::default()
    };
    let unknown = report::run(&params, Catalog::builtin(), ReportMetadata::default()).unwrap();
    let reference = report::run(&explicit_n, Catalog::builtin(), ReportMetadata::default()).unwrap();

    assert_eq!(unknown.sizing, reference.sizing);
    assert_eq!(unknown.budget, reference.budget);
    assert!((unknown.sizing.hvac.installed_capacity_kw - unknown.sizing.hvac.design_capacity_kw).abs() < 1e-9);
}

#[test]
fn injected_catalog_changes_selection() {
    let catalog = Catalog::builtin()
        .with_overrides_json(r#"{ "ratings": { "transformer_kva": [400.0, 500.0, 630.0] } }"#)
        .unwrap();
    let sizing = calculations::calculate(&DesignParameters::default(), &catalog).unwrap();
    // 379 kVA now fits the 400 kVA unit
    assert_eq!(sizing.electrical.rated_capacity_kva(), 400.0);
}

#[test]
fn json_parameters_with_defaults() {
    let params: DesignParameters = serde_json::from_str(
        r#"{ "enclosure_count": 6, "electrical_redundancy": "N+1", "supply_topology": "SingleFeed" }"#,
    )
    .unwrap();
    assert_eq!(params.enclosure_count, 6);
    assert_eq!(params.racks_per_enclosure, 12);

    let sizing = calculations::calculate(&params, Catalog::builtin()).unwrap();
    assert_eq!(sizing.electrical.side_count, 1);
    assert_eq!(sizing.electrical.mv_cell_count, 3);
}
