//! # Equipment Schedule
//!
//! Summary rows of the main equipment per zone, as printed in a design
//! report: electrical chain, HVAC plant, primary hydraulic loops, fire
//! protection and CCTV.

use serde::{Deserialize, Serialize};

use crate::calculations::FacilitySizing;
use crate::parameters::DesignParameters;

/// Section of the schedule a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleSection {
    Electrical,
    Hvac,
    Hydraulic,
    FireProtection,
    Security,
}

impl ScheduleSection {
    pub fn display_name(&self) -> &'static str {
        match self {
            ScheduleSection::Electrical => "Electrical",
            ScheduleSection::Hvac => "HVAC",
            ScheduleSection::Hydraulic => "Hydraulics",
            ScheduleSection::FireProtection => "Fire protection",
            ScheduleSection::Security => "Security",
        }
    }
}

/// One schedule row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub section: ScheduleSection,
    pub zone: String,
    pub equipment: String,
    /// `None` when the count depends on room layout ("varies")
    pub count: Option<u32>,
    pub specification: String,
}

impl ScheduleRow {
    fn new(
        section: ScheduleSection,
        zone: &str,
        equipment: impl Into<String>,
        count: Option<u32>,
        specification: impl Into<String>,
    ) -> Self {
        ScheduleRow {
            section,
            zone: zone.to_string(),
            equipment: equipment.into(),
            count,
            specification: specification.into(),
        }
    }

    /// Count as printed in tables
    pub fn count_label(&self) -> String {
        match self.count {
            Some(count) => count.to_string(),
            None => "varies".to_string(),
        }
    }
}

/// Build the equipment schedule from a completed sizing
pub fn build(params: &DesignParameters, sizing: &FacilitySizing) -> Vec<ScheduleRow> {
    use ScheduleSection::*;

    let elec = &sizing.electrical;
    let sides = elec.side_count;
    let mut rows = vec![
        ScheduleRow::new(Electrical, "Zone 1 (MV)", "MV incoming cells", Some(elec.mv_cell_count), "GIS/AIS SF6"),
        ScheduleRow::new(
            Electrical,
            "Zone 2 (Transformers)",
            "MV/LV transformer",
            Some(sides),
            format!("{} kVA", elec.rated_capacity_kva()),
        ),
        ScheduleRow::new(
            Electrical,
            "Zone 3 (LV)",
            "Main LV switchboard",
            Some(sides),
            format!("In: {:.0} A", elec.panel_current_a),
        ),
        ScheduleRow::new(Electrical, "Zone 4 (UPS)", "Modular UPS", Some(sides), "Double conversion"),
        ScheduleRow::new(
            Electrical,
            "Zone 5 (Racks)",
            "Busway",
            Some(params.enclosure_count.saturating_mul(sides)),
            format!("{} A", elec.busway_current_a()),
        ),
    ];

    let hvac = &sizing.hvac;
    rows.push(ScheduleRow::new(
        Hvac,
        "Zone 1 (Production)",
        params.cooling_production.display_name(),
        Some(hvac.unit_count()),
        format!("Total {:.0} kW", hvac.installed_capacity_kw),
    ));
    rows.push(ScheduleRow::new(
        Hvac,
        "Zone 3 (Distribution)",
        params.cooling_distribution.display_name(),
        None,
        "Precision cooling",
    ));

    let primary = hvac.primary.circuit();
    rows.push(ScheduleRow::new(
        Hydraulic,
        "HVAC primary",
        "Header",
        Some(primary.circuit_count),
        format!("DN{} Q={:.1}", primary.diameter_mm, primary.flow_m3h),
    ));
    if params.dlc_enclosures > 0 {
        let dlc = sizing.dlc.primary.circuit();
        rows.push(ScheduleRow::new(
            Hydraulic,
            "DLC primary",
            "Loop",
            Some(dlc.circuit_count),
            format!("DN{}", dlc.diameter_mm),
        ));
    }

    rows.push(ScheduleRow::new(
        FireProtection,
        "General",
        "Detection + suppression",
        Some(params.fire_panels),
        params.suppression.display_name(),
    ));
    rows.push(ScheduleRow::new(Security, "Security", "CCTV", Some(params.cameras), "PoE"));

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations;
    use crate::catalog::Catalog;

    fn schedule_for(params: &DesignParameters) -> Vec<ScheduleRow> {
        let sizing = calculations::calculate(params, Catalog::builtin()).unwrap();
        build(params, &sizing)
    }

    #[test]
    fn test_default_schedule() {
        let rows = schedule_for(&DesignParameters::default());
        assert_eq!(rows.len(), 10);

        assert_eq!(rows[0].count, Some(4));
        assert_eq!(rows[1].specification, "630 kVA");
        assert_eq!(rows[2].specification, "In: 909 A");
        assert_eq!(rows[4].count, Some(8));
        assert_eq!(rows[4].specification, "1000 A");
        assert_eq!(rows[5].count, Some(4));
        assert_eq!(rows[5].specification, "Total 315 kW");
        assert_eq!(rows[6].count_label(), "varies");
        assert!(rows[7].specification.starts_with("DN100 Q="));
        assert_eq!(rows[9].count, Some(20));
    }

    #[test]
    fn test_dlc_loop_row() {
        let params = DesignParameters {
            dlc_enclosures: 1,
            ..DesignParameters::default()
        };
        let rows = schedule_for(&params);
        assert_eq!(rows.len(), 11);
        assert_eq!(rows[8].zone, "DLC primary");
        assert_eq!(rows[8].count, Some(1));
    }
}
