//! # Datahall CLI Application
//!
//! Terminal front-end for the facility sizing engine.
//!
//! ```text
//! calc_cli calc                              # reference facility
//! calc_cli calc --params hall.json --json    # full report as JSON
//! calc_cli calc --params hall.json --catalog prices-2026.json
//! calc_cli catalog                           # dump the reference catalog
//! calc_cli interactive                       # answer a few prompts
//! ```

mod logging;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use calc_core::calculations::LoopSizing;
use calc_core::catalog::Catalog;
use calc_core::errors::{CalcError, CalcResult};
use calc_core::parameters::DesignParameters;
use calc_core::redundancy::RedundancyTier;
use calc_core::report::{self, CalculationReport, ReportMetadata};

#[derive(Parser)]
#[command(name = "calc_cli")]
#[command(about = "Datahall CLI - Data-center facility sizing", long_about = None)]
struct Cli {
    /// Log sizing details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Size a facility and print the results
    Calc {
        /// Design parameter JSON file (defaults for any missing field)
        #[arg(short, long)]
        params: Option<PathBuf>,
        /// Catalog override JSON file (prices, ratings, pipes, redundancy)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
        /// Responsible engineer, recorded in the report
        #[arg(long, default_value = "")]
        engineer: String,
        /// Job/project number, recorded in the report
        #[arg(long, default_value = "")]
        job: String,
        /// Client name, recorded in the report
        #[arg(long, default_value = "")]
        client: String,
    },
    /// Print the reference catalog as JSON
    Catalog {
        /// Catalog override JSON file to merge first
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
    /// Prompt for the main inputs and size the facility
    Interactive {
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let outcome = match cli.command {
        Commands::Calc {
            params,
            catalog,
            json,
            engineer,
            job,
            client,
        } => cmd_calc(
            params.as_deref(),
            catalog.as_deref(),
            json,
            ReportMetadata::new(engineer, job, client),
        ),
        Commands::Catalog { catalog } => cmd_catalog(catalog.as_deref()),
        Commands::Interactive { json } => cmd_interactive(json),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_calc(
    params_path: Option<&Path>,
    catalog_path: Option<&Path>,
    json: bool,
    meta: ReportMetadata,
) -> CalcResult<()> {
    let params = match params_path {
        Some(path) => load_params(path)?,
        None => DesignParameters::default(),
    };
    let catalog = load_catalog(catalog_path)?;
    let report = report::run(&params, &catalog, meta)?;
    emit(&report, json)
}

fn cmd_catalog(catalog_path: Option<&Path>) -> CalcResult<()> {
    let catalog = load_catalog(catalog_path)?;
    println!("{}", serde_json::to_string_pretty(&catalog)?);
    Ok(())
}

fn cmd_interactive(json: bool) -> CalcResult<()> {
    println!("Datahall CLI - Facility Sizing");
    println!("==============================");
    println!("Press Enter to keep the [default].");
    println!();

    let defaults = DesignParameters::default();
    let params = DesignParameters {
        enclosure_count: prompt_u32("Enclosures [4]: ", defaults.enclosure_count),
        racks_per_enclosure: prompt_u32("Racks per enclosure [12]: ", defaults.racks_per_enclosure),
        servers_per_rack: prompt_u32("Servers per rack [10]: ", defaults.servers_per_rack),
        server_max_power_w: prompt_f64("Server max power (W) [500]: ", defaults.server_max_power_w),
        dlc_enclosures: prompt_u32("Enclosures with DLC [0]: ", defaults.dlc_enclosures),
        electrical_redundancy: prompt_tier("Electrical redundancy (N, N+1, 2N, 2N+1) [2N]: ", defaults.electrical_redundancy),
        hvac_redundancy: prompt_tier("HVAC redundancy (N, N+1, 2N, 2N+1) [N+1]: ", defaults.hvac_redundancy),
        floor_count: prompt_u32("Floors [2]: ", defaults.floor_count),
        floor_area_m2: prompt_f64("Floor area (m²) [500]: ", defaults.floor_area_m2),
        it_room_area_m2: prompt_f64("IT room area (m²) [400]: ", defaults.it_room_area_m2),
        ..defaults
    };
    println!();

    let report = report::run(&params, Catalog::builtin(), ReportMetadata::default())?;
    emit(&report, json)
}

// ============================================================================
// Input
// ============================================================================

fn read_file(path: &Path) -> CalcResult<String> {
    std::fs::read_to_string(path).map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

fn load_params(path: &Path) -> CalcResult<DesignParameters> {
    let params: DesignParameters = serde_json::from_str(&read_file(path)?)?;
    tracing::debug!(path = %path.display(), "parameters loaded");
    Ok(params)
}

fn load_catalog(path: Option<&Path>) -> CalcResult<Catalog> {
    match path {
        Some(path) => {
            let catalog = Catalog::builtin().with_overrides_json(&read_file(path)?)?;
            tracing::debug!(path = %path.display(), "catalog overrides applied");
            Ok(catalog)
        }
        None => Ok(Catalog::builtin().clone()),
    }
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return None;
    }
    Some(input.trim().to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn prompt_u32(prompt: &str, default: u32) -> u32 {
    prompt_line(prompt).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn prompt_tier(prompt: &str, default: RedundancyTier) -> RedundancyTier {
    prompt_line(prompt)
        .filter(|s| !s.is_empty())
        .map(|s| RedundancyTier::from_label_lenient(&s))
        .unwrap_or(default)
}

// ============================================================================
// Output
// ============================================================================

fn emit(report: &CalculationReport, json: bool) -> CalcResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(report);
    }
    Ok(())
}

const RULE: &str = "═══════════════════════════════════════════════════════════════";

fn heading(title: &str) {
    println!();
    println!("{}", RULE);
    println!("  {}", title);
    println!("{}", RULE);
}

fn print_report(report: &CalculationReport) {
    let params = &report.parameters;
    let sizing = &report.sizing;

    heading("FACILITY DEMAND");
    println!(
        "  {} enclosures × {} racks × {} servers @ {:.0} W",
        params.enclosure_count, params.racks_per_enclosure, params.servers_per_rack, params.server_max_power_w
    );
    println!("  IT:       {:>10.1} kW", sizing.loads.it_w / 1000.0);
    println!("  HVAC:     {:>10.1} kW", sizing.loads.hvac_w / 1000.0);
    println!("  DLC:      {:>10.1} kW", sizing.loads.dlc_w / 1000.0);
    println!("  Aux:      {:>10.1} kW", sizing.loads.aux_w / 1000.0);
    println!("  Total:    {:>10.1} kW", sizing.loads.total_kw());
    println!();
    for share in &report.consumption {
        let pct = if sizing.loads.total_w > 0.0 { share.watts / sizing.loads.total_w * 100.0 } else { 0.0 };
        println!("  {:<10} {:>5.1} %", share.label, pct);
    }

    heading("ELECTRICAL");
    let elec = &sizing.electrical;
    println!("  Apparent power:   {:>8.1} kVA", elec.total_apparent_kva);
    println!("  Required / side:  {:>8.1} kVA", elec.required_per_side_kva);
    println!(
        "  Transformer:      {:>8.0} kVA × {} {}",
        elec.rated_capacity_kva(),
        elec.side_count,
        overflow_flag(elec.transformer.is_overflow())
    );
    println!("  MV cells:         {:>8}", elec.mv_cell_count);
    println!("  LV panel current: {:>8.1} A", elec.panel_current_a);
    println!(
        "  Busway:           {:>8.0} A {}",
        elec.busway_current_a(),
        overflow_flag(elec.busway.is_overflow())
    );
    println!("  Rack current:     {:>8.2} A", elec.rack_current_a);
    println!(
        "  Rack breaker:     {:>8.0} A {}",
        elec.rack_circuit_current_a(),
        overflow_flag(elec.rack_breaker.is_overflow())
    );

    heading("HVAC");
    let hvac = &sizing.hvac;
    println!("  Design capacity:    {:>8.1} kW", hvac.design_capacity_kw);
    println!(
        "  Installed ({:<4}):   {:>8.1} kW",
        params.hvac_redundancy.label(),
        hvac.installed_capacity_kw
    );
    println!("  Unit class:         {:>8.0} kW", hvac.unit_capacity_kw);

    heading("HYDRAULICS");
    println!("  {:<16} {:>9} {:>6} {:>8} {:>4} {:>9}", "Loop", "Q (m³/h)", "DN", "v (m/s)", "n", "L (m)");
    print_loop("HVAC primary", &hvac.primary);
    print_loop("HVAC secondary", &hvac.secondary);
    if params.dlc_enclosures > 0 {
        print_loop("DLC primary", &sizing.dlc.primary);
        print_loop("DLC secondary", &sizing.dlc.secondary);
    }

    heading("KPIs");
    match &sizing.density {
        Some(density) => {
            for (name, value, unit) in density.entries() {
                println!("  {:<20} {:>8.3} {}", name, value, unit);
            }
        }
        None => println!("  Density KPIs unavailable (area not positive)"),
    }
    println!("  {:<20} {:>8.3}", "PUE", sizing.efficiency.pue);
    println!("  {:<20} {:>8.3}", "WUE", sizing.efficiency.wue);
    println!("  {:<20} {:>8.3}", "CUE", sizing.efficiency.cue);

    heading("EQUIPMENT SCHEDULE");
    for row in &report.schedule {
        println!(
            "  {:<22} {:<30} {:>6}  {}",
            row.zone,
            row.equipment,
            row.count_label(),
            row.specification
        );
    }

    heading("BUDGET (CAPEX)");
    for (category, subtotal) in report.budget.subtotals() {
        println!();
        println!("  {} ({:.0})", category, subtotal);
        for line in report.budget.lines_in(category) {
            println!(
                "    {:<34} {:>10.1} {:<10} × {:>10.2} = {:>12.0}",
                line.description, line.quantity, line.unit.symbol(), line.unit_price, line.total
            );
        }
    }
    println!();
    println!("  GRAND TOTAL: {:.0}", report.budget.grand_total);

    if !report.advisories.is_empty() {
        heading("ADVISORIES");
        for advisory in &report.advisories {
            println!("  [WARN] {}", advisory);
        }
    }
    println!("{}", RULE);
}

fn overflow_flag(overflow: bool) -> &'static str {
    if overflow { "[CUSTOM]" } else { "" }
}

fn print_loop(name: &str, sizing: &LoopSizing) {
    match sizing {
        LoopSizing::Sized(c) => println!(
            "  {:<16} {:>9.1} {:>6} {:>8.2} {:>4} {:>9.1}",
            name,
            c.flow_m3h,
            format!("DN{}", c.diameter_mm),
            c.velocity_ms,
            c.circuit_count,
            c.length_m
        ),
        LoopSizing::Degenerate(reason) => println!("  {:<16} not sized: {}", name, reason),
    }
}
