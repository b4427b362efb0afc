//! Output formatting for simulation, fleet and optimisation results.
//!
//! Every renderer writes to a caller-supplied [`Write`] so the handlers can
//! print to stdout and the tests can capture the text.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use bargeflow_lib::optimizer::{indicative_month_cost, OptionValue};
use bargeflow_lib::physics::{hull_cargo_capacity, lightship_weight, operating_draft};
use bargeflow_lib::{
    AnnualResult, ConvoyArrangement, FleetResult, MonthlyResult, OptimizationResult, Scenario,
    MONTHS,
};

use crate::terminal::{format_amount, format_unit_cost, ColorPalette};

const MONTH_NAMES: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON; infinite costs are written as `null`.
    Json,
}

/// Write `value` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Formation and capacity of the scenario's convoy at structural draft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvoySummary {
    pub arrangement: ConvoyArrangement,
    pub hull_count: u32,
    pub convoy_length_m: f64,
    pub convoy_beam_m: f64,
    pub channel_width_m: f64,
    pub lightship_t: f64,
    pub structural_draft_m: f64,
    pub cargo_per_hull_t: f64,
    pub cargo_per_convoy_t: f64,
    /// Draft used to size the engine.
    pub worst_case_draft_m: f64,
    pub shallowest_depth_m: f64,
    /// Loading draft in the shallowest month.
    pub shallowest_draft_m: f64,
}

impl ConvoySummary {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let hull = &scenario.params.hull;
        let arrangement = scenario.params.arrangement();
        let shallowest_depth_m = scenario.depth_profile.min_depth();
        let cargo_per_hull_t = hull_cargo_capacity(
            hull.length_m,
            hull.beam_m,
            hull.depth_m,
            scenario.structural_draft_m,
            hull.block_coefficient,
        );

        Self {
            arrangement,
            hull_count: arrangement.hull_count(),
            convoy_length_m: arrangement.total_length(hull.length_m),
            convoy_beam_m: arrangement.total_beam(hull.beam_m),
            channel_width_m: scenario.params.channel.width_m,
            lightship_t: lightship_weight(hull.length_m, hull.beam_m, hull.depth_m),
            structural_draft_m: scenario.structural_draft_m,
            cargo_per_hull_t,
            cargo_per_convoy_t: cargo_per_hull_t * f64::from(arrangement.hull_count()),
            worst_case_draft_m: scenario.worst_case_draft(),
            shallowest_depth_m,
            shallowest_draft_m: operating_draft(
                shallowest_depth_m,
                scenario.keel_clearance_m,
                scenario.structural_draft_m,
            ),
        }
    }
}

pub fn render_convoy_text<W: Write>(
    out: &mut W,
    summary: &ConvoySummary,
    palette: ColorPalette,
) -> io::Result<()> {
    writeln!(
        out,
        "{}Convoy {} ({} hulls){}",
        palette.heading, summary.arrangement, summary.hull_count, palette.reset
    )?;
    writeln!(
        out,
        "  Size:              {:.2} m x {:.2} m (channel {:.2} m)",
        summary.convoy_length_m, summary.convoy_beam_m, summary.channel_width_m
    )?;
    writeln!(out, "  Lightship / hull:  {:.1} t", summary.lightship_t)?;
    writeln!(
        out,
        "  Cargo / hull:      {} t at {:.2} m draft",
        format_amount(summary.cargo_per_hull_t),
        summary.structural_draft_m
    )?;
    writeln!(
        out,
        "  Cargo / convoy:    {} t",
        format_amount(summary.cargo_per_convoy_t)
    )?;
    writeln!(
        out,
        "  Engine sizing at:  {:.2} m draft",
        summary.worst_case_draft_m
    )?;
    writeln!(
        out,
        "  Shallowest month:  {:.2} m depth, {:.2} m draft",
        summary.shallowest_depth_m, summary.shallowest_draft_m
    )
}

fn write_month_header<W: Write>(out: &mut W, last_column: &str) -> io::Result<()> {
    writeln!(
        out,
        "  {:<5} {:>7} {:>7} {:>7} {:>6} {:>10} {:>12} {:>9} {:>10}",
        "Month", "Depth", "Draft", "Speed", "Trips", "Cargo t", "Var. cost", "Power", last_column
    )
}

fn write_month_row<W: Write>(
    out: &mut W,
    month: &MonthlyResult,
    last_column: &str,
    palette: ColorPalette,
) -> io::Result<()> {
    let name = (month.month as usize)
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index))
        .copied()
        .unwrap_or("?");
    let power = month
        .required_power_hp
        .map_or_else(|| "-".to_string(), |power| format!("{power:.0}"));
    let alert = if month.within_installed_power {
        ""
    } else {
        palette.bad
    };
    writeln!(
        out,
        "  {:<5} {:>7.2} {:>7.2} {:>7.1} {:>6} {:>10} {:>12} {}{:>9}{} {}{:>10}{}",
        name,
        month.depth_m,
        month.draft_m,
        month.speed_knots,
        month.trips,
        format_amount(month.cargo_t),
        format_amount(month.variable_cost),
        alert,
        power,
        palette.reset,
        alert,
        last_column,
        palette.reset
    )
}

pub fn render_annual_text<W: Write>(
    out: &mut W,
    result: &AnnualResult,
    palette: ColorPalette,
) -> io::Result<()> {
    writeln!(
        out,
        "{}Annual simulation: {} convoy, {:.0} BHP installed (sized for {:.1} kn){}",
        palette.heading,
        result.arrangement,
        result.installed_power_hp,
        result.design_speed_knots,
        palette.reset
    )?;
    write_month_header(out, "Fits")?;
    for month in &result.months {
        let fits = if month.within_installed_power {
            "yes"
        } else {
            "NO"
        };
        write_month_row(out, month, fits, palette)?;
    }
    writeln!(out)?;
    writeln!(out, "  Investment:        {}", format_amount(result.investment))?;
    writeln!(
        out,
        "  Fixed cost / yr:   {}",
        format_amount(result.fixed_annual_cost)
    )?;
    writeln!(
        out,
        "  Variable cost / yr: {}",
        format_amount(result.variable_annual_cost)
    )?;
    writeln!(
        out,
        "  Total cost / yr:   {}",
        format_amount(result.total_annual_cost)
    )?;
    writeln!(
        out,
        "  Cargo / yr:        {} t in {} trips",
        format_amount(result.total_cargo_t),
        result.total_trips
    )?;
    writeln!(
        out,
        "  Emissions / yr:    {:.1} t CO2 ({} kg/t)",
        result.total_emissions_t,
        format_unit_cost(result.carbon_intensity_kg_per_t)
    )?;
    writeln!(
        out,
        "  {}Unit cost:         {} per t{}",
        palette.heading,
        format_unit_cost(result.unit_cost),
        palette.reset
    )?;

    let breakdown = &result.cost_breakdown;
    writeln!(out, "{}  Cost breakdown:{}", palette.muted, palette.reset)?;
    for (label, value) in [
        ("Fuel", breakdown.fuel),
        ("Capital", breakdown.capital),
        ("Administrative", breakdown.administrative),
        ("Crew + meals", breakdown.crew_and_meals),
        ("Maintenance + insurance", breakdown.maintenance_and_insurance),
    ] {
        writeln!(out, "    {:<24} {:>14}", label, format_amount(value))?;
    }
    Ok(())
}

/// Demand, the single-convoy result it was scaled from and the fleet.
#[derive(Debug, Clone, Serialize)]
pub struct FleetReport<'a> {
    pub demand_t: f64,
    pub unit: &'a AnnualResult,
    pub fleet: FleetResult,
}

pub fn render_fleet_text<W: Write>(
    out: &mut W,
    report: &FleetReport<'_>,
    palette: ColorPalette,
) -> io::Result<()> {
    let fleet = &report.fleet;
    writeln!(
        out,
        "{}Fleet for {} t/yr{}",
        palette.heading,
        format_amount(report.demand_t),
        palette.reset
    )?;
    if fleet.fleet_count == 0 {
        writeln!(
            out,
            "  {}A single convoy carries nothing; no fleet can meet the demand.{}",
            palette.bad, palette.reset
        )?;
        return Ok(());
    }
    writeln!(
        out,
        "  Convoy capacity:   {} t/yr at {} per t",
        format_amount(report.unit.total_cargo_t),
        format_unit_cost(report.unit.unit_cost)
    )?;
    writeln!(out, "  Convoys needed:    {}", fleet.fleet_count)?;
    writeln!(
        out,
        "  Fleet capacity:    {} t/yr ({} t spare)",
        format_amount(fleet.fleet_capacity_t),
        format_amount(fleet.spare_capacity_t(report.demand_t))
    )?;
    writeln!(
        out,
        "  Fleet investment:  {}",
        format_amount(fleet.fleet_investment)
    )?;
    writeln!(
        out,
        "  Fleet cost / yr:   {}",
        format_amount(fleet.fleet_annual_cost)
    )?;
    writeln!(
        out,
        "  {}Realized cost:     {} per t demanded{}",
        palette.heading,
        format_unit_cost(fleet.realized_unit_cost),
        palette.reset
    )
}

pub fn render_optimization_text<W: Write>(
    out: &mut W,
    result: &OptimizationResult,
    show_curve: bool,
    palette: ColorPalette,
) -> io::Result<()> {
    let Some(best) = &result.best_design else {
        writeln!(
            out,
            "{}No viable design found{} ({} design speeds infeasible)",
            palette.bad,
            palette.reset,
            result.infeasible_design_speeds.len()
        )?;
        return Ok(());
    };

    writeln!(
        out,
        "{}Best design: {:.1} kn, {:.0} BHP installed{}",
        palette.heading, best.design_speed_knots, best.installed_power_hp, palette.reset
    )?;
    writeln!(
        out,
        "  {}Cost per tonne:    {}{}",
        palette.good,
        format_unit_cost(best.objective),
        palette.reset
    )?;
    writeln!(out, "  Investment:        {}", format_amount(best.investment))?;
    writeln!(
        out,
        "  Total cost / yr:   {}",
        format_amount(best.total_annual_cost)
    )?;
    writeln!(
        out,
        "  Cargo / yr:        {} t",
        format_amount(best.total_cargo_t)
    )?;
    writeln!(
        out,
        "  Emissions / yr:    {:.1} t CO2 ({} kg/t)",
        best.total_emissions_t,
        format_unit_cost(best.carbon_intensity_kg_per_t)
    )?;
    writeln!(out, "  Descent sweeps:    {}", best.sweeps)?;
    writeln!(out)?;

    write_month_header(out, "Cost / t")?;
    for month in &result.monthly_table {
        let indicative = indicative_month_cost(
            best.fixed_annual_cost,
            MONTHS,
            &OptionValue {
                variable_cost: month.variable_cost,
                cargo_t: month.cargo_t,
            },
        );
        write_month_row(out, month, &format_unit_cost(indicative), palette)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "  Feasible designs:  {} ({} infeasible)",
        result.design_speed_curve.len(),
        result.infeasible_design_speeds.len()
    )?;

    if show_curve {
        writeln!(
            out,
            "{}  {:>8} {:>10} {:>10} {:>7}{}",
            palette.muted, "Design", "BHP", "Cost / t", "Sweeps", palette.reset
        )?;
        for point in &result.design_speed_curve {
            writeln!(
                out,
                "  {:>8.1} {:>10.0} {:>10} {:>7}",
                point.design_speed_knots,
                point.installed_power_hp,
                format_unit_cost(point.objective),
                point.sweeps
            )?;
        }
    }
    Ok(())
}
