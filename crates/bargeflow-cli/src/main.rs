mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bargeflow_cli::output::OutputFormat;

use commands::convoy::handle_convoy;
use commands::fleet::handle_fleet;
use commands::load_scenario;
use commands::optimize::{handle_optimize, OptimizeArgs};
use commands::simulate::{handle_simulate, PlanArgs};
use commands::template::handle_template;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "River barge convoy simulator and design optimiser"
)]
struct Cli {
    /// Scenario JSON file. Defaults to the built-in reference scenario.
    #[arg(long, global = true)]
    scenario: Option<PathBuf>,

    /// Monthly river depth CSV overriding the scenario's profile.
    #[arg(long, global = true)]
    depths: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the reference scenario as JSON.
    Template,
    /// Show the convoy arrangement and hull figures for the scenario.
    Convoy,
    /// Simulate one convoy over a year.
    Simulate {
        /// Operate every month at this speed (knots).
        #[arg(long, conflicts_with = "monthly_speeds")]
        speed: Option<f64>,

        /// Twelve comma-separated monthly speeds (knots).
        #[arg(long, value_delimiter = ',')]
        monthly_speeds: Option<Vec<f64>>,

        /// Install this engine power (HP) instead of sizing it.
        #[arg(long)]
        power: Option<f64>,
    },
    /// Size the fleet that carries a yearly demand.
    Fleet {
        /// Yearly demand (t).
        #[arg(long)]
        demand: f64,

        /// Operate every month at this speed (knots).
        #[arg(long)]
        speed: Option<f64>,
    },
    /// Search design speeds and monthly operating speeds for the lowest cost
    /// per tonne.
    Optimize {
        #[arg(long)]
        min_design_speed: Option<f64>,

        #[arg(long)]
        max_design_speed: Option<f64>,

        #[arg(long)]
        design_step: Option<f64>,

        /// Worker threads; 0 uses the global rayon pool.
        #[arg(long, default_value_t = 0)]
        workers: usize,

        /// Evaluate design speeds one after another.
        #[arg(long)]
        sequential: bool,

        /// Also print the objective for every feasible design speed.
        #[arg(long)]
        curve: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if let Command::Template = cli.command {
        return handle_template();
    }

    let scenario = load_scenario(cli.scenario.as_deref(), cli.depths.as_deref())?;
    match cli.command {
        Command::Template => handle_template(),
        Command::Convoy => handle_convoy(&scenario, cli.format),
        Command::Simulate {
            speed,
            monthly_speeds,
            power,
        } => {
            let args = PlanArgs {
                speed,
                monthly_speeds,
                power,
            };
            handle_simulate(&scenario, &args, cli.format)
        }
        Command::Fleet { demand, speed } => {
            let args = PlanArgs {
                speed,
                ..PlanArgs::default()
            };
            handle_fleet(&scenario, &args, demand, cli.format)
        }
        Command::Optimize {
            min_design_speed,
            max_design_speed,
            design_step,
            workers,
            sequential,
            curve,
        } => {
            let args = OptimizeArgs {
                min_design_speed,
                max_design_speed,
                design_step,
                workers,
                sequential,
                show_curve: curve,
            };
            handle_optimize(&scenario, &args, cli.format)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
