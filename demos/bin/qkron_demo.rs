//! qkron Demo Runner
//!
//! Runs the built-in scenarios or a circuit description stored as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use qkron_demos::scenarios;
use qkron_demos::{
    DemoConfig, print_header, print_measurement, print_result, print_section, print_state,
    print_success,
};
use qkron_ir::CircuitDescription;
use qkron_sim::Circuit;

#[derive(Parser, Debug)]
#[command(name = "qkron-demo")]
#[command(about = "Run statevector simulations")]
struct Args {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Shots per measurement
    #[arg(short, long, global = true)]
    shots: Option<u32>,

    /// Collapse the state while measuring
    #[arg(long, global = true)]
    simulate: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bell pair on two qubits
    Bell,
    /// GHZ state
    Ghz {
        /// Number of qubits
        #[arg(short = 'n', long, default_value = "4")]
        qubits: usize,
    },
    /// Control two qubits away from its target
    NonAdjacent,
    /// Run a JSON circuit description
    Run {
        /// Input file
        input: PathBuf,
        /// Print the normalized description after loading
        #[arg(long)]
        echo: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = match &args.config {
        Some(path) => DemoConfig::from_file(path)?,
        None => DemoConfig::default(),
    }
    .simulator;
    info!("Using {:?}", config);

    let (title, circuit) = match &args.command {
        Command::Bell => ("Bell State", scenarios::bell(config)?),
        Command::Ghz { qubits } => ("GHZ State", scenarios::ghz(*qubits, config)?),
        Command::NonAdjacent => ("Routed Control", scenarios::non_adjacent(config)?),
        Command::Run { input, echo } => {
            let json = std::fs::read_to_string(input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let description = CircuitDescription::from_json(&json)?;
            if *echo {
                println!("{}", description.to_json_pretty()?);
            }
            ("Circuit File", Circuit::deserialize_with_config(&description, config)?)
        }
    };

    run(title, circuit, args.shots, args.simulate)
}

fn run(title: &str, mut circuit: Circuit, shots: Option<u32>, simulate: bool) -> anyhow::Result<()> {
    print_header(title);

    print_section("Circuit");
    print_result("Qubits", circuit.num_qubits());
    print_result("Operations", circuit.operations().len());
    print!("{}", circuit.diagram());

    circuit.launch()?;
    print_section("State");
    print_state(circuit.state_vector());

    print_section("Measurement");
    let shots = shots.unwrap_or(circuit.config().default_shots);
    for result in circuit.measure_all(shots, simulate)? {
        print_measurement(&result);
    }

    println!();
    print_success("Simulation complete");
    Ok(())
}
