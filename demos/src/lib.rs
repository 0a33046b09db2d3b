//! qkron Demo Suite
//!
//! Ready-made circuits for the textbook scenarios (single-qubit flips, Bell
//! and GHZ states, routed controls) plus terminal output helpers shared by
//! the `qkron-demo` binary.

pub mod scenarios;

use std::path::Path;

use anyhow::Context;
use console::style;
use serde::Deserialize;

use qkron_sim::{MeasurementResult, SimulatorConfig, StateVector};

/// Settings file read by the demo binary.
///
/// ```yaml
/// simulator:
///   max_qubits: 8
///   seed: 42
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulator settings.
    pub simulator: SimulatorConfig,
}

impl DemoConfig {
    /// Load from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Parse YAML text.
    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml_ng::from_str(text)?)
    }
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print the non-negligible amplitudes of a state.
pub fn print_state(state: &StateVector) {
    for (i, amp) in state.amplitudes().iter().enumerate() {
        if amp.norm() > 1e-12 {
            println!(
                "  |{}⟩  {:+.6} {:+.6}i",
                style(state.outcome_to_bitstring(i)).yellow(),
                amp.re,
                amp.im
            );
        }
    }
}

/// Print one measurement.
pub fn print_measurement(result: &MeasurementResult) {
    print_result(
        &format!("{}", result.qubit),
        format!("p0 = {:.4}, p1 = {:.4}", result.p0, result.p1),
    );
    if let Some(sim) = &result.simulation {
        println!(
            "      shots: {} × 0, {} × 1 → collapsed to {}",
            sim.distribution.zeros,
            sim.distribution.ones,
            style(sim.outcome).bold()
        );
    }
}
