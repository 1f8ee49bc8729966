//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::debug;

use htstab_ir::Circuit;
use htstab_synth::{
    Connectivity, DirectorySource, Stabilizer, Synthesizer, available_connectivities,
};

/// Build a synthesizer over the data directory, or the bundled tables.
pub fn synthesizer(data_dir: Option<&Path>) -> Synthesizer {
    match data_dir {
        Some(dir) => {
            debug!("Reading template tables from {}", dir.display());
            Synthesizer::with_source(DirectorySource::new(dir))
        }
        None => Synthesizer::bundled(),
    }
}

/// Parse a connectivity name.
pub fn parse_connectivity(name: &str) -> Result<Connectivity> {
    name.parse::<Connectivity>().with_context(|| {
        let names: Vec<&str> = Connectivity::ALL.iter().map(|c| c.name()).collect();
        format!("Available connectivities: {}", names.join(", "))
    })
}

/// Parse generators such as `XZZ -ZXI +ZIX`.
pub fn parse_stabilizer(paulis: &[String]) -> Result<Stabilizer> {
    let stabilizer = Stabilizer::from_paulis(paulis)
        .with_context(|| format!("Invalid stabilizer: {}", paulis.join(" ")))?;
    stabilizer
        .validate()
        .with_context(|| format!("Invalid stabilizer: {}", paulis.join(" ")))?;
    Ok(stabilizer)
}

/// Connectivities for the requested qubit count and name, either of which
/// may be left open.
pub fn select_devices(
    num_qubits: Option<usize>,
    connectivity: Option<&str>,
) -> Result<Vec<(usize, Connectivity)>> {
    let connectivity = connectivity.map(parse_connectivity).transpose()?;
    let devices: Vec<_> = available_connectivities()
        .iter()
        .copied()
        .filter(|&(n, c)| num_qubits.is_none_or(|m| m == n) && connectivity.is_none_or(|k| k == c))
        .collect();
    if devices.is_empty() {
        anyhow::bail!(
            "No template tables for {} qubits on {} connectivity",
            num_qubits.map_or_else(|| "any number of".to_string(), |n| n.to_string()),
            connectivity.map_or("any", |c| c.name())
        );
    }
    Ok(devices)
}

/// A synthesized circuit with its cost.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitReport {
    /// Number of qubits.
    pub num_qubits: usize,
    /// Connectivity the circuit respects.
    pub connectivity: String,
    /// Gate specification.
    pub gates: String,
    /// Native two-qubit gate count.
    pub two_qubit_count: u32,
    /// Two-qubit depth.
    pub two_qubit_depth: u32,
}

impl CircuitReport {
    /// Summarize `circuit`.
    pub fn new(circuit: &Circuit, connectivity: Connectivity) -> Self {
        let metrics = circuit.metrics();
        Self {
            num_qubits: circuit.num_qubits(),
            connectivity: connectivity.to_string(),
            gates: circuit.to_gate_spec(),
            two_qubit_count: metrics.two_qubit_count,
            two_qubit_depth: metrics.two_qubit_depth,
        }
    }

    /// Print as text.
    pub fn print(&self) {
        println!("  {}", style(&self.gates).cyan());
        println!(
            "  Two-qubit gates: {}, depth {}",
            style(self.two_qubit_count).yellow(),
            style(self.two_qubit_depth).yellow()
        );
    }
}

/// Check that a format name is supported.
pub fn check_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" | "yaml" => Ok(()),
        other => anyhow::bail!("Unknown format: '{other}'. Available: text, json, yaml"),
    }
}

/// Print `value` as JSON or YAML. Returns `false` for the text format.
pub fn print_structured<T: Serialize>(value: &T, format: &str) -> Result<bool> {
    match format {
        "json" => {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
            println!("{json}");
            Ok(true)
        }
        "yaml" => {
            let yaml = serde_yaml_ng::to_string(value)
                .map_err(|e| anyhow::anyhow!("YAML serialization failed: {e}"))?;
            print!("{yaml}");
            Ok(true)
        }
        _ => Ok(false),
    }
}
