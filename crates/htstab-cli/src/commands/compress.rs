//! Compress command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use htstab_ir::Circuit;

use super::common::{
    CircuitReport, check_format, parse_connectivity, print_structured, synthesizer,
};

/// Execute the compress command.
pub fn execute(
    gate_spec: &str,
    num_qubits: u32,
    connectivity: &str,
    format: &str,
    data_dir: Option<&Path>,
) -> Result<()> {
    check_format(format)?;
    let circuit = Circuit::parse(num_qubits, gate_spec)
        .with_context(|| format!("Invalid gate specification: '{gate_spec}'"))?;
    let connectivity = parse_connectivity(connectivity)?;
    let synth = synthesizer(data_dir);

    let compressed = synth.compress_preparation_circuit(&circuit, connectivity)?;
    let report = CircuitReport::new(&compressed, connectivity);
    if print_structured(&report, format)? {
        return Ok(());
    }

    let before = circuit.metrics();
    println!(
        "{} Compressing {} gates on {} qubits for {} connectivity",
        style("→").cyan().bold(),
        circuit.len(),
        num_qubits,
        style(connectivity).yellow()
    );
    println!(
        "  Input two-qubit gates: {}, depth {}",
        before.two_qubit_count, before.two_qubit_depth
    );
    report.print();
    println!("{} Same state, signs included", style("✓").green().bold());
    Ok(())
}
