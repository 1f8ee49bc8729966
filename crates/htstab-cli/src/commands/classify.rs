//! Classify command implementation.

use anyhow::Result;
use console::style;
use serde::Serialize;

use htstab_synth::classify;

use super::common::{check_format, parse_stabilizer, print_structured};

#[derive(Serialize)]
struct ClassReport {
    num_qubits: usize,
    structure: String,
    id: usize,
    repr: String,
    graph_id: u64,
    edges: Vec<(usize, usize)>,
}

/// Execute the classify command.
pub fn execute(paulis: &[String], format: &str) -> Result<()> {
    check_format(format)?;
    let stabilizer = parse_stabilizer(paulis)?;
    let class = classify(&stabilizer)?;
    let graph = class.representative_graph();

    let report = ClassReport {
        num_qubits: class.num_qubits(),
        structure: class.structure().to_string(),
        id: class.id(),
        repr: class.repr().to_string(),
        graph_id: graph.compress()?,
        edges: graph.edges(),
    };
    if print_structured(&report, format)? {
        return Ok(());
    }

    println!(
        "{} {}",
        style("→").cyan().bold(),
        style(stabilizer.to_string()).green()
    );
    println!("  Structure:      {}", style(&report.structure).yellow());
    println!("  Class id:       {}", report.id);
    println!("  Vertex roles:   {}", report.repr);
    println!("  Representative: {graph} (graph id {})", report.graph_id);
    Ok(())
}
