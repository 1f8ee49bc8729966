//! Prepare and readout command implementations.

use std::path::Path;

use anyhow::Result;
use console::style;

use super::common::{
    CircuitReport, check_format, parse_connectivity, parse_stabilizer, print_structured,
    synthesizer,
};

/// Which circuit to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Prepare the state from `|0...0>`.
    Prepare,
    /// Map the state onto `|0...0>`.
    Readout,
}

/// Execute the prepare or readout command.
pub fn execute(
    paulis: &[String],
    connectivity: &str,
    format: &str,
    direction: Direction,
    data_dir: Option<&Path>,
) -> Result<()> {
    check_format(format)?;
    let stabilizer = parse_stabilizer(paulis)?;
    let connectivity = parse_connectivity(connectivity)?;
    let synth = synthesizer(data_dir);

    let result = synth.synthesize(&stabilizer, connectivity)?;
    let circuit = match direction {
        Direction::Prepare => result.circuit,
        Direction::Readout => result.circuit.inverse(),
    };
    let report = CircuitReport::new(&circuit, connectivity);
    if print_structured(&report, format)? {
        return Ok(());
    }

    println!(
        "{} {} circuit for {} on {} connectivity",
        style("→").cyan().bold(),
        match direction {
            Direction::Prepare => "Preparation",
            Direction::Readout => "Readout",
        },
        style(stabilizer.to_string()).green(),
        style(connectivity).yellow()
    );
    println!(
        "  Class: {} (id {})",
        result.class.structure(),
        result.class.id()
    );
    report.print();
    println!("{} Done", style("✓").green().bold());
    Ok(())
}
