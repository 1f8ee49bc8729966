//! MUB command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;
use serde::Serialize;

use htstab_synth::MubInfo;

use super::common::{
    CircuitReport, check_format, parse_connectivity, print_structured, synthesizer,
};

#[derive(Serialize)]
struct MubBasis {
    paulis: Vec<String>,
    circuit: CircuitReport,
}

#[derive(Serialize)]
struct MubReport {
    info: MubInfo,
    bases: Vec<MubBasis>,
}

/// Execute the mub command.
pub fn execute(
    num_qubits: usize,
    connectivity: &str,
    format: &str,
    data_dir: Option<&Path>,
) -> Result<()> {
    check_format(format)?;
    let connectivity = parse_connectivity(connectivity)?;
    let synth = synthesizer(data_dir);

    let info = synth.mub_info(num_qubits, connectivity)?;
    let bases = synth
        .mubs(num_qubits, connectivity)?
        .into_iter()
        .zip(synth.mub_circuits(num_qubits, connectivity)?)
        .map(|(paulis, circuit)| MubBasis {
            paulis,
            circuit: CircuitReport::new(&circuit, connectivity),
        })
        .collect();
    let report = MubReport { info, bases };
    if print_structured(&report, format)? {
        return Ok(());
    }

    println!(
        "{} {} mutually unbiased bases on {} qubits ({} connectivity)\n",
        style("→").cyan().bold(),
        report.info.num_circuits,
        num_qubits,
        style(connectivity).yellow()
    );
    for (k, basis) in report.bases.iter().enumerate() {
        println!(
            "  {:>2}  {}  {}",
            k,
            style(basis.paulis.join(",")).green(),
            basis.circuit.gates
        );
    }
    println!();
    println!(
        "  Max two-qubit gates: {}, max depth {}, average {:.2}",
        style(report.info.max_two_qubit_count).yellow(),
        style(report.info.max_two_qubit_depth).yellow(),
        report.info.average_two_qubit_gates
    );
    Ok(())
}
