//! Stats command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use super::common::{check_format, print_structured, select_devices, synthesizer};

/// Execute the stats command.
pub fn execute(
    num_qubits: Option<usize>,
    connectivity: Option<&str>,
    format: &str,
    data_dir: Option<&Path>,
) -> Result<()> {
    check_format(format)?;
    let devices = select_devices(num_qubits, connectivity)?;
    let synth = synthesizer(data_dir);

    let stats = devices
        .iter()
        .map(|&(n, c)| synth.template_statistics(n, c))
        .collect::<Result<Vec<_>, _>>()?;
    if print_structured(&stats, format)? {
        return Ok(());
    }

    println!(
        "{} Template statistics ({})\n",
        style("htstab").cyan().bold(),
        synth.store().source_name()
    );
    println!(
        "  {:>6}  {:<8} {:>7} {:>9} {:>9} {:>8} {:>9}",
        "qubits", "conn", "classes", "avg cost", "avg depth", "max cost", "max depth"
    );
    for s in &stats {
        println!(
            "  {:>6}  {:<8} {:>7} {:>9.2} {:>9.2} {:>8} {:>9}",
            s.num_qubits,
            s.connectivity.name(),
            s.num_classes,
            s.average_cost,
            s.average_depth,
            s.max_cost,
            s.max_depth
        );
    }

    if let [single] = stats.as_slice() {
        println!("\n  Cost histogram:");
        let widest = single.cost_histogram.values().copied().max().unwrap_or(1);
        for (cost, count) in &single.cost_histogram {
            let bar_len = (count * 40).div_ceil(widest);
            println!(
                "  {:>4}: {:>4} {}",
                cost,
                count,
                style("█".repeat(bar_len)).green()
            );
        }
    }
    Ok(())
}
