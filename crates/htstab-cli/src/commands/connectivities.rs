//! Connectivities command implementation.

use anyhow::Result;
use console::style;

use htstab_synth::available_connectivities;

/// Execute the connectivities command.
pub fn execute() -> Result<()> {
    println!("{} Supported devices:\n", style("htstab").cyan().bold());

    let mut current = 0;
    for &(n, connectivity) in available_connectivities() {
        if n != current {
            if current != 0 {
                println!();
            }
            println!("  {} qubits", style(n).bold());
            current = n;
        }
        let graph = connectivity.graph(n)?;
        println!(
            "    {} {:<8} {}",
            style("●").green(),
            connectivity.name(),
            style(graph).dim()
        );
    }
    Ok(())
}
