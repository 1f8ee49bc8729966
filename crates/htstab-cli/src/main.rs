//! htstab Command-Line Interface
//!
//! Hardware-tailored preparation and readout circuits for stabilizer states.
//!
//! ```text
//! htstab prepare XZZ ZXI ZIX -c linear
//! htstab readout -c star -- -XXXX ZZII IZZI IIZZ
//! htstab compress "h0 cx0,1 cx1,2 cx0,2" -n 3 -c linear
//! htstab mub -n 3 -c linear --format json
//! ```
//!
//! Signed generators start with `-`; put them after `--` so they are not
//! taken for options.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::prepare::Direction;
use commands::{classify, compress, connectivities, mub, prepare, sample, stats, version};

/// htstab - hardware-tailored stabilizer state synthesis
#[derive(Parser)]
#[command(name = "htstab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Read template tables from this directory instead of the bundled ones
    #[arg(long, env = "HTSTAB_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a circuit preparing a stabilizer state from |0...0>
    Prepare {
        /// Generators, one Pauli string per qubit (e.g. XZZ ZXI ZIX)
        #[arg(required = true)]
        paulis: Vec<String>,

        /// Device connectivity (all, linear, star, cycle, T, Q, ladder, E, H)
        #[arg(short, long, default_value = "all")]
        connectivity: String,

        /// Output format (text, json, yaml)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Synthesize a circuit mapping a stabilizer state onto |0...0>
    Readout {
        /// Generators, one Pauli string per qubit
        #[arg(required = true)]
        paulis: Vec<String>,

        /// Device connectivity
        #[arg(short, long, default_value = "all")]
        connectivity: String,

        /// Output format (text, json, yaml)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Re-synthesize a Clifford preparation circuit for a device
    Compress {
        /// Gate specification (e.g. "h0 cx0,1 s1")
        gate_spec: String,

        /// Number of qubits
        #[arg(short = 'n', long)]
        qubits: u32,

        /// Device connectivity
        #[arg(short, long, default_value = "all")]
        connectivity: String,

        /// Output format (text, json, yaml)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Classify a stabilizer state up to local Cliffords
    Classify {
        /// Generators, one Pauli string per qubit
        #[arg(required = true)]
        paulis: Vec<String>,

        /// Output format (text, json, yaml)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show template table statistics
    Stats {
        /// Number of qubits (all if omitted)
        #[arg(short = 'n', long)]
        qubits: Option<usize>,

        /// Device connectivity (all available if omitted)
        #[arg(short, long)]
        connectivity: Option<String>,

        /// Output format (text, json, yaml)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show mutually unbiased bases and their readout circuits
    Mub {
        /// Number of qubits
        #[arg(short = 'n', long)]
        qubits: usize,

        /// Device connectivity
        #[arg(short, long, default_value = "all")]
        connectivity: String,

        /// Output format (text, json, yaml)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Draw a random stabilizer state and verify its preparation circuit
    Sample {
        /// Number of qubits
        #[arg(short = 'n', long)]
        qubits: usize,

        /// Device connectivity
        #[arg(short, long, default_value = "all")]
        connectivity: String,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (text, json, yaml)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List supported devices
    Connectivities,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let data_dir = cli.data_dir.as_deref();

    // Execute command
    let result = match cli.command {
        Commands::Prepare {
            paulis,
            connectivity,
            format,
        } => prepare::execute(&paulis, &connectivity, &format, Direction::Prepare, data_dir),

        Commands::Readout {
            paulis,
            connectivity,
            format,
        } => prepare::execute(&paulis, &connectivity, &format, Direction::Readout, data_dir),

        Commands::Compress {
            gate_spec,
            qubits,
            connectivity,
            format,
        } => compress::execute(&gate_spec, qubits, &connectivity, &format, data_dir),

        Commands::Classify { paulis, format } => classify::execute(&paulis, &format),

        Commands::Stats {
            qubits,
            connectivity,
            format,
        } => stats::execute(qubits, connectivity.as_deref(), &format, data_dir),

        Commands::Mub {
            qubits,
            connectivity,
            format,
        } => mub::execute(qubits, &connectivity, &format, data_dir),

        Commands::Sample {
            qubits,
            connectivity,
            seed,
            format,
        } => sample::execute(qubits, &connectivity, seed, &format, data_dir),

        Commands::Connectivities => connectivities::execute(),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
