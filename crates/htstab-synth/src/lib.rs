//! Hardware-tailored Stabilizer State Synthesis
//!
//! This crate builds preparation and readout circuits for stabilizer states
//! on devices with restricted qubit connectivity. Every stabilizer state of
//! up to six qubits is local-Clifford equivalent to one of a small number of
//! graph states. For each such class and each supported coupling graph a
//! precomputed template circuit with few two-qubit gates is stored; the
//! remaining work is purely single-qubit.
//!
//! # Architecture
//!
//! ```text
//! Stabilizer [R; S | P]
//!       │
//!       ▼
//! ┌──────────────┐
//! │   classify   │ ◄── graph invariants, linear class ids
//! └──────────────┘
//!       │ class id
//!       ▼
//! ┌──────────────┐
//! │TemplateStore │ ◄── bundled tables or a data directory
//! └──────────────┘
//!       │ template graph + circuit
//!       ▼
//! ┌──────────────┐
//! │ local layer  │ ◄── GF(2) null space enumeration
//! └──────────────┘
//!       │
//!       ▼
//! ┌──────────────┐
//! │phase rotation│ ◄── prepended X gates fix generator signs
//! └──────────────┘
//!       │
//!       ▼
//! Preparation circuit (readout = its inverse)
//! ```
//!
//! # Example
//!
//! ```rust
//! use htstab_synth::{Connectivity, Stabilizer, Synthesizer};
//!
//! let stabilizer = Stabilizer::from_paulis(&["XZZ", "ZXI", "ZIX"]).unwrap();
//! let synth = Synthesizer::bundled();
//!
//! let prep = synth
//!     .preparation_circuit(&stabilizer, Connectivity::Linear)
//!     .unwrap();
//! assert!(Stabilizer::from_circuit(&prep).unwrap().is_equivalent(&stabilizer));
//!
//! let readout = synth.readout_circuit(&stabilizer, Connectivity::Linear).unwrap();
//! assert_eq!(readout, prep.inverse());
//! ```
//!
//! # Supported Devices
//!
//! | Qubits | Connectivities |
//! |--------|----------------|
//! | 2 | all |
//! | 3 | all, linear |
//! | 4 | all, linear, star, cycle |
//! | 5 | all, linear, star, cycle, T, Q |
//! | 6 | all, linear, star, ladder, E, H, Q |
//!
//! Mutually unbiased bases are available for up to four qubits.

pub mod connectivity;
pub mod error;
pub mod f2;
pub mod graph;
pub mod lc_class;
pub mod linear_index;
pub mod local_clifford;
pub mod mub;
pub mod pauli;
pub mod phase;
pub mod pipeline;
pub mod random;
pub mod stabilizer;
pub mod tableau;
pub mod templates;

pub use connectivity::{Connectivity, available_connectivities};
pub use error::{ErrorKind, SynthError, SynthResult};
pub use graph::Graph;
pub use lc_class::{EntanglementStructure, LcClass, classify};
pub use local_clifford::{
    LocalClifford, SingleQubitClifford, check_local_clifford, find_local_clifford_layer,
};
pub use mub::{MubInfo, MubTable};
pub use pauli::PauliString;
pub use phase::{rotate_into_circuit, rotate_into_state};
pub use pipeline::{Synthesis, Synthesizer};
pub use random::random_stabilizer;
pub use stabilizer::Stabilizer;
pub use tableau::Tableau;
pub use templates::{
    BundledTables, CircuitTemplate, DirectorySource, StabilizerTable, TemplateSource,
    TemplateStatistics, TemplateStore,
};

pub use htstab_ir::Circuit;
