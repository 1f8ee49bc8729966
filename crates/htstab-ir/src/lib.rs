//! htstab Clifford Circuit Representation
//!
//! This crate provides the circuit data structures used by the htstab
//! synthesis pipeline. Circuits are flat, ordered gate lists over a fixed
//! number of qubits, restricted to the Clifford gates the template tables
//! and the synthesis steps produce.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] for addressing qubits
//! - **Gates**: [`CliffordGate`] for the supported gate set
//! - **Instructions**: [`Instruction`] combining a gate with its operands
//! - **Circuit**: [`Circuit`], an immutable-by-default value with builder methods,
//!   composition, inversion and two-qubit metrics
//! - **Gate specifications**: the [`gate_spec`] text format used by the template tables
//!
//! # Example: Building and Inverting a Circuit
//!
//! ```rust
//! use htstab_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new(3);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cz(QubitId(0), QubitId(1)).unwrap();
//! circuit.swap(QubitId(1), QubitId(2)).unwrap();
//!
//! assert_eq!(circuit.to_gate_spec(), "h0 cz0,1 swap1,2");
//! assert_eq!(circuit.two_qubit_count(), 4);
//! assert_eq!(circuit.inverse().to_gate_spec(), "swap1,2 cz0,1 h0");
//! ```
//!
//! # Example: Parsing a Gate Specification
//!
//! ```rust
//! use htstab_ir::Circuit;
//!
//! let circuit = Circuit::parse(4, "h0 h1 h2 h3 cz0,1 cz2,3 cz1,2").unwrap();
//! let metrics = circuit.metrics();
//! assert_eq!(metrics.two_qubit_count, 3);
//! assert_eq!(metrics.two_qubit_depth, 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Token | Qubits | Two-qubit cost |
//! |------|-------|--------|----------------|
//! | `H` | `h` | 1 | 0 |
//! | `S`, `Sdg` | `s`, `sdg` | 1 | 0 |
//! | `X`, `Y`, `Z` | `x`, `y`, `z` | 1 | 0 |
//! | `CX` | `cx` | 2 (control, target) | 1 |
//! | `CZ` | `cz` | 2 | 1 |
//! | `Swap` | `swap` | 2 | 3 |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod gate_spec;
pub mod instruction;
pub mod qubit;

pub use circuit::{Circuit, CircuitMetrics};
pub use error::{IrError, IrResult};
pub use gate::CliffordGate;
pub use instruction::Instruction;
pub use qubit::QubitId;
