//! Error types for the synthesis crate.

use thiserror::Error;

/// Broad category of a [`SynthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller passed something malformed or unsupported.
    InvalidInput,
    /// The input is well-formed but inconsistent, or the tables disagree with it.
    InconsistentState,
    /// A template table is missing or corrupt.
    Configuration,
}

/// Errors that can occur during stabilizer circuit synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] htstab_ir::IrError),

    /// Qubit count outside the classified range.
    #[error("{0} qubits are not supported (supported: 2 to 6)")]
    UnsupportedQubitCount(usize),

    /// Qubit count beyond what the bit-packed Pauli representation holds.
    #[error("{num_qubits} qubits exceed the maximum of {max}")]
    TooManyQubits {
        /// Number of qubits requested.
        num_qubits: usize,
        /// Largest supported count.
        max: usize,
    },

    /// Graph too large to pack into a `u64` graph id.
    #[error("Graphs with {num_vertices} vertices do not fit a compressed id (maximum {max})")]
    GraphTooLarge {
        /// Number of vertices.
        num_vertices: usize,
        /// Largest packable count.
        max: usize,
    },

    /// Graph family undefined for this few vertices.
    #[error("{family} graphs need at least {min} vertices, got {num_vertices}")]
    TooFewVertices {
        /// The graph family.
        family: &'static str,
        /// Number of vertices requested.
        num_vertices: usize,
        /// Smallest supported count.
        min: usize,
    },

    /// No MUB set exists for this device.
    #[error("No mutually unbiased bases for '{connectivity}' connectivity on {num_qubits} qubits")]
    MubUnavailable {
        /// Number of qubits requested.
        num_qubits: usize,
        /// Connectivity name requested.
        connectivity: String,
    },

    /// Connectivity not available for this qubit count.
    #[error("Connectivity '{connectivity}' is not supported for {num_qubits} qubits")]
    UnsupportedConnectivity {
        /// Number of qubits requested.
        num_qubits: usize,
        /// Connectivity name requested.
        connectivity: String,
    },

    /// Unknown connectivity name.
    #[error("Unknown connectivity '{0}' (expected one of: all, linear, star, cycle, T, Q, ladder, E, H)")]
    UnknownConnectivity(String),

    /// Malformed Pauli string.
    #[error("Invalid Pauli string '{pauli}': {reason}")]
    InvalidPauli {
        /// The string as given.
        pauli: String,
        /// What was wrong.
        reason: String,
    },

    /// Matrices or generator lists of the wrong shape.
    #[error("Dimension mismatch in {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Which input was malformed.
        what: &'static str,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Equivalence class id out of range.
    #[error("Class id {id} out of range for {num_qubits} qubits (count {count})")]
    InvalidClassId {
        /// Number of qubits.
        num_qubits: usize,
        /// Requested id.
        id: usize,
        /// Number of classes for this qubit count.
        count: usize,
    },

    /// Vertex groups that do not fit the entanglement structure.
    #[error("Vertex groups {repr} do not fit structure {structure}")]
    InvalidRepr {
        /// Name of the entanglement structure.
        structure: String,
        /// The groups as given.
        repr: String,
    },

    /// Generators are dependent or do not commute.
    #[error("Invalid stabilizer: {0}")]
    InvalidStabilizer(String),

    /// No local Clifford layer maps the stabilizer onto the template graph.
    #[error("No local Clifford layer maps the stabilizer onto graph {graph_id}")]
    NoLocalClifford {
        /// Compressed id of the target graph.
        graph_id: u64,
    },

    /// Phase rotation between circuits of different stabilizer groups.
    #[error("Generator {generator} is not an element of the target stabilizer group")]
    DifferentStabilizerGroup {
        /// Index of the offending generator.
        generator: usize,
    },

    /// Template table file not found.
    #[error("Template table '{table}' not found")]
    MissingTable {
        /// File name of the table.
        table: String,
    },

    /// Template table could not be read.
    #[error("Failed to read template table '{table}': {source}")]
    TableIo {
        /// File name of the table.
        table: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Template table content is corrupt.
    #[error("Malformed template table '{table}' at line {line}: {reason}")]
    MalformedTable {
        /// File name of the table.
        table: String,
        /// One-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },
}

impl SynthError {
    /// Categorize this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SynthError::Ir(_)
            | SynthError::UnsupportedQubitCount(_)
            | SynthError::TooManyQubits { .. }
            | SynthError::GraphTooLarge { .. }
            | SynthError::TooFewVertices { .. }
            | SynthError::MubUnavailable { .. }
            | SynthError::UnsupportedConnectivity { .. }
            | SynthError::UnknownConnectivity(_)
            | SynthError::InvalidPauli { .. }
            | SynthError::DimensionMismatch { .. }
            | SynthError::InvalidClassId { .. }
            | SynthError::InvalidRepr { .. } => ErrorKind::InvalidInput,
            SynthError::InvalidStabilizer(_)
            | SynthError::NoLocalClifford { .. }
            | SynthError::DifferentStabilizerGroup { .. } => ErrorKind::InconsistentState,
            SynthError::MissingTable { .. }
            | SynthError::TableIo { .. }
            | SynthError::MalformedTable { .. } => ErrorKind::Configuration,
        }
    }

    pub(crate) fn malformed_table(table: &str, line: usize, reason: impl Into<String>) -> Self {
        SynthError::MalformedTable {
            table: table.to_string(),
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            SynthError::UnsupportedQubitCount(7).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            SynthError::NoLocalClifford { graph_id: 3 }.kind(),
            ErrorKind::InconsistentState
        );
        assert_eq!(
            SynthError::malformed_table("stabilizer3-all.txt", 2, "bad").kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn test_error_display() {
        let err = SynthError::UnsupportedConnectivity {
            num_qubits: 2,
            connectivity: "linear".into(),
        };
        assert_eq!(
            err.to_string(),
            "Connectivity 'linear' is not supported for 2 qubits"
        );
    }
}
