//! Precomputed circuit templates.
//!
//! For every supported `(qubit count, connectivity)` pair there is one
//! table with a row per equivalence class. Row `k` holds a circuit that
//! prepares the graph state of some graph in class `k` from `|0...0>`,
//! using two-qubit gates only along edges of the connectivity:
//!
//! ```text
//! graphId:cost:depth:gateSpec
//! ```
//!
//! Tables are read through a [`TemplateSource`] and cached per key by a
//! [`TemplateStore`]. The crate bundles every table; a
//! [`DirectorySource`] reads replacements from disk.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use htstab_ir::Circuit;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::connectivity::Connectivity;
use crate::error::{SynthError, SynthResult};
use crate::graph::Graph;
use crate::lc_class::LcClass;
use crate::mub::{self, MubTable};
use crate::pipeline;

// =============================================================================
// Templates
// =============================================================================

/// One table row: a preparation circuit for a graph state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitTemplate {
    /// Compressed id of the prepared graph.
    pub graph_id: u64,
    /// Declared native two-qubit gate count.
    pub cost: u32,
    /// Declared native two-qubit depth.
    pub depth: u32,
    /// The circuit.
    pub circuit: Circuit,
}

impl CircuitTemplate {
    /// The prepared graph.
    pub fn graph(&self) -> SynthResult<Graph> {
        Graph::decompress(self.circuit.num_qubits(), self.graph_id)
    }
}

/// File name of the stabilizer table for a key.
pub fn stabilizer_table_name(n: usize, connectivity: Connectivity) -> String {
    format!("stabilizer{n}-{connectivity}.txt")
}

/// File name of the MUB table for a key.
pub fn mub_table_name(n: usize, connectivity: Connectivity) -> String {
    format!("mub{n}-{connectivity}.txt")
}

/// File name of the bare MUB basis list for a key.
pub fn mub_bases_name(n: usize, connectivity: Connectivity) -> String {
    format!("mub{n}-{connectivity}-bases.txt")
}

/// A parsed stabilizer table.
#[derive(Debug, Clone)]
pub struct StabilizerTable {
    num_qubits: usize,
    connectivity: Connectivity,
    templates: Vec<CircuitTemplate>,
}

impl StabilizerTable {
    /// Parse a table; `name` is used in error messages.
    pub fn parse(
        name: &str,
        n: usize,
        connectivity: Connectivity,
        text: &str,
    ) -> SynthResult<Self> {
        let expected = LcClass::count(n)?;
        let max_graph_id = 1u64 << (n * (n - 1) / 2);
        let mut templates = Vec::with_capacity(expected);

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let bad = |reason: String| SynthError::malformed_table(name, line_no, reason);

            let fields: Vec<&str> = line.split(':').collect();
            if fields.len() != 4 {
                return Err(bad(format!("expected 4 fields, found {}", fields.len())));
            }
            let graph_id: u64 = fields[0]
                .parse()
                .map_err(|_| bad(format!("invalid graph id '{}'", fields[0])))?;
            if graph_id >= max_graph_id {
                return Err(bad(format!("graph id {graph_id} too large")));
            }
            let cost: u32 = fields[1]
                .parse()
                .map_err(|_| bad(format!("invalid cost '{}'", fields[1])))?;
            let depth: u32 = fields[2]
                .parse()
                .map_err(|_| bad(format!("invalid depth '{}'", fields[2])))?;
            let circuit = Circuit::parse(n as u32, fields[3]).map_err(|e| bad(e.to_string()))?;

            templates.push(CircuitTemplate {
                graph_id,
                cost,
                depth,
                circuit,
            });
        }

        if templates.len() != expected {
            return Err(SynthError::malformed_table(
                name,
                0,
                format!("expected {expected} rows, found {}", templates.len()),
            ));
        }
        Ok(Self {
            num_qubits: n,
            connectivity,
            templates,
        })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The connectivity the circuits respect.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// The template for class `id`.
    pub fn get(&self, id: usize) -> SynthResult<&CircuitTemplate> {
        self.templates
            .get(id)
            .ok_or_else(|| SynthError::InvalidClassId {
                num_qubits: self.num_qubits,
                id,
                count: self.templates.len(),
            })
    }

    /// All templates, by class id.
    pub fn templates(&self) -> &[CircuitTemplate] {
        &self.templates
    }

    /// Summary statistics over the declared costs and depths.
    pub fn statistics(&self) -> TemplateStatistics {
        let mut stats = TemplateStatistics {
            num_qubits: self.num_qubits,
            connectivity: self.connectivity,
            num_classes: self.templates.len(),
            ..TemplateStatistics::default()
        };
        let mut total_cost = 0u64;
        let mut total_depth = 0u64;
        for t in &self.templates {
            total_cost += u64::from(t.cost);
            total_depth += u64::from(t.depth);
            stats.max_cost = stats.max_cost.max(t.cost);
            stats.max_depth = stats.max_depth.max(t.depth);
            *stats.cost_histogram.entry(t.cost).or_default() += 1;
            *stats.depth_histogram.entry(t.depth).or_default() += 1;
        }
        if !self.templates.is_empty() {
            let count = self.templates.len() as f64;
            stats.average_cost = total_cost as f64 / count;
            stats.average_depth = total_depth as f64 / count;
        }
        stats
    }
}

/// Cost and depth summary of one stabilizer table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateStatistics {
    /// Number of qubits.
    pub num_qubits: usize,
    /// The connectivity.
    pub connectivity: Connectivity,
    /// Number of classes (rows).
    pub num_classes: usize,
    /// Mean two-qubit gate count.
    pub average_cost: f64,
    /// Mean two-qubit depth.
    pub average_depth: f64,
    /// Largest two-qubit gate count.
    pub max_cost: u32,
    /// Largest two-qubit depth.
    pub max_depth: u32,
    /// Number of classes per cost.
    pub cost_histogram: BTreeMap<u32, usize>,
    /// Number of classes per depth.
    pub depth_histogram: BTreeMap<u32, usize>,
}

// =============================================================================
// Sources
// =============================================================================

/// Where table files come from.
pub trait TemplateSource: Send + Sync {
    /// Short description for log messages.
    fn name(&self) -> String;

    /// The contents of the named table file.
    fn read(&self, file_name: &str) -> SynthResult<String>;
}

macro_rules! bundled {
    ($($file:literal),+ $(,)?) => {
        &[$(($file, include_str!(concat!("../data/", $file))),)+]
    };
}

const BUNDLED: &[(&str, &str)] = bundled![
    "stabilizer2-all.txt",
    "stabilizer3-all.txt",
    "stabilizer3-linear.txt",
    "stabilizer4-all.txt",
    "stabilizer4-linear.txt",
    "stabilizer4-star.txt",
    "stabilizer4-cycle.txt",
    "stabilizer5-all.txt",
    "stabilizer5-linear.txt",
    "stabilizer5-star.txt",
    "stabilizer5-cycle.txt",
    "stabilizer5-T.txt",
    "stabilizer5-Q.txt",
    "stabilizer6-all.txt",
    "stabilizer6-linear.txt",
    "stabilizer6-star.txt",
    "stabilizer6-ladder.txt",
    "stabilizer6-E.txt",
    "stabilizer6-H.txt",
    "stabilizer6-Q.txt",
    "mub2-all.txt",
    "mub3-all.txt",
    "mub3-linear.txt",
    "mub4-all.txt",
    "mub4-linear.txt",
    "mub4-star.txt",
    "mub4-cycle.txt",
    "mub5-all-bases.txt",
    "mub5-linear-bases.txt",
    "mub5-star-bases.txt",
    "mub5-cycle-bases.txt",
    "mub5-T-bases.txt",
    "mub5-Q-bases.txt",
    "mub6-all-bases.txt",
];

/// The tables compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledTables;

impl TemplateSource for BundledTables {
    fn name(&self) -> String {
        "bundled".into()
    }

    fn read(&self, file_name: &str) -> SynthResult<String> {
        BUNDLED
            .iter()
            .find(|(name, _)| *name == file_name)
            .map(|(_, text)| (*text).to_string())
            .ok_or_else(|| SynthError::MissingTable {
                table: file_name.to_string(),
            })
    }
}

/// Tables read from a directory, using the bundled file names.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Read tables from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for DirectorySource {
    fn name(&self) -> String {
        self.root.display().to_string()
    }

    fn read(&self, file_name: &str) -> SynthResult<String> {
        let path = self.root.join(file_name);
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SynthError::MissingTable {
                    table: path.display().to_string(),
                }
            } else {
                SynthError::TableIo {
                    table: path.display().to_string(),
                    source,
                }
            }
        })
    }
}

// =============================================================================
// Store
// =============================================================================

type Key = (usize, Connectivity);

/// Per-key slot; filled by the first successful load.
type Slot<T> = Arc<Mutex<Option<Arc<T>>>>;

/// Read-through cache of parsed tables.
///
/// Each table is read and parsed once, on first use, and shared
/// afterwards. Concurrent first uses of the same key wait for that single
/// load. A failed load is not cached.
pub struct TemplateStore {
    source: Box<dyn TemplateSource>,
    stabilizer: RwLock<FxHashMap<Key, Slot<StabilizerTable>>>,
    mub: RwLock<FxHashMap<Key, Slot<MubTable>>>,
}

impl TemplateStore {
    /// Create a store over `source`.
    pub fn new(source: impl TemplateSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            stabilizer: RwLock::new(FxHashMap::default()),
            mub: RwLock::new(FxHashMap::default()),
        }
    }

    /// A store over the bundled tables.
    pub fn bundled() -> Self {
        Self::new(BundledTables)
    }

    /// Description of the underlying source.
    pub fn source_name(&self) -> String {
        self.source.name()
    }

    /// The stabilizer table for `n` qubits on `connectivity`.
    pub fn stabilizer_table(
        &self,
        n: usize,
        connectivity: Connectivity,
    ) -> SynthResult<Arc<StabilizerTable>> {
        connectivity.ensure_supported(n)?;
        cached(&self.stabilizer, (n, connectivity), || {
            let name = stabilizer_table_name(n, connectivity);
            let text = self.source.read(&name)?;
            let table = StabilizerTable::parse(&name, n, connectivity, &text)?;
            info!(
                "Loaded {name} from {} ({} classes)",
                self.source.name(),
                table.templates().len()
            );
            Ok(table)
        })
    }

    /// The MUB table for `n` qubits on `connectivity`.
    ///
    /// Reads the table with precomputed circuits when the source has one,
    /// and otherwise synthesizes readout circuits for the basis list.
    pub fn mub_table(&self, n: usize, connectivity: Connectivity) -> SynthResult<Arc<MubTable>> {
        connectivity.ensure_supported(n)?;
        if !mub::has_mubs(n, connectivity) {
            return Err(SynthError::MubUnavailable {
                num_qubits: n,
                connectivity: connectivity.to_string(),
            });
        }
        cached(&self.mub, (n, connectivity), || {
            let name = mub_table_name(n, connectivity);
            match self.source.read(&name) {
                Ok(text) => {
                    let table = MubTable::parse(&name, n, connectivity, &text)?;
                    info!("Loaded {name} from {}", self.source.name());
                    Ok(table)
                }
                Err(SynthError::MissingTable { .. }) => self.derive_mub_table(n, connectivity),
                Err(err) => Err(err),
            }
        })
    }

    fn derive_mub_table(&self, n: usize, connectivity: Connectivity) -> SynthResult<MubTable> {
        let name = mub_bases_name(n, connectivity);
        let text = self.source.read(&name)?;
        let bases = mub::parse_bases(&name, n, &text)?;
        let table = MubTable::from_bases(n, connectivity, bases, |basis| {
            Ok(pipeline::synthesize_with(self, basis, connectivity)?
                .circuit
                .inverse())
        })?;
        info!(
            "Synthesized {} readout circuits for {name} from {}",
            table.circuits().len(),
            self.source.name()
        );
        Ok(table)
    }

    /// The template for class `id`.
    pub fn lookup(
        &self,
        n: usize,
        connectivity: Connectivity,
        id: usize,
    ) -> SynthResult<CircuitTemplate> {
        let table = self.stabilizer_table(n, connectivity)?;
        let template = table.get(id)?.clone();
        debug!(
            n,
            %connectivity,
            id,
            graph_id = template.graph_id,
            cost = template.cost,
            "template lookup"
        );
        Ok(template)
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::bundled()
    }
}

impl std::fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateStore")
            .field("source", &self.source.name())
            .finish_non_exhaustive()
    }
}

fn cached<T>(
    map: &RwLock<FxHashMap<Key, Slot<T>>>,
    key: Key,
    load: impl FnOnce() -> SynthResult<T>,
) -> SynthResult<Arc<T>> {
    let existing = map
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
        .map(Arc::clone);
    let slot = match existing {
        Some(slot) => slot,
        None => Arc::clone(
            map.write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(key)
                .or_default(),
        ),
    };

    // Held across the load so other callers for this key wait for it.
    let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(hit) = entry.as_ref() {
        return Ok(Arc::clone(hit));
    }
    let loaded = Arc::new(load()?);
    *entry = Some(Arc::clone(&loaded));
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves a fixed table and counts reads.
    struct CountingSource {
        text: String,
        reads: Arc<AtomicUsize>,
    }

    impl TemplateSource for CountingSource {
        fn name(&self) -> String {
            "counting".into()
        }

        fn read(&self, file_name: &str) -> SynthResult<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if file_name == "stabilizer2-all.txt" {
                Ok(self.text.clone())
            } else {
                Err(SynthError::MissingTable {
                    table: file_name.into(),
                })
            }
        }
    }

    const TWO_QUBITS: &str = "0:0:0:\n1:1:1:h0 h1 cz0,1\n";

    #[test]
    fn test_parse_rows() {
        let table = StabilizerTable::parse("t", 2, Connectivity::All, TWO_QUBITS).unwrap();
        assert_eq!(table.templates().len(), 2);
        let bell = table.get(1).unwrap();
        assert_eq!(bell.graph_id, 1);
        assert_eq!(bell.circuit.to_gate_spec(), "h0 h1 cz0,1");
        assert_eq!(bell.graph().unwrap(), Graph::linear(2));
        assert!(table.get(0).unwrap().circuit.is_empty());
        assert!(matches!(
            table.get(2),
            Err(SynthError::InvalidClassId { id: 2, count: 2, .. })
        ));
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let cases = [
            ("0:0:0:\n1:1:h0\n", 2),
            ("0:0:0:\nx:1:1:h0\n", 2),
            ("0:0:0:\n1:1:1:q0\n", 2),
            ("0:0:0:\n1:1:1:h5\n", 2),
            ("0:0:0:\n9:1:1:h0\n", 2),
            ("0:0:0:\n", 0),
        ];
        for (text, line) in cases {
            let err = StabilizerTable::parse("bad.txt", 2, Connectivity::All, text).unwrap_err();
            match err {
                SynthError::MalformedTable { table, line: l, .. } => {
                    assert_eq!(table, "bad.txt");
                    assert_eq!(l, line, "{text:?}");
                }
                other => panic!("unexpected error {other}"),
            }
        }
    }

    #[test]
    fn test_bundled_tables_present() {
        for &(n, c) in crate::connectivity::available_connectivities() {
            assert!(BundledTables.read(&stabilizer_table_name(n, c)).is_ok());
        }
        assert!(matches!(
            BundledTables.read("stabilizer7-all.txt"),
            Err(SynthError::MissingTable { .. })
        ));
    }

    #[test]
    fn test_store_caches_per_key() {
        let reads = Arc::new(AtomicUsize::new(0));
        let store = TemplateStore::new(CountingSource {
            text: TWO_QUBITS.into(),
            reads: Arc::clone(&reads),
        });
        let a = store.stabilizer_table(2, Connectivity::All).unwrap();
        let b = store.stabilizer_table(2, Connectivity::All).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert_eq!(store.lookup(2, Connectivity::All, 1).unwrap().cost, 1);
    }

    #[test]
    fn test_store_loads_once_under_contention() {
        const THREADS: usize = 8;
        let reads = Arc::new(AtomicUsize::new(0));
        let store = TemplateStore::new(CountingSource {
            text: TWO_QUBITS.into(),
            reads: Arc::clone(&reads),
        });
        let barrier = std::sync::Barrier::new(THREADS);
        let tables: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        barrier.wait();
                        store.stabilizer_table(2, Connectivity::All).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert!(tables.iter().all(|t| Arc::ptr_eq(t, &tables[0])));
    }

    #[test]
    fn test_failed_load_is_retried() {
        let reads = Arc::new(AtomicUsize::new(0));
        let store = TemplateStore::new(CountingSource {
            text: TWO_QUBITS.into(),
            reads: Arc::clone(&reads),
        });
        assert!(store.stabilizer_table(3, Connectivity::All).is_err());
        assert!(store.stabilizer_table(3, Connectivity::All).is_err());
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_store_rejects_unsupported_keys() {
        let store = TemplateStore::bundled();
        assert!(matches!(
            store.stabilizer_table(2, Connectivity::Linear),
            Err(SynthError::UnsupportedConnectivity { .. })
        ));
        assert!(matches!(
            store.lookup(7, Connectivity::All, 0),
            Err(SynthError::UnsupportedQubitCount(7))
        ));
    }

    #[test]
    fn test_directory_source_missing_file() {
        let source = DirectorySource::new("/nonexistent/htstab-tables");
        assert!(matches!(
            source.read("stabilizer2-all.txt"),
            Err(SynthError::MissingTable { .. })
        ));
    }

    #[test]
    fn test_statistics() {
        let table = StabilizerTable::parse("t", 2, Connectivity::All, TWO_QUBITS).unwrap();
        let stats = table.statistics();
        assert_eq!(stats.num_classes, 2);
        assert_eq!(stats.max_cost, 1);
        assert!((stats.average_cost - 0.5).abs() < 1e-12);
        assert_eq!(stats.cost_histogram.get(&0), Some(&1));
    }
}
