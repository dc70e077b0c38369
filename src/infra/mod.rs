// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Filesystem concerns shared by both workflows:
//
//   layout.rs    - where raw and interim partitions live, and
//                  idempotent creation of those directories
//
//   csv_store.rs - writing a Corpus to CSV all-or-nothing
//                  (temporary file + rename)
//
// Reading is the loader's job (Layer 4) because it also has to
// handle remote sources.

/// Data directory layout and partition paths
pub mod layout;

/// Atomic CSV writer implementing CorpusSink
pub mod csv_store;
