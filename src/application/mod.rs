// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Workflow coordination only:
//   - No regexes or text rules here (Layer 4)
//   - No printing here (Layer 1)
//   - No direct file writes here (Layer 6)
//
// Each use case owns a PipelineConfig and runs its steps in a
// fixed order, wrapping lower-layer errors with anyhow context.

// Shared configuration for every workflow
pub mod config;

// Fetch → filter/encode → shuffle → split → write raw partitions
pub mod ingest_use_case;

// Read raw partitions → normalise text → write interim partitions
pub mod normalize_use_case;
