// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data layer to build partitions and loaders.
//
// Rules for this layer:
//   - No encoding or parsing logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Partitions + batch providers for a training loop
pub mod data_processor;

// Dry run over every batch provider
pub mod inspect_use_case;
