// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any one layer:
//
//   config_store.rs — loads and saves ProcessorConfig as JSON
//                     so a run's data settings can be recorded
//                     and replayed
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// ProcessorConfig JSON persistence
pub mod config_store;
