// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing sequence data and the
// contracts of the data-preparation collaborators.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Sequence rows and partition tables
pub mod sequence;

// Immutable processor configuration
pub mod config;

// Collaborator contracts (preprocessor, fold splitter, data processor)
pub mod traits;
