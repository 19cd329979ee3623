// All splitting functionality is in papersplit-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod report;

// Re-export core types for convenience
pub use papersplit_core::*;

// Re-export CLI utilities
pub use report::SplitReport;
