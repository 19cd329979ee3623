// Papersplit Core Library
//
// Splits a Markdown academic paper into main body, backmatter and appendix.
// Boundary detection and assembly are pure functions over the text; the
// processor wires them to file I/O.

pub mod assembler;
pub mod config;
pub mod error;
pub mod processor;
pub mod rules;
pub mod storage;
pub mod types;

// Re-export main types and functions for easy use
pub use types::*;
pub use assembler::SegmentAssembler;
pub use config::SplitConfig;
pub use error::SplitError;
pub use processor::{OutputPaths, PaperSplitter, StepProfiler};
pub use rules::{locate, BoundaryLocator, PatternSet, TitleExtractor};
pub use storage::{DryRunStorage, FileStorage, SegmentStorage};
