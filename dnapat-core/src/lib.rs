pub mod alphabet;
pub mod analyzer;
pub mod codon;
pub mod error;
pub mod index;
pub mod io;
pub mod pattern;
pub mod tree;

pub use analyzer::SequenceAnalyzer;
pub use error::{AnalysisError, AnalysisResult};
pub use pattern::PatternRecord;
