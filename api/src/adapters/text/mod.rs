//! Text adapters
//!
//! Extraction of plain text from stored materials and the local summarizer.

pub mod extractor;
pub mod summarizer;

pub use extractor::StoredMaterialTextExtractor;
pub use summarizer::FrequencySummarizer;
