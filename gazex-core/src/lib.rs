pub mod extractor;
pub mod fixation;
pub mod sample;

pub use extractor::{extract, ExtractorConfig, FixationExtractor};
pub use fixation::FixationRecord;
pub use sample::{GazeSample, SampleParseError};
