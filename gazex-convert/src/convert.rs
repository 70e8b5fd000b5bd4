use std::fs;
use std::io::BufReader;
use std::path::Path;

use gazex_core::{ExtractorConfig, FixationExtractor};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ConvertError;
use crate::reader::BlockReader;
use crate::writer;

/// Counters for one finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Trial blocks read from the input.
    pub blocks: usize,
    /// Fixation files written; blocks without fixations write none.
    pub files_written: usize,
    /// Fixation rows across all written files.
    pub fixations: usize,
}

/// Batch converter: one gaze log in, one fixation CSV per productive trial
/// block out. Inputs are never mutated; any parse or I/O failure aborts the
/// whole run.
pub struct Converter {
    config: ExtractorConfig,
}

impl Converter {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Processes `input` to completion, writing `<stem>_<n>.csv` files into
    /// `output_dir`, where `<stem>` is the input file name up to its first
    /// `.` and `n` counts productive blocks starting at 1.
    pub fn run(&self, input: &Path, output_dir: &Path) -> Result<RunSummary, ConvertError> {
        let file = fs::File::open(input).map_err(|source| ConvertError::OpenInput {
            path: input.to_path_buf(),
            source,
        })?;
        fs::create_dir_all(output_dir).map_err(|source| ConvertError::CreateOutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let stem = output_stem(input);
        let mut reader = BlockReader::new(BufReader::new(file));
        let mut summary = RunSummary::default();

        while let Some(meta) = reader.next_meta()? {
            summary.blocks += 1;
            let mut extractor = FixationExtractor::new(self.config);
            let mut records = Vec::new();
            let mut samples = 0usize;
            while let Some(sample) = reader.next_sample()? {
                samples += 1;
                records.extend(extractor.push(sample));
            }
            records.extend(extractor.finish());
            debug!(
                block = summary.blocks,
                date = %meta.date,
                samples,
                fixations = records.len(),
                "block finished"
            );
            if records.is_empty() {
                continue;
            }

            let path = output_dir.join(format!("{}_{}.csv", stem, summary.files_written + 1));
            writer::write_fixations(&path, &records)?;
            summary.files_written += 1;
            summary.fixations += records.len();
            debug!(path = %path.display(), rows = records.len(), "wrote fixation file");
        }

        info!(
            blocks = summary.blocks,
            files = summary.files_written,
            fixations = summary.fixations,
            "conversion finished"
        );
        Ok(summary)
    }
}

/// Output file stem: the input file name up to its first `.`, so
/// `Image0054.2015-07.txt` produces `Image0054_1.csv` and so on.
fn output_stem(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .as_deref()
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("gaze")
        .to_string()
}
