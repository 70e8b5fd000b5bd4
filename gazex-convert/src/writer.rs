use std::path::Path;

use gazex_core::FixationRecord;

use crate::error::ConvertError;

/// Column header expected by the downstream fixation-analysis import.
const HEADER: [&str; 6] = [
    "MediaName",
    "RecordingTimestamp",
    "FixationIndex",
    "GazeEventDuration",
    "FixationPointX (MCSpx)",
    "FixationPointY (MCSpx)",
];

const MEDIA_NAME: &str = "Box";

/// Writes one block's fixation sequence to `path`, one row per fixation in
/// closure order, with a 1-based `FixationIndex`.
pub fn write_fixations(path: &Path, records: &[FixationRecord]) -> Result<(), ConvertError> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| write_error(path, source))?;
    writer
        .write_record(HEADER)
        .map_err(|source| write_error(path, source))?;
    for (index, record) in records.iter().enumerate() {
        writer
            .write_record(&[
                MEDIA_NAME.to_string(),
                record.timestamp_ms.to_string(),
                (index + 1).to_string(),
                record.duration_ms.to_string(),
                record.mean_x.to_string(),
                record.mean_y.to_string(),
            ])
            .map_err(|source| write_error(path, source))?;
    }
    writer
        .flush()
        .map_err(|source| write_error(path, csv::Error::from(source)))?;
    Ok(())
}

fn write_error(path: &Path, source: csv::Error) -> ConvertError {
    ConvertError::WriteOutput {
        path: path.to_path_buf(),
        source,
    }
}
