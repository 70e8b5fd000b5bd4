use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

use thiserror::Error;

/// One raw gaze observation within a trial block.
///
/// `t` is the elapsed time in seconds since the start of the current gaze
/// segment; the tracker resets it to exactly `0` when a new segment begins
/// inside the same trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeSample {
    pub x: i32,
    pub y: i32,
    pub t: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum SampleParseError {
    #[error("expected 3 fields separated by ';', found {0}")]
    FieldCount(usize),

    #[error("invalid coordinate {value:?}: {source}")]
    Coordinate {
        value: String,
        source: ParseIntError,
    },

    #[error("invalid time {value:?}: {source}")]
    Time {
        value: String,
        source: ParseFloatError,
    },
}

impl FromStr for GazeSample {
    type Err = SampleParseError;

    /// Parses a `"<x>; <y>; <t>"` sample line. The decimal separator is
    /// always `.`, independent of the process locale.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(';').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(SampleParseError::FieldCount(fields.len()));
        }
        let x = fields[0]
            .parse()
            .map_err(|source| SampleParseError::Coordinate {
                value: fields[0].to_string(),
                source,
            })?;
        let y = fields[1]
            .parse()
            .map_err(|source| SampleParseError::Coordinate {
                value: fields[1].to_string(),
                source,
            })?;
        let t = fields[2].parse().map_err(|source| SampleParseError::Time {
            value: fields[2].to_string(),
            source,
        })?;
        Ok(Self { x, y, t })
    }
}
