use std::io::BufRead;

use gazex_core::GazeSample;

use crate::error::ConvertError;

/// The seven positional header lines of a trial block. Opaque pass-through
/// fields: logged for diagnostics, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockMeta {
    pub date: String,
    pub display: String,
    pub coverage: String,
    pub duration: String,
    pub displayed_as: String,
    pub chosen: String,
    pub tutorial: String,
}

/// Pull reader for the block-structured gaze log format.
///
/// Call [`next_meta`](Self::next_meta) to enter the next block, then drain it
/// with [`next_sample`](Self::next_sample) until `None` (blank-line
/// terminator or end of input). Samples are handed out one at a time and
/// never retained here.
pub struct BlockReader<R> {
    input: R,
    line: usize,
    blocks: usize,
}

impl<R: BufRead> BlockReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: 0,
            blocks: 0,
        }
    }

    /// 1-based number of the most recently read line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Number of block headers read so far.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    fn read_line(&mut self) -> Result<Option<String>, ConvertError> {
        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .map_err(|source| ConvertError::ReadInput {
                line: self.line + 1,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    fn header_line(&mut self) -> Result<String, ConvertError> {
        self.read_line()?.ok_or(ConvertError::TruncatedHeader {
            block: self.blocks,
            line: self.line + 1,
        })
    }

    /// Reads the next block header. Returns `None` at end of input. Stray
    /// blank lines between blocks are skipped.
    pub fn next_meta(&mut self) -> Result<Option<BlockMeta>, ConvertError> {
        let date = loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.is_empty() => continue,
                Some(line) => break line,
            }
        };
        self.blocks += 1;
        Ok(Some(BlockMeta {
            date,
            display: self.header_line()?,
            coverage: self.header_line()?,
            duration: self.header_line()?,
            displayed_as: self.header_line()?,
            chosen: self.header_line()?,
            tutorial: self.header_line()?,
        }))
    }

    /// Reads the next sample of the current block. Returns `None` once the
    /// block's blank-line terminator (or end of input) is reached.
    pub fn next_sample(&mut self) -> Result<Option<GazeSample>, ConvertError> {
        match self.read_line()? {
            None => Ok(None),
            Some(line) if line.is_empty() => Ok(None),
            Some(line) => line
                .parse::<GazeSample>()
                .map(Some)
                .map_err(|source| ConvertError::MalformedSample {
                    line: self.line,
                    source,
                }),
        }
    }
}
