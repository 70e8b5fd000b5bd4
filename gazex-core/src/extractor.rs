use crate::fixation::FixationRecord;
use crate::sample::GazeSample;

/// Thresholds controlling when consecutive samples merge into one fixation.
#[derive(Debug, Clone, Copy)]
pub struct ExtractorConfig {
    /// Maximum per-axis distance (pixels) from the fixation's first sample.
    pub max_coordinate_offset: i32,
    /// Maximum gap (seconds) between the candidate's clock and the time of
    /// the previous sample line.
    pub max_time_offset: f32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_coordinate_offset: 30,
            max_time_offset: 10.0,
        }
    }
}

/// Candidate fixation being accumulated.
///
/// Sums are single precision, matching the recording tool's arithmetic.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    start_x: i32,
    start_y: i32,
    start_time: f32,
    sum_x: f32,
    sum_y: f32,
    count: u32,
    last_time: f32,
}

impl Candidate {
    fn start(sample: GazeSample) -> Self {
        Self {
            start_x: sample.x,
            start_y: sample.y,
            start_time: sample.t,
            sum_x: sample.x as f32,
            sum_y: sample.y as f32,
            count: 1,
            last_time: sample.t,
        }
    }

    /// Whether `sample` still belongs to this fixation. The spatial test is
    /// an axis-aligned box around the first sample, not a radius. A candidate
    /// whose clock reads exactly zero is never extended: the tracker resets
    /// its clock at segment starts, so a zero anchor cannot be told apart
    /// from a fresh segment.
    fn accepts(&self, sample: GazeSample, prev_time: f32, config: &ExtractorConfig) -> bool {
        (self.start_x - sample.x).abs() < config.max_coordinate_offset
            && (self.start_y - sample.y).abs() < config.max_coordinate_offset
            && (self.last_time - prev_time).abs() < config.max_time_offset
            && self.last_time != 0.0
    }

    fn absorb(&mut self, sample: GazeSample) {
        self.sum_x += sample.x as f32;
        self.sum_y += sample.y as f32;
        self.count += 1;
        self.last_time = sample.t;
    }

    /// Closes the candidate. Candidates whose truncated duration is not
    /// strictly positive are dropped.
    fn close(self, segment_offset: f32) -> Option<FixationRecord> {
        let duration_ms = (1000.0 * (self.last_time - self.start_time)) as i32;
        if duration_ms <= 0 {
            return None;
        }
        Some(FixationRecord {
            mean_x: (self.sum_x / self.count as f32) as i32,
            mean_y: (self.sum_y / self.count as f32) as i32,
            duration_ms,
            timestamp_ms: (1000.0 * (self.last_time + segment_offset)) as i32,
        })
    }
}

/// Extractor state: between fixations, or accumulating one.
#[derive(Debug)]
enum State {
    Idle,
    Accumulating(Candidate),
}

/// Single-pass fixation extractor for one trial block.
///
/// Feed samples in file order with [`push`](Self::push); each push closes at
/// most one fixation. Call [`finish`](Self::finish) at the block terminator
/// to close the trailing candidate.
pub struct FixationExtractor {
    config: ExtractorConfig,
    state: State,
    prev_time: f32,
    segment_offset: f32,
}

impl FixationExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            state: State::Idle,
            prev_time: 0.0,
            segment_offset: 0.0,
        }
    }

    /// Consumes one sample, returning the fixation it closed, if any.
    pub fn push(&mut self, sample: GazeSample) -> Option<FixationRecord> {
        // A zero time marks a tracker clock reset. Fold the previous line's
        // time into the running offset before anything else, so timestamps
        // stay absolute within the block.
        if sample.t == 0.0 {
            self.segment_offset += self.prev_time;
        }

        let (state, emitted) = match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => (State::Accumulating(Candidate::start(sample)), None),
            State::Accumulating(mut candidate) => {
                if candidate.accepts(sample, self.prev_time, &self.config) {
                    candidate.absorb(sample);
                    (State::Accumulating(candidate), None)
                } else {
                    let closed = candidate.close(self.segment_offset);
                    (State::Accumulating(Candidate::start(sample)), closed)
                }
            }
        };
        self.state = state;
        self.prev_time = sample.t;
        emitted
    }

    /// Closes the block, emitting the trailing candidate if it has positive
    /// duration.
    pub fn finish(self) -> Option<FixationRecord> {
        match self.state {
            State::Idle => None,
            State::Accumulating(candidate) => candidate.close(self.segment_offset),
        }
    }
}

/// Runs the extractor over a full block of samples.
pub fn extract<I>(samples: I, config: ExtractorConfig) -> Vec<FixationRecord>
where
    I: IntoIterator<Item = GazeSample>,
{
    let mut extractor = FixationExtractor::new(config);
    let mut records: Vec<FixationRecord> = samples
        .into_iter()
        .filter_map(|sample| extractor.push(sample))
        .collect();
    records.extend(extractor.finish());
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: i32, y: i32, t: f32) -> GazeSample {
        GazeSample { x, y, t }
    }

    fn run(samples: &[GazeSample]) -> Vec<FixationRecord> {
        extract(samples.iter().copied(), ExtractorConfig::default())
    }

    #[test]
    fn empty_block_yields_nothing() {
        assert!(run(&[]).is_empty());
    }

    #[test]
    fn single_sample_has_zero_duration_and_is_dropped() {
        assert!(run(&[s(100, 100, 0.25)]).is_empty());
    }

    #[test]
    fn mean_covers_every_absorbed_sample() {
        // Three samples merge; the fourth jumps far enough to close. The
        // mean is over all three, not just the first and last.
        let records = run(&[
            s(100, 100, 0.25),
            s(104, 102, 0.5),
            s(99, 103, 0.75),
            s(500, 500, 1.0),
        ]);
        assert_eq!(
            records,
            vec![FixationRecord {
                mean_x: 101,
                mean_y: 101,
                duration_ms: 500,
                timestamp_ms: 750,
            }]
        );
    }

    #[test]
    fn coordinate_threshold_is_exclusive() {
        // 29 px away still merges.
        let records = run(&[s(100, 100, 0.25), s(129, 100, 0.5)]);
        assert_eq!(
            records,
            vec![FixationRecord {
                mean_x: 114,
                mean_y: 100,
                duration_ms: 250,
                timestamp_ms: 500,
            }]
        );

        // 30 px away splits; both halves end up with zero duration.
        assert!(run(&[s(100, 100, 0.25), s(130, 100, 0.5)]).is_empty());
    }

    #[test]
    fn y_axis_checked_independently() {
        assert!(run(&[s(100, 100, 0.25), s(100, 130, 0.5)]).is_empty());
    }

    #[test]
    fn identical_position_merges() {
        let records = run(&[s(100, 100, 0.25), s(100, 100, 0.5)]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mean_x, 100);
        assert_eq!(records[0].mean_y, 100);
    }

    #[test]
    fn means_and_durations_truncate_toward_zero() {
        let records = run(&[s(100, 100, 0.25), s(101, 100, 0.3125)]);
        assert_eq!(
            records,
            vec![FixationRecord {
                mean_x: 100,
                mean_y: 100,
                duration_ms: 62,
                timestamp_ms: 312,
            }]
        );
    }

    #[test]
    fn block_arithmetic_with_running_clock() {
        // Two nearby samples then a far jump: one fixation over the first
        // pair, while the jump target alone has zero duration.
        let records = run(&[s(100, 100, 0.25), s(102, 101, 0.3), s(500, 500, 0.35)]);
        assert_eq!(
            records,
            vec![FixationRecord {
                mean_x: 101,
                mean_y: 100,
                duration_ms: 50,
                timestamp_ms: 300,
            }]
        );
    }

    #[test]
    fn candidate_anchored_at_clock_zero_is_never_extended() {
        // The first sample of a segment carries t == 0; the candidate it
        // starts is closed by the very next sample with zero duration, so
        // nothing is emitted for it.
        let records = run(&[s(100, 100, 0.0), s(102, 101, 0.05), s(500, 500, 0.1)]);
        assert!(records.is_empty());
    }

    #[test]
    fn clock_reset_accumulates_offset() {
        let records = run(&[
            s(100, 100, 0.25),
            s(101, 101, 0.5),
            s(400, 400, 1.0),
            s(401, 401, 2.0),
            // tracker clock reset: new segment
            s(800, 800, 0.0),
            s(801, 800, 0.5),
            s(802, 801, 1.0),
        ]);
        // The fixation closed by the reset sample already carries the new
        // offset; fixations inside the second segment are shifted by the
        // first segment's final time.
        assert_eq!(
            records,
            vec![
                FixationRecord {
                    mean_x: 100,
                    mean_y: 100,
                    duration_ms: 250,
                    timestamp_ms: 500,
                },
                FixationRecord {
                    mean_x: 400,
                    mean_y: 400,
                    duration_ms: 1000,
                    timestamp_ms: 4000,
                },
                FixationRecord {
                    mean_x: 801,
                    mean_y: 800,
                    duration_ms: 500,
                    timestamp_ms: 3000,
                },
            ]
        );
    }

    #[test]
    fn custom_coordinate_threshold_respected() {
        let config = ExtractorConfig {
            max_coordinate_offset: 5,
            ..ExtractorConfig::default()
        };
        let merged = extract(
            [s(100, 100, 0.25), s(104, 100, 0.5)].into_iter(),
            config,
        );
        assert_eq!(merged.len(), 1);

        let split = extract(
            [s(100, 100, 0.25), s(105, 100, 0.5)].into_iter(),
            config,
        );
        assert!(split.is_empty());
    }

    #[test]
    fn streaming_and_batch_agree() {
        let samples = [
            s(100, 100, 0.25),
            s(102, 101, 0.5),
            s(500, 500, 1.0),
            s(501, 501, 1.25),
            s(90, 90, 1.5),
        ];
        let batch = run(&samples);

        let mut extractor = FixationExtractor::new(ExtractorConfig::default());
        let mut streamed = Vec::new();
        for sample in samples {
            streamed.extend(extractor.push(sample));
        }
        streamed.extend(extractor.finish());

        assert_eq!(batch, streamed);
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn every_emitted_duration_is_positive() {
        let samples = [
            s(100, 100, 0.0),
            s(101, 100, 0.25),
            s(300, 300, 0.25),
            s(301, 300, 0.5),
            s(600, 600, 0.5),
        ];
        for record in run(&samples) {
            assert!(record.duration_ms > 0);
        }
    }
}
