//! Run parameters and normalization of raw command-line values.

/// Total frames computed when none (or a non-positive count) is given.
pub const DEFAULT_FRAMES: usize = 128;
/// Sample rate passed to `init` when none (or a non-positive rate) is given.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;
/// Length of the first compute block.
pub const DEFAULT_SPLIT: usize = 32;

/// Parameters of one probe run. Immutable once the run begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunParams {
    /// Total frames across both phases. Always positive.
    pub frames: usize,
    /// Sample rate handed to the unit. Always positive.
    pub sample_rate: u32,
    /// Frames in the first phase; the rest go to the second.
    pub split: usize,
}

impl Default for RunParams {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            sample_rate: DEFAULT_SAMPLE_RATE,
            split: DEFAULT_SPLIT,
        }
    }
}

impl RunParams {
    /// Build parameters from raw positional arguments.
    ///
    /// Missing, non-numeric, non-positive or out-of-range values fall back
    /// to the defaults. Numbers are read like C `atoi`: leading whitespace,
    /// an optional sign, then as many digits as follow.
    pub fn from_args(frames: Option<&str>, sample_rate: Option<&str>) -> Self {
        let frames = frames
            .map(leading_int)
            .filter(|&n| n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_FRAMES);
        let sample_rate = sample_rate
            .map(leading_int)
            .filter(|&n| n > 0)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_SAMPLE_RATE);
        Self {
            frames,
            sample_rate,
            split: DEFAULT_SPLIT,
        }
    }

    /// Replace the split point.
    pub fn with_split(mut self, split: usize) -> Self {
        self.split = split;
        self
    }
}

/// Integer prefix of `raw`, or 0 when there is none. Saturates on overflow.
fn leading_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative {
        -value
    } else {
        value
    }
}
