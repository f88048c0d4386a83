//! Result reporting: the output buffers as a frame-indexed text table.
//!
//! One row per frame: the frame index, then one tab-separated value per
//! output channel. Values carry 10 significant digits and use the same
//! shortest fixed/scientific choice as C's `%g`, so reports can be diffed
//! against ones produced by other toolchains. No header, no summary.

use crate::buffers::BufferSet;
use crate::error::ProbeError;
use crate::invariant_ppt::{assert_invariant, REPORT_ROW_COUNT};
use std::io::{self, Write};
use std::path::Path;

/// Significant digits per value.
pub const REPORT_PRECISION: usize = 10;

/// Render `value` with `digits` significant digits following `%g` rules.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        let text = if value.is_sign_negative() { "-nan" } else { "nan" };
        return text.to_owned();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        return text.to_owned();
    }
    if value == 0.0 {
        let text = if value.is_sign_negative() { "-0" } else { "0" };
        return text.to_owned();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_fraction_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        strip_fraction_zeros(&format!("{:.*}", decimals, value)).to_owned()
    }
}

fn strip_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn push_row(row: &mut String, frame: usize, outputs: &BufferSet) {
    row.push_str(&frame.to_string());
    for channel in outputs.channels() {
        row.push('\t');
        row.push_str(&format_significant(f64::from(channel[frame]), REPORT_PRECISION));
    }
    row.push('\n');
}

/// Render the whole table.
pub fn render_table(outputs: &BufferSet) -> String {
    let mut table = String::new();
    for frame in 0..outputs.frames() {
        push_row(&mut table, frame, outputs);
    }
    assert_invariant(
        REPORT_ROW_COUNT,
        table.lines().count() == outputs.frames(),
        "one row per frame",
        None,
    );
    table
}

/// Stream the table into `out` row by row.
pub fn write_table<W: Write>(out: &mut W, outputs: &BufferSet) -> io::Result<()> {
    let mut row = String::new();
    for frame in 0..outputs.frames() {
        row.clear();
        push_row(&mut row, frame, outputs);
        out.write_all(row.as_bytes())?;
    }
    out.flush()
}

/// Write the output channels as an interleaved 32-bit float WAV file.
pub fn write_wav(path: &Path, outputs: &BufferSet, sample_rate: u32) -> Result<(), ProbeError> {
    if outputs.is_empty() {
        return Err(ProbeError::NoOutputs);
    }
    let channels = u16::try_from(outputs.channel_count())
        .map_err(|_| ProbeError::Wav(hound::Error::Unsupported))?;
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for frame in 0..outputs.frames() {
        for channel in outputs.channels() {
            writer.write_sample(channel[frame])?;
        }
    }
    writer.finalize()?;
    tracing::debug!(path = %path.display(), channels, frames = outputs.frames(), "wav written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_like_printf_g() {
        assert_eq!(format_significant(0.0, 10), "0");
        assert_eq!(format_significant(-0.0, 10), "-0");
        assert_eq!(format_significant(1.0, 10), "1");
        assert_eq!(format_significant(1.5, 10), "1.5");
        assert_eq!(format_significant(-0.25, 10), "-0.25");
        assert_eq!(format_significant(0.0001, 10), "0.0001");
        assert_eq!(format_significant(0.00001, 10), "1e-05");
        assert_eq!(format_significant(1234567890.0, 10), "1234567890");
        assert_eq!(format_significant(12345678901.0, 10), "1.23456789e+10");
        assert_eq!(format_significant(1.0e100, 10), "1e+100");
        assert_eq!(format_significant(f64::NAN, 10), "nan");
        assert_eq!(format_significant(f64::NEG_INFINITY, 10), "-inf");
    }

    #[test]
    fn float_samples_show_their_double_expansion() {
        assert_eq!(format_significant(f64::from(0.1f32), 10), "0.1000000015");
        assert_eq!(format_significant(f64::from(0.5f32), 10), "0.5");
    }

    #[test]
    fn rounding_can_bump_the_exponent() {
        assert_eq!(format_significant(9.9999999999, 10), "10");
        assert_eq!(format_significant(0.000099999999999, 10), "0.0001");
    }

    #[test]
    fn table_rows_are_tab_separated() {
        let mut outputs = BufferSet::new(2, 3);
        outputs.channel_mut(0).unwrap()[1] = 0.5;
        outputs.channel_mut(1).unwrap()[2] = -1.0;
        assert_eq!(render_table(&outputs), "0\t0\t0\n1\t0.5\t0\n2\t0\t-1\n");
    }

    #[test]
    fn zero_outputs_leave_only_indices() {
        let outputs = BufferSet::new(0, 2);
        assert_eq!(render_table(&outputs), "0\n1\n");
    }

    #[test]
    fn streamed_table_matches_rendered() {
        let mut outputs = BufferSet::new(1, 4);
        outputs.channel_mut(0).unwrap()[3] = 0.125;
        let mut streamed = Vec::new();
        write_table(&mut streamed, &outputs).unwrap();
        assert_eq!(String::from_utf8(streamed).unwrap(), render_table(&outputs));
    }

    #[test]
    fn wav_needs_outputs() {
        let outputs = BufferSet::new(0, 4);
        let path = std::env::temp_dir().join("auxide_probe_no_outputs.wav");
        assert!(matches!(
            write_wav(&path, &outputs, 48_000),
            Err(ProbeError::NoOutputs)
        ));
    }
}
