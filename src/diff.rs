//! Float-tolerant comparison of two probe reports.
//!
//! Reports are compared line by line and token by token. Tokens that parse
//! as numbers are compared with a combined relative/absolute tolerance;
//! anything else must match exactly.

use crate::report::format_significant;
use std::fmt;

/// Default tolerance for both the relative and absolute bound.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// One difference between a reference report and a candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Mismatch {
    /// One report ran out of lines.
    Length { line: usize },
    /// Rows have a different number of tokens.
    TokenCount {
        line: usize,
        reference: usize,
        candidate: usize,
    },
    /// Numeric tokens outside tolerance.
    Value {
        line: usize,
        reference: f64,
        candidate: f64,
        tolerance: f64,
    },
    /// Non-numeric tokens that differ.
    Token {
        line: usize,
        token: usize,
        reference: String,
        candidate: String,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Length { line } => write!(f, "Line {}: file length mismatch", line),
            Mismatch::TokenCount {
                line,
                reference,
                candidate,
            } => write!(
                f,
                "Line {}: token count mismatch ({} vs {})",
                line, reference, candidate
            ),
            Mismatch::Value {
                line,
                reference,
                candidate,
                tolerance,
            } => write!(
                f,
                "(Line {}, fa = {}, fb = {}, \u{394} = {}, tol = {})",
                line,
                shortest_repr(*reference),
                shortest_repr(*candidate),
                format_significant(reference - candidate, 4),
                shortest_repr(*tolerance)
            ),
            Mismatch::Token {
                line,
                token,
                reference,
                candidate,
            } => write!(
                f,
                "Line {}, token {}: '{}' != '{}'",
                line, token, reference, candidate
            ),
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiffReport {
    pub tolerance: f64,
    pub mismatches: Vec<Mismatch>,
}

impl DiffReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mismatch in &self.mismatches {
            writeln!(f, "{}", mismatch)?;
        }
        if self.is_clean() {
            writeln!(
                f,
                "No differences within tolerance {}",
                shortest_repr(self.tolerance)
            )
        } else {
            writeln!(f, "Differences found.")
        }
    }
}

/// Shortest round-tripping text for `value`, laid out the way Python's
/// `repr(float)` does: fixed notation with a trailing `.0` for exponents in
/// `-4..16`, otherwise `d.ddde±XX`.
pub fn shortest_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        return text.to_owned();
    }
    if value == 0.0 {
        let text = if value.is_sign_negative() { "-0.0" } else { "0.0" };
        return text.to_owned();
    }

    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let sign = if value.is_sign_negative() { "-" } else { "" };

    if (-4..16).contains(&exponent) {
        let body = if exponent < 0 {
            format!("0.{}{}", "0".repeat((-exponent - 1) as usize), digits)
        } else {
            let int_len = exponent as usize + 1;
            if digits.len() <= int_len {
                format!("{}{}.0", digits, "0".repeat(int_len - digits.len()))
            } else {
                format!("{}.{}", &digits[..int_len], &digits[int_len..])
            }
        };
        format!("{}{}", sign, body)
    } else {
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}{}e{}{:02}",
            sign,
            mantissa,
            exp_sign,
            exponent.unsigned_abs()
        )
    }
}

/// True when `a` and `b` are within `tol` relatively or absolutely.
pub fn is_close(a: f64, b: f64, tol: f64) -> bool {
    if a == b {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    let diff = (a - b).abs();
    diff <= (tol * b.abs()) || diff <= (tol * a.abs()) || diff <= tol
}

/// Compare `candidate` against `reference`. Line numbers are 1-based.
pub fn compare_reports(reference: &str, candidate: &str, tol: f64) -> DiffReport {
    let left: Vec<&str> = reference.lines().collect();
    let right: Vec<&str> = candidate.lines().collect();
    let mut mismatches = Vec::new();

    for index in 0..left.len().max(right.len()) {
        let line = index + 1;
        let (Some(a), Some(b)) = (left.get(index), right.get(index)) else {
            mismatches.push(Mismatch::Length { line });
            continue;
        };
        let tokens_a: Vec<&str> = a.split_whitespace().collect();
        let tokens_b: Vec<&str> = b.split_whitespace().collect();
        if tokens_a.len() != tokens_b.len() {
            mismatches.push(Mismatch::TokenCount {
                line,
                reference: tokens_a.len(),
                candidate: tokens_b.len(),
            });
            continue;
        }
        for (token, (ta, tb)) in tokens_a.iter().zip(&tokens_b).enumerate() {
            match (ta.parse::<f64>(), tb.parse::<f64>()) {
                (Ok(fa), Ok(fb)) => {
                    if !is_close(fa, fb, tol) {
                        mismatches.push(Mismatch::Value {
                            line,
                            reference: fa,
                            candidate: fb,
                            tolerance: tol,
                        });
                    }
                }
                _ => {
                    if ta != tb {
                        mismatches.push(Mismatch::Token {
                            line,
                            token: token + 1,
                            reference: (*ta).to_owned(),
                            candidate: (*tb).to_owned(),
                        });
                    }
                }
            }
        }
    }

    DiffReport {
        tolerance: tol,
        mismatches,
    }
}
