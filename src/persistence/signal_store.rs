//! Tab-separated signal text: one `x\tvalue` line per sample, no header

use std::path::Path;

use crate::error::{LabError, LabErrorBuilder, LabResult, PersistedFormat};
use crate::utils::check_same_length;

/// Encode a `(space, signal)` pair
///
/// Values are written with Rust's shortest round-trip float formatting, so
/// decoding restores them exactly.
pub fn encode_signal(space: &[f64], signal: &[f64]) -> LabResult<String> {
    check_same_length("signal space/signal", space.len(), signal.len(), "persistence", "encode_signal")?;
    let mut out = String::with_capacity(space.len() * 24);
    for (x, y) in space.iter().zip(signal) {
        out.push_str(&format!("{}\t{}\n", x, y));
    }
    Ok(out)
}

/// Decode text into `(space, signal)`; trailing blank lines are ignored
pub fn decode_signal(content: &str) -> LabResult<(Vec<f64>, Vec<f64>)> {
    let body = content.trim_end_matches(['\n', '\r', ' ', '\t']);
    let mut space = Vec::new();
    let mut signal = Vec::new();
    if body.is_empty() {
        return Ok((space, signal));
    }

    for (index, line) in body.lines().enumerate() {
        let line_no = index + 1;
        let mut fields = line.trim_end_matches('\r').split('\t');
        let (Some(x), Some(y)) = (fields.next(), fields.next()) else {
            return Err(malformed("expected two tab-separated fields", line_no));
        };
        space.push(parse_field(x, "x-coordinate", line_no)?);
        signal.push(parse_field(y, "sample value", line_no)?);
    }

    Ok((space, signal))
}

fn parse_field(field: &str, what: &str, line: usize) -> LabResult<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| malformed(&format!("non-numeric {} {:?}", what, field), line))
}

fn malformed(reason: &str, line: usize) -> LabError {
    LabErrorBuilder::new("persistence", "decode_signal").malformed(PersistedFormat::SignalText, reason, Some(line))
}

pub fn save_signal_file<P: AsRef<Path>>(space: &[f64], signal: &[f64], path: P) -> LabResult<()> {
    let content = encode_signal(space, signal)?;
    std::fs::write(path.as_ref(), content)
        .map_err(|e| {
            LabErrorBuilder::new("persistence", "save_signal")
                .with_info("path", path.as_ref().display().to_string())
                .io(e)
        })?;
    Ok(())
}

pub fn load_signal_file<P: AsRef<Path>>(path: P) -> LabResult<(Vec<f64>, Vec<f64>)> {
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| {
            LabErrorBuilder::new("persistence", "load_signal")
                .with_info("path", path.as_ref().display().to_string())
                .io(e)
        })?;
    decode_signal(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_format() {
        let text = encode_signal(&[0.0, 0.5], &[1.0, -2.25]).unwrap();
        assert_eq!(text, "0\t1\n0.5\t-2.25\n");
    }

    #[test]
    fn test_decode_ignores_trailing_blank_lines() {
        let (x, y) = decode_signal("0\t1\n1\t2\n\n\n").unwrap();
        assert_eq!(x, vec![0.0, 1.0]);
        assert_eq!(y, vec![1.0, 2.0]);
    }

    #[test]
    fn test_decode_accepts_scientific_and_crlf() {
        let (x, y) = decode_signal("1e-3\t2.5E2\r\n2\t3\r\n").unwrap();
        assert_eq!(x, vec![0.001, 2.0]);
        assert_eq!(y, vec![250.0, 3.0]);
    }

    #[test]
    fn test_decode_reports_line_numbers() {
        match decode_signal("0\t1\n1\n2\t3\n") {
            Err(LabError::MalformedPersistedData { line, format, .. }) => {
                assert_eq!(line, Some(2));
                assert_eq!(format, PersistedFormat::SignalText);
            }
            other => panic!("expected malformed data, got {:?}", other),
        }
        assert!(matches!(
            decode_signal("0\t1\n1\tabc\n"),
            Err(LabError::MalformedPersistedData { line: Some(2), .. })
        ));
        // an interior blank line is still an error
        assert!(matches!(
            decode_signal("0\t1\n\n2\t3\n"),
            Err(LabError::MalformedPersistedData { line: Some(2), .. })
        ));
    }

    #[test]
    fn test_empty_text_is_empty_signal() {
        let (x, y) = decode_signal("").unwrap();
        assert!(x.is_empty() && y.is_empty());
    }

    #[test]
    fn test_encode_writes_one_line_per_sample() {
        let space = [0.0, 1.0, 2.0];
        let text = encode_signal(&space, &[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.ends_with("2\t0.3\n"));
    }

    #[test]
    fn test_load_failure_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = load_signal_file(&path).unwrap_err();
        assert!(matches!(err, LabError::Io { .. }));
        assert_eq!(err.context().operation, "load_signal");
        assert_eq!(
            err.context().additional_info.get("path"),
            Some(&path.display().to_string())
        );
    }

    #[test]
    fn test_encode_rejects_ragged_input() {
        assert!(matches!(encode_signal(&[0.0], &[]), Err(LabError::ShapeMismatch { .. })));
    }
}
