/// Per-frame signal types and the line protocol spoken by the upstream detector
///
/// The hand-tracking collaborator writes one line per processed video frame.
/// A line is either a precomputed finger count, an absence marker, or a raw
/// `landmarks` line carrying joint coordinates that we count ourselves.
/// The same grammar is used for recorded trace files.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use crate::landmarks::{HandLandmarks, Handedness, LANDMARK_COUNT, count_fingers};

/// One frame's worth of detector output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSignal {
    /// No hand landmarks present in the frame
    Absent,
    /// Total extended fingers summed across all detected hands
    Count(u32),
}

/// Parse a single detector line into a frame signal
///
/// Accepted forms:
/// - `3`: precomputed finger count
/// - `-1`, `-`, `none`: no hand detected
/// - `landmarks right 0.1,0.9 0.2,0.8 ... ; left ...`: raw joints, counted here
/// - blank lines and `#` comments yield `None`
pub fn parse_signal_line(line: &str) -> Result<Option<FrameSignal>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if line == "-" || line.eq_ignore_ascii_case("none") {
        return Ok(Some(FrameSignal::Absent));
    }

    if let Some(rest) = line.strip_prefix("landmarks") {
        let hands = parse_landmark_frame(rest)?;
        return Ok(Some(FrameSignal::Count(count_fingers(&hands))));
    }

    let value: i64 = line
        .parse()
        .with_context(|| format!("Unrecognized signal line: \"{}\"", line))?;

    // The original detector protocol uses -1 for "no hand"
    if value < 0 {
        Ok(Some(FrameSignal::Absent))
    } else {
        Ok(Some(FrameSignal::Count(value as u32)))
    }
}

/// Parse the body of a `landmarks` line: one or more hands separated by `;`,
/// each a handedness label followed by 21 `x,y` pairs
fn parse_landmark_frame(body: &str) -> Result<Vec<HandLandmarks>> {
    let mut hands = Vec::new();

    for hand_str in body.split(';') {
        let mut tokens = hand_str.split_whitespace();

        let label = tokens
            .next()
            .context("Landmark hand is missing a handedness label")?;
        let handedness = match label.to_lowercase().as_str() {
            "left" => Handedness::Left,
            "right" => Handedness::Right,
            other => bail!("Unknown handedness label: \"{}\"", other),
        };

        let mut points = Vec::with_capacity(LANDMARK_COUNT);
        for token in tokens {
            let (x, y) = token
                .split_once(',')
                .with_context(|| format!("Landmark point \"{}\" is not x,y", token))?;
            let x: f32 = x.trim().parse().context("Landmark x is not a number")?;
            let y: f32 = y.trim().parse().context("Landmark y is not a number")?;
            points.push((x, y));
        }

        if points.len() != LANDMARK_COUNT {
            bail!(
                "Expected {} landmark points per hand, got {}",
                LANDMARK_COUNT,
                points.len()
            );
        }

        hands.push(HandLandmarks::new(handedness, points)?);
    }

    Ok(hands)
}

/// Read a recorded signal trace: one frame per line, same grammar as stdin
pub fn read_trace(path: &Path) -> Result<Vec<FrameSignal>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace file: {}", path.display()))?;

    let mut frames = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        let parsed = parse_signal_line(line)
            .with_context(|| format!("{}:{}", path.display(), line_no + 1))?;
        if let Some(signal) = parsed {
            frames.push(signal);
        }
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(
            parse_signal_line("3").unwrap(),
            Some(FrameSignal::Count(3))
        );
        assert_eq!(
            parse_signal_line("  10 ").unwrap(),
            Some(FrameSignal::Count(10))
        );
    }

    #[test]
    fn test_parse_absent_markers() {
        assert_eq!(parse_signal_line("-1").unwrap(), Some(FrameSignal::Absent));
        assert_eq!(parse_signal_line("-").unwrap(), Some(FrameSignal::Absent));
        assert_eq!(parse_signal_line("none").unwrap(), Some(FrameSignal::Absent));
        assert_eq!(parse_signal_line("NONE").unwrap(), Some(FrameSignal::Absent));
    }

    #[test]
    fn test_parse_skips_blanks_and_comments() {
        assert_eq!(parse_signal_line("").unwrap(), None);
        assert_eq!(parse_signal_line("   ").unwrap(), None);
        assert_eq!(parse_signal_line("# five frames of fist").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_signal_line("five").is_err());
        assert!(parse_signal_line("3.5").is_err());
    }

    #[test]
    fn test_parse_landmark_line_open_right_hand() {
        // Thumb tip left of the CMC joint (right hand rule) and all four
        // fingertips above their PIP joints: five extended fingers
        let mut points = vec![(0.5, 0.9); LANDMARK_COUNT];
        points[1] = (0.6, 0.8); // thumb CMC
        points[4] = (0.2, 0.7); // thumb tip, x < CMC x
        for (tip, pip) in [(8, 6), (12, 10), (16, 14), (20, 18)] {
            points[pip] = (0.5, 0.6);
            points[tip] = (0.5, 0.3); // tip above PIP
        }

        let body: Vec<String> = points.iter().map(|(x, y)| format!("{},{}", x, y)).collect();
        let line = format!("landmarks right {}", body.join(" "));

        assert_eq!(
            parse_signal_line(&line).unwrap(),
            Some(FrameSignal::Count(5))
        );
    }

    #[test]
    fn test_parse_landmark_line_wrong_point_count() {
        assert!(parse_signal_line("landmarks right 0.1,0.2 0.3,0.4").is_err());
    }

    #[test]
    fn test_parse_landmark_line_unknown_handedness() {
        let body: Vec<String> = (0..LANDMARK_COUNT).map(|_| "0.5,0.5".to_string()).collect();
        let line = format!("landmarks upward {}", body.join(" "));
        assert!(parse_signal_line(&line).is_err());
    }
}
