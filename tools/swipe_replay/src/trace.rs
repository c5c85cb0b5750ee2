use anyhow::{anyhow, bail, Result};
use swipe_engine::{Point, TouchFrame};

pub const TRACE_HEADER: &str = "touch_trace,ms,count,x0,y0,x1,y1";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplaySample {
    pub ms: u64,
    pub frame: TouchFrame,
}

/// Parses `touch_trace,ms,count,x0,y0,x1,y1[,raw...]` rows.
///
/// Blank lines, `#` comments, headers and rows with another tag are skipped;
/// trailing raw columns are ignored.
pub fn parse_trace(text: &str, source: &str) -> Result<Vec<ReplaySample>> {
    let mut out = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(TRACE_HEADER) {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts[0] != "touch_trace" {
            continue;
        }
        if parts.len() < 7 {
            bail!("{source}:{line_no} invalid trace line, expected at least 7 columns");
        }

        let ms = parse_field::<u64>(parts[1], source, line_no, "ms")?;
        let count = parse_field::<u8>(parts[2], source, line_no, "count")?;
        let x0 = parse_field::<f32>(parts[3], source, line_no, "x0")?;
        let y0 = parse_field::<f32>(parts[4], source, line_no, "y0")?;
        let x1 = parse_field::<f32>(parts[5], source, line_no, "x1")?;
        let y1 = parse_field::<f32>(parts[6], source, line_no, "y1")?;

        if let Some(prev) = out.last().map(|sample: &ReplaySample| sample.ms) {
            if ms < prev {
                bail!("{source}:{line_no} timestamp {ms} goes backwards (previous {prev})");
            }
        }

        out.push(ReplaySample {
            ms,
            frame: TouchFrame {
                touch_count: count,
                points: [Point::new(x0, y0), Point::new(x1, y1)],
            },
        });
    }

    Ok(out)
}

pub fn parse_expected(text: &str, source: &str) -> Result<Vec<&'static str>> {
    let mut labels = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        let label = normalize_label(token)
            .ok_or_else(|| anyhow!("{source}:{} invalid expected outcome: {token}", idx + 1))?;
        labels.push(label);
    }
    Ok(labels)
}

pub fn normalize_label(label: &str) -> Option<&'static str> {
    match label.trim().to_ascii_lowercase().as_str() {
        "swipe_left" => Some("swipe_left"),
        "swipe_right" => Some("swipe_right"),
        "swipe_up" => Some("swipe_up"),
        "swipe_down" => Some("swipe_down"),
        "tap" => Some("tap"),
        "abandoned" => Some("abandoned"),
        "cancelled" | "cancel" => Some("cancelled"),
        _ => None,
    }
}

fn parse_field<T>(raw: &str, source: &str, line_no: usize, field: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|err| anyhow!("{source}:{line_no} invalid {field} '{raw}': {err}"))
}
