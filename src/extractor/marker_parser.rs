//! Field extraction from HMS-3000 Hall Effect reports.
//!
//! The report layout is fixed by the instrument software. A label line holds a
//! marker such as `I[mA]`, and the values sit on the line right after it,
//! separated by runs of whitespace:
//!
//! ```text
//! ... I[mA] ...
//! 1.000
//! Nb[/cm^3]   u[cm^2/Vs]   ...   NS[/cm^2]
//! -2.41E+18   312.5   ...   -7.23E+14
//! ```
//!
//! Only token counts are checked. Values are never parsed or validated.

use crate::error::MalformedReason;
use crate::extractor::record::ExtractedRecord;

pub const CURRENT_MARKER: &str = "I[mA]";
pub const CONCENTRATION_MARKER: &str = "Nb[/cm^3]";

const CURRENT_INDEX: usize = 0;
const BULK_INDEX: usize = 0;
const MOBILITY_INDEX: usize = 1;
const SHEET_INDEX: usize = 6;

/// Extract a record from the full text of one report.
///
/// Returns `Ok(None)` when either marker is missing, or when the line after
/// the last occurrence of a marker is blank. If a marker occurs more than once
/// the last occurrence wins.
pub fn parse_report(text: &str) -> Result<Option<ExtractedRecord>, MalformedReason> {
    let lines: Vec<&str> = text.lines().collect();
    parse_lines(&lines)
}

pub fn parse_lines(lines: &[&str]) -> Result<Option<ExtractedRecord>, MalformedReason> {
    let mut current_tokens: Option<Vec<&str>> = None;
    let mut concentration_tokens: Option<Vec<&str>> = None;

    for (index, line) in lines.iter().enumerate() {
        if line.contains(CURRENT_MARKER) {
            current_tokens = Some(following_tokens(lines, index, CURRENT_MARKER)?);
        }

        if line.contains(CONCENTRATION_MARKER) {
            concentration_tokens = Some(following_tokens(lines, index, CONCENTRATION_MARKER)?);
        }
    }

    let (current, concentration) = match (current_tokens, concentration_tokens) {
        (Some(current), Some(concentration))
            if !current.is_empty() && !concentration.is_empty() =>
        {
            (current, concentration)
        }
        _ => return Ok(None),
    };

    let current_value = token_at(&current, CURRENT_INDEX, CURRENT_MARKER)?;
    let bulk = token_at(&concentration, BULK_INDEX, CONCENTRATION_MARKER)?;
    let mobility = token_at(&concentration, MOBILITY_INDEX, CONCENTRATION_MARKER)?;
    let sheet = token_at(&concentration, SHEET_INDEX, CONCENTRATION_MARKER)?;

    Ok(Some(ExtractedRecord::new(current_value, bulk, mobility, sheet)))
}

fn following_tokens<'a>(
    lines: &[&'a str],
    marker_index: usize,
    marker: &str,
) -> Result<Vec<&'a str>, MalformedReason> {
    lines
        .get(marker_index + 1)
        .map(|line| line.split_whitespace().collect())
        .ok_or_else(|| MalformedReason::MarkerOnLastLine {
            marker: marker.to_string(),
        })
}

fn token_at<'a>(tokens: &[&'a str], index: usize, marker: &str) -> Result<&'a str, MalformedReason> {
    tokens
        .get(index)
        .copied()
        .ok_or_else(|| MalformedReason::TooFewTokens {
            marker: marker.to_string(),
            needed: index + 1,
            found: tokens.len(),
        })
}
