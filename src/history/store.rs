//! CSV codec for the history backing store.
//!
//! The store is a UTF-8 text table: a fixed three-column header followed by
//! one event per row. `Details` is a single field of the form
//! `"label1: count1; label2: count2"`. Fields containing the delimiter, a
//! quote, or a newline are quoted with doubled inner quotes.

use chrono::NaiveDateTime;

use crate::history::DetectionEvent;

pub(crate) const HEADER_FIELDS: [&str; 3] = ["Timestamp", "TotalCount", "Details"];
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn header_line() -> String {
    format!("{}\n", HEADER_FIELDS.join(","))
}

pub(crate) fn encode_row(event: &DetectionEvent) -> String {
    format!(
        "{},{},{}\n",
        event.timestamp.format(TIMESTAMP_FORMAT),
        event.total_count,
        escape_field(&render_details(&event.breakdown)),
    )
}

pub(crate) fn render_details(breakdown: &[(String, u32)]) -> String {
    breakdown
        .iter()
        .map(|(label, count)| format!("{}: {}", label, count))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parses the whole store body. `Err` carries a human-readable reason; the
/// caller maps it to [`super::HistoryError::Unavailable`].
pub(crate) fn parse_table(raw: &str) -> Result<Vec<DetectionEvent>, String> {
    let mut lines = raw.lines();
    let header = lines.next().ok_or("store is empty, header row missing")?;
    let header_fields = split_fields(header)?;
    if header_fields != HEADER_FIELDS {
        return Err(format!("unexpected header row: {:?}", header_fields));
    }

    let mut events = Vec::new();
    for (idx, line) in lines.enumerate() {
        if line.is_empty() {
            continue;
        }
        let event = parse_row(line).map_err(|e| format!("row {}: {}", idx + 1, e))?;
        events.push(event);
    }
    Ok(events)
}

fn parse_row(line: &str) -> Result<DetectionEvent, String> {
    let fields = split_fields(line)?;
    if fields.len() != 3 {
        return Err(format!("expected 3 fields, found {}", fields.len()));
    }

    let timestamp = NaiveDateTime::parse_from_str(&fields[0], TIMESTAMP_FORMAT)
        .map_err(|e| format!("bad timestamp {:?}: {}", fields[0], e))?;
    let total_count: u32 = fields[1]
        .parse()
        .map_err(|_| format!("bad total count {:?}", fields[1]))?;
    let breakdown = parse_details(&fields[2])?;

    let sum: u32 = breakdown.iter().map(|(_, n)| n).sum();
    if sum != total_count {
        return Err(format!(
            "total count {} does not match details sum {}",
            total_count, sum
        ));
    }

    Ok(DetectionEvent {
        timestamp,
        total_count,
        breakdown,
    })
}

// Inverse of `render_details`: entries are separated by the exact "; "
// sequence and labels end at the last ": ". Labels are preserved verbatim;
// `HistoryLog::append` refuses labels the encoding cannot represent.
fn parse_details(details: &str) -> Result<Vec<(String, u32)>, String> {
    let mut breakdown = Vec::new();
    for part in details.split("; ") {
        let (label, count) = part
            .rsplit_once(": ")
            .ok_or_else(|| format!("bad details entry {:?}", part))?;
        if label.is_empty() {
            return Err(format!("empty label in details entry {:?}", part));
        }
        let count: u32 = count
            .parse()
            .map_err(|_| format!("bad count in details entry {:?}", part))?;
        breakdown.push((label.to_string(), count));
    }
    Ok(breakdown)
}

pub(crate) fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn split_fields(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if in_quotes {
        return Err(format!("unterminated quoted field in line {:?}", line));
    }
    fields.push(current);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(breakdown: &[(&str, u32)]) -> DetectionEvent {
        let breakdown: Vec<(String, u32)> = breakdown
            .iter()
            .map(|(l, n)| (l.to_string(), *n))
            .collect();
        DetectionEvent {
            timestamp: NaiveDate::from_ymd_opt(2026, 3, 14)
                .unwrap()
                .and_hms_opt(9, 26, 53)
                .unwrap(),
            total_count: breakdown.iter().map(|(_, n)| n).sum(),
            breakdown,
        }
    }

    #[test]
    fn encodes_header_and_row() {
        assert_eq!(header_line(), "Timestamp,TotalCount,Details\n");
        let row = encode_row(&event(&[("car", 2), ("robot", 1)]));
        assert_eq!(row, "2026-03-14 09:26:53,3,car: 2; robot: 1\n");
    }

    #[test]
    fn round_trips_plain_rows() {
        let events = vec![event(&[("car", 2)]), event(&[("duck", 1), ("car", 4)])];
        let mut raw = header_line();
        for ev in &events {
            raw.push_str(&encode_row(ev));
        }
        assert_eq!(parse_table(&raw).expect("parse"), events);
    }

    #[test]
    fn round_trips_labels_needing_quotes() {
        let ev = event(&[("toy, wooden", 1), ("duck \"classic\"", 2)]);
        let raw = format!("{}{}", header_line(), encode_row(&ev));
        let parsed = parse_table(&raw).expect("parse");
        assert_eq!(parsed, vec![ev]);
    }

    #[test]
    fn round_trips_labels_with_inner_separators_and_spacing() {
        // lone `;`, inner `": "`, and edge whitespace all survive verbatim
        let ev = event(&[("toy;red", 1), ("scale: large", 2), (" car", 3), ("car ", 4)]);
        let raw = format!("{}{}", header_line(), encode_row(&ev));
        let parsed = parse_table(&raw).expect("parse");
        assert_eq!(parsed, vec![ev]);
    }

    #[test]
    fn rejects_empty_label_entry() {
        let raw = format!("{}2026-03-14 09:26:53,2,: 2\n", header_line());
        assert!(parse_table(&raw).is_err());
    }

    #[test]
    fn rejects_unexpected_header() {
        let raw = "When,HowMany,What\n";
        assert!(parse_table(raw).is_err());
    }

    #[test]
    fn rejects_bad_count_and_field_arity() {
        let base = header_line();
        assert!(parse_table(&format!("{}2026-03-14 09:26:53,abc,car: 1\n", base)).is_err());
        assert!(parse_table(&format!("{}2026-03-14 09:26:53,1\n", base)).is_err());
    }

    #[test]
    fn rejects_total_mismatching_details() {
        let raw = format!("{}2026-03-14 09:26:53,5,car: 2; robot: 1\n", header_line());
        assert!(parse_table(&raw).is_err());
    }

    #[test]
    fn rejects_unparseable_timestamp() {
        let raw = format!("{}yesterday,1,car: 1\n", header_line());
        assert!(parse_table(&raw).is_err());
    }
}
