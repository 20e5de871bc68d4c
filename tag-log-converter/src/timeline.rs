//! Event table building
//!
//! Walks the timeline region of the document and derives one output row
//! per `<instance>`, in document order. All per-row derivation lives
//! here: default-resolved field extraction, clock formatting, duration,
//! label selection, and the color lookup against the completed palette.

use crate::config::SessionInfo;
use crate::document::XmlElement;
use crate::palette::ColorMap;
use crate::table::OutputRow;
use crate::types::{EventInstance, LabelPair};

/// Number of label slots surfaced in the output table.
const LABEL_SLOTS: usize = 3;

/// Format a second offset as an `H:MM:SS` clock string.
///
/// The fractional part is truncated, not rounded, and hours are not
/// zero-padded: `90.7` formats as `0:01:30`. This is a lossy, one-way
/// rendering.
pub fn format_clock(seconds: f64) -> String {
    let total = seconds as i64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, secs)
}

/// Build the ordered output rows for every timeline entry in the
/// document. The palette must already be fully resolved: row emission
/// looks colors up but never extends the map.
pub fn build_rows(
    document: &XmlElement,
    colors: &ColorMap,
    session: &SessionInfo,
) -> Vec<OutputRow> {
    let instances = document.descendants("instance");
    log::debug!("Timeline contains {} event(s)", instances.len());

    instances
        .into_iter()
        .map(|element| {
            let event = parse_instance(element);
            assemble_row(&event, colors, session)
        })
        .collect()
}

/// Extract one event instance with default-resolved fields.
fn parse_instance(element: &XmlElement) -> EventInstance {
    let labels = element
        .children_named("label")
        .map(|label| LabelPair {
            group: label.child_text("group"),
            text: label.child_text("text"),
        })
        .collect();

    EventInstance {
        code: element.child_text("code"),
        start_seconds: element.child_parse_or("start", 0.0),
        end_seconds: element.child_parse_or("end", 0.0),
        labels,
    }
}

/// Derive the 15-field output row for one event.
fn assemble_row(event: &EventInstance, colors: &ColorMap, session: &SessionInfo) -> OutputRow {
    // First three labels only; missing slots stay empty
    let mut attributes = [String::new(), String::new(), String::new()];
    for (slot, label) in attributes.iter_mut().zip(event.labels.iter().take(LABEL_SLOTS)) {
        *slot = label.to_string();
    }
    let [attribute_1, attribute_2, attribute_3] = attributes;

    OutputRow {
        session_start_date: session.start_date.clone(),
        event: event.code.clone(),
        session_name: session.name.clone(),
        session_start: session.session_start.clone(),
        session_end: session.session_end.clone(),
        tag_description: event.code.clone(),
        tag_notes: String::new(),
        tag_start: format_clock(event.start_seconds),
        tag_end: format_clock(event.end_seconds),
        tag_duration_secs: event.duration_secs(),
        attribute_1,
        attribute_2,
        attribute_3,
        rgb_color: colors.resolve(&event.code).to_string(),
        optional: String::new(),
    }
}
