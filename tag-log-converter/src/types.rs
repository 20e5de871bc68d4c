//! Core types for the tag log converter library
//!
//! This module defines the data model the converter works with: palette
//! entries parsed from the color region, event instances parsed from the
//! timeline region, and the error type shared by all operations. The
//! converter is a pure function of one input document - these types only
//! live long enough to produce the output table.

use std::fmt;

/// Result type for converter operations
pub type Result<T> = std::result::Result<T, ConverterError>;

/// Default value for a missing 16-bit color channel (mid-gray)
pub const DEFAULT_CHANNEL: u16 = 32767;

/// Display color used for event codes with no palette entry
pub const FALLBACK_COLOR: &str = "rgb(128,128,128)";

/// One entry from the palette region of the input document
///
/// Color channels are 16-bit values as found in the source; the 8-bit
/// display conversion happens when the entry is folded into the color map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorDefinition {
    /// Event code this color applies to (may be empty)
    pub code: String,
    /// Red channel, 0-65535
    pub red: u16,
    /// Green channel, 0-65535
    pub green: u16,
    /// Blue channel, 0-65535
    pub blue: u16,
}

impl ColorDefinition {
    /// Render the definition as an 8-bit `rgb(r,g,b)` display string.
    ///
    /// Channels are down-converted by integer division by 256. 65535/256
    /// is already 255, but the clamp stays as an explicit invariant: no
    /// emitted channel can exceed 255.
    pub fn display_color(&self) -> String {
        let r = (self.red / 256).min(255);
        let g = (self.green / 256).min(255);
        let b = (self.blue / 256).min(255);
        format!("rgb({},{},{})", r, g, b)
    }
}

/// A (group, text) pair attached to a timeline entry
///
/// Typically identifies a participant or attribute of the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPair {
    /// Label group (empty when the sub-element is missing)
    pub group: String,
    /// Label text (empty when the sub-element is missing)
    pub text: String,
}

impl fmt::Display for LabelPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.group, self.text)
    }
}

/// One event occurrence from the timeline region of the input document
#[derive(Debug, Clone, PartialEq)]
pub struct EventInstance {
    /// Event code; lookup key into the color map and output text
    pub code: String,
    /// Start offset in seconds (fractional values are valid)
    pub start_seconds: f64,
    /// End offset in seconds
    pub end_seconds: f64,
    /// Labels in document order; only the first three are surfaced
    pub labels: Vec<LabelPair>,
}

impl EventInstance {
    /// Signed whole-second duration, truncated toward zero.
    ///
    /// `end < start` yields a negative value; that is passed through
    /// uninterpreted rather than treated as a data error.
    pub fn duration_secs(&self) -> i64 {
        (self.end_seconds - self.start_seconds) as i64
    }
}

/// Errors that can occur during conversion
#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    #[error("Failed to parse XML document: {0}")]
    XmlParseError(#[from] quick_xml::Error),

    #[error("Malformed XML document: {0}")]
    MalformedDocument(String),

    #[error("Document contains no root element")]
    EmptyDocument,

    #[error("Failed to encode CSV output: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_color_conversion() {
        let def = ColorDefinition {
            code: "Goal".to_string(),
            red: 65535,
            green: 0,
            blue: 256,
        };
        assert_eq!(def.display_color(), "rgb(255,0,1)");
    }

    #[test]
    fn test_display_color_defaults_are_mid_gray() {
        let def = ColorDefinition {
            code: String::new(),
            red: DEFAULT_CHANNEL,
            green: DEFAULT_CHANNEL,
            blue: DEFAULT_CHANNEL,
        };
        assert_eq!(def.display_color(), "rgb(127,127,127)");
    }

    #[test]
    fn test_duration_truncates_toward_zero() {
        let mut ev = EventInstance {
            code: "Foul".to_string(),
            start_seconds: 5.0,
            end_seconds: 10.9,
            labels: Vec::new(),
        };
        assert_eq!(ev.duration_secs(), 5);

        ev.end_seconds = 4.2;
        assert_eq!(ev.duration_secs(), 0);

        ev.end_seconds = 1.0;
        assert_eq!(ev.duration_secs(), -4);
    }

    #[test]
    fn test_label_rendering_with_empty_parts() {
        let label = LabelPair {
            group: "Team".to_string(),
            text: "A".to_string(),
        };
        assert_eq!(label.to_string(), "Team: A");

        let empty = LabelPair {
            group: String::new(),
            text: String::new(),
        };
        assert_eq!(empty.to_string(), ": ");
    }
}
