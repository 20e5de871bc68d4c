//! Output table and CSV encoding
//!
//! The converter emits a fixed 15-column table, one row per timeline
//! entry, in input order. This module owns the row shape, the header, and
//! the delimited encoding (comma-separated, quoted as needed, UTF-8, one
//! `\n`-terminated line per row). The encoding is mechanical: all field
//! derivation happens in the table builder before rows reach this module.

use crate::types::Result;
use std::io::Write;

/// Column header of the output table, in emitted order.
pub const OUTPUT_HEADER: [&str; 15] = [
    "Session Start Date",
    "Event",
    "Session Name",
    "Session Start",
    "Session End",
    "Tag Description",
    "Tag Notes",
    "Tag Start",
    "Tag End",
    "Tag Duration (secs)",
    "Attribute №1",
    "Attribute №2",
    "Attribute №3",
    "RGB Color",
    "Optional Column",
];

/// One fully derived output row.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    /// Session metadata: start date
    pub session_start_date: String,
    /// Event code
    pub event: String,
    /// Session metadata: name
    pub session_name: String,
    /// Session metadata: window start
    pub session_start: String,
    /// Session metadata: window end
    pub session_end: String,
    /// Event code, duplicated as the tag description
    pub tag_description: String,
    /// Always empty in the current table layout
    pub tag_notes: String,
    /// Formatted event start, `H:MM:SS`
    pub tag_start: String,
    /// Formatted event end, `H:MM:SS`
    pub tag_end: String,
    /// Whole-second duration; negative values pass through
    pub tag_duration_secs: i64,
    /// First label, `"group: text"` or empty
    pub attribute_1: String,
    /// Second label or empty
    pub attribute_2: String,
    /// Third label or empty
    pub attribute_3: String,
    /// Resolved or fallback display color
    pub rgb_color: String,
    /// Always empty in the current table layout
    pub optional: String,
}

impl OutputRow {
    /// The row as an ordered CSV record matching [`OUTPUT_HEADER`].
    pub fn record(&self) -> [String; 15] {
        [
            self.session_start_date.clone(),
            self.event.clone(),
            self.session_name.clone(),
            self.session_start.clone(),
            self.session_end.clone(),
            self.tag_description.clone(),
            self.tag_notes.clone(),
            self.tag_start.clone(),
            self.tag_end.clone(),
            self.tag_duration_secs.to_string(),
            self.attribute_1.clone(),
            self.attribute_2.clone(),
            self.attribute_3.clone(),
            self.rgb_color.clone(),
            self.optional.clone(),
        ]
    }
}

/// The assembled output table: header plus rows in timeline order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagTable {
    rows: Vec<OutputRow>,
}

impl TagTable {
    pub fn new(rows: Vec<OutputRow>) -> Self {
        Self { rows }
    }

    /// Rows in emission order.
    pub fn rows(&self) -> &[OutputRow] {
        &self.rows
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Encode the table as CSV into a writer.
    ///
    /// The header row is always written, even for an empty table.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(OUTPUT_HEADER)?;
        for row in &self.rows {
            csv_writer.write_record(row.record())?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Encode the table as an in-memory CSV string.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        // The writer only ever receives UTF-8 field strings
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> OutputRow {
        OutputRow {
            session_start_date: "2025/11/12".to_string(),
            event: "Goal".to_string(),
            session_name: "Training session".to_string(),
            session_start: "00:00:00".to_string(),
            session_end: "01:30:00".to_string(),
            tag_description: "Goal".to_string(),
            tag_notes: String::new(),
            tag_start: "0:00:05".to_string(),
            tag_end: "0:00:10".to_string(),
            tag_duration_secs: 5,
            attribute_1: "Team: A".to_string(),
            attribute_2: String::new(),
            attribute_3: String::new(),
            rgb_color: "rgb(255,0,0)".to_string(),
            optional: String::new(),
        }
    }

    #[test]
    fn test_empty_table_is_header_only() {
        let csv = TagTable::default().to_csv_string().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Session Start Date,Event,Session Name"));
        assert!(lines[0].ends_with("RGB Color,Optional Column"));
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_record_matches_header_width() {
        assert_eq!(sample_row().record().len(), OUTPUT_HEADER.len());
    }

    #[test]
    fn test_row_encoding() {
        let table = TagTable::new(vec![sample_row()]);
        let csv = table.to_csv_string().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "2025/11/12,Goal,Training session,00:00:00,01:30:00,Goal,,\
             0:00:05,0:00:10,5,Team: A,,,\"rgb(255,0,0)\","
        );
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let mut row = sample_row();
        row.event = "Pass, long".to_string();
        let csv = TagTable::new(vec![row]).to_csv_string().unwrap();
        assert!(csv.contains("\"Pass, long\""));
    }
}
