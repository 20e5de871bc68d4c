//! Main converter API
//!
//! The [`Converter`] is the entry point of the library: it carries the
//! session metadata and turns one XML tag log into one [`TagTable`]. Each
//! conversion is a pure function of the input document - the palette is
//! resolved first, then the event rows are built against it, and nothing
//! is shared between invocations.

use crate::config::SessionInfo;
use crate::document;
use crate::palette;
use crate::table::TagTable;
use crate::timeline;
use crate::types::Result;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Converts tag log documents into the fixed-column output table.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    session: SessionInfo,
}

impl Converter {
    /// Create a converter stamping the given session metadata into every
    /// output row.
    pub fn new(session: SessionInfo) -> Self {
        Self { session }
    }

    /// The session metadata this converter stamps into rows.
    pub fn session(&self) -> &SessionInfo {
        &self.session
    }

    /// Convert a document held in memory.
    ///
    /// # Returns
    /// * `Result<TagTable>` - The assembled table, or an error if the
    ///   document is not well-formed. A failed conversion produces no
    ///   partial table.
    pub fn convert_str(&self, xml: &str) -> Result<TagTable> {
        let root = document::parse_document(xml)?;

        // The palette must be complete before any row is emitted
        let colors = palette::build_color_map(&root);
        let rows = timeline::build_rows(&root, &colors, &self.session);

        log::info!(
            "Converted document: {} event(s), {} palette color(s)",
            rows.len(),
            colors.len()
        );
        Ok(TagTable::new(rows))
    }

    /// Convert a document read from an arbitrary reader.
    ///
    /// The whole document is read into memory first; streaming conversion
    /// of oversized inputs is out of scope.
    pub fn convert_reader<R: Read>(&self, mut reader: R) -> Result<TagTable> {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        self.convert_str(&xml)
    }

    /// Convert a document stored on disk.
    pub fn convert_file(&self, path: &Path) -> Result<TagTable> {
        log::info!("Converting tag log file: {:?}", path);
        let xml = fs::read_to_string(path)?;
        self.convert_str(&xml)
    }
}
