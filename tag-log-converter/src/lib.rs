//! Tag Log Converter Library
//!
//! A stateless library for converting hierarchical tag log files (XML
//! trees of timestamped, coded events plus a palette of named colors, as
//! exported by video-analysis tools) into a flat, spreadsheet-ready CSV
//! table with one row per event.
//!
//! # Architecture
//!
//! The conversion runs two components in sequence over one in-memory
//! document:
//! - The palette resolver builds a code-to-color lookup from the palette
//!   region, down-converting 16-bit channels to 8-bit display values.
//! - The event table builder walks the timeline region and derives one
//!   fixed-column row per event: formatted time offsets, whole-second
//!   duration, up to three participant labels, and the resolved color
//!   (with a neutral fallback for unmapped codes).
//!
//! The library does NOT:
//! - Transport files (chat bots, HTTP, temp-file lifecycles)
//! - Validate referential integrity against an external schema
//! - Stream documents too large to hold in memory
//!
//! All of that belongs to the application layer (tag-log-cli).
//!
//! # Example Usage
//!
//! ```
//! use tag_log_converter::{Converter, SessionInfo};
//!
//! let session = SessionInfo::new("2025/11/12", "Training session");
//! let converter = Converter::new(session);
//!
//! let xml = r#"
//!     <file>
//!         <row><code>Goal</code><R>65535</R><G>0</G><B>0</B></row>
//!         <instance><code>Goal</code><start>5</start><end>10</end></instance>
//!     </file>
//! "#;
//!
//! let table = converter.convert_str(xml).unwrap();
//! assert_eq!(table.len(), 1);
//! println!("{}", table.to_csv_string().unwrap());
//! ```

// Public modules
pub mod config;
pub mod converter;
pub mod document;
pub mod palette;
pub mod table;
pub mod timeline;
pub mod types;

// Re-export main types for convenience
pub use config::SessionInfo;
pub use converter::Converter;
pub use palette::ColorMap;
pub use table::{OutputRow, TagTable, OUTPUT_HEADER};
pub use types::{ConverterError, EventInstance, LabelPair, Result, FALLBACK_COLOR};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
