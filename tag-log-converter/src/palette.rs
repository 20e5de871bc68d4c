//! Palette resolution
//!
//! The palette region of the input enumerates display colors by event
//! code, one `<row>` per code, with 16-bit `R`/`G`/`B` channels. This
//! module folds those entries into a [`ColorMap`], the code-to-color
//! lookup the table builder uses for every emitted row. Resolution is
//! total: a code with no palette entry gets the neutral fallback color
//! instead of failing the conversion.

use crate::document::XmlElement;
use crate::types::{ColorDefinition, DEFAULT_CHANNEL, FALLBACK_COLOR};
use std::collections::HashMap;

/// Lookup from event code to an 8-bit `rgb(r,g,b)` display string.
///
/// Built once by [`build_color_map`] and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    colors: HashMap<String, String>,
}

impl ColorMap {
    /// Resolve an event code to its display color.
    ///
    /// Never fails: an unmapped code resolves to the fallback
    /// `rgb(128,128,128)` so that a stray code cannot abort a conversion.
    pub fn resolve(&self, code: &str) -> &str {
        self.colors
            .get(code)
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Number of distinct codes with a palette entry.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when the palette region defined no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    fn insert(&mut self, definition: &ColorDefinition) {
        // Last definition for a code wins
        self.colors
            .insert(definition.code.clone(), definition.display_color());
    }
}

/// Build the color map from every `<row>` entry in the document.
///
/// Each channel is read independently with the mid-gray default 32767, so
/// a partially specified entry still produces a usable color. An entry
/// without a `<code>` element is keyed by the empty string - degenerate,
/// but a real case in exported palettes.
pub fn build_color_map(document: &XmlElement) -> ColorMap {
    let mut map = ColorMap::default();

    for row in document.descendants("row") {
        let definition = ColorDefinition {
            code: row.child_text("code"),
            red: row.child_parse_or("R", DEFAULT_CHANNEL),
            green: row.child_parse_or("G", DEFAULT_CHANNEL),
            blue: row.child_parse_or("B", DEFAULT_CHANNEL),
        };
        map.insert(&definition);
    }

    log::debug!("Palette resolved: {} color(s)", map.len());
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    fn map_for(xml: &str) -> ColorMap {
        let root = parse_document(xml).unwrap();
        build_color_map(&root)
    }

    #[test]
    fn test_full_entry_is_converted_to_8bit() {
        let map = map_for(
            r#"<file><ROWS>
                <row><code>Goal</code><R>65535</R><G>0</G><B>0</B></row>
            </ROWS></file>"#,
        );
        assert_eq!(map.resolve("Goal"), "rgb(255,0,0)");
    }

    #[test]
    fn test_missing_channels_default_to_mid_gray() {
        let map = map_for(r#"<file><row><code>Foul</code></row></file>"#);
        assert_eq!(map.resolve("Foul"), "rgb(127,127,127)");
    }

    #[test]
    fn test_partial_entry_defaults_each_channel_independently() {
        let map = map_for(r#"<file><row><code>Shot</code><G>65535</G></row></file>"#);
        assert_eq!(map.resolve("Shot"), "rgb(127,255,127)");
    }

    #[test]
    fn test_unmapped_code_falls_back() {
        let map = map_for("<file></file>");
        assert!(map.is_empty());
        assert_eq!(map.resolve("Anything"), "rgb(128,128,128)");
    }

    #[test]
    fn test_duplicate_code_last_wins() {
        let map = map_for(
            r#"<file>
                <row><code>Goal</code><R>65535</R><G>0</G><B>0</B></row>
                <row><code>Goal</code><R>0</R><G>65535</G><B>0</B></row>
            </file>"#,
        );
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("Goal"), "rgb(0,255,0)");
    }

    #[test]
    fn test_entry_without_code_occupies_empty_key() {
        let map = map_for(r#"<file><row><R>0</R><G>0</G><B>0</B></row></file>"#);
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve(""), "rgb(0,0,0)");
    }
}
