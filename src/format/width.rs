// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Visible-width measurement for glyph-bearing strings.
//!
//! Counting code points is wrong for the symbolic glyphs used in device
//! listings: a battery pictogram is one code point but fills two terminal
//! cells, while a keycap digit is three code points (digit, variation
//! selector, enclosing keycap) but also fills two cells. [`WidthTable`]
//! holds per-glyph corrections on top of the code-point count so table
//! columns line up regardless of which cells carry glyphs.

/// Battery pictogram used in listing battery columns.
pub const BATTERY_GLYPH: &str = "\u{1F50B}";

/// Ruler pictogram used in front of blind positions.
pub const RULER_GLYPH: &str = "\u{1F4CF}";

/// Keycap zero, shown for an outlet that is off.
pub const KEYCAP_ZERO: &str = "0\u{FE0F}\u{20E3}";

/// Keycap one, shown for an outlet that is on.
pub const KEYCAP_ONE: &str = "1\u{FE0F}\u{20E3}";

/// Table of per-glyph visible-width corrections.
///
/// The measured width of a string is its code-point count plus the delta of
/// every known glyph occurrence. New glyphs can be registered without
/// touching any caller.
///
/// # Examples
///
/// ```
/// use tradgw_lib::format::WidthTable;
///
/// let table = WidthTable::default();
/// assert_eq!(table.visible_width(""), 0);
/// assert_eq!(table.visible_width("plain"), 5);
/// // One code point, two terminal cells.
/// assert_eq!(table.visible_width("\u{1F50B}"), 2);
/// // Three code points, two terminal cells.
/// assert_eq!(table.visible_width("1\u{FE0F}\u{20E3}"), 2);
///
/// // Custom glyphs extend the table.
/// let table = WidthTable::default().with_glyph("\u{1F441}", 1);
/// assert_eq!(table.visible_width("\u{1F441}"), 2);
/// ```
#[derive(Debug, Clone)]
pub struct WidthTable {
    corrections: Vec<(String, i32)>,
}

impl WidthTable {
    /// Creates a table with no corrections; width equals code-point count.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            corrections: Vec::new(),
        }
    }

    /// Registers a correction for a glyph.
    ///
    /// `delta` is added once per occurrence: positive for glyphs wider than
    /// their code-point count, negative for sequences that render narrower.
    #[must_use]
    pub fn with_glyph(mut self, glyph: impl Into<String>, delta: i32) -> Self {
        self.corrections.push((glyph.into(), delta));
        self
    }

    /// Computes the visible terminal width of a string.
    #[must_use]
    pub fn visible_width(&self, s: &str) -> usize {
        let mut width = i64::try_from(s.chars().count()).unwrap_or(i64::MAX);
        for (glyph, delta) in &self.corrections {
            let occurrences = s.matches(glyph.as_str()).count();
            width += i64::try_from(occurrences).unwrap_or(0) * i64::from(*delta);
        }
        usize::try_from(width).unwrap_or(0)
    }
}

impl Default for WidthTable {
    /// The glyphs emitted by device listings.
    fn default() -> Self {
        Self::empty()
            .with_glyph(BATTERY_GLYPH, 1)
            .with_glyph(RULER_GLYPH, 1)
            .with_glyph(KEYCAP_ZERO, -1)
            .with_glyph(KEYCAP_ONE, -1)
    }
}

/// Computes the visible width of a string using the default glyph table.
///
/// # Examples
///
/// ```
/// use tradgw_lib::format::visible_width;
///
/// assert_eq!(visible_width("Outlet"), 6);
/// assert_eq!(visible_width("\u{1F50B}100%"), 6);
/// ```
#[must_use]
pub fn visible_width(s: &str) -> usize {
    WidthTable::default().visible_width(s)
}
