//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
#[cfg(feature = "truetype")]
use std::collections::HashMap;
#[cfg(feature = "truetype")]
use std::io::{Error, ErrorKind, Result};

use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Coverage bitmap of a single rasterized character.
pub struct Glyph {
    /// Width of the coverage bitmap.
    pub width: i32,
    /// Height of the coverage bitmap.
    pub height: i32,
    /// Horizontal offset from the pen position to the bitmap's left edge.
    pub left: i32,
    /// Vertical offset from the top of the line box to the bitmap's top edge.
    pub top: i32,
    /// Row-major coverage values, one byte per pixel.
    pub coverage: Vec<u8>,
}

#[derive(Clone, Debug)]
/// Fixed-advance font without glyph images.
///
/// Useful for headless layouts and tests: every character advances by the same width and
/// renderers fall back to drawing a solid block per visible character.
pub struct MonoFont {
    name: String,
    advance: usize,
    line_height: usize,
}

impl MonoFont {
    /// Creates a font where each character is `advance` pixels wide and lines are `line_height` tall.
    pub fn new(name: &str, advance: usize, line_height: usize) -> Self {
        Self { name: name.to_string(), advance, line_height }
    }
}

impl Default for MonoFont {
    fn default() -> Self { Self::new("mono", 7, 12) }
}

impl Font for MonoFont {
    fn name(&self) -> &str { self.name.as_str() }
    fn get_size(&self) -> usize { self.line_height }
    fn get_char_size(&self, _c: char) -> (usize, usize) { (self.advance, self.line_height) }
}

#[cfg(feature = "truetype")]
#[derive(Clone, Debug)]
struct CharEntry {
    advance: usize,
    glyph: Glyph,
}

#[cfg(feature = "truetype")]
/// TrueType/OpenType font rasterized once at a fixed pixel size.
///
/// Printable ASCII and Latin-1 characters are rasterized when the font is loaded. Other characters
/// report the advance of `?` and have no glyph.
pub struct TrueTypeFont {
    name: String,
    line_height: usize,
    fallback_advance: usize,
    entries: HashMap<char, CharEntry>,
}

#[cfg(feature = "truetype")]
impl TrueTypeFont {
    /// Parses font bytes and rasterizes the supported character range at `size` pixels.
    pub fn from_bytes(name: &str, data: &[u8], size: f32) -> Result<Self> {
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default()).map_err(|error| Error::new(ErrorKind::InvalidData, format!("{}", error)))?;
        if size <= 0.0 {
            return Err(Error::new(ErrorKind::InvalidInput, "Font size must be positive"));
        }

        let line_metrics = font.horizontal_line_metrics(size);
        let line_height = line_metrics.as_ref().map(|m| m.new_line_size.round() as usize).unwrap_or(size.ceil() as usize);
        let baseline = line_metrics.as_ref().map(|m| m.ascent.round() as i32).unwrap_or(line_height as i32);

        let mut entries = HashMap::new();
        for ch in (32u32..127).chain(0xA0..0x100).filter_map(char::from_u32) {
            let (metrics, coverage) = font.rasterize(ch, size);
            let glyph = Glyph {
                width: metrics.width as i32,
                height: metrics.height as i32,
                left: metrics.xmin,
                top: baseline - metrics.ymin - metrics.height as i32,
                coverage,
            };
            entries.insert(ch, CharEntry { advance: metrics.advance_width.round() as usize, glyph });
        }
        let fallback_advance = entries.get(&'?').map(|e| e.advance).unwrap_or(size as usize / 2);
        tracing::debug!(font = name, size, glyphs = entries.len(), "font rasterized");

        Ok(Self { name: name.to_string(), line_height, fallback_advance, entries })
    }

    /// Reads a font file from disk, see [`TrueTypeFont::from_bytes`].
    pub fn from_file(path: &str, size: f32) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| Error::new(e.kind(), format!("Cannot read font file '{}': {}", path, e)))?;
        let name = std::path::Path::new(path).file_stem().and_then(|n| n.to_str()).unwrap_or(path).to_string();
        Self::from_bytes(name.as_str(), &data, size)
    }
}

#[cfg(feature = "truetype")]
impl Font for TrueTypeFont {
    fn name(&self) -> &str { self.name.as_str() }
    fn get_size(&self) -> usize { self.line_height }
    fn get_char_size(&self, c: char) -> (usize, usize) {
        let advance = self.entries.get(&c).map(|e| e.advance).unwrap_or(self.fallback_advance);
        (advance, self.line_height)
    }
    fn rasterize(&self, c: char) -> Option<Glyph> { self.entries.get(&c).map(|e| e.glyph.clone()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_widths_are_linear() {
        let font = MonoFont::new("t", 6, 10);
        assert_eq!(font.text_width(""), 0);
        assert_eq!(font.text_width("abcd"), 24);
        let size = font.text_size("ab");
        assert_eq!((size.width, size.height), (12, 10));
        assert!(font.rasterize('a').is_none());
    }

    #[cfg(feature = "truetype")]
    #[test]
    fn garbage_font_bytes_are_rejected() {
        assert!(TrueTypeFont::from_bytes("bad", &[0, 1, 2, 3], 12.0).is_err());
    }
}
