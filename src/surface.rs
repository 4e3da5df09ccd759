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
use super::*;

/// Software [`Renderer`] drawing into an owned [`Bitmap`].
///
/// Used by headless tests and by backends that upload a finished frame as one texture.
pub struct Surface {
    target: Bitmap,
}

impl Surface {
    /// Creates a transparent surface of the requested size.
    pub fn new(width: i32, height: i32) -> Self { Self { target: Bitmap::new(width, height) } }

    /// Returns the rendered pixels.
    pub fn bitmap(&self) -> &Bitmap { &self.target }

    /// Consumes the surface, returning its pixels.
    pub fn into_bitmap(self) -> Bitmap { self.target }

    /// Returns the pixels as tightly packed RGBA bytes.
    pub fn rgba_bytes(&self) -> Vec<u8> { self.target.pixels().iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect() }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, clip: &Recti) {
        if !rect_contains(clip, vec2(x, y)) {
            return;
        }
        if let Some(dst) = self.target.get(x, y) {
            self.target.set(x, y, blend(dst, color));
        }
    }
}

impl Renderer for Surface {
    fn begin(&mut self, width: i32, height: i32, clr: Color) {
        if self.target.width() != width || self.target.height() != height {
            self.target = Bitmap::filled(width, height, clr);
        } else {
            self.target.fill(clr);
        }
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, src: Recti, pos: Vec2i) { self.target.blit(bitmap, src, pos); }

    fn fill_rect(&mut self, r: Recti, color: Color) {
        if let Some(r) = intersect_rect(&r, &self.target.bounds()) {
            for y in r.y..r.y + r.height {
                for x in r.x..r.x + r.width {
                    self.blend_pixel(x, y, color, &r);
                }
            }
        }
    }

    fn draw_text(&mut self, font: &dyn Font, text: &str, pos: Vec2i, color: Color, clip: Recti) {
        let line = font.get_size() as i32;
        let mut pen = pos.x;
        for c in text.chars() {
            let (advance, _) = font.get_char_size(c);
            match font.rasterize(c) {
                Some(glyph) => {
                    for gy in 0..glyph.height {
                        for gx in 0..glyph.width {
                            let cov = glyph.coverage[(gx + gy * glyph.width) as usize] as u32;
                            if cov == 0 {
                                continue;
                            }
                            let a = (color.a as u32 * cov / 255) as u8;
                            self.blend_pixel(pen + glyph.left + gx, pos.y + glyph.top + gy, Color { a, ..color }, &clip);
                        }
                    }
                }
                // glyphless fonts render a placeholder block per visible character
                None if !c.is_whitespace() => {
                    let block = rect(pen + 1, pos.y + 2, advance as i32 - 2, line - 4);
                    for y in block.y..block.y + block.height {
                        for x in block.x..block.x + block.width {
                            self.blend_pixel(x, y, color, &clip);
                        }
                    }
                }
                None => (),
            }
            pen += advance as i32;
        }
    }

    fn end(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_resizes_and_clears() {
        let mut s = Surface::new(2, 2);
        s.begin(4, 3, color(1, 2, 3, 255));
        assert_eq!((s.bitmap().width(), s.bitmap().height()), (4, 3));
        assert!(s.bitmap().pixels().iter().all(|c| *c == color(1, 2, 3, 255)));
        assert_eq!(s.rgba_bytes().len(), 4 * 3 * 4);
    }

    #[test]
    fn placeholder_text_respects_clip() {
        let font = MonoFont::new("t", 6, 10);
        let mut s = Surface::new(40, 20);
        s.begin(40, 20, Color::TRANSPARENT);
        s.draw_text(&font, "a b", vec2(0, 0), Color::WHITE, rect(0, 0, 10, 20));
        let bmp = s.bitmap();
        assert_eq!(bmp.get(1, 2), Some(Color::WHITE));
        assert_eq!(bmp.get(0, 2), Some(Color::TRANSPARENT));
        // second glyph is a space, third is clipped away
        assert_eq!(bmp.get(7, 4), Some(Color::TRANSPARENT));
        assert_eq!(bmp.get(13, 4), Some(Color::TRANSPARENT));
    }

    #[test]
    fn fill_rect_blends_and_clips() {
        let mut s = Surface::new(4, 4);
        s.begin(4, 4, Color::TRANSPARENT);
        s.fill_rect(rect(2, 2, 10, 10), Color::WHITE);
        assert_eq!(s.bitmap().get(3, 3), Some(Color::WHITE));
        assert_eq!(s.bitmap().get(1, 1), Some(Color::TRANSPARENT));
    }
}
