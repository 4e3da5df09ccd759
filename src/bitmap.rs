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

#[derive(Clone, Debug, PartialEq, Eq)]
/// Owned RGBA pixel buffer used for theme cells and pre-composed control visuals.
pub struct Bitmap {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl Bitmap {
    /// Creates a fully transparent bitmap. Negative sizes are treated as zero.
    pub fn new(width: i32, height: i32) -> Self { Self::filled(width, height, Color::TRANSPARENT) }

    /// Creates a bitmap filled with `color`.
    pub fn filled(width: i32, height: i32, color: Color) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self { width, height, pixels: vec![color; (width * height) as usize] }
    }

    /// Wraps existing pixels. Returns `None` when the buffer length does not match the size.
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<Color>) -> Option<Self> {
        if width < 0 || height < 0 || pixels.len() != (width * height) as usize {
            return None;
        }
        Some(Self { width, height, pixels })
    }

    /// Width in pixels.
    pub fn width(&self) -> i32 { self.width }

    /// Height in pixels.
    pub fn height(&self) -> i32 { self.height }

    /// Returns the full bounds of the bitmap.
    pub fn bounds(&self) -> Recti { rect(0, 0, self.width, self.height) }

    /// Returns the raw pixels in row-major order.
    pub fn pixels(&self) -> &[Color] { &self.pixels }

    /// Returns `true` when the bitmap holds no pixels.
    pub fn is_empty(&self) -> bool { self.pixels.is_empty() }

    /// Returns the pixel at `(x, y)`, or `None` outside the bitmap.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(x + y * self.width) as usize])
    }

    /// Writes the pixel at `(x, y)`; writes outside the bitmap are ignored.
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.pixels[(x + y * self.width) as usize] = color;
    }

    /// Fills the whole bitmap with `color`.
    pub fn fill(&mut self, color: Color) { self.pixels.iter_mut().for_each(|p| *p = color); }

    /// Fills `r` (clipped to the bitmap) with `color`, replacing the existing pixels.
    pub fn fill_rect(&mut self, r: Recti, color: Color) {
        if let Some(r) = intersect_rect(&r, &self.bounds()) {
            for y in r.y..r.y + r.height {
                for x in r.x..r.x + r.width {
                    self.pixels[(x + y * self.width) as usize] = color;
                }
            }
        }
    }

    /// Copies the `r` region into a new bitmap. The region is clipped to the bitmap.
    pub fn sub_image(&self, r: Recti) -> Bitmap {
        let r = intersect_rect(&r, &self.bounds()).unwrap_or_default();
        let mut out = Bitmap::new(r.width, r.height);
        for y in 0..r.height {
            let src = ((r.y + y) * self.width + r.x) as usize;
            let dst = (y * r.width) as usize;
            out.pixels[dst..dst + r.width as usize].copy_from_slice(&self.pixels[src..src + r.width as usize]);
        }
        out
    }

    /// Returns a copy resized to `width` × `height` with nearest-neighbour sampling.
    pub fn scaled(&self, width: i32, height: i32) -> Bitmap {
        let mut out = Bitmap::new(width, height);
        if self.is_empty() || out.is_empty() {
            return out;
        }
        for y in 0..out.height {
            let sy = (y as i64 * self.height as i64 / out.height as i64) as i32;
            for x in 0..out.width {
                let sx = (x as i64 * self.width as i64 / out.width as i64) as i32;
                out.pixels[(x + y * out.width) as usize] = self.pixels[(sx + sy * self.width) as usize];
            }
        }
        out
    }

    /// Copies `src` into this bitmap at `pos` without blending.
    pub fn copy_from(&mut self, src: &Bitmap, pos: Vec2i) {
        let dst_r = rect(pos.x, pos.y, src.width, src.height);
        if let Some(r) = intersect_rect(&dst_r, &self.bounds()) {
            for y in r.y..r.y + r.height {
                for x in r.x..r.x + r.width {
                    self.pixels[(x + y * self.width) as usize] = src.pixels[((x - pos.x) + (y - pos.y) * src.width) as usize];
                }
            }
        }
    }

    /// Alpha-blends the `src_r` region of `src` onto this bitmap at `pos`.
    pub fn blit(&mut self, src: &Bitmap, src_r: Recti, pos: Vec2i) {
        let src_r = match intersect_rect(&src_r, &src.bounds()) {
            Some(r) => r,
            None => return,
        };
        let dst_r = rect(pos.x, pos.y, src_r.width, src_r.height);
        if let Some(r) = intersect_rect(&dst_r, &self.bounds()) {
            for y in r.y..r.y + r.height {
                for x in r.x..r.x + r.width {
                    let s = src.pixels[((src_r.x + x - pos.x) + (src_r.y + y - pos.y) * src.width) as usize];
                    let d = &mut self.pixels[(x + y * self.width) as usize];
                    *d = blend(*d, s);
                }
            }
        }
    }
}

/// Blends `src` over `dst` using straight alpha.
pub fn blend(dst: Color, src: Color) -> Color {
    match src.a {
        0 => dst,
        255 => src,
        a => {
            let a = a as u32;
            let inv = 255 - a;
            let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
            let out_a = (a + (dst.a as u32 * inv + 127) / 255).min(255) as u8;
            color(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b), out_a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Bitmap {
        let mut b = Bitmap::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                let v = ((x + y) % 2 * 255) as u8;
                b.set(x, y, color(v, v, v, 255));
            }
        }
        b
    }

    #[test]
    fn sub_image_clips_to_bounds() {
        let b = checker();
        let s = b.sub_image(rect(2, 2, 10, 10));
        assert_eq!((s.width(), s.height()), (2, 2));
        assert_eq!(s.get(0, 0), b.get(2, 2));
        assert_eq!(s.get(1, 0), b.get(3, 2));
    }

    #[test]
    fn scaled_repeats_source_pixels() {
        let mut b = Bitmap::new(2, 1);
        b.set(0, 0, Color::WHITE);
        b.set(1, 0, color(1, 2, 3, 255));
        let s = b.scaled(4, 2);
        assert_eq!(s.get(0, 0), Some(Color::WHITE));
        assert_eq!(s.get(1, 1), Some(Color::WHITE));
        assert_eq!(s.get(2, 0), Some(color(1, 2, 3, 255)));
        assert_eq!(s.get(3, 1), Some(color(1, 2, 3, 255)));
    }

    #[test]
    fn blit_skips_transparent_and_clips() {
        let mut dst = Bitmap::filled(3, 3, color(9, 9, 9, 255));
        let mut src = Bitmap::new(2, 2);
        src.set(1, 1, Color::WHITE);
        dst.blit(&src, src.bounds(), vec2(1, 1));
        assert_eq!(dst.get(1, 1), Some(color(9, 9, 9, 255)));
        assert_eq!(dst.get(2, 2), Some(Color::WHITE));

        dst.blit(&src, src.bounds(), vec2(-1, -1));
        assert_eq!(dst.get(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn half_alpha_blends() {
        let c = blend(color(0, 0, 0, 255), color(255, 255, 255, 128));
        assert_eq!(c.a, 255);
        assert!(c.r > 120 && c.r < 136);
    }
}
