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

/// Drawing helper that clips every command before handing it to a [`Renderer`].
pub struct Canvas<'a, R: Renderer> {
    renderer: &'a mut R,
    dim: Dimensioni,
    clip: Recti,
    clip_stack: Vec<Recti>,
}

impl<'a, R: Renderer> Canvas<'a, R> {
    /// Wraps `renderer` for a `width` × `height` target.
    pub fn new(renderer: &'a mut R, width: i32, height: i32) -> Self {
        Self {
            renderer,
            dim: Dimensioni::new(width, height),
            clip: rect(0, 0, width, height),
            clip_stack: Vec::new(),
        }
    }

    /// Returns the target size.
    pub fn current_dimension(&self) -> Dimensioni { self.dim }

    /// Computes the clipped destination/source rectangles for rendering.
    ///
    /// `src_r` is mapped proportionally onto `dst_r`, so a partially visible destination keeps the
    /// matching part of the source.
    pub fn clip_rect(dst_r: Recti, src_r: Recti, clip_r: Recti) -> Option<(Recti, Recti)> {
        match intersect_rect(&dst_r, &clip_r) {
            Some(r) if r.width == dst_r.width && r.height == dst_r.height => Some((dst_r, src_r)),
            Some(r) => {
                let map = |v: i32, d0: i32, dl: i32, s0: i32, sl: i32| s0 + ((v - d0) as i64 * sl as i64 / dl as i64) as i32;
                let sx0 = map(r.x, dst_r.x, dst_r.width, src_r.x, src_r.width);
                let sy0 = map(r.y, dst_r.y, dst_r.height, src_r.y, src_r.height);
                let sx1 = map(r.x + r.width, dst_r.x, dst_r.width, src_r.x, src_r.width);
                let sy1 = map(r.y + r.height, dst_r.y, dst_r.height, src_r.y, src_r.height);
                Some((r, rect(sx0, sy0, sx1 - sx0, sy1 - sy0)))
            }
            None => None,
        }
    }

    /// Sets the clip rectangle used for subsequent draw calls.
    pub fn set_clip_rect(&mut self, r: Recti) { self.clip = r; }

    /// Returns the clip rectangle currently applied to draw commands.
    pub fn current_clip_rect(&self) -> Recti { self.clip }

    /// Narrows the clip rectangle to its intersection with `r` until the matching [`Canvas::pop_clip_rect`].
    pub fn push_clip_rect(&mut self, r: Recti) {
        self.clip_stack.push(self.clip);
        self.clip = intersect_rect(&self.clip, &r).unwrap_or_else(|| rect(r.x, r.y, 0, 0));
    }

    /// Restores the clip rectangle saved by the last [`Canvas::push_clip_rect`].
    pub fn pop_clip_rect(&mut self) {
        if let Some(r) = self.clip_stack.pop() {
            self.clip = r;
        }
    }

    /// Begins a new drawing pass and resets the clip rectangle.
    pub fn begin(&mut self, clr: Color) {
        self.renderer.begin(self.dim.width, self.dim.height, clr);
        self.clip_stack.clear();
        self.set_clip_rect(rect(0, 0, self.dim.width, self.dim.height));
    }

    /// Ends the drawing pass.
    pub fn end(&mut self) { self.renderer.end() }

    /// Draws a whole bitmap with its top-left corner at `pos`.
    pub fn draw_bitmap(&mut self, bitmap: &Bitmap, pos: Vec2i) { self.draw_bitmap_region(bitmap, bitmap.bounds(), pos) }

    /// Draws the `src` region of `bitmap` with its top-left corner at `pos`.
    pub fn draw_bitmap_region(&mut self, bitmap: &Bitmap, src: Recti, pos: Vec2i) {
        let dst = rect(pos.x, pos.y, src.width, src.height);
        if let Some((dst, src)) = Self::clip_rect(dst, src, self.clip) {
            self.renderer.draw_bitmap(bitmap, src, vec2(dst.x, dst.y));
        }
    }

    /// Fills `r` with `color`.
    pub fn fill_rect(&mut self, r: Recti, color: Color) {
        if let Some(r) = intersect_rect(&r, &self.clip) {
            self.renderer.fill_rect(r, color);
        }
    }

    /// Draws a line of text with its top-left corner at `pos`.
    pub fn draw_text(&mut self, font: &dyn Font, text: &str, pos: Vec2i, color: Color) {
        if text.is_empty() {
            return;
        }
        let bounds = rect(pos.x, pos.y, font.text_width(text), font.get_size() as i32);
        if intersect_rect(&bounds, &self.clip).is_some() {
            self.renderer.draw_text(font, text, pos, color, self.clip);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingRenderer {
        bitmaps: Vec<(Recti, Vec2i)>,
        fills: Vec<Recti>,
        texts: usize,
    }

    impl Renderer for RecordingRenderer {
        fn begin(&mut self, _width: i32, _height: i32, _clr: Color) {}
        fn draw_bitmap(&mut self, _bitmap: &Bitmap, src: Recti, pos: Vec2i) { self.bitmaps.push((src, pos)); }
        fn fill_rect(&mut self, r: Recti, _color: Color) { self.fills.push(r); }
        fn draw_text(&mut self, _font: &dyn Font, _text: &str, _pos: Vec2i, _color: Color, _clip: Recti) { self.texts += 1; }
        fn end(&mut self) {}
    }

    fn assert_rect_eq(actual: Recti, expected: Recti) {
        assert_eq!(
            (actual.x, actual.y, actual.width, actual.height),
            (expected.x, expected.y, expected.width, expected.height)
        );
    }

    #[test]
    fn clip_rect_passthrough() {
        let dst = rect(0, 0, 10, 10);
        let src = rect(5, 5, 10, 10);
        let res = Canvas::<RecordingRenderer>::clip_rect(dst, src, rect(0, 0, 20, 20)).unwrap();
        assert_rect_eq(res.0, dst);
        assert_rect_eq(res.1, src);
    }

    #[test]
    fn clip_rect_partial() {
        let dst = rect(0, 0, 100, 100);
        let src = rect(0, 0, 50, 50);
        let res = Canvas::<RecordingRenderer>::clip_rect(dst, src, rect(20, 20, 40, 40)).unwrap();
        assert_rect_eq(res.0, rect(20, 20, 40, 40));
        assert_rect_eq(res.1, rect(10, 10, 20, 20));
    }

    #[test]
    fn clip_rect_none() {
        let dst = rect(0, 0, 10, 10);
        assert!(Canvas::<RecordingRenderer>::clip_rect(dst, dst, rect(50, 50, 10, 10)).is_none());
    }

    #[test]
    fn clipped_bitmap_keeps_matching_source() {
        let mut r = RecordingRenderer::default();
        let bmp = Bitmap::new(16, 16);
        {
            let mut canvas = Canvas::new(&mut r, 100, 100);
            canvas.begin(Color::TRANSPARENT);
            canvas.push_clip_rect(rect(10, 10, 100, 100));
            canvas.draw_bitmap(&bmp, vec2(4, 6));
            canvas.pop_clip_rect();
            canvas.draw_bitmap(&bmp, vec2(200, 200));
            canvas.end();
        }
        assert_eq!(r.bitmaps.len(), 1);
        let (src, pos) = r.bitmaps[0];
        assert_rect_eq(src, rect(6, 4, 10, 12));
        assert_eq!((pos.x, pos.y), (10, 10));
    }

    #[test]
    fn offscreen_fills_and_text_are_dropped() {
        let mut r = RecordingRenderer::default();
        let font = MonoFont::default();
        {
            let mut canvas = Canvas::new(&mut r, 50, 50);
            canvas.fill_rect(rect(-20, -20, 10, 10), Color::WHITE);
            canvas.fill_rect(rect(40, 40, 20, 20), Color::WHITE);
            canvas.draw_text(&font, "hi", vec2(60, 0), Color::WHITE);
            canvas.draw_text(&font, "hi", vec2(0, 0), Color::WHITE);
        }
        assert_eq!(r.fills.len(), 1);
        assert_rect_eq(r.fills[0], rect(40, 40, 10, 10));
        assert_eq!(r.texts, 1);
    }
}
