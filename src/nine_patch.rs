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
//! Nine-slice composition of resizable control backgrounds.
//!
//! Both helpers are pure functions of their inputs, so re-applying a theme at the same size
//! reproduces the previous bitmap pixel for pixel.

use super::*;

fn stretch(src: &Bitmap, region: Recti, width: i32, height: i32) -> Bitmap {
    if width <= 0 || height <= 0 {
        return Bitmap::new(0, 0);
    }
    src.sub_image(region).scaled(width, height)
}

/// Composes `src` into a `width` × `height` bitmap using a 3×3 split.
///
/// Each corner tile is `src.width() / 3` by `src.height() / 3` pixels and is copied unscaled.
/// Whatever remains between two corner tiles forms the middle slices, which are stretched to fill
/// the target. Corners overlap when the target is smaller than two corner tiles.
pub fn compose(src: &Bitmap, width: i32, height: i32) -> Bitmap {
    let width = width.max(0);
    let height = height.max(0);
    let mut out = Bitmap::new(width, height);
    if src.is_empty() || width == 0 || height == 0 {
        return out;
    }

    let tw = src.width() / 3;
    let th = src.height() / 3;
    let rest_w = src.width() - tw * 2;
    let rest_h = src.height() - th * 2;
    let mid_w = (width - tw * 2).max(0);
    let mid_h = (height - th * 2).max(0);

    // (source region, destination position, destination size)
    let pieces = [
        (rect(0, 0, tw, th), vec2(0, 0), (tw, th)),
        (rect(tw, 0, rest_w, th), vec2(tw, 0), (mid_w, th)),
        (rect(tw + rest_w, 0, tw, th), vec2(width - tw, 0), (tw, th)),
        (rect(0, th, tw, rest_h), vec2(0, th), (tw, mid_h)),
        (rect(tw, th, rest_w, rest_h), vec2(tw, th), (mid_w, mid_h)),
        (rect(tw + rest_w, th, tw, rest_h), vec2(width - tw, th), (tw, mid_h)),
        (rect(0, th + rest_h, tw, th), vec2(0, height - th), (tw, th)),
        (rect(tw, th + rest_h, rest_w, th), vec2(tw, height - th), (mid_w, th)),
        (rect(tw + rest_w, th + rest_h, tw, th), vec2(width - tw, height - th), (tw, th)),
    ];

    for (region, pos, (w, h)) in pieces {
        let piece = stretch(src, region, w, h);
        if !piece.is_empty() {
            out.copy_from(&piece, pos);
        }
    }
    out
}

/// Composes window chrome from whole atlas cells.
///
/// The top row uses the title-bar cells (the movable variant when `movable` is set), the bottom
/// row the bottom frame cells and everything in between the middle row, stretched to fill.
pub fn window_frame(atlas: &AtlasHandle, movable: bool, width: i32, height: i32) -> Bitmap {
    let width = width.max(0);
    let height = height.max(0);
    let mut out = Bitmap::new(width, height);
    if width == 0 || height == 0 {
        return out;
    }

    let top = if movable { WINDOW_TOP_MOVABLE } else { WINDOW_TOP };
    let rows = [
        (top, 0, CELL_SIZE),
        (WINDOW_MIDDLE, CELL_SIZE, (height - CELL_SIZE * 2).max(0)),
        (WINDOW_BOTTOM, height - CELL_SIZE, CELL_SIZE),
    ];
    let mid_w = (width - CELL_SIZE * 2).max(0);

    for ([left, middle, right], y, h) in rows {
        if h <= 0 {
            continue;
        }
        let columns = [(left, 0, CELL_SIZE), (middle, CELL_SIZE, mid_w), (right, width - CELL_SIZE, CELL_SIZE)];
        for (cell, x, w) in columns {
            let piece = stretch(atlas.image(), cell.rect(), w, h);
            if !piece.is_empty() {
                out.copy_from(&piece, vec2(x, y));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(w: i32, h: i32) -> Bitmap {
        let pixels = (0..w * h).map(|i| color(i as u8, 0, 0, 255)).collect();
        Bitmap::from_pixels(w, h, pixels).unwrap()
    }

    #[test]
    fn corners_are_copied_unscaled() {
        let src = numbered(16, 16);
        let out = compose(&src, 40, 30);
        assert_eq!((out.width(), out.height()), (40, 30));
        // 16 / 3 = 5 pixel corners
        for (sx, sy, dx, dy) in [(0, 0, 0, 0), (4, 4, 4, 4), (11, 0, 35, 0), (15, 15, 39, 29), (0, 11, 0, 25)] {
            assert_eq!(out.get(dx, dy), src.get(sx, sy));
        }
    }

    #[test]
    fn edges_stretch_along_one_axis() {
        let src = numbered(16, 16);
        let out = compose(&src, 40, 30);
        // top edge keeps the source row, left edge keeps the source column
        assert_eq!(out.get(20, 0).map(|c| c.r / 16), Some(0));
        assert_eq!(out.get(0, 15).map(|c| c.r % 16), Some(0));
    }

    #[test]
    fn compose_is_deterministic() {
        let atlas = AtlasHandle::default_theme();
        let cell = atlas.cell(BUTTON_NORMAL);
        assert_eq!(compose(&cell, 77, 23), compose(&cell, 77, 23));
        assert_eq!(window_frame(&atlas, true, 200, 100), window_frame(&atlas, true, 200, 100));
    }

    #[test]
    fn degenerate_sizes_yield_empty_bitmaps() {
        let src = numbered(16, 16);
        assert!(compose(&src, 0, 10).is_empty());
        assert!(compose(&src, -4, 10).is_empty());
        let tiny = compose(&src, 3, 3);
        assert_eq!((tiny.width(), tiny.height()), (3, 3));
    }

    #[test]
    fn movable_windows_use_the_title_cells() {
        let atlas = AtlasHandle::default_theme();
        let fixed = window_frame(&atlas, false, 64, 64);
        let movable = window_frame(&atlas, true, 64, 64);
        assert_eq!(fixed.get(8, 8), atlas.image().get(8, 8));
        assert_eq!(movable.get(8, 8), atlas.image().get(56, 8));
        assert_eq!(fixed.get(8, 40), movable.get(8, 40));
    }
}
