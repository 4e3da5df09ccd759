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
use crate::*;

/// Alias kept for code that thinks of top-level windows as forms.
pub type Form = Window;

#[derive(Clone, Debug)]
/// Top-level frame with a caption, an optional drag strip and an optional close button.
pub struct Window {
    caption: String,
    movable: bool,
    closable: bool,
    moving: bool,
    pub(crate) close_button: Option<ControlId>,
    frame: Bitmap,
}

impl Window {
    pub(crate) fn new(theme: &Theme, width: i32, height: i32, caption: &str) -> Self {
        let mut window = Self {
            caption: caption.to_string(),
            movable: true,
            closable: true,
            moving: false,
            close_button: None,
            frame: Bitmap::new(0, 0),
        };
        window.compose(theme, width, height);
        window
    }

    /// Returns the caption drawn in the title strip.
    pub fn caption(&self) -> &str { self.caption.as_str() }

    /// Returns `true` when the title strip drags the window.
    pub fn is_movable(&self) -> bool { self.movable }

    /// Returns `true` when the window hosts a close button.
    pub fn is_closable(&self) -> bool { self.closable }

    /// Returns `true` while a drag started in the title strip is in progress.
    pub fn is_moving(&self) -> bool { self.moving }

    /// Returns the close button, once the window has been attached to a [`Ui`].
    pub fn close_button(&self) -> Option<ControlId> { self.close_button }

    /// Returns the composed chrome.
    pub fn frame(&self) -> &Bitmap { &self.frame }

    /// Returns the drag strip for a window occupying `render_rect`.
    pub fn drag_strip(&self, render_rect: Recti, style: &Style) -> Recti { rect(render_rect.x, render_rect.y, render_rect.width, style.title_height) }

    pub(crate) fn set_caption(&mut self, caption: &str) { self.caption = caption.to_string(); }

    pub(crate) fn set_movable(&mut self, movable: bool) {
        self.movable = movable;
        if !movable {
            self.moving = false;
        }
    }

    pub(crate) fn set_closable(&mut self, closable: bool) { self.closable = closable; }

    pub(crate) fn set_moving(&mut self, moving: bool) { self.moving = moving; }

    pub(crate) fn compose(&mut self, theme: &Theme, width: i32, height: i32) { self.frame = nine_patch::window_frame(theme.atlas(), self.movable, width, height); }

    pub(crate) fn draw<R: Renderer>(&self, control: &Control, theme: &Theme, canvas: &mut Canvas<R>) {
        let r = control.render_rect();
        canvas.draw_bitmap(&self.frame, vec2(r.x, r.y));
        if !self.caption.is_empty() {
            let style = theme.style();
            let (ox, oy) = style.caption_offset;
            canvas.draw_text(theme.font(), self.caption.as_str(), vec2(r.x + ox, r.y + oy), style.caption_color);
        }
    }
}
