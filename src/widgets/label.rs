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

#[derive(Clone, Debug)]
/// Static text with an optional background fill.
pub struct Label {
    text: String,
    background: Option<Color>,
}

impl Label {
    pub(crate) fn new(text: &str) -> Self { Self { text: text.to_string(), background: None } }

    /// Returns the label text.
    pub fn text(&self) -> &str { self.text.as_str() }

    /// Returns the background fill, if any.
    pub fn background(&self) -> Option<Color> { self.background }

    pub(crate) fn set_text(&mut self, text: &str) { self.text = text.to_string(); }

    pub(crate) fn set_background(&mut self, background: Option<Color>) { self.background = background; }

    pub(crate) fn draw<R: Renderer>(&self, control: &Control, theme: &Theme, canvas: &mut Canvas<R>) {
        let r = control.render_rect();
        let font = theme.font();
        if let Some(bg) = self.background {
            let size = font.text_size(self.text.as_str());
            canvas.fill_rect(rect(r.x, r.y, size.width, size.height), bg);
        }
        canvas.draw_text(font, self.text.as_str(), vec2(r.x, r.y), theme.style().text_color);
    }
}
