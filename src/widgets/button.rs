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
/// Push button with a nine-slice face per interaction state.
pub struct Button {
    text: String,
    cells: [Cell; 3],
    normal: Bitmap,
    hover: Bitmap,
    click: Bitmap,
}

impl Button {
    pub(crate) fn new(theme: &Theme, width: i32, height: i32, text: &str) -> Self {
        Self::with_cells(theme, width, height, text, [BUTTON_NORMAL, BUTTON_HOVER, BUTTON_CLICKED])
    }

    /// Builds a button whose normal, hover and pressed faces come from `cells`.
    pub(crate) fn with_cells(theme: &Theme, width: i32, height: i32, text: &str, cells: [Cell; 3]) -> Self {
        let mut button = Self {
            text: text.to_string(),
            cells,
            normal: Bitmap::new(0, 0),
            hover: Bitmap::new(0, 0),
            click: Bitmap::new(0, 0),
        };
        button.compose(theme, width, height);
        button
    }

    /// Returns the button label.
    pub fn text(&self) -> &str { self.text.as_str() }

    pub(crate) fn set_text(&mut self, text: &str) { self.text = text.to_string(); }

    /// Returns the face drawn for the given interaction state.
    pub fn face(&self, hovered: bool, clicked: bool) -> &Bitmap {
        match (hovered, clicked) {
            (true, true) => &self.click,
            (true, false) => &self.hover,
            _ => &self.normal,
        }
    }

    pub(crate) fn compose(&mut self, theme: &Theme, width: i32, height: i32) {
        let atlas = theme.atlas();
        let [normal, hover, click] = self.cells;
        self.normal = nine_patch::compose(&atlas.cell(normal), width, height);
        self.hover = nine_patch::compose(&atlas.cell(hover), width, height);
        self.click = nine_patch::compose(&atlas.cell(click), width, height);
    }

    pub(crate) fn draw<R: Renderer>(&self, control: &Control, theme: &Theme, canvas: &mut Canvas<R>) {
        let r = control.render_rect();
        canvas.draw_bitmap(self.face(control.is_hovered(), control.is_clicked()), vec2(r.x, r.y));
        if !self.text.is_empty() {
            let mut pos = super::centered_text_pos(theme.font(), self.text.as_str(), r);
            // raised look until pressed
            if !control.is_clicked() {
                pos.y -= 1;
            }
            canvas.draw_text(theme.font(), self.text.as_str(), pos, theme.style().text_color);
        }
    }
}
