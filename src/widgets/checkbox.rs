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

#[derive(Clone)]
/// Two-state toggle drawn as a 16×16 box with an optional label to its right.
pub struct CheckBox {
    text: String,
    checked: bool,
    pub(crate) on_changed_value: Option<Callback>,
    normal: Bitmap,
    hover: Bitmap,
    mark: Bitmap,
}

impl CheckBox {
    pub(crate) fn new(theme: &Theme, text: &str) -> Self {
        let mut checkbox = Self {
            text: text.to_string(),
            checked: false,
            on_changed_value: None,
            normal: Bitmap::new(0, 0),
            hover: Bitmap::new(0, 0),
            mark: Bitmap::new(0, 0),
        };
        checkbox.compose(theme);
        checkbox
    }

    /// Returns the label drawn next to the box.
    pub fn text(&self) -> &str { self.text.as_str() }

    /// Returns the current value.
    pub fn is_checked(&self) -> bool { self.checked }

    pub(crate) fn set_text(&mut self, text: &str) { self.text = text.to_string(); }

    /// Stores `checked`, returning `true` when the value changed.
    pub(crate) fn set_checked(&mut self, checked: bool) -> bool {
        let changed = self.checked != checked;
        self.checked = checked;
        changed
    }

    pub(crate) fn compose(&mut self, theme: &Theme) {
        let atlas = theme.atlas();
        self.normal = atlas.cell(CHECKBOX_NORMAL);
        self.hover = atlas.cell(CHECKBOX_HOVER);
        self.mark = atlas.cell(CHECKBOX_CHECKED);
    }

    pub(crate) fn draw<R: Renderer>(&self, control: &Control, theme: &Theme, canvas: &mut Canvas<R>) {
        let r = control.render_rect();
        let pos = vec2(r.x, r.y);
        canvas.draw_bitmap(if control.is_hovered() { &self.hover } else { &self.normal }, pos);
        if self.checked {
            canvas.draw_bitmap(&self.mark, pos);
        }
        if !self.text.is_empty() {
            let style = theme.style();
            let size = theme.font().text_size(self.text.as_str());
            let text_pos = vec2(r.x + style.checkbox_label_gap, r.y + r.height / 2 - size.height / 2 + 1);
            canvas.draw_text(theme.font(), self.text.as_str(), text_pos, style.text_color);
        }
    }
}

impl std::fmt::Debug for CheckBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckBox").field("text", &self.text).field("checked", &self.checked).finish()
    }
}
