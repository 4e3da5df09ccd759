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
//! Per-kind state, visuals and drawing of the built-in controls.

mod button;
mod checkbox;
mod label;
mod text_edit;
mod textbox;
mod window;

pub use button::*;
pub use checkbox::*;
pub use label::*;
pub use text_edit::InputFilter;
pub use textbox::*;
pub use window::*;

use crate::{Canvas, Control, Font, Recti, Renderer, Theme, Vec2i, vec2};

/// Returns the position that centers `text` inside `r`.
pub(crate) fn centered_text_pos(font: &dyn Font, text: &str, r: Recti) -> Vec2i {
    let size = font.text_size(text);
    vec2(r.x + r.width / 2 - size.width / 2, r.y + r.height / 2 - size.height / 2)
}

/// Drawing entry point shared by every kind.
pub(crate) fn draw_kind<R: Renderer>(control: &Control, canvas: &mut Canvas<R>) {
    let theme: &Theme = control.theme();
    match control.kind() {
        crate::ControlKind::Container => (),
        crate::ControlKind::Button(b) => b.draw(control, theme, canvas),
        crate::ControlKind::CheckBox(c) => c.draw(control, theme, canvas),
        crate::ControlKind::Label(l) => l.draw(control, theme, canvas),
        crate::ControlKind::Textbox(t) => t.draw(control, theme, canvas),
        crate::ControlKind::Window(w) => w.draw(control, theme, canvas),
    }
}
