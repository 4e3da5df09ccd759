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
use std::rc::Rc;

use super::*;

#[derive(Clone)]
/// Everything a control needs to build its visuals: the atlas, the font and the style constants.
///
/// Cloning is cheap, the atlas and the font are shared.
pub struct Theme {
    atlas: AtlasHandle,
    font: Rc<dyn Font>,
    style: Style,
}

impl Theme {
    /// Bundles an atlas, a font and a style.
    pub fn new(atlas: AtlasHandle, font: Rc<dyn Font>, style: Style) -> Self { Self { atlas, font, style } }

    /// Returns the theme atlas.
    pub fn atlas(&self) -> &AtlasHandle { &self.atlas }

    /// Returns the font used for every caption and text.
    pub fn font(&self) -> &dyn Font { self.font.as_ref() }

    /// Returns the style constants.
    pub fn style(&self) -> &Style { &self.style }

    /// Returns a copy of this theme with a different style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Returns a copy of this theme with a different font.
    pub fn with_font(mut self, font: Rc<dyn Font>) -> Self {
        self.font = font;
        self
    }
}

impl Default for Theme {
    fn default() -> Self { Self::new(AtlasHandle::default_theme(), Rc::new(MonoFont::default()), Style::default()) }
}

impl std::fmt::Debug for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Theme")
            .field("atlas", &(self.atlas.width(), self.atlas.height()))
            .field("font", &self.font.name())
            .field("style", &self.style)
            .finish()
    }
}
