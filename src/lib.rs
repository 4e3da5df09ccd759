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
#![warn(missing_docs)]
//! `gameui` is a small retained-mode widget toolkit for games.
//!
//! Controls (windows, buttons, checkboxes, labels and textboxes) live in a [`Ui`] tree. The embedding
//! application feeds input through [`Input`], calls [`Ui::update`] once per frame and then [`Ui::draw`]
//! into a [`Canvas`] wrapping any [`Renderer`]. Every visual comes from a fixed-layout theme atlas made
//! of 16×16 cells, see [`Cell`].

use std::time::Duration;

mod atlas;
mod bitmap;
mod canvas;
mod control;
mod font;
pub mod nine_patch;
mod surface;
mod theme;
mod ui;
mod widgets;

pub use atlas::*;
pub use bitmap::*;
pub use canvas::*;
pub use control::*;
pub use font::*;
pub use rs_math3d::*;
pub use surface::*;
pub use theme::*;
pub use ui::*;
pub use widgets::*;

use bitflags::*;

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
/// Simple RGBA color stored with 8-bit components.
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    /// Opaque white.
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
}

/// Convenience constructor for [`Vec2i`].
pub fn vec2(x: i32, y: i32) -> Vec2i { Vec2i { x, y } }

/// Convenience constructor for [`Recti`].
pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Recti { Recti { x, y, width: w, height: h } }

/// Convenience constructor for [`Color`].
pub fn color(r: u8, g: u8, b: u8, a: u8) -> Color { Color { r, g, b, a } }

/// Returns `true` when `p` lies inside `r`. The right and bottom edges are exclusive.
pub fn rect_contains(r: &Recti, p: Vec2i) -> bool { p.x >= r.x && p.y >= r.y && p.x < r.x + r.width && p.y < r.y + r.height }

/// Returns `r` moved by `(dx, dy)`.
pub fn translate_rect(r: Recti, dx: i32, dy: i32) -> Recti { rect(r.x + dx, r.y + dy, r.width, r.height) }

/// Returns the overlapping area of two rectangles, or `None` when they do not overlap.
pub fn intersect_rect(a: &Recti, b: &Recti) -> Option<Recti> {
    let x0 = a.x.max(b.x);
    let y0 = a.y.max(b.y);
    let x1 = (a.x + a.width).min(b.x + b.width);
    let y1 = (a.y + a.height).min(b.y + b.height);
    if x1 > x0 && y1 > y0 { Some(rect(x0, y0, x1 - x0, y1 - y0)) } else { None }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Mouse button state as reported by the input system.
    pub struct MouseButton : u32 {
        /// Middle mouse button.
        const MIDDLE = 4;
        /// Right mouse button.
        const RIGHT = 2;
        /// Left mouse button.
        const LEFT = 1;
        /// No buttons pressed.
        const NONE = 0;
    }
}

impl MouseButton {
    /// Returns `true` if the middle mouse button is pressed.
    pub fn is_middle(&self) -> bool { self.intersects(Self::MIDDLE) }
    /// Returns `true` if the right mouse button is pressed.
    pub fn is_right(&self) -> bool { self.intersects(Self::RIGHT) }
    /// Returns `true` if the left mouse button is pressed.
    pub fn is_left(&self) -> bool { self.intersects(Self::LEFT) }
    /// Returns `true` if no mouse buttons are pressed.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
}

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    /// Modifier key state attached to key events.
    pub struct KeyMode : u32 {
        /// Alt key held.
        const ALT = 4;
        /// Control key held.
        const CTRL = 2;
        /// Shift key held.
        const SHIFT = 1;
        /// No modifiers active.
        const NONE = 0;
    }
}

impl KeyMode {
    /// Returns `true` if no modifiers are active.
    pub fn is_none(&self) -> bool { self.bits() == 0 }
    /// Returns `true` if Alt is held.
    pub fn is_alt(&self) -> bool { self.intersects(Self::ALT) }
    /// Returns `true` if Control is held.
    pub fn is_ctrl(&self) -> bool { self.intersects(Self::CTRL) }
    /// Returns `true` if Shift is held.
    pub fn is_shift(&self) -> bool { self.intersects(Self::SHIFT) }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Logical keys understood by the controls.
pub enum Key {
    /// Deletes the character before the cursor.
    Backspace,
    /// Deletes the character after the cursor.
    Delete,
    /// Moves the cursor one character to the left.
    Left,
    /// Moves the cursor one character to the right.
    Right,
    /// Moves the cursor to the start of the text.
    Home,
    /// Moves the cursor to the end of the text.
    End,
    /// Return/Enter.
    Return,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// A key producing the character carried by the event.
    Character,
    /// Any other key.
    Other,
}

#[derive(Copy, Clone, Debug)]
/// A single input event handed to [`Ui::update`]. Positions are in root surface coordinates.
pub enum Event {
    /// A mouse button was pressed.
    MouseDown {
        /// Pointer position when the button went down.
        pos: Vec2i,
        /// Button that was pressed.
        button: MouseButton,
    },
    /// A mouse button was released.
    MouseUp {
        /// Pointer position when the button went up.
        pos: Vec2i,
        /// Button that was released.
        button: MouseButton,
    },
    /// The pointer moved.
    MouseMotion {
        /// New pointer position.
        pos: Vec2i,
        /// Movement since the previous position.
        delta: Vec2i,
    },
    /// A key was pressed.
    KeyDown {
        /// Logical key.
        key: Key,
        /// Modifiers held while pressing.
        mods: KeyMode,
        /// Character produced by the key, if any.
        ch: Option<char>,
    },
}

impl Event {
    /// Returns the pointer position carried by mouse events.
    pub fn pointer(&self) -> Option<Vec2i> {
        match self {
            Event::MouseDown { pos, .. } | Event::MouseUp { pos, .. } | Event::MouseMotion { pos, .. } => Some(*pos),
            Event::KeyDown { .. } => None,
        }
    }

    /// Returns `true` for a button press of any button.
    pub fn is_mouse_down(&self) -> bool { matches!(self, Event::MouseDown { .. }) }

    /// Returns `true` for a button release of any button.
    pub fn is_mouse_up(&self) -> bool { matches!(self, Event::MouseUp { .. }) }
}

#[derive(Clone, Debug)]
/// Aggregates raw input collected since the previous [`Ui::update`].
pub struct Input {
    mouse_pos: Vec2i,
    mouse_down: MouseButton,
    events: Vec<Event>,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2i::default(),
            mouse_down: MouseButton::NONE,
            events: Vec::new(),
        }
    }
}

impl Input {
    /// Returns the last known pointer position.
    pub fn mouse_pos(&self) -> Vec2i { self.mouse_pos }

    /// Returns the currently held mouse buttons.
    pub fn get_mouse_buttons(&self) -> MouseButton { self.mouse_down }

    /// Returns the events queued since the last update.
    pub fn pending(&self) -> &[Event] { &self.events }

    /// Updates the pointer position, queueing a motion event when it changed.
    pub fn mousemove(&mut self, x: i32, y: i32) {
        let delta = vec2(x - self.mouse_pos.x, y - self.mouse_pos.y);
        self.mouse_pos = vec2(x, y);
        if delta.x != 0 || delta.y != 0 {
            self.events.push(Event::MouseMotion { pos: self.mouse_pos, delta });
        }
    }

    /// Records that the specified mouse button was pressed.
    pub fn mousedown(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down |= btn;
        self.events.push(Event::MouseDown { pos: self.mouse_pos, button: btn });
    }

    /// Records that the specified mouse button was released.
    pub fn mouseup(&mut self, x: i32, y: i32, btn: MouseButton) {
        self.mousemove(x, y);
        self.mouse_down &= !btn;
        self.events.push(Event::MouseUp { pos: self.mouse_pos, button: btn });
    }

    /// Records a key press that does not produce text.
    pub fn keydown(&mut self, key: Key, mods: KeyMode) { self.events.push(Event::KeyDown { key, mods, ch: None }); }

    /// Records UTF-8 text input, one key event per character.
    pub fn text(&mut self, text: &str) {
        for ch in text.chars() {
            self.events.push(Event::KeyDown { key: Key::Character, mods: KeyMode::NONE, ch: Some(ch) });
        }
    }

    pub(crate) fn drain(&mut self) -> Vec<Event> { std::mem::take(&mut self.events) }
}

/// Describes the interface controls use to measure and rasterize text.
pub trait Font {
    /// Returns the font's display name.
    fn name(&self) -> &str;
    /// Returns the line height of the font in pixels.
    fn get_size(&self) -> usize;
    /// Returns the advance width and height for a specific character.
    fn get_char_size(&self, c: char) -> (usize, usize);
    /// Returns the coverage bitmap of a character, if the font can rasterize.
    fn rasterize(&self, _c: char) -> Option<Glyph> { None }

    /// Returns the pixel width of `text` laid out on a single line.
    fn text_width(&self, text: &str) -> i32 { text.chars().map(|c| self.get_char_size(c).0 as i32).sum() }

    /// Returns the pixel size of `text` laid out on a single line.
    fn text_size(&self, text: &str) -> Dimensioni { Dimensioni::new(self.text_width(text), self.get_size() as i32) }
}

/// Trait implemented by render backends the controls draw into.
pub trait Renderer {
    /// Begins a new frame with the viewport size and clear color.
    fn begin(&mut self, width: i32, height: i32, clr: Color);
    /// Copies the `src` region of `bitmap` to `pos`, blending by alpha.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, src: Recti, pos: Vec2i);
    /// Fills a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Recti, color: Color);
    /// Draws a single line of text with its top-left corner at `pos`, restricted to `clip`.
    fn draw_text(&mut self, font: &dyn Font, text: &str, pos: Vec2i, color: Color, clip: Recti);
    /// Ends the frame.
    fn end(&mut self);
}

#[derive(Copy, Clone, Debug)]
/// Collection of visual constants that drive control appearance.
pub struct Style {
    /// Color of button, checkbox, label and textbox text.
    pub text_color: Color,
    /// Color of window captions.
    pub caption_color: Color,
    /// Offset of the caption from the window's top-left corner.
    pub caption_offset: (i32, i32),
    /// Horizontal padding between a textbox edge and its text.
    pub textbox_padding: i32,
    /// Height of the window drag strip.
    pub title_height: i32,
    /// Side length of the window close button.
    pub close_button_size: i32,
    /// Side length of a checkbox.
    pub checkbox_size: i32,
    /// Distance from the checkbox's left edge to its label.
    pub checkbox_label_gap: i32,
    /// Interval at which the textbox cursor toggles.
    pub cursor_blink: Duration,
    /// Character drawn for every character of a password textbox.
    pub password_char: char,
    /// Character drawn as the textbox cursor.
    pub cursor_char: char,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            text_color: color(255, 255, 255, 255),
            caption_color: color(200, 200, 200, 255),
            caption_offset: (8, 3),
            textbox_padding: 8,
            title_height: 16,
            close_button_size: 16,
            checkbox_size: 16,
            checkbox_label_gap: 18,
            cursor_blink: Duration::from_millis(500),
            password_char: '*',
            cursor_char: '|',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_excludes_far_edges() {
        let r = rect(10, 10, 20, 5);
        assert!(rect_contains(&r, vec2(10, 10)));
        assert!(rect_contains(&r, vec2(29, 14)));
        assert!(!rect_contains(&r, vec2(30, 14)));
        assert!(!rect_contains(&r, vec2(29, 15)));
    }

    #[test]
    fn input_queues_motion_only_on_change() {
        let mut input = Input::default();
        input.mousemove(0, 0);
        assert!(input.pending().is_empty());
        input.mousedown(4, 2, MouseButton::LEFT);
        assert_eq!(input.pending().len(), 2);
        assert!(input.get_mouse_buttons().is_left());
        input.mouseup(4, 2, MouseButton::LEFT);
        assert!(input.get_mouse_buttons().is_none());
        input.text("hé");
        let events = input.drain();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[4], Event::KeyDown { key: Key::Character, ch: Some('é'), .. }));
        assert!(input.pending().is_empty());
    }

    #[test]
    fn intersect_disjoint_is_none() {
        assert!(intersect_rect(&rect(0, 0, 10, 10), &rect(10, 0, 5, 5)).is_none());
        let r = intersect_rect(&rect(0, 0, 10, 10), &rect(5, 5, 10, 10)).unwrap();
        assert_eq!((r.x, r.y, r.width, r.height), (5, 5, 5, 5));
    }
}
