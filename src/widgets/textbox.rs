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
use std::time::Instant;

use crate::*;

use super::text_edit::{apply_key, char_len};

#[derive(Clone)]
/// Single-line text entry with a horizontally scrolled view.
///
/// `start..end` is the range of characters currently rendered. It always satisfies
/// `start <= cursor <= end <= len` and the characters in it fit inside the interior width
/// (control width minus the padding on both sides).
pub struct Textbox {
    text: String,
    password: bool,
    cursor: usize,
    start: usize,
    end: usize,
    filter: InputFilter,
    pub(crate) on_changed_text: Option<Callback>,
    cursor_visible: bool,
    last_blink: Option<Instant>,
    interior_width: i32,
    normal: Bitmap,
    active: Bitmap,
}

impl Textbox {
    pub(crate) fn new(theme: &Theme, width: i32, height: i32, text: &str) -> Self {
        let mut textbox = Self {
            text: text.to_string(),
            password: false,
            cursor: 0,
            start: 0,
            end: 0,
            filter: InputFilter::Default,
            on_changed_text: None,
            cursor_visible: true,
            last_blink: None,
            interior_width: 0,
            normal: Bitmap::new(0, 0),
            active: Bitmap::new(0, 0),
        };
        textbox.compose(theme, width, height);
        textbox
    }

    /// Returns the edited text.
    pub fn text(&self) -> &str { self.text.as_str() }

    /// Returns the number of characters in the text.
    pub fn len(&self) -> usize { char_len(self.text.as_str()) }

    /// Returns `true` when the text is empty.
    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    /// Returns `true` when the text is displayed masked.
    pub fn is_password(&self) -> bool { self.password }

    /// Returns the cursor as a character index in `0..=len`.
    pub fn cursor(&self) -> usize { self.cursor }

    /// Returns the rendered character range as `(start, end)`.
    pub fn visible_range(&self) -> (usize, usize) { (self.start, self.end) }

    /// Returns the active input filter.
    pub fn filter(&self) -> &InputFilter { &self.filter }

    /// Returns the blink phase of the cursor.
    pub fn is_cursor_visible(&self) -> bool { self.cursor_visible }

    /// Returns the whole text as displayed, masked in password mode.
    pub fn display_text(&self, style: &Style) -> String {
        if self.password { std::iter::repeat_n(style.password_char, self.len()).collect() } else { self.text.clone() }
    }

    /// Returns the displayed characters inside the visible range.
    pub fn visible_text(&self, style: &Style) -> String {
        self.display_text(style).chars().skip(self.start).take(self.end - self.start).collect()
    }

    /// Returns the top-left corner of the text for a textbox occupying `render_rect`.
    pub fn text_origin(render_rect: Recti, font: &dyn Font, style: &Style) -> Vec2i {
        vec2(render_rect.x + style.textbox_padding, render_rect.y + render_rect.height / 2 - font.get_size() as i32 / 2)
    }

    /// Replaces the text, returning `true` when it differs from the previous one.
    pub(crate) fn set_text(&mut self, text: &str, theme: &Theme) -> bool {
        if self.text == text {
            return false;
        }
        self.text = text.to_string();
        self.cursor = self.cursor.min(self.len());
        self.recompute_window(theme);
        true
    }

    pub(crate) fn set_password(&mut self, password: bool, theme: &Theme) {
        self.password = password;
        self.recompute_window(theme);
    }

    pub(crate) fn set_filter(&mut self, filter: InputFilter) { self.filter = filter; }

    pub(crate) fn set_cursor(&mut self, cursor: usize, theme: &Theme) {
        self.cursor = cursor.min(self.len());
        self.recompute_window(theme);
    }

    pub(crate) fn compose(&mut self, theme: &Theme, width: i32, height: i32) {
        let atlas = theme.atlas();
        self.normal = nine_patch::compose(&atlas.cell(TEXTBOX_NORMAL), width, height);
        self.active = nine_patch::compose(&atlas.cell(TEXTBOX_ACTIVE), width, height);
        self.interior_width = (width - theme.style().textbox_padding * 2).max(0);
        self.recompute_window(theme);
    }

    fn width_of(font: &dyn Font, chars: &[char]) -> i32 { chars.iter().map(|c| font.get_char_size(*c).0 as i32).sum() }

    /// Number of characters from `from` onwards that fit the interior.
    fn fit_forward(&self, font: &dyn Font, chars: &[char], from: usize) -> usize {
        let mut width = 0;
        let mut n = 0;
        for c in &chars[from..] {
            width += font.get_char_size(*c).0 as i32;
            if width > self.interior_width {
                break;
            }
            n += 1;
        }
        n
    }

    /// Number of characters ending at `to` that fit the interior.
    fn fit_backward(&self, font: &dyn Font, chars: &[char], to: usize) -> usize {
        let mut width = 0;
        let mut n = 0;
        for c in chars[..to].iter().rev() {
            width += font.get_char_size(*c).0 as i32;
            if width > self.interior_width {
                break;
            }
            n += 1;
        }
        n
    }

    /// Recomputes `start..end` so the cursor stays inside the rendered range.
    pub(crate) fn recompute_window(&mut self, theme: &Theme) {
        let font = theme.font();
        let chars: Vec<char> = self.display_text(theme.style()).chars().collect();
        let len = chars.len();
        self.cursor = self.cursor.min(len);

        if Self::width_of(font, &chars) <= self.interior_width {
            self.start = 0;
            self.end = len;
            return;
        }

        self.start = self.start.min(len);
        if self.cursor < self.start {
            self.start = self.cursor;
        }
        self.end = self.start + self.fit_forward(font, &chars, self.start);
        if self.cursor > self.end {
            self.end = self.cursor;
            self.start = self.end - self.fit_backward(font, &chars, self.end);
        }
        if self.end == len {
            // no blank space on the right while there is hidden text on the left
            self.start = len - self.fit_backward(font, &chars, len);
        }
    }

    /// Applies a key press. Returns `true` when the text changed.
    pub(crate) fn handle_key(&mut self, key: Key, ch: Option<char>, theme: &Theme, now: Instant) -> bool {
        let outcome = apply_key(&mut self.text, self.cursor, key, ch, &self.filter);
        self.cursor = outcome.cursor;
        if outcome.changed || outcome.moved {
            self.recompute_window(theme);
            self.restart_blink(now);
        }
        outcome.changed
    }

    /// Places the cursor under the pointer's horizontal position `x`.
    pub(crate) fn place_cursor(&mut self, x: i32, render_rect: Recti, theme: &Theme, now: Instant) {
        let font = theme.font();
        let origin = Self::text_origin(render_rect, font, theme.style());
        let offset = x - origin.x;
        let visible: Vec<char> = self.visible_text(theme.style()).chars().collect();

        let mut index = visible.len();
        let mut width = 0;
        for (i, c) in visible.iter().enumerate() {
            width += font.get_char_size(*c).0 as i32;
            if offset <= width {
                index = i;
                break;
            }
        }
        self.cursor = (self.start + index).min(self.len());
        self.recompute_window(theme);
        self.restart_blink(now);
    }

    fn restart_blink(&mut self, now: Instant) {
        self.cursor_visible = true;
        self.last_blink = Some(now);
    }

    /// Advances the blink clock. Only runs while the control is active.
    pub(crate) fn blink(&mut self, active: bool, interval: std::time::Duration, now: Instant) {
        if !active {
            self.cursor_visible = true;
            self.last_blink = None;
            return;
        }
        match self.last_blink {
            Some(last) if now.saturating_duration_since(last) >= interval => {
                self.cursor_visible = !self.cursor_visible;
                self.last_blink = Some(now);
            }
            Some(_) => (),
            None => self.last_blink = Some(now),
        }
    }

    pub(crate) fn draw<R: Renderer>(&self, control: &Control, theme: &Theme, canvas: &mut Canvas<R>) {
        let r = control.render_rect();
        let style = theme.style();
        let font = theme.font();
        canvas.draw_bitmap(if control.is_active() { &self.active } else { &self.normal }, vec2(r.x, r.y));

        let origin = Self::text_origin(r, font, style);
        let visible: Vec<char> = self.visible_text(style).chars().collect();
        canvas.push_clip_rect(r);
        canvas.draw_text(font, visible.iter().collect::<String>().as_str(), origin, style.text_color);
        if control.is_active() && self.cursor_visible {
            let upto = self.cursor.saturating_sub(self.start).min(visible.len());
            let prefix = Self::width_of(font, &visible[..upto]);
            canvas.draw_text(font, style.cursor_char.to_string().as_str(), vec2(origin.x + prefix - 1, origin.y), style.text_color);
        }
        canvas.pop_clip_rect();
    }
}

impl std::fmt::Debug for Textbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Textbox")
            .field("text", &self.text)
            .field("password", &self.password)
            .field("cursor", &self.cursor)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("filter", &self.filter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::time::Duration;

    // 10px wide characters, 40px wide control, padding 8 => 24px interior => 2 characters
    fn narrow_theme() -> Theme { Theme::default().with_font(Rc::new(MonoFont::new("t", 10, 12))) }

    fn type_str(tb: &mut Textbox, s: &str, theme: &Theme, now: Instant) {
        for c in s.chars() {
            tb.handle_key(Key::Character, Some(c), theme, now);
        }
    }

    fn assert_window_invariant(tb: &Textbox, theme: &Theme) {
        let (start, end) = tb.visible_range();
        assert!(start <= tb.cursor() && tb.cursor() <= end && end <= tb.len(), "{:?}", tb);
        assert!(theme.font().text_width(tb.visible_text(theme.style()).as_str()) <= 24);
    }

    #[test]
    fn type_and_erase() {
        let theme = Theme::default();
        let now = Instant::now();
        let mut tb = Textbox::new(&theme, 100, 20, "");
        type_str(&mut tb, "abc", &theme, now);
        assert_eq!((tb.text(), tb.cursor()), ("abc", 3));
        for _ in 0..3 {
            assert!(tb.handle_key(Key::Backspace, None, &theme, now));
        }
        assert_eq!((tb.text(), tb.cursor()), ("", 0));
        assert!(!tb.handle_key(Key::Backspace, None, &theme, now));
    }

    #[test]
    fn window_follows_cursor() {
        let theme = narrow_theme();
        let now = Instant::now();
        let mut tb = Textbox::new(&theme, 40, 20, "");
        type_str(&mut tb, "abcdef", &theme, now);
        assert_eq!(tb.visible_range(), (4, 6));
        assert_window_invariant(&tb, &theme);

        for key in [Key::Left, Key::Left, Key::Left, Key::Left, Key::Left] {
            tb.handle_key(key, None, &theme, now);
            assert_window_invariant(&tb, &theme);
        }
        assert_eq!(tb.cursor(), 1);
        assert_eq!(tb.visible_range(), (1, 3));

        tb.handle_key(Key::End, None, &theme, now);
        assert_eq!(tb.visible_range(), (4, 6));
        tb.handle_key(Key::Home, None, &theme, now);
        assert_eq!(tb.visible_range(), (0, 2));
        tb.handle_key(Key::Delete, None, &theme, now);
        assert_eq!(tb.text(), "bcdef");
        assert_window_invariant(&tb, &theme);
    }

    #[test]
    fn deleting_at_the_end_pulls_text_back_in() {
        let theme = narrow_theme();
        let now = Instant::now();
        let mut tb = Textbox::new(&theme, 40, 20, "");
        type_str(&mut tb, "abcd", &theme, now);
        tb.handle_key(Key::Backspace, None, &theme, now);
        assert_eq!(tb.visible_range(), (1, 3));
        assert_window_invariant(&tb, &theme);
    }

    #[test]
    fn password_mask_matches_length() {
        let theme = Theme::default();
        let mut tb = Textbox::new(&theme, 100, 20, "");
        tb.set_password(true, &theme);
        assert_eq!(tb.display_text(theme.style()), "");
        for n in 1..5 {
            let text: String = std::iter::repeat_n('é', n).collect();
            tb.set_text(text.as_str(), &theme);
            assert_eq!(tb.display_text(theme.style()).chars().count(), n);
            assert!(tb.display_text(theme.style()).chars().all(|c| c == '*'));
        }
        tb.set_password(false, &theme);
        assert_eq!(tb.display_text(theme.style()), "éééé");
    }

    #[test]
    fn click_places_cursor_in_visible_range() {
        let theme = narrow_theme();
        let now = Instant::now();
        let r = rect(0, 0, 40, 20);
        let mut tb = Textbox::new(&theme, 40, 20, "abcdef");
        tb.set_cursor(6, &theme);
        assert_eq!(tb.visible_range(), (4, 6));
        // text starts at x = 8, first visible glyph covers 8..18
        tb.place_cursor(9, r, &theme, now);
        assert_eq!(tb.cursor(), 4);
        tb.place_cursor(20, r, &theme, now);
        assert_eq!(tb.cursor(), 5);
        tb.place_cursor(39, r, &theme, now);
        assert_eq!(tb.cursor(), 6);
    }

    #[test]
    fn rejected_characters_are_dropped() {
        let theme = Theme::default();
        let now = Instant::now();
        let mut tb = Textbox::new(&theme, 100, 20, "");
        tb.set_filter(InputFilter::Numeric);
        type_str(&mut tb, "1a2", &theme, now);
        assert_eq!((tb.text(), tb.cursor()), ("12", 2));
    }

    #[test]
    fn cursor_blinks_only_while_active() {
        let theme = Theme::default();
        let t0 = Instant::now();
        let interval = Duration::from_millis(500);
        let mut tb = Textbox::new(&theme, 100, 20, "");
        tb.blink(true, interval, t0);
        assert!(tb.is_cursor_visible());
        tb.blink(true, interval, t0 + Duration::from_millis(499));
        assert!(tb.is_cursor_visible());
        tb.blink(true, interval, t0 + Duration::from_millis(500));
        assert!(!tb.is_cursor_visible());
        tb.blink(false, interval, t0 + Duration::from_millis(2000));
        assert!(tb.is_cursor_visible());
    }
}
