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
//! Single-line editing primitives shared by text entry controls.
//!
//! Cursors are character indices, never byte offsets.

use std::rc::Rc;

use crate::Key;

#[derive(Clone, Default)]
/// Character acceptance predicate applied to typed input.
pub enum InputFilter {
    #[default]
    /// ASCII letters, digits, punctuation and space plus accented Latin-1 letters.
    Default,
    /// Every non-control character.
    Any,
    /// ASCII digits plus `-` and `.`.
    Numeric,
    /// User supplied predicate.
    Custom(Rc<dyn Fn(char) -> bool>),
}

impl InputFilter {
    /// Returns `true` when `c` may be inserted.
    pub fn accepts(&self, c: char) -> bool {
        match self {
            InputFilter::Default => {
                c.is_ascii_alphanumeric() || c.is_ascii_punctuation() || c == ' ' || (('\u{C0}'..='\u{FF}').contains(&c) && c != '×' && c != '÷')
            }
            InputFilter::Any => !c.is_control(),
            InputFilter::Numeric => c.is_ascii_digit() || c == '-' || c == '.',
            InputFilter::Custom(f) => f(c),
        }
    }
}

impl std::fmt::Debug for InputFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFilter::Default => f.write_str("Default"),
            InputFilter::Any => f.write_str("Any"),
            InputFilter::Numeric => f.write_str("Numeric"),
            InputFilter::Custom(_) => f.write_str("Custom"),
        }
    }
}

pub(crate) struct TextEditOutcome {
    pub cursor: usize,
    pub changed: bool,
    pub moved: bool,
}

pub(crate) fn char_len(buf: &str) -> usize { buf.chars().count() }

pub(crate) fn byte_offset(buf: &str, index: usize) -> usize { buf.char_indices().nth(index).map(|(b, _)| b).unwrap_or(buf.len()) }

fn insert_char(buf: &mut String, cursor: &mut usize, c: char) {
    let at = byte_offset(buf, *cursor);
    buf.insert(at, c);
    *cursor += 1;
}

fn delete_prev(buf: &mut String, cursor: &mut usize) -> bool {
    if *cursor == 0 {
        return false;
    }
    let start = byte_offset(buf, *cursor - 1);
    buf.remove(start);
    *cursor -= 1;
    true
}

fn delete_next(buf: &mut String, cursor: usize) -> bool {
    if cursor >= char_len(buf) {
        return false;
    }
    let at = byte_offset(buf, cursor);
    buf.remove(at);
    true
}

/// Applies one key press to `buf`. Characters rejected by `filter` are dropped.
pub(crate) fn apply_key(buf: &mut String, cursor: usize, key: Key, ch: Option<char>, filter: &InputFilter) -> TextEditOutcome {
    let len = char_len(buf);
    let mut cursor = cursor.min(len);
    let mut changed = false;
    let mut moved = false;

    match key {
        Key::Backspace => changed = delete_prev(buf, &mut cursor),
        Key::Delete => changed = delete_next(buf, cursor),
        Key::Left if cursor > 0 => {
            cursor -= 1;
            moved = true;
        }
        Key::Right if cursor < len => {
            cursor += 1;
            moved = true;
        }
        Key::Home if cursor != 0 => {
            cursor = 0;
            moved = true;
        }
        Key::End if cursor != len => {
            cursor = len;
            moved = true;
        }
        _ => match ch {
            Some(c) if filter.accepts(c) => {
                insert_char(buf, &mut cursor, c);
                changed = true;
            }
            Some(c) => tracing::trace!(?c, "rejected by input filter"),
            None => (),
        },
    }

    TextEditOutcome { cursor, changed, moved }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_matches_reference_ranges() {
        let f = InputFilter::Default;
        for c in ['a', 'Z', '0', ' ', '!', '~', 'é', 'Ç', 'ÿ'] {
            assert!(f.accepts(c), "{:?}", c);
        }
        for c in ['\n', '\t', '×', '÷', '€', '日'] {
            assert!(!f.accepts(c), "{:?}", c);
        }
        assert!(InputFilter::Any.accepts('日'));
        assert!(!InputFilter::Numeric.accepts('a'));
        assert!(InputFilter::Custom(Rc::new(|c| c == 'x')).accepts('x'));
    }

    #[test]
    fn multibyte_edits_use_char_indices() {
        let mut buf = String::from("aé");
        let out = apply_key(&mut buf, 2, Key::Character, Some('ü'), &InputFilter::Default);
        assert_eq!((buf.as_str(), out.cursor, out.changed), ("aéü", 3, true));
        let out = apply_key(&mut buf, 2, Key::Backspace, None, &InputFilter::Default);
        assert_eq!((buf.as_str(), out.cursor), ("aü", 1));
        let out = apply_key(&mut buf, 1, Key::Delete, None, &InputFilter::Default);
        assert_eq!((buf.as_str(), out.cursor), ("a", 1));
    }

    #[test]
    fn edges_are_no_ops() {
        let mut buf = String::from("ab");
        assert!(!apply_key(&mut buf, 0, Key::Backspace, None, &InputFilter::Default).changed);
        assert!(!apply_key(&mut buf, 2, Key::Delete, None, &InputFilter::Default).changed);
        assert!(!apply_key(&mut buf, 0, Key::Left, None, &InputFilter::Default).moved);
        assert!(!apply_key(&mut buf, 2, Key::Right, None, &InputFilter::Default).moved);
        // out of range cursors are clamped before editing
        let out = apply_key(&mut buf, 99, Key::Character, Some('c'), &InputFilter::Default);
        assert_eq!((buf.as_str(), out.cursor), ("abc", 3));
        let out = apply_key(&mut buf, 1, Key::Character, Some('\u{7}'), &InputFilter::Any);
        assert_eq!((buf.as_str(), out.changed), ("abc", false));
    }
}
