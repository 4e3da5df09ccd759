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

use slotmap::new_key_type;

use super::*;

new_key_type! {
    /// Stable handle of a control stored in a [`Ui`].
    pub struct ControlId;
}

/// User callback. It receives the tree so it can mutate any control, including the one that fired.
pub type Callback = Rc<dyn Fn(&mut Ui, ControlId)>;

#[derive(Clone, Debug)]
/// Kind-specific state of a control.
pub enum ControlKind {
    /// Invisible grouping node.
    Container,
    /// Push button.
    Button(Button),
    /// Two-state toggle.
    CheckBox(CheckBox),
    /// Static text.
    Label(Label),
    /// Single-line text entry.
    Textbox(Textbox),
    /// Top-level frame.
    Window(Window),
}

impl ControlKind {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ControlKind::Container => "container",
            ControlKind::Button(_) => "button",
            ControlKind::CheckBox(_) => "checkbox",
            ControlKind::Label(_) => "label",
            ControlKind::Textbox(_) => "textbox",
            ControlKind::Window(_) => "window",
        }
    }
}

#[derive(Clone)]
/// A node of the control tree.
///
/// Build one with a kind constructor, then hand it to [`Ui::add_root`] or [`Ui::add_control`].
/// Once attached, geometry, state and kind-specific settings change through the [`Ui`] so cached
/// render rectangles and visuals stay in sync.
pub struct Control {
    pub(crate) rect: Recti,
    pub(crate) render_rect: Recti,
    pub(crate) visible: bool,
    pub(crate) hovered: bool,
    pub(crate) clicked: bool,
    pub(crate) active: bool,
    pub(crate) parent: Option<ControlId>,
    pub(crate) children: Vec<ControlId>,
    pub(crate) on_mouse_down: Option<Callback>,
    pub(crate) on_mouse_up: Option<Callback>,
    pub(crate) on_activated: Option<Callback>,
    pub(crate) theme: Theme,
    pub(crate) kind: ControlKind,
}

impl Control {
    fn with_kind(theme: &Theme, r: Recti, kind: ControlKind) -> Self {
        Self {
            rect: r,
            render_rect: r,
            visible: true,
            hovered: false,
            clicked: false,
            active: false,
            parent: None,
            children: Vec::new(),
            on_mouse_down: None,
            on_mouse_up: None,
            on_activated: None,
            theme: theme.clone(),
            kind,
        }
    }

    /// Creates a grouping node without visuals.
    pub fn container(theme: &Theme, r: Recti) -> Self { Self::with_kind(theme, r, ControlKind::Container) }

    /// Creates a push button.
    pub fn button(theme: &Theme, r: Recti, text: &str) -> Self { Self::with_kind(theme, r, ControlKind::Button(Button::new(theme, r.width, r.height, text))) }

    /// Creates a checkbox at `(x, y)`. Its size comes from the style.
    pub fn checkbox(theme: &Theme, x: i32, y: i32, text: &str) -> Self {
        let side = theme.style().checkbox_size;
        Self::with_kind(theme, rect(x, y, side, side), ControlKind::CheckBox(CheckBox::new(theme, text)))
    }

    /// Creates a label at `(x, y)`.
    ///
    /// Labels have an empty rectangle: they never take hover from the controls under them.
    pub fn label(theme: &Theme, x: i32, y: i32, text: &str) -> Self { Self::with_kind(theme, rect(x, y, 0, 0), ControlKind::Label(Label::new(text))) }

    /// Creates a textbox.
    pub fn textbox(theme: &Theme, r: Recti, text: &str) -> Self { Self::with_kind(theme, r, ControlKind::Textbox(Textbox::new(theme, r.width, r.height, text))) }

    /// Creates a movable, closable window.
    pub fn window(theme: &Theme, r: Recti, caption: &str) -> Self { Self::with_kind(theme, r, ControlKind::Window(Window::new(theme, r.width, r.height, caption))) }

    /// Creates the 16×16 close button hosted by windows.
    pub(crate) fn close_button(theme: &Theme, r: Recti) -> Self {
        let button = Button::with_cells(theme, r.width, r.height, "", [CLOSE_NORMAL, CLOSE_HOVER, CLOSE_NORMAL]);
        Self::with_kind(theme, r, ControlKind::Button(button))
    }

    /// Sets the initial visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Binds the press callback.
    pub fn with_on_mouse_down(mut self, f: impl Fn(&mut Ui, ControlId) + 'static) -> Self {
        self.on_mouse_down = Some(Rc::new(f));
        self
    }

    /// Binds the release (click) callback.
    pub fn with_on_mouse_up(mut self, f: impl Fn(&mut Ui, ControlId) + 'static) -> Self {
        self.on_mouse_up = Some(Rc::new(f));
        self
    }

    /// Binds the activation callback.
    pub fn with_on_activated(mut self, f: impl Fn(&mut Ui, ControlId) + 'static) -> Self {
        self.on_activated = Some(Rc::new(f));
        self
    }

    /// Sets the initial value of a checkbox. No callback fires.
    pub fn with_checked(mut self, checked: bool) -> Self {
        if let ControlKind::CheckBox(c) = &mut self.kind {
            c.set_checked(checked);
        }
        self
    }

    /// Binds the value-change callback of a checkbox.
    pub fn with_on_changed_value(mut self, f: impl Fn(&mut Ui, ControlId) + 'static) -> Self {
        if let ControlKind::CheckBox(c) = &mut self.kind {
            c.on_changed_value = Some(Rc::new(f));
        }
        self
    }

    /// Enables password masking on a textbox.
    pub fn with_password(mut self, password: bool) -> Self {
        if let ControlKind::Textbox(t) = &mut self.kind {
            t.set_password(password, &self.theme);
        }
        self
    }

    /// Sets the input filter of a textbox.
    pub fn with_filter(mut self, filter: InputFilter) -> Self {
        if let ControlKind::Textbox(t) = &mut self.kind {
            t.set_filter(filter);
        }
        self
    }

    /// Binds the text-change callback of a textbox.
    pub fn with_on_changed_text(mut self, f: impl Fn(&mut Ui, ControlId) + 'static) -> Self {
        if let ControlKind::Textbox(t) = &mut self.kind {
            t.on_changed_text = Some(Rc::new(f));
        }
        self
    }

    /// Sets whether a window can be dragged by its title strip.
    pub fn with_movable(mut self, movable: bool) -> Self {
        if let ControlKind::Window(w) = &mut self.kind {
            w.set_movable(movable);
            w.compose(&self.theme, self.rect.width, self.rect.height);
        }
        self
    }

    /// Sets whether a window gets a close button when attached.
    pub fn with_closable(mut self, closable: bool) -> Self {
        if let ControlKind::Window(w) = &mut self.kind {
            w.set_closable(closable);
        }
        self
    }

    /// Sets the background fill of a label.
    pub fn with_background(mut self, background: Color) -> Self {
        if let ControlKind::Label(l) = &mut self.kind {
            l.set_background(Some(background));
        }
        self
    }

    /// Returns the rectangle relative to the parent.
    pub fn rect(&self) -> Recti { self.rect }

    /// Returns the rectangle in root surface coordinates.
    pub fn render_rect(&self) -> Recti { self.render_rect }

    /// Returns the position relative to the parent.
    pub fn position(&self) -> Vec2i { vec2(self.rect.x, self.rect.y) }

    /// Returns the size.
    pub fn size(&self) -> Dimensioni { Dimensioni::new(self.rect.width, self.rect.height) }

    /// Returns `true` unless the control was hidden.
    pub fn is_visible(&self) -> bool { self.visible }

    /// Returns `true` while the pointer is over the control.
    pub fn is_hovered(&self) -> bool { self.hovered }

    /// Returns `true` between a press on the control and the matching release.
    pub fn is_clicked(&self) -> bool { self.clicked }

    /// Returns `true` when the control is part of the active chain.
    pub fn is_active(&self) -> bool { self.active }

    /// Returns the parent, `None` for roots and detached controls.
    pub fn parent(&self) -> Option<ControlId> { self.parent }

    /// Returns the children in paint order.
    pub fn children(&self) -> &[ControlId] { &self.children }

    /// Returns the theme the visuals were built from.
    pub fn theme(&self) -> &Theme { &self.theme }

    /// Returns the kind-specific state.
    pub fn kind(&self) -> &ControlKind { &self.kind }

    /// Returns the button state, if this is a button.
    pub fn as_button(&self) -> Option<&Button> {
        match &self.kind {
            ControlKind::Button(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the checkbox state, if this is a checkbox.
    pub fn as_checkbox(&self) -> Option<&CheckBox> {
        match &self.kind {
            ControlKind::CheckBox(c) => Some(c),
            _ => None,
        }
    }

    /// Returns the label state, if this is a label.
    pub fn as_label(&self) -> Option<&Label> {
        match &self.kind {
            ControlKind::Label(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the textbox state, if this is a textbox.
    pub fn as_textbox(&self) -> Option<&Textbox> {
        match &self.kind {
            ControlKind::Textbox(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the window state, if this is a window.
    pub fn as_window(&self) -> Option<&Window> {
        match &self.kind {
            ControlKind::Window(w) => Some(w),
            _ => None,
        }
    }

    /// Rebuilds the cached visuals for the current size and theme.
    pub(crate) fn compose(&mut self) {
        let (w, h) = (self.rect.width, self.rect.height);
        match &mut self.kind {
            ControlKind::Container | ControlKind::Label(_) => (),
            ControlKind::Button(b) => b.compose(&self.theme, w, h),
            ControlKind::CheckBox(c) => c.compose(&self.theme),
            ControlKind::Textbox(t) => t.compose(&self.theme, w, h),
            ControlKind::Window(win) => win.compose(&self.theme, w, h),
        }
    }
}

impl std::fmt::Debug for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = self.render_rect;
        f.debug_struct("Control")
            .field("kind", &self.kind)
            .field("render_rect", &(r.x, r.y, r.width, r.height))
            .field("visible", &self.visible)
            .field("hovered", &self.hovered)
            .field("clicked", &self.clicked)
            .field("active", &self.active)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish()
    }
}
