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
use std::time::Instant;

use slotmap::SlotMap;

use super::*;

/// Owner of the control tree.
///
/// Controls live in an arena keyed by [`ControlId`]. Every parent owns the ordered list of its
/// children, children only keep the id of their parent. Top-level controls sit in an ordered root
/// list that behaves like the child list of an invisible container: the same hit-testing, the same
/// activation exclusivity and the same bring-to-front apply to it.
///
/// Operations on ids that are no longer in the tree do nothing.
pub struct Ui {
    controls: SlotMap<ControlId, Control>,
    roots: Vec<ControlId>,
    pointer: Vec2i,
}

impl Default for Ui {
    fn default() -> Self { Self::new() }
}

impl Ui {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            controls: SlotMap::with_key(),
            roots: Vec::new(),
            pointer: Vec2i::default(),
        }
    }

    /// Returns the number of controls in the tree.
    pub fn len(&self) -> usize { self.controls.len() }

    /// Returns `true` when the tree holds no controls.
    pub fn is_empty(&self) -> bool { self.controls.is_empty() }

    /// Returns `true` when `id` refers to a control of this tree.
    pub fn contains(&self, id: ControlId) -> bool { self.controls.contains_key(id) }

    /// Returns a control.
    pub fn control(&self, id: ControlId) -> Option<&Control> { self.controls.get(id) }

    /// Returns the top-level controls in paint order.
    pub fn roots(&self) -> &[ControlId] { &self.roots }

    /// Returns the children of `id` in paint order.
    pub fn children(&self, id: ControlId) -> &[ControlId] { self.controls.get(id).map(|c| c.children.as_slice()).unwrap_or(&[]) }

    /// Returns the parent of `id`.
    pub fn parent(&self, id: ControlId) -> Option<ControlId> { self.controls.get(id).and_then(|c| c.parent) }

    /// Returns the pointer position used by the last update pass.
    pub fn pointer(&self) -> Vec2i { self.pointer }

    /// Returns the deepest control of the active chain.
    pub fn focused(&self) -> Option<ControlId> {
        let mut level = self.roots.as_slice();
        let mut found = None;
        while let Some(&id) = level.iter().rev().find(|id| self.controls.get(**id).map(|c| c.active).unwrap_or(false)) {
            found = Some(id);
            level = self.children(id);
        }
        found
    }

    fn siblings(&self, parent: Option<ControlId>) -> Vec<ControlId> {
        match parent {
            Some(p) => self.children(p).to_vec(),
            None => self.roots.clone(),
        }
    }

    fn siblings_mut(&mut self, parent: Option<ControlId>) -> Option<&mut Vec<ControlId>> {
        match parent {
            Some(p) => self.controls.get_mut(p).map(|c| &mut c.children),
            None => Some(&mut self.roots),
        }
    }

    fn is_ancestor(&self, ancestor: ControlId, id: ControlId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent(c);
        }
        false
    }

    fn subtree(&self, id: ControlId) -> Vec<ControlId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(c) = stack.pop() {
            if let Some(control) = self.controls.get(c) {
                out.push(c);
                stack.extend(control.children.iter().copied());
            }
        }
        out
    }

    ////////////////////////////////////////////////////////////////////////////
    // structure
    ////////////////////////////////////////////////////////////////////////////

    /// Adds a top-level control on top of the existing ones.
    pub fn add_root(&mut self, control: Control) -> ControlId { self.attach(None, control) }

    /// Appends `control` to the children of `parent`. Returns `None` when `parent` is stale.
    pub fn add_control(&mut self, parent: ControlId, control: Control) -> Option<ControlId> {
        if !self.contains(parent) {
            return None;
        }
        Some(self.attach(Some(parent), control))
    }

    fn attach(&mut self, parent: Option<ControlId>, mut control: Control) -> ControlId {
        control.parent = parent;
        let kind = control.kind.name();
        let id = self.controls.insert(control);
        if let Some(list) = self.siblings_mut(parent) {
            list.push(id);
        }
        self.refresh_render_rects(id);
        if matches!(self.controls[id].kind, ControlKind::Window(_)) {
            self.sync_close_button(id);
        }
        tracing::debug!(?id, ?parent, kind, "control attached");
        id
    }

    /// Removes `id` and its whole subtree. Returns `false` when `id` is stale.
    pub fn remove(&mut self, id: ControlId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let parent = self.parent(id);
        if let Some(list) = self.siblings_mut(parent) {
            list.retain(|c| *c != id);
        }
        if let Some(ControlKind::Window(w)) = parent.and_then(|p| self.controls.get_mut(p)).map(|c| &mut c.kind) {
            if w.close_button == Some(id) {
                w.close_button = None;
            }
        }
        let doomed = self.subtree(id);
        for c in &doomed {
            self.controls.remove(*c);
        }
        tracing::debug!(?id, count = doomed.len(), "control removed");
        true
    }

    /// Moves `id` under `new_parent` (or to the root list), on top of its new siblings.
    ///
    /// Fails when either id is stale or when `new_parent` lies inside the subtree of `id`.
    pub fn reparent(&mut self, id: ControlId, new_parent: Option<ControlId>) -> bool {
        if !self.contains(id) {
            return false;
        }
        if let Some(p) = new_parent {
            if !self.contains(p) || self.is_ancestor(id, p) {
                return false;
            }
        }
        let old_parent = self.parent(id);
        if let Some(list) = self.siblings_mut(old_parent) {
            list.retain(|c| *c != id);
        }
        if let Some(list) = self.siblings_mut(new_parent) {
            list.push(id);
        }
        self.controls[id].parent = new_parent;
        self.refresh_render_rects(id);
        tracing::debug!(?id, ?old_parent, ?new_parent, "control reparented");
        true
    }

    ////////////////////////////////////////////////////////////////////////////
    // geometry
    ////////////////////////////////////////////////////////////////////////////

    /// Recomputes the render rectangles of `id` and its descendants from their local rectangles.
    fn refresh_render_rects(&mut self, id: ControlId) {
        let mut stack = vec![id];
        while let Some(c) = stack.pop() {
            let origin = self.parent(c).and_then(|p| self.controls.get(p)).map(|p| vec2(p.render_rect.x, p.render_rect.y)).unwrap_or_default();
            if let Some(control) = self.controls.get_mut(c) {
                control.render_rect = translate_rect(control.rect, origin.x, origin.y);
                stack.extend(control.children.iter().copied());
            }
        }
    }

    fn set_rect(&mut self, id: ControlId, r: Recti) -> bool {
        let (resized, is_window) = match self.controls.get_mut(id) {
            Some(c) => {
                let resized = c.rect.width != r.width || c.rect.height != r.height;
                c.rect = r;
                (resized, matches!(c.kind, ControlKind::Window(_)))
            }
            None => return false,
        };
        self.refresh_render_rects(id);
        if resized {
            self.controls[id].compose();
            if is_window {
                self.anchor_close_button(id);
            }
        }
        true
    }

    /// Sets the position relative to the parent.
    pub fn set_position(&mut self, id: ControlId, x: i32, y: i32) -> bool {
        match self.control(id) {
            Some(c) => self.set_rect(id, rect(x, y, c.rect.width, c.rect.height)),
            None => false,
        }
    }

    /// Sets the horizontal position relative to the parent.
    pub fn set_x(&mut self, id: ControlId, x: i32) -> bool {
        match self.control(id) {
            Some(c) => self.set_position(id, x, c.rect.y),
            None => false,
        }
    }

    /// Sets the vertical position relative to the parent.
    pub fn set_y(&mut self, id: ControlId, y: i32) -> bool {
        match self.control(id) {
            Some(c) => self.set_position(id, c.rect.x, y),
            None => false,
        }
    }

    /// Resizes a control, rebuilding its visuals.
    pub fn set_size(&mut self, id: ControlId, width: i32, height: i32) -> bool {
        match self.control(id) {
            Some(c) => self.set_rect(id, rect(c.rect.x, c.rect.y, width, height)),
            None => false,
        }
    }

    /// Sets the width, rebuilding the visuals.
    pub fn set_width(&mut self, id: ControlId, width: i32) -> bool {
        match self.control(id) {
            Some(c) => self.set_size(id, width, c.rect.height),
            None => false,
        }
    }

    /// Sets the height, rebuilding the visuals.
    pub fn set_height(&mut self, id: ControlId, height: i32) -> bool {
        match self.control(id) {
            Some(c) => self.set_size(id, c.rect.width, height),
            None => false,
        }
    }

    /// Moves a control by `(dx, dy)`, translating the cached render rectangles of its subtree.
    pub fn move_by(&mut self, id: ControlId, dx: i32, dy: i32) -> bool {
        match self.controls.get_mut(id) {
            Some(c) => c.rect = translate_rect(c.rect, dx, dy),
            None => return false,
        }
        for c in self.subtree(id) {
            let control = &mut self.controls[c];
            control.render_rect = translate_rect(control.render_rect, dx, dy);
        }
        true
    }

    ////////////////////////////////////////////////////////////////////////////
    // state
    ////////////////////////////////////////////////////////////////////////////

    /// Shows or hides a control. Hiding also resets its interaction state.
    pub fn set_visible(&mut self, id: ControlId, visible: bool) -> bool {
        match self.controls.get_mut(id) {
            Some(c) => c.visible = visible,
            None => return false,
        }
        if !visible {
            self.reset(id);
        }
        true
    }

    /// Activates or deactivates a control.
    ///
    /// Activation first activates the parent chain, deactivates every sibling, brings the control
    /// to the top of its siblings and fires its activation callback. Deactivation clears the whole
    /// subtree.
    pub fn set_active(&mut self, id: ControlId, value: bool) {
        if !self.contains(id) {
            return;
        }
        if value {
            let parent = self.parent(id);
            if let Some(p) = parent {
                self.set_active(p, true);
            }
            for sibling in self.siblings(parent) {
                self.set_active(sibling, false);
            }
            if let Some(list) = self.siblings_mut(parent) {
                list.retain(|c| *c != id);
                list.push(id);
            }
            if let Some(c) = self.controls.get_mut(id) {
                c.active = true;
            }
            tracing::trace!(?id, "control activated");
            self.fire(id, |c| c.on_activated.clone());
        } else {
            for child in self.children(id).to_vec() {
                self.set_active(child, false);
            }
            if let Some(c) = self.controls.get_mut(id) {
                c.active = false;
            }
        }
    }

    /// Clears hover, press and activation on `id` and its descendants.
    pub fn reset(&mut self, id: ControlId) {
        for c in self.subtree(id) {
            let control = &mut self.controls[c];
            control.hovered = false;
            control.clicked = false;
            control.active = false;
        }
    }

    fn fire(&mut self, id: ControlId, pick: impl Fn(&Control) -> Option<Callback>) {
        if let Some(cb) = self.controls.get(id).and_then(pick) {
            cb(self, id);
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    // callbacks
    ////////////////////////////////////////////////////////////////////////////

    /// Binds the callback fired when a press lands on the control.
    pub fn set_on_mouse_down(&mut self, id: ControlId, f: impl Fn(&mut Ui, ControlId) + 'static) -> bool {
        self.controls.get_mut(id).map(|c| c.on_mouse_down = Some(Rc::new(f))).is_some()
    }

    /// Binds the callback fired on release after a press on the control.
    pub fn set_on_mouse_up(&mut self, id: ControlId, f: impl Fn(&mut Ui, ControlId) + 'static) -> bool {
        self.controls.get_mut(id).map(|c| c.on_mouse_up = Some(Rc::new(f))).is_some()
    }

    /// Binds the callback fired when the control becomes active.
    pub fn set_on_activated(&mut self, id: ControlId, f: impl Fn(&mut Ui, ControlId) + 'static) -> bool {
        self.controls.get_mut(id).map(|c| c.on_activated = Some(Rc::new(f))).is_some()
    }

    /// Binds the value-change callback of a checkbox.
    pub fn set_on_changed_value(&mut self, id: ControlId, f: impl Fn(&mut Ui, ControlId) + 'static) -> bool {
        match self.controls.get_mut(id).map(|c| &mut c.kind) {
            Some(ControlKind::CheckBox(cb)) => {
                cb.on_changed_value = Some(Rc::new(f));
                true
            }
            _ => false,
        }
    }

    /// Binds the text-change callback of a textbox.
    pub fn set_on_changed_text(&mut self, id: ControlId, f: impl Fn(&mut Ui, ControlId) + 'static) -> bool {
        match self.controls.get_mut(id).map(|c| &mut c.kind) {
            Some(ControlKind::Textbox(tb)) => {
                tb.on_changed_text = Some(Rc::new(f));
                true
            }
            _ => false,
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    // kind specific
    ////////////////////////////////////////////////////////////////////////////

    /// Replaces the text of a button, checkbox, label or textbox, or the caption of a window.
    ///
    /// Textboxes fire their text-change callback when the text differs.
    pub fn set_text(&mut self, id: ControlId, text: &str) -> bool {
        let Some(c) = self.controls.get_mut(id) else {
            return false;
        };
        let mut changed = false;
        match &mut c.kind {
            ControlKind::Container => return false,
            ControlKind::Button(b) => b.set_text(text),
            ControlKind::CheckBox(cb) => cb.set_text(text),
            ControlKind::Label(l) => l.set_text(text),
            ControlKind::Textbox(tb) => changed = tb.set_text(text, &c.theme),
            ControlKind::Window(w) => w.set_caption(text),
        }
        if changed {
            self.fire(id, |c| c.as_textbox().and_then(|t| t.on_changed_text.clone()));
        }
        true
    }

    /// Sets the caption of a window.
    pub fn set_caption(&mut self, id: ControlId, caption: &str) -> bool {
        match self.controls.get_mut(id).map(|c| &mut c.kind) {
            Some(ControlKind::Window(w)) => {
                w.set_caption(caption);
                true
            }
            _ => false,
        }
    }

    /// Sets the value of a checkbox, firing its callback when the value changes.
    pub fn set_checked(&mut self, id: ControlId, checked: bool) -> bool {
        let changed = match self.controls.get_mut(id).map(|c| &mut c.kind) {
            Some(ControlKind::CheckBox(cb)) => cb.set_checked(checked),
            _ => return false,
        };
        if changed {
            self.fire(id, |c| c.as_checkbox().and_then(|cb| cb.on_changed_value.clone()));
        }
        true
    }

    /// Switches password masking of a textbox. No callback fires.
    pub fn set_password(&mut self, id: ControlId, password: bool) -> bool {
        let Some(c) = self.controls.get_mut(id) else {
            return false;
        };
        match &mut c.kind {
            ControlKind::Textbox(tb) => {
                tb.set_password(password, &c.theme);
                true
            }
            _ => false,
        }
    }

    /// Replaces the input filter of a textbox.
    pub fn set_filter(&mut self, id: ControlId, filter: InputFilter) -> bool {
        match self.controls.get_mut(id).map(|c| &mut c.kind) {
            Some(ControlKind::Textbox(tb)) => {
                tb.set_filter(filter);
                true
            }
            _ => false,
        }
    }

    /// Moves the cursor of a textbox, clamped to the text length.
    pub fn set_cursor(&mut self, id: ControlId, cursor: usize) -> bool {
        let Some(c) = self.controls.get_mut(id) else {
            return false;
        };
        match &mut c.kind {
            ControlKind::Textbox(tb) => {
                tb.set_cursor(cursor, &c.theme);
                true
            }
            _ => false,
        }
    }

    /// Sets the background fill of a label.
    pub fn set_background(&mut self, id: ControlId, background: Option<Color>) -> bool {
        match self.controls.get_mut(id).map(|c| &mut c.kind) {
            Some(ControlKind::Label(l)) => {
                l.set_background(background);
                true
            }
            _ => false,
        }
    }

    /// Sets whether a window can be dragged by its title strip.
    pub fn set_movable(&mut self, id: ControlId, movable: bool) -> bool {
        let Some(c) = self.controls.get_mut(id) else {
            return false;
        };
        match &mut c.kind {
            ControlKind::Window(w) => {
                w.set_movable(movable);
                c.compose();
                true
            }
            _ => false,
        }
    }

    /// Shows or hides the close button of a window, creating it on first use.
    pub fn set_closable(&mut self, id: ControlId, closable: bool) -> bool {
        match self.controls.get_mut(id).map(|c| &mut c.kind) {
            Some(ControlKind::Window(w)) => w.set_closable(closable),
            _ => return false,
        }
        self.sync_close_button(id);
        true
    }

    /// Hides a window. Its state and children are kept for a later [`Ui::set_visible`].
    pub fn close_window(&mut self, id: ControlId) -> bool {
        let closed = self.set_visible(id, false);
        if closed {
            tracing::debug!(?id, "window closed");
        }
        closed
    }

    fn sync_close_button(&mut self, id: ControlId) {
        let (closable, existing, theme, width) = match self.controls.get(id) {
            Some(Control { kind: ControlKind::Window(w), theme, rect: r, .. }) => (w.is_closable(), w.close_button, theme.clone(), r.width),
            _ => return,
        };
        match (closable, existing) {
            (true, Some(button)) => {
                self.set_visible(button, true);
            }
            (false, Some(button)) => {
                self.set_visible(button, false);
            }
            (true, None) => {
                let size = theme.style().close_button_size;
                let button = Control::close_button(&theme, rect(width - size, 0, size, size)).with_on_mouse_up(move |ui, _| {
                    ui.close_window(id);
                });
                let button = self.attach(Some(id), button);
                if let Some(ControlKind::Window(w)) = self.controls.get_mut(id).map(|c| &mut c.kind) {
                    w.close_button = Some(button);
                }
            }
            (false, None) => (),
        }
    }

    fn anchor_close_button(&mut self, id: ControlId) {
        let (button, width, size) = match self.controls.get(id) {
            Some(Control { kind: ControlKind::Window(w), theme, rect: r, .. }) => (w.close_button, r.width, theme.style().close_button_size),
            _ => return,
        };
        if let Some(button) = button {
            self.set_rect(button, rect(width - size, 0, size, size));
        }
    }

    /// Rebuilds the visuals of `id` and its descendants from `theme`.
    pub fn apply_theme(&mut self, id: ControlId, theme: &Theme) -> bool {
        if !self.contains(id) {
            return false;
        }
        let ids = self.subtree(id);
        for c in &ids {
            let control = &mut self.controls[*c];
            control.theme = theme.clone();
            control.compose();
        }
        for c in ids {
            self.anchor_close_button(c);
        }
        tracing::debug!(?id, "theme applied");
        true
    }

    ////////////////////////////////////////////////////////////////////////////
    // input
    ////////////////////////////////////////////////////////////////////////////

    /// Runs one update with the current time, see [`Ui::update_at`].
    pub fn update(&mut self, input: &mut Input) { self.update_at(input, Instant::now()) }

    /// Drains the queued input and dispatches it through the tree.
    ///
    /// Every event runs one pass with the pointer position it carries. Without events a single
    /// pass refreshes hover state and cursor blinking.
    pub fn update_at(&mut self, input: &mut Input, now: Instant) {
        let events = input.drain();
        if events.is_empty() {
            self.pointer = input.mouse_pos();
            self.dispatch(None, None, now);
            return;
        }
        for event in events {
            if let Some(pos) = event.pointer() {
                self.pointer = pos;
            }
            self.dispatch(None, Some(event), now);
        }
    }

    /// Updates the children of `parent` from the top-most down to the first one under the pointer,
    /// then resets all the others.
    fn dispatch(&mut self, parent: Option<ControlId>, event: Option<Event>, now: Instant) {
        let level = self.siblings(parent);
        for &child in level.iter().rev() {
            // callbacks may have removed or moved it earlier in this pass
            if self.parent(child) != parent || !self.contains(child) {
                continue;
            }
            self.update_control(child, event, now);
            let pointer = self.pointer;
            let hit = self.controls.get(child).map(|c| c.visible && rect_contains(&c.render_rect, pointer)).unwrap_or(false);
            if hit {
                for &other in &level {
                    if other != child {
                        self.reset(other);
                    }
                }
                break;
            }
        }
    }

    fn update_control(&mut self, id: ControlId, event: Option<Event>, now: Instant) {
        let is_window = match self.controls.get(id) {
            Some(c) if c.visible => matches!(c.kind, ControlKind::Window(_)),
            _ => return,
        };
        if is_window {
            self.update_drag(id, event);
        }
        self.update_pointer_state(id, event);
        self.update_textbox(id, event, now);
        if self.controls.get(id).map(|c| c.visible && !c.children.is_empty()).unwrap_or(false) {
            self.dispatch(Some(id), event, now);
        }
    }

    fn update_drag(&mut self, id: ControlId, event: Option<Event>) {
        let pointer = self.pointer;
        let (strip, movable, moving) = match self.controls.get(id) {
            Some(Control { kind: ControlKind::Window(w), theme, render_rect, .. }) => (w.drag_strip(*render_rect, theme.style()), w.is_movable(), w.is_moving()),
            _ => return,
        };
        let set_moving = |ui: &mut Ui, value: bool| {
            if let Some(ControlKind::Window(w)) = ui.controls.get_mut(id).map(|c| &mut c.kind) {
                w.set_moving(value);
            }
        };
        match event {
            Some(Event::MouseDown { button, .. }) if button.is_left() && movable && rect_contains(&strip, pointer) => {
                set_moving(self, true);
                tracing::debug!(?id, "window drag started");
            }
            Some(Event::MouseUp { .. }) if moving => {
                set_moving(self, false);
                tracing::debug!(?id, "window drag stopped");
            }
            Some(Event::MouseMotion { delta, .. }) if moving => {
                self.move_by(id, delta.x, delta.y);
            }
            _ => (),
        }
    }

    fn update_pointer_state(&mut self, id: ControlId, event: Option<Event>) {
        let pointer = self.pointer;
        let Some(c) = self.controls.get_mut(id) else {
            return;
        };
        let inside = rect_contains(&c.render_rect, pointer);
        if inside != c.hovered {
            c.hovered = inside;
            if !inside {
                // dragging out cancels the pending click
                c.clicked = false;
            }
        }
        match event {
            Some(Event::MouseDown { .. }) if c.hovered => {
                if !c.clicked {
                    c.clicked = true;
                    self.press(id);
                }
            }
            Some(Event::MouseDown { .. }) => self.set_active(id, false),
            Some(Event::MouseUp { .. }) if c.clicked => {
                c.clicked = false;
                self.fire(id, |c| c.on_mouse_up.clone());
            }
            _ => (),
        }
    }

    fn press(&mut self, id: ControlId) {
        let toggled = match self.controls.get_mut(id).map(|c| &mut c.kind) {
            Some(ControlKind::CheckBox(cb)) => {
                let value = !cb.is_checked();
                cb.set_checked(value)
            }
            _ => false,
        };
        if toggled {
            self.fire(id, |c| c.as_checkbox().and_then(|cb| cb.on_changed_value.clone()));
        }
        self.set_active(id, true);
        self.fire(id, |c| c.on_mouse_down.clone());
    }

    fn update_textbox(&mut self, id: ControlId, event: Option<Event>, now: Instant) {
        let pointer = self.pointer;
        let Some(c) = self.controls.get_mut(id) else {
            return;
        };
        let (active, hovered, r) = (c.active, c.hovered, c.render_rect);
        let interval = c.theme.style().cursor_blink;
        let ControlKind::Textbox(tb) = &mut c.kind else {
            return;
        };
        let mut changed = false;
        match event {
            Some(Event::MouseDown { button, .. }) if hovered && button.is_left() => tb.place_cursor(pointer.x, r, &c.theme, now),
            Some(Event::KeyDown { key, ch, .. }) if active => changed = tb.handle_key(key, ch, &c.theme, now),
            _ => (),
        }
        tb.blink(active, interval, now);
        if changed {
            self.fire(id, |c| c.as_textbox().and_then(|t| t.on_changed_text.clone()));
        }
    }

    ////////////////////////////////////////////////////////////////////////////
    // drawing
    ////////////////////////////////////////////////////////////////////////////

    /// Draws every visible control, parents before children and siblings in list order.
    pub fn draw<R: Renderer>(&self, canvas: &mut Canvas<R>) {
        for &id in &self.roots {
            self.draw_control(id, canvas);
        }
    }

    fn draw_control<R: Renderer>(&self, id: ControlId, canvas: &mut Canvas<R>) {
        let Some(c) = self.controls.get(id) else {
            return;
        };
        if !c.visible {
            return;
        }
        crate::widgets::draw_kind(c, canvas);
        for &child in &c.children {
            self.draw_control(child, canvas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    fn log() -> Log { Rc::new(RefCell::new(Vec::new())) }

    fn recorder(log: &Log, what: &str) -> impl Fn(&mut Ui, ControlId) + 'static {
        let log = log.clone();
        let what = what.to_string();
        move |_, _| log.borrow_mut().push(what.clone())
    }

    fn count(log: &Log, what: &str) -> usize { log.borrow().iter().filter(|s| s.as_str() == what).count() }

    fn assert_render_rect(ui: &Ui, id: ControlId, expected: (i32, i32, i32, i32)) {
        let r = ui.control(id).unwrap().render_rect();
        assert_eq!((r.x, r.y, r.width, r.height), expected);
    }

    fn flag(ui: &Ui, id: ControlId, f: fn(&Control) -> bool) -> bool { ui.control(id).map(f).unwrap_or(false) }

    fn click(ui: &mut Ui, input: &mut Input, x: i32, y: i32) {
        input.mousedown(x, y, MouseButton::LEFT);
        input.mouseup(x, y, MouseButton::LEFT);
        ui.update(input);
    }

    #[test]
    fn render_rects_follow_the_parent_chain() {
        let theme = Theme::default();
        let mut ui = Ui::new();
        let win = ui.add_root(Control::window(&theme, rect(10, 10, 200, 100), "w").with_closable(false));
        let group = ui.add_control(win, Control::container(&theme, rect(5, 5, 100, 50))).unwrap();
        let button = ui.add_control(group, Control::button(&theme, rect(3, 4, 10, 10), "b")).unwrap();
        assert_render_rect(&ui, button, (18, 19, 10, 10));

        ui.set_position(win, 20, 30);
        assert_render_rect(&ui, button, (28, 39, 10, 10));
        ui.move_by(win, 2, 3);
        assert_render_rect(&ui, group, (27, 38, 100, 50));
        assert_render_rect(&ui, button, (30, 42, 10, 10));
        ui.set_x(group, 0);
        assert_render_rect(&ui, button, (25, 42, 10, 10));
        ui.set_size(button, 30, 12);
        assert_render_rect(&ui, button, (25, 42, 30, 12));

        assert!(ui.reparent(button, None));
        assert_render_rect(&ui, button, (3, 4, 30, 12));
        assert_eq!(ui.roots().last().copied(), Some(button));
        assert!(ui.reparent(button, Some(win)));
        assert_render_rect(&ui, button, (25, 37, 30, 12));
        assert_eq!(ui.parent(button), Some(win));
    }

    #[test]
    fn reparent_rejects_cycles() {
        let theme = Theme::default();
        let mut ui = Ui::new();
        let a = ui.add_root(Control::container(&theme, rect(0, 0, 10, 10)));
        let b = ui.add_control(a, Control::container(&theme, rect(0, 0, 10, 10))).unwrap();
        assert!(!ui.reparent(a, Some(b)));
        assert!(!ui.reparent(a, Some(a)));
        assert_eq!(ui.parent(b), Some(a));
    }

    #[test]
    fn hover_goes_to_the_top_most_child_only() {
        let theme = Theme::default();
        let mut ui = Ui::new();
        let mut input = Input::default();
        let group = ui.add_root(Control::container(&theme, rect(0, 0, 100, 100)));
        let a = ui.add_control(group, Control::button(&theme, rect(10, 10, 40, 40), "a")).unwrap();
        let b = ui.add_control(group, Control::button(&theme, rect(30, 30, 40, 40), "b")).unwrap();

        input.mousemove(35, 35);
        ui.update(&mut input);
        assert!(flag(&ui, b, Control::is_hovered));
        assert!(!flag(&ui, a, Control::is_hovered));

        // bring a to the front: it now wins the overlap
        ui.set_active(a, true);
        ui.update(&mut input);
        assert!(flag(&ui, a, Control::is_hovered));
        assert!(!flag(&ui, b, Control::is_hovered));

        input.mousemove(60, 60);
        ui.update(&mut input);
        assert!(flag(&ui, b, Control::is_hovered));
        assert!(!flag(&ui, a, Control::is_hovered));
    }

    #[test]
    fn press_and_release_inside_a_window_button() {
        let theme = Theme::default();
        let events = log();
        let mut ui = Ui::new();
        let mut input = Input::default();
        let win = ui.add_root(Control::window(&theme, rect(10, 10, 200, 100), "Window"));
        let button = ui
            .add_control(win, Control::button(&theme, rect(5, 5, 50, 20), "OK").with_on_mouse_down(recorder(&events, "down")).with_on_mouse_up(recorder(&events, "up")))
            .unwrap();

        input.mousemove(30, 20);
        ui.update(&mut input);
        assert!(flag(&ui, button, Control::is_hovered));
        let close = ui.control(win).and_then(|c| c.as_window()).and_then(|w| w.close_button()).unwrap();
        assert!(!flag(&ui, close, Control::is_hovered));

        input.mousedown(30, 20, MouseButton::LEFT);
        ui.update(&mut input);
        assert!(flag(&ui, button, Control::is_clicked));
        assert!(flag(&ui, win, Control::is_active));
        assert!(flag(&ui, button, Control::is_active));
        assert_eq!(*events.borrow(), vec!["down".to_string()]);

        input.mouseup(30, 20, MouseButton::LEFT);
        ui.update(&mut input);
        assert!(!flag(&ui, button, Control::is_clicked));
        assert_eq!(*events.borrow(), vec!["down".to_string(), "up".to_string()]);
        assert_eq!(ui.focused(), Some(button));
        // a press that did not move the window
        assert_render_rect(&ui, win, (10, 10, 200, 100));
    }

    #[test]
    fn dragging_out_cancels_the_click() {
        let theme = Theme::default();
        let events = log();
        let mut ui = Ui::new();
        let mut input = Input::default();
        let button = ui.add_root(Control::button(&theme, rect(10, 10, 50, 20), "b").with_on_mouse_up(recorder(&events, "up")));

        input.mousedown(20, 20, MouseButton::LEFT);
        ui.update(&mut input);
        assert!(flag(&ui, button, Control::is_clicked));
        input.mousemove(100, 100);
        ui.update(&mut input);
        assert!(!flag(&ui, button, Control::is_clicked));
        input.mousemove(20, 20);
        input.mouseup(20, 20, MouseButton::LEFT);
        ui.update(&mut input);
        assert_eq!(count(&events, "up"), 0);

        // release without any press
        input.mouseup(20, 20, MouseButton::LEFT);
        ui.update(&mut input);
        assert_eq!(count(&events, "up"), 0);

        click(&mut ui, &mut input, 20, 20);
        assert_eq!(count(&events, "up"), 1);
    }

    #[test]
    fn activation_is_exclusive_among_siblings() {
        let theme = Theme::default();
        let events = log();
        let mut ui = Ui::new();
        let parent = ui.add_root(Control::container(&theme, rect(0, 0, 300, 300)));
        let a = ui.add_control(parent, Control::button(&theme, rect(0, 0, 10, 10), "a").with_on_activated(recorder(&events, "a"))).unwrap();
        let b = ui.add_control(parent, Control::button(&theme, rect(20, 0, 10, 10), "b")).unwrap();
        let c = ui.add_control(parent, Control::button(&theme, rect(40, 0, 10, 10), "c")).unwrap();

        ui.set_active(a, true);
        assert!(flag(&ui, a, Control::is_active) && flag(&ui, parent, Control::is_active));
        assert!(!flag(&ui, b, Control::is_active) && !flag(&ui, c, Control::is_active));
        assert_eq!(ui.children(parent), &[b, c, a]);
        assert_eq!(count(&events, "a"), 1);

        ui.set_active(b, true);
        assert!(flag(&ui, b, Control::is_active));
        assert!(!flag(&ui, a, Control::is_active));
        assert_eq!(ui.children(parent), &[c, a, b]);

        ui.set_active(parent, false);
        assert!(!flag(&ui, b, Control::is_active));
        assert_eq!(ui.focused(), None);
    }

    #[test]
    fn pressing_elsewhere_deactivates() {
        let theme = Theme::default();
        let mut ui = Ui::new();
        let mut input = Input::default();
        let a = ui.add_root(Control::button(&theme, rect(0, 0, 10, 10), "a"));
        let b = ui.add_root(Control::button(&theme, rect(50, 50, 10, 10), "b"));
        click(&mut ui, &mut input, 5, 5);
        assert!(flag(&ui, a, Control::is_active));
        assert_eq!(ui.roots(), &[b, a]);
        click(&mut ui, &mut input, 200, 200);
        assert!(!flag(&ui, a, Control::is_active));
        assert!(!flag(&ui, b, Control::is_active));
    }

    #[test]
    fn textbox_edits_while_active() {
        let theme = Theme::default();
        let events = log();
        let mut ui = Ui::new();
        let mut input = Input::default();
        let tb = ui.add_root(Control::textbox(&theme, rect(10, 10, 100, 20), "").with_on_changed_text(recorder(&events, "text")));
        let textbox = |ui: &Ui| ui.control(tb).and_then(|c| c.as_textbox()).cloned().unwrap();

        // inactive textboxes ignore typing
        input.text("x");
        ui.update(&mut input);
        assert_eq!(textbox(&ui).text(), "");

        click(&mut ui, &mut input, 15, 15);
        assert!(flag(&ui, tb, Control::is_active));
        input.text("abc");
        ui.update(&mut input);
        assert_eq!((textbox(&ui).text().to_string(), textbox(&ui).cursor()), ("abc".to_string(), 3));
        assert_eq!(count(&events, "text"), 3);

        for _ in 0..3 {
            input.keydown(Key::Backspace, KeyMode::NONE);
        }
        ui.update(&mut input);
        assert_eq!((textbox(&ui).text().to_string(), textbox(&ui).cursor()), (String::new(), 0));
        assert_eq!(count(&events, "text"), 6);

        // programmatic changes fire only when the text differs
        ui.set_text(tb, "hello");
        ui.set_text(tb, "hello");
        assert_eq!(count(&events, "text"), 7);
        ui.set_password(tb, true);
        assert_eq!(count(&events, "text"), 7);
        assert_eq!(textbox(&ui).display_text(theme.style()), "*****");
    }

    #[test]
    fn close_button_hides_the_window() {
        let theme = Theme::default();
        let mut ui = Ui::new();
        let mut input = Input::default();
        let win = ui.add_root(Control::window(&theme, rect(10, 10, 200, 100), "w"));
        let child = ui.add_control(win, Control::label(&theme, 8, 20, "hi")).unwrap();
        let close = ui.control(win).and_then(|c| c.as_window()).and_then(|w| w.close_button()).unwrap();
        assert_render_rect(&ui, close, (194, 10, 16, 16));

        click(&mut ui, &mut input, 200, 15);
        assert!(!flag(&ui, win, Control::is_visible));
        assert!(ui.contains(child));
        assert_eq!(ui.children(win).len(), 2);

        ui.set_visible(win, true);
        ui.set_closable(win, false);
        assert!(!flag(&ui, close, Control::is_visible));
        click(&mut ui, &mut input, 200, 15);
        assert!(flag(&ui, win, Control::is_visible));
        ui.set_closable(win, true);
        assert!(flag(&ui, close, Control::is_visible));
        assert_eq!(ui.children(win).len(), 2);
    }

    #[test]
    fn title_strip_drags_the_subtree() {
        let theme = Theme::default();
        let mut ui = Ui::new();
        let mut input = Input::default();
        let win = ui.add_root(Control::window(&theme, rect(10, 10, 200, 100), "w"));
        let button = ui.add_control(win, Control::button(&theme, rect(5, 20, 50, 20), "b")).unwrap();

        input.mousedown(50, 15, MouseButton::LEFT);
        ui.update(&mut input);
        assert!(ui.control(win).and_then(|c| c.as_window()).map(|w| w.is_moving()).unwrap());
        input.mousemove(60, 25);
        ui.update(&mut input);
        assert_render_rect(&ui, win, (20, 20, 200, 100));
        assert_render_rect(&ui, button, (25, 40, 50, 20));

        input.mouseup(60, 25, MouseButton::LEFT);
        input.mousemove(70, 35);
        ui.update(&mut input);
        assert_render_rect(&ui, win, (20, 20, 200, 100));

        // presses below the strip or on fixed windows do not drag
        input.mousedown(70, 80, MouseButton::LEFT);
        input.mousemove(80, 90);
        input.mouseup(80, 90, MouseButton::LEFT);
        ui.update(&mut input);
        ui.set_movable(win, false);
        input.mousedown(30, 25, MouseButton::LEFT);
        input.mousemove(40, 35);
        input.mouseup(40, 35, MouseButton::LEFT);
        ui.update(&mut input);
        assert_render_rect(&ui, win, (20, 20, 200, 100));
    }

    #[test]
    fn resize_recomposes_and_reanchors() {
        let theme = Theme::default();
        let mut ui = Ui::new();
        let win = ui.add_root(Control::window(&theme, rect(0, 0, 200, 100), "w"));
        let frame = |ui: &Ui| ui.control(win).and_then(|c| c.as_window()).map(|w| w.frame().clone()).unwrap();

        let before = frame(&ui);
        ui.apply_theme(win, &theme);
        assert_eq!(frame(&ui), before);

        ui.set_size(win, 300, 150);
        assert_eq!(frame(&ui), nine_patch::window_frame(theme.atlas(), true, 300, 150));
        let close = ui.control(win).and_then(|c| c.as_window()).and_then(|w| w.close_button()).unwrap();
        assert_render_rect(&ui, close, (284, 0, 16, 16));
        let again = frame(&ui);
        ui.apply_theme(win, &theme);
        assert_eq!(frame(&ui), again);
    }

    #[test]
    fn checkbox_toggles_on_press() {
        let theme = Theme::default();
        let events = log();
        let mut ui = Ui::new();
        let mut input = Input::default();
        let cb = ui.add_root(Control::checkbox(&theme, 10, 10, "check").with_on_changed_value(recorder(&events, "value")));
        let checked = |ui: &Ui| ui.control(cb).and_then(|c| c.as_checkbox()).map(|c| c.is_checked()).unwrap();

        click(&mut ui, &mut input, 12, 12);
        assert!(checked(&ui));
        click(&mut ui, &mut input, 12, 12);
        assert!(!checked(&ui));
        assert_eq!(count(&events, "value"), 2);

        ui.set_checked(cb, false);
        assert_eq!(count(&events, "value"), 2);
        ui.set_checked(cb, true);
        assert_eq!(count(&events, "value"), 3);
    }

    #[test]
    fn removed_ids_become_no_ops() {
        let theme = Theme::default();
        let mut ui = Ui::new();
        let win = ui.add_root(Control::window(&theme, rect(0, 0, 100, 100), "w"));
        let button = ui.add_control(win, Control::button(&theme, rect(0, 20, 10, 10), "b")).unwrap();
        assert_eq!(ui.len(), 3);

        assert!(ui.remove(win));
        assert!(ui.is_empty());
        assert!(ui.roots().is_empty());
        assert!(!ui.remove(win));
        assert!(!ui.set_visible(button, false));
        assert!(!ui.move_by(button, 1, 1));
        assert!(ui.add_control(win, Control::container(&theme, rect(0, 0, 1, 1))).is_none());
        assert!(ui.children(win).is_empty());
        ui.set_active(button, true);
    }

    #[test]
    fn callbacks_can_restructure_the_tree() {
        let theme = Theme::default();
        let mut ui = Ui::new();
        let mut input = Input::default();
        let group = ui.add_root(Control::container(&theme, rect(0, 0, 100, 100)));
        let doomed = ui.add_control(group, Control::button(&theme, rect(0, 0, 10, 10), "x")).unwrap();
        ui.set_on_mouse_up(doomed, move |ui, id| {
            ui.remove(id);
        });
        click(&mut ui, &mut input, 5, 5);
        assert!(!ui.contains(doomed));
        assert!(ui.children(group).is_empty());
    }

    #[test]
    fn draw_paints_visible_controls_only() {
        let theme = Theme::default();
        let mut ui = Ui::new();
        let win = ui.add_root(Control::window(&theme, rect(10, 10, 100, 60), ""));
        let mut surface = Surface::new(160, 120);
        {
            let mut canvas = Canvas::new(&mut surface, 160, 120);
            canvas.begin(Color::TRANSPARENT);
            ui.draw(&mut canvas);
            canvas.end();
        }
        assert_eq!(surface.bitmap().get(10, 10), theme.atlas().image().get(48, 0));
        assert_eq!(surface.bitmap().get(9, 9), Some(Color::TRANSPARENT));

        ui.set_visible(win, false);
        {
            let mut canvas = Canvas::new(&mut surface, 160, 120);
            canvas.begin(Color::TRANSPARENT);
            ui.draw(&mut canvas);
            canvas.end();
        }
        assert_eq!(surface.bitmap().get(10, 10), Some(Color::TRANSPARENT));
    }
}
