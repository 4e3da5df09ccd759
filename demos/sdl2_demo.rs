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
use std::cell::RefCell;
use std::rc::Rc;

use gameui::*;

use sdl2::event::{Event as SdlEvent, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn map_mouse_button(sdl_mb: sdl2::mouse::MouseButton) -> MouseButton {
    match sdl_mb {
        sdl2::mouse::MouseButton::Left => MouseButton::LEFT,
        sdl2::mouse::MouseButton::Right => MouseButton::RIGHT,
        sdl2::mouse::MouseButton::Middle => MouseButton::MIDDLE,
        _ => MouseButton::NONE,
    }
}

fn map_keymode(sdl_km: sdl2::keyboard::Mod) -> KeyMode {
    let mut mode = KeyMode::NONE;
    if sdl_km.intersects(sdl2::keyboard::Mod::LALTMOD | sdl2::keyboard::Mod::RALTMOD) {
        mode |= KeyMode::ALT;
    }
    if sdl_km.intersects(sdl2::keyboard::Mod::LCTRLMOD | sdl2::keyboard::Mod::RCTRLMOD) {
        mode |= KeyMode::CTRL;
    }
    if sdl_km.intersects(sdl2::keyboard::Mod::LSHIFTMOD | sdl2::keyboard::Mod::RSHIFTMOD) {
        mode |= KeyMode::SHIFT;
    }
    mode
}

fn map_key(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::Backspace => Some(Key::Backspace),
        Keycode::Delete => Some(Key::Delete),
        Keycode::Left => Some(Key::Left),
        Keycode::Right => Some(Key::Right),
        Keycode::Home => Some(Key::Home),
        Keycode::End => Some(Key::End),
        Keycode::Return => Some(Key::Return),
        Keycode::Tab => Some(Key::Tab),
        // printable keys arrive as text input
        _ => None,
    }
}

fn load_theme() -> Theme {
    let font: Rc<dyn Font> = match std::env::args().nth(1) {
        Some(path) => match TrueTypeFont::from_file(path.as_str(), 14.0) {
            Ok(font) => Rc::new(font),
            Err(err) => {
                eprintln!("{}, falling back to the built-in font", err);
                Rc::new(MonoFont::default())
            }
        },
        None => Rc::new(MonoFont::default()),
    };
    Theme::new(AtlasHandle::default_theme(), font, Style::default())
}

fn build_ui(theme: &Theme) -> Ui {
    let mut ui = Ui::new();
    let user = Rc::new(RefCell::new(String::new()));

    let login = ui.add_root(Control::window(theme, rect(60, 60, 300, 190), "Login"));
    ui.add_control(login, Control::label(theme, 16, 32, "User"));
    let user_box = {
        let user = user.clone();
        ui.add_control(
            login,
            Control::textbox(theme, rect(100, 26, 180, 24), "").with_on_changed_text(move |ui, id| {
                if let Some(tb) = ui.control(id).and_then(|c| c.as_textbox()) {
                    *user.borrow_mut() = tb.text().to_string();
                }
            }),
        )
    };
    ui.add_control(login, Control::label(theme, 16, 66, "Password"));
    ui.add_control(login, Control::textbox(theme, rect(100, 60, 180, 24), "").with_password(true).with_filter(InputFilter::Any));
    ui.add_control(login, Control::checkbox(theme, 100, 96, "Remember me"));
    let status = ui.add_control(login, Control::label(theme, 16, 160, "").with_background(color(0, 0, 0, 96)));
    ui.add_control(
        login,
        Control::button(theme, rect(180, 124, 100, 26), "Sign in").with_on_mouse_up(move |ui, _| {
            if let Some(status) = status {
                let message = format!("Welcome, {}", user.borrow());
                ui.set_text(status, message.as_str());
            }
        }),
    );
    if let Some(user_box) = user_box {
        ui.set_active(user_box, true);
    }

    let tools = ui.add_root(Control::window(theme, rect(420, 120, 220, 120), "Tools").with_closable(false));
    ui.add_control(
        tools,
        Control::button(theme, rect(20, 40, 180, 26), "Show login").with_on_mouse_up(move |ui, _| {
            ui.set_visible(login, true);
            ui.set_active(login, true);
        }),
    );
    ui.add_control(tools, Control::checkbox(theme, 20, 80, "Fixed login").with_on_changed_value(move |ui, id| {
        let fixed = ui.control(id).and_then(|c| c.as_checkbox()).map(|c| c.is_checked()).unwrap_or(false);
        ui.set_movable(login, !fixed);
    }));
    ui
}

fn main() -> Result<(), String> {
    let sdl_ctx = sdl2::init()?;
    let video = sdl_ctx.video()?;
    let window = video.window("gameui", WIDTH, HEIGHT).position_centered().build().map_err(|e| e.to_string())?;
    let mut sdl_canvas = window.into_canvas().present_vsync().build().map_err(|e| e.to_string())?;
    let texture_creator = sdl_canvas.texture_creator();
    let mut texture = texture_creator
        .create_texture_streaming(PixelFormatEnum::ABGR8888, WIDTH, HEIGHT)
        .map_err(|e| e.to_string())?;
    video.text_input().start();

    let theme = load_theme();
    let mut ui = build_ui(&theme);
    let mut input = Input::default();
    let mut surface = Surface::new(WIDTH as i32, HEIGHT as i32);

    let mut event_pump = sdl_ctx.event_pump()?;
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                SdlEvent::Quit { .. } | SdlEvent::KeyDown { keycode: Some(Keycode::Escape), .. } => break 'running,
                SdlEvent::Window { win_event: WindowEvent::Close, .. } => break 'running,
                SdlEvent::MouseMotion { x, y, .. } => input.mousemove(x, y),
                SdlEvent::MouseButtonDown { x, y, mouse_btn, .. } => input.mousedown(x, y, map_mouse_button(mouse_btn)),
                SdlEvent::MouseButtonUp { x, y, mouse_btn, .. } => input.mouseup(x, y, map_mouse_button(mouse_btn)),
                SdlEvent::KeyDown { keycode: Some(keycode), keymod, .. } => {
                    if let Some(key) = map_key(keycode) {
                        input.keydown(key, map_keymode(keymod));
                    }
                }
                SdlEvent::TextInput { text, .. } => input.text(text.as_str()),
                _ => {}
            }
        }

        ui.update(&mut input);

        {
            let mut canvas = Canvas::new(&mut surface, WIDTH as i32, HEIGHT as i32);
            canvas.begin(color(0x30, 0x38, 0x40, 255));
            ui.draw(&mut canvas);
            canvas.end();
        }

        texture
            .update(None, surface.rgba_bytes().as_slice(), WIDTH as usize * 4)
            .map_err(|e| e.to_string())?;
        sdl_canvas.copy(&texture, None, None)?;
        sdl_canvas.present();
    }
    Ok(())
}
