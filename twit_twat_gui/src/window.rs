use eframe::egui::{self, Key, PointerButton, ViewportCommand};
use twit_twat::{Gesture, Wake, Window, WindowState};

/// The root viewport, seen through the core's [`Window`]
pub struct ViewportWindow<'a>(pub &'a egui::Context);

impl Window for ViewportWindow<'_> {
    fn state(&self) -> WindowState {
        self.0.input(|i| WindowState {
            maximized: i.viewport().maximized.unwrap_or(false),
            fullscreen: i.viewport().fullscreen.unwrap_or(false),
        })
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.0
            .send_viewport_cmd(ViewportCommand::Fullscreen(fullscreen))
    }

    fn set_maximized(&mut self, maximized: bool) {
        self.0.send_viewport_cmd(ViewportCommand::Maximized(maximized))
    }

    fn close(&mut self) {
        self.0.send_viewport_cmd(ViewportCommand::Close)
    }
}

/// Wakes up the ui thread when something lands in the event queue
pub struct Repaint(pub egui::Context);

impl Wake for Repaint {
    fn wake(&self) {
        self.0.request_repaint()
    }
}

const KEYS: [(Key, Gesture); 7] = [
    (Key::Escape, Gesture::Escape),
    (Key::Q, Gesture::Quit),
    (Key::Plus, Gesture::VolumeUp),
    (Key::Minus, Gesture::VolumeDown),
    (Key::G, Gesture::EnterChannel),
    (Key::S, Gesture::SetSpeedCap),
    (Key::H, Gesture::ShowControls),
];

/// The gestures made during this frame
pub fn gestures(ctx: &egui::Context) -> Vec<Gesture> {
    ctx.input(|i| {
        let mut gestures = KEYS
            .iter()
            .filter(|(key, _)| i.key_pressed(*key))
            .map(|&(_, gesture)| gesture)
            .collect::<Vec<_>>();

        if i.pointer.button_double_clicked(PointerButton::Primary) {
            gestures.push(Gesture::DoubleClick);
        }
        gestures
    })
}
