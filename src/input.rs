#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// Leave fullscreen and maximized
    Escape,
    Quit,
    VolumeUp,
    VolumeDown,
    EnterChannel,
    SetSpeedCap,
    ShowControls,
    /// Primary button double click
    DoubleClick,
    /// The window manager wants the window gone
    Close,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct WindowState {
    pub maximized: bool,
    pub fullscreen: bool,
}

pub trait Window {
    fn state(&self) -> WindowState;
    fn set_fullscreen(&mut self, fullscreen: bool);
    fn set_maximized(&mut self, maximized: bool);
    fn close(&mut self);
}

impl Gesture {
    /// Applies the gestures that only concern the window. Returns `false` for the rest.
    pub fn apply_to_window(self, window: &mut dyn Window) -> bool {
        match self {
            Self::Escape => {
                window.set_maximized(false);
                window.set_fullscreen(false);
            }
            Self::DoubleClick => match window.state() {
                WindowState {
                    maximized: true, ..
                } => window.set_maximized(false),
                WindowState {
                    fullscreen: true, ..
                } => window.set_fullscreen(false),
                _ => window.set_fullscreen(true),
            },
            _ => return false,
        }
        true
    }
}
