use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use twit_twat::SurfaceHandle;

/// Finds the native window the video sink should draw into.
///
/// Only X11 and Wayland are understood, anything else lets the sink open its own window.
pub fn probe(window: &impl HasWindowHandle) -> Option<SurfaceHandle> {
    let handle = match window.window_handle() {
        Ok(handle) => handle,
        Err(err) => {
            log::warn!("cannot get the window handle: {}", err);
            return None;
        }
    };

    let surface = match handle.as_raw() {
        RawWindowHandle::Xlib(handle) => SurfaceHandle::X11(handle.window as u64),
        RawWindowHandle::Xcb(handle) => SurfaceHandle::X11(handle.window.get() as u64),
        RawWindowHandle::Wayland(handle) => SurfaceHandle::Wayland(handle.surface.as_ptr() as usize),
        raw => {
            log::warn!("unsupported window system: {:?}", raw);
            return None;
        }
    };

    log::debug!("rendering into {:?}", surface);
    Some(surface)
}
