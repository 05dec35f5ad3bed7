use std::sync::{Arc, OnceLock};

/// A native window the engine can draw into
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SurfaceHandle {
    /// An X11 window id
    X11(u64),
    /// A `wl_surface` pointer
    Wayland(usize),
}

impl SurfaceHandle {
    /// The handle as the `guintptr` the video overlay wants
    pub fn raw(self) -> usize {
        match self {
            Self::X11(xid) => xid as usize,
            Self::Wayland(surface) => surface,
        }
    }
}

pub trait SurfaceProvider: Send + Sync {
    fn surface_handle(&self) -> Option<SurfaceHandle>;
}

impl SurfaceProvider for Option<SurfaceHandle> {
    fn surface_handle(&self) -> Option<SurfaceHandle> {
        *self
    }
}

/// Something asking for a window to render into (e.g. a video sink)
pub trait RenderTarget {
    fn set_window_handle(&self, handle: SurfaceHandle);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BusReply {
    /// Let the message continue to the bus
    Pass,
    /// The message was handled here
    Drop,
}

/// Answers the render target request of a single session.
///
/// This is called from the engine's streaming threads, synchronously.
pub struct SurfaceBinder {
    provider: Arc<dyn SurfaceProvider>,
    choice: OnceLock<Option<SurfaceHandle>>,
}

impl SurfaceBinder {
    pub fn new(provider: Arc<dyn SurfaceProvider>) -> Self {
        Self {
            provider,
            choice: OnceLock::new(),
        }
    }

    pub fn bind(&self, target: &dyn RenderTarget) -> BusReply {
        let choice = *self.choice.get_or_init(|| {
            let handle = self.provider.surface_handle();
            log::debug!("render target bound to {:?}", handle);
            handle
        });

        match choice {
            Some(handle) => {
                target.set_window_handle(handle);
                BusReply::Drop
            }
            None => {
                log::warn!("no native window available, the video sink will open its own");
                BusReply::Pass
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    struct Provider {
        calls: AtomicUsize,
        handles: Mutex<Vec<SurfaceHandle>>,
    }

    impl SurfaceProvider for Provider {
        fn surface_handle(&self) -> Option<SurfaceHandle> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            self.handles.lock().unwrap().get(n).copied()
        }
    }

    #[derive(Default)]
    struct Sink(Mutex<Vec<SurfaceHandle>>);

    impl RenderTarget for Sink {
        fn set_window_handle(&self, handle: SurfaceHandle) {
            self.0.lock().unwrap().push(handle)
        }
    }

    #[test]
    fn decides_once() {
        let provider = Arc::new(Provider {
            calls: AtomicUsize::new(0),
            handles: Mutex::new(vec![SurfaceHandle::Wayland(0xdead), SurfaceHandle::X11(42)]),
        });
        let binder = SurfaceBinder::new(provider.clone());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        let sink = Sink::default();
        assert_eq!(binder.bind(&sink), BusReply::Drop);
        assert_eq!(binder.bind(&sink), BusReply::Drop);

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *sink.0.lock().unwrap(),
            [SurfaceHandle::Wayland(0xdead), SurfaceHandle::Wayland(0xdead)]
        );
    }

    #[test]
    fn passes_without_a_window() {
        let binder = SurfaceBinder::new(Arc::new(None::<SurfaceHandle>));
        let sink = Sink::default();
        assert_eq!(binder.bind(&sink), BusReply::Pass);
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[test]
    fn raw_handles() {
        assert_eq!(SurfaceHandle::X11(0x1c00007).raw(), 0x1c00007);
        assert_eq!(SurfaceHandle::Wayland(0x5555_0000).raw(), 0x5555_0000);
    }
}
