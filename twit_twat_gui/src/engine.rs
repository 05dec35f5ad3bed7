use std::sync::Arc;

use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_video as gst_video;
use gstreamer_video::prelude::*;

use twit_twat::{
    Backend, BusReply, Engine, EngineConfig, EngineError, EngineState, Event, EventSender,
    Notification, RenderTarget, SessionId, SurfaceBinder, SurfaceHandle, SurfaceProvider,
};

/// Lets the nvidia decoders win over the software ones, when they are installed
pub fn prefer_hardware_decoding() {
    if let Some(feature) = gst::Registry::get().lookup_feature("nvdec") {
        log::info!("preferring nvdec");
        feature.set_rank(gst::Rank::PRIMARY + 256);
    }
}

/// Makes a `playbin` for every session
pub struct Playbins {
    surface: Arc<dyn SurfaceProvider>,
    events: EventSender,
}

impl Playbins {
    pub fn new(surface: Arc<dyn SurfaceProvider>, events: EventSender) -> Self {
        Self { surface, events }
    }
}

impl Backend for Playbins {
    type Engine = Playbin;

    fn create(&mut self, id: SessionId, config: &EngineConfig) -> Result<Playbin, EngineError> {
        let playbin = gst::ElementFactory::make("playbin")
            .name(id.to_string())
            .property("uri", config.uri.as_str())
            .build()
            .map_err(|err| EngineError::Create(err.to_string()))?;

        let latency = i64::try_from(config.latency.as_nanos()).unwrap_or(i64::MAX);
        playbin.set_property("buffer-duration", latency);
        playbin.set_property("connection-speed", config.connection_speed);

        // otherwise the sink eats the key presses meant for the window
        playbin.connect("element-setup", false, |values| {
            let element = values.get(1)?.get::<gst::Element>().ok()?;
            if element
                .factory()
                .is_some_and(|factory| factory.name().as_str() == "glimagesink")
            {
                element.set_property("handle-events", false);
            }
            None
        });

        let bus = playbin
            .bus()
            .ok_or_else(|| EngineError::Create("playbin has no bus".into()))?;

        let binder = SurfaceBinder::new(Arc::clone(&self.surface));
        let events = self.events.clone();
        bus.set_sync_handler(move |_, msg| on_message(id, &binder, &events, msg));

        Ok(Playbin { playbin })
    }
}

pub struct Playbin {
    playbin: gst::Element,
}

impl Engine for Playbin {
    fn set_state(&mut self, state: EngineState) -> Result<(), EngineError> {
        let state = match state {
            EngineState::Null => gst::State::Null,
            EngineState::Paused => gst::State::Paused,
            EngineState::Playing => gst::State::Playing,
        };
        self.playbin
            .set_state(state)
            .map(drop)
            .map_err(|err| EngineError::State(err.to_string()))
    }

    fn volume(&self) -> f64 {
        self.playbin.property("volume")
    }

    fn set_volume(&mut self, volume: f64) {
        self.playbin.set_property("volume", volume)
    }
}

struct Overlay<'a>(&'a gst_video::VideoOverlay);

impl RenderTarget for Overlay<'_> {
    fn set_window_handle(&self, handle: SurfaceHandle) {
        // SAFETY: the window outlives every playbin, they are all stopped before it closes
        unsafe { self.0.set_window_handle(handle.raw()) }
    }
}

// this runs on the streaming threads
fn on_message(
    id: SessionId,
    binder: &SurfaceBinder,
    events: &EventSender,
    msg: &gst::Message,
) -> gst::BusSyncReply {
    if gst_video::is_video_overlay_prepare_window_handle_message(msg) {
        let overlay = match msg
            .src()
            .and_then(|src| src.dynamic_cast_ref::<gst_video::VideoOverlay>())
        {
            Some(overlay) => overlay,
            None => return gst::BusSyncReply::Pass,
        };

        return match binder.bind(&Overlay(overlay)) {
            BusReply::Drop => gst::BusSyncReply::Drop,
            BusReply::Pass => gst::BusSyncReply::Pass,
        };
    }

    use gst::MessageView;
    let notification = match msg.view() {
        MessageView::Eos(..) => Notification::EndOfStream,
        MessageView::Error(err) => {
            log::debug!("{}: {:?}", id, err.debug());
            Notification::Error(err.error().to_string())
        }
        MessageView::Buffering(buffering) => {
            Notification::Buffering(buffering.percent().clamp(0, 100) as u8)
        }
        // nothing watches the bus, so don't let anything pile up on it
        _ => return gst::BusSyncReply::Drop,
    };

    events.send(Event::Engine { id, notification });
    gst::BusSyncReply::Drop
}
