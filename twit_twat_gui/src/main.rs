use anyhow::Context as _;
use eframe::egui::ViewportBuilder;

mod app;
mod engine;
mod surface;
mod window;

fn main() -> anyhow::Result<()> {
    alto_logger::init_alt_term_logger()?;

    gstreamer::init().with_context(|| "cannot initialize gstreamer")?;
    engine::prefer_hardware_decoding();

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Twit-Twat")
            .with_inner_size([960.0, 540.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Twit-Twat",
        options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc)))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
}
