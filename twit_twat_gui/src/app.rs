use std::sync::Arc;

use eframe::egui::*;
use twit_twat::{
    Config, Controller, Event, EventQueue, Gesture, Notice, Prompt, Resolver, SessionState,
    Severity, StatefulAgent,
};

use crate::{
    engine::Playbins,
    surface,
    window::{self, Repaint, ViewportWindow},
};

pub struct App {
    controller: Controller<StatefulAgent, Playbins>,
    queue: EventQueue,
    // the prompt being edited and its text
    editing: Option<Prompt>,
    entry: String,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let queue = EventQueue::new();
        let events = queue.sender(Arc::new(Repaint(cc.egui_ctx.clone())));

        let surface = surface::probe(cc);
        let backend = Playbins::new(Arc::new(surface), events.clone());

        let config = Config::default();
        let agent = StatefulAgent::new(&config.client_id, config.request_timeout);
        let resolver = Resolver::new(config, agent);
        let controller = Controller::new(resolver, backend, events);

        Self {
            controller,
            queue,
            editing: None,
            entry: String::new(),
        }
    }
}

impl App {
    fn dispatch(&mut self, ctx: &Context, event: Event) {
        self.controller.handle(event, &mut ViewportWindow(ctx))
    }

    fn maybe_display_prompt(&mut self, ctx: &Context) {
        let prompt = match self.controller.prompt() {
            Some(prompt) => prompt.clone(),
            None => {
                self.editing.take();
                return;
            }
        };

        let opened = self.editing.as_ref() != Some(&prompt);
        if opened {
            self.entry = prompt.initial().to_string();
            self.editing = Some(prompt.clone());
        }

        let submitted = Window::new(prompt.title())
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                let resp = ui.add(TextEdit::singleline(&mut self.entry).desired_width(240.0));
                if opened {
                    resp.request_focus();
                }
                resp.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter))
            })
            .and_then(|resp| resp.inner)
            .unwrap_or(false);

        if submitted {
            let event = prompt.submit(std::mem::take(&mut self.entry));
            self.dispatch(ctx, event);
        } else if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.dispatch(ctx, Event::PromptCancelled);
        }
    }

    fn maybe_display_notice(&mut self, ctx: &Context) {
        let Notice {
            severity,
            title,
            message,
        } = match self.controller.notice() {
            Some(notice) => notice.clone(),
            None => return,
        };

        let heading = match severity {
            Severity::Info => Color32::LIGHT_BLUE,
            Severity::Error => Color32::RED,
        };

        let InnerResponse { inner: done, .. } = Area::new(Id::new("notice"))
            .movable(false)
            .order(Order::Foreground)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                Frame::canvas(ui.style())
                    .fill(Color32::BLACK)
                    .stroke(Stroke::new(1.0, Color32::DARK_GRAY))
                    .inner_margin(Margin::same(10.0))
                    .show(ui, |ui| {
                        ui.heading(RichText::new(title).color(heading));
                        ui.label(RichText::new(message).color(Color32::WHITE).monospace());

                        ui.with_layout(Layout::top_down(Align::RIGHT), |ui| {
                            ui.small_button("ok").clicked()
                        })
                        .inner
                    })
                    .inner
            });

        if done || ctx.input(|i| i.key_pressed(Key::Enter) || i.key_pressed(Key::Escape)) {
            self.dispatch(ctx, Event::NoticeDismissed);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let events = self.queue.drain().collect::<Vec<_>>();
        for event in events {
            self.dispatch(ctx, event);
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            self.dispatch(ctx, Event::Gesture(Gesture::Close));
            return;
        }

        // the video overlay draws into this same surface
        if paints_backdrop(self.controller.sessions().state(), self.editing.is_some()) {
            CentralPanel::default().frame(Frame::none()).show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.weak("press g to enter a channel, h for the controls")
                });
            });
        }

        if self.controller.prompt().is_some() {
            self.maybe_display_prompt(ctx);
            return;
        }
        self.editing.take();

        if self.controller.notice().is_some() {
            self.maybe_display_notice(ctx);
            return;
        }

        for gesture in window::gestures(ctx) {
            self.dispatch(ctx, Event::Gesture(gesture));
        }
    }

    fn clear_color(&self, _visuals: &Visuals) -> [f32; 4] {
        Rgba::BLACK.to_array()
    }
}

fn paints_backdrop(state: SessionState, editing: bool) -> bool {
    state == SessionState::Idle && !editing
}
