pub mod panels;

use std::time::Duration;

use eframe::egui;

use crate::app::LauncherApp;
use crate::models::Page;
use crate::session::InputEvent;

pub const WINDOW_TITLE: &str = "Moonlight Launcher";

const GAMEPAD_POLL_INTERVAL: Duration = Duration::from_millis(16);

// ─── eframe App impl ─────────────────────────────────────────────────────────

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let events = self.frame_events(ctx);

        if self.gamepad.is_active() {
            ctx.request_repaint_after(GAMEPAD_POLL_INTERVAL);
        }
        if events.is_empty() {
            self.keyboard_moved = false;
            return;
        }
        if self.process(&events) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        ctx.request_repaint();
    }
}

impl LauncherApp {
    /// Draw one frame and collect its input in handling order: keys, gamepad,
    /// then pointer events from the panels.
    pub fn frame_events(&mut self, ctx: &egui::Context) -> Vec<InputEvent> {
        let mut events = keyboard_events(ctx);
        events.extend(self.gamepad.poll());

        egui::SidePanel::left("tab_buttons")
            .exact_width(150.0)
            .resizable(false)
            .show(ctx, |ui| {
                panels::draw_tab_buttons(ui, self.session.active_page(), &mut events);
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::draw_status_bar(self, ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let cursor = self.session.cursor().index();
            let scroll = self.keyboard_moved;
            match self.session.active_page() {
                Page::Presets => {
                    panels::draw_mode_list(ui, self.session.presets(), cursor, scroll, &mut events)
                }
                Page::Supported => {
                    panels::draw_mode_list(ui, self.session.supported(), cursor, scroll, &mut events)
                }
                Page::Launcher => {
                    panels::draw_launcher_list(ui, self.session.apps(), cursor, scroll, &mut events)
                }
                Page::Help => panels::draw_help(ui),
                Page::Logs => panels::draw_logs(ui, &self.logs),
            }
        });

        release_widget_focus(ctx);
        drop_stale_row_events(&mut events);
        events
    }
}

/// Take this frame's navigation keys out of the input queue.
///
/// Consumed keys never reach a widget, so Enter cannot also click whichever
/// button egui's own Tab handling focused.
fn keyboard_events(ctx: &egui::Context) -> Vec<InputEvent> {
    use egui::{Key, Modifiers};

    ctx.input_mut(|i| {
        let mut events = Vec::new();
        if i.consume_key(Modifiers::NONE, Key::ArrowUp) {
            events.push(InputEvent::Up);
        }
        if i.consume_key(Modifiers::NONE, Key::ArrowDown) {
            events.push(InputEvent::Down);
        }
        if i.consume_key(Modifiers::NONE, Key::Enter) {
            events.push(InputEvent::Confirm);
        }
        // Shift+Tab first: the unmodified pattern would match it as well.
        if i.consume_key(Modifiers::SHIFT, Key::Tab) {
            events.push(InputEvent::PrevTab);
        }
        if i.consume_key(Modifiers::NONE, Key::Tab) {
            events.push(InputEvent::NextTab);
        }
        if i.consume_key(Modifiers::NONE, Key::Escape) {
            events.push(InputEvent::Exit);
        }
        events
    })
}

/// The cursor is the only selection; no button keeps keyboard focus.
fn release_widget_focus(ctx: &egui::Context) {
    ctx.memory_mut(|mem| {
        if let Some(id) = mem.focused() {
            mem.surrender_focus(id);
        }
    });
}

/// Row events were hit-tested against the list drawn before a tab switch in
/// the same frame, so they are dropped.
fn drop_stale_row_events(events: &mut Vec<InputEvent>) {
    let switches_tab = events.iter().any(|e| {
        matches!(
            e,
            InputEvent::NextTab | InputEvent::PrevTab | InputEvent::SelectTab(_)
        )
    });
    if switches_tab {
        events.retain(|e| !matches!(e, InputEvent::Hover(_) | InputEvent::Click(_)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DisplayBackend;
    use crate::backend::fake::FakeBackend;
    use crate::launcher::ShellLauncher;
    use crate::logs::LogBuffer;
    use crate::models::{DisplayMode, LauncherConfig};
    use crate::session::Session;

    fn app() -> LauncherApp {
        let config = LauncherConfig {
            resolutions: vec![
                DisplayMode::named("HD", 1920, 1080, 60, 1.5),
                DisplayMode::named("2K", 2560, 1440, 60, 1.5),
            ],
            apps: Vec::new(),
        };
        let backend: Box<dyn DisplayBackend> =
            Box::new(FakeBackend::with_modes(&[(1920, 1080, 60), (1280, 720, 60)]));
        LauncherApp::new(
            Session::new(backend, config),
            LogBuffer::new(8),
            None,
            Box::new(ShellLauncher),
        )
    }

    fn key_press(key: egui::Key, modifiers: egui::Modifiers) -> egui::RawInput {
        egui::RawInput {
            modifiers,
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            ..Default::default()
        }
    }

    fn run_frame(
        app: &mut LauncherApp,
        ctx: &egui::Context,
        input: egui::RawInput,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let _ = ctx.run(input, |ctx| events = app.frame_events(ctx));
        app.process(&events);
        events
    }

    #[test]
    fn enter_after_tab_commits_once() {
        let ctx = egui::Context::default();
        let mut app = app();

        assert!(run_frame(&mut app, &ctx, egui::RawInput::default()).is_empty());
        assert_eq!(
            run_frame(&mut app, &ctx, key_press(egui::Key::Tab, egui::Modifiers::NONE)),
            vec![InputEvent::NextTab]
        );
        assert!(ctx.memory(|mem| mem.focused()).is_none());

        assert_eq!(
            run_frame(&mut app, &ctx, key_press(egui::Key::Enter, egui::Modifiers::NONE)),
            vec![InputEvent::Confirm]
        );
        assert_eq!(app.session.active_page(), Page::Supported);
        assert_eq!(app.status_message, "✅ Applied 1920x1080@60 Hz.");
    }

    #[test]
    fn shift_tab_is_prev_tab_only() {
        let ctx = egui::Context::default();
        let mut app = app();

        run_frame(&mut app, &ctx, egui::RawInput::default());
        assert_eq!(
            run_frame(&mut app, &ctx, key_press(egui::Key::Tab, egui::Modifiers::SHIFT)),
            vec![InputEvent::PrevTab]
        );
        assert_eq!(app.session.active_page(), Page::Logs);
    }

    #[test]
    fn row_events_in_a_tab_switch_frame_are_dropped() {
        let mut events = vec![InputEvent::NextTab, InputEvent::Hover(1), InputEvent::Click(2)];
        drop_stale_row_events(&mut events);
        assert_eq!(events, vec![InputEvent::NextTab]);

        let mut events = vec![InputEvent::Down, InputEvent::Click(2)];
        drop_stale_row_events(&mut events);
        assert_eq!(events, vec![InputEvent::Down, InputEvent::Click(2)]);
    }
}
