use eframe::egui;
use egui_phosphor::regular;

use crate::app::LauncherApp;
use crate::logs::LogBuffer;
use crate::models::{DisplayMode, LaunchEntry, Page};
use crate::session::InputEvent;

const SHORTCUTS: [(&str, &str, &str); 6] = [
    ("Next Tab", "Tab", "R1"),
    ("Prev Tab", "Shift + Tab", "L1"),
    ("Next Item", "Down", "D-Pad Down"),
    ("Prev Item", "Up", "D-Pad Up"),
    ("Select", "Enter", "A / Cross"),
    ("Exit", "Escape", "Start + Back"),
];

fn page_icon(page: Page) -> &'static str {
    match page {
        Page::Presets => regular::HOUSE,
        Page::Supported => regular::LAPTOP,
        Page::Launcher => regular::CUBE,
        Page::Help => regular::INFO,
        Page::Logs => regular::BUG,
    }
}

// ─── Tab Buttons ─────────────────────────────────────────────────────────────

pub fn draw_tab_buttons(ui: &mut egui::Ui, active: Page, events: &mut Vec<InputEvent>) {
    let size = egui::vec2(ui.available_width(), ui.available_width() * 0.6);

    for page in Page::ALL {
        let label = egui::RichText::new(page_icon(page)).size(28.0);
        let response = ui
            .add_sized(size, egui::Button::new(label).selected(page == active))
            .on_hover_text(page.title());
        if response.clicked() {
            events.push(InputEvent::SelectTab(page.index()));
        }
    }

    ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
        let exit = egui::RichText::new(regular::POWER).size(28.0);
        if ui
            .add_sized(size, egui::Button::new(exit))
            .on_hover_text("Exit")
            .clicked()
        {
            events.push(InputEvent::Exit);
        }
    });
}

// ─── Lists ───────────────────────────────────────────────────────────────────

/// Selectable rows. Hovering a row previews it, clicking commits it.
fn draw_rows(
    ui: &mut egui::Ui,
    rows: impl Iterator<Item = String>,
    cursor: Option<usize>,
    scroll_to_cursor: bool,
    events: &mut Vec<InputEvent>,
) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, text) in rows.enumerate() {
                let selected = cursor == Some(i);
                let response = ui.add_sized(
                    [ui.available_width(), 32.0],
                    egui::Button::new(egui::RichText::new(text).size(18.0)).selected(selected),
                );
                if response.clicked() {
                    events.push(InputEvent::Click(i));
                } else if response.hovered()
                    && !selected
                    && ui.input(|input| input.pointer.is_moving())
                {
                    events.push(InputEvent::Hover(i));
                }
                if selected && scroll_to_cursor {
                    response.scroll_to_me(Some(egui::Align::Center));
                }
            }
        });
}

pub fn draw_mode_list(
    ui: &mut egui::Ui,
    modes: &[DisplayMode],
    cursor: Option<usize>,
    scroll_to_cursor: bool,
    events: &mut Vec<InputEvent>,
) {
    if modes.is_empty() {
        ui.label(
            egui::RichText::new("No display modes available.")
                .small()
                .color(egui::Color32::GRAY),
        );
        return;
    }
    let rows = modes.iter().map(|m| format!(" {} {}", regular::MONITOR, m));
    draw_rows(ui, rows, cursor, scroll_to_cursor, events);
}

pub fn draw_launcher_list(
    ui: &mut egui::Ui,
    apps: &[LaunchEntry],
    cursor: Option<usize>,
    scroll_to_cursor: bool,
    events: &mut Vec<InputEvent>,
) {
    if apps.is_empty() {
        ui.label(
            egui::RichText::new("No applications configured.")
                .small()
                .color(egui::Color32::GRAY),
        );
        return;
    }
    let rows = apps.iter().map(|a| {
        let shield = if a.elevated { regular::SHIELD_CHECK } else { "" };
        format!(" {} {} {}", regular::CUBE, a.name, shield)
    });
    draw_rows(ui, rows, cursor, scroll_to_cursor, events);
}

// ─── Help / Logs ─────────────────────────────────────────────────────────────

pub fn draw_help(ui: &mut egui::Ui) {
    ui.add_space(8.0);
    egui::Grid::new("shortcuts")
        .striped(true)
        .num_columns(3)
        .spacing([24.0, 8.0])
        .show(ui, |ui| {
            ui.strong("Action");
            ui.strong("Keyboard");
            ui.strong("Gamepad");
            ui.end_row();
            for (action, keyboard, gamepad) in SHORTCUTS {
                ui.label(action);
                ui.label(keyboard);
                ui.label(gamepad);
                ui.end_row();
            }
        });
}

pub fn draw_logs(ui: &mut egui::Ui, logs: &LogBuffer) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in logs.lines() {
                ui.label(egui::RichText::new(format!(" {line}")).monospace());
            }
        });
}

// ─── Status Bar ──────────────────────────────────────────────────────────────

pub fn draw_status_bar(app: &LauncherApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label(&app.status_message);
        if let Some(err) = app.session.last_error() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(egui::Color32::from_rgb(230, 110, 90), err.to_string());
            });
        }
    });
}
